//! The null object.

use crate::error::{Error, Result};
use crate::reader::{Readable, Reader};

/// The null object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Null;

impl Readable for Null {
    fn read(r: &mut Reader<'_>) -> Result<Self> {
        let offset = r.offset();
        let token = r.read_token();

        if token == b"null" {
            Ok(Null)
        } else {
            Err(Error::InvalidLiteral {
                expected: "null",
                found: String::from_utf8_lossy(token).into_owned(),
                offset,
            })
        }
    }
}
