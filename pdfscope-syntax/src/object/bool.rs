//! Booleans.

use crate::error::{Error, Result};
use crate::reader::{Readable, Reader};

impl Readable for bool {
    fn read(r: &mut Reader<'_>) -> Result<Self> {
        let offset = r.offset();

        match r.read_token() {
            b"true" => Ok(true),
            b"false" => Ok(false),
            other => Err(Error::InvalidLiteral {
                expected: "boolean",
                found: String::from_utf8_lossy(other).into_owned(),
                offset,
            }),
        }
    }
}
