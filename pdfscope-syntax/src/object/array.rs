//! Arrays.

use crate::error::{Error, Result};
use crate::object::{Object, parse_object};
use crate::reader::Reader;

/// Reads an array, such as `[1 0 R /Name (str)]`.
pub(crate) fn read_array(r: &mut Reader<'_>) -> Result<Vec<Object>> {
    let offset = r.offset();
    let byte = r.read_one()?;

    if byte != b'[' {
        return Err(Error::UnexpectedByte { byte, offset });
    }

    let mut items = vec![];

    loop {
        r.skip_white_spaces();

        if r.forward_tag(b"]").is_some() {
            return Ok(items);
        }

        items.push(parse_object(r)?);
    }
}
