//! Object references.

use crate::error::{Error, Result};
use crate::object::ObjectIdentifier;
use crate::object::number::read_uint;
use crate::reader::{Readable, Reader};
use crate::trivia::{is_regular_character, is_white_space_character};
use std::fmt::{Display, Formatter};

/// A reference to an indirect object, such as `12 0 R`.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub struct ObjRef {
    /// The object number.
    pub obj_number: u32,
    /// The generation number.
    pub gen_number: u16,
}

impl ObjRef {
    /// Create a new object reference.
    pub fn new(obj_number: u32, gen_number: u16) -> Self {
        Self {
            obj_number,
            gen_number,
        }
    }
}

impl From<ObjRef> for ObjectIdentifier {
    fn from(value: ObjRef) -> Self {
        ObjectIdentifier::new(value.obj_number, value.gen_number)
    }
}

impl From<ObjectIdentifier> for ObjRef {
    fn from(value: ObjectIdentifier) -> Self {
        ObjRef::new(value.obj_number, value.gen_number)
    }
}

impl Display for ObjRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} R", self.obj_number, self.gen_number)
    }
}

impl Readable for ObjRef {
    fn read(r: &mut Reader<'_>) -> Result<Self> {
        let obj_number = read_uint::<u32>(r)?;
        expect_white_space(r)?;
        let gen_number = read_uint::<u16>(r)?;
        expect_white_space(r)?;

        let offset = r.offset();
        r.forward_tag(b"R").ok_or_else(|| unexpected(r, offset))?;

        // `R` has to stand on its own, `6 0 Rx` is not a reference.
        if r.peek_byte().is_some_and(is_regular_character) {
            return Err(unexpected(r, offset));
        }

        Ok(Self::new(obj_number, gen_number))
    }
}

fn expect_white_space(r: &mut Reader<'_>) -> Result<()> {
    let offset = r.offset();

    if !r.peek_byte().is_some_and(is_white_space_character) {
        return Err(unexpected(r, offset));
    }

    r.skip_white_spaces();

    Ok(())
}

fn unexpected(r: &Reader<'_>, offset: usize) -> Error {
    let found = r
        .range(offset..(offset + 1).min(r.len()))
        .unwrap_or_default();

    Error::UnexpectedToken {
        expected: "R",
        found: String::from_utf8_lossy(found).into_owned(),
        offset,
    }
}
