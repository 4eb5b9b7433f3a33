//! Parsing and reading from PDF objects.

use crate::error::{Error, Result};
use crate::object::dict::Dict;
use crate::object::name::Name;
use crate::object::null::Null;
use crate::object::number::{read_number_or_ref, read_uint};
use crate::object::r#ref::ObjRef;
use crate::object::stream::Stream;
use crate::reader::{Readable, Reader};
use std::fmt::{Display, Formatter};

pub mod array;
mod bool;
pub mod dict;
pub mod indirect;
pub mod name;
mod null;
pub mod number;
pub(crate) mod object_stream;
pub mod r#ref;
pub mod stream;
pub mod string;

pub use indirect::{IndirectObject, Location, parse_indirect_object};

/// A PDF object.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// A null object.
    Null,
    /// A boolean object.
    Boolean(bool),
    /// A number object. Integers and reals are not distinguished.
    Number(f64),
    /// A string object, holding the raw bytes of a literal or hex string.
    String(Vec<u8>),
    /// A name object.
    Name(Name),
    /// An array object.
    Array(Vec<Object>),
    /// A dict object.
    Dict(Dict),
    /// A reference to an indirect object. It is never resolved in place.
    Ref(ObjRef),
}

impl Object {
    /// Returns the object as a number, if it is one.
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the object as a boolean, if it is one.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the bytes of a string object.
    #[inline]
    pub fn as_string(&self) -> Option<&[u8]> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the object as a name, if it is one.
    #[inline]
    pub fn as_name(&self) -> Option<&Name> {
        match self {
            Self::Name(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the items of an array object.
    #[inline]
    pub fn as_array(&self) -> Option<&[Object]> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the object as a dictionary, if it is one.
    #[inline]
    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Self::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Returns the object as a reference, if it is one.
    #[inline]
    pub fn as_obj_ref(&self) -> Option<ObjRef> {
        match self {
            Self::Ref(r) => Some(*r),
            _ => None,
        }
    }

    /// Whether the object is the null object.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// A short name of the object's type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Name(_) => "name",
            Self::Array(_) => "array",
            Self::Dict(_) => "dictionary",
            Self::Ref(_) => "reference",
        }
    }
}

/// Parses one object at the current position of the reader, skipping leading white space.
///
/// On success, the reader is placed right after the object.
pub fn parse_object(r: &mut Reader<'_>) -> Result<Object> {
    r.skip_white_spaces();

    let offset = r.offset();
    let byte = r.peek(0)?;

    let object = match byte {
        b'0'..=b'9' | b'+' | b'-' | b'.' => read_number_or_ref(r)?,
        b'(' => Object::String(string::read_literal(r)?),
        b'/' => Object::Name(r.read::<Name>()?),
        b't' | b'f' => Object::Boolean(r.read::<bool>()?),
        b'n' => {
            r.read::<Null>()?;
            Object::Null
        }
        b'<' if r.peek_tag(b"<<") => Object::Dict(dict::read_dict(r)?),
        b'<' => Object::String(string::read_hex(r)?),
        b'[' => Object::Array(array::read_array(r)?),
        _ => return Err(Error::UnexpectedByte { byte, offset }),
    };

    Ok(object)
}

/// The identifier of an indirect object: its object and generation number.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ObjectIdentifier {
    /// The object number.
    pub obj_number: u32,
    /// The generation number.
    pub gen_number: u16,
}

impl ObjectIdentifier {
    /// Create a new object identifier.
    pub fn new(obj_number: u32, gen_number: u16) -> Self {
        Self {
            obj_number,
            gen_number,
        }
    }
}

impl Display for ObjectIdentifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.obj_number, self.gen_number)
    }
}

impl Readable for ObjectIdentifier {
    fn read(r: &mut Reader<'_>) -> Result<Self> {
        r.skip_white_spaces();
        let obj_number = read_uint::<u32>(r)?;
        r.skip_white_spaces();
        let gen_number = read_uint::<u16>(r)?;
        r.skip_white_spaces();

        let offset = r.offset();
        let token = r.read_token();

        if token != b"obj" {
            return Err(Error::UnexpectedToken {
                expected: "obj",
                found: String::from_utf8_lossy(token).into_owned(),
                offset,
            });
        }

        Ok(Self::new(obj_number, gen_number))
    }
}

/// Parses the `<num> <gen> obj` header of an indirect object.
///
/// The reader is left unchanged if the header is invalid.
pub fn parse_indirect_object_header(r: &mut Reader<'_>) -> Result<ObjectIdentifier> {
    r.read::<ObjectIdentifier>()
}

/// The value of an indirect object.
///
/// Streams can only appear as indirect objects, which is why they are not a variant of
/// [`Object`].
#[derive(Debug, Clone)]
pub enum IndirectValue {
    /// A plain object.
    Object(Object),
    /// A stream.
    Stream(Stream),
}

impl IndirectValue {
    /// Returns the plain object, if this is not a stream.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            Self::Stream(_) => None,
        }
    }

    /// Returns the stream, if this is one.
    pub fn as_stream(&self) -> Option<&Stream> {
        match self {
            Self::Object(_) => None,
            Self::Stream(s) => Some(s),
        }
    }

    /// Returns the dictionary of a dictionary object or a stream.
    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Self::Object(o) => o.as_dict(),
            Self::Stream(s) => Some(s.dict()),
        }
    }
}
