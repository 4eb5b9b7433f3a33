//! Names.

use crate::error::{Error, Result};
use crate::reader::{Readable, Reader};
use crate::trivia::is_regular_character;
use std::borrow::{Borrow, Cow};
use std::fmt::{Display, Formatter};
use std::ops::Deref;

/// A PDF name, with all `#XX` escapes already decoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Name(Vec<u8>);

impl Name {
    /// Create a new name from its decoded bytes.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self(data.into())
    }

    /// Return a string representation of the name.
    pub fn as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl Deref for Name {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[u8]> for Name {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Borrow<[u8]> for Name {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl From<&[u8]> for Name {
    fn from(value: &[u8]) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Self::new(value.as_bytes())
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{}", self.as_str())
    }
}

impl Readable for Name {
    fn read(r: &mut Reader<'_>) -> Result<Self> {
        let offset = r.offset();
        let byte = r.peek(0)?;

        if r.forward_tag(b"/").is_none() {
            return Err(Error::UnexpectedByte { byte, offset });
        }

        let mut decoded = vec![];

        while let Some(b) = r.eat(is_regular_character) {
            if b == b'#' {
                let hi = read_hex_digit(r)?;
                let lo = read_hex_digit(r)?;
                decoded.push(hi << 4 | lo);
            } else {
                decoded.push(b);
            }
        }

        Ok(Self(decoded))
    }
}

fn read_hex_digit(r: &mut Reader<'_>) -> Result<u8> {
    let offset = r.offset();

    r.eat(|b| b.is_ascii_hexdigit())
        .and_then(hex_value)
        .ok_or(Error::InvalidHexDigit(offset))
}

/// Returns the value of a hexadecimal digit.
pub(crate) fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}
