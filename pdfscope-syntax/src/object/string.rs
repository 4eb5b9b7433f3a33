//! Strings.
//!
//! Both literal strings (`(abc)`) and hex strings (`<616263>`) are read into their raw byte
//! content. No text encoding is applied.

use crate::error::{Error, Result};
use crate::object::name::hex_value;
use crate::reader::Reader;
use crate::trivia::is_white_space_character;

/// Reads a literal string.
///
/// Parentheses nest, so `(a(b)c)` is a single string. A backslash makes the byte following it
/// part of the string as-is, which is how unbalanced parentheses are written.
pub(crate) fn read_literal(r: &mut Reader<'_>) -> Result<Vec<u8>> {
    let offset = r.offset();
    let byte = r.read_one()?;

    if byte != b'(' {
        return Err(Error::UnexpectedByte { byte, offset });
    }

    let mut content = vec![];
    let mut depth = 1_usize;

    loop {
        match r.read_one()? {
            b'\\' => content.push(r.read_one()?),
            b'(' => {
                depth += 1;
                content.push(b'(');
            }
            b')' => {
                depth -= 1;

                if depth == 0 {
                    break;
                }

                content.push(b')');
            }
            other => content.push(other),
        }
    }

    Ok(content)
}

/// Reads a hex string.
///
/// White space between the digits is ignored. A missing final digit counts as `0`.
pub(crate) fn read_hex(r: &mut Reader<'_>) -> Result<Vec<u8>> {
    let offset = r.offset();
    let byte = r.read_one()?;

    if byte != b'<' {
        return Err(Error::UnexpectedByte { byte, offset });
    }

    let mut content = vec![];
    let mut pending = None;

    loop {
        let offset = r.offset();

        match r.read_one()? {
            b'>' => break,
            b if is_white_space_character(b) => {}
            b => {
                let digit = hex_value(b).ok_or(Error::InvalidHexDigit(offset))?;

                match pending.take() {
                    Some(hi) => content.push(hi << 4 | digit),
                    None => pending = Some(digit),
                }
            }
        }
    }

    if let Some(hi) = pending {
        content.push(hi << 4);
    }

    Ok(content)
}
