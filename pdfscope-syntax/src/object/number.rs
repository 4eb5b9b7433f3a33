//! Number objects.

use crate::error::{Error, Result};
use crate::object::Object;
use crate::object::r#ref::ObjRef;
use crate::reader::{Readable, Reader};
use crate::trivia::is_digit;
use std::str::FromStr;

impl Readable for f64 {
    fn read(r: &mut Reader<'_>) -> Result<Self> {
        let start = r.offset();

        r.eat(|b| b == b'+' || b == b'-');
        let int_start = r.offset();
        r.forward_while(is_digit);
        let mut num_digits = r.offset() - int_start;

        if r.forward_tag(b".").is_some() {
            let frac_start = r.offset();
            r.forward_while(is_digit);
            num_digits += r.offset() - frac_start;
        }

        if num_digits == 0 {
            return Err(Error::InvalidNumber(start));
        }

        r.range(start..r.offset())
            .and_then(|token| std::str::from_utf8(token).ok())
            .and_then(|token| f64::from_str(token).ok())
            .ok_or(Error::InvalidNumber(start))
    }
}

/// Reads an unsigned integer made up of plain digits, without sign or fraction.
pub(crate) fn read_uint<T: FromStr>(r: &mut Reader<'_>) -> Result<T> {
    let start = r.offset();
    r.forward_while(is_digit);

    r.range(start..r.offset())
        .filter(|digits| !digits.is_empty())
        .and_then(|digits| std::str::from_utf8(digits).ok())
        .and_then(|digits| T::from_str(digits).ok())
        .ok_or(Error::InvalidNumber(start))
}

/// Reads either an object reference or a plain number.
///
/// A reference is attempted first. If the lookahead does not form one, the reader is rewound
/// and only the leading number is consumed.
pub(crate) fn read_number_or_ref(r: &mut Reader<'_>) -> Result<Object> {
    if let Ok(obj_ref) = r.read::<ObjRef>() {
        return Ok(Object::Ref(obj_ref));
    }

    Ok(Object::Number(r.read::<f64>()?))
}

/// Converts a number into a non-negative integer, if it is one.
pub(crate) fn as_uint(num: f64) -> Option<u64> {
    (num >= 0.0 && num.fract() == 0.0 && num <= u64::MAX as f64).then_some(num as u64)
}
