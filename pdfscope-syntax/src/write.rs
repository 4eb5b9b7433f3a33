//! Writing objects back to PDF syntax.
//!
//! Dictionary entries are written sorted by key, so the output is deterministic. Strings that
//! only consist of printable ASCII characters are written as literal strings and all others as
//! hex strings.

use crate::object::dict::Dict;
use crate::object::name::Name;
use crate::object::{IndirectValue, Object};
use crate::trivia::is_regular_character;
use std::fmt::{Display, Formatter};

/// Serialize an object to PDF syntax.
pub fn to_bytes(obj: &Object) -> Vec<u8> {
    let mut out = vec![];
    write_object(obj, &mut out);

    out
}

/// Append the PDF syntax of an object to `out`.
pub fn write_object(obj: &Object, out: &mut Vec<u8>) {
    match obj {
        Object::Null => out.extend_from_slice(b"null"),
        Object::Boolean(true) => out.extend_from_slice(b"true"),
        Object::Boolean(false) => out.extend_from_slice(b"false"),
        Object::Number(n) => write_number(*n, out),
        Object::String(s) => write_string(s, out),
        Object::Name(n) => write_name(n, out),
        Object::Array(items) => {
            out.push(b'[');

            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b' ');
                }

                write_object(item, out);
            }

            out.push(b']');
        }
        Object::Dict(dict) => write_dict(dict, out),
        Object::Ref(r) => out.extend_from_slice(r.to_string().as_bytes()),
    }
}

fn write_number(num: f64, out: &mut Vec<u8>) {
    if !num.is_finite() {
        lwarn!("writing non-finite number {} as 0", num);
        out.push(b'0');
    } else if num.fract() == 0.0 && num.abs() < 9_007_199_254_740_992.0 {
        out.extend_from_slice((num as i64).to_string().as_bytes());
    } else {
        out.extend_from_slice(num.to_string().as_bytes());
    }
}

fn write_string(s: &[u8], out: &mut Vec<u8>) {
    if s.iter().all(|b| (0x20..=0x7e).contains(b)) {
        out.push(b'(');

        for &b in s {
            if matches!(b, b'(' | b')' | b'\\') {
                out.push(b'\\');
            }

            out.push(b);
        }

        out.push(b')');
    } else {
        out.push(b'<');

        for b in s {
            out.extend_from_slice(format!("{b:02X}").as_bytes());
        }

        out.push(b'>');
    }
}

fn write_name(name: &Name, out: &mut Vec<u8>) {
    out.push(b'/');

    for &b in name.iter() {
        if b != b'#' && (0x21..=0x7e).contains(&b) && is_regular_character(b) {
            out.push(b);
        } else {
            out.extend_from_slice(format!("#{b:02X}").as_bytes());
        }
    }
}

fn write_dict(dict: &Dict, out: &mut Vec<u8>) {
    out.extend_from_slice(b"<<");

    for (i, (key, value)) in dict.entries().enumerate() {
        if i > 0 {
            out.push(b' ');
        }

        write_name(key, out);
        out.push(b' ');
        write_object(value, out);
    }

    out.extend_from_slice(b">>");
}

impl Display for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&String::from_utf8_lossy(&to_bytes(self)))
    }
}

impl Display for IndirectValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Object(obj) => Display::fmt(obj, f),
            Self::Stream(stream) => {
                let mut out = vec![];
                write_dict(stream.dict(), &mut out);

                write!(f, "{} stream", String::from_utf8_lossy(&out))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::object::dict::Dict;
    use crate::object::name::Name;
    use crate::object::r#ref::ObjRef;
    use crate::object::{Object, parse_object};
    use crate::reader::Reader;
    use crate::write::to_bytes;

    fn round_trip(obj: &Object) {
        let written = to_bytes(obj);
        let parsed = parse_object(&mut Reader::new(&written)).unwrap();

        assert_eq!(&parsed, obj, "{}", String::from_utf8_lossy(&written));
    }

    #[test]
    fn numbers() {
        assert_eq!(to_bytes(&Object::Number(3.0)), b"3");
        assert_eq!(to_bytes(&Object::Number(-0.5)), b"-0.5");
        round_trip(&Object::Number(1.25));
        round_trip(&Object::Number(-17.0));
    }

    #[test]
    fn names() {
        let name = Object::Name(Name::from("Websafe Dark#Green/"));

        assert_eq!(to_bytes(&name), b"/Websafe#20Dark#23Green#2F");
        round_trip(&name);
        round_trip(&Object::Name(Name::new(vec![0x00, 0xff, b'A'])));
    }

    #[test]
    fn strings() {
        let literal = Object::String(b"a (nested) \\ string".to_vec());

        assert_eq!(to_bytes(&literal), b"(a \\(nested\\) \\\\ string)");
        round_trip(&literal);

        let binary = Object::String(vec![0x00, 0x9f, b'\n']);

        assert_eq!(to_bytes(&binary), b"<009F0A>");
        round_trip(&binary);
        round_trip(&Object::String(vec![]));
    }

    #[test]
    fn containers() {
        let mut inner = Dict::new();
        inner.insert("Kids", Object::Array(vec![Object::Ref(ObjRef::new(4, 2))]));
        inner.insert("Count", Object::Number(1.0));

        let mut dict = Dict::new();
        dict.insert("Type", Object::Name(Name::from("Pages")));
        dict.insert("Inner", Object::Dict(inner));
        dict.insert("Flag", Object::Boolean(false));
        dict.insert("Nothing", Object::Null);

        let obj = Object::Array(vec![Object::Dict(dict), Object::Number(7.0), Object::Array(vec![])]);

        round_trip(&obj);
    }

    #[test]
    fn display() {
        let obj = Object::Array(vec![Object::Ref(ObjRef::new(1, 0)), Object::Boolean(true)]);
        assert_eq!(obj.to_string(), "[1 0 R true]");
    }
}
