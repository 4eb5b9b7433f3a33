//! Dictionaries.

use crate::error::{Error, Result};
use crate::object::name::Name;
use crate::object::number::as_uint;
use crate::object::r#ref::ObjRef;
use crate::object::{Object, parse_object};
use crate::reader::Reader;
use rustc_hash::FxHashMap;

/// A dictionary, which is a key-value map, keys being names, and values being any PDF object or
/// object reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dict(FxHashMap<Name, Object>);

impl Dict {
    /// Create a new empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries in the dictionary.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return whether the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks whether the dictionary contains an entry with a specific key.
    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the raw entry of a key. References are not resolved.
    pub fn get(&self, key: &[u8]) -> Option<&Object> {
        self.0.get(key)
    }

    /// Returns the entry of a key if it is a number.
    pub fn get_number(&self, key: &[u8]) -> Option<f64> {
        self.get(key).and_then(Object::as_number)
    }

    /// Returns the entry of a key if it is a non-negative integer.
    pub fn get_uint(&self, key: &[u8]) -> Option<u64> {
        self.get_number(key).and_then(as_uint)
    }

    /// Returns the entry of a key if it is a name.
    pub fn get_name(&self, key: &[u8]) -> Option<&Name> {
        self.get(key).and_then(Object::as_name)
    }

    /// Returns the entry of a key if it is a dictionary.
    pub fn get_dict(&self, key: &[u8]) -> Option<&Dict> {
        self.get(key).and_then(Object::as_dict)
    }

    /// Returns the entry of a key if it is an array.
    pub fn get_array(&self, key: &[u8]) -> Option<&[Object]> {
        self.get(key).and_then(Object::as_array)
    }

    /// Get the object reference linked to a key.
    pub fn get_ref(&self, key: &[u8]) -> Option<ObjRef> {
        self.get(key).and_then(Object::as_obj_ref)
    }

    /// Insert an entry, returning the previous value of the key.
    pub fn insert(&mut self, key: impl Into<Name>, value: Object) -> Option<Object> {
        self.0.insert(key.into(), value)
    }

    /// Returns an iterator over all keys in the dictionary, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &Name> {
        self.0.keys()
    }

    /// An iterator over all entries in the dictionary, sorted by key.
    pub fn entries(&self) -> impl Iterator<Item = (&Name, &Object)> {
        let mut entries = self.0.iter().collect::<Vec<_>>();
        entries.sort_by(|(k1, _), (k2, _)| k1.cmp(k2));
        entries.into_iter()
    }
}

impl<K: Into<Name>> FromIterator<(K, Object)> for Dict {
    fn from_iter<T: IntoIterator<Item = (K, Object)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Reads a dictionary, such as `<</Type /Page /Parent 3 0 R>>`.
///
/// When a key appears more than once, the last entry wins.
pub(crate) fn read_dict(r: &mut Reader<'_>) -> Result<Dict> {
    let offset = r.offset();

    if r.forward_tag(b"<<").is_none() {
        let byte = r.peek(0)?;
        return Err(Error::UnexpectedByte { byte, offset });
    }

    let mut dict = Dict::new();

    loop {
        r.skip_white_spaces();

        if r.forward_tag(b">>").is_some() {
            return Ok(dict);
        }

        let key = r.read::<Name>()?;
        let value = parse_object(r)?;
        dict.insert(key, value);
    }
}

/// A collection of possible keys in a PDF dictionary.
pub mod keys {
    macro_rules! key {
        ($i:ident, $e:expr) => {
            #[allow(missing_docs)]
            pub const $i: &[u8] = $e;
        };
    }

    key!(BITS_PER_COMPONENT, b"BitsPerComponent");
    key!(COLORS, b"Colors");
    key!(COLUMNS, b"Columns");
    key!(DECODE_PARMS, b"DecodeParms");
    key!(FILTER, b"Filter");
    key!(FIRST, b"First");
    key!(FL, b"Fl");
    key!(FLATE_DECODE, b"FlateDecode");
    key!(INDEX, b"Index");
    key!(LENGTH, b"Length");
    key!(N, b"N");
    key!(PREDICTOR, b"Predictor");
    key!(PREV, b"Prev");
    key!(SIZE, b"Size");
    key!(W, b"W");
    key!(XREF_STM, b"XRefStm");
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::object::Object;
    use crate::object::dict::{Dict, read_dict};
    use crate::object::name::Name;
    use crate::object::r#ref::ObjRef;
    use crate::reader::Reader;

    fn dict(data: &[u8]) -> Dict {
        read_dict(&mut Reader::new(data)).unwrap()
    }

    #[test]
    fn empty() {
        assert!(dict(b"<<>>").is_empty());
    }

    #[test]
    fn simple() {
        let dict = dict(b"<</Type /Catalog /Pages 2 0 R>>");

        assert_eq!(dict.len(), 2);
        assert_eq!(dict.get_name(b"Type"), Some(&Name::from("Catalog")));
        assert_eq!(dict.get_ref(b"Pages"), Some(ObjRef::new(2, 0)));
    }

    #[test]
    fn nested() {
        let dict = dict(b"<</a 1/b (abc)/c <</d 1/c 3>>>>");

        assert_eq!(dict.get_number(b"a"), Some(1.0));
        assert_eq!(dict.get(b"b"), Some(&Object::String(b"abc".to_vec())));

        let nested = dict.get_dict(b"c").unwrap();
        assert_eq!(nested.get_number(b"d"), Some(1.0));
        assert_eq!(nested.get_number(b"c"), Some(3.0));
    }

    #[test]
    fn duplicate_keys() {
        assert_eq!(dict(b"<</A 1 /A 2>>").get_number(b"A"), Some(2.0));
    }

    #[test]
    fn no_white_space() {
        let dict = dict(b"<</Length 12/Filter/FlateDecode/Kids[1 0 R]>>");

        assert_eq!(dict.get_uint(b"Length"), Some(12));
        assert_eq!(dict.get_name(b"Filter"), Some(&Name::from("FlateDecode")));
        assert_eq!(dict.get_array(b"Kids").map(<[Object]>::len), Some(1));
    }

    #[test]
    fn key_not_a_name() {
        assert!(matches!(
            read_dict(&mut Reader::new(b"<<1 2>>")),
            Err(Error::UnexpectedByte { byte: b'1', offset: 2 })
        ));
    }

    #[test]
    fn sorted_entries() {
        let dict = dict(b"<</b 2 /a 1 /c 3>>");
        let keys = dict.entries().map(|(k, _)| k.as_str().into_owned()).collect::<Vec<_>>();

        assert_eq!(keys, ["a", "b", "c"]);
    }
}
