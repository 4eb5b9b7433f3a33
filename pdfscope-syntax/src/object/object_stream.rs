//! Object streams, which hold several compressed objects in one stream.

use crate::document::Document;
use crate::error::{Error, Result};
use crate::object::dict::keys::{FIRST, N};
use crate::object::indirect::ResolveContext;
use crate::object::number::{as_uint, read_uint};
use crate::object::stream::Stream;
use crate::object::{Object, parse_object};
use crate::reader::Reader;
use rustc_hash::FxHashMap;

/// The decoded data of an object stream, together with the position of each object in it.
#[derive(Debug)]
pub(crate) struct ObjectStream {
    container: u32,
    data: Vec<u8>,
    offsets: FxHashMap<u32, usize>,
}

impl ObjectStream {
    /// Decodes the object stream `container` and reads its index.
    ///
    /// The index consists of `N` pairs of object numbers and offsets. The offsets are relative
    /// to `First`, or to the end of the index if `First` is absent.
    ///
    /// Taking `First` as the base differs from always measuring from the end of the index, which
    /// is where a writer places `First`. The two only disagree for files whose `First` points
    /// elsewhere, and then `First` wins. The first offset listed for an object number is used.
    pub(crate) fn new(
        container: u32,
        stream: &Stream,
        doc: &Document,
        ctx: &mut ResolveContext,
    ) -> Result<Self> {
        let invalid = |reason| Error::InvalidObjectStream { container, reason };

        let num_objects = stream
            .dict()
            .get_uint(N)
            .ok_or_else(|| invalid("missing number of objects"))?;
        let data = stream.decoded_with(Some(doc), ctx)?.data.clone();

        let mut r = Reader::new(&data);
        let mut index = vec![];

        for _ in 0..num_objects {
            r.skip_white_spaces();
            let obj_number = read_uint::<u32>(&mut r)?;
            r.skip_white_spaces();
            let relative_offset = read_uint::<usize>(&mut r)?;

            index.push((obj_number, relative_offset));
        }

        let base = match stream.dict().get(FIRST) {
            Some(first) => first
                .as_number()
                .and_then(as_uint)
                .and_then(|f| usize::try_from(f).ok())
                .ok_or_else(|| invalid("invalid offset of first object"))?,
            None => r.offset(),
        };

        let mut offsets = FxHashMap::default();

        for (obj_number, relative_offset) in index {
            let offset = base
                .checked_add(relative_offset)
                .ok_or_else(|| invalid("object offset overflows"))?;
            offsets.entry(obj_number).or_insert(offset);
        }

        ltrace!(
            "decoded object stream {} with {} objects",
            container,
            offsets.len()
        );

        Ok(Self {
            container,
            data,
            offsets,
        })
    }

    /// Parses the object with the given number.
    pub(crate) fn get(&self, obj_number: u32) -> Result<Object> {
        let offset = *self
            .offsets
            .get(&obj_number)
            .ok_or(Error::NotInContainer {
                obj_number,
                container: self.container,
            })?;

        if offset >= self.data.len() {
            return Err(Error::OutOfBounds(offset));
        }

        parse_object(&mut Reader::new_with(&self.data, offset))
    }
}
