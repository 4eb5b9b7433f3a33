//! Indirect objects.

use crate::data::PdfData;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::object::object_stream::ObjectStream;
use crate::object::r#ref::ObjRef;
use crate::object::stream::Stream;
use crate::object::{
    IndirectValue, Object, ObjectIdentifier, parse_indirect_object_header, parse_object,
};
use crate::reader::Reader;
use smallvec::SmallVec;
use std::sync::OnceLock;

/// Where the definition of an indirect object is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// At a byte offset in the file.
    Offset(usize),
    /// Inside the object stream with the given object number.
    Compressed(u32),
}

/// An entry of the cross-reference table of a [`Document`].
///
/// The value is only parsed when it is first requested, and kept afterwards.
#[derive(Debug)]
pub struct IndirectObject {
    id: ObjectIdentifier,
    location: Location,
    value: OnceLock<IndirectValue>,
    object_stream: OnceLock<ObjectStream>,
}

impl IndirectObject {
    pub(crate) fn new(id: ObjectIdentifier, location: Location) -> Self {
        Self {
            id,
            location,
            value: OnceLock::new(),
            object_stream: OnceLock::new(),
        }
    }

    /// The identifier of the object.
    pub fn id(&self) -> ObjectIdentifier {
        self.id
    }

    /// Where the object is stored.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Returns whether the value was already resolved.
    pub fn is_resolved(&self) -> bool {
        self.value.get().is_some()
    }

    /// Resolves the value of the object.
    ///
    /// Once this succeeds, later calls return the same value without parsing again. A failure
    /// is not remembered, so calling this again retries.
    pub fn value(&self, doc: &Document) -> Result<&IndirectValue> {
        self.value_with(doc, &mut ResolveContext::new())
    }

    pub(crate) fn value_with(
        &self,
        doc: &Document,
        ctx: &mut ResolveContext,
    ) -> Result<&IndirectValue> {
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        ctx.enter(self.id)?;
        let value = self.resolve(doc, ctx);
        ctx.leave();

        let value = value?;

        Ok(self.value.get_or_init(|| value))
    }

    fn resolve(&self, doc: &Document, ctx: &mut ResolveContext) -> Result<IndirectValue> {
        match self.location {
            Location::Offset(offset) => {
                let (id, value) = parse_indirect_object(doc.data(), offset)?;

                if id != self.id {
                    lwarn!(
                        "expected object {} at offset {}, but found {}",
                        self.id,
                        offset,
                        id
                    );
                }

                Ok(value)
            }
            Location::Compressed(container) => {
                let container_ref = ObjRef::new(container, 0);
                let entry = doc
                    .get(container, 0)
                    .ok_or(Error::ObjectNotFound(container_ref))?;

                entry
                    .object_stream_with(doc, ctx)?
                    .get(self.id.obj_number)
                    .map(IndirectValue::Object)
            }
        }
    }

    /// Returns the decoded object stream stored in this object.
    fn object_stream_with(
        &self,
        doc: &Document,
        ctx: &mut ResolveContext,
    ) -> Result<&ObjectStream> {
        if let Some(object_stream) = self.object_stream.get() {
            return Ok(object_stream);
        }

        let stream = self
            .value_with(doc, ctx)?
            .as_stream()
            .ok_or(Error::ContainerNotStream(self.id.obj_number))?;

        // Decoding may need to resolve the `Length` of the stream, which must not live in the
        // stream itself.
        ctx.enter(self.id)?;
        let object_stream = ObjectStream::new(self.id.obj_number, stream, doc, ctx);
        ctx.leave();

        let object_stream = object_stream?;

        Ok(self.object_stream.get_or_init(|| object_stream))
    }
}

/// The objects whose resolution is currently in progress.
#[derive(Debug, Default)]
pub(crate) struct ResolveContext {
    chain: SmallVec<[ObjectIdentifier; 4]>,
}

impl ResolveContext {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn enter(&mut self, id: ObjectIdentifier) -> Result<()> {
        if self.chain.contains(&id) {
            return Err(Error::ResolutionCycle(id));
        }

        self.chain.push(id);

        Ok(())
    }

    fn leave(&mut self) {
        self.chain.pop();
    }
}

/// Parses a complete indirect object starting at `offset`.
///
/// If the object is a dictionary followed by the `stream` keyword, a [`Stream`] whose data
/// starts after the end-of-line marker following the keyword is returned.
pub fn parse_indirect_object(
    data: &PdfData,
    offset: usize,
) -> Result<(ObjectIdentifier, IndirectValue)> {
    if offset >= data.len() {
        return Err(Error::OutOfBounds(offset));
    }

    let mut r = Reader::new_with(data.as_ref(), offset);
    let id = parse_indirect_object_header(&mut r)?;

    let value = match parse_object(&mut r)? {
        Object::Dict(dict) => {
            let mut lookahead = r.clone();
            lookahead.skip_white_spaces();

            if lookahead.read_token() == b"stream" {
                lookahead.skip_eol();
                IndirectValue::Stream(Stream::new(dict, lookahead.offset(), data.clone()))
            } else {
                IndirectValue::Object(Object::Dict(dict))
            }
        }
        other => IndirectValue::Object(other),
    };

    Ok((id, value))
}
