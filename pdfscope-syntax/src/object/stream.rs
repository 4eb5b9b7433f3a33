//! Streams.

use crate::data::PdfData;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::filter::{self, Decoded};
use crate::object::Object;
use crate::object::dict::Dict;
use crate::object::dict::keys::LENGTH;
use crate::object::indirect::ResolveContext;
use crate::object::number::as_uint;
use std::sync::OnceLock;

/// A stream of arbitrary data.
///
/// Only the location of the data is stored. Its length is taken from the `Length` entry of the
/// dictionary, which may be an indirect reference and is therefore only known once a
/// [`Document`] is available to resolve it.
///
/// The decoded data is kept once it was decoded successfully.
#[derive(Debug, Clone)]
pub struct Stream {
    dict: Dict,
    data_offset: usize,
    data: PdfData,
    decoded: OnceLock<Decoded>,
}

impl Stream {
    pub(crate) fn new(dict: Dict, data_offset: usize, data: PdfData) -> Self {
        Self {
            dict,
            data_offset,
            data,
            decoded: OnceLock::new(),
        }
    }

    /// Return the dictionary of the stream.
    pub fn dict(&self) -> &Dict {
        &self.dict
    }

    /// Return the offset in the file at which the stream data starts.
    pub fn data_offset(&self) -> usize {
        self.data_offset
    }

    /// Returns the length of the stream data in bytes.
    ///
    /// If `Length` is an indirect reference, it is resolved through `doc`. Without a document,
    /// this fails with [`Error::UnresolvedLength`].
    pub fn length(&self, doc: Option<&Document>) -> Result<usize> {
        self.length_with(doc, &mut ResolveContext::new())
    }

    /// Return the raw, undecoded data of the stream.
    pub fn raw_data(&self, doc: Option<&Document>) -> Result<&[u8]> {
        self.raw_data_with(doc, &mut ResolveContext::new())
    }

    /// Return the decoded data of the stream.
    ///
    /// The data is only decoded on the first call. A failure is not remembered, so a later call
    /// tries again.
    pub fn decoded(&self, doc: Option<&Document>) -> Result<&Decoded> {
        self.decoded_with(doc, &mut ResolveContext::new())
    }

    pub(crate) fn length_with(
        &self,
        doc: Option<&Document>,
        ctx: &mut ResolveContext,
    ) -> Result<usize> {
        let length = match self.dict.get(LENGTH) {
            Some(Object::Ref(obj_ref)) => {
                let doc = doc.ok_or(Error::UnresolvedLength(*obj_ref))?;

                doc.resolve_with(*obj_ref, ctx)?
                    .as_object()
                    .and_then(Object::as_number)
            }
            Some(obj) => obj.as_number(),
            None => None,
        };

        length
            .and_then(as_uint)
            .and_then(|l| usize::try_from(l).ok())
            .ok_or(Error::InvalidLength)
    }

    pub(crate) fn raw_data_with(
        &self,
        doc: Option<&Document>,
        ctx: &mut ResolveContext,
    ) -> Result<&[u8]> {
        let length = self.length_with(doc, ctx)?;

        self.data_offset
            .checked_add(length)
            .and_then(|end| self.data.get(self.data_offset..end))
            .ok_or(Error::OutOfBounds(self.data_offset))
    }

    pub(crate) fn decoded_with(
        &self,
        doc: Option<&Document>,
        ctx: &mut ResolveContext,
    ) -> Result<&Decoded> {
        if let Some(decoded) = self.decoded.get() {
            return Ok(decoded);
        }

        let decoded = filter::decode(&self.dict, self.raw_data_with(doc, ctx)?)?;

        Ok(self.decoded.get_or_init(|| decoded))
    }
}
