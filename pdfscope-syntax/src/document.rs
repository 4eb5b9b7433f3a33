//! The starting point for reading PDF files.

use crate::data::PdfData;
use crate::error::{Error, Result};
use crate::object::dict::Dict;
use crate::object::indirect::ResolveContext;
use crate::object::r#ref::ObjRef;
use crate::object::{IndirectObject, IndirectValue};
use crate::reader::Reader;
use crate::xref::{self, XRef};
use rustc_hash::FxHashMap;
use std::fmt::{Display, Formatter};

/// The version of a PDF file, as declared in its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PdfVersion {
    /// The major version.
    pub major: u8,
    /// The minor version.
    pub minor: u8,
}

impl PdfVersion {
    /// Parses a header line like `%PDF-1.7`.
    pub fn from_header(header: &str) -> Option<Self> {
        let (major, minor) = header.trim_end().strip_prefix("%PDF-")?.split_once('.')?;

        Some(Self {
            major: major.parse().ok()?,
            minor: minor.parse().ok()?,
        })
    }
}

impl Display for PdfVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// A PDF file, with its cross-reference data read.
///
/// Objects are only parsed when they are requested, see [`IndirectObject::value`].
#[derive(Debug)]
pub struct Document {
    data: PdfData,
    header: String,
    trailer: Dict,
    xref_offset: usize,
    entries: Vec<IndirectObject>,
    index: FxHashMap<u32, usize>,
}

impl Document {
    /// Try to read the given PDF file.
    ///
    /// This reads the header and all cross-reference sections, but none of the objects.
    pub fn parse(data: impl Into<PdfData>) -> Result<Self> {
        let data = data.into();

        let header = {
            let line = Reader::new(data.as_ref()).read_line();
            String::from_utf8_lossy(line).into_owned()
        };
        let xref_offset = xref::find_startxref(data.as_ref())?;
        let XRef { trailer, entries } = xref::read_xref(&data, xref_offset)?;

        let entries = entries
            .into_iter()
            .map(|e| IndirectObject::new(e.id, e.location))
            .collect::<Vec<_>>();
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id().obj_number, i))
            .collect();

        ldebug!(
            "parsed document with header {:?} and {} objects",
            header,
            entries.len()
        );

        Ok(Self {
            data,
            header,
            trailer,
            xref_offset,
            entries,
            index,
        })
    }

    /// Return the underlying data of the file.
    pub fn data(&self) -> &PdfData {
        &self.data
    }

    /// Return the first line of the file, such as `%PDF-1.7`.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Return the version declared in the header, if the header has the usual form.
    pub fn version(&self) -> Option<PdfVersion> {
        PdfVersion::from_header(&self.header)
    }

    /// Return the trailer dictionary of the most recent cross-reference section.
    pub fn trailer(&self) -> &Dict {
        &self.trailer
    }

    /// Return the offset of the most recent cross-reference section.
    pub fn xref_offset(&self) -> usize {
        self.xref_offset
    }

    /// Return all indirect objects of the file, ordered by object number.
    pub fn entries(&self) -> &[IndirectObject] {
        &self.entries
    }

    /// Return the number of indirect objects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return whether the file has no indirect objects.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the indirect object with the given object and generation number.
    pub fn get(&self, obj_number: u32, gen_number: u16) -> Option<&IndirectObject> {
        self.index
            .get(&obj_number)
            .and_then(|i| self.entries.get(*i))
            .filter(|e| e.id().gen_number == gen_number)
    }

    /// Resolve an object reference.
    pub fn resolve(&self, obj_ref: ObjRef) -> Result<&IndirectValue> {
        self.resolve_with(obj_ref, &mut ResolveContext::new())
    }

    pub(crate) fn resolve_with(
        &self,
        obj_ref: ObjRef,
        ctx: &mut ResolveContext,
    ) -> Result<&IndirectValue> {
        self.get(obj_ref.obj_number, obj_ref.gen_number)
            .ok_or(Error::ObjectNotFound(obj_ref))?
            .value_with(self, ctx)
    }
}
