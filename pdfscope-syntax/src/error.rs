//! Errors that can occur while reading a PDF file.

use crate::object::ObjectIdentifier;
use crate::object::r#ref::ObjRef;
use thiserror::Error;

/// The broad category an [`Error`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The file structure (header, trailer, cross-reference data) is malformed.
    Structural,
    /// A read went past the end of the available data.
    Bounds,
    /// An indirect reference or object stream entry could not be resolved.
    Resolution,
    /// Stream data could not be decoded.
    Codec,
    /// An object could not be parsed.
    Grammar,
}

/// An error that occurred while reading a PDF file.
#[derive(Debug, Error)]
pub enum Error {
    #[error("end-of-file marker `%%EOF` not found")]
    MissingEofMarker,

    #[error("invalid startxref offset `{0}`")]
    InvalidStartXref(String),

    #[error("expected `{expected}` at offset {offset}, found `{found}`")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        offset: usize,
    },

    #[error("invalid xref table entry at offset {0}")]
    InvalidXRefEntry(usize),

    #[error("expected an xref stream at offset {0}")]
    ExpectedXRefStream(usize),

    #[error("invalid xref stream: {0}")]
    InvalidXRefStream(&'static str),

    #[error("unknown xref stream entry type {0}")]
    UnknownXRefEntryType(u64),

    #[error("xref entry for object {expected} points to object {found} at offset {offset}")]
    ObjectNumberMismatch {
        expected: u32,
        found: u32,
        offset: usize,
    },

    #[error("cross-reference cycle: section at offset {0} was already visited")]
    XRefCycle(usize),

    #[error("invalid object stream {container}: {reason}")]
    InvalidObjectStream {
        container: u32,
        reason: &'static str,
    },

    #[error("read out of bounds at offset {0}")]
    OutOfBounds(usize),

    #[error("stream length is the indirect reference {0}, but no document was given")]
    UnresolvedLength(ObjRef),

    #[error("stream length is not a non-negative integer")]
    InvalidLength,

    #[error("object {0} not found")]
    ObjectNotFound(ObjRef),

    #[error("container object {0} is not a stream")]
    ContainerNotStream(u32),

    #[error("object {obj_number} not found in object stream {container}")]
    NotInContainer { obj_number: u32, container: u32 },

    #[error("cycle detected while resolving object {0}")]
    ResolutionCycle(ObjectIdentifier),

    #[error("unknown predictor {0}")]
    UnknownPredictor(u8),

    #[error("predictor parameters are out of range")]
    InvalidPredictorParams,

    #[error("failed to inflate stream data")]
    Inflate(#[source] std::io::Error),

    #[error("unexpected byte {byte:#04x} at offset {offset}")]
    UnexpectedByte { byte: u8, offset: usize },

    #[error("invalid {expected} literal `{found}` at offset {offset}")]
    InvalidLiteral {
        expected: &'static str,
        found: String,
        offset: usize,
    },

    #[error("invalid number at offset {0}")]
    InvalidNumber(usize),

    #[error("invalid hexadecimal digit at offset {0}")]
    InvalidHexDigit(usize),
}

impl Error {
    /// Returns the category of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingEofMarker
            | Self::InvalidStartXref(_)
            | Self::UnexpectedToken { .. }
            | Self::InvalidXRefEntry(_)
            | Self::ExpectedXRefStream(_)
            | Self::InvalidXRefStream(_)
            | Self::UnknownXRefEntryType(_)
            | Self::ObjectNumberMismatch { .. }
            | Self::XRefCycle(_)
            | Self::InvalidObjectStream { .. } => ErrorKind::Structural,
            Self::OutOfBounds(_) => ErrorKind::Bounds,
            Self::UnresolvedLength(_)
            | Self::InvalidLength
            | Self::ObjectNotFound(_)
            | Self::ContainerNotStream(_)
            | Self::NotInContainer { .. }
            | Self::ResolutionCycle(_) => ErrorKind::Resolution,
            Self::UnknownPredictor(_) | Self::InvalidPredictorParams | Self::Inflate(_) => {
                ErrorKind::Codec
            }
            Self::UnexpectedByte { .. }
            | Self::InvalidLiteral { .. }
            | Self::InvalidNumber(_)
            | Self::InvalidHexDigit(_) => ErrorKind::Grammar,
        }
    }
}

/// A result type for reading PDF files.
pub type Result<T> = std::result::Result<T, Error>;
