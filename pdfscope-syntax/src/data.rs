//! The bytes of a PDF file.

use std::fmt::{Debug, Formatter};
use std::ops::Range;
use std::sync::Arc;

/// A container for the bytes of a PDF file.
///
/// Cloning is cheap: all clones share the same underlying buffer, which lives as long as
/// the longest-lived document or stream referring to it.
#[derive(Clone)]
pub struct PdfData {
    inner: Arc<dyn AsRef<[u8]> + Send + Sync>,
}

impl PdfData {
    /// Returns the total length of the data.
    pub fn len(&self) -> usize {
        self.as_ref().len()
    }

    /// Returns `true` if the data is empty.
    pub fn is_empty(&self) -> bool {
        self.as_ref().is_empty()
    }

    /// Returns a sub-slice of the data, or `None` if the range is out of bounds.
    pub fn get(&self, range: Range<usize>) -> Option<&[u8]> {
        self.as_ref().get(range)
    }
}

impl Debug for PdfData {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "PdfData {{ len: {} }}", self.len())
    }
}

impl AsRef<[u8]> for PdfData {
    fn as_ref(&self) -> &[u8] {
        (*self.inner).as_ref()
    }
}

impl<T: AsRef<[u8]> + Send + Sync + 'static> From<Arc<T>> for PdfData {
    fn from(data: Arc<T>) -> Self {
        Self { inner: data }
    }
}

impl From<Vec<u8>> for PdfData {
    fn from(data: Vec<u8>) -> Self {
        Self {
            inner: Arc::new(data),
        }
    }
}

impl From<&'static [u8]> for PdfData {
    fn from(data: &'static [u8]) -> Self {
        Self {
            inner: Arc::new(data),
        }
    }
}
