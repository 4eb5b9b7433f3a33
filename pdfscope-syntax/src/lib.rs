/*!
A low-level crate for inspecting the structure of PDF files.

This crate reads the object layer of a PDF file: the cross-reference data (classic tables as
well as cross-reference streams, including incremental updates chained through `Prev`), the
indirect objects it points to (including objects packed into object streams) and the data of
streams, which can be inflated and have PNG predictors reversed.

It does not interpret the objects any further: there is no notion of pages, fonts or content
streams.

## Example
```no_run
use pdfscope_syntax::Document;

let data = std::fs::read("document.pdf").unwrap();
let doc = Document::parse(data).unwrap();

println!("{} with {} objects", doc.header(), doc.len());

for entry in doc.entries() {
    match entry.value(&doc) {
        Ok(value) => println!("{} obj {}", entry.id(), value),
        Err(e) => println!("{} obj failed: {}", entry.id(), e),
    }
}
```

## Features
- `logging`: Emit log messages through the `log` crate while reading a file.
*/

#![forbid(unsafe_code)]

#[macro_use]
mod log;

mod data;
mod document;
mod error;
pub mod filter;
pub mod object;
mod reader;
mod trivia;
mod xref;
pub mod write;

pub use data::PdfData;
pub use document::{Document, PdfVersion};
pub use error::{Error, ErrorKind, Result};
pub use filter::{DecodeAlgorithm, Decoded, apply_png_predictor};
pub use object::dict::Dict;
pub use object::name::Name;
pub use object::r#ref::ObjRef;
pub use object::stream::Stream;
pub use object::{
    IndirectObject, IndirectValue, Location, Object, ObjectIdentifier, parse_indirect_object,
    parse_indirect_object_header, parse_object,
};
pub use reader::Reader;
