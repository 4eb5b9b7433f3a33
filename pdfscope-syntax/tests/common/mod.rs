//! Helpers for building PDF files in tests.
//!
//! Offsets are recorded while writing, so the cross-reference data always matches the file.

#![allow(dead_code)]

use flate2::Compression;
use flate2::write::ZlibEncoder;
use std::io::Write;

pub fn zlib(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(vec![], Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Applies the PNG `Up` predictor to every row, prefixing each row with its tag.
pub fn predict_up(rows: &[&[u8]]) -> Vec<u8> {
    let mut out = vec![];

    for (i, row) in rows.iter().enumerate() {
        out.push(2);

        for (j, b) in row.iter().enumerate() {
            let up = if i == 0 { 0 } else { rows[i - 1][j] };
            out.push(b.wrapping_sub(up));
        }
    }

    out
}

/// An object stream's content: the index followed by the objects.
pub struct ObjStm {
    pub content: Vec<u8>,
    pub first: usize,
    pub n: usize,
}

/// Lays out objects for an object stream.
///
/// With `with_first`, offsets are relative to the start of the first object. Otherwise they are
/// relative to the end of the index.
pub fn obj_stm(objects: &[(u32, &str)], with_first: bool) -> ObjStm {
    let mut bodies = String::new();
    let mut index = vec![];

    for (num, body) in objects {
        if !with_first {
            bodies.push(' ');
        }

        index.push(format!("{num} {}", bodies.len()));
        bodies.push_str(body);

        if with_first {
            bodies.push(' ');
        }
    }

    let mut index = index.join(" ");

    if with_first {
        index.push('\n');
    }

    let first = index.len();

    ObjStm {
        content: format!("{index}{bodies}").into_bytes(),
        first,
        n: objects.len(),
    }
}

pub struct Builder {
    buf: Vec<u8>,
    offsets: Vec<(u32, u16, usize)>,
}

impl Builder {
    pub fn new(header: &str) -> Self {
        Self {
            buf: format!("{header}\n").into_bytes(),
            offsets: vec![],
        }
    }

    pub fn offset(&self) -> usize {
        self.buf.len()
    }

    pub fn raw(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Writes a plain object and returns its offset.
    pub fn object(&mut self, num: u32, gen_number: u16, body: &str) -> usize {
        let offset = self.offset();
        self.raw(format!("{num} {gen_number} obj\n{body}\nendobj\n").as_bytes());
        self.offsets.push((num, gen_number, offset));

        offset
    }

    /// Writes a stream object. `/Length` is appended to `dict`, unless `length` is given.
    pub fn stream(&mut self, num: u32, dict: &str, data: &[u8], length: Option<&str>) -> usize {
        let offset = self.offset();
        let length = length
            .map(str::to_string)
            .unwrap_or_else(|| data.len().to_string());

        self.raw(format!("{num} 0 obj\n<<{dict} /Length {length}>>\nstream\n").as_bytes());
        self.raw(data);
        self.raw(b"\nendstream\nendobj\n");
        self.offsets.push((num, 0, offset));

        offset
    }

    /// The offset of the most recently written object with the given number.
    pub fn offset_of(&self, num: u32) -> usize {
        self.offsets
            .iter()
            .rev()
            .find(|(n, _, _)| *n == num)
            .map(|(_, _, offset)| *offset)
            .unwrap()
    }

    /// Writes a classic table covering `objects` (one subsection per contiguous run) and
    /// returns its offset. Object 0 is always written as the head of the free list.
    pub fn xref_table(&mut self, objects: &[u32], trailer: &str) -> usize {
        let start = self.offset();
        let mut entries = objects
            .iter()
            .map(|num| {
                let (_, gen_number, offset) = *self
                    .offsets
                    .iter()
                    .rev()
                    .find(|(n, _, _)| n == num)
                    .unwrap();
                (*num, format!("{offset:010} {gen_number:05} n\r\n"))
            })
            .collect::<Vec<_>>();
        entries.push((0, "0000000000 65535 f\r\n".to_string()));
        entries.sort_by_key(|(num, _)| *num);

        let mut out = String::from("xref\n");
        let mut i = 0;

        while i < entries.len() {
            let mut j = i + 1;

            while j < entries.len() && entries[j].0 == entries[j - 1].0 + 1 {
                j += 1;
            }

            out.push_str(&format!("{} {}\n", entries[i].0, j - i));

            for (_, line) in &entries[i..j] {
                out.push_str(line);
            }

            i = j;
        }

        out.push_str(&format!("trailer\n{trailer}\n"));
        self.raw(out.as_bytes());

        start
    }

    /// Writes a deflate-compressed cross-reference stream and returns its offset.
    pub fn xref_stream(
        &mut self,
        num: u32,
        widths: [usize; 3],
        records: &[(u64, u64, u64)],
        dict: &str,
    ) -> usize {
        let mut data = vec![];

        for (f1, f2, f3) in records {
            for (value, width) in [*f1, *f2, *f3].into_iter().zip(widths) {
                data.extend_from_slice(&value.to_be_bytes()[8 - width..]);
            }
        }

        let dict = format!(
            "/Type /XRef /W [{} {} {}] /Filter /FlateDecode {dict}",
            widths[0], widths[1], widths[2]
        );

        self.stream(num, &dict, &zlib(&data), None)
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    pub fn finish(mut self, startxref: usize) -> Vec<u8> {
        self.raw(format!("startxref\n{startxref}\n%%EOF\n").as_bytes());
        self.buf
    }
}

pub const CATALOG: &str = "<</Type /Catalog /Pages 2 0 R>>";
pub const PAGES: &str = "<</Type /Pages /Kids [3 0 R] /Count 1>>";
pub const PAGE: &str = "<</Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R>>";
pub const CONTENT: &[u8] = b"BT /F1 24 Tf 72 720 Td (Hello) Tj ET";
pub const INFO: &str = "<</Producer (pdfscope) /Title <48656C6C6F>>>";

/// A small file with a classic cross-reference table.
pub fn classic_file() -> Vec<u8> {
    let mut b = Builder::new("%PDF-1.0");
    b.object(1, 0, CATALOG);
    b.object(2, 0, PAGES);
    b.object(3, 0, PAGE);
    b.stream(4, "", CONTENT, None);
    b.object(5, 0, INFO);
    let xref = b.xref_table(&[1, 2, 3, 4, 5], "<</Size 6 /Root 1 0 R /Info 5 0 R>>");

    b.finish(xref)
}

/// The same objects as [`classic_file`], but with all plain objects stored in the object stream
/// 6 and a cross-reference stream with one byte per field.
pub fn compressed_file() -> Vec<u8> {
    let mut b = Builder::new("%PDF-1.5");
    let content = b.stream(4, "", CONTENT, None) as u64;

    let objects = obj_stm(&[(1, CATALOG), (2, PAGES), (3, PAGE), (5, INFO)], true);
    let container = b.stream(
        6,
        &format!(
            "/Type /ObjStm /N {} /First {} /Filter /FlateDecode",
            objects.n, objects.first
        ),
        &zlib(&objects.content),
        None,
    ) as u64;
    assert!(container < 256);

    let records = [
        (0, 0, 255),
        (2, 6, 0),
        (2, 6, 1),
        (2, 6, 2),
        (1, content, 0),
        (2, 6, 3),
        (1, container, 0),
    ];
    let xref = b.xref_stream(7, [1, 1, 1], &records, "/Size 7 /Root 1 0 R /Info 5 0 R");

    b.finish(xref)
}
