//! Reading the cross-reference data of a PDF file.
//!
//! The cross-reference data maps object numbers to the location of the objects. It is found by
//! reading the `startxref` offset at the end of the file, and is stored either as a classic
//! table (`xref` keyword followed by fixed-width text lines) or as a compressed cross-reference
//! stream. Incrementally updated files chain several sections together through `Prev`.

use crate::data::PdfData;
use crate::error::{Error, Result};
use crate::object::dict::Dict;
use crate::object::dict::keys::{INDEX, PREV, SIZE, W, XREF_STM};
use crate::object::number::as_uint;
use crate::object::{
    IndirectValue, Location, Object, ObjectIdentifier, parse_indirect_object,
    parse_indirect_object_header, parse_object,
};
use crate::reader::Reader;
use crate::trivia::is_digit;
use rustc_hash::FxHashSet;

/// The merged cross-reference data of all sections of a file.
#[derive(Debug)]
pub(crate) struct XRef {
    /// The trailer of the most recent section.
    pub(crate) trailer: Dict,
    /// The entries, sorted by object number, with at most one entry per object number.
    pub(crate) entries: Vec<XRefEntry>,
}

/// The location of one indirect object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct XRefEntry {
    pub(crate) id: ObjectIdentifier,
    pub(crate) location: Location,
}

impl XRefEntry {
    fn new(id: ObjectIdentifier, location: Location) -> Self {
        Self { id, location }
    }
}

/// A single cross-reference section with its trailer.
#[derive(Debug)]
struct Section {
    trailer: Dict,
    entries: Vec<XRefEntry>,
}

/// Finds the offset of the most recent cross-reference section.
///
/// The file has to end with `%%EOF` (trailing white space is ignored), preceded by a line
/// containing the offset.
pub(crate) fn find_startxref(data: &[u8]) -> Result<usize> {
    let mut r = Reader::new(data);
    r.jump_to_last();
    r.reverse_skip_white_spaces();

    let eof_line = r
        .reverse_read_line()
        .map_err(|_| Error::MissingEofMarker)?;

    if eof_line.trim_ascii() != b"%%EOF" {
        return Err(Error::MissingEofMarker);
    }

    let offset_line = r.reverse_read_line().unwrap_or_default().trim_ascii();

    std::str::from_utf8(offset_line)
        .ok()
        .and_then(|line| line.parse::<usize>().ok())
        .ok_or_else(|| {
            Error::InvalidStartXref(String::from_utf8_lossy(offset_line).into_owned())
        })
}

/// Reads the cross-reference section at `offset` and all sections it links to.
///
/// For each object number, the entry that is encountered first wins: the section at `offset`
/// comes first, then the sections referenced by `XRefStm` and finally those referenced by
/// `Prev`.
pub(crate) fn read_xref(data: &PdfData, offset: usize) -> Result<XRef> {
    let mut pending = vec![offset];
    let mut visited = FxHashSet::default();
    let mut seen = FxHashSet::default();
    let mut trailer = None;
    let mut entries = vec![];

    while let Some(offset) = pending.pop() {
        if !visited.insert(offset) {
            return Err(Error::XRefCycle(offset));
        }

        let section = read_section(data, offset)?;
        ldebug!(
            "read xref section at offset {} with {} entries",
            offset,
            section.entries.len()
        );

        entries.extend(
            section
                .entries
                .into_iter()
                .filter(|e| seen.insert(e.id.obj_number)),
        );

        // Sections are processed depth-first, so `XRefStm` has to be pushed last.
        if let Some(prev) = offset_entry(&section.trailer, PREV) {
            pending.push(prev);
        }

        if let Some(xref_stm) = offset_entry(&section.trailer, XREF_STM) {
            pending.push(xref_stm);
        }

        if trailer.is_none() {
            trailer = Some(section.trailer);
        }
    }

    entries.sort_by_key(|e| e.id.obj_number);

    Ok(XRef {
        trailer: trailer.unwrap_or_default(),
        entries,
    })
}

fn offset_entry(trailer: &Dict, key: &[u8]) -> Option<usize> {
    let offset = trailer.get_uint(key).and_then(|o| usize::try_from(o).ok());

    if offset.is_none() && trailer.contains_key(key) {
        lwarn!("ignoring invalid {} entry in trailer", String::from_utf8_lossy(key));
    }

    offset
}

fn read_section(data: &PdfData, offset: usize) -> Result<Section> {
    if offset >= data.len() {
        return Err(Error::OutOfBounds(offset));
    }

    let mut r = Reader::new_with(data.as_ref(), offset);
    r.skip_white_spaces();

    if r.read_token() == b"xref" {
        read_xref_table(data.as_ref(), &mut r)
    } else {
        read_xref_stream(data, offset)
    }
}

/// Reads a classic cross-reference table. The reader must be placed after the `xref` keyword.
fn read_xref_table(data: &[u8], r: &mut Reader<'_>) -> Result<Section> {
    let mut entries = vec![];
    // All entries have the same width, which includes the end-of-line marker.
    let mut entry_len = None;

    loop {
        r.skip_white_spaces();

        if !r.peek_byte().is_some_and(is_digit) {
            break;
        }

        let header_offset = r.offset();
        let (first, count) =
            parse_subsection_header(r.read_line()).ok_or(Error::InvalidXRefEntry(header_offset))?;

        for i in 0..count {
            let entry_offset = r.offset();
            let line = match entry_len {
                Some(len) => r.read_bytes(len)?,
                None => {
                    let line = r.read_line();
                    entry_len = Some(r.offset() - entry_offset);

                    line
                }
            };

            let (offset, gen_number, in_use) =
                parse_entry(line).ok_or(Error::InvalidXRefEntry(entry_offset))?;

            if in_use {
                let obj_number = first
                    .checked_add(i)
                    .ok_or(Error::InvalidXRefEntry(entry_offset))?;

                entries.push(XRefEntry::new(
                    ObjectIdentifier::new(obj_number, gen_number),
                    Location::Offset(offset),
                ));
            }
        }
    }

    let trailer = if r.read_token() == b"trailer" {
        let offset = r.offset();

        match parse_object(r)? {
            Object::Dict(dict) => dict,
            other => {
                return Err(Error::UnexpectedToken {
                    expected: "trailer dictionary",
                    found: other.type_name().to_string(),
                    offset,
                });
            }
        }
    } else {
        ldebug!(
            "no trailer after xref table at offset {}, scanning from the end of the file",
            r.offset()
        );

        find_trailer(data)?
    };

    Ok(Section { trailer, entries })
}

fn parse_subsection_header(line: &[u8]) -> Option<(u32, u32)> {
    let mut parts = std::str::from_utf8(line).ok()?.split_ascii_whitespace();
    let first = parts.next()?.parse().ok()?;
    let count = parts.next()?.parse().ok()?;

    parts.next().is_none().then_some((first, count))
}

/// Parses an entry like `0000000017 00000 n`.
fn parse_entry(line: &[u8]) -> Option<(usize, u16, bool)> {
    let mut parts = std::str::from_utf8(line).ok()?.split_ascii_whitespace();
    let offset = parts.next()?.parse().ok()?;
    let gen_number = parts.next()?.parse().ok()?;

    let in_use = match parts.next()? {
        "n" => true,
        "f" => false,
        _ => return None,
    };

    parts.next().is_none().then_some((offset, gen_number, in_use))
}

/// Locates the last `trailer` keyword in the file and reads the dictionary after it.
fn find_trailer(data: &[u8]) -> Result<Dict> {
    let keyword = b"trailer";
    let pos = memchr::memmem::rfind(data, keyword).ok_or(Error::UnexpectedToken {
        expected: "trailer",
        found: "end of file".to_string(),
        offset: data.len(),
    })?;

    let mut r = Reader::new_with(data, pos + keyword.len());
    let offset = r.offset();

    match parse_object(&mut r)? {
        Object::Dict(dict) => Ok(dict),
        other => Err(Error::UnexpectedToken {
            expected: "trailer dictionary",
            found: other.type_name().to_string(),
            offset,
        }),
    }
}

/// Reads a cross-reference stream. Its dictionary doubles as the trailer of the section.
fn read_xref_stream(data: &PdfData, offset: usize) -> Result<Section> {
    let (_, value) = parse_indirect_object(data, offset)?;

    let IndirectValue::Stream(stream) = value else {
        return Err(Error::ExpectedXRefStream(offset));
    };

    let dict = stream.dict();
    let widths = field_widths(dict)?;
    let subsections = subsections(dict)?;
    // The length of a cross-reference stream must be a direct object.
    let decoded = &stream.decoded(None)?.data;

    let mut r = Reader::new(decoded);
    let mut entries = vec![];

    for (start, count) in subsections {
        for i in 0..count {
            let obj_number = start
                .checked_add(i)
                .ok_or(Error::InvalidXRefStream("object number overflows"))?;

            // A missing type field means that all entries are in use.
            let entry_type = if widths[0] == 0 {
                1
            } else {
                r.read_bytes_be(widths[0])?
            };
            let field_2 = r.read_bytes_be(widths[1])?;
            // The generation number or the index in the object stream. Neither is needed.
            r.read_bytes_be(widths[2])?;

            match entry_type {
                0 => {}
                1 => {
                    let offset = usize::try_from(field_2)
                        .map_err(|_| Error::InvalidXRefStream("object offset too large"))?;
                    let id = read_header_at(data.as_ref(), offset)?;

                    if id.obj_number != obj_number {
                        return Err(Error::ObjectNumberMismatch {
                            expected: obj_number,
                            found: id.obj_number,
                            offset,
                        });
                    }

                    entries.push(XRefEntry::new(id, Location::Offset(offset)));
                }
                2 => {
                    let container = u32::try_from(field_2)
                        .map_err(|_| Error::InvalidXRefStream("object stream number too large"))?;

                    entries.push(XRefEntry::new(
                        ObjectIdentifier::new(obj_number, 0),
                        Location::Compressed(container),
                    ));
                }
                other => return Err(Error::UnknownXRefEntryType(other)),
            }
        }
    }

    Ok(Section {
        trailer: dict.clone(),
        entries,
    })
}

fn read_header_at(data: &[u8], offset: usize) -> Result<ObjectIdentifier> {
    if offset >= data.len() {
        return Err(Error::OutOfBounds(offset));
    }

    parse_indirect_object_header(&mut Reader::new_with(data, offset))
}

/// Reads the three field widths of `W`, each of which has to fit into 64 bits.
fn field_widths(dict: &Dict) -> Result<[usize; 3]> {
    let invalid = || Error::InvalidXRefStream("W must hold three widths of at most 8 bytes");

    let widths = dict
        .get_array(W)
        .filter(|w| w.len() == 3)
        .ok_or_else(invalid)?;
    let mut result = [0; 3];

    for (slot, width) in result.iter_mut().zip(widths) {
        let width = width
            .as_number()
            .and_then(as_uint)
            .filter(|w| *w <= 8)
            .ok_or_else(invalid)?;
        *slot = width as usize;
    }

    Ok(result)
}

/// Returns the `(first object number, count)` pairs of `Index`, defaulting to `[0 Size]`.
fn subsections(dict: &Dict) -> Result<Vec<(u32, u32)>> {
    let as_u32 = |obj: &Object| {
        obj.as_number()
            .and_then(as_uint)
            .and_then(|n| u32::try_from(n).ok())
    };

    match dict.get(INDEX) {
        Some(Object::Array(items)) => {
            if items.len() % 2 != 0 {
                return Err(Error::InvalidXRefStream("Index must hold pairs of numbers"));
            }

            items
                .chunks_exact(2)
                .map(|pair| {
                    as_u32(&pair[0])
                        .zip(as_u32(&pair[1]))
                        .ok_or(Error::InvalidXRefStream("Index must hold pairs of numbers"))
                })
                .collect()
        }
        Some(_) => Err(Error::InvalidXRefStream("Index must be an array")),
        None => {
            let size = dict
                .get(SIZE)
                .and_then(as_u32)
                .ok_or(Error::InvalidXRefStream("missing Size"))?;

            Ok(vec![(0, size)])
        }
    }
}
