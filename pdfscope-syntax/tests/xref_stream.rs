mod common;

use common::{
    Builder, CATALOG, CONTENT, INFO, PAGES, classic_file, compressed_file, obj_stm, zlib,
};
use pdfscope_syntax::{Document, Error, ErrorKind, Location, ObjRef, Object};

#[test]
fn locations() {
    let doc = Document::parse(compressed_file()).unwrap();

    assert_eq!(doc.header(), "%PDF-1.5");
    assert_eq!(doc.len(), 6);
    assert_eq!(doc.trailer().get_uint(b"Size"), Some(7));
    assert_eq!(doc.get(1, 0).unwrap().location(), Location::Compressed(6));
    assert_eq!(doc.get(5, 0).unwrap().location(), Location::Compressed(6));
    assert_eq!(doc.get(4, 0).unwrap().location(), Location::Offset(9));
    assert!(matches!(doc.get(6, 0).unwrap().location(), Location::Offset(_)));
}

#[test]
fn same_objects_as_classic_table() {
    let classic = Document::parse(classic_file()).unwrap();
    let compressed = Document::parse(compressed_file()).unwrap();

    for obj_number in [1, 2, 3, 5] {
        let r = ObjRef::new(obj_number, 0);

        assert_eq!(
            classic.resolve(r).unwrap().as_object(),
            compressed.resolve(r).unwrap().as_object(),
            "object {obj_number}"
        );
    }

    let classic_content = classic.resolve(ObjRef::new(4, 0)).unwrap().as_stream().unwrap();
    let content = compressed.resolve(ObjRef::new(4, 0)).unwrap().as_stream().unwrap();

    assert_eq!(classic_content.dict(), content.dict());
    assert_eq!(content.raw_data(Some(&compressed)).unwrap(), CONTENT);
}

#[test]
fn every_entry_resolves() {
    let doc = Document::parse(compressed_file()).unwrap();

    for entry in doc.entries() {
        entry.value(&doc).unwrap();
    }

    let container = doc.resolve(ObjRef::new(6, 0)).unwrap().as_stream().unwrap();
    assert_eq!(container.dict().get_uint(b"N"), Some(4));
}

#[test]
fn object_stream_without_first() {
    let mut b = Builder::new("%PDF-1.5");
    let objects = obj_stm(&[(1, CATALOG), (2, PAGES)], false);
    let container = b.stream(
        3,
        &format!("/Type /ObjStm /N {} /Filter /FlateDecode", objects.n),
        &zlib(&objects.content),
        None,
    ) as u64;

    let records = [(0, 0, 65535), (2, 3, 0), (2, 3, 1), (1, container, 0)];
    let xref = b.xref_stream(4, [1, 2, 2], &records, "/Size 4 /Root 1 0 R");
    let doc = Document::parse(b.finish(xref)).unwrap();

    let catalog = doc.resolve(ObjRef::new(1, 0)).unwrap().as_dict().unwrap();
    assert_eq!(catalog.get_ref(b"Pages"), Some(ObjRef::new(2, 0)));

    let pages = doc.resolve(ObjRef::new(2, 0)).unwrap().as_dict().unwrap();
    assert_eq!(pages.get_uint(b"Count"), Some(1));
}

#[test]
fn index_subsections() {
    let mut b = Builder::new("%PDF-1.5");
    let first = b.object(10, 0, "(ten)") as u64;
    let second = b.object(11, 0, "(eleven)") as u64;
    let third = b.object(20, 0, "(twenty)") as u64;

    let records = [(1, first, 0), (1, second, 0), (1, third, 0)];
    let xref = b.xref_stream(21, [1, 2, 1], &records, "/Size 21 /Index [10 2 20 1]");
    let doc = Document::parse(b.finish(xref)).unwrap();

    assert_eq!(doc.len(), 3);
    assert_eq!(
        doc.resolve(ObjRef::new(20, 0)).unwrap().as_object(),
        Some(&Object::String(b"twenty".to_vec()))
    );
}

#[test]
fn absent_type_field() {
    let mut b = Builder::new("%PDF-1.5");
    let offset = b.object(0, 0, "null") as u64;
    let one = b.object(1, 0, "42") as u64;

    let xref = b.xref_stream(2, [0, 2, 0], &[(0, offset, 0), (0, one, 0)], "/Size 2");
    let doc = Document::parse(b.finish(xref)).unwrap();

    assert_eq!(
        doc.resolve(ObjRef::new(1, 0)).unwrap().as_object(),
        Some(&Object::Number(42.0))
    );
}

#[test]
fn object_number_mismatch() {
    let mut b = Builder::new("%PDF-1.5");
    let one = b.object(1, 0, CATALOG) as u64;
    b.object(2, 0, PAGES);

    // The entry for object 2 points to object 1.
    let records = [(0, 0, 255), (1, one, 0), (1, one, 0)];
    let xref = b.xref_stream(3, [1, 2, 1], &records, "/Size 3");

    let err = Document::parse(b.finish(xref)).unwrap_err();
    assert!(matches!(
        err,
        Error::ObjectNumberMismatch {
            expected: 2,
            found: 1,
            ..
        }
    ));
}

#[test]
fn unknown_entry_type() {
    let mut b = Builder::new("%PDF-1.5");
    let xref = b.xref_stream(1, [1, 1, 1], &[(7, 0, 0)], "/Size 1");

    let err = Document::parse(b.finish(xref)).unwrap_err();
    assert!(matches!(err, Error::UnknownXRefEntryType(7)));
    assert_eq!(err.kind(), ErrorKind::Structural);
}

#[test]
fn invalid_field_widths() {
    let mut b = Builder::new("%PDF-1.5");
    let xref = b.offset();
    b.stream(1, "/Type /XRef /Size 1 /W [1 2]", b"", None);

    let err = Document::parse(b.finish(xref)).unwrap_err();
    assert!(matches!(err, Error::InvalidXRefStream(_)));
}

#[test]
fn not_an_xref_stream() {
    let mut b = Builder::new("%PDF-1.5");
    let xref = b.object(1, 0, CATALOG);

    let err = Document::parse(b.finish(xref)).unwrap_err();
    assert!(matches!(err, Error::ExpectedXRefStream(o) if o == xref));
}

#[test]
fn hybrid_file() {
    let mut b = Builder::new("%PDF-1.5");
    b.object(1, 0, CATALOG);
    let shadowed = b.object(2, 0, "(from stream)") as u64;
    let hidden = b.object(3, 0, INFO) as u64;
    // The table lists the most recently written object 2.
    b.object(2, 0, "(from table)");

    let records = [(1, shadowed, 0), (1, hidden, 0)];
    let stm = b.xref_stream(10, [1, 2, 1], &records, "/Size 4 /Index [2 2]");
    let table = b.xref_table(
        &[1, 2],
        &format!("<</Size 4 /Root 1 0 R /XRefStm {stm}>>"),
    );
    let doc = Document::parse(b.finish(table)).unwrap();

    // Entries of the table take precedence over those of the stream.
    assert_eq!(
        doc.resolve(ObjRef::new(2, 0)).unwrap().as_object(),
        Some(&Object::String(b"from table".to_vec()))
    );
    // Objects only listed in the stream are still found.
    assert!(doc.resolve(ObjRef::new(3, 0)).unwrap().as_dict().is_some());
    // The trailer is the one of the table.
    assert!(doc.trailer().contains_key(b"XRefStm"));
}

#[test]
fn incremental_update_with_streams() {
    let mut b = Builder::new("%PDF-1.5");
    let one = b.object(1, 0, CATALOG) as u64;
    let two = b.object(2, 0, "(old)") as u64;
    let first = b.xref_stream(3, [1, 2, 1], &[(1, one, 0), (1, two, 0)], "/Size 3 /Index [1 2]");

    let two = b.object(2, 0, "(new)") as u64;
    let second = b.xref_stream(
        4,
        [1, 2, 1],
        &[(1, two, 0)],
        &format!("/Size 5 /Index [2 1] /Prev {first}"),
    );
    let doc = Document::parse(b.finish(second)).unwrap();

    assert_eq!(doc.len(), 2);
    assert_eq!(doc.trailer().get_uint(b"Size"), Some(5));
    assert_eq!(
        doc.resolve(ObjRef::new(2, 0)).unwrap().as_object(),
        Some(&Object::String(b"new".to_vec()))
    );
    assert!(doc.resolve(ObjRef::new(1, 0)).unwrap().as_dict().is_some());
}

#[test]
fn object_stream_containing_itself() {
    let mut b = Builder::new("%PDF-1.5");
    let objects = obj_stm(&[(1, CATALOG)], true);
    b.stream(
        2,
        &format!("/Type /ObjStm /N 1 /First {}", objects.first),
        &objects.content,
        None,
    );

    let records = [(2, 2, 0), (2, 2, 1)];
    let xref = b.xref_stream(3, [1, 1, 1], &records, "/Size 3 /Index [1 2]");
    let doc = Document::parse(b.finish(xref)).unwrap();

    let err = doc.resolve(ObjRef::new(1, 0)).unwrap_err();
    assert!(matches!(err, Error::ResolutionCycle(id) if id.obj_number == 2));
    assert_eq!(err.kind(), ErrorKind::Resolution);
    assert!(!doc.get(1, 0).unwrap().is_resolved());
}

#[test]
fn container_length_inside_container() {
    let mut b = Builder::new("%PDF-1.5");
    let objects = obj_stm(&[(1, CATALOG), (3, "12")], true);
    let container = b.stream(
        2,
        &format!("/Type /ObjStm /N 2 /First {}", objects.first),
        &objects.content,
        Some("3 0 R"),
    ) as u64;

    let records = [(2, 2, 0), (1, container, 0), (2, 2, 1)];
    let xref = b.xref_stream(4, [1, 2, 1], &records, "/Size 4 /Index [1 3]");
    let doc = Document::parse(b.finish(xref)).unwrap();

    let err = doc.resolve(ObjRef::new(1, 0)).unwrap_err();
    assert!(matches!(err, Error::ResolutionCycle(_)));
}

#[test]
fn broken_containers() {
    let mut b = Builder::new("%PDF-1.5");
    let objects = obj_stm(&[(1, CATALOG)], true);
    let container = b.stream(
        2,
        &format!("/Type /ObjStm /N 1 /First {}", objects.first),
        &objects.content,
        None,
    ) as u64;
    let dict = b.object(3, 0, PAGES) as u64;

    let records = [
        (2, 2, 0),
        (1, container, 0),
        (1, dict, 0),
        // Not listed in its container.
        (2, 2, 1),
        // In a container that is not a stream.
        (2, 3, 0),
        // In a container that does not exist.
        (2, 9, 0),
    ];
    let xref = b.xref_stream(7, [1, 2, 1], &records, "/Size 7 /Index [1 6]");
    let doc = Document::parse(b.finish(xref)).unwrap();

    assert!(doc.resolve(ObjRef::new(1, 0)).unwrap().as_dict().is_some());

    let err = doc.resolve(ObjRef::new(4, 0)).unwrap_err();
    assert!(matches!(
        err,
        Error::NotInContainer {
            obj_number: 4,
            container: 2
        }
    ));

    let err = doc.resolve(ObjRef::new(5, 0)).unwrap_err();
    assert!(matches!(err, Error::ContainerNotStream(3)));

    let err = doc.resolve(ObjRef::new(6, 0)).unwrap_err();
    assert!(matches!(err, Error::ObjectNotFound(r) if r == ObjRef::new(9, 0)));
}
