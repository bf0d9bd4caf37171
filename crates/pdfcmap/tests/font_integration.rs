//! Integration tests for reading, authoring and exporting font encodings.
//!
//! Fonts are built with lopdf, saved and loaded again, then decoded through
//! [`EncodingFactory`]. Authored fonts are exported with
//! [`export_to_dictionary`] and read back to check that both directions agree.

mod common;

use lopdf::{Document, Object, dictionary};
use pdfcmap::{
    BuiltInEncodingKind, CharCode, EncodingFactory, EncodingMapKind, EncodingOptions, PdfEncoding,
    ScanState, UnicodeNorm, WritingMode, encoding_for_font, export_to_dictionary,
};

use common::{
    MIXED_WIDTH_CMAP, TWO_BYTE_TO_UNICODE, add_simple_font, add_stream, add_type0_font,
    finish_document, latin_program, reload,
};

fn load(doc: &Document, font: lopdf::ObjectId) -> PdfEncoding {
    EncodingFactory::new(doc, EncodingOptions::default())
        .encoding_for_font_id(font, None)
        .unwrap()
        .value
}

// --- reading ---

#[test]
fn identity_font_decodes_through_to_unicode() {
    let mut doc = Document::with_version("1.7");
    let (font, _) = add_type0_font(&mut doc, "Demo", Object::Name(b"Identity-H".to_vec()));
    let to_unicode = add_stream(&mut doc, dictionary! {}, TWO_BYTE_TO_UNICODE);
    doc.get_object_mut(font)
        .unwrap()
        .as_dict_mut()
        .unwrap()
        .set("ToUnicode", Object::Reference(to_unicode));
    finish_document(&mut doc);
    let doc = reload(&mut doc);

    let encoding = load(&doc, font);
    let encoded = [0x00, 0x2B, 0x00, 0x48, 0x00, 0x03, 0x01, 0xB0, 0x00, 0x4F];
    let text = encoding.convert_to_utf8(&encoded);
    assert!(text.success);
    assert_eq!(text.value, "He fil");

    let cids = encoding.convert_to_cids(&encoded);
    assert!(cids.success);
    assert_eq!(cids.value[3].id, 0x01B0);
}

#[test]
fn embedded_mixed_width_cmap() {
    let mut doc = Document::with_version("1.7");
    let cmap = add_stream(
        &mut doc,
        dictionary! { "Type" => "CMap", "CMapName" => "Test-Mixed-H" },
        MIXED_WIDTH_CMAP,
    );
    let (font, _) = add_type0_font(&mut doc, "Mixed", Object::Reference(cmap));
    finish_document(&mut doc);
    let doc = reload(&mut doc);

    let encoding = load(&doc, font);
    assert!(encoding.has_cid_mapping());
    let limits = encoding.limits();
    assert_eq!((limits.min_code_size, limits.max_code_size), (1, 2));

    let cids = encoding.convert_to_cids(&[0x41, 0x81, 0x40, 0x81, 0x80, 0x20]);
    assert!(cids.success);
    let ids: Vec<u32> = cids.value.iter().map(|cid| cid.id).collect();
    assert_eq!(ids, vec![34, 633, 696, 1]);
    assert_eq!(cids.value[1].unit, CharCode::with_size(0x8140, 2));

    let info = encoding.encoding_map().cid_system_info().unwrap();
    assert_eq!(info.registry, "Test");
    assert_eq!(info.ordering, "Mixed");
}

#[test]
fn unmapped_codes_do_not_stop_decoding() {
    let mut doc = Document::with_version("1.7");
    let (font, _) = add_type0_font(&mut doc, "Demo", Object::Name(b"Identity-H".to_vec()));
    let to_unicode = add_stream(
        &mut doc,
        dictionary! {},
        "1 begincodespacerange <0000> <FFFF> endcodespacerange\n\
         1 beginbfchar <0024> <0041> endbfchar",
    );
    doc.get_object_mut(font)
        .unwrap()
        .as_dict_mut()
        .unwrap()
        .set("ToUnicode", Object::Reference(to_unicode));

    let encoding = load(&doc, font);
    let text = encoding.convert_to_utf8(&[0x00, 0x24, 0x00, 0x25, 0x00]);
    assert!(!text.success);
    assert_eq!(text.value, "A%");
}

#[test]
fn differences_over_standard_encoding() {
    let mut doc = Document::with_version("1.7");
    let encoding = dictionary! {
        "Type" => "Encoding",
        "Differences" => vec![
            Object::Integer(39),
            Object::Name(b"quotesingle".to_vec()),
            Object::Integer(128),
            Object::Name(b"Euro".to_vec()),
            Object::Name(b"f_f".to_vec()),
        ],
    };
    let font = add_simple_font(&mut doc, "Type1", Some(Object::Dictionary(encoding)));
    let encoding = load(&doc, font);

    assert_eq!(encoding.encoding_map().kind(), EncodingMapKind::Simple);
    let text = encoding.convert_to_utf8(b"it'\x60s \x80\x81");
    assert!(text.success);
    assert_eq!(text.value, "it'\u{2018}s \u{20AC}ff");
}

#[test]
fn normalization_applies_to_decoded_text() {
    let mut doc = Document::with_version("1.7");
    let font = add_simple_font(&mut doc, "TrueType", Some(Object::Name(b"WinAnsiEncoding".to_vec())));
    let encoding = load(&doc, font);
    let text = encoding.convert_to_utf8_with(b"\xBC", UnicodeNorm::Nfkd);
    assert_eq!(text.value, "1\u{2044}4");
}

#[test]
fn scan_reports_each_unit() {
    let mut doc = Document::with_version("1.7");
    let cmap = add_stream(&mut doc, dictionary! {}, MIXED_WIDTH_CMAP);
    let (font, _) = add_type0_font(&mut doc, "Mixed", Object::Reference(cmap));
    let encoding = load(&doc, font);

    let mut scan = encoding.start_string_scan(&[0x81, 0x41, 0xFF]);
    assert_eq!(scan.state(), ScanState::NotStarted);
    let first = scan.try_scan().unwrap();
    assert_eq!(first.cid.id, 634);
    assert_eq!(scan.state(), ScanState::Scanning);
    let second = scan.try_scan().unwrap();
    assert!(!second.success);
    assert_eq!(second.cid.id, 0xFF);
    assert!(scan.is_exhausted());
    assert!(scan.try_scan().is_none());
}

// --- authoring and export ---

#[test]
fn authored_font_round_trips_through_pdf() {
    let mut doc = Document::with_version("1.7");
    let (font, descendant) = add_type0_font(&mut doc, "Authored", Object::Null);

    let mut encoding = PdfEncoding::dynamic(latin_program());
    let encoded = encoding.convert_to_encoded("fine office").unwrap();
    export_to_dictionary(&encoding, &mut doc, font).unwrap();
    finish_document(&mut doc);
    let doc = reload(&mut doc);

    let info = doc
        .get_dictionary(descendant)
        .unwrap()
        .get(b"CIDSystemInfo")
        .unwrap()
        .as_dict()
        .unwrap();
    assert_eq!(info.get(b"Registry").unwrap().as_str().unwrap(), b"PdfCMap");
    assert_eq!(info.get(b"Ordering").unwrap().as_str().unwrap(), b"Authored");

    let loaded = load(&doc, font);
    let text = loaded.convert_to_utf8(&encoded);
    assert!(text.success);
    assert_eq!(text.value, "fine office");

    let written = encoding.convert_to_cids(&encoded);
    let read = loaded.convert_to_cids(&encoded);
    assert_eq!(written.value, read.value);
    assert!(read.value.iter().any(|cid| cid.id == 432));
}

#[test]
fn subset_font_round_trips_through_pdf() {
    let mut doc = Document::with_version("1.7");
    let (font, _) = add_type0_font(&mut doc, "Sub", Object::Null);

    let mut encoding = PdfEncoding::dynamic(latin_program()).with_subsetting();
    let encoded = encoding.convert_to_encoded("\u{4E2D}\u{6587} text").unwrap();
    let subset = encoding.subset_glyphs().unwrap();
    assert_eq!(subset.len(), 6);
    assert_eq!(subset.get(1200).unwrap().cid.id, 1);

    export_to_dictionary(&encoding, &mut doc, font).unwrap();
    finish_document(&mut doc);
    let doc = reload(&mut doc);

    let loaded = load(&doc, font);
    assert_eq!(loaded.convert_to_utf8(&encoded).value, "\u{4E2D}\u{6587} text");
    let cids: Vec<u32> = loaded.convert_to_cids(&encoded).value.iter().map(|cid| cid.id).collect();
    assert_eq!(cids, vec![1, 2, 3, 4, 5, 6, 4]);
}

#[test]
fn builtin_simple_font_exports_by_name() {
    let mut doc = Document::with_version("1.7");
    let font = add_simple_font(&mut doc, "TrueType", None);
    let mut encoding = PdfEncoding::builtin(BuiltInEncodingKind::MacRoman);
    let encoded = encoding.convert_to_encoded("caf\u{E9}").unwrap();
    assert_eq!(encoded, b"caf\x8E".to_vec());

    export_to_dictionary(&encoding, &mut doc, font).unwrap();
    finish_document(&mut doc);
    let doc = reload(&mut doc);

    let dict = doc.get_dictionary(font).unwrap();
    assert_eq!(dict.get(b"Encoding").unwrap().as_name().unwrap(), b"MacRomanEncoding");
    let loaded = load(&doc, font);
    assert_eq!(loaded.convert_to_utf8(&encoded).value, "caf\u{E9}");
}

#[test]
fn vertical_identity_keeps_writing_mode() {
    let mut doc = Document::with_version("1.7");
    let (font, _) = add_type0_font(&mut doc, "Vert", Object::Null);
    let encoding = PdfEncoding::identity(WritingMode::Vertical);
    export_to_dictionary(&encoding, &mut doc, font).unwrap();

    let loaded = encoding_for_font(&doc, doc.get_dictionary(font).unwrap(), None)
        .unwrap()
        .value;
    assert_eq!(loaded.writing_mode(), WritingMode::Vertical);
    assert_eq!(loaded.convert_to_cids(&[0x12, 0x34]).value[0].id, 0x1234);
}
