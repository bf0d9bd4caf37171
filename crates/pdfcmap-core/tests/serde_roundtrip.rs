//! Serde serialization/deserialization round-trip tests.
//!
//! These tests verify that the public value types can be serialized to JSON
//! and deserialized back, producing equal values.

#![cfg(feature = "serde")]

use std::collections::BTreeMap;

use pdfcmap_core::*;

/// Helper: serialize to JSON string, deserialize back, assert equality.
fn roundtrip<T>(value: &T)
where
    T: serde::Serialize + serde::de::DeserializeOwned + PartialEq + std::fmt::Debug,
{
    let json = serde_json::to_string(value).expect("serialize failed");
    let restored: T = serde_json::from_str(&json).expect("deserialize failed");
    assert_eq!(*value, restored, "round-trip mismatch for JSON: {json}");
}

// --- Codes ---

#[test]
fn test_serde_char_code() {
    roundtrip(&CharCode::with_size(0x8140, 2));
    roundtrip(&CharCode::new(0x41));
}

#[test]
fn test_serde_cid_and_gid() {
    roundtrip(&Cid::with_unit(633, CharCode::with_size(0x8140, 2)));
    roundtrip(&Gid::new(36));
}

#[test]
fn test_serde_code_point_span() {
    roundtrip(&CodePointSpan::from_text("ffi"));
    roundtrip(&CodePointSpan::single(0x1F600));
    roundtrip(&CodePointSpan::new());
}

// --- Limits and metadata ---

#[test]
fn test_serde_encoding_limits() {
    roundtrip(&EncodingLimits::one_byte());
    roundtrip(&EncodingLimits::invalid());
}

#[test]
fn test_serde_code_space_range() {
    roundtrip(&CodeSpaceRange::new(0x8140, 0xFEFE, 2));
}

#[test]
fn test_serde_cid_system_info() {
    roundtrip(&CidSystemInfo::new("Adobe", "Japan1", 6));
}

#[test]
fn test_serde_writing_mode() {
    roundtrip(&WritingMode::Horizontal);
    roundtrip(&WritingMode::Vertical);
}

#[test]
fn test_serde_cid_to_gid_map() {
    roundtrip(&CidToGidMap::Identity);
    roundtrip(&CidToGidMap::Table(BTreeMap::from([(1, 36), (2, 68)])));
}

// --- Encoding descriptors ---

#[test]
fn test_serde_builtin_encoding_kind() {
    for kind in [
        BuiltInEncodingKind::Standard,
        BuiltInEncodingKind::WinAnsi,
        BuiltInEncodingKind::MacRoman,
        BuiltInEncodingKind::MacExpert,
        BuiltInEncodingKind::Symbol,
        BuiltInEncodingKind::ZapfDingbats,
        BuiltInEncodingKind::PdfDoc,
        BuiltInEncodingKind::IsoLatin1,
    ] {
        roundtrip(&kind);
    }
}

#[test]
fn test_serde_encoding_map_kind() {
    roundtrip(&EncodingMapKind::Simple);
    roundtrip(&EncodingMapKind::CMap);
    roundtrip(&PredefinedEncodingType::PredefinedCMap);
}

#[test]
fn test_serde_difference_list() {
    let mut list = DifferenceList::new();
    list.add_difference(39, "quotesingle");
    list.add_difference(128, "Euro");
    list.add_difference(129, "nosuchglyph");
    roundtrip(&list);
}

#[test]
fn test_serde_export_object() {
    roundtrip(&ExportObject::Name("Identity-H".to_string()));
    roundtrip(&ExportObject::Differences {
        base: Some("WinAnsiEncoding".to_string()),
        differences: vec![(128, "Euro".to_string())],
    });
    roundtrip(&ExportObject::Implicit);
}

#[test]
fn test_serde_options_enums() {
    roundtrip(&UnicodeNorm::Nfkc);
    roundtrip(&FontProgramKind::TrueType);
}

// --- Warnings ---

#[test]
fn test_serde_warning() {
    let warning = EncodingWarning::with_code(
        EncodingWarningCode::InvalidRange,
        "bfrange upper bound below lower bound",
    )
    .at_offset(120)
    .in_cmap("Adobe-Japan1-UCS2");
    roundtrip(&warning);
}

#[test]
fn test_serde_warning_other_code() {
    roundtrip(&EncodingWarning::new("font has no usable /Encoding or /ToUnicode entry"));
}
