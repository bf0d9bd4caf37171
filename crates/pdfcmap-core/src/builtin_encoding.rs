//! The 256-entry single-byte encodings built into PDF and PostScript.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use crate::builtin_tables;
use crate::encoding_map::EncodingMap;
use crate::glyph_names::glyph_name_for_code_point;

/// Identifies one of the built-in single-byte encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuiltInEncodingKind {
    /// Adobe StandardEncoding.
    Standard,
    /// WinAnsiEncoding.
    WinAnsi,
    /// MacRomanEncoding.
    MacRoman,
    /// MacExpertEncoding.
    MacExpert,
    /// Built-in encoding of the Symbol font.
    Symbol,
    /// Built-in encoding of the ZapfDingbats font.
    ZapfDingbats,
    /// PDFDocEncoding.
    PdfDoc,
    /// ISOLatin1Encoding.
    IsoLatin1,
}

impl BuiltInEncodingKind {
    /// Every built-in encoding.
    pub const ALL: [BuiltInEncodingKind; 8] = [
        BuiltInEncodingKind::Standard,
        BuiltInEncodingKind::WinAnsi,
        BuiltInEncodingKind::MacRoman,
        BuiltInEncodingKind::MacExpert,
        BuiltInEncodingKind::Symbol,
        BuiltInEncodingKind::ZapfDingbats,
        BuiltInEncodingKind::PdfDoc,
        BuiltInEncodingKind::IsoLatin1,
    ];

    /// The code to Unicode table, `0` marking undefined codes.
    pub fn table(&self) -> &'static [u16; 256] {
        match self {
            BuiltInEncodingKind::Standard => &builtin_tables::STANDARD,
            BuiltInEncodingKind::WinAnsi => &builtin_tables::WIN_ANSI,
            BuiltInEncodingKind::MacRoman => &builtin_tables::MAC_ROMAN,
            BuiltInEncodingKind::MacExpert => &builtin_tables::MAC_EXPERT,
            BuiltInEncodingKind::Symbol => &builtin_tables::SYMBOL,
            BuiltInEncodingKind::ZapfDingbats => &builtin_tables::ZAPF_DINGBATS,
            BuiltInEncodingKind::PdfDoc => &builtin_tables::PDF_DOC,
            BuiltInEncodingKind::IsoLatin1 => &builtin_tables::ISO_LATIN1,
        }
    }

    /// The encoding's conventional name, e.g. `WinAnsiEncoding`.
    pub fn name(&self) -> &'static str {
        match self {
            BuiltInEncodingKind::Standard => "StandardEncoding",
            BuiltInEncodingKind::WinAnsi => "WinAnsiEncoding",
            BuiltInEncodingKind::MacRoman => "MacRomanEncoding",
            BuiltInEncodingKind::MacExpert => "MacExpertEncoding",
            BuiltInEncodingKind::Symbol => "SymbolEncoding",
            BuiltInEncodingKind::ZapfDingbats => "ZapfDingbatsEncoding",
            BuiltInEncodingKind::PdfDoc => "PDFDocEncoding",
            BuiltInEncodingKind::IsoLatin1 => "ISOLatin1Encoding",
        }
    }

    /// Look up a kind by its conventional name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// True if the name may appear as a font `/Encoding` or `/BaseEncoding` value.
    pub fn is_pdf_encoding_name(&self) -> bool {
        matches!(
            self,
            BuiltInEncodingKind::WinAnsi | BuiltInEncodingKind::MacRoman | BuiltInEncodingKind::MacExpert
        )
    }

    /// True if the encoding is the implicit encoding of a standard font program.
    pub fn is_font_builtin(&self) -> bool {
        matches!(
            self,
            BuiltInEncodingKind::Standard | BuiltInEncodingKind::Symbol | BuiltInEncodingKind::ZapfDingbats
        )
    }

    /// The fixed encoding id reserved for this table.
    pub fn reserved_id(&self) -> u32 {
        match self {
            BuiltInEncodingKind::WinAnsi => 11,
            BuiltInEncodingKind::MacRoman => 12,
            BuiltInEncodingKind::MacExpert => 13,
            BuiltInEncodingKind::Standard => 21,
            BuiltInEncodingKind::Symbol => 22,
            BuiltInEncodingKind::ZapfDingbats => 23,
            BuiltInEncodingKind::PdfDoc => 24,
            BuiltInEncodingKind::IsoLatin1 => 25,
        }
    }

    fn index(&self) -> usize {
        match self {
            BuiltInEncodingKind::Standard => 0,
            BuiltInEncodingKind::WinAnsi => 1,
            BuiltInEncodingKind::MacRoman => 2,
            BuiltInEncodingKind::MacExpert => 3,
            BuiltInEncodingKind::Symbol => 4,
            BuiltInEncodingKind::ZapfDingbats => 5,
            BuiltInEncodingKind::PdfDoc => 6,
            BuiltInEncodingKind::IsoLatin1 => 7,
        }
    }
}

/// A built-in 256-entry table with a reverse index built on first use.
#[derive(Debug, Clone)]
pub struct BuiltInEncoding {
    kind: BuiltInEncodingKind,
    reverse: OnceLock<HashMap<u32, u8>>,
}

impl BuiltInEncoding {
    /// The encoding for `kind`.
    ///
    /// Prefer [`shared_builtin_encoding`], which hands out one instance per
    /// kind for the whole process.
    pub fn new(kind: BuiltInEncodingKind) -> Self {
        Self {
            kind,
            reverse: OnceLock::new(),
        }
    }

    /// Which table this is.
    pub fn kind(&self) -> BuiltInEncodingKind {
        self.kind
    }

    /// The code point of `code`, `None` if the table leaves it undefined.
    pub fn code_point(&self, code: u8) -> Option<u32> {
        match self.kind.table()[usize::from(code)] {
            0 => None,
            cp => Some(u32::from(cp)),
        }
    }

    /// The code of `cp`. When several codes share a code point the lowest wins.
    pub fn char_code(&self, cp: u32) -> Option<u8> {
        self.reverse
            .get_or_init(|| {
                let mut reverse = HashMap::with_capacity(256);
                for (code, &value) in self.kind.table().iter().enumerate() {
                    if value != 0 {
                        reverse.entry(u32::from(value)).or_insert(code as u8);
                    }
                }
                reverse
            })
            .get(&cp)
            .copied()
    }

    /// The glyph name of `code`, derived from its code point.
    pub fn glyph_name(&self, code: u8) -> Option<String> {
        self.code_point(code).map(glyph_name_for_code_point)
    }
}

impl PartialEq for BuiltInEncoding {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

/// The process-wide shared instance of a built-in encoding.
///
/// Each instance is created at most once, on first request.
pub fn shared_builtin_encoding(kind: BuiltInEncodingKind) -> Arc<EncodingMap> {
    static SHARED: [OnceLock<Arc<EncodingMap>>; 8] = [const { OnceLock::new() }; 8];
    SHARED[kind.index()]
        .get_or_init(|| Arc::new(EncodingMap::BuiltIn(BuiltInEncoding::new(kind))))
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in BuiltInEncodingKind::ALL {
            assert_eq!(BuiltInEncodingKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(BuiltInEncodingKind::from_name("Identity-H"), None);
    }

    #[test]
    fn reserved_ids_are_distinct() {
        let mut ids: Vec<u32> = BuiltInEncodingKind::ALL.iter().map(|k| k.reserved_id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), BuiltInEncodingKind::ALL.len());
        assert!(ids.iter().all(|id| *id > 0 && *id < 101));
    }

    #[test]
    fn win_ansi_lookups() {
        let enc = BuiltInEncoding::new(BuiltInEncodingKind::WinAnsi);
        assert_eq!(enc.code_point(0x41), Some(0x41));
        assert_eq!(enc.code_point(0x80), Some(0x20AC));
        assert_eq!(enc.char_code(0x20AC), Some(0x80));
        assert_eq!(enc.glyph_name(0x80).as_deref(), Some("Euro"));
    }

    #[test]
    fn undefined_codes_are_misses() {
        let enc = BuiltInEncoding::new(BuiltInEncodingKind::Standard);
        assert_eq!(enc.code_point(0x00), None);
        assert_eq!(enc.char_code(0), None);
    }

    #[test]
    fn reverse_prefers_lowest_code() {
        // PDFDocEncoding maps both 0x16 and 0x17 to U+0017.
        let enc = BuiltInEncoding::new(BuiltInEncodingKind::PdfDoc);
        assert_eq!(enc.code_point(0x16), Some(0x17));
        assert_eq!(enc.code_point(0x17), Some(0x17));
        assert_eq!(enc.char_code(0x17), Some(0x16));
    }

    #[test]
    fn standard_quotes_are_curly() {
        let enc = BuiltInEncoding::new(BuiltInEncodingKind::Standard);
        assert_eq!(enc.code_point(0x27), Some(0x2019));
        assert_eq!(enc.code_point(0x60), Some(0x2018));
        assert_eq!(enc.char_code(0x60), Some(0xC1));
    }

    #[test]
    fn shared_instances_are_reused() {
        let a = shared_builtin_encoding(BuiltInEncodingKind::MacRoman);
        let b = shared_builtin_encoding(BuiltInEncodingKind::MacRoman);
        assert!(Arc::ptr_eq(&a, &b));
    }
}
