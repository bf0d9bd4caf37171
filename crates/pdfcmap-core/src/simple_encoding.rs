//! Table-driven single-byte encodings read from font programs.

use std::sync::OnceLock;

use crate::char_code::CharCode;
use crate::char_code_map::CharCodeMap;
use crate::code_point_span::CodePointSpan;
use crate::glyph_names::{code_points_from_glyph_name, glyph_name_for_code_point};
use crate::limits::EncodingLimits;

#[derive(Debug, Clone, PartialEq, Eq)]
struct SimpleEntry {
    name: String,
    code_points: Option<CodePointSpan>,
}

/// A single-byte encoding defined by an explicit table of up to 256 entries.
///
/// Typically the built-in encoding of an embedded Type 1 or CFF program.
/// Entries keep their glyph name so glyph lookups can go through the font's
/// name table.
#[derive(Debug, Clone)]
pub struct SimpleEncoding {
    entries: Vec<Option<SimpleEntry>>,
    limits: EncodingLimits,
    index: OnceLock<CharCodeMap>,
}

impl SimpleEncoding {
    /// Build from `(code, glyph name)` pairs; later pairs replace earlier ones.
    pub fn from_glyph_names<S: Into<String>>(entries: impl IntoIterator<Item = (u8, S)>) -> Self {
        let mut table = vec![None; 256];
        let mut limits = EncodingLimits::invalid();
        for (code, name) in entries {
            let name = name.into();
            let code_points = code_points_from_glyph_name(&name);
            table[usize::from(code)] = Some(SimpleEntry { name, code_points });
            limits.update(CharCode::with_size(u32::from(code), 1));
        }
        Self {
            entries: table,
            limits,
            index: OnceLock::new(),
        }
    }

    /// Build from `(code, code points)` pairs, naming glyphs after their code points.
    pub fn from_code_points(entries: impl IntoIterator<Item = (u8, CodePointSpan)>) -> Self {
        let mut table = vec![None; 256];
        let mut limits = EncodingLimits::invalid();
        for (code, code_points) in entries {
            if code_points.is_empty() {
                continue;
            }
            let name = code_points
                .iter()
                .map(|cp| glyph_name_for_code_point(*cp))
                .collect::<Vec<_>>()
                .join("_");
            table[usize::from(code)] = Some(SimpleEntry {
                name,
                code_points: Some(code_points),
            });
            limits.update(CharCode::with_size(u32::from(code), 1));
        }
        Self {
            entries: table,
            limits,
            index: OnceLock::new(),
        }
    }

    /// Limits spanning the defined codes.
    pub fn limits(&self) -> &EncodingLimits {
        &self.limits
    }

    /// The code points of `code`.
    pub fn code_points(&self, code: u8) -> Option<&CodePointSpan> {
        self.entries[usize::from(code)].as_ref()?.code_points.as_ref()
    }

    /// The glyph name of `code`.
    pub fn glyph_name(&self, code: u8) -> Option<&str> {
        self.entries[usize::from(code)].as_ref().map(|e| e.name.as_str())
    }

    /// Reverse index over the table, built on first use.
    pub(crate) fn index(&self) -> &CharCodeMap {
        self.index
            .get_or_init(|| one_byte_index(|code| self.code_points(code).cloned()))
    }
}

impl PartialEq for SimpleEncoding {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

/// Index a one-byte lookup into a [`CharCodeMap`].
///
/// Codes are pushed from high to low, so when several codes share code
/// points the reverse direction resolves to the lowest code.
pub(crate) fn one_byte_index(lookup: impl Fn(u8) -> Option<CodePointSpan>) -> CharCodeMap {
    let mut map = CharCodeMap::new();
    for code in (0..=u8::MAX).rev() {
        let Some(points) = lookup(code) else {
            continue;
        };
        // One-byte codes always have a valid size.
        let _ = map.push_span(CharCode::with_size(u32::from(code), 1), points);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_names_resolve() {
        let enc = SimpleEncoding::from_glyph_names([(0x41, "A"), (0x42, "f_i"), (0x43, "zzzz")]);
        assert_eq!(enc.code_points(0x41).map(|s| s.to_vec()), Some(vec![0x41]));
        assert_eq!(enc.code_points(0x42).map(|s| s.to_vec()), Some(vec![0x66, 0x69]));
        assert_eq!(enc.code_points(0x43), None);
        assert_eq!(enc.glyph_name(0x43), Some("zzzz"));
        assert_eq!(enc.limits().first_char.code, 0x41);
        assert_eq!(enc.limits().last_char.code, 0x43);
    }

    #[test]
    fn index_resolves_ligatures_and_lowest_code() {
        let enc = SimpleEncoding::from_glyph_names([(0x10, "A"), (0x05, "A"), (0x20, "f_i")]);
        let index = enc.index();
        assert_eq!(index.try_get_char_code(&[0x41]), Some(CharCode::with_size(0x05, 1)));
        assert_eq!(index.try_get_char_code(&[0x66, 0x69]), Some(CharCode::with_size(0x20, 1)));
    }

    #[test]
    fn code_point_constructor_names_glyphs() {
        let enc = SimpleEncoding::from_code_points([(1, CodePointSpan::single(0x20AC))]);
        assert_eq!(enc.glyph_name(1), Some("Euro"));
        assert_eq!(enc.glyph_name(2), None);
    }
}
