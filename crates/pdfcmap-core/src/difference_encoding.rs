//! `/Differences` overlays on a single-byte base encoding.

use std::sync::{Arc, OnceLock};

use crate::char_code::CharCode;
use crate::char_code_map::CharCodeMap;
use crate::code_point_span::CodePointSpan;
use crate::encoding_map::{EncodingMap, EncodingMapKind};
use crate::error::PdfError;
use crate::glyph_names::code_points_from_glyph_name;
use crate::limits::EncodingLimits;
use crate::simple_encoding::one_byte_index;

/// One `/Differences` entry: a code, its glyph name and what the name stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Difference {
    /// The overridden code.
    pub code: u8,
    /// Glyph name assigned to the code.
    pub name: String,
    /// Code points the name resolves to; empty if it resolves to nothing.
    pub code_points: CodePointSpan,
}

/// Sorted set of overrides, at most one per code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifferenceList {
    entries: Vec<Difference>,
}

impl DifferenceList {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override `code` with the glyph `name`, resolving it through the glyph list.
    pub fn add_difference(&mut self, code: u8, name: impl Into<String>) {
        let name = name.into();
        let code_points = code_points_from_glyph_name(&name).unwrap_or_default();
        self.add_difference_with(code, name, code_points);
    }

    /// Override `code` with the glyph `name` standing for `code_points`.
    pub fn add_difference_with(&mut self, code: u8, name: impl Into<String>, code_points: CodePointSpan) {
        let entry = Difference {
            code,
            name: name.into(),
            code_points,
        };
        match self.entries.binary_search_by_key(&code, |d| d.code) {
            Ok(idx) => self.entries[idx] = entry,
            Err(idx) => self.entries.insert(idx, entry),
        }
    }

    /// The override of `code`.
    pub fn get(&self, code: u8) -> Option<&Difference> {
        self.entries
            .binary_search_by_key(&code, |d| d.code)
            .ok()
            .map(|idx| &self.entries[idx])
    }

    /// Overrides in code order.
    pub fn iter(&self) -> impl Iterator<Item = &Difference> {
        self.entries.iter()
    }

    /// Number of overrides.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no overrides.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A base single-byte encoding with some codes overridden.
#[derive(Debug, Clone)]
pub struct DifferenceEncoding {
    base: Arc<EncodingMap>,
    differences: DifferenceList,
    limits: EncodingLimits,
    index: OnceLock<CharCodeMap>,
}

impl DifferenceEncoding {
    /// Overlay `differences` on `base`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::InvalidArgument`] if `base` is not a single-byte
    /// simple encoding.
    pub fn new(base: Arc<EncodingMap>, differences: DifferenceList) -> Result<Self, PdfError> {
        if base.kind() != EncodingMapKind::Simple || base.limits().max_code_size != 1 {
            return Err(PdfError::InvalidArgument(
                "the base of a difference encoding must be a single-byte simple encoding".to_string(),
            ));
        }
        let mut limits = *base.limits();
        for diff in differences.iter() {
            limits.update(CharCode::with_size(u32::from(diff.code), 1));
        }
        Ok(Self {
            base,
            differences,
            limits,
            index: OnceLock::new(),
        })
    }

    /// The base encoding.
    pub fn base(&self) -> &Arc<EncodingMap> {
        &self.base
    }

    /// The overrides.
    pub fn differences(&self) -> &DifferenceList {
        &self.differences
    }

    /// Limits of the base widened by the overridden codes.
    pub fn limits(&self) -> &EncodingLimits {
        &self.limits
    }

    /// The code points of `code`: the override if any, else the base value.
    ///
    /// An override whose name resolves to nothing hides the base value.
    pub fn code_points(&self, code: u8) -> Option<CodePointSpan> {
        match self.differences.get(code) {
            Some(diff) if diff.code_points.is_empty() => None,
            Some(diff) => Some(diff.code_points.clone()),
            None => self
                .base
                .try_get_code_points(CharCode::with_size(u32::from(code), 1), None),
        }
    }

    /// The glyph name of `code`: the override name if any, else the base name.
    pub fn glyph_name(&self, code: u8) -> Option<String> {
        match self.differences.get(code) {
            Some(diff) => Some(diff.name.clone()),
            None => self.base.glyph_name_at(code),
        }
    }

    /// Reverse index over the effective table, built on first use.
    pub(crate) fn index(&self) -> &CharCodeMap {
        self.index.get_or_init(|| one_byte_index(|code| self.code_points(code)))
    }
}

impl PartialEq for DifferenceEncoding {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base && self.differences == other.differences
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin_encoding::{BuiltInEncodingKind, shared_builtin_encoding};

    fn win_ansi_with(diffs: &[(u8, &str)]) -> DifferenceEncoding {
        let mut list = DifferenceList::new();
        for (code, name) in diffs {
            list.add_difference(*code, *name);
        }
        DifferenceEncoding::new(shared_builtin_encoding(BuiltInEncodingKind::WinAnsi), list).unwrap()
    }

    // --- DifferenceList ---

    #[test]
    fn list_keeps_one_entry_per_code_in_order() {
        let mut list = DifferenceList::new();
        list.add_difference(0x42, "B");
        list.add_difference(0x41, "A");
        list.add_difference(0x42, "C");
        let codes: Vec<u8> = list.iter().map(|d| d.code).collect();
        assert_eq!(codes, vec![0x41, 0x42]);
        assert_eq!(list.get(0x42).unwrap().name, "C");
        assert_eq!(list.get(0x42).unwrap().code_points.as_slice(), &[0x43]);
    }

    // --- overlay precedence ---

    #[test]
    fn override_wins_over_base() {
        let enc = win_ansi_with(&[(0x41, "Euro")]);
        assert_eq!(enc.code_points(0x41).unwrap().as_slice(), &[0x20AC]);
        assert_eq!(enc.code_points(0x42).unwrap().as_slice(), &[0x42]);
    }

    #[test]
    fn unresolved_override_hides_base() {
        let enc = win_ansi_with(&[(0x41, "g123")]);
        assert_eq!(enc.code_points(0x41), None);
        assert_eq!(enc.glyph_name(0x41).as_deref(), Some("g123"));
        assert_eq!(enc.glyph_name(0x42).as_deref(), Some("B"));
    }

    #[test]
    fn reverse_index_sees_overrides() {
        let enc = win_ansi_with(&[(0x01, "f_i")]);
        assert_eq!(enc.index().try_get_char_code(&[0x66, 0x69]), Some(CharCode::with_size(1, 1)));
        assert_eq!(*enc.limits(), EncodingLimits::one_byte());
    }

    #[test]
    fn rejects_multi_byte_base() {
        let base = crate::identity_encoding::shared_identity_encoding(crate::limits::WritingMode::Horizontal);
        let err = DifferenceEncoding::new(base, DifferenceList::new()).unwrap_err();
        assert!(matches!(err, PdfError::InvalidArgument(_)));
    }
}
