//! The encoding map variant family and its shared lookup contract.
//!
//! An [`EncodingMap`] maps character codes read from PDF strings to code
//! points, and code points back to codes. For CID-keyed maps the "code
//! points" are CIDs. Variants differ in how the table is stored:
//!
//! | Variant | Storage | Kind |
//! |---|---|---|
//! | `Simple` | explicit one-byte table from a font program | Simple |
//! | `BuiltIn` | static 256-entry table | Simple |
//! | `Difference` | base table plus `/Differences` overrides | Simple |
//! | `Identity` | arithmetic, fixed width | CMap or Indeterminate |
//! | `CMap` | [`CharCodeMap`] from a CMap program | CMap |
//! | `PredefinedToUnicode` | code to CID to Unicode chain | CMap |
//! | `Dynamic` | [`CharCodeMap`] grown while authoring a font | CMap |
//! | `Null` | nothing; placeholder before a font binds an encoding | Indeterminate |

use std::collections::BTreeMap;
use std::str::Chars;

use crate::builtin_encoding::{BuiltInEncoding, BuiltInEncodingKind, shared_builtin_encoding};
use crate::char_code::{CharCode, Cid};
use crate::char_code_map::CharCodeMap;
use crate::cmap_encoding::CMapEncoding;
use crate::cmap_writer;
use crate::code_point_span::CodePointSpan;
use crate::difference_encoding::DifferenceEncoding;
use crate::error::PdfError;
use crate::font_program::FontProgram;
use crate::glyph_names::glyph_name_for_code_point;
use crate::identity_encoding::IdentityEncoding;
use crate::limits::{CidSystemInfo, EncodingLimits, WritingMode};
use crate::predefined_to_unicode::PredefinedToUnicode;
use crate::simple_encoding::SimpleEncoding;

/// How the codes of a map relate to CIDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncodingMapKind {
    /// One-byte table encoding of a simple font; codes are not CIDs.
    Simple,
    /// CID-keyed: lookups yield CIDs.
    CMap,
    /// Neither; decided by the font using the map.
    Indeterminate,
}

/// Whether a map is one of the encodings PDF readers know by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PredefinedEncodingType {
    /// Not predefined.
    Indeterminate,
    /// A built-in single-byte table or a font program's built-in encoding.
    LegacyPredefined,
    /// A predefined CJK CMap referenced by name.
    PredefinedCMap,
}

/// How an encoding is written into a font dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExportObject {
    /// A bare name such as `/WinAnsiEncoding` or `/Identity-H`.
    Name(String),
    /// An encoding dictionary with optional `/BaseEncoding` and `/Differences`.
    Differences {
        /// The `/BaseEncoding` name.
        base: Option<String>,
        /// `(code, glyph name)` overrides in code order.
        differences: Vec<(u8, String)>,
    },
    /// Nothing is written: the encoding is implied by the font program.
    Implicit,
}

/// Error raised by operations on [`EncodingMap::Null`].
pub fn null_encoding_error() -> PdfError {
    PdfError::InvalidArgument("The null encoding must be bound to a font".to_string())
}

/// A character encoding: one variant of the family described in the module docs.
#[derive(Debug, Clone, PartialEq)]
pub enum EncodingMap {
    /// Explicit one-byte table, usually a font program's built-in encoding.
    Simple(SimpleEncoding),
    /// One of the static built-in tables.
    BuiltIn(BuiltInEncoding),
    /// A base table with `/Differences` overrides.
    Difference(DifferenceEncoding),
    /// Width-checked identity.
    Identity(IdentityEncoding),
    /// A CMap program.
    CMap(CMapEncoding),
    /// Two-stage ToUnicode of a predefined CJK CMap.
    PredefinedToUnicode(PredefinedToUnicode),
    /// A map grown while authoring a font.
    Dynamic(CharCodeMap),
    /// Placeholder that fails every operation.
    Null,
}

impl From<SimpleEncoding> for EncodingMap {
    fn from(enc: SimpleEncoding) -> Self {
        EncodingMap::Simple(enc)
    }
}

impl From<BuiltInEncoding> for EncodingMap {
    fn from(enc: BuiltInEncoding) -> Self {
        EncodingMap::BuiltIn(enc)
    }
}

impl From<DifferenceEncoding> for EncodingMap {
    fn from(enc: DifferenceEncoding) -> Self {
        EncodingMap::Difference(enc)
    }
}

impl From<IdentityEncoding> for EncodingMap {
    fn from(enc: IdentityEncoding) -> Self {
        EncodingMap::Identity(enc)
    }
}

impl From<CMapEncoding> for EncodingMap {
    fn from(enc: CMapEncoding) -> Self {
        EncodingMap::CMap(enc)
    }
}

impl From<PredefinedToUnicode> for EncodingMap {
    fn from(enc: PredefinedToUnicode) -> Self {
        EncodingMap::PredefinedToUnicode(enc)
    }
}

fn one_byte(code: CharCode) -> Option<u8> {
    if code.code_space_size == 1 {
        u8::try_from(code.code).ok()
    } else {
        None
    }
}

impl EncodingMap {
    // --- classification ---

    /// The map kind.
    pub fn kind(&self) -> EncodingMapKind {
        match self {
            EncodingMap::Simple(_) | EncodingMap::BuiltIn(_) | EncodingMap::Difference(_) => {
                EncodingMapKind::Simple
            }
            EncodingMap::Identity(identity) => identity.kind(),
            EncodingMap::CMap(_) | EncodingMap::PredefinedToUnicode(_) | EncodingMap::Dynamic(_) => {
                EncodingMapKind::CMap
            }
            EncodingMap::Null => EncodingMapKind::Indeterminate,
        }
    }

    /// Whether the map is known to PDF readers by name.
    pub fn predefined_type(&self) -> PredefinedEncodingType {
        match self {
            EncodingMap::Simple(_) | EncodingMap::BuiltIn(_) => PredefinedEncodingType::LegacyPredefined,
            EncodingMap::CMap(cmap) if cmap.is_predefined() => PredefinedEncodingType::PredefinedCMap,
            _ => PredefinedEncodingType::Indeterminate,
        }
    }

    /// True if codes may stand for several code points and the reverse
    /// direction matches code point sequences.
    pub fn has_ligature_support(&self) -> bool {
        matches!(
            self,
            EncodingMap::Simple(_)
                | EncodingMap::Difference(_)
                | EncodingMap::CMap(_)
                | EncodingMap::Dynamic(_)
        )
    }

    /// The writing mode, for CID-keyed maps that declare one.
    pub fn writing_mode(&self) -> Option<WritingMode> {
        match self {
            EncodingMap::CMap(cmap) => Some(cmap.writing_mode()),
            EncodingMap::Identity(identity) => identity.writing_mode(),
            EncodingMap::PredefinedToUnicode(ptu) => ptu.cid_map().writing_mode(),
            _ => None,
        }
    }

    /// The declared `/CIDSystemInfo`.
    pub fn cid_system_info(&self) -> Option<&CidSystemInfo> {
        match self {
            EncodingMap::CMap(cmap) => cmap.cid_system_info(),
            _ => None,
        }
    }

    /// Code limits of the map.
    pub fn limits(&self) -> &EncodingLimits {
        static INVALID: EncodingLimits = EncodingLimits {
            min_code_size: u8::MAX,
            max_code_size: 0,
            first_char: CharCode::with_size(u32::MAX, 4),
            last_char: CharCode::with_size(0, 1),
        };
        static ONE_BYTE: EncodingLimits = EncodingLimits {
            min_code_size: 1,
            max_code_size: 1,
            first_char: CharCode::with_size(0, 1),
            last_char: CharCode::with_size(0xFF, 1),
        };
        match self {
            EncodingMap::Simple(simple) => simple.limits(),
            EncodingMap::BuiltIn(_) => &ONE_BYTE,
            EncodingMap::Difference(diff) => diff.limits(),
            EncodingMap::Identity(identity) => identity.limits(),
            EncodingMap::CMap(cmap) => cmap.limits(),
            EncodingMap::PredefinedToUnicode(ptu) => ptu.cid_map().limits(),
            EncodingMap::Dynamic(map) => map.limits(),
            EncodingMap::Null => &INVALID,
        }
    }

    /// True for the null placeholder.
    pub fn is_null(&self) -> bool {
        matches!(self, EncodingMap::Null)
    }

    /// Fail with the null encoding error if this is the placeholder.
    pub fn ensure_bound(&self) -> Result<(), PdfError> {
        if self.is_null() {
            return Err(null_encoding_error());
        }
        Ok(())
    }

    /// The underlying code map of CMap-backed variants.
    pub fn char_code_map(&self) -> Option<&CharCodeMap> {
        match self {
            EncodingMap::CMap(cmap) => Some(cmap.map()),
            EncodingMap::Dynamic(map) => Some(map),
            _ => None,
        }
    }

    /// Mutable access to a dynamic map.
    pub fn dynamic_map_mut(&mut self) -> Option<&mut CharCodeMap> {
        match self {
            EncodingMap::Dynamic(map) => Some(map),
            _ => None,
        }
    }

    // --- lookups ---

    /// The code points (or CID) of `code`.
    ///
    /// `cid_hint` is a CID already known for the code; only the two-stage
    /// predefined ToUnicode uses it.
    pub fn try_get_code_points(&self, code: CharCode, cid_hint: Option<u32>) -> Option<CodePointSpan> {
        match self {
            EncodingMap::Simple(simple) => simple.code_points(one_byte(code)?).cloned(),
            EncodingMap::BuiltIn(builtin) => builtin.code_point(one_byte(code)?).map(CodePointSpan::single),
            EncodingMap::Difference(diff) => diff.code_points(one_byte(code)?),
            EncodingMap::Identity(identity) => identity.code_point(code).map(CodePointSpan::single),
            EncodingMap::CMap(cmap) => cmap.map().try_get_code_points(code),
            EncodingMap::PredefinedToUnicode(ptu) => ptu.code_points(code, cid_hint),
            EncodingMap::Dynamic(map) => map.try_get_code_points(code),
            EncodingMap::Null => None,
        }
    }

    /// The code of the single code point `cp`.
    pub fn try_get_char_code(&self, cp: u32) -> Option<CharCode> {
        match self {
            EncodingMap::Simple(simple) => simple.index().try_get_char_code_for(cp),
            EncodingMap::BuiltIn(builtin) => builtin
                .char_code(cp)
                .map(|code| CharCode::with_size(u32::from(code), 1)),
            EncodingMap::Difference(diff) => diff.index().try_get_char_code_for(cp),
            EncodingMap::Identity(identity) => identity.char_code(cp),
            EncodingMap::CMap(cmap) => cmap.map().try_get_char_code_for(cp),
            EncodingMap::PredefinedToUnicode(ptu) => ptu.char_code(cp),
            EncodingMap::Dynamic(map) => map.try_get_char_code_for(cp),
            EncodingMap::Null => None,
        }
    }

    /// The code of a code point sequence.
    ///
    /// Sequences longer than one code point only match on maps with ligature
    /// support.
    pub fn try_get_char_code_span(&self, code_points: &[u32]) -> Option<CharCode> {
        match code_points {
            [] => None,
            [cp] => self.try_get_char_code(*cp),
            _ if !self.has_ligature_support() => None,
            _ => self.ligature_index()?.try_get_char_code(code_points),
        }
    }

    fn ligature_index(&self) -> Option<&CharCodeMap> {
        match self {
            EncodingMap::Simple(simple) => Some(simple.index()),
            EncodingMap::Difference(diff) => Some(diff.index()),
            EncodingMap::CMap(cmap) => Some(cmap.map()),
            EncodingMap::Dynamic(map) => Some(map),
            _ => None,
        }
    }

    /// The code of the characters at the front of `chars`.
    ///
    /// With ligature support the longest matching sequence wins; otherwise
    /// exactly one character is consumed. The iterator only advances on
    /// success.
    pub fn try_get_next_char_code(&self, chars: &mut Chars<'_>) -> Option<CharCode> {
        if let Some(index) = self.ligature_index() {
            return index.try_get_next_char_code(chars);
        }
        let mut probe = chars.clone();
        let ch = probe.next()?;
        let code = self.try_get_char_code(u32::from(ch))?;
        *chars = probe;
        Some(code)
    }

    /// Read the next code at the front of `bytes` and look up its code points.
    ///
    /// Tries code lengths from one byte up to the maximum code size, skipping
    /// lengths below the minimum. `bytes` only advances on success.
    pub fn try_get_next_code_points(&self, bytes: &mut &[u8]) -> Option<(CharCode, CodePointSpan)> {
        let data: &[u8] = bytes;
        let limits = self.limits();
        let max = usize::from(limits.max_code_size).min(data.len());
        for size in 1..=max {
            if size < usize::from(limits.min_code_size) {
                continue;
            }
            let Some(code) = CharCode::from_bytes(&data[..size]) else {
                continue;
            };
            if let Some(points) = self.try_get_code_points(code, None) {
                *bytes = &data[size..];
                return Some((code, points));
            }
        }
        None
    }

    /// Read the next code at the front of `bytes` and resolve its CID.
    ///
    /// CID-keyed maps look the code up and read the single resulting value as
    /// the CID. Other maps read `max_code_size` bytes and take the code itself
    /// as the CID. `bytes` only advances on success.
    pub fn try_get_next_cid(&self, bytes: &mut &[u8]) -> Option<Cid> {
        if let EncodingMap::PredefinedToUnicode(ptu) = self {
            return ptu.cid_map().try_get_next_cid(bytes);
        }
        if self.kind() == EncodingMapKind::CMap {
            let mut probe = *bytes;
            let (code, points) = self.try_get_next_code_points(&mut probe)?;
            let [cid] = points.as_slice() else {
                return None;
            };
            let cid = Cid::with_unit(*cid, code);
            *bytes = probe;
            return Some(cid);
        }

        let data: &[u8] = bytes;
        let size = usize::from(self.limits().max_code_size);
        if size == 0 || data.len() < size {
            return None;
        }
        let code = CharCode::from_bytes(&data[..size])?;
        *bytes = &data[size..];
        Some(Cid::from(code))
    }

    /// The CID of `code`; the code must map to exactly one value.
    pub fn try_get_cid_id(&self, code: CharCode) -> Option<u32> {
        if let EncodingMap::PredefinedToUnicode(ptu) = self {
            return ptu.cid_map().try_get_cid_id(code);
        }
        match self.try_get_code_points(code, None)?.as_slice() {
            [cid] => Some(*cid),
            _ => None,
        }
    }

    /// The glyph name of a one-byte code, for single-byte table variants.
    pub fn glyph_name_at(&self, code: u8) -> Option<String> {
        match self {
            EncodingMap::Simple(simple) => simple.glyph_name(code).map(str::to_string),
            EncodingMap::BuiltIn(builtin) => builtin.glyph_name(code),
            EncodingMap::Difference(diff) => diff.glyph_name(code),
            _ => None,
        }
    }

    // --- CMap program output ---

    /// Write the codespace ranges of this map.
    ///
    /// # Errors
    ///
    /// Fails for the null encoding and for maps without valid limits.
    pub fn append_code_space_range(&self, out: &mut String) -> Result<(), PdfError> {
        match self {
            EncodingMap::Null => Err(null_encoding_error()),
            EncodingMap::CMap(cmap) if !cmap.map().is_empty() => {
                cmap_writer::write_map_code_space(out, cmap.map())
            }
            EncodingMap::Dynamic(map) => cmap_writer::write_map_code_space(out, map),
            EncodingMap::PredefinedToUnicode(ptu) => ptu.cid_map().append_code_space_range(out),
            _ => {
                let limits = self.limits();
                if !limits.are_valid() {
                    return Err(PdfError::EncodingError(
                        "encoding has no valid code space".to_string(),
                    ));
                }
                cmap_writer::write_limits_code_space(out, limits)
            }
        }
    }

    /// Write the `bfchar`/`bfrange` entries mapping this map's codes to Unicode.
    pub fn append_to_unicode_entries(&self, out: &mut String) -> Result<(), PdfError> {
        match self {
            EncodingMap::Null => Err(null_encoding_error()),
            EncodingMap::Simple(_) | EncodingMap::BuiltIn(_) | EncodingMap::Difference(_) => {
                cmap_writer::write_one_byte_to_unicode(out, self.limits(), |code| {
                    self.try_get_code_points(code, None).map(|cps| cps.to_vec())
                })
            }
            EncodingMap::Identity(identity) => {
                let limits = identity.limits();
                out.push_str("1 beginbfrange\n");
                limits.first_char.write_hex(out, true)?;
                limits.last_char.write_hex(out, true)?;
                out.push(' ');
                cmap_writer::write_utf16_hex(out, &[limits.first_char.code]);
                out.push_str("\nendbfrange\n");
                Ok(())
            }
            EncodingMap::CMap(cmap) => cmap_writer::write_to_unicode_entries(out, cmap.map()),
            EncodingMap::Dynamic(map) => cmap_writer::write_to_unicode_entries(out, map),
            EncodingMap::PredefinedToUnicode(ptu) => {
                let mut resolved = CharCodeMap::new();
                for_each_code(ptu.cid_map(), &mut |code| {
                    if let Some(points) = ptu.code_points(code, None) {
                        resolved.push_span(code, points)?;
                    }
                    Ok(())
                })?;
                cmap_writer::write_to_unicode_entries(out, &resolved)
            }
        }
    }

    /// Write the `cidchar`/`cidrange` entries mapping this map's codes to CIDs.
    ///
    /// Single-byte variants resolve each code to a glyph of `font` and use
    /// the glyph index as the CID, so they need a font program.
    pub fn append_cid_mapping_entries(
        &self,
        out: &mut String,
        font: Option<&dyn FontProgram>,
    ) -> Result<(), PdfError> {
        match self {
            EncodingMap::Null => Err(null_encoding_error()),
            EncodingMap::Simple(_) | EncodingMap::BuiltIn(_) | EncodingMap::Difference(_) => {
                let font = font.ok_or_else(|| {
                    PdfError::InvalidArgument(
                        "a font program is required to write CID entries of a simple encoding"
                            .to_string(),
                    )
                })?;
                let limits = self.limits();
                let mut entries = Vec::new();
                for value in limits.first_char.code..=limits.last_char.code {
                    let code = CharCode::with_size(value, 1);
                    let gid = self
                        .try_get_code_points(code, None)
                        .and_then(|cps| cps.first())
                        .and_then(|cp| font.try_get_gid(cp));
                    if let Some(gid) = gid {
                        entries.push((code, gid));
                    }
                }
                cmap_writer::write_cid_chars(out, &entries)
            }
            EncodingMap::Identity(identity) => {
                let limits = identity.limits();
                out.push_str("1 begincidrange\n");
                cmap_writer::write_cid_range(out, limits.first_char, limits.last_char, limits.first_char.code)?;
                out.push_str("endcidrange\n");
                Ok(())
            }
            EncodingMap::CMap(cmap) => cmap_writer::write_cid_mapping_entries(out, cmap.map()),
            EncodingMap::Dynamic(map) => cmap_writer::write_cid_mapping_entries(out, map),
            EncodingMap::PredefinedToUnicode(ptu) => ptu.cid_map().append_cid_mapping_entries(out, font),
        }
    }

    // --- export ---

    /// How this map is referenced from a font dictionary.
    ///
    /// `Ok(None)` means no short form exists and the map must be written as
    /// an explicit CMap stream.
    ///
    /// # Errors
    ///
    /// Fails for the null encoding.
    pub fn try_get_export_object(&self) -> Result<Option<ExportObject>, PdfError> {
        match self {
            EncodingMap::Null => Err(null_encoding_error()),
            EncodingMap::BuiltIn(builtin) => {
                let kind = builtin.kind();
                if kind.is_pdf_encoding_name() {
                    Ok(Some(ExportObject::Name(kind.name().to_string())))
                } else if kind.is_font_builtin() {
                    Ok(Some(ExportObject::Implicit))
                } else {
                    let differences = (0..=u8::MAX)
                        .filter_map(|code| builtin.glyph_name(code).map(|name| (code, name)))
                        .collect();
                    Ok(Some(ExportObject::Differences { base: None, differences }))
                }
            }
            EncodingMap::Simple(_) => Ok(Some(ExportObject::Implicit)),
            EncodingMap::Difference(diff) => {
                let (base, mut differences) = match diff.base().try_get_export_object()? {
                    Some(ExportObject::Name(name)) => (Some(name), Vec::new()),
                    Some(ExportObject::Differences { base, differences }) => (base, differences),
                    Some(ExportObject::Implicit) | None => (None, Vec::new()),
                };
                for entry in diff.differences().iter() {
                    match differences.binary_search_by_key(&entry.code, |(code, _)| *code) {
                        Ok(idx) => differences[idx].1 = entry.name.clone(),
                        Err(idx) => differences.insert(idx, (entry.code, entry.name.clone())),
                    }
                }
                Ok(Some(ExportObject::Differences { base, differences }))
            }
            EncodingMap::Identity(identity) => {
                Ok(identity.export_name().map(|name| ExportObject::Name(name.to_string())))
            }
            EncodingMap::CMap(cmap) if cmap.is_predefined() => {
                Ok(cmap.name().map(|name| ExportObject::Name(name.to_string())))
            }
            EncodingMap::CMap(_) | EncodingMap::PredefinedToUnicode(_) | EncodingMap::Dynamic(_) => Ok(None),
        }
    }

    // --- glyph resolution ---

    /// Derive a CID to GID map for a simple font from its encoding.
    ///
    /// Every one-byte code is resolved to a glyph of `font`: Type 1 programs
    /// by glyph name; TrueType programs through the Unicode cmap, then the
    /// Mac Roman cmap, then the glyph name table. Codes that resolve to no
    /// glyph map to themselves. Returns `None` for CID-keyed maps and for
    /// programs of other kinds.
    pub fn intrinsic_cid_to_gid(&self, font: &dyn FontProgram) -> Option<BTreeMap<u32, u32>> {
        if self.kind() != EncodingMapKind::Simple {
            return None;
        }
        let kind = font.kind();
        if !kind.is_type1_kind() && !kind.is_truetype_kind() {
            return None;
        }

        let mac_roman = shared_builtin_encoding(BuiltInEncodingKind::MacRoman);
        let mut map = BTreeMap::new();
        for code in 0..=u8::MAX {
            let name = self.glyph_name_at(code);
            let gid = if kind.is_type1_kind() {
                name.as_deref().and_then(|n| font.gid_from_glyph_name(n))
            } else {
                let cp = self
                    .try_get_code_points(CharCode::with_size(u32::from(code), 1), None)
                    .and_then(|cps| cps.first());
                cp.and_then(|cp| font.gid_from_unicode_cmap(cp))
                    .or_else(|| {
                        let mac_code = mac_roman.try_get_char_code(cp?)?;
                        font.gid_from_mac_roman_cmap(mac_code.code as u8)
                    })
                    .or_else(|| {
                        let name = name.clone().or_else(|| cp.map(glyph_name_for_code_point))?;
                        font.gid_from_glyph_name(&name)
                    })
            };
            map.insert(u32::from(code), gid.unwrap_or(u32::from(code)));
        }
        Some(map)
    }
}

/// Visit every code of a CID-keyed map.
fn for_each_code(
    map: &EncodingMap,
    visit: &mut dyn FnMut(CharCode) -> Result<(), PdfError>,
) -> Result<(), PdfError> {
    match map {
        EncodingMap::CMap(cmap) => {
            for (code, _) in cmap.map().mappings() {
                visit(*code)?;
            }
            for range in cmap.map().ranges() {
                for i in 0..range.size {
                    let lo = range.src_code_lo;
                    visit(CharCode::with_size(lo.code.wrapping_add(i), lo.code_space_size))?;
                }
            }
            Ok(())
        }
        EncodingMap::Identity(identity) => {
            let limits = identity.limits();
            if limits.max_code_size > 2 {
                return Err(PdfError::EncodingError(
                    "identity code space too large to enumerate".to_string(),
                ));
            }
            for value in limits.first_char.code..=limits.last_char.code {
                visit(CharCode::with_size(value, limits.max_code_size))?;
            }
            Ok(())
        }
        _ => Err(PdfError::EncodingError(
            "cannot enumerate the codes of this encoding".to_string(),
        )),
    }
}
