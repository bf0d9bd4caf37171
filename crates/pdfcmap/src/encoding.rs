//! The per-font encoding orchestrator.
//!
//! A [`PdfEncoding`] pairs a primary [`EncodingMap`] (code to CID, or code to
//! Unicode for simple fonts) with an optional ToUnicode map and converts whole
//! strings in both directions. Conversions are best effort: a unit that no map
//! covers is skipped using the shortest code length and reported through the
//! `success` flag of the returned [`Conversion`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, OnceLock};

use pdfcmap_core::{
    BuiltInEncodingKind, CharCode, CharCodeMap, Cid, CidToGidMap, CodePointSpan, EncodingLimits,
    EncodingMap, EncodingMapKind, FontProgram, PdfError, UnicodeNorm, WritingMode,
    null_encoding_error, shared_builtin_encoding, shared_identity_encoding,
};

use crate::dynamic::{self, SubsetGlyphs, dynamic_code};

/// Identifier of the null encoding.
pub const NULL_ENCODING_ID: u32 = 0;

/// First identifier handed out to encodings that are not built in.
///
/// Identifiers below this value are reserved for the built-in tables (see
/// [`BuiltInEncodingKind::reserved_id`]).
pub const CUSTOM_ENCODING_START_ID: u32 = 101;

static NEXT_ENCODING_ID: AtomicU32 = AtomicU32::new(CUSTOM_ENCODING_START_ID);

/// A fresh encoding identifier. Identifiers are never reused in a process.
fn next_encoding_id() -> u32 {
    NEXT_ENCODING_ID.fetch_add(1, Ordering::Relaxed)
}

/// A font program shared between an encoding and the font that owns it.
pub type SharedFontProgram = Arc<dyn FontProgram + Send + Sync>;

/// The outcome of a best-effort conversion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Conversion<T> {
    /// Everything that could be converted.
    pub value: T,
    /// False if at least one unit had no mapping and was recovered by fallback.
    pub success: bool,
}

impl<T> Conversion<T> {
    /// Map the converted value, keeping the success flag.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Conversion<U> {
        Conversion {
            value: f(self.value),
            success: self.success,
        }
    }
}

/// The encoding of one font.
///
/// Built from a parsed font dictionary (see
/// [`encoding_factory`](crate::encoding_factory)), from a built-in table, or
/// fresh for a font being authored, in which case its maps grow as text is
/// encoded.
///
/// # Example
///
/// ```ignore
/// let encoding = PdfEncoding::builtin(BuiltInEncodingKind::WinAnsi);
/// let text = encoding.convert_to_utf8(b"caf\xE9");
/// assert_eq!(text.value, "café");
/// ```
#[derive(Clone)]
pub struct PdfEncoding {
    id: u32,
    object_loaded: bool,
    parsed_limits: EncodingLimits,
    encoding: Arc<EncodingMap>,
    to_unicode: Option<Arc<EncodingMap>>,
    cid_to_gid: Option<CidToGidMap>,
    font: Option<SharedFontProgram>,
    subset: Option<SubsetGlyphs>,
    /// CID to GID map derived from a simple encoding and the font program.
    intrinsic_cid_to_gid: OnceLock<Option<BTreeMap<u32, u32>>>,
}

impl Default for PdfEncoding {
    /// The null encoding: every conversion misses until a real map is bound.
    fn default() -> Self {
        Self {
            id: NULL_ENCODING_ID,
            object_loaded: false,
            parsed_limits: EncodingLimits::invalid(),
            encoding: Arc::new(EncodingMap::Null),
            to_unicode: None,
            cid_to_gid: None,
            font: None,
            subset: None,
            intrinsic_cid_to_gid: OnceLock::new(),
        }
    }
}

impl fmt::Debug for PdfEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PdfEncoding")
            .field("id", &self.id)
            .field("object_loaded", &self.object_loaded)
            .field("kind", &self.encoding.kind())
            .field("has_to_unicode", &self.to_unicode.is_some())
            .field("has_font_program", &self.font.is_some())
            .field("subset_len", &self.subset.as_ref().map(SubsetGlyphs::len))
            .finish_non_exhaustive()
    }
}

impl PdfEncoding {
    // --- construction ---

    /// An encoding over `encoding` with an optional ToUnicode map.
    ///
    /// # Errors
    ///
    /// Fails with [`PdfError::InvalidArgument`] if `encoding` is the null map
    /// or if `to_unicode` is not a CMap-kind map.
    pub fn new(
        encoding: Arc<EncodingMap>,
        to_unicode: Option<Arc<EncodingMap>>,
    ) -> Result<Self, PdfError> {
        if let Some(to_unicode) = &to_unicode {
            if to_unicode.kind() != EncodingMapKind::CMap {
                return Err(PdfError::InvalidArgument(
                    "The ToUnicode map must be of CMap kind".to_string(),
                ));
            }
        }
        Self::with_id(next_encoding_id(), EncodingLimits::invalid(), encoding, to_unicode)
    }

    /// An encoding read from a font object.
    ///
    /// `parsed_limits` are the `/FirstChar` and `/LastChar` bounds of the font
    /// dictionary, or [`EncodingLimits::invalid`] when absent. The ToUnicode
    /// map may be of any kind since it came from the document.
    ///
    /// # Errors
    ///
    /// Fails with [`PdfError::InvalidArgument`] if `encoding` is the null map.
    pub fn from_parsed(
        parsed_limits: EncodingLimits,
        encoding: Arc<EncodingMap>,
        to_unicode: Option<Arc<EncodingMap>>,
    ) -> Result<Self, PdfError> {
        let mut ret = Self::with_id(next_encoding_id(), parsed_limits, encoding, to_unicode)?;
        ret.object_loaded = true;
        Ok(ret)
    }

    /// The encoding of a built-in table, under the table's reserved identifier.
    pub fn builtin(kind: BuiltInEncodingKind) -> Self {
        Self {
            id: kind.reserved_id(),
            encoding: shared_builtin_encoding(kind),
            ..Self::default()
        }
    }

    /// The `Identity-H` or `Identity-V` encoding.
    pub fn identity(writing_mode: WritingMode) -> Self {
        Self {
            id: next_encoding_id(),
            encoding: shared_identity_encoding(writing_mode),
            ..Self::default()
        }
    }

    /// An empty encoding for a font being authored with `font`.
    ///
    /// Codes are minted as text is encoded with
    /// [`convert_to_encoded`](Self::convert_to_encoded).
    pub fn dynamic(font: SharedFontProgram) -> Self {
        Self {
            id: next_encoding_id(),
            encoding: Arc::new(EncodingMap::Dynamic(CharCodeMap::new())),
            to_unicode: Some(Arc::new(EncodingMap::Dynamic(CharCodeMap::new()))),
            font: Some(font),
            ..Self::default()
        }
    }

    fn with_id(
        id: u32,
        parsed_limits: EncodingLimits,
        encoding: Arc<EncodingMap>,
        to_unicode: Option<Arc<EncodingMap>>,
    ) -> Result<Self, PdfError> {
        if encoding.is_null() {
            return Err(null_encoding_error());
        }
        Ok(Self {
            id,
            parsed_limits,
            encoding,
            to_unicode,
            ..Self::default()
        })
    }

    /// Bind the font program used to resolve glyphs.
    pub fn with_font_program(mut self, font: SharedFontProgram) -> Self {
        self.font = Some(font);
        self.intrinsic_cid_to_gid = OnceLock::new();
        self
    }

    /// Record the glyphs used by [`convert_to_encoded`](Self::convert_to_encoded)
    /// so that export writes a subset CMap.
    pub fn with_subsetting(mut self) -> Self {
        self.subset.get_or_insert_with(SubsetGlyphs::new);
        self
    }

    /// Use `map` to resolve CIDs to glyph indices.
    pub fn with_cid_to_gid(mut self, map: CidToGidMap) -> Self {
        self.cid_to_gid = Some(map);
        self
    }

    // --- accessors ---

    /// Process-unique identifier; built-in tables use their reserved ids.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// True for the placeholder returned by [`Default`].
    pub fn is_null(&self) -> bool {
        self.encoding.is_null()
    }

    /// True if this encoding was read from a document.
    pub fn is_object_loaded(&self) -> bool {
        self.object_loaded
    }

    /// True if the maps grow while text is encoded.
    pub fn is_dynamic(&self) -> bool {
        matches!(self.encoding.as_ref(), EncodingMap::Dynamic(_))
    }

    /// True if used glyphs are being collected for a subset.
    pub fn is_subsetting(&self) -> bool {
        self.subset.is_some()
    }

    /// The glyphs used so far, when subsetting.
    pub fn subset_glyphs(&self) -> Option<&SubsetGlyphs> {
        self.subset.as_ref()
    }

    /// The primary map.
    pub fn encoding_map(&self) -> &Arc<EncodingMap> {
        &self.encoding
    }

    /// The explicit ToUnicode map.
    ///
    /// # Errors
    ///
    /// Fails with [`PdfError::EncodingError`] when the font has none.
    pub fn to_unicode_map(&self) -> Result<&Arc<EncodingMap>, PdfError> {
        self.to_unicode
            .as_ref()
            .ok_or_else(|| PdfError::EncodingError("No valid /ToUnicode map present".to_string()))
    }

    /// The map used to produce text: the ToUnicode map, or the primary map
    /// when it is a simple encoding and no ToUnicode map exists.
    pub fn to_unicode_map_safe(&self) -> Option<&EncodingMap> {
        match &self.to_unicode {
            Some(map) => Some(map.as_ref()),
            None if self.is_simple_encoding() => Some(self.encoding.as_ref()),
            None => None,
        }
    }

    /// The bound font program.
    pub fn font_program(&self) -> Option<&SharedFontProgram> {
        self.font.as_ref()
    }

    /// The `/CIDToGIDMap` of the font, when one was read or set.
    pub fn cid_to_gid_map(&self) -> Option<&CidToGidMap> {
        self.cid_to_gid.as_ref()
    }

    /// The `/FirstChar` and `/LastChar` bounds read from the font dictionary.
    pub fn parsed_limits(&self) -> &EncodingLimits {
        &self.parsed_limits
    }

    /// True if the font dictionary supplied valid `/FirstChar`/`/LastChar`.
    pub fn has_parsed_limits(&self) -> bool {
        self.parsed_limits.are_valid()
    }

    /// True if codes map to CIDs through a CMap.
    pub fn has_cid_mapping(&self) -> bool {
        self.encoding.kind() == EncodingMapKind::CMap
    }

    /// True for one-byte encodings of simple fonts.
    pub fn is_simple_encoding(&self) -> bool {
        match self.encoding.kind() {
            EncodingMapKind::Simple => true,
            EncodingMapKind::Indeterminate => {
                !self.encoding.is_null() && self.parsed_limits.are_valid()
            }
            EncodingMapKind::CMap => false,
        }
    }

    /// The writing mode of the primary map; horizontal when it has none.
    pub fn writing_mode(&self) -> WritingMode {
        self.encoding.writing_mode().unwrap_or_default()
    }

    /// The effective code limits: the parsed bounds when valid, otherwise the
    /// primary map's.
    pub fn limits(&self) -> &EncodingLimits {
        if self.parsed_limits.are_valid() {
            &self.parsed_limits
        } else {
            self.encoding.limits()
        }
    }

    /// The lowest code of [`limits`](Self::limits).
    ///
    /// # Errors
    ///
    /// Fails with [`PdfError::ValueOutOfRange`] when the limits are empty.
    pub fn first_char(&self) -> Result<CharCode, PdfError> {
        Ok(self.checked_limits()?.first_char)
    }

    /// The highest code of [`limits`](Self::limits).
    ///
    /// # Errors
    ///
    /// Fails with [`PdfError::ValueOutOfRange`] when the limits are empty.
    pub fn last_char(&self) -> Result<CharCode, PdfError> {
        Ok(self.checked_limits()?.last_char)
    }

    fn checked_limits(&self) -> Result<&EncodingLimits, PdfError> {
        let limits = self.limits();
        if limits.first_char.code > limits.last_char.code {
            return Err(PdfError::ValueOutOfRange(
                "FirstChar shall be smaller than LastChar".to_string(),
            ));
        }
        Ok(limits)
    }

    fn has_unicode_mapping(&self) -> bool {
        self.font.as_ref().is_some_and(|font| font.has_unicode_mapping())
    }

    // --- decoding ---

    /// Decode `encoded` to UTF-8 through the ToUnicode map.
    ///
    /// Units without a mapping are skipped: the shortest code length of the
    /// encoding is consumed, the code value itself is emitted as a code point
    /// when it is a valid scalar, and `success` becomes false. NUL and invalid
    /// scalar values are never emitted.
    pub fn convert_to_utf8(&self, encoded: &[u8]) -> Conversion<String> {
        let map = self.to_unicode_map_safe();
        let mut text = String::with_capacity(encoded.len());
        let mut success = true;
        let mut rest = encoded;
        while !rest.is_empty() {
            match map.and_then(|map| map.try_get_next_code_points(&mut rest)) {
                Some((_, code_points)) => {
                    code_points.append_utf8(&mut text);
                }
                None => {
                    success = false;
                    let unit = self.next_fallback_unit(&mut rest);
                    CodePointSpan::single(unit.code).append_utf8(&mut text);
                }
            }
        }
        Conversion { value: text, success }
    }

    /// [`convert_to_utf8`](Self::convert_to_utf8) followed by Unicode normalization.
    pub fn convert_to_utf8_with(&self, encoded: &[u8], norm: UnicodeNorm) -> Conversion<String> {
        let mut converted = self.convert_to_utf8(encoded);
        norm.normalize_in_place(&mut converted.value);
        converted
    }

    /// Decode `encoded` to CIDs through the primary map.
    ///
    /// Units without a mapping are recovered as in
    /// [`convert_to_utf8`](Self::convert_to_utf8), with the code value as CID.
    pub fn convert_to_cids(&self, encoded: &[u8]) -> Conversion<Vec<Cid>> {
        let mut cids = Vec::with_capacity(encoded.len());
        let mut success = true;
        let mut rest = encoded;
        while !rest.is_empty() {
            match self.encoding.try_get_next_cid(&mut rest) {
                Some(cid) => cids.push(cid),
                None => {
                    success = false;
                    cids.push(Cid::from(self.next_fallback_unit(&mut rest)));
                }
            }
        }
        Conversion { value: cids, success }
    }

    /// Consume the shortest possible code unit from `bytes`.
    ///
    /// Reads the minimum code length of the encoding, or what is left when
    /// the input ends early. Encodings without valid limits read one byte.
    /// Always consumes at least one byte of non-empty input.
    pub(crate) fn next_fallback_unit(&self, bytes: &mut &[u8]) -> CharCode {
        let min_code_size = self.limits().min_code_size;
        let size = if (1..=4).contains(&min_code_size) { min_code_size } else { 1 };
        let size = usize::from(size).min(bytes.len());
        let (head, tail) = bytes.split_at(size);
        *bytes = tail;
        let code = head.iter().fold(0u32, |acc, &b| (acc << 8) | u32::from(b));
        CharCode::with_size(code, size as u8)
    }

    /// The code points of a single code, through the ToUnicode map.
    pub fn try_get_code_points(&self, code: CharCode) -> Option<CodePointSpan> {
        self.to_unicode_map_safe()?.try_get_code_points(code, None)
    }

    /// The CID selected by `code`.
    ///
    /// CMap-kind encodings look the code up. Simple encodings of loaded fonts
    /// use the code as CID; simple encodings of authored fonts resolve the
    /// code to Unicode and then to a glyph of the font program, so that the
    /// CID equals the glyph index.
    pub fn try_get_cid_id(&self, code: CharCode) -> Option<u32> {
        if self.encoding.is_null() {
            return None;
        }
        if self.encoding.kind() == EncodingMapKind::CMap {
            return self.encoding.try_get_cid_id(code);
        }
        match &self.font {
            Some(font) if !self.object_loaded && font.has_unicode_mapping() => {
                let cp = self.encoding.try_get_code_points(code, None)?.first()?;
                font.try_get_gid(cp)
            }
            _ => Some(code.code),
        }
    }

    /// The glyph index of `cid`.
    ///
    /// Uses, in order: the `/CIDToGIDMap`; the subset table; the map derived
    /// from a simple encoding and the font program; the CID itself.
    pub fn try_map_cid_to_gid(&self, cid: u32) -> Option<u32> {
        if let Some(map) = &self.cid_to_gid {
            return map.map_cid(cid);
        }
        if let Some(gid) = self.subset.as_ref().and_then(|subset| subset.gid_for_cid(cid)) {
            return Some(gid);
        }
        let intrinsic = self.intrinsic_cid_to_gid.get_or_init(|| {
            let font = self.font.as_ref()?;
            self.encoding.intrinsic_cid_to_gid(font.as_ref())
        });
        match intrinsic {
            Some(map) => map.get(&cid).copied(),
            None => Some(cid),
        }
    }

    // --- encoding ---

    /// Encode `text` to a PDF string.
    ///
    /// Loaded fonts and fonts without a Unicode capable program re-encode
    /// through the ToUnicode map. Authored fonts map each character to a
    /// glyph of the font program, apply the program's substitutions, and
    /// register every resulting glyph in the subset or the dynamic maps.
    ///
    /// # Errors
    ///
    /// Fails with [`PdfError::EncodingError`] if some character has no code
    /// or no glyph, and when the allocator runs out of codes.
    pub fn convert_to_encoded(&mut self, text: &str) -> Result<Vec<u8>, PdfError> {
        let mut out = Vec::with_capacity(text.len());
        if self.object_loaded || !self.has_unicode_mapping() {
            let map = self.to_unicode_map_safe().ok_or_else(|| unencodable(text))?;
            let mut chars = text.chars();
            while !chars.as_str().is_empty() {
                let code = map
                    .try_get_next_char_code(&mut chars)
                    .ok_or_else(|| unencodable(chars.as_str()))?;
                code.append_to(&mut out);
            }
            return Ok(out);
        }

        let font = match &self.font {
            Some(font) => Arc::clone(font),
            None => return Err(unencodable(text)),
        };
        let code_points: Vec<u32> = text.chars().map(u32::from).collect();
        let mut gids = Vec::with_capacity(code_points.len());
        for &cp in &code_points {
            let gid = font.try_get_gid(cp).ok_or_else(|| {
                PdfError::EncodingError(format!("no glyph for U+{cp:04X} in the font program"))
            })?;
            gids.push(gid);
        }
        let mut backward_map = Vec::with_capacity(gids.len());
        font.substitute_gids(&mut gids, &mut backward_map);

        let mut offset = 0;
        for (&gid, &count) in gids.iter().zip(&backward_map) {
            let end = (offset + usize::from(count)).min(code_points.len());
            let span = &code_points[offset..end];
            offset = end;
            if span.is_empty() {
                continue;
            }
            let code = if self.subset.is_some() {
                self.add_subset_gid(gid, span)?.unit
            } else if self.is_dynamic() {
                self.add_char_code(gid, span)?
            } else {
                self.to_unicode_map_safe()
                    .and_then(|map| map.try_get_char_code_span(span))
                    .ok_or_else(|| unencodable_span(span))?
            };
            code.append_to(&mut out);
        }
        Ok(out)
    }

    /// Register `gid` for `code_points` in the dynamic maps.
    ///
    /// # Errors
    ///
    /// Fails if the encoding is not dynamic.
    pub fn add_char_code(&mut self, gid: u32, code_points: &[u32]) -> Result<CharCode, PdfError> {
        let (cid_map, to_unicode) = self.dynamic_maps_mut().ok_or_else(not_dynamic)?;
        dynamic::add_char_code(cid_map, to_unicode, gid, code_points)
    }

    /// Add `gid` to the subset and return its CID.
    ///
    /// Dynamic encodings mint a new code for the glyph; other encodings reuse
    /// the code the ToUnicode map has for `code_points`. A glyph already in
    /// the subset keeps its CID.
    ///
    /// # Errors
    ///
    /// Fails if subsetting is off, or if a non-dynamic encoding has no code
    /// for `code_points`.
    pub fn add_subset_gid(&mut self, gid: u32, code_points: &[u32]) -> Result<Cid, PdfError> {
        let subset = self.subset.as_ref().ok_or_else(|| {
            PdfError::EncodingError("subsetting is not enabled for this encoding".to_string())
        })?;
        if let Some(glyph) = subset.get(gid) {
            return Ok(glyph.cid);
        }
        let id = subset.next_cid();

        let unit = if self.is_dynamic() {
            let unit = dynamic_code(id as usize)?;
            let (cid_map, to_unicode) = self.dynamic_maps_mut().ok_or_else(not_dynamic)?;
            cid_map.push_mapping(unit, &[id])?;
            to_unicode.push_mapping(unit, code_points)?;
            unit
        } else {
            self.to_unicode_map_safe()
                .and_then(|map| map.try_get_char_code_span(code_points))
                .ok_or_else(|| unencodable_span(code_points))?
        };

        let cid = Cid::with_unit(id, unit);
        if let Some(subset) = self.subset.as_mut() {
            subset.insert(gid, cid, code_points);
        }
        Ok(cid)
    }

    fn dynamic_maps_mut(&mut self) -> Option<(&mut CharCodeMap, &mut CharCodeMap)> {
        if !self.is_dynamic() {
            return None;
        }
        let to_unicode = self.to_unicode.as_mut()?;
        let cid_map = Arc::make_mut(&mut self.encoding).dynamic_map_mut()?;
        let to_unicode = Arc::make_mut(to_unicode).dynamic_map_mut()?;
        Some((cid_map, to_unicode))
    }

    // --- scanning ---

    /// Start an incremental scan over `encoded`.
    pub fn start_string_scan<'a>(&'a self, encoded: &'a [u8]) -> crate::scan::StringScanContext<'a> {
        crate::scan::StringScanContext::new(self, encoded)
    }
}

fn unencodable(text: &str) -> PdfError {
    PdfError::EncodingError(format!("The string {text:?} can't be converted to the font encoding"))
}

fn unencodable_span(code_points: &[u32]) -> PdfError {
    let text: String = code_points.iter().filter_map(|&cp| char::from_u32(cp)).collect();
    unencodable(&text)
}

fn not_dynamic() -> PdfError {
    PdfError::EncodingError("the encoding is not dynamic".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfcmap_core::{CMapEncoding, FontProgramKind, GlyphTable, IdentityEncoding};

    fn glyphs() -> SharedFontProgram {
        Arc::new(
            GlyphTable::new(FontProgramKind::TrueType)
                .with_text("abcdefghijklmnopqrstuvwxyz", 68)
                .with_unicode(0x20, 3)
                .with_unicode(0x4E2D, 900)
                .with_ligature(&[73, 76], 190),
        )
    }

    fn two_byte_cmap() -> Arc<EncodingMap> {
        let mut map = CharCodeMap::new();
        map.push_range(CharCode::with_size(0x0020, 2), 5, &[32]).unwrap();
        Arc::new(CMapEncoding::new(map).into())
    }

    fn to_unicode_ab() -> Arc<EncodingMap> {
        let mut map = CharCodeMap::new();
        map.push_mapping(CharCode::with_size(0x0020, 2), &[0x41]).unwrap();
        map.push_mapping(CharCode::with_size(0x0021, 2), &[0x66, 0x69]).unwrap();
        Arc::new(CMapEncoding::new(map).into())
    }

    // --- construction ---

    #[test]
    fn default_is_null() {
        let encoding = PdfEncoding::default();
        assert!(encoding.is_null());
        assert_eq!(encoding.id(), NULL_ENCODING_ID);
        let text = encoding.convert_to_utf8(b"AB");
        assert!(!text.success);
        assert_eq!(text.value, "AB");
    }

    #[test]
    fn null_map_is_rejected() {
        let err = PdfEncoding::new(Arc::new(EncodingMap::Null), None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid argument: The null encoding must be bound to a font"
        );
    }

    #[test]
    fn to_unicode_must_be_cmap_kind() {
        let win_ansi = shared_builtin_encoding(BuiltInEncodingKind::WinAnsi);
        let err = PdfEncoding::new(two_byte_cmap(), Some(Arc::clone(&win_ansi))).unwrap_err();
        assert!(matches!(err, PdfError::InvalidArgument(_)));
        assert!(PdfEncoding::new(two_byte_cmap(), Some(to_unicode_ab())).is_ok());
    }

    #[test]
    fn ids_are_unique_and_builtins_reserved() {
        let a = PdfEncoding::new(two_byte_cmap(), None).unwrap();
        let b = PdfEncoding::new(two_byte_cmap(), None).unwrap();
        assert_ne!(a.id(), b.id());
        assert!(a.id() >= CUSTOM_ENCODING_START_ID);
        assert_eq!(PdfEncoding::builtin(BuiltInEncodingKind::WinAnsi).id(), 11);
        assert_eq!(PdfEncoding::builtin(BuiltInEncodingKind::MacRoman).id(), 12);
    }

    // --- decoding ---

    #[test]
    fn win_ansi_decodes_without_to_unicode() {
        let encoding = PdfEncoding::builtin(BuiltInEncodingKind::WinAnsi);
        let text = encoding.convert_to_utf8(b"caf\xE9 \x80");
        assert!(text.success);
        assert_eq!(text.value, "café €");
    }

    #[test]
    fn to_unicode_map_wins_and_handles_ligatures() {
        let encoding = PdfEncoding::new(two_byte_cmap(), Some(to_unicode_ab())).unwrap();
        let text = encoding.convert_to_utf8(&[0x00, 0x20, 0x00, 0x21]);
        assert!(text.success);
        assert_eq!(text.value, "Afi");
    }

    #[test]
    fn misses_fall_back_to_min_code_size() {
        let encoding = PdfEncoding::new(two_byte_cmap(), Some(to_unicode_ab())).unwrap();
        let text = encoding.convert_to_utf8(&[0x00, 0x20, 0x00, 0x42, 0x00]);
        assert!(!text.success);
        assert_eq!(text.value, "AB");
    }

    #[test]
    fn cmap_without_to_unicode_cannot_decode_text() {
        let encoding = PdfEncoding::new(two_byte_cmap(), None).unwrap();
        assert!(encoding.to_unicode_map_safe().is_none());
        assert!(encoding.to_unicode_map().is_err());
        assert!(!encoding.convert_to_utf8(&[0x00, 0x41]).success);
    }

    #[test]
    fn cids_of_cmap_and_fallback() {
        let encoding = PdfEncoding::new(two_byte_cmap(), None).unwrap();
        let cids = encoding.convert_to_cids(&[0x00, 0x21, 0x01, 0x00, 0x7F]);
        assert!(!cids.success);
        let ids: Vec<u32> = cids.value.iter().map(|cid| cid.id).collect();
        assert_eq!(ids, vec![33, 0x0100, 0x7F]);
        assert_eq!(cids.value[2].unit, CharCode::with_size(0x7F, 1));
    }

    #[test]
    fn normalization_is_applied() {
        let encoding = PdfEncoding::builtin(BuiltInEncodingKind::WinAnsi);
        let text = encoding.convert_to_utf8_with(b"\xBD", UnicodeNorm::Nfkc);
        assert_eq!(text.value, "1\u{2044}2");
    }

    // --- limits ---

    #[test]
    fn parsed_limits_override_map_limits() {
        let mut limits = EncodingLimits::one_byte();
        limits.first_char = CharCode::with_size(32, 1);
        limits.last_char = CharCode::with_size(126, 1);
        let win_ansi = shared_builtin_encoding(BuiltInEncodingKind::WinAnsi);
        let encoding = PdfEncoding::from_parsed(limits, win_ansi, None).unwrap();
        assert!(encoding.has_parsed_limits());
        assert_eq!(encoding.first_char().unwrap().code, 32);
        assert_eq!(encoding.last_char().unwrap().code, 126);
        assert!(encoding.is_object_loaded());
    }

    #[test]
    fn empty_limits_are_out_of_range() {
        let encoding = PdfEncoding::default();
        let err = encoding.first_char().unwrap_err();
        assert_eq!(
            err.to_string(),
            "value out of range: FirstChar shall be smaller than LastChar"
        );
    }

    #[test]
    fn identity_with_parsed_limits_is_simple() {
        let identity: Arc<EncodingMap> = Arc::new(IdentityEncoding::new(1).unwrap().into());
        let parsed = PdfEncoding::from_parsed(EncodingLimits::one_byte(), Arc::clone(&identity), None)
            .unwrap();
        assert!(parsed.is_simple_encoding());
        let bare = PdfEncoding::from_parsed(EncodingLimits::invalid(), identity, None).unwrap();
        assert!(!bare.is_simple_encoding());
    }

    // --- cid and gid ---

    #[test]
    fn cid_of_code_per_kind() {
        let cmap = PdfEncoding::new(two_byte_cmap(), None).unwrap();
        assert!(cmap.has_cid_mapping());
        assert_eq!(cmap.try_get_cid_id(CharCode::with_size(0x22, 2)), Some(34));

        let win_ansi = shared_builtin_encoding(BuiltInEncodingKind::WinAnsi);
        let loaded = PdfEncoding::from_parsed(EncodingLimits::invalid(), Arc::clone(&win_ansi), None)
            .unwrap()
            .with_font_program(glyphs());
        assert_eq!(loaded.try_get_cid_id(CharCode::with_size(0x61, 1)), Some(0x61));

        let authored = PdfEncoding::builtin(BuiltInEncodingKind::WinAnsi).with_font_program(glyphs());
        assert_eq!(authored.try_get_cid_id(CharCode::with_size(0x61, 1)), Some(68));
        assert_eq!(authored.try_get_cid_id(CharCode::with_size(0x31, 1)), None);
    }

    #[test]
    fn cid_to_gid_prefers_explicit_map() {
        let mut table = BTreeMap::new();
        table.insert(3, 7);
        let encoding = PdfEncoding::new(two_byte_cmap(), None)
            .unwrap()
            .with_cid_to_gid(CidToGidMap::from_table(table));
        assert_eq!(encoding.try_map_cid_to_gid(3), Some(7));
        assert_eq!(encoding.try_map_cid_to_gid(4), None);

        let plain = PdfEncoding::new(two_byte_cmap(), None).unwrap();
        assert_eq!(plain.try_map_cid_to_gid(12), Some(12));
    }

    #[test]
    fn cid_to_gid_from_simple_encoding_and_program() {
        let encoding = PdfEncoding::builtin(BuiltInEncodingKind::WinAnsi).with_font_program(glyphs());
        assert_eq!(encoding.try_map_cid_to_gid(0x62), Some(69));
    }

    // --- encoding ---

    #[test]
    fn loaded_font_encodes_through_to_unicode() {
        let mut encoding = PdfEncoding::from_parsed(
            EncodingLimits::invalid(),
            two_byte_cmap(),
            Some(to_unicode_ab()),
        )
        .unwrap();
        assert_eq!(encoding.convert_to_encoded("fiA").unwrap(), vec![0x00, 0x21, 0x00, 0x20]);
        let err = encoding.convert_to_encoded("Z").unwrap_err();
        assert!(matches!(err, PdfError::EncodingError(_)));
    }

    #[test]
    fn builtin_encodes_without_program() {
        let mut encoding = PdfEncoding::builtin(BuiltInEncodingKind::WinAnsi);
        assert_eq!(encoding.convert_to_encoded("café").unwrap(), b"caf\xE9".to_vec());
    }

    #[test]
    fn dynamic_encoding_grows() {
        let mut encoding = PdfEncoding::dynamic(glyphs());
        assert!(encoding.is_dynamic());
        let first = encoding.convert_to_encoded("ab a").unwrap();
        assert_eq!(first, vec![0x00, 0x01, 0x02, 0x00]);

        let text = encoding.convert_to_utf8(&first);
        assert!(text.success);
        assert_eq!(text.value, "ab a");

        let cids = encoding.convert_to_cids(&first);
        let gids: Vec<u32> = cids.value.iter().map(|cid| cid.id).collect();
        assert_eq!(gids, vec![68, 69, 3, 68]);
    }

    #[test]
    fn dynamic_encoding_registers_ligatures() {
        let mut encoding = PdfEncoding::dynamic(glyphs());
        let encoded = encoding.convert_to_encoded("fix").unwrap();
        assert_eq!(encoded.len(), 2);
        assert_eq!(encoding.convert_to_utf8(&encoded).value, "fix");
        let cids = encoding.convert_to_cids(&encoded);
        assert_eq!(cids.value[0].id, 190);
    }

    #[test]
    fn missing_glyph_fails() {
        let mut encoding = PdfEncoding::dynamic(glyphs());
        let err = encoding.convert_to_encoded("a\u{263A}").unwrap_err();
        assert_eq!(
            err.to_string(),
            "encoding error: no glyph for U+263A in the font program"
        );
    }

    #[test]
    fn dynamic_subset_numbers_cids_from_one() {
        let mut encoding = PdfEncoding::dynamic(glyphs()).with_subsetting();
        let encoded = encoding.convert_to_encoded("zaz").unwrap();
        assert_eq!(encoded, vec![0x01, 0x02, 0x01]);

        let subset = encoding.subset_glyphs().unwrap();
        assert_eq!(subset.len(), 2);
        assert_eq!(subset.get(93).unwrap().cid.id, 1);
        assert_eq!(subset.get(68).unwrap().cid.id, 2);
        assert_eq!(encoding.try_map_cid_to_gid(2), Some(68));
        assert_eq!(encoding.convert_to_utf8(&encoded).value, "zaz");
    }

    #[test]
    fn subset_of_static_encoding_reuses_codes() {
        let mut encoding = PdfEncoding::builtin(BuiltInEncodingKind::WinAnsi)
            .with_font_program(glyphs())
            .with_subsetting();
        let encoded = encoding.convert_to_encoded("ba").unwrap();
        assert_eq!(encoded, b"ba".to_vec());
        let subset = encoding.subset_glyphs().unwrap();
        assert_eq!(subset.get(69).unwrap().cid, Cid::with_unit(1, CharCode::with_size(0x62, 1)));
    }

    #[test]
    fn add_char_code_requires_dynamic() {
        let mut encoding = PdfEncoding::builtin(BuiltInEncodingKind::WinAnsi);
        assert!(encoding.add_char_code(3, &[0x20]).is_err());
        assert!(encoding.add_subset_gid(3, &[0x20]).is_err());
    }

    #[test]
    fn cloned_dynamic_encodings_grow_independently() {
        let mut a = PdfEncoding::dynamic(glyphs());
        a.convert_to_encoded("a").unwrap();
        let mut b = a.clone();
        b.convert_to_encoded("b").unwrap();
        assert!(!a.convert_to_utf8(&[0x01]).success);
        assert_eq!(b.convert_to_utf8(&[0x01]).value, "b");
    }
}
