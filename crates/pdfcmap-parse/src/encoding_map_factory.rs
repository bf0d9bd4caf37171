//! Encoding maps from font dictionaries.
//!
//! Reads the `/Encoding`, `/ToUnicode`, `/FirstChar`, `/LastChar` and
//! descendant `/CIDToGIDMap` entries of a font dictionary held in a
//! [`lopdf::Document`] and builds the primary and ToUnicode
//! [`EncodingMap`]s a font's encoding is made of.

use std::sync::Arc;

use lopdf::{Dictionary, Document, Object, Stream};
use pdfcmap_core::{
    BuiltInEncodingKind, CharCode, CidSystemInfo, CidToGidMap, DifferenceEncoding, DifferenceList,
    EncodingLimits, EncodingMap, EncodingMapKind, EncodingOptions, EncodingResult, EncodingWarning,
    EncodingWarningCode, FontProgram, IdentityEncoding, PredefinedEncodingType, SimpleEncoding,
    WritingMode, char_code_size, shared_builtin_encoding, shared_identity_encoding,
};

use crate::cmap::CMapParser;
use crate::error::{BackendError, report_warning};
use crate::predefined::{self, PredefinedRegistry};

/// The encoding maps of one font.
#[derive(Debug, Clone, Default)]
pub struct FontEncodingMaps {
    /// The primary code to CID (or code to Unicode, for simple fonts) map.
    pub encoding: Option<Arc<EncodingMap>>,
    /// The explicit or derived ToUnicode map.
    pub to_unicode: Option<Arc<EncodingMap>>,
    /// Limits from `/FirstChar` and `/LastChar`; invalid when absent.
    pub parsed_limits: EncodingLimits,
    /// The descendant font's `/CIDToGIDMap`.
    pub cid_to_gid: Option<CidToGidMap>,
}

/// Builds [`EncodingMap`]s from objects of a document.
pub struct EncodingMapFactory<'a> {
    doc: &'a Document,
    options: &'a EncodingOptions,
    registry: &'a PredefinedRegistry,
}

impl<'a> EncodingMapFactory<'a> {
    /// Factory resolving predefined CMap names through the process-wide registry.
    pub fn new(doc: &'a Document, options: &'a EncodingOptions) -> Self {
        Self {
            doc,
            options,
            registry: predefined::registry(),
        }
    }

    /// Resolve predefined CMap names through `registry` instead.
    pub fn with_registry(mut self, registry: &'a PredefinedRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// All encoding maps of the font dictionary `font`.
    ///
    /// `program` is the font program, when the caller has one; it supplies
    /// the implicit encoding of fonts without `/Encoding`.
    ///
    /// A font with a ToUnicode map but no usable `/Encoding` gets an identity
    /// primary map as wide as the ToUnicode codes. A predefined CID CMap
    /// without `/ToUnicode` gets the chained `Registry-Ordering-UCS2` map.
    ///
    /// # Errors
    ///
    /// Fails on malformed embedded CMap streams and, in strict mode, on any
    /// recoverable problem.
    pub fn font_encoding_maps(
        &self,
        font: &Dictionary,
        program: Option<&dyn FontProgram>,
    ) -> Result<EncodingResult<FontEncodingMaps>, BackendError> {
        let mut warnings = Vec::new();

        let mut encoding = match font.get(b"Encoding") {
            Ok(obj) => self.collect(self.encoding_map(obj, program)?, &mut warnings),
            Err(_) => None,
        };
        if encoding.is_none() {
            encoding = program
                .and_then(implicit_encoding)
                .or_else(|| standard_font_encoding(font).map(shared_builtin_encoding));
        }

        let mut to_unicode = match font.get(b"ToUnicode") {
            Ok(obj) => self.collect(self.to_unicode_map(obj)?, &mut warnings),
            Err(_) => None,
        };

        if encoding.is_none() {
            // An unknown predefined name can still yield text through its code scheme
            if to_unicode.is_none() && self.options.synthesize_legacy_cjk {
                to_unicode = encoding_name(self.doc, font)
                    .and_then(|name| self.registry.synthesized_to_unicode(&name));
            }
            if let Some(to_unicode) = &to_unicode {
                let size = to_unicode.limits().max_code_size;
                if (1..=4).contains(&size) {
                    encoding = Some(Arc::new(IdentityEncoding::new(size)?.into()));
                }
            }
        } else if let Some(cid_map) = encoding.as_ref().filter(|map| {
            to_unicode.is_none() && map.predefined_type() == PredefinedEncodingType::PredefinedCMap
        }) {
            let derived = self.registry.to_unicode_for(cid_map, self.options)?;
            to_unicode = self.collect(derived, &mut warnings);
        }

        let maps = FontEncodingMaps {
            encoding,
            to_unicode,
            parsed_limits: parsed_limits(self.doc, font),
            cid_to_gid: self.cid_to_gid_map(font)?,
        };
        Ok(EncodingResult::with_warnings(maps, warnings))
    }

    /// The encoding map an `/Encoding` value stands for.
    ///
    /// Names select a built-in table, an identity or a predefined CMap. A
    /// dictionary is an embedded CMap when it is a stream and a `/Differences`
    /// overlay otherwise. `None` when the value has an unsupported shape.
    ///
    /// # Errors
    ///
    /// Fails on malformed embedded CMaps and unreadable predefined resources.
    pub fn encoding_map(
        &self,
        obj: &Object,
        program: Option<&dyn FontProgram>,
    ) -> Result<EncodingResult<Option<Arc<EncodingMap>>>, BackendError> {
        let obj = resolve(self.doc, obj);
        if let Ok(name) = obj.as_name() {
            let name = String::from_utf8_lossy(name);
            return self.named_map(&name, true);
        }

        let (dict, stream) = match obj {
            Object::Dictionary(dict) => (dict, None),
            Object::Stream(stream) => (&stream.dict, Some(stream)),
            _ => return self.unsupported(format!("/Encoding of type {}", type_name(obj))),
        };
        if let Some(identity) = identity_cmap_name(dict) {
            return Ok(EncodingResult::ok(Some(identity)));
        }
        if let Some(stream) = stream {
            return self.cmap_stream(stream).map(|result| result.map(Some));
        }
        self.difference_encoding(dict, program)
    }

    /// The map a `/ToUnicode` value stands for: an embedded CMap stream, or
    /// a predefined name.
    ///
    /// # Errors
    ///
    /// Fails on malformed CMap streams.
    pub fn to_unicode_map(
        &self,
        obj: &Object,
    ) -> Result<EncodingResult<Option<Arc<EncodingMap>>>, BackendError> {
        match resolve(self.doc, obj) {
            Object::Stream(stream) => self.cmap_stream(stream).map(|result| result.map(Some)),
            Object::Name(name) => self.named_map(&String::from_utf8_lossy(name), false),
            other => self.unsupported(format!("/ToUnicode of type {}", type_name(other))),
        }
    }

    /// Parse an embedded CMap stream.
    ///
    /// A program mapping every code to itself becomes an identity. Otherwise
    /// `/WMode`, `/CIDSystemInfo` and `/CMapName` of the stream dictionary
    /// take priority over the values the program declares.
    ///
    /// # Errors
    ///
    /// Fails when the stream cannot be decoded or the program is malformed.
    pub fn cmap_stream(&self, stream: &Stream) -> Result<EncodingResult<Arc<EncodingMap>>, BackendError> {
        let data = stream_content(stream)?;
        let parsed = CMapParser::new(self.options)
            .with_resolver(self.registry)
            .parse(&data)?;

        let EncodingResult { value: mut cmap, warnings } = parsed;
        let limits = *cmap.limits();
        if !cmap.map().is_empty()
            && limits.min_code_size == limits.max_code_size
            && cmap.map().is_trivial_identity()
        {
            let identity = IdentityEncoding::with_limits(limits);
            return Ok(EncodingResult::with_warnings(Arc::new(identity.into()), warnings));
        }

        let dict = &stream.dict;
        if let Some(wmode) = dict.get(b"WMode").ok().and_then(|obj| obj.as_i64().ok()) {
            cmap = cmap.with_wmode(WritingMode::from_raw(wmode).as_raw());
        }
        if let Some(info) = dict
            .get(b"CIDSystemInfo")
            .ok()
            .and_then(|obj| resolve(self.doc, obj).as_dict().ok())
        {
            let info = cid_system_info(self.doc, info, cmap.cid_system_info());
            cmap = cmap.with_cid_system_info(info);
        }
        if let Some(name) = dict.get(b"CMapName").ok().and_then(|obj| obj.as_name().ok()) {
            cmap = cmap.with_name(String::from_utf8_lossy(name));
        }
        Ok(EncodingResult::with_warnings(Arc::new(cmap.into()), warnings))
    }

    /// A `/Differences` overlay described by an encoding dictionary.
    ///
    /// The base is `/BaseEncoding` when it names a built-in table, else the
    /// font program's implicit encoding, else StandardEncoding.
    ///
    /// # Errors
    ///
    /// Fails in strict mode when `/BaseEncoding` names an unknown table.
    pub fn difference_encoding(
        &self,
        dict: &Dictionary,
        program: Option<&dyn FontProgram>,
    ) -> Result<EncodingResult<Option<Arc<EncodingMap>>>, BackendError> {
        let mut warnings = Vec::new();
        let mut base = None;
        if let Some(name) = dict.get(b"BaseEncoding").ok().and_then(|obj| obj.as_name().ok()) {
            let name = String::from_utf8_lossy(name);
            match BuiltInEncodingKind::from_name(&name) {
                Some(kind) => base = Some(shared_builtin_encoding(kind)),
                None => report_warning(
                    self.options,
                    &mut warnings,
                    EncodingWarning::with_code(
                        EncodingWarningCode::Other("UNKNOWN_BASE_ENCODING".to_string()),
                        format!("unknown /BaseEncoding {name}"),
                    ),
                )?,
            }
        }
        let base = base
            .or_else(|| program.and_then(implicit_encoding))
            .unwrap_or_else(|| shared_builtin_encoding(BuiltInEncodingKind::Standard));

        let differences = match dict.get(b"Differences") {
            Ok(obj) => match resolve(self.doc, obj).as_array() {
                Ok(array) => parse_differences(self.doc, array),
                Err(_) => DifferenceList::new(),
            },
            Err(_) => DifferenceList::new(),
        };
        let encoding = DifferenceEncoding::new(base, differences)?;
        Ok(EncodingResult::with_warnings(
            Some(Arc::new(encoding.into())),
            warnings,
        ))
    }

    /// The `/CIDToGIDMap` of the first descendant font of a Type 0 font.
    ///
    /// # Errors
    ///
    /// Fails when the map stream cannot be decoded.
    pub fn cid_to_gid_map(&self, font: &Dictionary) -> Result<Option<CidToGidMap>, BackendError> {
        let Some(descendant) = descendant_font(self.doc, font) else {
            return Ok(None);
        };
        let Ok(obj) = descendant.get(b"CIDToGIDMap") else {
            return Ok(None);
        };
        match resolve(self.doc, obj) {
            Object::Name(name) if name.as_slice() == b"Identity" => Ok(Some(CidToGidMap::Identity)),
            Object::Stream(stream) => Ok(Some(CidToGidMap::from_stream_bytes(&stream_content(stream)?))),
            _ => Ok(None),
        }
    }

    fn named_map(
        &self,
        name: &str,
        allow_builtin: bool,
    ) -> Result<EncodingResult<Option<Arc<EncodingMap>>>, BackendError> {
        if allow_builtin {
            if let Some(kind) = BuiltInEncodingKind::from_name(name).filter(|k| k.is_pdf_encoding_name()) {
                return Ok(EncodingResult::ok(Some(shared_builtin_encoding(kind))));
            }
        }
        if let Some(map) = self.registry.cmap(name)? {
            return Ok(EncodingResult::ok(Some(map)));
        }
        self.unsupported(format!("predefined CMap {name} is not available"))
    }

    fn unsupported(&self, description: String) -> Result<EncodingResult<Option<Arc<EncodingMap>>>, BackendError> {
        let mut warnings = Vec::new();
        report_warning(
            self.options,
            &mut warnings,
            EncodingWarning::with_code(EncodingWarningCode::UnsupportedDestination, description),
        )?;
        Ok(EncodingResult::with_warnings(None, warnings))
    }

    fn collect<T>(&self, result: EncodingResult<T>, warnings: &mut Vec<EncodingWarning>) -> T {
        warnings.extend(result.warnings);
        result.value
    }
}

/// The implicit encoding of a font program: its built-in table, if any.
pub fn implicit_encoding(program: &dyn FontProgram) -> Option<Arc<EncodingMap>> {
    let table = program.builtin_encoding()?;
    if table.is_empty() {
        return None;
    }
    Some(Arc::new(SimpleEncoding::from_glyph_names(table).into()))
}

/// The built-in table of a standard 14 font named by `/BaseFont`.
///
/// Only simple fonts qualify; Symbol and ZapfDingbats have their own tables,
/// the others use StandardEncoding.
pub fn standard_font_encoding(font: &Dictionary) -> Option<BuiltInEncodingKind> {
    let subtype = font.get(b"Subtype").ok()?.as_name().ok()?;
    if subtype != b"Type1" {
        return None;
    }
    let base_font = font.get(b"BaseFont").ok()?.as_name().ok()?;
    match base_font {
        b"Symbol" => Some(BuiltInEncodingKind::Symbol),
        b"ZapfDingbats" => Some(BuiltInEncodingKind::ZapfDingbats),
        b"Courier" | b"Courier-Bold" | b"Courier-Oblique" | b"Courier-BoldOblique" | b"Helvetica"
        | b"Helvetica-Bold" | b"Helvetica-Oblique" | b"Helvetica-BoldOblique" | b"Times-Roman"
        | b"Times-Bold" | b"Times-Italic" | b"Times-BoldItalic" => Some(BuiltInEncodingKind::Standard),
        _ => None,
    }
}

/// Parse a `/Differences` array: an integer starts a run and each following
/// name takes the next code. Codes outside `0..=255` end the run.
pub fn parse_differences(doc: &Document, array: &[Object]) -> DifferenceList {
    let mut differences = DifferenceList::new();
    let mut next_code: Option<u32> = None;
    for obj in array {
        match resolve(doc, obj) {
            Object::Integer(code) => next_code = u32::try_from(*code).ok(),
            Object::Real(code) if *code >= 0.0 => next_code = Some(*code as u32),
            Object::Name(name) => {
                let Some(code) = next_code.and_then(|code| u8::try_from(code).ok()) else {
                    continue;
                };
                differences.add_difference(code, String::from_utf8_lossy(name));
                next_code = Some(u32::from(code) + 1);
            }
            _ => {}
        }
    }
    differences
}

/// `/FirstChar` and `/LastChar` limits. Code sizes are only set when the
/// range is non-empty.
pub fn parsed_limits(doc: &Document, font: &Dictionary) -> EncodingLimits {
    let mut limits = EncodingLimits::invalid();
    let number = |key: &[u8]| -> Option<u32> {
        match resolve(doc, font.get(key).ok()?) {
            Object::Integer(n) => u32::try_from(*n).ok(),
            Object::Real(n) if *n >= 0.0 => Some(*n as u32),
            _ => None,
        }
    };
    if let Some(first) = number(b"FirstChar") {
        limits.first_char = CharCode::new(first);
    }
    if let Some(last) = number(b"LastChar") {
        limits.last_char = CharCode::new(last);
    }
    if limits.last_char.code > limits.first_char.code {
        limits.min_code_size = char_code_size(limits.first_char.code);
        limits.max_code_size = char_code_size(limits.last_char.code);
    }
    limits
}

fn identity_cmap_name(dict: &Dictionary) -> Option<Arc<EncodingMap>> {
    match dict.get(b"CMapName").ok()?.as_name().ok()? {
        b"Identity-H" => Some(shared_identity_encoding(WritingMode::Horizontal)),
        b"Identity-V" => Some(shared_identity_encoding(WritingMode::Vertical)),
        _ => None,
    }
}

fn encoding_name(doc: &Document, font: &Dictionary) -> Option<String> {
    let name = resolve(doc, font.get(b"Encoding").ok()?).as_name().ok()?;
    Some(String::from_utf8_lossy(name).into_owned())
}

fn cid_system_info(doc: &Document, dict: &Dictionary, declared: Option<&CidSystemInfo>) -> CidSystemInfo {
    let mut info = declared.cloned().unwrap_or_default();
    let text = |key: &[u8]| -> Option<String> {
        match resolve(doc, dict.get(key).ok()?) {
            Object::String(bytes, _) => Some(String::from_utf8_lossy(bytes).into_owned()),
            Object::Name(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        }
    };
    if let Some(registry) = text(b"Registry") {
        info.registry = registry;
    }
    if let Some(ordering) = text(b"Ordering") {
        info.ordering = ordering;
    }
    info.supplement = dict
        .get(b"Supplement")
        .ok()
        .and_then(|obj| resolve(doc, obj).as_i64().ok())
        .and_then(|n| i32::try_from(n).ok())
        .unwrap_or(0);
    info
}

fn descendant_font<'d>(doc: &'d Document, font: &'d Dictionary) -> Option<&'d Dictionary> {
    let fonts = resolve(doc, font.get(b"DescendantFonts").ok()?).as_array().ok()?;
    resolve(doc, fonts.first()?).as_dict().ok()
}

fn resolve<'d>(doc: &'d Document, obj: &'d Object) -> &'d Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// Decoded stream content; unfiltered streams are returned as stored.
fn stream_content(stream: &Stream) -> Result<Vec<u8>, BackendError> {
    if stream.dict.get(b"Filter").is_ok() {
        stream
            .decompressed_content()
            .map_err(|e| BackendError::Encoding(format!("stream decompression failed: {e}")))
    } else {
        Ok(stream.content.clone())
    }
}

fn type_name(obj: &Object) -> &'static str {
    match obj {
        Object::Null => "null",
        Object::Boolean(_) => "boolean",
        Object::Integer(_) => "integer",
        Object::Real(_) => "real",
        Object::Name(_) => "name",
        Object::String(..) => "string",
        Object::Array(_) => "array",
        Object::Dictionary(_) => "dictionary",
        Object::Stream(_) => "stream",
        Object::Reference(_) => "reference",
        #[allow(unreachable_patterns)]
        _ => "object",
    }
}

/// Whether `map` is a one-byte table that can stand in for a ToUnicode map.
pub fn is_simple_one_byte(map: &EncodingMap) -> bool {
    map.kind() == EncodingMapKind::Simple && map.limits().max_code_size == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{StringFormat, dictionary};
    use pdfcmap_core::{FontProgramKind, GlyphTable};

    const TO_UNICODE: &[u8] = b"/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CMapName /Adobe-Identity-UCS def
/CMapType 2 def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
2 beginbfchar
<0003> <0041>
<0004> <00660069>
endbfchar
endcmap
CMapName currentdict /CMap defineresource pop
end
end
";

    fn options() -> EncodingOptions {
        EncodingOptions::default()
    }

    fn name(value: &str) -> Object {
        Object::Name(value.as_bytes().to_vec())
    }

    fn cp(map: &EncodingMap, code: u32, size: u8) -> Option<Vec<u32>> {
        map.try_get_code_points(CharCode::with_size(code, size), None)
            .map(|span| span.as_slice().to_vec())
    }

    // --- /Encoding names ---

    #[test]
    fn encoding_names_select_shared_tables() {
        let doc = Document::with_version("1.7");
        let opts = options();
        let factory = EncodingMapFactory::new(&doc, &opts);

        let win = factory.encoding_map(&name("WinAnsiEncoding"), None).unwrap().value.unwrap();
        assert!(Arc::ptr_eq(&win, &shared_builtin_encoding(BuiltInEncodingKind::WinAnsi)));
        assert_eq!(cp(&win, 0x80, 1), Some(vec![0x20AC]));

        let ident = factory.encoding_map(&name("Identity-V"), None).unwrap().value.unwrap();
        assert_eq!(ident.writing_mode(), Some(WritingMode::Vertical));
    }

    #[test]
    fn unknown_encoding_name_warns() {
        let doc = Document::with_version("1.7");
        let opts = options();
        let registry = PredefinedRegistry::new();
        let factory = EncodingMapFactory::new(&doc, &opts).with_registry(&registry);
        let result = factory.encoding_map(&name("Nonexistent-H"), None).unwrap();
        assert!(result.value.is_none());
        assert_eq!(result.warnings[0].code, EncodingWarningCode::UnsupportedDestination);

        let strict = EncodingOptions::strict();
        let factory = EncodingMapFactory::new(&doc, &strict).with_registry(&registry);
        assert!(factory.encoding_map(&name("Nonexistent-H"), None).is_err());
    }

    // --- /Differences ---

    #[test]
    fn differences_overlay_base_encoding() {
        let doc = Document::with_version("1.7");
        let opts = options();
        let factory = EncodingMapFactory::new(&doc, &opts);
        let dict = dictionary! {
            "Type" => "Encoding",
            "BaseEncoding" => "WinAnsiEncoding",
            "Differences" => vec![
                Object::Integer(65), name("Alpha"), name("Beta"),
                Object::Integer(200), name("fi"),
            ],
        };
        let map = factory
            .encoding_map(&Object::Dictionary(dict), None)
            .unwrap()
            .value
            .unwrap();
        assert_eq!(map.kind(), EncodingMapKind::Simple);
        assert_eq!(cp(&map, 65, 1), Some(vec![0x0391]));
        assert_eq!(cp(&map, 66, 1), Some(vec![0x0392]));
        assert_eq!(cp(&map, 67, 1), Some(vec![u32::from('C')]));
        assert_eq!(cp(&map, 200, 1), Some(vec![0xFB01]));
        assert_eq!(cp(&map, 0x80, 1), Some(vec![0x20AC]));
    }

    #[test]
    fn differences_without_base_use_font_program_encoding() {
        let doc = Document::with_version("1.7");
        let opts = options();
        let factory = EncodingMapFactory::new(&doc, &opts);
        let program = GlyphTable::new(FontProgramKind::Type1)
            .with_builtin_code(0x41, "B")
            .with_builtin_code(0x42, "A");
        let dict = dictionary! { "Differences" => vec![Object::Integer(0x43), name("Z")] };
        let map = factory
            .encoding_map(&Object::Dictionary(dict), Some(&program))
            .unwrap()
            .value
            .unwrap();
        assert_eq!(cp(&map, 0x41, 1), Some(vec![u32::from('B')]));
        assert_eq!(cp(&map, 0x43, 1), Some(vec![u32::from('Z')]));
    }

    #[test]
    fn differences_default_to_standard_encoding() {
        let doc = Document::with_version("1.7");
        let opts = options();
        let factory = EncodingMapFactory::new(&doc, &opts);
        let dict = dictionary! { "Differences" => vec![Object::Integer(0x41), name("bullet")] };
        let map = factory
            .encoding_map(&Object::Dictionary(dict), None)
            .unwrap()
            .value
            .unwrap();
        assert_eq!(cp(&map, 0x41, 1), Some(vec![0x2022]));
        // StandardEncoding quoteleft
        assert_eq!(cp(&map, 0x60, 1), Some(vec![0x2018]));
    }

    #[test]
    fn unknown_base_encoding_warns() {
        let doc = Document::with_version("1.7");
        let opts = options();
        let factory = EncodingMapFactory::new(&doc, &opts);
        let dict = dictionary! { "BaseEncoding" => "FancyEncoding" };
        let result = factory.encoding_map(&Object::Dictionary(dict), None).unwrap();
        assert!(result.value.is_some());
        assert_eq!(
            result.warnings[0].code,
            EncodingWarningCode::Other("UNKNOWN_BASE_ENCODING".to_string())
        );
    }

    #[test]
    fn parse_differences_skips_codes_out_of_range() {
        let doc = Document::with_version("1.7");
        let array = vec![
            Object::Integer(255),
            name("a"),
            name("b"),
            Object::Integer(-1),
            name("c"),
            Object::Integer(10),
            name("d"),
        ];
        let list = parse_differences(&doc, &array);
        let codes: Vec<u8> = list.iter().map(|d| d.code).collect();
        assert_eq!(codes, vec![10, 255]);
        assert_eq!(list.get(255).unwrap().name, "a");
    }

    // --- embedded CMaps ---

    #[test]
    fn cmap_stream_dictionary_overrides_program_values() {
        let mut doc = Document::with_version("1.7");
        let program = b"/CMapName /Inner def /WMode 0 def
1 begincodespacerange <00> <FF> endcodespacerange
1 begincidrange <20> <7E> 1 endcidrange";
        let stream = Stream::new(
            dictionary! {
                "Type" => "CMap",
                "CMapName" => "Outer-V",
                "WMode" => Object::Integer(1),
                "CIDSystemInfo" => dictionary! {
                    "Registry" => Object::String(b"Adobe".to_vec(), StringFormat::Literal),
                    "Ordering" => Object::String(b"Custom".to_vec(), StringFormat::Literal),
                },
            },
            program.to_vec(),
        );
        let id = doc.add_object(Object::Stream(stream));
        let opts = options();
        let factory = EncodingMapFactory::new(&doc, &opts);
        let map = factory
            .encoding_map(&Object::Reference(id), None)
            .unwrap()
            .value
            .unwrap();
        let EncodingMap::CMap(cmap) = map.as_ref() else {
            panic!("expected CMap, got {map:?}");
        };
        assert_eq!(cmap.name(), Some("Outer-V"));
        assert_eq!(cmap.writing_mode(), WritingMode::Vertical);
        let info = cmap.cid_system_info().unwrap();
        assert_eq!((info.registry.as_str(), info.ordering.as_str(), info.supplement), ("Adobe", "Custom", 0));
        assert_eq!(map.try_get_cid_id(CharCode::with_size(0x21, 1)), Some(2));
    }

    #[test]
    fn identity_program_becomes_identity_encoding() {
        let program = b"1 begincodespacerange <0000> <FFFF> endcodespacerange
2 begincidchar <0010> 16 <0011> 17 endcidchar";
        let stream = Stream::new(dictionary! {}, program.to_vec());
        let doc = Document::with_version("1.7");
        let opts = options();
        let factory = EncodingMapFactory::new(&doc, &opts);
        let map = factory.cmap_stream(&stream).unwrap().value;
        assert!(matches!(map.as_ref(), EncodingMap::Identity(_)));
        assert_eq!(map.kind(), EncodingMapKind::CMap);
        assert_eq!(map.limits().first_char.code, 0x10);
    }

    #[test]
    fn cmap_dictionary_named_identity_short_circuits() {
        let doc = Document::with_version("1.7");
        let opts = options();
        let factory = EncodingMapFactory::new(&doc, &opts);
        let stream = Stream::new(dictionary! { "CMapName" => "Identity-H" }, b"garbage <<<".to_vec());
        let map = factory
            .encoding_map(&Object::Stream(stream), None)
            .unwrap()
            .value
            .unwrap();
        assert!(Arc::ptr_eq(&map, &shared_identity_encoding(WritingMode::Horizontal)));
    }

    #[test]
    fn flate_compressed_to_unicode_is_decoded() {
        use std::io::Write;

        let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(TO_UNICODE).unwrap();
        let compressed = encoder.finish().unwrap();
        let stream = Stream::new(dictionary! { "Filter" => "FlateDecode" }, compressed);
        let doc = Document::with_version("1.7");
        let opts = options();
        let factory = EncodingMapFactory::new(&doc, &opts);
        let map = factory
            .to_unicode_map(&Object::Stream(stream))
            .unwrap()
            .value
            .unwrap();
        assert_eq!(cp(&map, 4, 2), Some(vec![0x66, 0x69]));
    }

    // --- whole fonts ---

    #[test]
    fn type0_font_with_to_unicode() {
        let mut doc = Document::with_version("1.7");
        let to_unicode = doc.add_object(Object::Stream(Stream::new(dictionary! {}, TO_UNICODE.to_vec())));
        let gid_map = doc.add_object(Object::Stream(Stream::new(
            dictionary! {},
            vec![0, 0, 0, 7, 0, 9],
        )));
        let descendant = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "CIDFontType2",
            "CIDToGIDMap" => Object::Reference(gid_map),
        });
        let font = dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "Encoding" => "Identity-H",
            "DescendantFonts" => vec![Object::Reference(descendant)],
            "ToUnicode" => Object::Reference(to_unicode),
        };
        let opts = options();
        let factory = EncodingMapFactory::new(&doc, &opts);
        let maps = factory.font_encoding_maps(&font, None).unwrap().value;

        assert!(Arc::ptr_eq(
            maps.encoding.as_ref().unwrap(),
            &shared_identity_encoding(WritingMode::Horizontal)
        ));
        assert_eq!(cp(maps.to_unicode.as_ref().unwrap(), 3, 2), Some(vec![0x41]));
        let gids = maps.cid_to_gid.unwrap();
        assert_eq!(gids.map_cid(1), Some(7));
        assert_eq!(gids.map_cid(2), Some(9));
        assert!(!maps.parsed_limits.are_valid());
    }

    #[test]
    fn to_unicode_only_font_gets_identity_primary() {
        let mut doc = Document::with_version("1.7");
        let to_unicode = doc.add_object(Object::Stream(Stream::new(dictionary! {}, TO_UNICODE.to_vec())));
        let font = dictionary! {
            "Type" => "Font",
            "Subtype" => "Type3",
            "ToUnicode" => Object::Reference(to_unicode),
        };
        let opts = options();
        let factory = EncodingMapFactory::new(&doc, &opts);
        let maps = factory.font_encoding_maps(&font, None).unwrap().value;
        let primary = maps.encoding.unwrap();
        assert!(matches!(primary.as_ref(), EncodingMap::Identity(_)));
        assert_eq!(primary.limits().max_code_size, 2);
        assert_eq!(primary.kind(), EncodingMapKind::Indeterminate);
    }

    #[test]
    fn font_without_any_encoding_has_none() {
        let doc = Document::with_version("1.7");
        let font = dictionary! { "Type" => "Font", "Subtype" => "Type3" };
        let opts = options();
        let factory = EncodingMapFactory::new(&doc, &opts);
        let maps = factory.font_encoding_maps(&font, None).unwrap().value;
        assert!(maps.encoding.is_none());
        assert!(maps.to_unicode.is_none());
    }

    #[test]
    fn standard_14_font_uses_its_builtin_table() {
        let doc = Document::with_version("1.7");
        let font = dictionary! { "Type" => "Font", "Subtype" => "Type1", "BaseFont" => "Symbol" };
        let opts = options();
        let factory = EncodingMapFactory::new(&doc, &opts);
        let maps = factory.font_encoding_maps(&font, None).unwrap().value;
        let map = maps.encoding.unwrap();
        // alpha
        assert_eq!(cp(&map, 0x61, 1), Some(vec![0x03B1]));
    }

    #[test]
    fn first_and_last_char_set_parsed_limits() {
        let doc = Document::with_version("1.7");
        let font = dictionary! {
            "Type" => "Font",
            "Subtype" => "TrueType",
            "FirstChar" => Object::Integer(32),
            "LastChar" => Object::Integer(126),
            "Encoding" => "WinAnsiEncoding",
        };
        let limits = parsed_limits(&doc, &font);
        assert_eq!(limits.first_char.code, 32);
        assert_eq!(limits.last_char.code, 126);
        assert_eq!((limits.min_code_size, limits.max_code_size), (1, 1));

        let reversed = dictionary! { "FirstChar" => Object::Integer(126), "LastChar" => Object::Integer(32) };
        let limits = parsed_limits(&doc, &reversed);
        assert!(!limits.have_valid_code_size_range());
    }

    #[test]
    fn predefined_cjk_font_derives_to_unicode() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("Custom-RKSJ-H"),
            "/CIDSystemInfo << /Registry (Adobe) /Ordering (Japan1) /Supplement 6 >> def
/CMapName /Custom-RKSJ-H def
1 begincodespacerange <8140> <9FFC> endcodespacerange
1 begincidrange <8140> <8142> 633 endcidrange",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("Adobe-Japan1-UCS2"),
            "1 begincodespacerange <0000> <FFFF> endcodespacerange
1 beginbfrange <0279> <027B> <3000> endbfrange",
        )
        .unwrap();
        let registry = PredefinedRegistry::new();
        registry.add_resource_dir(dir.path());

        let doc = Document::with_version("1.7");
        let font = dictionary! { "Type" => "Font", "Subtype" => "Type0", "Encoding" => "Custom-RKSJ-H" };
        let opts = options();
        let factory = EncodingMapFactory::new(&doc, &opts).with_registry(&registry);
        let result = factory.font_encoding_maps(&font, None).unwrap();
        assert!(result.is_clean());
        let to_unicode = result.value.to_unicode.unwrap();
        assert_eq!(cp(&to_unicode, 0x8141, 2), Some(vec![0x3001]));
    }

    #[test]
    fn unknown_legacy_cmap_name_is_synthesized() {
        let registry = PredefinedRegistry::new();
        let doc = Document::with_version("1.7");
        let font = dictionary! { "Type" => "Font", "Subtype" => "Type0", "Encoding" => "UniGB-UCS2-H" };
        let opts = options();
        let factory = EncodingMapFactory::new(&doc, &opts).with_registry(&registry);
        let result = factory.font_encoding_maps(&font, None).unwrap();
        assert_eq!(result.warnings.len(), 1);
        let maps = result.value;
        assert_eq!(maps.encoding.unwrap().limits().max_code_size, 2);
        assert_eq!(cp(maps.to_unicode.as_ref().unwrap(), 0x4E2D, 2), Some(vec![0x4E2D]));
    }

    #[test]
    fn is_simple_one_byte_classifies_maps() {
        assert!(is_simple_one_byte(&shared_builtin_encoding(BuiltInEncodingKind::WinAnsi)));
        assert!(!is_simple_one_byte(&shared_identity_encoding(WritingMode::Horizontal)));
    }
}
