//! Building [`PdfEncoding`]s from font dictionaries.

use lopdf::{Dictionary, Document, ObjectId};
use pdfcmap_core::{
    EncodingOptions, EncodingResult, EncodingWarning, EncodingWarningCode, FontProgram, PdfError,
};
use pdfcmap_parse::{EncodingMapFactory, FontEncodingMaps, PredefinedRegistry, registry, report_warning};

use crate::encoding::{PdfEncoding, SharedFontProgram};

/// Reads the encoding of fonts in one document.
///
/// # Example
///
/// ```ignore
/// let factory = EncodingFactory::new(&doc, EncodingOptions::default());
/// let encoding = factory.encoding_for_font_id(font_id, None)?.value;
/// let text = encoding.convert_to_utf8(&encoded_string);
/// ```
pub struct EncodingFactory<'a> {
    doc: &'a Document,
    options: EncodingOptions,
    registry: &'a PredefinedRegistry,
}

impl<'a> EncodingFactory<'a> {
    /// A factory resolving predefined CMaps through the process-wide registry.
    pub fn new(doc: &'a Document, options: EncodingOptions) -> Self {
        Self {
            doc,
            options,
            registry: registry(),
        }
    }

    /// Resolve predefined CMaps through `registry` instead.
    pub fn with_registry(mut self, registry: &'a PredefinedRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// The options in effect.
    pub fn options(&self) -> &EncodingOptions {
        &self.options
    }

    /// The encoding of the font dictionary `font`.
    ///
    /// `program` is the embedded font program when the caller extracted one;
    /// it supplies the implicit encoding of fonts without `/Encoding` and is
    /// bound to the result for glyph lookups. A font with neither a usable
    /// `/Encoding` nor a `/ToUnicode` map yields the null encoding and a
    /// warning, so decoding still falls back to raw code values.
    ///
    /// # Errors
    ///
    /// Fails on malformed embedded CMaps and, in strict mode, on any
    /// recoverable problem.
    pub fn encoding_for_font(
        &self,
        font: &Dictionary,
        program: Option<SharedFontProgram>,
    ) -> Result<EncodingResult<PdfEncoding>, PdfError> {
        let factory = EncodingMapFactory::new(self.doc, &self.options).with_registry(self.registry);
        let EncodingResult {
            value: maps,
            mut warnings,
        } = factory.font_encoding_maps(font, program.as_deref().map(|p| p as &dyn FontProgram))?;

        let FontEncodingMaps {
            encoding,
            to_unicode,
            parsed_limits,
            cid_to_gid,
        } = maps;

        let mut ret = match encoding {
            Some(encoding) => PdfEncoding::from_parsed(parsed_limits, encoding, to_unicode)?,
            None => {
                let warning = EncodingWarning::with_code(
                    EncodingWarningCode::Other("NO_ENCODING".to_string()),
                    "font has no usable /Encoding or /ToUnicode entry",
                );
                report_warning(&self.options, &mut warnings, warning)?;
                PdfEncoding::default()
            }
        };
        if let Some(map) = cid_to_gid {
            ret = ret.with_cid_to_gid(map);
        }
        if let Some(program) = program {
            ret = ret.with_font_program(program);
        }

        debug_event!(
            id = ret.id(),
            kind = ?ret.encoding_map().kind(),
            warnings = warnings.len(),
            "font encoding loaded"
        );
        Ok(EncodingResult::with_warnings(ret, warnings))
    }

    /// The encoding of the font dictionary stored as object `font_id`.
    ///
    /// # Errors
    ///
    /// Fails if `font_id` is missing or not a dictionary, and as
    /// [`encoding_for_font`](Self::encoding_for_font) does.
    pub fn encoding_for_font_id(
        &self,
        font_id: ObjectId,
        program: Option<SharedFontProgram>,
    ) -> Result<EncodingResult<PdfEncoding>, PdfError> {
        let font = self
            .doc
            .get_dictionary(font_id)
            .map_err(|e| PdfError::ParseError(format!("font {font_id:?}: {e}")))?;
        self.encoding_for_font(font, program)
    }
}

/// The encoding of `font` with default options and the global registry.
///
/// # Errors
///
/// See [`EncodingFactory::encoding_for_font`].
pub fn encoding_for_font(
    doc: &Document,
    font: &Dictionary,
    program: Option<SharedFontProgram>,
) -> Result<EncodingResult<PdfEncoding>, PdfError> {
    EncodingFactory::new(doc, EncodingOptions::default()).encoding_for_font(font, program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use lopdf::{Object, Stream, dictionary};
    use pdfcmap_core::{CharCode, EncodingMapKind, FontProgramKind, GlyphTable};

    const TO_UNICODE: &str = "/CIDInit /ProcSet findresource begin\n\
        12 dict begin\nbegincmap\n\
        1 begincodespacerange <0000> <FFFF> endcodespacerange\n\
        2 beginbfchar\n<0003> <0020>\n<0024> <0041>\nendbfchar\n\
        1 beginbfrange\n<0044> <0046> <0061>\nendbfrange\n\
        endcmap\nend\nend";

    fn type0_font(doc: &mut Document) -> ObjectId {
        let to_unicode = doc.add_object(Stream::new(dictionary! {}, TO_UNICODE.as_bytes().to_vec()));
        let descendant = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "CIDFontType2",
            "BaseFont" => "Demo",
            "CIDToGIDMap" => "Identity",
        });
        doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => "Demo",
            "Encoding" => "Identity-H",
            "DescendantFonts" => vec![Object::Reference(descendant)],
            "ToUnicode" => Object::Reference(to_unicode),
        })
    }

    // --- loading ---

    #[test]
    fn type0_font_with_to_unicode() {
        let mut doc = Document::with_version("1.7");
        let font = type0_font(&mut doc);
        let result = EncodingFactory::new(&doc, EncodingOptions::default())
            .encoding_for_font_id(font, None)
            .unwrap();
        assert!(result.is_clean());

        let encoding = result.value;
        assert!(encoding.is_object_loaded());
        assert!(encoding.has_cid_mapping());
        let text = encoding.convert_to_utf8(&[0x00, 0x24, 0x00, 0x03, 0x00, 0x45]);
        assert!(text.success);
        assert_eq!(text.value, "A b");
        assert_eq!(encoding.try_get_cid_id(CharCode::with_size(0x24, 2)), Some(0x24));
        assert_eq!(encoding.try_map_cid_to_gid(0x24), Some(0x24));
    }

    #[test]
    fn simple_font_binds_program() {
        let doc = Document::with_version("1.7");
        let font = dictionary! {
            "Type" => "Font",
            "Subtype" => "TrueType",
            "Encoding" => "WinAnsiEncoding",
            "FirstChar" => Object::Integer(32),
            "LastChar" => Object::Integer(126),
        };
        let program: SharedFontProgram =
            Arc::new(GlyphTable::new(FontProgramKind::TrueType).with_text("AB", 36));
        let encoding = encoding_for_font(&doc, &font, Some(program)).unwrap().value;
        assert!(encoding.font_program().is_some());
        assert_eq!(encoding.first_char().unwrap().code, 32);
        assert_eq!(encoding.try_map_cid_to_gid(0x41), Some(36));
        assert_eq!(encoding.convert_to_utf8(b"AB").value, "AB");
    }

    #[test]
    fn font_without_encoding_warns() {
        let doc = Document::with_version("1.7");
        let font = dictionary! { "Type" => "Font", "Subtype" => "Type3" };
        let result = encoding_for_font(&doc, &font, None).unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code.as_str(), "OTHER");
        assert!(result.value.is_null());
        assert_eq!(result.value.convert_to_utf8(b"Hi").value, "Hi");
    }

    #[test]
    fn font_without_encoding_fails_strict() {
        let doc = Document::with_version("1.7");
        let font = dictionary! { "Type" => "Font", "Subtype" => "Type3" };
        let err = EncodingFactory::new(&doc, EncodingOptions::strict())
            .encoding_for_font(&font, None)
            .unwrap_err();
        assert!(err.to_string().contains("font has no usable /Encoding"));
    }

    #[test]
    fn standard_font_gets_standard_encoding() {
        let doc = Document::with_version("1.7");
        let font = dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        };
        let encoding = encoding_for_font(&doc, &font, None).unwrap().value;
        assert_eq!(encoding.encoding_map().kind(), EncodingMapKind::Simple);
        assert_eq!(encoding.convert_to_utf8(b"\x60").value, "\u{2018}");
    }

    #[test]
    fn missing_font_object_is_an_error() {
        let doc = Document::with_version("1.7");
        let factory = EncodingFactory::new(&doc, EncodingOptions::default());
        assert!(factory.encoding_for_font_id((99, 0), None).is_err());
    }
}
