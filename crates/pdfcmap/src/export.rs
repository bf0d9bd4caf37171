//! Writing an encoding back into a PDF.
//!
//! [`PdfEncoding::write_cid_cmap`] and [`PdfEncoding::write_to_unicode_cmap`]
//! produce the text of the two CMap programs a font can carry;
//! [`export_to_dictionary`] stores them, or a shorter named form, in the
//! `/Encoding` and `/ToUnicode` entries of a [`lopdf`] font dictionary.

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use pdfcmap_core::cmap_writer::{
    CMAP_REGISTRY_NAME, write_cid_chars, write_cid_cmap_preamble, write_cmap_epilogue,
    write_code_space_ranges, write_map_code_space, write_to_unicode_entries,
    write_to_unicode_preamble,
};
use pdfcmap_core::{
    CharCodeMap, CidSystemInfo, ExportObject, FontProgram, PdfError, WritingMode, fss_utf_ranges,
};
use pdfcmap_parse::BackendError;

use crate::encoding::PdfEncoding;

/// Suffix of the CMap name of a subset font.
const SUBSET_CMAP_SUFFIX: &str = "-subset";

impl PdfEncoding {
    /// How the primary map is referenced from the font dictionary.
    ///
    /// `Ok(None)` means an explicit CMap stream is required. Subset fonts
    /// always need one, even when the primary map has a name.
    ///
    /// # Errors
    ///
    /// Fails for the null encoding.
    pub fn export_object(&self) -> Result<Option<ExportObject>, PdfError> {
        let object = self.encoding_map().try_get_export_object()?;
        if self.is_subsetting() {
            return Ok(None);
        }
        Ok(object)
    }

    /// The CID-keyed CMap program (`/CMapType 1`) of this encoding.
    ///
    /// `font_name` becomes the `Ordering` of the program's CIDSystemInfo and
    /// its CMap name. Subset fonts list only the used glyphs.
    ///
    /// # Errors
    ///
    /// Fails for the null encoding, for maps without a code space, and for
    /// simple encodings without a font program to resolve glyphs.
    pub fn write_cid_cmap(&self, font_name: &str) -> Result<String, PdfError> {
        let map = self.encoding_map();
        map.ensure_bound()?;

        let mut out = String::new();
        let cmap_name = cid_cmap_name(self, font_name);
        write_cid_cmap_preamble(&mut out, font_name, &cmap_name, self.writing_mode());

        match self.subset_glyphs() {
            Some(subset) => {
                if self.is_dynamic() {
                    let mut ranges = Vec::new();
                    for size in subset.code_sizes() {
                        ranges.extend(fss_utf_ranges(size)?);
                    }
                    write_code_space_ranges(&mut out, &ranges)?;
                } else {
                    let mut units = CharCodeMap::new();
                    for glyph in subset.iter() {
                        units.push_mapping(glyph.cid.unit, &[glyph.cid.id])?;
                    }
                    write_map_code_space(&mut out, &units)?;
                }
                let mut entries: Vec<_> =
                    subset.iter().map(|glyph| (glyph.cid.unit, glyph.cid.id)).collect();
                entries.sort_by_key(|(unit, _)| *unit);
                write_cid_chars(&mut out, &entries)?;
            }
            None => {
                map.append_code_space_range(&mut out)?;
                let font = self.font_program().map(|font| font.as_ref() as &dyn FontProgram);
                map.append_cid_mapping_entries(&mut out, font)?;
            }
        }

        write_cmap_epilogue(&mut out);
        Ok(out)
    }

    /// The ToUnicode CMap program (`/CMapType 2`) of this encoding.
    ///
    /// Subset fonts list only the codes of the used glyphs.
    ///
    /// # Errors
    ///
    /// Fails when no map can produce Unicode, see
    /// [`to_unicode_map_safe`](PdfEncoding::to_unicode_map_safe).
    pub fn write_to_unicode_cmap(&self) -> Result<String, PdfError> {
        let map = self
            .to_unicode_map_safe()
            .ok_or_else(|| PdfError::EncodingError("No valid /ToUnicode map present".to_string()))?;
        map.ensure_bound()?;

        let mut out = String::new();
        write_to_unicode_preamble(&mut out);
        match self.subset_glyphs() {
            Some(subset) => {
                let mut used = CharCodeMap::new();
                for glyph in subset.iter() {
                    used.push_span(glyph.cid.unit, glyph.code_points.clone())?;
                }
                write_map_code_space(&mut out, &used)?;
                write_to_unicode_entries(&mut out, &used)?;
            }
            None => {
                map.append_code_space_range(&mut out)?;
                map.append_to_unicode_entries(&mut out)?;
            }
        }
        write_cmap_epilogue(&mut out);
        Ok(out)
    }
}

fn cid_cmap_name(encoding: &PdfEncoding, font_name: &str) -> String {
    if encoding.is_subsetting() {
        format!("{font_name}{SUBSET_CMAP_SUFFIX}")
    } else {
        font_name.to_string()
    }
}

fn lopdf_error(err: lopdf::Error) -> PdfError {
    BackendError::from(err).into()
}

/// Write `encoding` into the font dictionary `font_id` of `doc`.
///
/// For Type0 fonts (those with `/DescendantFonts`) the CIDSystemInfo of the
/// descendant is set and `/Encoding` becomes a predefined name or a new CMap
/// stream. For simple fonts `/Encoding` becomes a name or an encoding
/// dictionary with `/Differences`, and is removed when the font program's
/// own encoding applies. A new `/ToUnicode` stream is added whenever the
/// encoding can produce Unicode.
///
/// # Errors
///
/// Fails if `font_id` is not a dictionary, for the null encoding, and for
/// simple fonts whose encoding has no dictionary form.
pub fn export_to_dictionary(
    encoding: &PdfEncoding,
    doc: &mut Document,
    font_id: ObjectId,
) -> Result<(), PdfError> {
    let font = doc.get_dictionary(font_id).map_err(lopdf_error)?;
    let font_name = font
        .get(b"BaseFont")
        .and_then(Object::as_name)
        .map(|name| String::from_utf8_lossy(name).into_owned())
        .unwrap_or_else(|_| "Font".to_string());
    let descendant = descendant_id(doc, font);

    let encoding_entry = match descendant {
        Some(descendant) => {
            let export = encoding.export_object()?;
            let info = match (&export, encoding.encoding_map().cid_system_info()) {
                (Some(ExportObject::Name(_)), Some(info)) => info.clone(),
                _ => CidSystemInfo::new(CMAP_REGISTRY_NAME, font_name.as_str(), 0),
            };
            doc.get_object_mut(descendant)
                .and_then(Object::as_dict_mut)
                .map_err(lopdf_error)?
                .set("CIDSystemInfo", cid_system_info_dict(&info));

            match export {
                Some(ExportObject::Name(name)) => Some(Object::Name(name.into_bytes())),
                _ => {
                    let stream = cid_cmap_stream(encoding, &font_name, &info)?;
                    Some(Object::Reference(doc.add_object(stream)))
                }
            }
        }
        None => match encoding.encoding_map().try_get_export_object()? {
            Some(ExportObject::Name(name)) => Some(Object::Name(name.into_bytes())),
            Some(ExportObject::Differences { base, differences }) => {
                Some(Object::Dictionary(differences_dict(base, &differences)))
            }
            Some(ExportObject::Implicit) => None,
            None => {
                return Err(PdfError::EncodingError(
                    "The encoding of a simple font must have a name or a /Differences form"
                        .to_string(),
                ));
            }
        },
    };

    let to_unicode = match encoding.to_unicode_map_safe() {
        Some(_) => {
            let content = encoding.write_to_unicode_cmap()?;
            Some(doc.add_object(Stream::new(Dictionary::new(), content.into_bytes())))
        }
        None => None,
    };

    let font = doc
        .get_object_mut(font_id)
        .and_then(Object::as_dict_mut)
        .map_err(lopdf_error)?;
    match encoding_entry {
        Some(entry) => font.set("Encoding", entry),
        None => {
            font.remove(b"Encoding");
        }
    }
    if let Some(id) = to_unicode {
        font.set("ToUnicode", Object::Reference(id));
    }
    Ok(())
}

fn descendant_id(doc: &Document, font: &Dictionary) -> Option<ObjectId> {
    let fonts = match font.get(b"DescendantFonts").ok()? {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        obj => obj,
    };
    fonts.as_array().ok()?.first()?.as_reference().ok()
}

fn cid_system_info_dict(info: &CidSystemInfo) -> Dictionary {
    let mut dict = Dictionary::new();
    dict.set("Registry", Object::string_literal(info.registry.as_str()));
    dict.set("Ordering", Object::string_literal(info.ordering.as_str()));
    dict.set("Supplement", Object::Integer(i64::from(info.supplement)));
    dict
}

fn cid_cmap_stream(
    encoding: &PdfEncoding,
    font_name: &str,
    info: &CidSystemInfo,
) -> Result<Stream, PdfError> {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"CMap".to_vec()));
    dict.set("CMapName", Object::Name(cid_cmap_name(encoding, font_name).into_bytes()));
    dict.set("CIDSystemInfo", cid_system_info_dict(info));
    if encoding.writing_mode() == WritingMode::Vertical {
        dict.set("WMode", Object::Integer(1));
    }
    let content = encoding.write_cid_cmap(font_name)?;
    Ok(Stream::new(dict, content.into_bytes()))
}

/// An `/Encoding` dictionary; consecutive codes share one run of names.
fn differences_dict(base: Option<String>, differences: &[(u8, String)]) -> Dictionary {
    let mut array = Vec::new();
    let mut next_code = None;
    for (code, name) in differences {
        if next_code != Some(u16::from(*code)) {
            array.push(Object::Integer(i64::from(*code)));
        }
        array.push(Object::Name(name.clone().into_bytes()));
        next_code = Some(u16::from(*code) + 1);
    }

    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"Encoding".to_vec()));
    if let Some(base) = base {
        dict.set("BaseEncoding", Object::Name(base.into_bytes()));
    }
    dict.set("Differences", Object::Array(array));
    dict
}
