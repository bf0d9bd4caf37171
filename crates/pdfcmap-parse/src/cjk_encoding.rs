//! Legacy CJK code schemes behind the predefined CMap names.
//!
//! Predefined CMaps such as `GBK-EUC-H`, `ETen-B5-H` or `90ms-RKSJ-H` take
//! their codes from a legacy multi-byte character set, and the `Uni*` CMaps
//! take them from a Unicode encoding form. Knowing the scheme lets a code to
//! Unicode map be synthesized with `encoding_rs` when the
//! `Registry-Ordering-UCS2` CMap resource is not installed.

use encoding_rs::Encoding;
use pdfcmap_core::{CharCode, CharCodeMap, CidSystemInfo, PdfError};

/// How the codes of a predefined CMap are formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeScheme {
    /// A legacy multi-byte character set decoded by `encoding_rs`.
    Legacy(&'static Encoding),
    /// Raw two-byte JIS X 0208 codes (the `H` and `V` CMaps).
    Jis,
    /// Two-byte UCS-2.
    Ucs2,
    /// UTF-16BE, two or four bytes.
    Utf16,
    /// Four-byte UTF-32BE.
    Utf32,
}

fn strip_writing_mode(cmap_name: &str) -> &str {
    cmap_name
        .strip_suffix("-H")
        .or_else(|| cmap_name.strip_suffix("-V"))
        .unwrap_or(cmap_name)
}

/// Detect the `encoding_rs` encoding of a legacy predefined CMap name.
///
/// Returns `None` for Identity-H/V, the Unicode-based `Uni*` CMaps and
/// unknown names.
pub fn encoding_for_cmap(cmap_name: &str) -> Option<&'static Encoding> {
    match code_scheme_for_cmap(cmap_name)? {
        CodeScheme::Legacy(encoding) => Some(encoding),
        _ => None,
    }
}

/// Detect the code scheme of a predefined CMap name.
pub fn code_scheme_for_cmap(cmap_name: &str) -> Option<CodeScheme> {
    if matches!(cmap_name, "H" | "V") {
        return Some(CodeScheme::Jis);
    }
    let base = strip_writing_mode(cmap_name);
    if base.starts_with("Uni") {
        return if base.contains("UCS2") {
            Some(CodeScheme::Ucs2)
        } else if base.contains("UTF16") {
            Some(CodeScheme::Utf16)
        } else if base.contains("UTF32") {
            Some(CodeScheme::Utf32)
        } else {
            None
        };
    }

    let encoding = match base {
        // Chinese Simplified
        "GB-EUC" | "GBpc-EUC" | "GBT-EUC" | "GBTpc-EUC" | "GBK-EUC" | "GBKp-EUC" => encoding_rs::GBK,
        "GBK2K" => encoding_rs::GB18030,

        // Chinese Traditional
        "B5pc" | "ETen-B5" | "ETenms-B5" | "HKscs-B5" | "HKdla-B5" | "HKdlb-B5" | "HKgccs-B5"
        | "HKm314-B5" | "HKm471-B5" => encoding_rs::BIG5,

        // Japanese
        "90ms-RKSJ" | "90msp-RKSJ" | "90pv-RKSJ" | "83pv-RKSJ" | "78-RKSJ" | "78ms-RKSJ"
        | "Add-RKSJ" | "Ext-RKSJ" => encoding_rs::SHIFT_JIS,
        "EUC" | "78-EUC" => encoding_rs::EUC_JP,

        // Korean
        "KSC-EUC" | "KSCpc-EUC" | "KSCms-UHC" | "KSCms-UHC-HW" => encoding_rs::EUC_KR,

        _ => return None,
    };
    Some(CodeScheme::Legacy(encoding))
}

/// The Adobe character collection a predefined CMap name belongs to.
///
/// `Registry-Ordering-UCS2` names resolve to their own collection.
pub fn collection_for_cmap(cmap_name: &str) -> Option<CidSystemInfo> {
    if let Some(collection) = cmap_name.strip_suffix("-UCS2") {
        let (registry, ordering) = collection.split_once('-')?;
        return Some(CidSystemInfo::new(registry, ordering, 0));
    }
    let base = strip_writing_mode(cmap_name);
    let ordering = if base.starts_with("UniGB") {
        "GB1"
    } else if base.starts_with("UniCNS") {
        "CNS1"
    } else if base.starts_with("UniJIS") {
        "Japan1"
    } else if base.starts_with("UniKS") {
        "Korea1"
    } else {
        match code_scheme_for_cmap(cmap_name)? {
            CodeScheme::Jis => "Japan1",
            CodeScheme::Legacy(enc) if enc == encoding_rs::GBK || enc == encoding_rs::GB18030 => "GB1",
            CodeScheme::Legacy(enc) if enc == encoding_rs::BIG5 => "CNS1",
            CodeScheme::Legacy(enc) if enc == encoding_rs::SHIFT_JIS || enc == encoding_rs::EUC_JP => {
                "Japan1"
            }
            CodeScheme::Legacy(enc) if enc == encoding_rs::EUC_KR => "Korea1",
            _ => return None,
        }
    };
    Some(CidSystemInfo::new("Adobe", ordering, 0))
}

/// Check if a byte is a lead byte (first byte of a 2-byte sequence) for the given encoding.
pub fn is_lead_byte(byte: u8, encoding: &'static Encoding) -> bool {
    if encoding == encoding_rs::GBK || encoding == encoding_rs::GB18030 {
        (0x81..=0xFE).contains(&byte)
    } else if encoding == encoding_rs::BIG5 {
        (0x81..=0xFE).contains(&byte)
    } else if encoding == encoding_rs::SHIFT_JIS {
        (0x81..=0x9F).contains(&byte) || (0xE0..=0xFC).contains(&byte)
    } else if encoding == encoding_rs::EUC_JP {
        // 0x8E introduces half-width katakana
        (0xA1..=0xFE).contains(&byte) || byte == 0x8E
    } else if encoding == encoding_rs::EUC_KR {
        (0x81..=0xFE).contains(&byte)
    } else {
        false
    }
}

/// Decode the bytes of one code to a single Unicode scalar.
///
/// Returns `None` if the bytes are unmapped or decode to more than one scalar.
pub fn decode_code(bytes: &[u8], encoding: &'static Encoding) -> Option<char> {
    let decoded = encoding.decode_without_bom_handling_and_without_replacement(bytes)?;
    let mut chars = decoded.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

/// Build a direct code to Unicode map for the predefined CMap `cmap_name`.
///
/// Returns `Ok(None)` for names whose code scheme is unknown.
///
/// # Errors
///
/// Propagates [`PdfError`] from map construction.
pub fn synthesize_to_unicode(cmap_name: &str) -> Result<Option<CharCodeMap>, PdfError> {
    let Some(scheme) = code_scheme_for_cmap(cmap_name) else {
        return Ok(None);
    };
    let mut map = CharCodeMap::new();
    match scheme {
        CodeScheme::Legacy(encoding) => synthesize_legacy(&mut map, encoding)?,
        CodeScheme::Jis => {
            for hi in 0x21u8..=0x7E {
                for lo in 0x21u8..=0x7E {
                    if let Some(ch) = decode_code(&[hi | 0x80, lo | 0x80], encoding_rs::EUC_JP) {
                        let code = u32::from(hi) << 8 | u32::from(lo);
                        map.push_mapping(CharCode::with_size(code, 2), &[u32::from(ch)])?;
                    }
                }
            }
        }
        CodeScheme::Ucs2 => push_bmp(&mut map, 2)?,
        CodeScheme::Utf16 => {
            push_bmp(&mut map, 2)?;
            for high in 0xD800u32..=0xDBFF {
                let first = 0x10000 + ((high - 0xD800) << 10);
                map.push_range(CharCode::with_size(high << 16 | 0xDC00, 4), 0x400, &[first])?;
            }
        }
        CodeScheme::Utf32 => {
            map.push_range(CharCode::with_size(0, 4), 0xD800, &[0])?;
            map.push_range(CharCode::with_size(0xE000, 4), 0x11_0000 - 0xE000, &[0xE000])?;
        }
    }
    Ok(Some(map))
}

/// Every BMP scalar except the surrogates, as codes of `size` bytes.
fn push_bmp(map: &mut CharCodeMap, size: u8) -> Result<(), PdfError> {
    map.push_range(CharCode::with_size(0, size), 0xD800, &[0])?;
    map.push_range(CharCode::with_size(0xE000, size), 0x2000, &[0xE000])?;
    Ok(())
}

fn synthesize_legacy(map: &mut CharCodeMap, encoding: &'static Encoding) -> Result<(), PdfError> {
    for byte in 0u8..=0xFF {
        if is_lead_byte(byte, encoding) {
            for trail in 0x40u8..=0xFE {
                if let Some(ch) = decode_code(&[byte, trail], encoding) {
                    let code = u32::from(byte) << 8 | u32::from(trail);
                    map.push_mapping(CharCode::with_size(code, 2), &[u32::from(ch)])?;
                }
            }
        } else if let Some(ch) = decode_code(&[byte], encoding) {
            map.push_mapping(CharCode::with_size(u32::from(byte), 1), &[u32::from(ch)])?;
        }
    }
    Ok(())
}
