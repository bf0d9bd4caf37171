//! CMap program text emission.
//!
//! Writers for the blocks of the two CMap programs an encoding exports:
//! codespace ranges, `bfchar`/`bfrange` ToUnicode entries and
//! `cidchar`/`cidrange` CID entries, plus the fixed preamble and epilogue.
//! Mappings are written in code order so output is deterministic.

use std::fmt::Write;

use crate::char_code::CharCode;
use crate::char_code_map::CharCodeMap;
use crate::error::PdfError;
use crate::limits::{CodeSpaceRange, EncodingLimits, WritingMode};

/// Registry written into the `CIDSystemInfo` of authored CID CMaps.
pub const CMAP_REGISTRY_NAME: &str = "PdfCMap";

/// Write `N begincodespacerange ... endcodespacerange` for `ranges`.
pub fn write_code_space_ranges(out: &mut String, ranges: &[CodeSpaceRange]) -> Result<(), PdfError> {
    let _ = writeln!(out, "{} begincodespacerange", ranges.len());
    for (i, range) in ranges.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        range.src_code_lo().write_hex(out, true)?;
        range.src_code_hi().write_hex(out, true)?;
    }
    out.push_str("\nendcodespacerange\n");
    Ok(())
}

/// Write the single codespace range spanning `limits`.
pub fn write_limits_code_space(out: &mut String, limits: &EncodingLimits) -> Result<(), PdfError> {
    out.push_str("1 begincodespacerange\n");
    limits.first_char.write_hex(out, true)?;
    limits.last_char.write_hex(out, true)?;
    out.push_str("\nendcodespacerange\n");
    Ok(())
}

/// Write the codespace ranges derived from the codes of `map`.
pub fn write_map_code_space(out: &mut String, map: &CharCodeMap) -> Result<(), PdfError> {
    write_code_space_ranges(out, &map.get_code_space_ranges())
}

/// Write code points as a UTF-16BE hex string, e.g. `<0066 0069>`.
///
/// Each code point is a separate space-delimited group. Values that are not
/// Unicode scalars are written as U+FFFD.
pub fn write_utf16_hex(out: &mut String, code_points: &[u32]) {
    out.push('<');
    for (i, &cp) in code_points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let ch = char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER);
        let mut units = [0u16; 2];
        for unit in ch.encode_utf16(&mut units) {
            let _ = write!(out, "{unit:04X}");
        }
    }
    out.push('>');
}

/// Write the `bfchar`/`bfrange` blocks of `map`. Empty blocks are omitted.
pub fn write_to_unicode_entries(out: &mut String, map: &CharCodeMap) -> Result<(), PdfError> {
    if map.mapping_count() != 0 {
        let _ = writeln!(out, "{} beginbfchar", map.mapping_count());
        for (code, points) in map.mappings() {
            code.write_hex(out, true)?;
            out.push(' ');
            write_utf16_hex(out, points);
            out.push('\n');
        }
        out.push_str("endbfchar\n");
    }

    if map.range_count() != 0 {
        let _ = writeln!(out, "{} beginbfrange", map.range_count());
        for range in map.ranges() {
            range.src_code_lo.write_hex(out, true)?;
            range.src_code_hi().write_hex(out, true)?;
            out.push(' ');
            write_utf16_hex(out, &range.dst_code_lo);
            out.push('\n');
        }
        out.push_str("endbfrange\n");
    }
    Ok(())
}

/// Write one `<code> cid` line.
pub fn write_cid_mapping(out: &mut String, code: CharCode, cid: u32) -> Result<(), PdfError> {
    code.write_hex(out, true)?;
    let _ = writeln!(out, " {cid}");
    Ok(())
}

/// Write one `<lo><hi> cid` line.
pub fn write_cid_range(
    out: &mut String,
    src_code_lo: CharCode,
    src_code_hi: CharCode,
    dst_cid_lo: u32,
) -> Result<(), PdfError> {
    src_code_lo.write_hex(out, true)?;
    src_code_hi.write_hex(out, true)?;
    let _ = writeln!(out, " {dst_cid_lo}");
    Ok(())
}

/// Write a `begincidchar` block for explicit `(code, cid)` pairs.
pub fn write_cid_chars(out: &mut String, entries: &[(CharCode, u32)]) -> Result<(), PdfError> {
    let _ = writeln!(out, "{} begincidchar", entries.len());
    for (code, cid) in entries {
        write_cid_mapping(out, *code, *cid)?;
    }
    out.push_str("endcidchar\n");
    Ok(())
}

/// Write the `cidchar`/`cidrange` blocks of a map whose targets are CIDs.
///
/// Only the first value of each destination is used.
pub fn write_cid_mapping_entries(out: &mut String, map: &CharCodeMap) -> Result<(), PdfError> {
    if map.mapping_count() != 0 {
        let _ = writeln!(out, "{} begincidchar", map.mapping_count());
        for (code, points) in map.mappings() {
            write_cid_mapping(out, *code, points.first().unwrap_or(0))?;
        }
        out.push_str("endcidchar\n");
    }

    if map.range_count() != 0 {
        let _ = writeln!(out, "{} begincidrange", map.range_count());
        for range in map.ranges() {
            write_cid_range(
                out,
                range.src_code_lo,
                range.src_code_hi(),
                range.dst_code_lo.first().unwrap_or(0),
            )?;
        }
        out.push_str("endcidrange\n");
    }
    Ok(())
}

/// Write the ToUnicode entries of a one-byte encoding described by `lookup`.
///
/// Codes from `limits.first_char` to `limits.last_char` without a mapping are
/// skipped.
pub fn write_one_byte_to_unicode(
    out: &mut String,
    limits: &EncodingLimits,
    lookup: impl Fn(CharCode) -> Option<Vec<u32>>,
) -> Result<(), PdfError> {
    if limits.max_code_size != 1 {
        return Err(PdfError::InvalidArgument(
            "one-byte ToUnicode entries need a one-byte encoding".to_string(),
        ));
    }
    let entries: Vec<(CharCode, Vec<u32>)> = (limits.first_char.code..=limits.last_char.code)
        .filter_map(|code| {
            let code = CharCode::with_size(code, 1);
            lookup(code).map(|cps| (code, cps))
        })
        .collect();

    let _ = writeln!(out, "{} beginbfchar", entries.len());
    for (code, cps) in &entries {
        code.write_hex(out, true)?;
        out.push(' ');
        write_utf16_hex(out, cps);
        out.push('\n');
    }
    out.push_str("endbfchar\n");
    Ok(())
}

/// Write the header of an authored CID-keyed CMap program (`/CMapType 1`).
pub fn write_cid_cmap_preamble(out: &mut String, ordering: &str, cmap_name: &str, wmode: WritingMode) {
    let _ = write!(
        out,
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo <<\n   \
         /Registry ({CMAP_REGISTRY_NAME})\n   \
         /Ordering ({ordering})\n   \
         /Supplement 0\n\
         >> def\n\
         /CMapName /{cmap_name} def\n\
         /CMapType 1 def\n"
    );
    if wmode != WritingMode::Horizontal {
        let _ = writeln!(out, "/WMode {} def", wmode.as_raw());
    }
}

/// Write the header of a ToUnicode CMap program (`/CMapType 2`).
pub fn write_to_unicode_preamble(out: &mut String) {
    out.push_str(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo <<\n   \
         /Registry (Adobe)\n   \
         /Ordering (UCS)\n   \
         /Supplement 0\n\
         >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n",
    );
}

/// Write the fixed trailer closing a CMap program.
pub fn write_cmap_epilogue(out: &mut String) {
    out.push_str(
        "endcmap\n\
         CMapName currentdict /CMap defineresource pop\n\
         end\n\
         end",
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(code: u32, size: u8) -> CharCode {
        CharCode::with_size(code, size)
    }

    // --- UTF-16 ---

    #[test]
    fn utf16_hex_groups_code_points() {
        let mut out = String::new();
        write_utf16_hex(&mut out, &[0x66, 0x69]);
        assert_eq!(out, "<0066 0069>");
    }

    #[test]
    fn utf16_hex_uses_surrogates() {
        let mut out = String::new();
        write_utf16_hex(&mut out, &[0x1F600]);
        assert_eq!(out, "<D83DDE00>");
        out.clear();
        write_utf16_hex(&mut out, &[0xD800]);
        assert_eq!(out, "<FFFD>");
    }

    // --- blocks ---

    #[test]
    fn code_space_block_layout() {
        let mut out = String::new();
        write_code_space_ranges(
            &mut out,
            &[CodeSpaceRange::new(0, 0x80, 1), CodeSpaceRange::new(0x8140, 0x9FFC, 2)],
        )
        .unwrap();
        assert_eq!(
            out,
            "2 begincodespacerange\n<00><80>\n<8140><9FFC>\nendcodespacerange\n"
        );
    }

    #[test]
    fn limits_code_space_block() {
        let mut out = String::new();
        write_limits_code_space(&mut out, &EncodingLimits::one_byte()).unwrap();
        assert_eq!(out, "1 begincodespacerange\n<00><FF>\nendcodespacerange\n");
    }

    #[test]
    fn to_unicode_blocks() {
        let mut map = CharCodeMap::new();
        map.push_mapping(c(2, 1), &[0x66, 0x69]).unwrap();
        map.push_mapping(c(1, 1), &[0x41]).unwrap();
        map.push_range(c(0x10, 1), 4, &[0x61]).unwrap();
        let mut out = String::new();
        write_to_unicode_entries(&mut out, &map).unwrap();
        assert_eq!(
            out,
            "2 beginbfchar\n<01> <0041>\n<02> <0066 0069>\nendbfchar\n\
             1 beginbfrange\n<10><13> <0061>\nendbfrange\n"
        );
    }

    #[test]
    fn cid_blocks() {
        let mut map = CharCodeMap::new();
        map.push_mapping(c(0x20, 2), &[5]).unwrap();
        map.push_range(c(0x100, 2), 0x10, &[300]).unwrap();
        let mut out = String::new();
        write_cid_mapping_entries(&mut out, &map).unwrap();
        assert_eq!(
            out,
            "1 begincidchar\n<0020> 5\nendcidchar\n\
             1 begincidrange\n<0100><010F> 300\nendcidrange\n"
        );
    }

    #[test]
    fn empty_map_writes_nothing() {
        let mut out = String::new();
        write_to_unicode_entries(&mut out, &CharCodeMap::new()).unwrap();
        write_cid_mapping_entries(&mut out, &CharCodeMap::new()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn one_byte_to_unicode_skips_undefined() {
        let limits = EncodingLimits::new(1, 1, c(0x41, 1), c(0x43, 1));
        let mut out = String::new();
        write_one_byte_to_unicode(&mut out, &limits, |code| {
            (code.code != 0x42).then(|| vec![code.code])
        })
        .unwrap();
        assert_eq!(out, "2 beginbfchar\n<41> <0041>\n<43> <0043>\nendbfchar\n");
    }

    #[test]
    fn one_byte_to_unicode_rejects_wide_limits() {
        let limits = EncodingLimits::new(2, 2, c(0, 2), c(0xFFFF, 2));
        let err = write_one_byte_to_unicode(&mut String::new(), &limits, |_| None).unwrap_err();
        assert!(matches!(err, PdfError::InvalidArgument(_)));
    }

    // --- preamble/epilogue ---

    #[test]
    fn cid_preamble_writes_wmode_once() {
        let mut out = String::new();
        write_cid_cmap_preamble(&mut out, "Font", "Font-subset", WritingMode::Vertical);
        assert!(out.contains("/Registry (PdfCMap)\n"));
        assert!(out.contains("/CMapName /Font-subset def\n/CMapType 1 def\n"));
        assert_eq!(out.matches("/WMode 1 def").count(), 1);

        out.clear();
        write_cid_cmap_preamble(&mut out, "Font", "Font", WritingMode::Horizontal);
        assert!(!out.contains("/WMode"));
    }

    #[test]
    fn to_unicode_preamble_and_epilogue() {
        let mut out = String::new();
        write_to_unicode_preamble(&mut out);
        write_cmap_epilogue(&mut out);
        assert!(out.starts_with("/CIDInit /ProcSet findresource begin\n12 dict begin\nbegincmap\n"));
        assert!(out.contains("/CMapType 2 def\nendcmap\n"));
        assert!(out.ends_with("end\nend"));
    }
}
