//! Prefix-free variable-length code arithmetic.
//!
//! Dynamic encodings mint codes by running a counter through the FSS-UTF
//! scheme, the early name of UTF-8's byte layout. The result is a set of
//! codes where no code is a byte prefix of another, so a reader that only
//! knows the codespace ranges can always find code boundaries.

use crate::char_code::CharCode;
use crate::error::PdfError;
use crate::limits::CodeSpaceRange;

/// Largest value [`fss_utf_encode`] accepts.
pub const FSS_UTF_MAX: u32 = 0x10_FFFF;

/// Encode `value` with the UTF-8 byte layout, packed big-endian into a `u32`.
///
/// # Errors
///
/// Returns [`PdfError::ValueOutOfRange`] for values above `0x10FFFF`.
pub fn fss_utf_encode(value: u32) -> Result<u32, PdfError> {
    let packed = match value {
        0..=0x7F => value,
        0x80..=0x7FF => ((0xC0 | (value >> 6)) << 8) | (0x80 | (value & 0x3F)),
        0x800..=0xFFFF => {
            ((0xE0 | (value >> 12)) << 16)
                | ((0x80 | ((value >> 6) & 0x3F)) << 8)
                | (0x80 | (value & 0x3F))
        }
        0x1_0000..=FSS_UTF_MAX => {
            ((0xF0 | (value >> 18)) << 24)
                | ((0x80 | ((value >> 12) & 0x3F)) << 16)
                | ((0x80 | ((value >> 6) & 0x3F)) << 8)
                | (0x80 | (value & 0x3F))
        }
        _ => {
            return Err(PdfError::ValueOutOfRange(format!(
                "code {value:#X} larger than maximum encodable {FSS_UTF_MAX:#X}"
            )));
        }
    };
    Ok(packed)
}

/// Encode `value` as a [`CharCode`] whose byte length is the encoded length.
pub fn fss_utf_char_code(value: u32) -> Result<CharCode, PdfError> {
    fss_utf_encode(value).map(CharCode::new)
}

/// The codespace ranges covering every valid encoded code of `code_size` bytes.
///
/// # Errors
///
/// Returns [`PdfError::ValueOutOfRange`] if `code_size` is not in `1..=4`.
pub fn fss_utf_ranges(code_size: u8) -> Result<Vec<CodeSpaceRange>, PdfError> {
    let pairs: &[(u32, u32)] = match code_size {
        1 => &[(0x00, 0x7F)],
        2 => &[(0xC280, 0xDFBF)],
        3 => &[(0xE0_A080, 0xE0_BFBF), (0xE1_8080, 0xEF_BFBF)],
        4 => &[
            (0xF090_8080, 0xF0BF_BFBF),
            (0xF180_8080, 0xF3BF_BFBF),
            (0xF480_8080, 0xF48F_BFBF),
        ],
        _ => {
            return Err(PdfError::ValueOutOfRange(format!(
                "code size {code_size} larger than maximum supported 4"
            )));
        }
    };
    Ok(pairs
        .iter()
        .map(|&(lo, hi)| CodeSpaceRange::new(lo, hi, code_size))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_byte_values_are_identity() {
        assert_eq!(fss_utf_encode(0).unwrap(), 0);
        assert_eq!(fss_utf_encode(0x7F).unwrap(), 0x7F);
        assert_eq!(fss_utf_char_code(1).unwrap(), CharCode::with_size(1, 1));
    }

    #[test]
    fn multi_byte_values_match_utf8() {
        for value in [0x80u32, 0x7FF, 0x800, 0xFFFF, 0x1_0000, 0x10_FFFF, 300] {
            let Some(ch) = char::from_u32(value) else {
                continue;
            };
            let mut buf = [0u8; 4];
            let utf8 = ch.encode_utf8(&mut buf).as_bytes();
            let code = fss_utf_char_code(value).unwrap();
            assert_eq!(code.to_bytes(), utf8, "value {value:#X}");
        }
    }

    #[test]
    fn rejects_values_past_unicode() {
        let err = fss_utf_encode(0x11_0000).unwrap_err();
        assert_eq!(
            err.to_string(),
            "value out of range: code 0x110000 larger than maximum encodable 0x10FFFF"
        );
    }

    #[test]
    fn ranges_cover_encoded_codes() {
        for value in [0u32, 0x7F, 0x80, 0x7FF, 0x800, 0xFFFF, 0x1_0000, 0x10_FFFF] {
            let code = fss_utf_char_code(value).unwrap();
            let ranges = fss_utf_ranges(code.code_space_size).unwrap();
            assert!(
                ranges.iter().any(|r| r.contains(code)),
                "{code} not covered"
            );
        }
    }

    #[test]
    fn ranges_reject_invalid_size() {
        assert!(fss_utf_ranges(0).is_err());
        assert_eq!(
            fss_utf_ranges(5).unwrap_err().to_string(),
            "value out of range: code size 5 larger than maximum supported 4"
        );
        assert_eq!(fss_utf_ranges(3).unwrap().len(), 2);
    }
}
