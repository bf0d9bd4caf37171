//! Normalization of decoded text.
//!
//! ToUnicode maps from different producers spell the same text differently:
//! one writes `é` as U+00E9, another as `e` + U+0301, a third maps a ligature
//! glyph to U+FB01 instead of `fi`. [`UnicodeNorm`] folds such output into
//! one of the standard forms.

use std::borrow::Cow;

use unicode_normalization::{
    IsNormalized, UnicodeNormalization, is_nfc_quick, is_nfd_quick, is_nfkc_quick, is_nfkd_quick,
};

/// Normalization form applied by `PdfEncoding::convert_to_utf8_with`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnicodeNorm {
    /// Keep the code points the map produced.
    #[default]
    None,
    /// NFC: composed characters.
    Nfc,
    /// NFD: decomposed characters.
    Nfd,
    /// NFKC: compatibility characters such as ligatures folded, then composed.
    Nfkc,
    /// NFKD: compatibility characters folded, then decomposed.
    Nfkd,
}

impl UnicodeNorm {
    /// `text` in this form. Borrows when `text` already is.
    pub fn normalize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.is_normalized(text) {
            return Cow::Borrowed(text);
        }
        match self {
            UnicodeNorm::None => Cow::Borrowed(text),
            UnicodeNorm::Nfc => Cow::Owned(text.nfc().collect()),
            UnicodeNorm::Nfd => Cow::Owned(text.nfd().collect()),
            UnicodeNorm::Nfkc => Cow::Owned(text.nfkc().collect()),
            UnicodeNorm::Nfkd => Cow::Owned(text.nfkd().collect()),
        }
    }

    /// Normalize `text` in place.
    pub fn normalize_in_place(&self, text: &mut String) {
        let normalized = match self.normalize(text) {
            Cow::Owned(normalized) => normalized,
            Cow::Borrowed(_) => return,
        };
        *text = normalized;
    }

    /// Quick check: true only if `text` is known to be in this form.
    fn is_normalized(&self, text: &str) -> bool {
        let quick = match self {
            UnicodeNorm::None => return true,
            UnicodeNorm::Nfc => is_nfc_quick(text.chars()),
            UnicodeNorm::Nfd => is_nfd_quick(text.chars()),
            UnicodeNorm::Nfkc => is_nfkc_quick(text.chars()),
            UnicodeNorm::Nfkd => is_nfkd_quick(text.chars()),
        };
        quick == IsNormalized::Yes
    }
}
