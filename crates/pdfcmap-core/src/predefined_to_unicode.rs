//! Two-stage ToUnicode for predefined CJK CMaps.
//!
//! A predefined CID CMap such as `90ms-RKSJ-H` maps codes to CIDs. Its
//! `Registry-Ordering-UCS2` companion (e.g. `Adobe-Japan1-UCS2`) maps CIDs to
//! Unicode. Chaining the two gives a code to Unicode map for fonts that come
//! without a `/ToUnicode` stream.

use std::sync::Arc;

use crate::char_code::CharCode;
use crate::code_point_span::CodePointSpan;
use crate::encoding_map::{EncodingMap, EncodingMapKind};
use crate::error::PdfError;

/// Code to Unicode through code to CID then CID to Unicode.
#[derive(Debug, Clone, PartialEq)]
pub struct PredefinedToUnicode {
    cid_map: Arc<EncodingMap>,
    cid_to_unicode: Arc<EncodingMap>,
}

impl PredefinedToUnicode {
    /// Chain `cid_map` (code to CID) with `cid_to_unicode` (CID to Unicode).
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::InvalidArgument`] if either map is not CID-keyed.
    pub fn new(cid_map: Arc<EncodingMap>, cid_to_unicode: Arc<EncodingMap>) -> Result<Self, PdfError> {
        if cid_map.kind() != EncodingMapKind::CMap || cid_to_unicode.kind() != EncodingMapKind::CMap {
            return Err(PdfError::InvalidArgument(
                "predefined ToUnicode stages must be CMap encodings".to_string(),
            ));
        }
        Ok(Self {
            cid_map,
            cid_to_unicode,
        })
    }

    /// The code to CID stage.
    pub fn cid_map(&self) -> &Arc<EncodingMap> {
        &self.cid_map
    }

    /// The CID to Unicode stage.
    pub fn cid_to_unicode(&self) -> &Arc<EncodingMap> {
        &self.cid_to_unicode
    }

    fn cid_code(&self, cid: u32) -> Option<CharCode> {
        let size = self.cid_to_unicode.limits().max_code_size;
        (1..=4).contains(&size).then(|| CharCode::with_size(cid, size))
    }

    /// Unicode of `code`. A known CID may be passed to skip the first stage.
    pub fn code_points(&self, code: CharCode, cid_hint: Option<u32>) -> Option<CodePointSpan> {
        let cid = match cid_hint {
            Some(cid) => cid,
            None => self.cid_map.try_get_cid_id(code)?,
        };
        self.cid_to_unicode.try_get_code_points(self.cid_code(cid)?, None)
    }

    /// The code whose CID maps to `cp`.
    pub fn char_code(&self, cp: u32) -> Option<CharCode> {
        let cid = self.cid_to_unicode.try_get_char_code(cp)?;
        self.cid_map.try_get_char_code(cid.code)
    }
}
