//! Incremental decoding of encoded strings, one code unit at a time.

use pdfcmap_core::{CharCode, Cid, CodePointSpan};

use crate::encoding::PdfEncoding;

/// Position of a [`StringScanContext`] in its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// No unit was read yet.
    NotStarted,
    /// At least one unit was read and input remains.
    Scanning,
    /// The whole input was consumed.
    Exhausted,
}

/// One code unit read by [`StringScanContext::try_scan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedUnit {
    /// The CID of the unit, with the code it was read from.
    pub cid: Cid,
    /// The code points of the unit; empty when no ToUnicode entry exists.
    pub code_points: CodePointSpan,
    /// The code points as UTF-8, without NUL and invalid scalars.
    pub text: String,
    /// False if either the CID or the text had to be recovered.
    pub success: bool,
}

impl ScannedUnit {
    /// The code unit that was read.
    pub fn code(&self) -> CharCode {
        self.cid.unit
    }
}

/// Reads an encoded string unit by unit, resolving each to a CID and text.
///
/// Every step consumes at least one byte, so scanning always terminates.
/// Dropping the context cancels the scan.
#[derive(Debug)]
pub struct StringScanContext<'a> {
    encoding: &'a PdfEncoding,
    remaining: &'a [u8],
    state: ScanState,
}

impl<'a> StringScanContext<'a> {
    /// A scan over `encoded` with `encoding`.
    pub fn new(encoding: &'a PdfEncoding, encoded: &'a [u8]) -> Self {
        let state = if encoded.is_empty() {
            ScanState::Exhausted
        } else {
            ScanState::NotStarted
        };
        Self {
            encoding,
            remaining: encoded,
            state,
        }
    }

    /// The current state.
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// True once every byte was consumed.
    pub fn is_exhausted(&self) -> bool {
        self.state == ScanState::Exhausted
    }

    /// The bytes not consumed yet.
    pub fn remaining(&self) -> &'a [u8] {
        self.remaining
    }

    /// Read the next unit, or `None` when the input is exhausted.
    ///
    /// The CID comes from the primary map; a miss consumes the shortest code
    /// length and uses the code value as CID. The text comes from the
    /// ToUnicode map, looked up by the unit's code with the CID as hint.
    pub fn try_scan(&mut self) -> Option<ScannedUnit> {
        if self.remaining.is_empty() {
            self.state = ScanState::Exhausted;
            return None;
        }

        let mut success = true;
        let cid = match self.encoding.encoding_map().try_get_next_cid(&mut self.remaining) {
            Some(cid) => cid,
            None => {
                success = false;
                Cid::from(self.encoding.next_fallback_unit(&mut self.remaining))
            }
        };

        let mut text = String::new();
        let code_points = self
            .encoding
            .to_unicode_map_safe()
            .and_then(|map| map.try_get_code_points(cid.unit, Some(cid.id)));
        let code_points = match code_points {
            Some(code_points) => {
                code_points.append_utf8(&mut text);
                code_points
            }
            None => {
                success = false;
                CodePointSpan::new()
            }
        };

        self.state = if self.remaining.is_empty() {
            ScanState::Exhausted
        } else {
            ScanState::Scanning
        };
        Some(ScannedUnit {
            cid,
            code_points,
            text,
            success,
        })
    }
}

impl Iterator for StringScanContext<'_> {
    type Item = ScannedUnit;

    fn next(&mut self) -> Option<Self::Item> {
        self.try_scan()
    }
}
