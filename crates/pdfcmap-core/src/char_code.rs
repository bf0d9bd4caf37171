//! Character code, CID and GID value types.
//!
//! A [`CharCode`] is one code unit read from (or written to) an encoded PDF
//! string: a numeric value tagged with the number of bytes it occupies.
//! Codes of different byte lengths are distinct even when numerically equal,
//! so `<41>` and `<0041>` are two different keys.

use std::fmt;

use crate::error::PdfError;

/// Largest byte length a character code may occupy.
pub const MAX_CODE_SPACE_SIZE: u8 = 4;

/// Number of significant bytes needed to represent `code` (at least 1).
pub fn char_code_size(code: u32) -> u8 {
    match code {
        0..=0xFF => 1,
        0x100..=0xFFFF => 2,
        0x1_0000..=0xFF_FFFF => 3,
        _ => 4,
    }
}

/// Largest code representable with `size` bytes.
pub fn char_code_max_value(size: u8) -> u32 {
    match size {
        0 => 0,
        1..=3 => (1u32 << (u32::from(size) * 8)) - 1,
        _ => u32::MAX,
    }
}

/// A character code unit of 1 to 4 bytes.
///
/// Ordering compares the numeric value first and the byte length second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharCode {
    /// Numeric value of the code, big-endian over `code_space_size` bytes.
    pub code: u32,
    /// Number of bytes the code occupies in an encoded string.
    pub code_space_size: u8,
}

impl CharCode {
    /// Create a code of minimum byte length.
    pub fn new(code: u32) -> Self {
        Self {
            code,
            code_space_size: char_code_size(code),
        }
    }

    /// Create a code with an explicit byte length.
    pub const fn with_size(code: u32, code_space_size: u8) -> Self {
        Self {
            code,
            code_space_size,
        }
    }

    /// Returns true if the byte length is within `1..=4` and the value fits it.
    pub fn is_valid(&self) -> bool {
        (1..=MAX_CODE_SPACE_SIZE).contains(&self.code_space_size)
            && self.code <= char_code_max_value(self.code_space_size)
    }

    /// Byte at `index`, counting from the most significant byte.
    pub fn byte_at(&self, index: u8) -> u8 {
        let shift = u32::from(self.code_space_size.saturating_sub(index + 1)) * 8;
        ((self.code >> shift) & 0xFF) as u8
    }

    /// Append the big-endian bytes of this code to `buf`.
    pub fn append_to(&self, buf: &mut Vec<u8>) {
        for i in (1..=u32::from(self.code_space_size)).rev() {
            buf.push(((self.code >> ((i - 1) * 8)) & 0xFF) as u8);
        }
    }

    /// The big-endian bytes of this code.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(usize::from(self.code_space_size));
        self.append_to(&mut buf);
        buf
    }

    /// Write the code as a fixed-width hex string, e.g. `<00A0>`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::ValueOutOfRange`] if the byte length is not in `1..=4`.
    pub fn write_hex(&self, out: &mut String, wrap: bool) -> Result<(), PdfError> {
        use std::fmt::Write;

        let width = match self.code_space_size {
            1..=4 => usize::from(self.code_space_size) * 2,
            _ => {
                return Err(PdfError::ValueOutOfRange(
                    "code space must be [1,4]".to_string(),
                ));
            }
        };
        // Writing into a String cannot fail.
        let _ = if wrap {
            write!(out, "<{:0width$X}>", self.code)
        } else {
            write!(out, "{:0width$X}", self.code)
        };
        Ok(())
    }

    /// The wrapped hex form of this code as a new string.
    pub fn to_hex(&self) -> Result<String, PdfError> {
        let mut out = String::with_capacity(10);
        self.write_hex(&mut out, true)?;
        Ok(out)
    }

    /// Build a code from up to four big-endian bytes.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.is_empty() || bytes.len() > usize::from(MAX_CODE_SPACE_SIZE) {
            return None;
        }
        let code = bytes.iter().fold(0u32, |acc, b| (acc << 8) | u32::from(*b));
        Some(Self::with_size(code, bytes.len() as u8))
    }
}

impl From<u32> for CharCode {
    fn from(code: u32) -> Self {
        CharCode::new(code)
    }
}

impl fmt::Display for CharCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = usize::from(self.code_space_size.clamp(1, MAX_CODE_SPACE_SIZE)) * 2;
        write!(f, "<{:0width$X}>", self.code)
    }
}

/// A character identifier together with the code unit it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cid {
    /// The CID value.
    pub id: u32,
    /// The code unit that produced this CID.
    pub unit: CharCode,
}

impl Cid {
    /// A CID whose code unit is the minimal code of the same value.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            unit: CharCode::new(id),
        }
    }

    /// A CID with an explicit code unit.
    pub fn with_unit(id: u32, unit: CharCode) -> Self {
        Self { id, unit }
    }
}

impl From<CharCode> for Cid {
    /// Identity interpretation: the CID equals the code value.
    fn from(unit: CharCode) -> Self {
        Self { id: unit.code, unit }
    }
}

/// A glyph index inside a font program, with the index used for metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gid {
    /// Glyph index in the font program.
    pub id: u32,
    /// Identifier used to look up the glyph's PDF metrics.
    pub metrics_id: u32,
}

impl Gid {
    /// A GID whose metrics identifier equals the glyph index.
    pub fn new(id: u32) -> Self {
        Self { id, metrics_id: id }
    }

    /// A GID with a distinct metrics identifier.
    pub fn with_metrics(id: u32, metrics_id: u32) -> Self {
        Self { id, metrics_id }
    }
}
