//! Code-space limits and CID font identity metadata.

use crate::char_code::CharCode;

/// Code-space limits of an encoding: code byte lengths and the defined code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncodingLimits {
    /// Smallest byte length of any code.
    pub min_code_size: u8,
    /// Largest byte length of any code.
    pub max_code_size: u8,
    /// The first defined character code.
    pub first_char: CharCode,
    /// The last defined character code.
    pub last_char: CharCode,
}

impl EncodingLimits {
    /// Limits with explicit values.
    pub fn new(min_code_size: u8, max_code_size: u8, first_char: CharCode, last_char: CharCode) -> Self {
        Self {
            min_code_size,
            max_code_size,
            first_char,
            last_char,
        }
    }

    /// Invalid limits, used as the starting point for accumulation.
    pub fn invalid() -> Self {
        Self {
            min_code_size: u8::MAX,
            max_code_size: 0,
            first_char: CharCode::new(u32::MAX),
            last_char: CharCode::new(0),
        }
    }

    /// Limits covering every one-byte code.
    pub fn one_byte() -> Self {
        Self::new(1, 1, CharCode::with_size(0, 1), CharCode::with_size(0xFF, 1))
    }

    /// True if both the code range and the code size range are valid.
    pub fn are_valid(&self) -> bool {
        self.first_char.code <= self.last_char.code && self.min_code_size <= self.max_code_size
    }

    /// True if `min_code_size <= max_code_size`.
    pub fn have_valid_code_size_range(&self) -> bool {
        self.min_code_size <= self.max_code_size
    }

    /// Widen the limits to include `code`.
    pub fn update(&mut self, code: CharCode) {
        if code.code_space_size < self.min_code_size {
            self.min_code_size = code.code_space_size;
        }
        if code.code_space_size > self.max_code_size {
            self.max_code_size = code.code_space_size;
        }
        if code.code < self.first_char.code {
            self.first_char = code;
        }
        if code.code > self.last_char.code {
            self.last_char = code;
        }
    }

    /// Widen only the code size range to include `size`.
    pub fn update_code_size(&mut self, size: u8) {
        self.min_code_size = self.min_code_size.min(size);
        self.max_code_size = self.max_code_size.max(size);
    }
}

impl Default for EncodingLimits {
    fn default() -> Self {
        Self::invalid()
    }
}

/// A range of codes of the same byte length declared in a codespace block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodeSpaceRange {
    /// Lowest code, big-endian.
    pub code_lo: u32,
    /// Highest code, big-endian.
    pub code_hi: u32,
    /// Byte length shared by `code_lo` and `code_hi`.
    pub code_space_size: u8,
}

impl CodeSpaceRange {
    /// A range over `[lo, hi]` with the given byte length.
    pub fn new(code_lo: u32, code_hi: u32, code_space_size: u8) -> Self {
        Self {
            code_lo,
            code_hi,
            code_space_size,
        }
    }

    /// The lowest code as a [`CharCode`].
    pub fn src_code_lo(&self) -> CharCode {
        CharCode::with_size(self.code_lo, self.code_space_size)
    }

    /// The highest code as a [`CharCode`].
    pub fn src_code_hi(&self) -> CharCode {
        CharCode::with_size(self.code_hi, self.code_space_size)
    }

    /// True if `code` has the range byte length and every byte lies within the
    /// per-byte bounds of the range.
    pub fn contains(&self, code: CharCode) -> bool {
        if code.code_space_size != self.code_space_size {
            return false;
        }
        let lo = self.src_code_lo();
        let hi = self.src_code_hi();
        (0..self.code_space_size).all(|i| {
            let b = code.byte_at(i);
            b >= lo.byte_at(i) && b <= hi.byte_at(i)
        })
    }
}

/// CID font character collection identity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CidSystemInfo {
    /// Issuer of the character collection, e.g. "Adobe".
    pub registry: String,
    /// Name of the character collection, e.g. "Japan1".
    pub ordering: String,
    /// Supplement number of the character collection.
    pub supplement: i32,
}

impl CidSystemInfo {
    /// Identity with explicit values.
    pub fn new(registry: impl Into<String>, ordering: impl Into<String>, supplement: i32) -> Self {
        Self {
            registry: registry.into(),
            ordering: ordering.into(),
            supplement,
        }
    }

    /// The `Registry-Ordering-UCS2` name of the matching predefined ToUnicode CMap.
    pub fn ucs2_cmap_name(&self) -> String {
        format!("{}-{}-UCS2", self.registry, self.ordering)
    }
}

/// Writing mode of a CID-keyed encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WritingMode {
    /// Horizontal writing (`/WMode 0`).
    #[default]
    Horizontal,
    /// Vertical writing (`/WMode 1`).
    Vertical,
}

impl WritingMode {
    /// Interpret a raw `/WMode` value; only `1` is vertical.
    pub fn from_raw(raw: i64) -> Self {
        if raw == 1 {
            WritingMode::Vertical
        } else {
            WritingMode::Horizontal
        }
    }

    /// The `/WMode` value of this mode.
    pub fn as_raw(&self) -> i32 {
        match self {
            WritingMode::Horizontal => 0,
            WritingMode::Vertical => 1,
        }
    }
}
