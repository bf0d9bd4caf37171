//! Arithmetic identity encoding over a fixed code width.

use std::sync::{Arc, OnceLock};

use crate::char_code::{CharCode, MAX_CODE_SPACE_SIZE, char_code_max_value};
use crate::encoding_map::{EncodingMap, EncodingMapKind};
use crate::error::PdfError;
use crate::limits::{EncodingLimits, WritingMode};

/// Maps every code of a fixed byte width to itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityEncoding {
    kind: EncodingMapKind,
    limits: EncodingLimits,
    writing_mode: Option<WritingMode>,
}

impl IdentityEncoding {
    /// Identity over every code of `code_space_size` bytes, with no CID semantics.
    ///
    /// This is the encoding substituted for fonts that only have a ToUnicode map.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::InvalidArgument`] if `code_space_size` is not in `1..=4`.
    pub fn new(code_space_size: u8) -> Result<Self, PdfError> {
        if code_space_size == 0 || code_space_size > MAX_CODE_SPACE_SIZE {
            return Err(PdfError::InvalidArgument(format!(
                "identity code space size must be in [1,4], got {code_space_size}"
            )));
        }
        Ok(Self {
            kind: EncodingMapKind::Indeterminate,
            limits: full_limits(code_space_size),
            writing_mode: None,
        })
    }

    /// The two-byte `Identity-H` or `Identity-V` CMap.
    pub fn cmap(writing_mode: WritingMode) -> Self {
        Self {
            kind: EncodingMapKind::CMap,
            limits: full_limits(2),
            writing_mode: Some(writing_mode),
        }
    }

    /// A CID-keyed identity with explicit limits and unknown orientation.
    ///
    /// Used in place of CMap programs that turn out to map every code to itself.
    pub fn with_limits(limits: EncodingLimits) -> Self {
        Self {
            kind: EncodingMapKind::CMap,
            limits,
            writing_mode: None,
        }
    }

    /// The map kind.
    pub fn kind(&self) -> EncodingMapKind {
        self.kind
    }

    /// The code limits.
    pub fn limits(&self) -> &EncodingLimits {
        &self.limits
    }

    /// The writing mode, when the identity is a named `Identity-H`/`Identity-V`.
    pub fn writing_mode(&self) -> Option<WritingMode> {
        self.writing_mode
    }

    /// Byte width of every code.
    pub fn code_space_size(&self) -> u8 {
        self.limits.max_code_size
    }

    /// `Identity-H` or `Identity-V`, when the orientation is known.
    pub fn export_name(&self) -> Option<&'static str> {
        match self.writing_mode? {
            WritingMode::Horizontal => Some("Identity-H"),
            WritingMode::Vertical => Some("Identity-V"),
        }
    }

    /// The value of `code`, if it has the identity's width.
    pub fn code_point(&self, code: CharCode) -> Option<u32> {
        (code.code_space_size == self.code_space_size()).then_some(code.code)
    }

    /// The code of `value`, if it fits the identity's width.
    pub fn char_code(&self, value: u32) -> Option<CharCode> {
        let size = self.code_space_size();
        (value <= char_code_max_value(size)).then(|| CharCode::with_size(value, size))
    }
}

fn full_limits(size: u8) -> EncodingLimits {
    EncodingLimits::new(
        size,
        size,
        CharCode::with_size(0, size),
        CharCode::with_size(char_code_max_value(size), size),
    )
}

/// The process-wide shared `Identity-H` or `Identity-V` encoding.
pub fn shared_identity_encoding(writing_mode: WritingMode) -> Arc<EncodingMap> {
    static HORIZONTAL: OnceLock<Arc<EncodingMap>> = OnceLock::new();
    static VERTICAL: OnceLock<Arc<EncodingMap>> = OnceLock::new();
    let cell = match writing_mode {
        WritingMode::Horizontal => &HORIZONTAL,
        WritingMode::Vertical => &VERTICAL,
    };
    cell.get_or_init(|| Arc::new(EncodingMap::Identity(IdentityEncoding::cmap(writing_mode))))
        .clone()
}
