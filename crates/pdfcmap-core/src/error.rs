//! Error and warning types for pdfcmap-rs.
//!
//! [`PdfError`] aborts construction or parsing. [`EncodingWarning`] records a
//! recoverable CMap problem and travels next to the value in an
//! [`EncodingResult`]. [`EncodingOptions`] holds the limits and switches.

use std::fmt;

use crate::unicode_norm::UnicodeNorm;

/// Fatal error types for encoding construction and CMap processing.
///
/// Lookup misses are never reported through this type; they surface as
/// `Option`/`bool` results so callers can apply their own fallback policy.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfError {
    /// Error parsing a CMap program or an encoding object.
    ParseError(String),
    /// I/O error reading CMap resource data.
    IoError(String),
    /// An encoding cannot perform the requested operation.
    EncodingError(String),
    /// A caller supplied an argument that violates a construction invariant.
    InvalidArgument(String),
    /// A numeric value is outside the range the operation supports.
    ValueOutOfRange(String),
    /// Input larger than an [`EncodingOptions`] limit allows.
    ResourceLimitExceeded {
        /// Name of the limit that was exceeded (e.g., "max_cmap_bytes").
        limit_name: String,
        /// Limit in effect.
        limit_value: usize,
        /// Size of the rejected input.
        actual_value: usize,
    },
    /// Free-form error.
    Other(String),
}

impl fmt::Display for PdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfError::ParseError(msg) => write!(f, "parse error: {msg}"),
            PdfError::IoError(msg) => write!(f, "I/O error: {msg}"),
            PdfError::EncodingError(msg) => write!(f, "encoding error: {msg}"),
            PdfError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            PdfError::ValueOutOfRange(msg) => write!(f, "value out of range: {msg}"),
            PdfError::ResourceLimitExceeded {
                limit_name,
                limit_value,
                actual_value,
            } => write!(
                f,
                "resource limit exceeded: {limit_name} (limit: {limit_value}, actual: {actual_value})"
            ),
            PdfError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PdfError {}

impl From<std::io::Error> for PdfError {
    fn from(err: std::io::Error) -> Self {
        PdfError::IoError(err.to_string())
    }
}

/// Machine-readable warning code for categorizing encoding issues.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", content = "detail")
)]
pub enum EncodingWarningCode {
    /// Code unit ranges overlapped and were truncated.
    OverlappingRanges,
    /// Code space ranges of different byte lengths overlap.
    OverlappingCodeSpace,
    /// A range whose upper bound is lower than its lower bound.
    InvalidRange,
    /// A bfrange/bfchar destination of an unsupported type.
    UnsupportedDestination,
    /// A character code operand of an unexpected type or size.
    InvalidCharCode,
    /// No ToUnicode data was available for a predefined CMap.
    MissingToUnicode,
    /// Free-form warning; the string repeats the description.
    Other(String),
}

impl EncodingWarningCode {
    /// Upper snake case tag, stable across releases.
    pub fn as_str(&self) -> &str {
        match self {
            EncodingWarningCode::OverlappingRanges => "OVERLAPPING_RANGES",
            EncodingWarningCode::OverlappingCodeSpace => "OVERLAPPING_CODE_SPACE",
            EncodingWarningCode::InvalidRange => "INVALID_RANGE",
            EncodingWarningCode::UnsupportedDestination => "UNSUPPORTED_DESTINATION",
            EncodingWarningCode::InvalidCharCode => "INVALID_CHAR_CODE",
            EncodingWarningCode::MissingToUnicode => "MISSING_TO_UNICODE",
            EncodingWarningCode::Other(_) => "OTHER",
        }
    }
}

impl fmt::Display for EncodingWarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal warning encountered while building or using an encoding.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncodingWarning {
    /// Category.
    pub code: EncodingWarningCode,
    /// What went wrong, for logs.
    pub description: String,
    /// Name of the CMap being processed, if known.
    pub cmap_name: Option<String>,
    /// Byte offset into the CMap program, if applicable.
    pub offset: Option<usize>,
}

impl EncodingWarning {
    /// Uncategorized warning; the code is [`EncodingWarningCode::Other`].
    pub fn new(description: impl Into<String>) -> Self {
        let description = description.into();
        Self {
            code: EncodingWarningCode::Other(description.clone()),
            description,
            cmap_name: None,
            offset: None,
        }
    }

    /// Categorized warning.
    pub fn with_code(code: EncodingWarningCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            cmap_name: None,
            offset: None,
        }
    }

    /// Attach the byte offset where the warning was raised.
    pub fn at_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Attach the CMap name the warning belongs to.
    pub fn in_cmap(mut self, name: impl Into<String>) -> Self {
        self.cmap_name = Some(name.into());
        self
    }

    /// The error this warning becomes under [`EncodingOptions::strict`].
    pub fn to_error(&self) -> PdfError {
        PdfError::ParseError(self.to_string())
    }
}

impl fmt::Display for EncodingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.description)?;
        if let Some(ref name) = self.cmap_name {
            write!(f, " [cmap {name}]")?;
        }
        if let Some(offset) = self.offset {
            write!(f, " (offset {offset})")?;
        }
        Ok(())
    }
}

/// A value plus the warnings raised while building it.
#[derive(Debug, Clone)]
pub struct EncodingResult<T> {
    /// The produced value.
    pub value: T,
    /// Warnings collected while producing it.
    pub warnings: Vec<EncodingWarning>,
}

impl<T> EncodingResult<T> {
    /// Wrap `value` with an empty warning list.
    pub fn ok(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Wrap `value` with `warnings`.
    pub fn with_warnings(value: T, warnings: Vec<EncodingWarning>) -> Self {
        Self { value, warnings }
    }

    /// No warnings were raised.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Apply `f` to the value, keeping the warnings.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> EncodingResult<U> {
        EncodingResult {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}

/// Options controlling CMap parsing, encoding construction and text output.
///
/// Resource limits prevent pathological CMap programs from consuming
/// excessive memory.
#[derive(Debug, Clone)]
pub struct EncodingOptions {
    /// Maximum size of a single CMap program in bytes (default: 16 MiB).
    pub max_cmap_bytes: usize,
    /// Whether to collect warnings while parsing (default: true).
    pub collect_warnings: bool,
    /// When true, any recoverable CMap problem is escalated to an error (default: false).
    pub strict: bool,
    /// Unicode normalization applied to decoded text (default: None).
    pub unicode_norm: UnicodeNorm,
    /// Synthesize a code to Unicode map for predefined CJK CMaps whose
    /// `Registry-Ordering-UCS2` companion is unavailable (default: true).
    pub synthesize_legacy_cjk: bool,
}

impl Default for EncodingOptions {
    fn default() -> Self {
        Self {
            max_cmap_bytes: 16 * 1024 * 1024,
            collect_warnings: true,
            strict: false,
            unicode_norm: UnicodeNorm::None,
            synthesize_legacy_cjk: true,
        }
    }
}

impl EncodingOptions {
    /// Options that reject any recoverable CMap problem.
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    /// Check a CMap program size against [`max_cmap_bytes`](Self::max_cmap_bytes).
    pub fn check_cmap_size(&self, len: usize) -> Result<(), PdfError> {
        if len > self.max_cmap_bytes {
            return Err(PdfError::ResourceLimitExceeded {
                limit_name: "max_cmap_bytes".to_string(),
                limit_value: self.max_cmap_bytes,
                actual_value: len,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- PdfError tests ---

    #[test]
    fn pdf_error_parse_error_creation() {
        let err = PdfError::ParseError("missing endcmap".to_string());
        assert_eq!(err.to_string(), "parse error: missing endcmap");
    }

    #[test]
    fn pdf_error_encoding_error_creation() {
        let err = PdfError::EncodingError("no export object".to_string());
        assert_eq!(err.to_string(), "encoding error: no export object");
    }

    #[test]
    fn pdf_error_invalid_argument_creation() {
        let err = PdfError::InvalidArgument("code space size 0".to_string());
        assert_eq!(err.to_string(), "invalid argument: code space size 0");
    }

    #[test]
    fn pdf_error_value_out_of_range_creation() {
        let err = PdfError::ValueOutOfRange("code point 0x110000".to_string());
        assert_eq!(err.to_string(), "value out of range: code point 0x110000");
    }

    #[test]
    fn pdf_error_resource_limit_exceeded() {
        let err = PdfError::ResourceLimitExceeded {
            limit_name: "max_cmap_bytes".to_string(),
            limit_value: 1024,
            actual_value: 2048,
        };
        assert_eq!(
            err.to_string(),
            "resource limit exceeded: max_cmap_bytes (limit: 1024, actual: 2048)"
        );
    }

    #[test]
    fn pdf_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "cmap missing");
        let err: PdfError = io_err.into();
        assert!(matches!(err, PdfError::IoError(_)));
        assert!(err.to_string().contains("cmap missing"));
    }

    #[test]
    fn pdf_error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(PdfError::Other("boom".to_string()));
        assert_eq!(err.to_string(), "boom");
    }

    // --- EncodingWarning tests ---

    #[test]
    fn warning_new_uses_other_code() {
        let w = EncodingWarning::new("something odd");
        assert_eq!(w.code, EncodingWarningCode::Other("something odd".to_string()));
        assert_eq!(w.to_string(), "[OTHER] something odd");
    }

    #[test]
    fn warning_with_context_display() {
        let w = EncodingWarning::with_code(
            EncodingWarningCode::InvalidRange,
            "range upper bound lower than lower bound",
        )
        .in_cmap("Custom-H")
        .at_offset(120);
        assert_eq!(
            w.to_string(),
            "[INVALID_RANGE] range upper bound lower than lower bound [cmap Custom-H] (offset 120)"
        );
    }

    #[test]
    fn warning_to_error_is_parse_error() {
        let w = EncodingWarning::with_code(EncodingWarningCode::OverlappingRanges, "overlap");
        assert_eq!(
            w.to_error(),
            PdfError::ParseError("[OVERLAPPING_RANGES] overlap".to_string())
        );
    }

    #[test]
    fn warning_code_tags_are_stable() {
        assert_eq!(EncodingWarningCode::OverlappingCodeSpace.as_str(), "OVERLAPPING_CODE_SPACE");
        assert_eq!(EncodingWarningCode::UnsupportedDestination.as_str(), "UNSUPPORTED_DESTINATION");
        assert_eq!(EncodingWarningCode::InvalidCharCode.as_str(), "INVALID_CHAR_CODE");
        assert_eq!(EncodingWarningCode::MissingToUnicode.as_str(), "MISSING_TO_UNICODE");
    }

    // --- EncodingResult tests ---

    #[test]
    fn result_ok_is_clean() {
        let r = EncodingResult::ok(5);
        assert!(r.is_clean());
        assert_eq!(r.map(|v| v * 2).value, 10);
    }

    #[test]
    fn result_with_warnings_preserved_by_map() {
        let r = EncodingResult::with_warnings("x", vec![EncodingWarning::new("w")]);
        assert!(!r.is_clean());
        let mapped = r.map(str::len);
        assert_eq!(mapped.value, 1);
        assert_eq!(mapped.warnings.len(), 1);
    }

    // --- EncodingOptions tests ---

    #[test]
    fn options_defaults() {
        let opts = EncodingOptions::default();
        assert_eq!(opts.max_cmap_bytes, 16 * 1024 * 1024);
        assert!(opts.collect_warnings);
        assert!(!opts.strict);
        assert_eq!(opts.unicode_norm, UnicodeNorm::None);
        assert!(opts.synthesize_legacy_cjk);
    }

    #[test]
    fn options_strict_preset() {
        let opts = EncodingOptions::strict();
        assert!(opts.strict);
        assert!(opts.collect_warnings);
    }

    #[test]
    fn check_cmap_size_rejects_oversized_programs() {
        let opts = EncodingOptions {
            max_cmap_bytes: 10,
            ..EncodingOptions::default()
        };
        assert!(opts.check_cmap_size(10).is_ok());
        let err = opts.check_cmap_size(11).unwrap_err();
        assert!(matches!(
            err,
            PdfError::ResourceLimitExceeded {
                limit_value: 10,
                actual_value: 11,
                ..
            }
        ));
    }
}
