//! Error types for the CMap parsing and encoding factory layers.
//!
//! [`BackendError`] is derived with [`thiserror`]. It folds tokenizer, resource
//! and lopdf failures into one type that lowers to [`PdfError`] at the crate
//! boundary.

use pdfcmap_core::{EncodingOptions, EncodingWarning, PdfError};
use thiserror::Error;

/// Error type for CMap parsing and encoding construction from PDF objects.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Malformed CMap program or encoding object.
    #[error("CMap parse error: {0}")]
    Parse(String),

    /// Error reading CMap resource data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An encoding object has an unsupported shape.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The PostScript tokenizer met invalid syntax.
    #[error("tokenizer error at offset {offset}: {message}")]
    Tokenizer {
        /// Byte offset into the program.
        offset: usize,
        /// What went wrong.
        message: String,
    },

    /// Error from the lopdf object model.
    #[error("lopdf error: {0}")]
    Lopdf(#[from] lopdf::Error),

    /// Raised by pdfcmap-core, including escalated warnings.
    #[error(transparent)]
    Core(#[from] PdfError),
}

impl BackendError {
    pub(crate) fn tokenizer(offset: usize, message: impl Into<String>) -> Self {
        BackendError::Tokenizer {
            offset,
            message: message.into(),
        }
    }
}

/// Record a recoverable problem: an error in strict mode, otherwise a warning
/// kept when `options.collect_warnings` is set.
pub fn report_warning(
    options: &EncodingOptions,
    warnings: &mut Vec<EncodingWarning>,
    warning: EncodingWarning,
) -> Result<(), BackendError> {
    warn_event!(%warning, "encoding warning");
    if options.strict {
        return Err(BackendError::Core(warning.to_error()));
    }
    if options.collect_warnings {
        warnings.push(warning);
    }
    Ok(())
}

impl From<BackendError> for PdfError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Parse(msg) => PdfError::ParseError(msg),
            BackendError::Io(e) => PdfError::IoError(e.to_string()),
            BackendError::Encoding(msg) => PdfError::EncodingError(msg),
            err @ BackendError::Tokenizer { .. } => PdfError::ParseError(err.to_string()),
            BackendError::Lopdf(e) => PdfError::ParseError(e.to_string()),
            BackendError::Core(e) => e,
        }
    }
}
