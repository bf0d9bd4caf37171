//! pdfcmap: Convert between PDF encoded strings, CIDs and Unicode.
//!
//! This is the public API facade crate for pdfcmap-rs. It re-exports types from
//! pdfcmap-core and uses pdfcmap-parse to read encodings from PDF font
//! dictionaries.
//!
//! # Architecture
//!
//! - **pdfcmap-core**: Backend-independent code, CID and encoding map types
//! - **pdfcmap-parse**: CMap program parsing and the lopdf encoding factory
//! - **pdfcmap** (this crate): The per-font [`PdfEncoding`], dynamic code
//!   allocation for authored fonts, string scanning and export back into PDF
//!
//! # Example
//!
//! ```ignore
//! use pdfcmap::{EncodingFactory, EncodingOptions};
//!
//! let doc = lopdf::Document::load("input.pdf")?;
//! let factory = EncodingFactory::new(&doc, EncodingOptions::default());
//! let encoding = factory.encoding_for_font_id(font_id, None)?.value;
//! let text = encoding.convert_to_utf8(&encoded);
//! if !text.success {
//!     eprintln!("some codes had no Unicode mapping");
//! }
//! ```

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
macro_rules! debug_event {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    }};
}

pub mod dynamic;
pub mod encoding;
pub mod encoding_factory;
pub mod export;
pub mod scan;

pub use dynamic::{SubsetGlyph, SubsetGlyphs, add_char_code, dynamic_code};
pub use encoding::{
    CUSTOM_ENCODING_START_ID, Conversion, NULL_ENCODING_ID, PdfEncoding, SharedFontProgram,
};
pub use encoding_factory::{EncodingFactory, encoding_for_font};
pub use export::export_to_dictionary;
pub use scan::{ScanState, ScannedUnit, StringScanContext};

pub use pdfcmap_core;
pub use pdfcmap_core::{
    BuiltInEncodingKind, CharCode, CharCodeMap, Cid, CidSystemInfo, CidToGidMap, CodePointSpan,
    EncodingLimits, EncodingMap, EncodingMapKind, EncodingOptions, EncodingResult,
    EncodingWarning, EncodingWarningCode, ExportObject, FontProgram, FontProgramKind, Gid,
    GlyphTable, PdfError, UnicodeNorm, WritingMode,
};
pub use pdfcmap_parse;
pub use pdfcmap_parse::{BackendError, PredefinedRegistry, add_resource_dir, parse_cmap};
