//! pdfcmap-parse: CMap programs and font dictionaries to encoding maps.
//!
//! This crate reads the PDF side of character encodings: it interprets CMap
//! programs (the PostScript subset of `begincidrange`, `beginbfchar` and
//! friends), resolves predefined CMap names through a process-wide registry,
//! synthesizes ToUnicode maps for legacy CJK code schemes, and turns the
//! `/Encoding` and `/ToUnicode` entries of [`lopdf`] font dictionaries into
//! [`pdfcmap_core::EncodingMap`]s. It depends on pdfcmap-core for the map types.

/// Emit a `tracing::warn!` event when the `tracing` feature is enabled.
macro_rules! warn_event {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::warn!($($arg)*);
    }};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
macro_rules! debug_event {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    }};
}

pub mod cjk_encoding;
pub mod cmap;
pub mod encoding_map_factory;
pub mod error;
pub mod predefined;
pub mod tokenizer;

pub use cjk_encoding::{CodeScheme, code_scheme_for_cmap, collection_for_cmap, synthesize_to_unicode};
pub use cmap::{CMapParser, CMapResolver, MAX_USECMAP_DEPTH, NoParents, parse_cmap};
pub use encoding_map_factory::{
    EncodingMapFactory, FontEncodingMaps, implicit_encoding, parse_differences, parsed_limits,
};
pub use error::{BackendError, report_warning};
pub use pdfcmap_core;
pub use predefined::{PredefinedRegistry, add_resource_dir, predefined_cmap, registry, write_cmapz};
pub use tokenizer::{LanguageLevel, PsObject, PsTokenizer, Token, tokenize};
