//! pdfcmap-core: Backend-independent character code and encoding types.
//!
//! This crate provides the value types (CharCode, Cid, CodePointSpan,
//! EncodingLimits), the bidirectional [`CharCodeMap`] and the [`EncodingMap`]
//! variant family used by pdfcmap-rs to convert between encoded PDF strings,
//! CIDs and Unicode. It knows nothing about the PDF object model; parsing
//! CMap programs and font dictionaries lives in pdfcmap-parse.

/// Emit a `tracing::warn!` event when the `tracing` feature is enabled.
macro_rules! warn_event {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::warn!($($arg)*);
    }};
}

pub mod builtin_encoding;
pub mod builtin_tables;
pub mod char_code;
pub mod char_code_map;
pub mod cid_to_gid;
pub mod cmap_encoding;
pub mod cmap_writer;
pub mod code_point_span;
pub mod compact;
pub mod difference_encoding;
pub mod encoding_map;
pub mod error;
pub mod font_program;
pub mod fss_utf;
mod glyph_list;
pub mod glyph_names;
pub mod identity_encoding;
pub mod limits;
pub mod predefined_to_unicode;
pub mod reverse_map;
pub mod simple_encoding;
pub mod unicode_norm;

pub use builtin_encoding::{BuiltInEncoding, BuiltInEncodingKind, shared_builtin_encoding};
pub use char_code::{CharCode, Cid, Gid, MAX_CODE_SPACE_SIZE, char_code_max_value, char_code_size};
pub use char_code_map::{CharCodeMap, CodeUnitRange};
pub use cid_to_gid::CidToGidMap;
pub use cmap_encoding::CMapEncoding;
pub use code_point_span::CodePointSpan;
pub use compact::{read_compact, write_compact};
pub use difference_encoding::{Difference, DifferenceEncoding, DifferenceList};
pub use encoding_map::{
    EncodingMap, EncodingMapKind, ExportObject, PredefinedEncodingType, null_encoding_error,
};
pub use error::{
    EncodingOptions, EncodingResult, EncodingWarning, EncodingWarningCode, PdfError,
};
pub use font_program::{FontProgram, FontProgramKind, GlyphTable};
pub use fss_utf::{fss_utf_char_code, fss_utf_encode, fss_utf_ranges};
pub use glyph_names::{code_points_from_glyph_name, glyph_name_for_code_point};
pub use identity_encoding::{IdentityEncoding, shared_identity_encoding};
pub use limits::{CidSystemInfo, CodeSpaceRange, EncodingLimits, WritingMode};
pub use predefined_to_unicode::PredefinedToUnicode;
pub use reverse_map::ReverseMap;
pub use simple_encoding::SimpleEncoding;
pub use unicode_norm::UnicodeNorm;
