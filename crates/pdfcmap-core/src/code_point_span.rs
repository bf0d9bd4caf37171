//! Inline sequence of Unicode code points.
//!
//! A [`CodePointSpan`] holds the code points one character code maps to.
//! Most spans hold a single code point; ligatures hold more. Up to three code
//! points are stored inline without allocating.
//!
//! Values are kept as raw `u32` so the same type can carry CIDs read from
//! CID-keyed CMaps, which are not Unicode scalars.

use std::fmt;
use std::ops::Deref;

use smallvec::SmallVec;

/// An ordered, possibly empty sequence of code points.
///
/// An empty span means "no mapping", which is distinct from a mapping to NUL.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodePointSpan(SmallVec<[u32; 3]>);

impl CodePointSpan {
    /// An empty span.
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    /// A span holding a single code point.
    pub fn single(cp: u32) -> Self {
        let mut inner = SmallVec::new();
        inner.push(cp);
        Self(inner)
    }

    /// A span copied from a slice of code points.
    pub fn from_slice(cps: &[u32]) -> Self {
        Self(SmallVec::from_slice(cps))
    }

    /// A span made of `prefix` followed by `last`.
    pub fn with_last(prefix: &[u32], last: u32) -> Self {
        let mut inner = SmallVec::with_capacity(prefix.len() + 1);
        inner.extend_from_slice(prefix);
        inner.push(last);
        Self(inner)
    }

    /// The span of the scalar values of `text`.
    pub fn from_text(text: &str) -> Self {
        Self(text.chars().map(u32::from).collect())
    }

    /// The code points as a slice.
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    /// The first code point, if any.
    pub fn first(&self) -> Option<u32> {
        self.0.first().copied()
    }

    /// The span with its last code point advanced by `offset`.
    ///
    /// Used to expand compact ranges: every code point but the last stays fixed.
    pub fn offset_last(&self, offset: u32) -> Self {
        let mut inner = self.0.clone();
        if let Some(last) = inner.last_mut() {
            *last = last.wrapping_add(offset);
        }
        Self(inner)
    }

    /// Append the valid, non-NUL scalar values of this span to `out`.
    ///
    /// Returns false if any code point was not a valid Unicode scalar.
    pub fn append_utf8(&self, out: &mut String) -> bool {
        let mut all_valid = true;
        for &cp in &self.0 {
            match char::from_u32(cp) {
                Some('\0') => {}
                Some(ch) => out.push(ch),
                None => all_valid = false,
            }
        }
        all_valid
    }

    /// The span as a string, or `None` if it holds a non-scalar value.
    pub fn to_string_lossless(&self) -> Option<String> {
        self.0.iter().map(|&cp| char::from_u32(cp)).collect()
    }
}

impl Deref for CodePointSpan {
    type Target = [u32];

    fn deref(&self) -> &[u32] {
        &self.0
    }
}

impl From<u32> for CodePointSpan {
    fn from(cp: u32) -> Self {
        CodePointSpan::single(cp)
    }
}

impl From<char> for CodePointSpan {
    fn from(ch: char) -> Self {
        CodePointSpan::single(u32::from(ch))
    }
}

impl From<&[u32]> for CodePointSpan {
    fn from(cps: &[u32]) -> Self {
        CodePointSpan::from_slice(cps)
    }
}

impl FromIterator<u32> for CodePointSpan {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for CodePointSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, cp) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "U+{cp:04X}")?;
        }
        f.write_str("]")
    }
}
