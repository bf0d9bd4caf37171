//! Code allocation for fonts authored at run time.
//!
//! A dynamic encoding starts empty and grows one glyph at a time. Codes are
//! minted with [`fss_utf_char_code`] from the number of codes already present,
//! so no code is a byte prefix of another and the first glyphs get the
//! shortest codes. CIDs of a subset are numbered from 1; CID 0 stays `.notdef`.

use std::collections::{BTreeMap, BTreeSet};

use pdfcmap_core::{CharCode, CharCodeMap, Cid, CodePointSpan, Gid, PdfError, fss_utf_char_code};

/// The code minted after `count` codes, counting from zero.
///
/// # Errors
///
/// Fails when `count` is beyond the range FSS-UTF can represent in four bytes.
pub fn dynamic_code(count: usize) -> Result<CharCode, PdfError> {
    let value = u32::try_from(count).map_err(|_| {
        PdfError::ValueOutOfRange(format!("dynamic code index {count} is too large"))
    })?;
    fss_utf_char_code(value)
}

/// Register a glyph in a dynamic CID/ToUnicode pair and return its code.
///
/// When `code_points` were registered before the earlier code is returned
/// and neither map changes. Otherwise a new code is minted from the number
/// of ToUnicode entries, mapped to `gid` in `cid_map` and to `code_points`
/// in `to_unicode`.
///
/// # Errors
///
/// Fails when the allocator runs out of codes.
pub fn add_char_code(
    cid_map: &mut CharCodeMap,
    to_unicode: &mut CharCodeMap,
    gid: u32,
    code_points: &[u32],
) -> Result<CharCode, PdfError> {
    if let Some(code) = to_unicode.try_get_char_code(code_points) {
        return Ok(code);
    }
    let code = dynamic_code(to_unicode.mapping_count())?;
    cid_map.push_mapping(code, &[gid])?;
    to_unicode.push_mapping(code, code_points)?;
    Ok(code)
}

/// A glyph recorded in a font subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsetGlyph {
    /// Glyph index in the original font program.
    pub gid: Gid,
    /// CID assigned in the subset, with the code unit that selects it.
    pub cid: Cid,
    /// Text the glyph was first requested for.
    pub code_points: CodePointSpan,
}

/// The glyphs used so far by a subset font, keyed by original glyph index.
#[derive(Debug, Clone, Default)]
pub struct SubsetGlyphs {
    glyphs: BTreeMap<u32, SubsetGlyph>,
}

impl SubsetGlyphs {
    /// An empty subset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of glyphs in the subset.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// True if no glyph was used yet.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// The entry of original glyph `gid`.
    pub fn get(&self, gid: u32) -> Option<&SubsetGlyph> {
        self.glyphs.get(&gid)
    }

    /// The CID the next new glyph receives.
    pub fn next_cid(&self) -> u32 {
        self.glyphs.len() as u32 + 1
    }

    /// Record `gid` under `cid`. An existing entry for `gid` is kept.
    pub fn insert(&mut self, gid: u32, cid: Cid, code_points: &[u32]) -> &SubsetGlyph {
        self.glyphs.entry(gid).or_insert_with(|| SubsetGlyph {
            gid: Gid::new(gid),
            cid,
            code_points: CodePointSpan::from_slice(code_points),
        })
    }

    /// Entries in original glyph index order.
    pub fn iter(&self) -> impl Iterator<Item = &SubsetGlyph> {
        self.glyphs.values()
    }

    /// The original glyph index of subset CID `cid`.
    pub fn gid_for_cid(&self, cid: u32) -> Option<u32> {
        self.glyphs
            .values()
            .find(|glyph| glyph.cid.id == cid)
            .map(|glyph| glyph.gid.id)
    }

    /// The distinct byte lengths of the subset's code units.
    pub fn code_sizes(&self) -> BTreeSet<u8> {
        self.glyphs
            .values()
            .map(|glyph| glyph.cid.unit.code_space_size)
            .collect()
    }
}
