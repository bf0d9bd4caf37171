//! CID to glyph index maps of CID-keyed and simple fonts.

use std::collections::BTreeMap;

/// Maps CIDs to glyph indices of the font program.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CidToGidMap {
    /// `/CIDToGIDMap /Identity`: every CID is its own glyph index.
    #[default]
    Identity,
    /// Explicit table; CIDs absent from it have no glyph.
    Table(BTreeMap<u32, u32>),
}

impl CidToGidMap {
    /// Parse a `/CIDToGIDMap` stream: the glyph index of CID `n` is the
    /// big-endian `u16` at byte offset `2n`.
    ///
    /// A trailing odd byte is ignored. Zero entries past CID 0 are omitted,
    /// since GID 0 is `.notdef`.
    pub fn from_stream_bytes(data: &[u8]) -> Self {
        let table = data
            .chunks_exact(2)
            .enumerate()
            .filter_map(|(cid, pair)| {
                let gid = u32::from(u16::from_be_bytes([pair[0], pair[1]]));
                (cid == 0 || gid != 0).then_some((cid as u32, gid))
            })
            .collect();
        CidToGidMap::Table(table)
    }

    /// Wrap an explicit table.
    pub fn from_table(table: BTreeMap<u32, u32>) -> Self {
        CidToGidMap::Table(table)
    }

    /// The glyph index of `cid`.
    pub fn map_cid(&self, cid: u32) -> Option<u32> {
        match self {
            CidToGidMap::Identity => Some(cid),
            CidToGidMap::Table(table) => table.get(&cid).copied(),
        }
    }

    /// Number of explicit entries; `None` for the identity.
    pub fn len(&self) -> Option<usize> {
        match self {
            CidToGidMap::Identity => None,
            CidToGidMap::Table(table) => Some(table.len()),
        }
    }

    /// True for an explicit table without entries.
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }
}
