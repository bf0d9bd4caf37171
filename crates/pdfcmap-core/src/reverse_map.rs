//! Reverse index from code point sequences to character codes.
//!
//! Exact mappings are stored in a trie keyed by code point, so ligature
//! sequences share prefixes with their leading character. Compact ranges
//! with a single destination code point are kept as arithmetic entries and
//! never expanded. Every entry carries the insertion sequence number of the
//! mapping that produced it; when several codes map to the same code points
//! the most recently pushed one wins.

use std::collections::BTreeMap;
use std::str::Chars;

use crate::char_code::CharCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ReverseEntry {
    code: CharCode,
    seq: u64,
}

#[derive(Debug, Clone, Default)]
struct ReverseNode {
    entry: Option<ReverseEntry>,
    ligatures: BTreeMap<u32, ReverseNode>,
}

/// A single-code-point range `src_lo + i -> dst_lo + i` for `i < size`.
#[derive(Debug, Clone, Copy)]
struct RangeEntry {
    dst_lo: u32,
    size: u32,
    src_lo: CharCode,
    seq: u64,
}

/// Reverse lookup index built from a [`CharCodeMap`](crate::CharCodeMap).
#[derive(Debug, Clone, Default)]
pub struct ReverseMap {
    roots: BTreeMap<u32, ReverseNode>,
    ranges: Vec<RangeEntry>,
    max_range_size: u32,
}

impl ReverseMap {
    /// Register `code` as the encoding of `code_points`.
    ///
    /// An empty sequence is ignored. An existing entry is replaced only by a
    /// newer one.
    pub(crate) fn push(&mut self, code_points: &[u32], code: CharCode, seq: u64) {
        let Some((first, rest)) = code_points.split_first() else {
            return;
        };
        let mut node = self.roots.entry(*first).or_default();
        for cp in rest {
            node = node.ligatures.entry(*cp).or_default();
        }
        match node.entry {
            Some(existing) if existing.seq > seq => {}
            _ => node.entry = Some(ReverseEntry { code, seq }),
        }
    }

    /// Register the single-code-point range `src_lo + i -> dst_lo + i`.
    pub(crate) fn push_range(&mut self, src_lo: CharCode, size: u32, dst_lo: u32, seq: u64) {
        if size == 0 {
            return;
        }
        self.ranges.push(RangeEntry {
            dst_lo,
            size,
            src_lo,
            seq,
        });
        self.max_range_size = self.max_range_size.max(size);
    }

    /// Sort range entries for lookup. Call once after all pushes.
    pub(crate) fn finish(&mut self) {
        self.ranges.sort_by_key(|r| (r.dst_lo, r.seq));
    }

    /// The trie entry reached by the full sequence `code_points`.
    fn trie_entry(&self, code_points: &[u32]) -> Option<ReverseEntry> {
        let (first, rest) = code_points.split_first()?;
        let mut node = self.roots.get(first)?;
        for cp in rest {
            node = node.ligatures.get(cp)?;
        }
        node.entry
    }

    /// The newest range entry covering `cp` whose resulting code is accepted
    /// by `accept`.
    fn range_entry(&self, cp: u32, accept: &dyn Fn(CharCode) -> bool) -> Option<ReverseEntry> {
        let end = self.ranges.partition_point(|r| r.dst_lo <= cp);
        let mut best: Option<ReverseEntry> = None;
        for range in self.ranges[..end].iter().rev() {
            if u64::from(range.dst_lo) + u64::from(self.max_range_size) <= u64::from(cp) {
                break;
            }
            let offset = cp - range.dst_lo;
            if offset >= range.size {
                continue;
            }
            let code = CharCode::with_size(
                range.src_lo.code.wrapping_add(offset),
                range.src_lo.code_space_size,
            );
            if !accept(code) {
                continue;
            }
            if best.is_none_or(|b| range.seq > b.seq) {
                best = Some(ReverseEntry {
                    code,
                    seq: range.seq,
                });
            }
        }
        best
    }

    /// Look up the code for the exact sequence `code_points`.
    ///
    /// `accept` filters codes produced by range arithmetic; codes that are
    /// shadowed by an exact mapping must be rejected by the caller.
    pub fn get(&self, code_points: &[u32], accept: &dyn Fn(CharCode) -> bool) -> Option<CharCode> {
        let trie = self.trie_entry(code_points);
        let range = match code_points {
            [cp] => self.range_entry(*cp, accept),
            _ => None,
        };
        newest(trie, range).map(|e| e.code)
    }

    /// Greedy longest match of the text at `chars`.
    ///
    /// On success the iterator is advanced past the matched characters; on
    /// failure it is left untouched.
    pub fn next(&self, chars: &mut Chars<'_>, accept: &dyn Fn(CharCode) -> bool) -> Option<CharCode> {
        let mut probe = chars.clone();
        let first = u32::from(probe.next()?);
        let after_first = probe.clone();

        let mut best_ligature: Option<(ReverseEntry, Chars<'_>)> = None;
        if let Some(mut node) = self.roots.get(&first) {
            loop {
                let Some(ch) = probe.next() else { break };
                let Some(next) = node.ligatures.get(&u32::from(ch)) else {
                    break;
                };
                node = next;
                if let Some(entry) = node.entry {
                    best_ligature = Some((entry, probe.clone()));
                }
            }
        }

        if let Some((entry, rest)) = best_ligature {
            *chars = rest;
            return Some(entry.code);
        }

        let single = newest(
            self.roots.get(&first).and_then(|n| n.entry),
            self.range_entry(first, accept),
        )?;
        *chars = after_first;
        Some(single.code)
    }

    /// True if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty() && self.ranges.is_empty()
    }
}

fn newest(a: Option<ReverseEntry>, b: Option<ReverseEntry>) -> Option<ReverseEntry> {
    match (a, b) {
        (Some(a), Some(b)) => Some(if b.seq > a.seq { b } else { a }),
        (a, b) => a.or(b),
    }
}
