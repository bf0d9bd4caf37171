//! Bidirectional character code to code point map.
//!
//! [`CharCodeMap`] stores exact `code -> code points` mappings plus compact
//! ranges where consecutive codes map to consecutive final code points. The
//! reverse direction (code points to code) is served by a [`ReverseMap`]
//! built on first use and discarded whenever the map is mutated.

use std::collections::BTreeMap;
use std::str::Chars;
use std::sync::OnceLock;

use crate::char_code::{CharCode, MAX_CODE_SPACE_SIZE};
use crate::code_point_span::CodePointSpan;
use crate::error::PdfError;
use crate::limits::{CodeSpaceRange, EncodingLimits};
use crate::reverse_map::ReverseMap;

/// A contiguous run of codes mapping to a counting sequence of code points.
///
/// Code `src_code_lo + i` maps to `dst_code_lo` with its last code point
/// advanced by `i`, for `i < size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeUnitRange {
    /// First code of the range.
    pub src_code_lo: CharCode,
    /// Number of codes in the range.
    pub size: u32,
    /// Code points of the first code.
    pub dst_code_lo: CodePointSpan,
    seq: u64,
}

impl CodeUnitRange {
    /// Last code of the range.
    pub fn src_code_hi(&self) -> CharCode {
        CharCode::with_size(
            self.src_code_lo.code.wrapping_add(self.size.saturating_sub(1)),
            self.src_code_lo.code_space_size,
        )
    }

    fn end(&self) -> u64 {
        u64::from(self.src_code_lo.code) + u64::from(self.size)
    }

    fn code_points_at(&self, code: u32) -> CodePointSpan {
        let offset = code - self.src_code_lo.code;
        if offset == 0 {
            self.dst_code_lo.clone()
        } else {
            self.dst_code_lo.offset_last(offset)
        }
    }

    /// The part of this range starting at `new_lo`, keeping its sequence number.
    fn tail_from(&self, new_lo: u32) -> CodeUnitRange {
        let offset = new_lo - self.src_code_lo.code;
        CodeUnitRange {
            src_code_lo: CharCode::with_size(new_lo, self.src_code_lo.code_space_size),
            size: self.size - offset,
            dst_code_lo: self.dst_code_lo.offset_last(offset),
            seq: self.seq,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Mapping {
    points: CodePointSpan,
    seq: u64,
}

/// Bidirectional map between character codes and code point sequences.
///
/// Later insertions win: an exact mapping replaces the previous one for the
/// same code, a range replaces the overlapped part of older ranges, and the
/// reverse direction resolves collisions in favor of the newest entry.
/// Exact mappings take precedence over ranges on forward lookups.
#[derive(Debug, Clone)]
pub struct CharCodeMap {
    mappings: BTreeMap<CharCode, Mapping>,
    // One bucket per code byte length; ranges within a bucket never overlap.
    ranges: [BTreeMap<u32, CodeUnitRange>; MAX_CODE_SPACE_SIZE as usize],
    limits: EncodingLimits,
    next_seq: u64,
    reverse: OnceLock<ReverseMap>,
}

impl Default for CharCodeMap {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for CharCodeMap {
    fn eq(&self, other: &Self) -> bool {
        let key = |r: &CodeUnitRange| (r.src_code_lo, r.size, r.dst_code_lo.clone());
        self.mappings().eq(other.mappings())
            && self.ranges().map(key).eq(other.ranges().map(key))
            && self.limits == other.limits
    }
}

impl CharCodeMap {
    /// An empty map with invalid limits.
    pub fn new() -> Self {
        Self {
            mappings: BTreeMap::new(),
            ranges: Default::default(),
            limits: EncodingLimits::invalid(),
            next_seq: 0,
            reverse: OnceLock::new(),
        }
    }

    /// True if the map has neither exact mappings nor ranges.
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty() && self.ranges.iter().all(BTreeMap::is_empty)
    }

    /// Code-space limits of every inserted code.
    pub fn limits(&self) -> &EncodingLimits {
        &self.limits
    }

    /// Number of exact mappings.
    pub fn mapping_count(&self) -> usize {
        self.mappings.len()
    }

    /// Number of compact ranges.
    pub fn range_count(&self) -> usize {
        self.ranges.iter().map(BTreeMap::len).sum()
    }

    /// Exact mappings in code order.
    pub fn mappings(&self) -> impl Iterator<Item = (&CharCode, &CodePointSpan)> {
        self.mappings.iter().map(|(code, m)| (code, &m.points))
    }

    /// Compact ranges, grouped by code byte length and ordered by first code.
    pub fn ranges(&self) -> impl Iterator<Item = &CodeUnitRange> {
        self.ranges.iter().flat_map(BTreeMap::values)
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.reverse = OnceLock::new();
        seq
    }

    /// Insert or overwrite the exact mapping for `code`.
    ///
    /// An empty `code_points` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::InvalidArgument`] if the code byte length is not in `1..=4`.
    pub fn push_mapping(&mut self, code: CharCode, code_points: &[u32]) -> Result<(), PdfError> {
        if code_points.is_empty() {
            return Ok(());
        }
        self.push_span(code, CodePointSpan::from_slice(code_points))
    }

    /// Insert or overwrite the exact mapping for `code` with an owned span.
    pub fn push_span(&mut self, code: CharCode, points: CodePointSpan) -> Result<(), PdfError> {
        if points.is_empty() {
            return Ok(());
        }
        check_code_size(code)?;
        let seq = self.bump_seq();
        self.mappings.insert(code, Mapping { points, seq });
        self.limits.update(code);
        Ok(())
    }

    /// Insert a compact range of `size` codes starting at `src_code_lo`.
    ///
    /// A zero size or an empty destination is ignored and a size of one is
    /// stored as an exact mapping. The new range replaces the overlapped part
    /// of any older range of the same code byte length.
    ///
    /// Returns `true` if older ranges overlapped and had to be trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::InvalidArgument`] if the code byte length is not in `1..=4`.
    pub fn push_range(
        &mut self,
        src_code_lo: CharCode,
        size: u32,
        dst_code_lo: &[u32],
    ) -> Result<bool, PdfError> {
        if size == 0 || dst_code_lo.is_empty() {
            return Ok(false);
        }
        if size == 1 {
            self.push_mapping(src_code_lo, dst_code_lo)?;
            return Ok(false);
        }
        check_code_size(src_code_lo)?;

        let seq = self.bump_seq();
        let range = CodeUnitRange {
            src_code_lo,
            size,
            dst_code_lo: CodePointSpan::from_slice(dst_code_lo),
            seq,
        };
        let lo = src_code_lo.code;
        let end = range.end();
        let bucket = &mut self.ranges[usize::from(src_code_lo.code_space_size - 1)];

        let mut overlapping = Vec::new();
        if let Some((&prev_lo, prev)) = bucket.range(..lo).next_back() {
            if prev.end() > u64::from(lo) {
                overlapping.push(prev_lo);
            }
        }
        overlapping.extend(
            bucket
                .range(lo..)
                .take_while(|(next_lo, _)| u64::from(**next_lo) < end)
                .map(|(next_lo, _)| *next_lo),
        );

        let had_overlap = !overlapping.is_empty();
        for old_lo in overlapping {
            let Some(old) = bucket.remove(&old_lo) else {
                continue;
            };
            if old_lo < lo {
                let mut head = old.clone();
                head.size = lo - old_lo;
                bucket.insert(old_lo, head);
            }
            if old.end() > end {
                // end < old.end() <= u32::MAX + 1, so end fits in u32.
                let tail = old.tail_from(end as u32);
                bucket.insert(tail.src_code_lo.code, tail);
            }
        }
        bucket.insert(lo, range);

        if had_overlap {
            warn_event!(code = %src_code_lo, size, "overlapping code unit ranges found");
        }

        self.limits.update(src_code_lo);
        let src_code_hi = CharCode::with_size(
            lo.wrapping_add(size - 1),
            src_code_lo.code_space_size,
        );
        if src_code_hi.code > self.limits.last_char.code {
            self.limits.last_char = src_code_hi;
        }
        Ok(had_overlap)
    }

    /// Widen the code size limits without adding a mapping.
    pub fn update_code_size_limits(&mut self, size: u8) {
        self.limits.update_code_size(size);
    }

    /// Look up the code points of `code`: exact mappings first, then ranges.
    pub fn try_get_code_points(&self, code: CharCode) -> Option<CodePointSpan> {
        if let Some(m) = self.mappings.get(&code) {
            return Some(m.points.clone());
        }
        self.find_range(code).map(|r| r.code_points_at(code.code))
    }

    fn find_range(&self, code: CharCode) -> Option<&CodeUnitRange> {
        let size = code.code_space_size;
        if size == 0 || size > MAX_CODE_SPACE_SIZE {
            return None;
        }
        let (_, range) = self.ranges[usize::from(size - 1)]
            .range(..=code.code)
            .next_back()?;
        (u64::from(code.code) < range.end()).then_some(range)
    }

    /// The reverse index, built on first use.
    pub fn reverse_map(&self) -> &ReverseMap {
        self.reverse.get_or_init(|| {
            let mut reverse = ReverseMap::default();
            for (code, m) in &self.mappings {
                reverse.push(&m.points, *code, m.seq);
            }
            for range in self.ranges() {
                if range.dst_code_lo.len() == 1 {
                    reverse.push_range(range.src_code_lo, range.size, range.dst_code_lo[0], range.seq);
                    continue;
                }
                // Ligature-prefixed ranges are rare and small: expand them.
                for i in 0..range.size {
                    let code = CharCode::with_size(
                        range.src_code_lo.code.wrapping_add(i),
                        range.src_code_lo.code_space_size,
                    );
                    if !self.mappings.contains_key(&code) {
                        reverse.push(&range.dst_code_lo.offset_last(i), code, range.seq);
                    }
                }
            }
            reverse.finish();
            reverse
        })
    }

    fn accept_range_code(&self) -> impl Fn(CharCode) -> bool + '_ {
        move |code| !self.mappings.contains_key(&code)
    }

    /// The code mapped to the exact sequence `code_points`.
    pub fn try_get_char_code(&self, code_points: &[u32]) -> Option<CharCode> {
        if code_points.is_empty() {
            return None;
        }
        self.reverse_map().get(code_points, &self.accept_range_code())
    }

    /// The code mapped to the single code point `cp`.
    pub fn try_get_char_code_for(&self, cp: u32) -> Option<CharCode> {
        self.try_get_char_code(&[cp])
    }

    /// Greedy longest-match lookup at the front of `chars`.
    ///
    /// Advances the iterator past the matched characters on success only.
    pub fn try_get_next_char_code(&self, chars: &mut Chars<'_>) -> Option<CharCode> {
        self.reverse_map().next(chars, &self.accept_range_code())
    }

    /// True if the map is a contiguous `code -> code` identity.
    ///
    /// Exact mappings qualify only when there are no ranges, they cover the
    /// whole `first_char..=last_char` interval and each maps to its own value.
    /// Ranges qualify when they are contiguous and each starts at its own value.
    /// An empty map is not an identity.
    pub fn is_trivial_identity(&self) -> bool {
        if !self.mappings.is_empty() {
            if self.range_count() != 0 {
                return false;
            }
            let span = u64::from(self.limits.last_char.code) - u64::from(self.limits.first_char.code) + 1;
            if self.mappings.len() as u64 != span {
                return false;
            }
            let mut expected = self.limits.first_char.code;
            for (code, m) in &self.mappings {
                if m.points.len() != 1 || code.code != m.points[0] || code.code != expected {
                    return false;
                }
                expected = expected.wrapping_add(1);
            }
            return true;
        }

        let mut ranges = self.ranges().peekable();
        if ranges.peek().is_none() {
            return false;
        }
        let mut upper: Option<u64> = None;
        for range in ranges {
            if range.dst_code_lo.len() != 1 || range.dst_code_lo[0] != range.src_code_lo.code {
                return false;
            }
            if let Some(upper) = upper {
                if upper != u64::from(range.src_code_lo.code) {
                    return false;
                }
            }
            upper = Some(range.end());
        }
        true
    }

    /// Derive the code space ranges that cover every code of the map.
    ///
    /// Codes and ranges of the same byte length are merged into one range by
    /// taking the per-byte minimum and maximum.
    pub fn get_code_space_ranges(&self) -> Vec<CodeSpaceRange> {
        self.code_space_ranges_checked().0
    }

    /// Like [`get_code_space_ranges`](Self::get_code_space_ranges), also
    /// reporting whether ranges of different byte lengths overlap on their
    /// first byte.
    pub fn code_space_ranges_checked(&self) -> (Vec<CodeSpaceRange>, bool) {
        let mut items: Vec<(CharCode, u32)> = self
            .mappings
            .keys()
            .map(|code| (*code, 1))
            .chain(self.ranges().map(|r| (r.src_code_lo, r.size)))
            .collect();
        if items.is_empty() {
            return (Vec::new(), false);
        }
        items.sort_by(|a, b| compare_by_bytes(a.0, b.0));

        let hi_of = |(lo, size): (CharCode, u32)| {
            CharCode::with_size(lo.code.wrapping_add(size - 1), lo.code_space_size)
        };

        let mut overlapping = false;
        let mut prev_hi = hi_of(items[0]);
        for item in &items[1..] {
            if item.0.code_space_size != prev_hi.code_space_size
                && item.0.byte_at(0) <= prev_hi.byte_at(0)
            {
                overlapping = true;
            }
            prev_hi = hi_of(*item);
        }
        if overlapping {
            warn_event!("overlapping code space ranges");
        }

        let mut ret: Vec<CodeSpaceRange> = Vec::new();
        for item in items {
            let hi = hi_of(item);
            match ret.last_mut() {
                Some(prev) if prev.code_space_size == item.0.code_space_size => {
                    merge_bytes(prev, item.0.code, hi.code);
                }
                _ => ret.push(CodeSpaceRange::new(item.0.code, hi.code, item.0.code_space_size)),
            }
        }
        (ret, overlapping)
    }
}

fn check_code_size(code: CharCode) -> Result<(), PdfError> {
    if code.code_space_size == 0 || code.code_space_size > MAX_CODE_SPACE_SIZE {
        return Err(PdfError::InvalidArgument(format!(
            "code unit must have a size in [1,4], got {}",
            code.code_space_size
        )));
    }
    Ok(())
}

/// Order codes by their bytes from the most significant one, then by length.
fn compare_by_bytes(a: CharCode, b: CharCode) -> std::cmp::Ordering {
    let common = a.code_space_size.min(b.code_space_size);
    for i in 0..common {
        match a.byte_at(i).cmp(&b.byte_at(i)) {
            std::cmp::Ordering::Equal => continue,
            other => return other,
        }
    }
    a.code_space_size.cmp(&b.code_space_size)
}

/// Widen `range` byte by byte to include `[lo, hi]`.
fn merge_bytes(range: &mut CodeSpaceRange, lo: u32, hi: u32) {
    for i in 0..u32::from(range.code_space_size) {
        let shift = i * 8;
        let mask = 0xFFu32 << shift;
        if (lo & mask) < (range.code_lo & mask) {
            range.code_lo = (range.code_lo & !mask) | (lo & mask);
        }
        if (hi & mask) > (range.code_hi & mask) {
            range.code_hi = (range.code_hi & !mask) | (hi & mask);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c1(code: u32) -> CharCode {
        CharCode::with_size(code, 1)
    }

    fn c2(code: u32) -> CharCode {
        CharCode::with_size(code, 2)
    }

    fn cps(map: &CharCodeMap, code: CharCode) -> Option<Vec<u32>> {
        map.try_get_code_points(code).map(|s| s.to_vec())
    }

    // --- push_mapping ---

    #[test]
    fn push_mapping_and_lookup() {
        let mut map = CharCodeMap::new();
        map.push_mapping(c1(0x41), &[0x41]).unwrap();
        assert_eq!(cps(&map, c1(0x41)), Some(vec![0x41]));
        assert_eq!(cps(&map, c2(0x41)), None);
        assert_eq!(map.try_get_char_code(&[0x41]), Some(c1(0x41)));
    }

    #[test]
    fn push_mapping_ignores_empty_span() {
        let mut map = CharCodeMap::new();
        map.push_mapping(c1(1), &[]).unwrap();
        assert!(map.is_empty());
        assert!(!map.limits().are_valid());
    }

    #[test]
    fn push_mapping_rejects_zero_size_code() {
        let mut map = CharCodeMap::new();
        let err = map.push_mapping(CharCode::with_size(1, 0), &[0x41]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid argument: code unit must have a size in [1,4], got 0"
        );
    }

    #[test]
    fn push_mapping_overwrites_and_last_wins_in_reverse() {
        let mut map = CharCodeMap::new();
        map.push_mapping(c1(1), &[0x41]).unwrap();
        map.push_mapping(c1(2), &[0x41]).unwrap();
        assert_eq!(map.try_get_char_code(&[0x41]), Some(c1(2)));
        map.push_mapping(c1(1), &[0x41]).unwrap();
        assert_eq!(map.try_get_char_code(&[0x41]), Some(c1(1)));
        map.push_mapping(c1(1), &[0x42]).unwrap();
        assert_eq!(cps(&map, c1(1)), Some(vec![0x42]));
    }

    #[test]
    fn limits_track_union_of_codes() {
        let mut map = CharCodeMap::new();
        map.push_mapping(c2(0x0100), &[1]).unwrap();
        map.push_mapping(c1(0x20), &[2]).unwrap();
        let limits = map.limits();
        assert_eq!(limits.min_code_size, 1);
        assert_eq!(limits.max_code_size, 2);
        assert_eq!(limits.first_char, c1(0x20));
        assert_eq!(limits.last_char, c2(0x0100));
    }

    // --- push_range ---

    #[test]
    fn push_range_expands_last_code_point() {
        let mut map = CharCodeMap::new();
        assert!(!map.push_range(c2(0x20), 5, &[32]).unwrap());
        assert_eq!(map.range_count(), 1);
        for i in 0..5 {
            assert_eq!(cps(&map, c2(0x20 + i)), Some(vec![32 + i]));
        }
        assert_eq!(cps(&map, c2(0x25)), None);
        assert_eq!(cps(&map, c2(0x1F)), None);
        assert_eq!(map.limits().first_char, c2(0x20));
        assert_eq!(map.limits().last_char, c2(0x24));
    }

    #[test]
    fn push_range_with_ligature_prefix() {
        let mut map = CharCodeMap::new();
        map.push_range(c1(0x10), 3, &[0x66, 0x61]).unwrap();
        assert_eq!(cps(&map, c1(0x12)), Some(vec![0x66, 0x63]));
        assert_eq!(map.try_get_char_code(&[0x66, 0x62]), Some(c1(0x11)));
    }

    #[test]
    fn push_range_of_one_is_a_mapping() {
        let mut map = CharCodeMap::new();
        map.push_range(c1(5), 1, &[0x41]).unwrap();
        assert_eq!(map.range_count(), 0);
        assert_eq!(map.mapping_count(), 1);
    }

    #[test]
    fn push_range_ignores_degenerate_input() {
        let mut map = CharCodeMap::new();
        map.push_range(c1(5), 0, &[0x41]).unwrap();
        map.push_range(c1(5), 4, &[]).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn newer_range_overrides_overlapped_part() {
        let mut map = CharCodeMap::new();
        map.push_range(c1(0x00), 0x10, &[0x100]).unwrap();
        assert!(map.push_range(c1(0x04), 4, &[0x41]).unwrap());
        assert_eq!(cps(&map, c1(0x03)), Some(vec![0x103]));
        assert_eq!(cps(&map, c1(0x04)), Some(vec![0x41]));
        assert_eq!(cps(&map, c1(0x07)), Some(vec![0x44]));
        // The tail of the older range stays mapped.
        assert_eq!(cps(&map, c1(0x08)), Some(vec![0x108]));
        assert_eq!(cps(&map, c1(0x0F)), Some(vec![0x10F]));
        assert_eq!(map.range_count(), 3);
    }

    #[test]
    fn newer_range_swallows_following_ranges() {
        let mut map = CharCodeMap::new();
        map.push_range(c1(0x10), 4, &[1]).unwrap();
        map.push_range(c1(0x20), 4, &[2]).unwrap();
        assert!(map.push_range(c1(0x08), 0x1A, &[0x500]).unwrap());
        assert_eq!(map.range_count(), 2);
        assert_eq!(cps(&map, c1(0x21)), Some(vec![0x519]));
        assert_eq!(cps(&map, c1(0x22)), Some(vec![4]));
    }

    #[test]
    fn same_lo_range_is_replaced() {
        let mut map = CharCodeMap::new();
        map.push_range(c1(0x10), 2, &[1]).unwrap();
        assert!(map.push_range(c1(0x10), 4, &[0x20]).unwrap());
        assert_eq!(cps(&map, c1(0x11)), Some(vec![0x21]));
        assert_eq!(cps(&map, c1(0x13)), Some(vec![0x23]));
    }

    #[test]
    fn ranges_of_different_sizes_do_not_interact() {
        let mut map = CharCodeMap::new();
        map.push_range(c1(0x00), 0x80, &[0]).unwrap();
        map.push_range(c2(0x0000), 0x100, &[0x1000]).unwrap();
        assert_eq!(cps(&map, c1(0x41)), Some(vec![0x41]));
        assert_eq!(cps(&map, c2(0x0041)), Some(vec![0x1041]));
    }

    #[test]
    fn exact_mapping_shadows_range() {
        let mut map = CharCodeMap::new();
        map.push_range(c1(0x20), 10, &[0x41]).unwrap();
        map.push_mapping(c1(0x22), &[0x7A]).unwrap();
        assert_eq!(cps(&map, c1(0x22)), Some(vec![0x7A]));
        // 'C' would be 0x22 through the range, but 0x22 is exactly mapped.
        assert_eq!(map.try_get_char_code(&[0x43]), None);
        assert_eq!(map.try_get_char_code(&[0x7A]), Some(c1(0x22)));
        assert_eq!(map.try_get_char_code(&[0x44]), Some(c1(0x23)));
    }

    // --- reverse lookups ---

    #[test]
    fn reverse_map_rebuilt_after_mutation() {
        let mut map = CharCodeMap::new();
        map.push_mapping(c1(1), &[0x41]).unwrap();
        assert_eq!(map.try_get_char_code_for(0x42), None);
        map.push_mapping(c1(2), &[0x42]).unwrap();
        assert_eq!(map.try_get_char_code_for(0x42), Some(c1(2)));
    }

    #[test]
    fn next_char_code_matches_ligatures() {
        let mut map = CharCodeMap::new();
        map.push_mapping(c1(1), &[0x66]).unwrap();
        map.push_mapping(c1(2), &[0x69]).unwrap();
        map.push_mapping(c1(3), &[0x66, 0x69]).unwrap();
        let mut chars = "fif".chars();
        assert_eq!(map.try_get_next_char_code(&mut chars), Some(c1(3)));
        assert_eq!(map.try_get_next_char_code(&mut chars), Some(c1(1)));
        assert_eq!(map.try_get_next_char_code(&mut chars), None);
        assert_eq!(chars.as_str(), "");
    }

    #[test]
    fn empty_span_lookup_is_none() {
        let map = CharCodeMap::new();
        assert_eq!(map.try_get_char_code(&[]), None);
    }

    // --- identity detection ---

    #[test]
    fn contiguous_identity_mappings() {
        let mut map = CharCodeMap::new();
        for code in 0x20..0x25 {
            map.push_mapping(c2(code), &[code]).unwrap();
        }
        assert!(map.is_trivial_identity());
        map.push_mapping(c2(0x30), &[0x30]).unwrap();
        assert!(!map.is_trivial_identity());
    }

    #[test]
    fn non_identity_mapping_detected() {
        let mut map = CharCodeMap::new();
        map.push_mapping(c2(0x20), &[0x20]).unwrap();
        map.push_mapping(c2(0x21), &[0x30]).unwrap();
        assert!(!map.is_trivial_identity());
    }

    #[test]
    fn identity_ranges() {
        let mut map = CharCodeMap::new();
        map.push_range(c2(0x0000), 0x100, &[0]).unwrap();
        map.push_range(c2(0x0100), 0x100, &[0x100]).unwrap();
        assert!(map.is_trivial_identity());
        map.push_range(c2(0x0300), 0x10, &[0x300]).unwrap();
        assert!(!map.is_trivial_identity());
    }

    #[test]
    fn offset_range_is_not_identity() {
        let mut map = CharCodeMap::new();
        map.push_range(c2(0x0000), 0x100, &[1000]).unwrap();
        assert!(!map.is_trivial_identity());
        assert!(!CharCodeMap::new().is_trivial_identity());
    }

    // --- code space ranges ---

    #[test]
    fn code_space_ranges_merge_same_size() {
        let mut map = CharCodeMap::new();
        map.push_mapping(c2(0x8140), &[1]).unwrap();
        map.push_range(c2(0x8240), 0x10, &[2]).unwrap();
        map.push_mapping(c1(0x20), &[3]).unwrap();
        let (ranges, overlapping) = map.code_space_ranges_checked();
        assert!(!overlapping);
        assert_eq!(
            ranges,
            vec![
                CodeSpaceRange::new(0x20, 0x20, 1),
                CodeSpaceRange::new(0x8140, 0x824F, 2),
            ]
        );
    }

    #[test]
    fn code_space_ranges_flag_overlap() {
        let mut map = CharCodeMap::new();
        map.push_range(c1(0x00), 0x90, &[1]).unwrap();
        map.push_mapping(c2(0x8140), &[2]).unwrap();
        let (ranges, overlapping) = map.code_space_ranges_checked();
        assert!(overlapping);
        assert_eq!(ranges.len(), 2);
    }

    #[test]
    fn code_space_ranges_of_empty_map() {
        assert!(CharCodeMap::new().get_code_space_ranges().is_empty());
    }

    #[test]
    fn equality_ignores_reverse_cache() {
        let mut a = CharCodeMap::new();
        a.push_mapping(c1(1), &[0x41]).unwrap();
        let b = a.clone();
        let _ = a.try_get_char_code_for(0x41);
        assert_eq!(a, b);
    }
}
