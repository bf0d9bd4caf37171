//! Compact binary serialization of a [`CharCodeMap`].
//!
//! Layout, all integers big-endian:
//!
//! ```text
//! u16 mapping count
//!   per mapping: u8 code size, code (code size bytes), u8 n, n x u32
//! u16 range count
//!   per range:   u8 code size, code (code size bytes), u16 range size, u8 n, n x u32
//! ```
//!
//! Ranges longer than `u16::MAX` codes are split on write.

use crate::char_code::{CharCode, MAX_CODE_SPACE_SIZE};
use crate::char_code_map::CharCodeMap;
use crate::error::PdfError;

/// Serialize `map` into the compact format.
///
/// # Errors
///
/// Returns [`PdfError::ValueOutOfRange`] if the map has more than `u16::MAX`
/// entries of either kind or a destination longer than 255 code points.
pub fn write_compact(map: &CharCodeMap) -> Result<Vec<u8>, PdfError> {
    let mut buf = Vec::new();

    write_count(&mut buf, map.mapping_count(), "mappings")?;
    for (code, points) in map.mappings() {
        buf.push(code.code_space_size);
        code.append_to(&mut buf);
        write_points(&mut buf, points)?;
    }

    let mut chunks = Vec::new();
    for range in map.ranges() {
        let mut offset = 0u32;
        while offset < range.size {
            let len = (range.size - offset).min(u32::from(u16::MAX));
            let lo = CharCode::with_size(
                range.src_code_lo.code.wrapping_add(offset),
                range.src_code_lo.code_space_size,
            );
            chunks.push((lo, len as u16, range.dst_code_lo.offset_last(offset)));
            offset += len;
        }
    }
    write_count(&mut buf, chunks.len(), "ranges")?;
    for (lo, len, dst) in chunks {
        buf.push(lo.code_space_size);
        lo.append_to(&mut buf);
        buf.extend_from_slice(&len.to_be_bytes());
        write_points(&mut buf, &dst)?;
    }
    Ok(buf)
}

fn write_count(buf: &mut Vec<u8>, count: usize, what: &str) -> Result<(), PdfError> {
    let count = u16::try_from(count)
        .map_err(|_| PdfError::ValueOutOfRange(format!("too many {what}: {count}")))?;
    buf.extend_from_slice(&count.to_be_bytes());
    Ok(())
}

fn write_points(buf: &mut Vec<u8>, points: &[u32]) -> Result<(), PdfError> {
    let n = u8::try_from(points.len()).map_err(|_| {
        PdfError::ValueOutOfRange(format!("destination too long: {} code points", points.len()))
    })?;
    buf.push(n);
    for cp in points {
        buf.extend_from_slice(&cp.to_be_bytes());
    }
    Ok(())
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], PdfError> {
        let end = self.pos.checked_add(n).filter(|end| *end <= self.data.len());
        let Some(end) = end else {
            return Err(PdfError::ParseError(format!(
                "compact map truncated at offset {}",
                self.pos
            )));
        };
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8, PdfError> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16, PdfError> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> Result<u32, PdfError> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn code(&mut self) -> Result<CharCode, PdfError> {
        let size = self.u8()?;
        if size == 0 || size > MAX_CODE_SPACE_SIZE {
            return Err(PdfError::ParseError(format!("invalid code size {size}")));
        }
        let bytes = self.take(usize::from(size))?;
        CharCode::from_bytes(bytes)
            .ok_or_else(|| PdfError::ParseError(format!("invalid code size {size}")))
    }

    fn points(&mut self) -> Result<Vec<u32>, PdfError> {
        let n = self.u8()?;
        (0..n).map(|_| self.u32()).collect()
    }
}

/// Deserialize a map written by [`write_compact`].
///
/// # Errors
///
/// Returns [`PdfError::ParseError`] on truncated or malformed input.
pub fn read_compact(data: &[u8]) -> Result<CharCodeMap, PdfError> {
    let mut reader = Reader { data, pos: 0 };
    let mut map = CharCodeMap::new();

    let mappings = reader.u16()?;
    for _ in 0..mappings {
        let code = reader.code()?;
        let points = reader.points()?;
        map.push_mapping(code, &points)?;
    }

    let ranges = reader.u16()?;
    for _ in 0..ranges {
        let code = reader.code()?;
        let size = reader.u16()?;
        let points = reader.points()?;
        map.push_range(code, u32::from(size), &points)?;
    }

    if reader.pos != data.len() {
        return Err(PdfError::ParseError(format!(
            "{} trailing bytes after compact map",
            data.len() - reader.pos
        )));
    }
    Ok(map)
}
