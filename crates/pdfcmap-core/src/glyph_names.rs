//! Glyph name to Unicode resolution.
//!
//! Resolves PostScript glyph names the way PDF consumers interpret them:
//! Adobe Glyph List lookup, `uniXXXX[XXXX...]` and `uXXXX[XX]` forms,
//! `.suffix` variants and `a_b` ligature components.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::code_point_span::CodePointSpan;
use crate::glyph_list::GLYPH_LIST;

/// Look up a glyph name in the Adobe Glyph List only.
pub fn glyph_list_lookup(name: &str) -> Option<char> {
    GLYPH_LIST
        .binary_search_by(|(n, _)| n.as_bytes().cmp(name.as_bytes()))
        .ok()
        .map(|idx| GLYPH_LIST[idx].1)
}

/// Resolve a glyph name to the code points it stands for.
///
/// Returns `None` for names that carry no Unicode meaning, such as `.notdef`.
pub fn code_points_from_glyph_name(name: &str) -> Option<CodePointSpan> {
    // Variant suffixes ("a.sc", "one.oldstyle") do not change the character.
    let base = match name.find('.') {
        Some(0) | None => name,
        Some(dot) => &name[..dot],
    };
    if base.is_empty() || base == ".notdef" {
        return None;
    }

    if base.contains('_') {
        let mut span = Vec::new();
        for component in base.split('_') {
            span.extend_from_slice(&component_code_points(component)?);
        }
        return (!span.is_empty()).then(|| CodePointSpan::from_slice(&span));
    }
    component_code_points(base).map(|cps| CodePointSpan::from_slice(&cps))
}

/// Resolve a glyph name that must stand for exactly one code point.
pub fn code_point_from_glyph_name(name: &str) -> Option<u32> {
    match code_points_from_glyph_name(name)?.as_slice() {
        [cp] => Some(*cp),
        _ => None,
    }
}

fn component_code_points(component: &str) -> Option<Vec<u32>> {
    if let Some(ch) = glyph_list_lookup(component) {
        return Some(vec![u32::from(ch)]);
    }
    if let Some(hex) = component.strip_prefix("uni") {
        return parse_uni_sequence(hex);
    }
    if let Some(hex) = component.strip_prefix('u') {
        return parse_u_scalar(hex).map(|cp| vec![cp]);
    }
    None
}

/// `uniXXXX[XXXX...]`: uppercase BMP values outside the surrogate block.
fn parse_uni_sequence(hex: &str) -> Option<Vec<u32>> {
    if hex.is_empty() || hex.len() % 4 != 0 || !is_upper_hex(hex) {
        return None;
    }
    let mut cps = Vec::with_capacity(hex.len() / 4);
    for chunk in hex.as_bytes().chunks(4) {
        let text = std::str::from_utf8(chunk).ok()?;
        let cp = u32::from_str_radix(text, 16).ok()?;
        if (0xD800..=0xDFFF).contains(&cp) {
            return None;
        }
        cps.push(cp);
    }
    Some(cps)
}

/// `uXXXX` to `uXXXXXX`: a single Unicode scalar.
fn parse_u_scalar(hex: &str) -> Option<u32> {
    if !(4..=6).contains(&hex.len()) || !is_upper_hex(hex) {
        return None;
    }
    let cp = u32::from_str_radix(hex, 16).ok()?;
    char::from_u32(cp).map(u32::from)
}

fn is_upper_hex(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b))
}

fn reverse_glyph_list() -> &'static HashMap<u32, &'static str> {
    static REVERSE: OnceLock<HashMap<u32, &'static str>> = OnceLock::new();
    REVERSE.get_or_init(|| {
        let mut map: HashMap<u32, &'static str> = HashMap::with_capacity(GLYPH_LIST.len());
        for (name, ch) in GLYPH_LIST {
            map.entry(u32::from(*ch))
                .and_modify(|existing| {
                    if (name.len(), *name) < (existing.len(), *existing) {
                        *existing = name;
                    }
                })
                .or_insert(name);
        }
        map
    })
}

/// The Adobe Glyph List name of `cp`, if it has one.
///
/// When several names share a code point the shortest one is chosen.
pub fn glyph_list_name(cp: u32) -> Option<&'static str> {
    reverse_glyph_list().get(&cp).copied()
}

/// A glyph name for `cp`: the glyph list name, or the `uniXXXX`/`uXXXXXX` form.
pub fn glyph_name_for_code_point(cp: u32) -> String {
    match glyph_list_name(cp) {
        Some(name) => name.to_string(),
        None if cp <= 0xFFFF => format!("uni{cp:04X}"),
        None => format!("u{cp:06X}"),
    }
}
