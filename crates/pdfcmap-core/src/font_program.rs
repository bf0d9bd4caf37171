//! Font program collaborator interface.
//!
//! Encodings never read font files themselves. Glyph lookups go through the
//! [`FontProgram`] trait, which the font layer implements on top of whatever
//! font parser it uses. [`GlyphTable`] is a plain in-memory implementation
//! for fonts whose tables were already extracted, and for tests.

use std::collections::HashMap;

/// Kind of font program, as far as glyph lookup rules are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FontProgramKind {
    /// Type 1 or CFF-based program: glyphs are looked up by name.
    Type1,
    /// TrueType or OpenType with `glyf` outlines: glyphs are looked up via cmap subtables.
    TrueType,
    /// Type 3 or unknown program.
    #[default]
    Other,
}

impl FontProgramKind {
    /// True for Type 1 and CFF programs.
    pub fn is_type1_kind(&self) -> bool {
        matches!(self, FontProgramKind::Type1)
    }

    /// True for TrueType programs.
    pub fn is_truetype_kind(&self) -> bool {
        matches!(self, FontProgramKind::TrueType)
    }
}

/// Glyph lookup capability of a font program.
///
/// Only [`kind`](FontProgram::kind) and [`try_get_gid`](FontProgram::try_get_gid)
/// are required. The remaining lookups default to "not available".
pub trait FontProgram {
    /// The program kind.
    fn kind(&self) -> FontProgramKind;

    /// True if [`try_get_gid`](FontProgram::try_get_gid) is backed by a real
    /// Unicode to glyph table.
    fn has_unicode_mapping(&self) -> bool {
        true
    }

    /// Glyph index of the Unicode scalar `cp`.
    fn try_get_gid(&self, cp: u32) -> Option<u32>;

    /// Apply the program's glyph substitutions (e.g. ligatures) to `gids`.
    ///
    /// After the call `backward_map[i]` holds how many input code points the
    /// output glyph `gids[i]` stands for. `{ 32, 102, 105 }` substituted into
    /// `{ 32, 174 }` yields a backward map of `{ 1, 2 }`. The default performs
    /// no substitution.
    fn substitute_gids(&self, gids: &mut Vec<u32>, backward_map: &mut Vec<u8>) {
        backward_map.clear();
        backward_map.resize(gids.len(), 1);
    }

    /// Glyph index of a glyph name, from the program's name table.
    fn gid_from_glyph_name(&self, _name: &str) -> Option<u32> {
        None
    }

    /// Glyph index from a Microsoft Unicode (3,1) cmap subtable.
    fn gid_from_unicode_cmap(&self, _cp: u32) -> Option<u32> {
        None
    }

    /// Glyph index from a Macintosh Roman (1,0) cmap subtable.
    fn gid_from_mac_roman_cmap(&self, _code: u8) -> Option<u32> {
        None
    }

    /// The program's built-in encoding as `(code, glyph name)` pairs, if any.
    fn builtin_encoding(&self) -> Option<Vec<(u8, String)>> {
        None
    }
}

/// In-memory [`FontProgram`] built from already extracted tables.
#[derive(Debug, Clone, Default)]
pub struct GlyphTable {
    kind: FontProgramKind,
    unicode: HashMap<u32, u32>,
    names: HashMap<String, u32>,
    mac_roman: HashMap<u8, u32>,
    ligatures: Vec<(Vec<u32>, u32)>,
    builtin: Vec<(u8, String)>,
}

impl GlyphTable {
    /// An empty table of the given kind.
    pub fn new(kind: FontProgramKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Map the Unicode scalar `cp` to `gid`.
    pub fn with_unicode(mut self, cp: u32, gid: u32) -> Self {
        self.unicode.insert(cp, gid);
        self
    }

    /// Map every char of `text` to consecutive glyph indices from `first_gid`.
    pub fn with_text(mut self, text: &str, first_gid: u32) -> Self {
        for (i, ch) in text.chars().enumerate() {
            self.unicode.insert(u32::from(ch), first_gid + i as u32);
        }
        self
    }

    /// Map the glyph name `name` to `gid`.
    pub fn with_glyph_name(mut self, name: impl Into<String>, gid: u32) -> Self {
        self.names.insert(name.into(), gid);
        self
    }

    /// Map a Macintosh Roman code to `gid`.
    pub fn with_mac_roman(mut self, code: u8, gid: u32) -> Self {
        self.mac_roman.insert(code, gid);
        self
    }

    /// Register a substitution of the glyph sequence `input` by `output`.
    pub fn with_ligature(mut self, input: &[u32], output: u32) -> Self {
        if input.len() > 1 {
            self.ligatures.push((input.to_vec(), output));
        }
        self
    }

    /// Set the program's built-in encoding entry for `code`.
    pub fn with_builtin_code(mut self, code: u8, name: impl Into<String>) -> Self {
        self.builtin.retain(|(c, _)| *c != code);
        self.builtin.push((code, name.into()));
        self
    }
}

impl FontProgram for GlyphTable {
    fn kind(&self) -> FontProgramKind {
        self.kind
    }

    fn has_unicode_mapping(&self) -> bool {
        !self.unicode.is_empty()
    }

    fn try_get_gid(&self, cp: u32) -> Option<u32> {
        self.unicode.get(&cp).copied()
    }

    fn substitute_gids(&self, gids: &mut Vec<u32>, backward_map: &mut Vec<u8>) {
        backward_map.clear();
        if self.ligatures.is_empty() {
            backward_map.resize(gids.len(), 1);
            return;
        }

        let mut out = Vec::with_capacity(gids.len());
        let mut i = 0;
        while i < gids.len() {
            // Longest registered substitution starting at i.
            let best = self
                .ligatures
                .iter()
                .filter(|(input, _)| gids[i..].starts_with(input))
                .max_by_key(|(input, _)| input.len());
            match best {
                Some((input, output)) => {
                    out.push(*output);
                    backward_map.push(input.len().min(u8::MAX as usize) as u8);
                    i += input.len();
                }
                None => {
                    out.push(gids[i]);
                    backward_map.push(1);
                    i += 1;
                }
            }
        }
        *gids = out;
    }

    fn gid_from_glyph_name(&self, name: &str) -> Option<u32> {
        self.names.get(name).copied()
    }

    fn gid_from_unicode_cmap(&self, cp: u32) -> Option<u32> {
        if self.kind.is_truetype_kind() {
            self.unicode.get(&cp).copied()
        } else {
            None
        }
    }

    fn gid_from_mac_roman_cmap(&self, code: u8) -> Option<u32> {
        self.mac_roman.get(&code).copied()
    }

    fn builtin_encoding(&self) -> Option<Vec<(u8, String)>> {
        if self.builtin.is_empty() {
            None
        } else {
            Some(self.builtin.clone())
        }
    }
}
