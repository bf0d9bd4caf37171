//! PostScript tokenizer for CMap programs.
//!
//! Splits a CMap program into keywords (executable names such as
//! `begincmap` or `endbfrange`) and literal values. Only the object syntax
//! a CMap program can contain is recognized; nothing is executed.
//!
//! At [`LanguageLevel::Level1`] `<<` and `>>` are not dictionary delimiters;
//! they come out as plain keywords that a CMap interpreter ignores. Some
//! producers write `/CIDSystemInfo << /Registry (Adobe) def ... >> def`,
//! which is invalid at every language level but reads fine that way.

use crate::error::BackendError;

/// PostScript language level the tokenizer follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanguageLevel {
    /// No dictionary literals; `<<` and `>>` are keywords.
    #[default]
    Level1,
    /// `<< ... >>` is read as a dictionary literal.
    Level2,
}

/// A literal PostScript value.
#[derive(Debug, Clone, PartialEq)]
pub enum PsObject {
    /// Integer number (e.g., `42`, `-7`).
    Integer(i64),
    /// Real number (e.g., `3.14`, `.5`).
    Real(f64),
    /// `true` or `false`.
    Boolean(bool),
    /// The null object.
    Null,
    /// Literal name (e.g., `/Registry`), stored without the leading `/`.
    Name(String),
    /// Literal string delimited by parentheses, stored as raw bytes.
    LiteralString(Vec<u8>),
    /// Hexadecimal string delimited by angle brackets, stored as decoded bytes.
    HexString(Vec<u8>),
    /// Array of values. Executable names inside arrays are stored as names.
    Array(Vec<PsObject>),
    /// Procedure body `{ ... }`, kept unexecuted.
    Procedure(Vec<Token>),
    /// Dictionary literal, only produced at [`LanguageLevel::Level2`].
    Dictionary(Vec<(String, PsObject)>),
}

impl PsObject {
    /// Integer value, if this is an integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PsObject::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric value truncated toward zero, if this is a number.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            PsObject::Integer(n) => Some(*n),
            PsObject::Real(r) => Some(*r as i64),
            _ => None,
        }
    }

    /// True for integers and reals.
    pub fn is_number(&self) -> bool {
        matches!(self, PsObject::Integer(_) | PsObject::Real(_))
    }

    /// Name value, if this is a name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            PsObject::Name(name) => Some(name),
            _ => None,
        }
    }

    /// Raw bytes of a literal or hex string.
    pub fn string_bytes(&self) -> Option<&[u8]> {
        match self {
            PsObject::LiteralString(bytes) | PsObject::HexString(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Raw bytes of a hex string only.
    pub fn hex_bytes(&self) -> Option<&[u8]> {
        match self {
            PsObject::HexString(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Short type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            PsObject::Integer(_) => "integer",
            PsObject::Real(_) => "real",
            PsObject::Boolean(_) => "boolean",
            PsObject::Null => "null",
            PsObject::Name(_) => "name",
            PsObject::LiteralString(_) => "string",
            PsObject::HexString(_) => "hex string",
            PsObject::Array(_) => "array",
            PsObject::Procedure(_) => "procedure",
            PsObject::Dictionary(_) => "dictionary",
        }
    }
}

/// One token of a PostScript program.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Executable name (operator), e.g. `begincodespacerange`.
    Keyword(String),
    /// Literal value.
    Value(PsObject),
}

/// Pull tokenizer over an in-memory PostScript program.
#[derive(Debug, Clone)]
pub struct PsTokenizer<'a> {
    input: &'a [u8],
    pos: usize,
    level: LanguageLevel,
}

impl<'a> PsTokenizer<'a> {
    /// Tokenizer positioned at the start of `input`.
    pub fn new(input: &'a [u8], level: LanguageLevel) -> Self {
        Self {
            input,
            pos: 0,
            level,
        }
    }

    /// Byte offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The language level in effect.
    pub fn level(&self) -> LanguageLevel {
        self.level
    }

    /// Read the next token, or `None` at the end of input.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Tokenizer`] for malformed syntax.
    pub fn next_token(&mut self) -> Result<Option<Token>, BackendError> {
        skip_whitespace_and_comments(self.input, &mut self.pos);
        if self.pos >= self.input.len() {
            return Ok(None);
        }
        self.read_token().map(Some)
    }

    /// Read the next token, which must be a value.
    ///
    /// # Errors
    ///
    /// Fails at the end of input or when the next token is a keyword.
    pub fn next_value(&mut self) -> Result<PsObject, BackendError> {
        let offset = self.pos;
        match self.next_token()? {
            Some(Token::Value(value)) => Ok(value),
            Some(Token::Keyword(kw)) => Err(BackendError::tokenizer(
                offset,
                format!("expected a value, found keyword '{kw}'"),
            )),
            None => Err(BackendError::tokenizer(offset, "unexpected end of input")),
        }
    }

    /// Read the next token if it is a value; a keyword is left unread.
    pub fn try_next_value(&mut self) -> Result<Option<PsObject>, BackendError> {
        let saved = self.pos;
        match self.next_token()? {
            Some(Token::Value(value)) => Ok(Some(value)),
            Some(Token::Keyword(_)) => {
                self.pos = saved;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn at_dictionary_delimiter(&self) -> bool {
        self.level == LanguageLevel::Level1 && (self.at_double(b'<') || self.at_double(b'>'))
    }

    fn at_double(&self, b: u8) -> bool {
        self.input.get(self.pos) == Some(&b) && self.input.get(self.pos + 1) == Some(&b)
    }

    fn read_token(&mut self) -> Result<Token, BackendError> {
        let input = self.input;
        let start = self.pos;
        if self.at_dictionary_delimiter() {
            self.pos += 2;
            let keyword = if input[start] == b'<' { "<<" } else { ">>" };
            return Ok(Token::Keyword(keyword.to_string()));
        }
        let value = match input[start] {
            b'(' => PsObject::LiteralString(parse_literal_string(input, &mut self.pos)?),
            b'<' if self.level == LanguageLevel::Level2 && input.get(start + 1) == Some(&b'<') => {
                self.pos += 2;
                PsObject::Dictionary(parse_dictionary(input, &mut self.pos)?)
            }
            b'<' => PsObject::HexString(parse_hex_string(input, &mut self.pos)?),
            b'[' => {
                self.pos += 1;
                PsObject::Array(self.parse_array()?)
            }
            b'{' => {
                self.pos += 1;
                PsObject::Procedure(self.parse_procedure()?)
            }
            b'/' => PsObject::Name(parse_name(input, &mut self.pos)),
            b @ (b')' | b'>' | b']' | b'}') => {
                return Err(BackendError::tokenizer(
                    start,
                    format!("unexpected '{}'", b as char),
                ));
            }
            _ => {
                let word = parse_regular(input, &mut self.pos);
                return Ok(classify_word(&word));
            }
        };
        Ok(Token::Value(value))
    }

    /// Parse an array until `]`. Assumes `[` already consumed.
    fn parse_array(&mut self) -> Result<Vec<PsObject>, BackendError> {
        let mut elements = Vec::new();
        loop {
            skip_whitespace_and_comments(self.input, &mut self.pos);
            if self.pos >= self.input.len() {
                return Err(BackendError::tokenizer(self.pos, "unterminated array"));
            }
            if self.input[self.pos] == b']' {
                self.pos += 1;
                return Ok(elements);
            }
            if self.at_dictionary_delimiter() {
                self.pos += 2;
                continue;
            }
            match self.read_token()? {
                Token::Value(value) => elements.push(value),
                Token::Keyword(kw) => elements.push(PsObject::Name(kw)),
            }
        }
    }

    /// Parse a procedure body until `}`. Assumes `{` already consumed.
    fn parse_procedure(&mut self) -> Result<Vec<Token>, BackendError> {
        let mut body = Vec::new();
        loop {
            skip_whitespace_and_comments(self.input, &mut self.pos);
            if self.pos >= self.input.len() {
                return Err(BackendError::tokenizer(self.pos, "unterminated procedure"));
            }
            if self.input[self.pos] == b'}' {
                self.pos += 1;
                return Ok(body);
            }
            body.push(self.read_token()?);
        }
    }
}

impl Iterator for PsTokenizer<'_> {
    type Item = Result<Token, BackendError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

/// Tokenize a whole program.
///
/// # Errors
///
/// Returns [`BackendError::Tokenizer`] for malformed syntax.
pub fn tokenize(input: &[u8], level: LanguageLevel) -> Result<Vec<Token>, BackendError> {
    PsTokenizer::new(input, level).collect()
}

/// Returns `true` if `b` is a PostScript whitespace character.
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x0C | 0x00)
}

/// Returns `true` if `b` is a PostScript delimiter character.
fn is_delimiter(b: u8) -> bool {
    matches!(
        b,
        b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
    )
}

/// Skip whitespace and comments.
fn skip_whitespace_and_comments(input: &[u8], pos: &mut usize) {
    while *pos < input.len() {
        if is_whitespace(input[*pos]) {
            *pos += 1;
        } else if input[*pos] == b'%' {
            while *pos < input.len() && input[*pos] != b'\n' && input[*pos] != b'\r' {
                *pos += 1;
            }
        } else {
            break;
        }
    }
}

/// Read a run of regular (non-delimiter, non-whitespace) bytes.
fn parse_regular(input: &[u8], pos: &mut usize) -> String {
    let start = *pos;
    while *pos < input.len() && !is_whitespace(input[*pos]) && !is_delimiter(input[*pos]) {
        *pos += 1;
    }
    String::from_utf8_lossy(&input[start..*pos]).into_owned()
}

/// A regular word is a number, `true`/`false`/`null` or a keyword.
fn classify_word(word: &str) -> Token {
    match word {
        "true" => return Token::Value(PsObject::Boolean(true)),
        "false" => return Token::Value(PsObject::Boolean(false)),
        "null" => return Token::Value(PsObject::Null),
        _ => {}
    }
    if let Some(number) = parse_number(word) {
        return Token::Value(number);
    }
    Token::Keyword(word.to_string())
}

/// Parse an integer, a real or a `base#digits` radix number.
fn parse_number(word: &str) -> Option<PsObject> {
    let first = word.as_bytes().first()?;
    if !(first.is_ascii_digit() || matches!(first, b'+' | b'-' | b'.')) {
        return None;
    }
    if let Ok(n) = word.parse::<i64>() {
        return Some(PsObject::Integer(n));
    }
    if let Some((base, digits)) = word.split_once('#') {
        let base: u32 = base.parse().ok()?;
        if !(2..=36).contains(&base) {
            return None;
        }
        return i64::from_str_radix(digits, base).ok().map(PsObject::Integer);
    }
    let is_real_syntax = word
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if is_real_syntax {
        return word.parse::<f64>().ok().map(PsObject::Real);
    }
    None
}

/// Parse a literal string `(...)` with balanced parentheses and escape sequences.
fn parse_literal_string(input: &[u8], pos: &mut usize) -> Result<Vec<u8>, BackendError> {
    let start = *pos;
    *pos += 1;

    let mut result = Vec::new();
    let mut depth = 1u32;

    while *pos < input.len() {
        let b = input[*pos];
        match b {
            b'(' => {
                depth += 1;
                result.push(b'(');
                *pos += 1;
            }
            b')' => {
                depth -= 1;
                *pos += 1;
                if depth == 0 {
                    return Ok(result);
                }
                result.push(b')');
            }
            b'\\' => {
                *pos += 1;
                let Some(&escaped) = input.get(*pos) else {
                    break;
                };
                match escaped {
                    b'n' => result.push(b'\n'),
                    b'r' => result.push(b'\r'),
                    b't' => result.push(b'\t'),
                    b'b' => result.push(0x08),
                    b'f' => result.push(0x0C),
                    b'\r' => {
                        // Line continuation, CR or CR LF
                        if input.get(*pos + 1) == Some(&b'\n') {
                            *pos += 1;
                        }
                    }
                    b'\n' => {}
                    b'0'..=b'7' => {
                        let mut val = u32::from(escaped - b'0');
                        for _ in 0..2 {
                            match input.get(*pos + 1) {
                                Some(&d @ b'0'..=b'7') => {
                                    *pos += 1;
                                    val = val * 8 + u32::from(d - b'0');
                                }
                                _ => break,
                            }
                        }
                        result.push((val & 0xFF) as u8);
                    }
                    other => result.push(other),
                }
                *pos += 1;
            }
            _ => {
                result.push(b);
                *pos += 1;
            }
        }
    }

    Err(BackendError::tokenizer(start, "unterminated literal string"))
}

/// Parse a hex string `<...>`.
fn parse_hex_string(input: &[u8], pos: &mut usize) -> Result<Vec<u8>, BackendError> {
    let start = *pos;
    *pos += 1;

    let mut digits = Vec::new();
    loop {
        let Some(&b) = input.get(*pos) else {
            return Err(BackendError::tokenizer(start, "unterminated hex string"));
        };
        *pos += 1;
        if b == b'>' {
            break;
        }
        if is_whitespace(b) {
            continue;
        }
        digits.push(hex_digit(b).ok_or_else(|| {
            BackendError::tokenizer(*pos - 1, format!("invalid hex digit: {:?}", b as char))
        })?);
    }

    // An odd final digit is followed by an implicit 0
    if digits.len() % 2 != 0 {
        digits.push(0);
    }
    Ok(digits.chunks(2).map(|pair| (pair[0] << 4) | pair[1]).collect())
}

/// Convert a hex digit character to its value (0-15).
fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Parse a `/Name` token. Assumes current byte is `/`.
fn parse_name(input: &[u8], pos: &mut usize) -> String {
    *pos += 1;
    let start = *pos;
    while *pos < input.len() && !is_whitespace(input[*pos]) && !is_delimiter(input[*pos]) {
        *pos += 1;
    }

    // #XX escapes as in PDF names
    let raw = &input[start..*pos];
    let mut name = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        if raw[i] == b'#' && i + 2 < raw.len() {
            if let (Some(hi), Some(lo)) = (hex_digit(raw[i + 1]), hex_digit(raw[i + 2])) {
                name.push((hi << 4) | lo);
                i += 3;
                continue;
            }
        }
        name.push(raw[i]);
        i += 1;
    }

    String::from_utf8_lossy(&name).into_owned()
}

/// Parse a dictionary body until `>>`. Assumes `<<` already consumed.
fn parse_dictionary(input: &[u8], pos: &mut usize) -> Result<Vec<(String, PsObject)>, BackendError> {
    let mut entries = Vec::new();
    let mut inner = PsTokenizer {
        input,
        pos: *pos,
        level: LanguageLevel::Level2,
    };
    loop {
        skip_whitespace_and_comments(input, &mut inner.pos);
        if inner.pos >= input.len() {
            return Err(BackendError::tokenizer(inner.pos, "unterminated dictionary"));
        }
        if inner.at_double(b'>') {
            inner.pos += 2;
            *pos = inner.pos;
            return Ok(entries);
        }
        let key_offset = inner.pos;
        let key = match inner.next_token()? {
            Some(Token::Value(PsObject::Name(key))) => key,
            Some(other) => {
                return Err(BackendError::tokenizer(
                    key_offset,
                    format!("expected name key in dictionary, found {other:?}"),
                ));
            }
            None => return Err(BackendError::tokenizer(key_offset, "unterminated dictionary")),
        };
        let value = inner.next_value()?;
        entries.push((key, value));
    }
}
