//! CMap program interpreter.
//!
//! Runs the CMap-building subset of PostScript over a [`PsTokenizer`] and
//! accumulates a [`CharCodeMap`] together with the `/CMapName`,
//! `/CIDSystemInfo`, `/WMode` and code-space limits the program declares.
//! Both CID CMaps (`begincidrange`/`begincidchar`) and ToUnicode CMaps
//! (`beginbfrange`/`beginbfchar`) are read by the same interpreter.
//!
//! Producers emit non-conforming programs, so a block ends only at its end
//! keyword regardless of the declared entry count, and recoverable problems
//! are collected as [`EncodingWarning`]s unless strict mode is on.

use std::sync::Arc;

use pdfcmap_core::{
    CMapEncoding, CharCode, CharCodeMap, CidSystemInfo, CodePointSpan, EncodingLimits, EncodingMap,
    EncodingOptions, EncodingResult, EncodingWarning, EncodingWarningCode,
    code_points_from_glyph_name,
};

use crate::error::BackendError;
use crate::tokenizer::{LanguageLevel, PsObject, PsTokenizer, Token};

/// Maximum nesting of `usecmap` parents.
pub const MAX_USECMAP_DEPTH: usize = 8;

/// Resolves the parent named by `/Parent usecmap`.
pub trait CMapResolver {
    /// The map registered as `name`. `depth` counts the `usecmap` levels
    /// already being resolved.
    fn resolve_cmap(&self, name: &str, depth: usize) -> Option<Arc<EncodingMap>>;
}

/// A resolver that knows no CMaps.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoParents;

impl CMapResolver for NoParents {
    fn resolve_cmap(&self, _name: &str, _depth: usize) -> Option<Arc<EncodingMap>> {
        None
    }
}

/// Configurable CMap program parser.
pub struct CMapParser<'a> {
    options: &'a EncodingOptions,
    resolver: &'a dyn CMapResolver,
    depth: usize,
}

impl<'a> CMapParser<'a> {
    /// Parser with `options` that resolves `usecmap` parents through the
    /// process-wide predefined registry.
    pub fn new(options: &'a EncodingOptions) -> Self {
        Self {
            options,
            resolver: crate::predefined::registry(),
            depth: 0,
        }
    }

    /// Resolve `usecmap` parents through `resolver` instead.
    pub fn with_resolver(mut self, resolver: &'a dyn CMapResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Set the current `usecmap` nesting depth.
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Parse a CMap program.
    ///
    /// # Errors
    ///
    /// Fails when the program exceeds `max_cmap_bytes`, on tokenizer errors,
    /// on a missing end keyword or a code operand of the wrong type, and in
    /// strict mode on any recoverable problem.
    pub fn parse(&self, data: &[u8]) -> Result<EncodingResult<CMapEncoding>, BackendError> {
        self.options.check_cmap_size(data.len())?;
        let mut interp = Interpreter {
            tokens: PsTokenizer::new(data, LanguageLevel::Level1),
            options: self.options,
            resolver: self.resolver,
            depth: self.depth,
            map: CharCodeMap::new(),
            code_sizes: None,
            code_space: None,
            name: None,
            info: CidSystemInfo::default(),
            has_info: false,
            wmode: 0,
            warnings: Vec::new(),
        };
        interp.run()?;
        Ok(interp.finish())
    }
}

/// Parse a CMap program with `options`, resolving `usecmap` parents through
/// the predefined registry.
///
/// # Errors
///
/// See [`CMapParser::parse`].
pub fn parse_cmap(
    data: &[u8],
    options: &EncodingOptions,
) -> Result<EncodingResult<CMapEncoding>, BackendError> {
    CMapParser::new(options).parse(data)
}

struct Interpreter<'a> {
    tokens: PsTokenizer<'a>,
    options: &'a EncodingOptions,
    resolver: &'a dyn CMapResolver,
    depth: usize,
    map: CharCodeMap,
    /// Min and max byte length of every code operand seen.
    code_sizes: Option<(u8, u8)>,
    /// Lowest and highest code declared by `begincodespacerange`.
    code_space: Option<(CharCode, CharCode)>,
    name: Option<String>,
    info: CidSystemInfo,
    has_info: bool,
    wmode: i32,
    warnings: Vec<EncodingWarning>,
}

impl Interpreter<'_> {
    fn run(&mut self) -> Result<(), BackendError> {
        // Values pushed since the last keyword
        let mut operands: Vec<PsObject> = Vec::new();
        while let Some(token) = self.tokens.next_token()? {
            match token {
                Token::Keyword(keyword) => {
                    match keyword.as_str() {
                        "begincodespacerange" => self.read_code_space_ranges()?,
                        "beginbfrange" => self.read_bf_ranges()?,
                        "beginbfchar" => self.read_bf_chars()?,
                        "begincidrange" => self.read_cid_ranges()?,
                        "begincidchar" => {
                            if operands.len() != 1 || !operands[0].is_number() {
                                return Err(BackendError::Parse(
                                    "CMap missing object number before begincidchar".to_string(),
                                ));
                            }
                            self.read_cid_chars()?;
                        }
                        "usecmap" => self.use_parent(operands.last())?,
                        _ => {}
                    }
                    operands.clear();
                }
                Token::Value(PsObject::Name(key)) => {
                    if let Some(value) = self.tokens.try_next_value()? {
                        self.assign(&key, &value);
                        operands.push(PsObject::Name(key));
                        operands.push(value);
                    } else {
                        operands.push(PsObject::Name(key));
                    }
                }
                Token::Value(value) => operands.push(value),
            }
        }
        Ok(())
    }

    fn assign(&mut self, key: &str, value: &PsObject) {
        match (key, value) {
            ("CMapName", PsObject::Name(name)) => self.name = Some(name.clone()),
            ("CMapName", _) => {
                if let Some(bytes) = value.string_bytes() {
                    self.name = Some(String::from_utf8_lossy(bytes).into_owned());
                }
            }
            ("Registry", _) => {
                if let Some(bytes) = value.string_bytes() {
                    self.info.registry = String::from_utf8_lossy(bytes).into_owned();
                    self.has_info = true;
                }
            }
            ("Ordering", _) => {
                if let Some(bytes) = value.string_bytes() {
                    self.info.ordering = String::from_utf8_lossy(bytes).into_owned();
                    self.has_info = true;
                }
            }
            ("Supplement", _) => {
                if let Some(n) = value.as_number() {
                    self.info.supplement = n as i32;
                    self.has_info = true;
                }
            }
            ("WMode", _) => {
                if let Some(n) = value.as_number() {
                    self.wmode = n as i32;
                }
            }
            _ => {}
        }
    }

    /// Record a recoverable problem; strict mode turns it into an error.
    fn warn(&mut self, code: EncodingWarningCode, description: String) -> Result<(), BackendError> {
        let mut warning =
            EncodingWarning::with_code(code, description).at_offset(self.tokens.position());
        if let Some(name) = &self.name {
            warning = warning.in_cmap(name.clone());
        }
        warn_event!(%warning, "CMap warning");
        if self.options.strict {
            return Err(BackendError::Core(warning.to_error()));
        }
        if self.options.collect_warnings {
            self.warnings.push(warning);
        }
        Ok(())
    }

    /// Read the next entry operand of a block, or `None` at `end_keyword`.
    fn next_in_sequence(&mut self, end_keyword: &str) -> Result<Option<PsObject>, BackendError> {
        match self.tokens.next_token()? {
            Some(Token::Value(value)) => Ok(Some(value)),
            Some(Token::Keyword(keyword)) if keyword == end_keyword => Ok(None),
            Some(Token::Keyword(_)) => Err(BackendError::Parse(format!(
                "CMap unable to read an end of sequence keyword {end_keyword}"
            ))),
            None => Err(BackendError::Parse("CMap unable to read a token".to_string())),
        }
    }

    /// Read a further operand inside an entry.
    fn next_operand(&mut self) -> Result<PsObject, BackendError> {
        match self.tokens.next_token()? {
            Some(Token::Value(value)) => Ok(value),
            Some(Token::Keyword(keyword)) => Err(BackendError::Parse(format!(
                "CMap expected an operand, found keyword {keyword}"
            ))),
            None => Err(BackendError::Parse("CMap unable to read a token".to_string())),
        }
    }

    /// Read a source code operand and widen the observed code sizes.
    fn source_code(&mut self, obj: &PsObject) -> Result<Option<CharCode>, BackendError> {
        let code = code_from_operand(obj)?;
        if !(1..=4).contains(&code.code_space_size) {
            self.warn(
                EncodingWarningCode::InvalidCharCode,
                format!("code of {} bytes is outside 1..=4", code.code_space_size),
            )?;
            return Ok(None);
        }
        let size = code.code_space_size;
        self.code_sizes = Some(match self.code_sizes {
            Some((min, max)) => (min.min(size), max.max(size)),
            None => (size, size),
        });
        Ok(Some(code))
    }

    fn read_code_space_ranges(&mut self) -> Result<(), BackendError> {
        while let Some(lo) = self.next_in_sequence("endcodespacerange")? {
            let hi = self.next_operand()?;
            let lo = self.source_code(&lo)?;
            let hi = self.source_code(&hi)?;
            if let (Some(lo), Some(hi)) = (lo, hi) {
                self.code_space = Some(match self.code_space {
                    Some((first, last)) => (
                        if lo.code < first.code { lo } else { first },
                        if hi.code > last.code { hi } else { last },
                    ),
                    None => (lo, hi),
                });
            }
        }
        Ok(())
    }

    /// Range entries: `srcLo srcHi dst`. `None` when the entry is skipped.
    fn read_range_header(
        &mut self,
        lo: PsObject,
        block: &str,
    ) -> Result<Option<(CharCode, u32, PsObject)>, BackendError> {
        let hi = self.next_operand()?;
        let dst = self.next_operand()?;
        let (Some(lo), Some(hi)) = (self.source_code(&lo)?, self.source_code(&hi)?) else {
            return Ok(None);
        };
        if hi.code < lo.code {
            self.warn(
                EncodingWarningCode::InvalidRange,
                format!(
                    "{block}: found range with srcCodeHi {} < srcCodeLo {}",
                    hi.code, lo.code
                ),
            )?;
            return Ok(None);
        }
        let size = (hi.code - lo.code).saturating_add(1);
        Ok(Some((lo, size, dst)))
    }

    fn push_range(&mut self, lo: CharCode, size: u32, dst: &[u32]) -> Result<(), BackendError> {
        if self.map.push_range(lo, size, dst)? {
            self.warn(
                EncodingWarningCode::OverlappingRanges,
                format!("range at {lo} of {size} codes overlaps an earlier range"),
            )?;
        }
        Ok(())
    }

    fn read_bf_ranges(&mut self) -> Result<(), BackendError> {
        while let Some(lo) = self.next_in_sequence("endbfrange")? {
            let Some((lo, size, dst)) = self.read_range_header(lo, "beginbfrange")? else {
                continue;
            };
            match &dst {
                PsObject::Array(items) => {
                    for i in 0..size {
                        let code = CharCode::with_size(lo.code + i, lo.code_space_size);
                        let cps = match items.get(i as usize) {
                            Some(PsObject::HexString(bytes)) => utf16be_code_points(bytes),
                            Some(PsObject::Name(name)) => name_code_points(name),
                            Some(_) => {
                                self.warn(
                                    EncodingWarningCode::UnsupportedDestination,
                                    "beginbfrange: expected string or name inside array".to_string(),
                                )?;
                                break;
                            }
                            None => {
                                self.warn(
                                    EncodingWarningCode::InvalidRange,
                                    format!(
                                        "beginbfrange: array of {} entries for a range of {size} codes",
                                        items.len()
                                    ),
                                )?;
                                break;
                            }
                        };
                        self.map.push_span(code, cps)?;
                    }
                }
                PsObject::HexString(bytes) => {
                    let cps = utf16be_code_points(bytes);
                    self.push_range(lo, size, cps.as_slice())?;
                }
                PsObject::Name(name) => {
                    let cps = name_code_points(name);
                    self.push_range(lo, size, cps.as_slice())?;
                }
                other => {
                    self.warn(
                        EncodingWarningCode::UnsupportedDestination,
                        format!("beginbfrange: expected array, string or name, found {}", other.type_name()),
                    )?;
                }
            }
        }
        Ok(())
    }

    fn read_bf_chars(&mut self) -> Result<(), BackendError> {
        while let Some(src) = self.next_in_sequence("endbfchar")? {
            let dst = self.next_operand()?;
            let Some(code) = self.source_code(&src)? else {
                continue;
            };
            let cps = match &dst {
                PsObject::Integer(_) | PsObject::Real(_) => {
                    CodePointSpan::single(code_from_operand(&dst)?.code)
                }
                PsObject::HexString(bytes) => utf16be_code_points(bytes),
                PsObject::Name(name) => name_code_points(name),
                other => {
                    self.warn(
                        EncodingWarningCode::UnsupportedDestination,
                        format!("beginbfchar: expected number, string or name, found {}", other.type_name()),
                    )?;
                    continue;
                }
            };
            self.map.push_span(code, cps)?;
        }
        Ok(())
    }

    fn read_cid_ranges(&mut self) -> Result<(), BackendError> {
        while let Some(lo) = self.next_in_sequence("endcidrange")? {
            let Some((lo, size, dst)) = self.read_range_header(lo, "begincidrange")? else {
                continue;
            };
            let cid = code_from_operand(&dst)?.code;
            self.push_range(lo, size, &[cid])?;
        }
        Ok(())
    }

    fn read_cid_chars(&mut self) -> Result<(), BackendError> {
        while let Some(src) = self.next_in_sequence("endcidchar")? {
            let dst = self.next_operand()?;
            let Some(code) = self.source_code(&src)? else {
                continue;
            };
            let cid = code_from_operand(&dst)?.code;
            self.map.push_mapping(code, &[cid])?;
        }
        Ok(())
    }

    /// Merge the parent CMap named by the operand before `usecmap`.
    fn use_parent(&mut self, operand: Option<&PsObject>) -> Result<(), BackendError> {
        let Some(parent_name) = operand.and_then(PsObject::as_name).map(str::to_string) else {
            return Err(BackendError::Parse(
                "CMap missing parent name before usecmap".to_string(),
            ));
        };
        if self.depth >= MAX_USECMAP_DEPTH {
            return Err(BackendError::Parse(format!(
                "CMap usecmap nesting exceeds {MAX_USECMAP_DEPTH} levels at {parent_name}"
            )));
        }
        let Some(parent) = self.resolver.resolve_cmap(&parent_name, self.depth + 1) else {
            return self.warn(
                EncodingWarningCode::Other("UNKNOWN_PARENT".to_string()),
                format!("usecmap: unknown parent CMap {parent_name}"),
            );
        };
        match parent.as_ref() {
            EncodingMap::CMap(cmap) => {
                let parent_map = cmap.map().clone();
                for (code, cps) in parent_map.mappings() {
                    self.map.push_span(*code, cps.clone())?;
                }
                for range in parent_map.ranges() {
                    self.push_range(range.src_code_lo, range.size, range.dst_code_lo.as_slice())?;
                }
                self.widen_code_sizes(cmap.limits());
            }
            EncodingMap::Identity(identity) => {
                let limits = *identity.limits();
                let first = limits.first_char;
                let size = (limits.last_char.code - first.code).saturating_add(1);
                self.push_range(first, size, &[first.code])?;
                self.widen_code_sizes(&limits);
            }
            other => {
                self.warn(
                    EncodingWarningCode::UnsupportedDestination,
                    format!("usecmap: parent {parent_name} is not a CMap ({:?})", other.kind()),
                )?;
            }
        }
        Ok(())
    }

    fn widen_code_sizes(&mut self, limits: &EncodingLimits) {
        if !limits.have_valid_code_size_range() {
            return;
        }
        let (min, max) = (limits.min_code_size, limits.max_code_size);
        self.code_sizes = Some(match self.code_sizes {
            Some((lo, hi)) => (lo.min(min), hi.max(max)),
            None => (min, max),
        });
    }

    fn finish(self) -> EncodingResult<CMapEncoding> {
        let mut limits = *self.map.limits();
        if let Some((min, max)) = self.code_sizes {
            limits.update_code_size(min);
            limits.update_code_size(max);
        }
        // A degenerate map without entries still has its declared code space
        if self.map.is_empty() {
            if let Some((first, last)) = self.code_space {
                limits.first_char = first;
                limits.last_char = last;
            }
        }

        let mut encoding = CMapEncoding::new(self.map)
            .with_wmode(self.wmode)
            .with_limits(limits);
        if let Some(name) = self.name {
            encoding = encoding.with_name(name);
        }
        if self.has_info {
            encoding = encoding.with_cid_system_info(self.info);
        }
        EncodingResult::with_warnings(encoding, self.warnings)
    }
}

/// A code operand: a number takes as many bytes as it has significant
/// bytes, a string takes its raw length.
fn code_from_operand(obj: &PsObject) -> Result<CharCode, BackendError> {
    if let Some(n) = obj.as_number() {
        let value = u32::try_from(n)
            .map_err(|_| BackendError::Parse(format!("CMap code {n} is out of range")))?;
        let size = if value == 0 {
            1
        } else {
            (4 - value.leading_zeros() / 8) as u8
        };
        return Ok(CharCode::with_size(value, size));
    }
    let Some(bytes) = obj.string_bytes() else {
        return Err(BackendError::Parse(format!(
            "CMap expected a code, found {}",
            obj.type_name()
        )));
    };
    let value = bytes
        .iter()
        .fold(0u32, |acc, &b| acc.wrapping_shl(8) | u32::from(b));
    Ok(CharCode::with_size(value, bytes.len().min(u8::MAX as usize) as u8))
}

/// Decode a bf destination string as UTF-16BE.
///
/// A single byte is read as the code point itself; unpaired surrogates
/// become U+FFFD.
fn utf16be_code_points(bytes: &[u8]) -> CodePointSpan {
    if let [b] = bytes {
        return CodePointSpan::single(u32::from(*b));
    }
    let units = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
    let cps: Vec<u32> = char::decode_utf16(units)
        .map(|r| u32::from(r.unwrap_or(char::REPLACEMENT_CHARACTER)))
        .collect();
    CodePointSpan::from_slice(&cps)
}

/// A bf destination name: a glyph name if it resolves, otherwise its characters.
fn name_code_points(name: &str) -> CodePointSpan {
    code_points_from_glyph_name(name).unwrap_or_else(|| CodePointSpan::from_text(name))
}
