//! Encodings backed by a parsed or predefined CMap program.

use crate::char_code_map::CharCodeMap;
use crate::encoding_map::EncodingMap;
use crate::identity_encoding::IdentityEncoding;
use crate::limits::{CidSystemInfo, EncodingLimits, WritingMode};

/// A [`CharCodeMap`] plus the identity metadata declared by its CMap program.
#[derive(Debug, Clone, PartialEq)]
pub struct CMapEncoding {
    map: CharCodeMap,
    name: Option<String>,
    cid_system_info: Option<CidSystemInfo>,
    wmode: i32,
    limits: EncodingLimits,
    predefined: bool,
}

impl CMapEncoding {
    /// Wrap `map`, taking the limits from its codes.
    pub fn new(map: CharCodeMap) -> Self {
        let limits = *map.limits();
        Self {
            map,
            name: None,
            cid_system_info: None,
            wmode: 0,
            limits,
            predefined: false,
        }
    }

    /// Set the `/CMapName`.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the `/CIDSystemInfo`.
    pub fn with_cid_system_info(mut self, info: CidSystemInfo) -> Self {
        self.cid_system_info = Some(info);
        self
    }

    /// Set the raw `/WMode` value.
    pub fn with_wmode(mut self, wmode: i32) -> Self {
        self.wmode = wmode;
        self
    }

    /// Replace the limits, e.g. with limits widened by `begincodespacerange`.
    pub fn with_limits(mut self, limits: EncodingLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Mark the CMap as one of the predefined, name-referenced CMaps.
    pub fn with_predefined(mut self, predefined: bool) -> Self {
        self.predefined = predefined;
        self
    }

    /// The code map.
    pub fn map(&self) -> &CharCodeMap {
        &self.map
    }

    /// The `/CMapName`, if declared.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The `/CIDSystemInfo`, if declared.
    pub fn cid_system_info(&self) -> Option<&CidSystemInfo> {
        self.cid_system_info.as_ref()
    }

    /// The raw `/WMode` value.
    pub fn wmode(&self) -> i32 {
        self.wmode
    }

    /// The writing mode derived from `/WMode`.
    pub fn writing_mode(&self) -> WritingMode {
        WritingMode::from_raw(i64::from(self.wmode))
    }

    /// Code limits: those of the map unioned with the declared code spaces.
    pub fn limits(&self) -> &EncodingLimits {
        &self.limits
    }

    /// True for predefined CMaps referenced by name.
    pub fn is_predefined(&self) -> bool {
        self.predefined
    }

    /// Convert into an [`EncodingMap`], substituting an identity for maps
    /// whose codes all have one width and map to themselves.
    pub fn into_encoding_map(self) -> EncodingMap {
        if !self.map.is_empty()
            && self.limits.min_code_size == self.limits.max_code_size
            && self.map.is_trivial_identity()
        {
            return EncodingMap::Identity(IdentityEncoding::with_limits(self.limits));
        }
        EncodingMap::CMap(self)
    }
}
