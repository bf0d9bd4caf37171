//! Process-wide registry of predefined CMaps.
//!
//! PDF fonts may name a CMap instead of embedding it (`/Encoding
//! /90ms-RKSJ-H`). `Identity-H` and `Identity-V` are built in; every other
//! name is loaded on first use from the resource directories, either as a
//! plain CMap program (`<dir>/<name>`) or as a flate-compressed compact map
//! (`<dir>/<name>.cmapz`). Loaded maps are cached for the lifetime of the
//! registry and shared read-only.
//!
//! Resource directories are those registered with
//! [`PredefinedRegistry::add_resource_dir`] followed by the directory in the
//! `PDFCMAP_RESOURCE_DIR` environment variable.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError, RwLock};

use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use pdfcmap_core::{
    CMapEncoding, CharCodeMap, EncodingMap, EncodingOptions, EncodingResult, EncodingWarning,
    EncodingWarningCode, PredefinedToUnicode, WritingMode, read_compact, shared_identity_encoding,
    write_compact,
};

use crate::cjk_encoding::{collection_for_cmap, synthesize_to_unicode};
use crate::cmap::{CMapParser, CMapResolver};
use crate::error::{BackendError, report_warning};

/// Environment variable naming an extra CMap resource directory.
pub const RESOURCE_DIR_ENV: &str = "PDFCMAP_RESOURCE_DIR";

/// File extension of flate-compressed compact maps.
pub const COMPACT_EXTENSION: &str = "cmapz";

type Cache = Mutex<HashMap<String, Option<Arc<EncodingMap>>>>;

/// Lazily loading, caching registry of predefined CMaps.
#[derive(Debug, Default)]
pub struct PredefinedRegistry {
    dirs: RwLock<Vec<PathBuf>>,
    cmaps: Cache,
    synthesized: Cache,
    options: EncodingOptions,
}

impl PredefinedRegistry {
    /// An empty registry using default [`EncodingOptions`] for resources.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty registry parsing resources with `options`.
    pub fn with_options(options: EncodingOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Search `dir` for CMap resources, after the directories added before.
    ///
    /// Names that previously failed to resolve are looked up again.
    pub fn add_resource_dir(&self, dir: impl Into<PathBuf>) {
        self.dirs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(dir.into());
        self.cmaps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|_, map| map.is_some());
    }

    /// The directories searched, in order.
    pub fn resource_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = self
            .dirs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(env_dir) = std::env::var_os(RESOURCE_DIR_ENV) {
            dirs.push(PathBuf::from(env_dir));
        }
        dirs
    }

    /// The predefined CMap called `name`, or `None` if it is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if a resource file exists but cannot be read or parsed.
    pub fn cmap(&self, name: &str) -> Result<Option<Arc<EncodingMap>>, BackendError> {
        self.load(name, 0)
    }

    fn load(&self, name: &str, depth: usize) -> Result<Option<Arc<EncodingMap>>, BackendError> {
        match name {
            "Identity-H" => return Ok(Some(shared_identity_encoding(WritingMode::Horizontal))),
            "Identity-V" => return Ok(Some(shared_identity_encoding(WritingMode::Vertical))),
            _ => {}
        }
        if let Some(cached) = lock(&self.cmaps).get(name) {
            return Ok(cached.clone());
        }

        // The lock is not held while parsing: a usecmap parent loads through
        // this registry again.
        let loaded = self.load_from_dirs(name, depth)?.map(Arc::new);
        debug_event!(cmap = name, found = loaded.is_some(), "predefined CMap lookup");
        Ok(lock(&self.cmaps)
            .entry(name.to_string())
            .or_insert(loaded)
            .clone())
    }

    fn load_from_dirs(&self, name: &str, depth: usize) -> Result<Option<EncodingMap>, BackendError> {
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return Ok(None);
        }
        for dir in self.resource_dirs() {
            let program = dir.join(name);
            if program.is_file() {
                let data = std::fs::read(&program)?;
                return self.parse_program(name, &data, depth).map(Some);
            }
            let compact = dir.join(format!("{name}.{COMPACT_EXTENSION}"));
            if compact.is_file() {
                return self.read_compact_file(name, &compact).map(Some);
            }
        }
        Ok(None)
    }

    fn parse_program(&self, name: &str, data: &[u8], depth: usize) -> Result<EncodingMap, BackendError> {
        let result = CMapParser::new(&self.options)
            .with_resolver(self)
            .with_depth(depth)
            .parse(data)?;
        if !result.is_clean() {
            debug_event!(cmap = name, warnings = result.warnings.len(), "predefined CMap has warnings");
        }
        let mut encoding = result.value.with_predefined(true);
        if encoding.name().is_none() {
            encoding = encoding.with_name(name);
        }
        if encoding.cid_system_info().is_none() {
            if let Some(info) = collection_for_cmap(name) {
                encoding = encoding.with_cid_system_info(info);
            }
        }
        Ok(EncodingMap::CMap(encoding))
    }

    fn read_compact_file(&self, name: &str, path: &Path) -> Result<EncodingMap, BackendError> {
        let file = std::fs::File::open(path)?;
        let limit = self.options.max_cmap_bytes as u64;
        let mut data = Vec::new();
        ZlibDecoder::new(file)
            .take(limit.saturating_add(1))
            .read_to_end(&mut data)?;
        self.options.check_cmap_size(data.len())?;
        let map = read_compact(&data)?;

        let wmode = if name.ends_with("-V") { 1 } else { 0 };
        let mut encoding = CMapEncoding::new(map)
            .with_name(name)
            .with_wmode(wmode)
            .with_predefined(true);
        if let Some(info) = collection_for_cmap(name) {
            encoding = encoding.with_cid_system_info(info);
        }
        Ok(EncodingMap::CMap(encoding))
    }

    /// A code to Unicode map synthesized from the code scheme of the
    /// predefined CMap `cmap_name`, or `None` if the scheme is unknown.
    pub fn synthesized_to_unicode(&self, cmap_name: &str) -> Option<Arc<EncodingMap>> {
        if let Some(cached) = lock(&self.synthesized).get(cmap_name) {
            return cached.clone();
        }
        let built = match synthesize_to_unicode(cmap_name) {
            Ok(map) => map.map(|map| {
                let encoding = CMapEncoding::new(map).with_name(format!("{cmap_name}-UCS"));
                Arc::new(EncodingMap::CMap(encoding))
            }),
            Err(_e) => {
                warn_event!(cmap = cmap_name, error = %_e, "failed to synthesize ToUnicode");
                None
            }
        };
        debug_event!(cmap = cmap_name, found = built.is_some(), "synthesized ToUnicode");
        lock(&self.synthesized)
            .entry(cmap_name.to_string())
            .or_insert(built)
            .clone()
    }

    /// The ToUnicode map of a font whose encoding is the predefined CID map
    /// `cid_map`.
    ///
    /// Chains `cid_map` with its `Registry-Ordering-UCS2` companion. When the
    /// companion is missing and `options.synthesize_legacy_cjk` is set, a map
    /// synthesized from the CMap's code scheme is used instead. Otherwise the
    /// value is `None` with a [`EncodingWarningCode::MissingToUnicode`] warning.
    ///
    /// # Errors
    ///
    /// Fails when a companion resource cannot be parsed, and in strict mode
    /// when no ToUnicode map is found.
    pub fn to_unicode_for(
        &self,
        cid_map: &Arc<EncodingMap>,
        options: &EncodingOptions,
    ) -> Result<EncodingResult<Option<Arc<EncodingMap>>>, BackendError> {
        let ucs2_name = cid_map.cid_system_info().map(|info| info.ucs2_cmap_name());
        if let Some(ucs2_name) = &ucs2_name {
            if let Some(ucs2) = self.cmap(ucs2_name)? {
                let chained = PredefinedToUnicode::new(Arc::clone(cid_map), ucs2)?;
                return Ok(EncodingResult::ok(Some(Arc::new(chained.into()))));
            }
        }

        let cmap_name = match cid_map.as_ref() {
            EncodingMap::CMap(cmap) => cmap.name(),
            _ => None,
        };
        if options.synthesize_legacy_cjk {
            if let Some(map) = cmap_name.and_then(|name| self.synthesized_to_unicode(name)) {
                return Ok(EncodingResult::ok(Some(map)));
            }
        }

        let warning = EncodingWarning::with_code(
            EncodingWarningCode::MissingToUnicode,
            format!(
                "A ToUnicode map with name {} was not found",
                ucs2_name.as_deref().unwrap_or("<unknown>")
            ),
        );
        let mut warnings = Vec::new();
        report_warning(options, &mut warnings, warning)?;
        Ok(EncodingResult::with_warnings(None, warnings))
    }
}

impl CMapResolver for PredefinedRegistry {
    fn resolve_cmap(&self, name: &str, depth: usize) -> Option<Arc<EncodingMap>> {
        match self.load(name, depth) {
            Ok(map) => map,
            Err(_e) => {
                warn_event!(cmap = name, error = %_e, "failed to load usecmap parent");
                None
            }
        }
    }
}

fn lock(cache: &Cache) -> std::sync::MutexGuard<'_, HashMap<String, Option<Arc<EncodingMap>>>> {
    cache.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The process-wide registry.
pub fn registry() -> &'static PredefinedRegistry {
    static REGISTRY: OnceLock<PredefinedRegistry> = OnceLock::new();
    REGISTRY.get_or_init(PredefinedRegistry::new)
}

/// Add a resource directory to the process-wide registry.
pub fn add_resource_dir(dir: impl Into<PathBuf>) {
    registry().add_resource_dir(dir);
}

/// Look up a predefined CMap in the process-wide registry.
///
/// # Errors
///
/// See [`PredefinedRegistry::cmap`].
pub fn predefined_cmap(name: &str) -> Result<Option<Arc<EncodingMap>>, BackendError> {
    registry().cmap(name)
}

/// Serialize `map` as a flate-compressed compact map, the `.cmapz` format.
///
/// # Errors
///
/// Fails if the map cannot be written in the compact format.
pub fn write_cmapz(map: &CharCodeMap) -> Result<Vec<u8>, BackendError> {
    let raw = write_compact(map)?;
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&raw)?;
    Ok(encoder.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfcmap_core::{CharCode, EncodingMapKind, PredefinedEncodingType};

    const JAPAN_CMAP: &str = "%!PS-Adobe-3.0 Resource-CMap
/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo 3 dict dup begin
  /Registry (Adobe) def
  /Ordering (Japan1) def
  /Supplement 6 def
end def
/CMapName /Test-RKSJ-H def
/CMapType 1 def
/WMode 0 def
2 begincodespacerange
<00> <80>
<8140> <9FFC>
endcodespacerange
1 begincidrange
<8140> <8142> 633
endcidrange
endcmap
CMapName currentdict /CMap defineresource pop
end
end
";

    const JAPAN_UCS2: &str = "1 begincodespacerange <0000> <FFFF> endcodespacerange
1 beginbfrange <0279> <027B> <3000> endbfrange";

    fn registry_with(files: &[(&str, &[u8])]) -> (tempfile::TempDir, PredefinedRegistry) {
        let dir = tempfile::tempdir().unwrap();
        for (name, data) in files {
            std::fs::write(dir.path().join(name), data).unwrap();
        }
        let registry = PredefinedRegistry::new();
        registry.add_resource_dir(dir.path());
        (dir, registry)
    }

    // --- built-in names ---

    #[test]
    fn identity_names_are_built_in() {
        let registry = PredefinedRegistry::new();
        let h = registry.cmap("Identity-H").unwrap().unwrap();
        assert!(matches!(h.as_ref(), EncodingMap::Identity(_)));
        assert_eq!(h.writing_mode(), Some(WritingMode::Horizontal));
        let v = registry.cmap("Identity-V").unwrap().unwrap();
        assert_eq!(v.writing_mode(), Some(WritingMode::Vertical));
    }

    #[test]
    fn unknown_name_is_none() {
        let registry = PredefinedRegistry::new();
        assert!(registry.cmap("No-Such-CMap-H").unwrap().is_none());
        assert!(registry.cmap("../etc/passwd").unwrap().is_none());
    }

    // --- resource loading ---

    #[test]
    fn program_resource_is_loaded_and_cached() {
        let (_dir, registry) = registry_with(&[("Test-RKSJ-H", JAPAN_CMAP.as_bytes())]);
        let map = registry.cmap("Test-RKSJ-H").unwrap().unwrap();
        assert_eq!(map.kind(), EncodingMapKind::CMap);
        assert_eq!(map.predefined_type(), PredefinedEncodingType::PredefinedCMap);
        assert_eq!(map.cid_system_info().unwrap().ordering, "Japan1");
        assert_eq!(map.try_get_cid_id(CharCode::with_size(0x8141, 2)), Some(634));
        assert_eq!(map.limits().min_code_size, 1);

        let again = registry.cmap("Test-RKSJ-H").unwrap().unwrap();
        assert!(Arc::ptr_eq(&map, &again));
    }

    #[test]
    fn compact_resource_is_loaded() {
        let mut map = CharCodeMap::new();
        map.push_range(CharCode::with_size(0x2121, 2), 94, &[633]).unwrap();
        let bytes = write_cmapz(&map).unwrap();
        let (_dir, registry) = registry_with(&[("Test-V.cmapz", &bytes)]);

        let loaded = registry.cmap("Test-V").unwrap().unwrap();
        assert_eq!(loaded.try_get_cid_id(CharCode::with_size(0x2122, 2)), Some(634));
        assert_eq!(loaded.writing_mode(), Some(WritingMode::Vertical));
        assert_eq!(loaded.predefined_type(), PredefinedEncodingType::PredefinedCMap);
    }

    #[test]
    fn corrupt_compact_resource_is_an_error() {
        let (_dir, registry) = registry_with(&[("Bad-H.cmapz", b"not zlib at all")]);
        assert!(registry.cmap("Bad-H").is_err());
    }

    #[test]
    fn dirs_added_later_resolve_missing_names() {
        let registry = PredefinedRegistry::new();
        assert!(registry.cmap("Test-RKSJ-H").unwrap().is_none());
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Test-RKSJ-H"), JAPAN_CMAP).unwrap();
        registry.add_resource_dir(dir.path());
        assert!(registry.cmap("Test-RKSJ-H").unwrap().is_some());
    }

    #[test]
    fn usecmap_resolves_through_registry() {
        let child = "/Test-RKSJ-H usecmap 1 begincidchar <8143> 700 endcidchar";
        let (_dir, registry) = registry_with(&[
            ("Test-RKSJ-H", JAPAN_CMAP.as_bytes()),
            ("Child-H", child.as_bytes()),
        ]);
        let map = registry.cmap("Child-H").unwrap().unwrap();
        assert_eq!(map.try_get_cid_id(CharCode::with_size(0x8140, 2)), Some(633));
        assert_eq!(map.try_get_cid_id(CharCode::with_size(0x8143, 2)), Some(700));
    }

    #[test]
    fn self_referencing_usecmap_terminates() {
        let (_dir, registry) = registry_with(&[("Loop-H", b"/Loop-H usecmap".as_slice())]);
        // The innermost level fails, outer levels see an unknown parent.
        assert!(registry.cmap("Loop-H").is_ok());
    }

    // --- ToUnicode for predefined maps ---

    #[test]
    fn to_unicode_chains_ucs2_companion() {
        let (_dir, registry) = registry_with(&[
            ("Test-RKSJ-H", JAPAN_CMAP.as_bytes()),
            ("Adobe-Japan1-UCS2", JAPAN_UCS2.as_bytes()),
        ]);
        let cid_map = registry.cmap("Test-RKSJ-H").unwrap().unwrap();
        let result = registry
            .to_unicode_for(&cid_map, &EncodingOptions::default())
            .unwrap();
        assert!(result.is_clean());
        let to_unicode = result.value.unwrap();
        assert!(matches!(to_unicode.as_ref(), EncodingMap::PredefinedToUnicode(_)));
        let cps = to_unicode
            .try_get_code_points(CharCode::with_size(0x8142, 2), None)
            .unwrap();
        assert_eq!(cps.as_slice(), &[0x3002]);
    }

    #[test]
    fn to_unicode_falls_back_to_synthesis() {
        let cmap = JAPAN_CMAP.replace("Test-RKSJ-H", "90ms-RKSJ-H");
        let (_dir, registry) = registry_with(&[("90ms-RKSJ-H", cmap.as_bytes())]);
        let cid_map = registry.cmap("90ms-RKSJ-H").unwrap().unwrap();
        let to_unicode = registry
            .to_unicode_for(&cid_map, &EncodingOptions::default())
            .unwrap()
            .value
            .unwrap();
        let cps = to_unicode
            .try_get_code_points(CharCode::with_size(0x82A0, 2), None)
            .unwrap();
        assert_eq!(cps.as_slice(), &[0x3042]);
    }

    #[test]
    fn missing_to_unicode_warns_or_fails() {
        let (_dir, registry) = registry_with(&[("Test-RKSJ-H", JAPAN_CMAP.as_bytes())]);
        let cid_map = registry.cmap("Test-RKSJ-H").unwrap().unwrap();
        let result = registry
            .to_unicode_for(&cid_map, &EncodingOptions::default())
            .unwrap();
        assert!(result.value.is_none());
        assert_eq!(result.warnings[0].code, EncodingWarningCode::MissingToUnicode);
        assert!(result.warnings[0].description.contains("Adobe-Japan1-UCS2"));

        let err = registry
            .to_unicode_for(&cid_map, &EncodingOptions::strict())
            .err()
            .unwrap();
        assert!(err.to_string().contains("MISSING_TO_UNICODE"));
    }

    #[test]
    fn synthesized_maps_are_cached() {
        let registry = PredefinedRegistry::new();
        let a = registry.synthesized_to_unicode("UniGB-UCS2-H").unwrap();
        let b = registry.synthesized_to_unicode("UniGB-UCS2-H").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(registry.synthesized_to_unicode("Custom-H").is_none());
    }
}
