//! Recipe configuration.
//!
//! Two halves: [`RecipeMetadata`] is the declarative data the orchestrator
//! reads (version, source URL, output filename, header-installation
//! policy, dependency list), and [`RuntimeLocation`] tells the build step
//! where the host-built Python runtime lives. Both are resolved once by
//! the caller and injected; the build step itself contains no baked-in
//! paths.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Declarative recipe metadata consumed by the orchestrator.
///
/// The build step itself reads only `library` and `version_min`; the
/// remaining fields are bookkeeping the orchestrator acts on (fetching
/// `url`, installing `include_dir`, building `depends` first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeMetadata {
    /// Upstream version tag.
    pub version: String,
    /// Source archive location, fetched and extracted by the orchestrator.
    pub url: String,
    /// Output archive filename, e.g. `libquicklz.a`.
    pub library: String,
    /// Header file the orchestrator installs.
    pub include_dir: String,
    /// Install the header per-platform rather than once globally.
    pub include_per_platform: bool,
    /// Minimum-OS-version flag applied uniformly to every compile.
    pub version_min: String,
    /// Recipes that must be built before this one.
    pub depends: Vec<String>,
}

impl Default for RecipeMetadata {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            url: "file://pyquicklz.zip".to_string(),
            library: "libquicklz.a".to_string(),
            include_dir: "quicklz.h".to_string(),
            include_per_platform: true,
            version_min: "-miphoneos-version-min=13.0".to_string(),
            depends: vec!["hostpython3".to_string(), "python3".to_string()],
        }
    }
}

impl RecipeMetadata {
    /// Parse metadata from the orchestrator's JSON representation.
    ///
    /// # Errors
    ///
    /// Returns the underlying deserialization error for malformed input.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Where the host-built embedded runtime lives.
///
/// The same runtime is reused across target SDKs. That is sound only
/// because the Python headers are C-ABI-stable across the targeted OS
/// versions; the binding object references runtime symbols by name and
/// the real library is linked downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeLocation {
    /// Header search path handed to the binding compile.
    pub include_dir: PathBuf,
    /// Library search path handed to the binding compile.
    pub lib_dir: PathBuf,
    /// Library the binding links by name, e.g. `python3.11`.
    pub link_lib: String,
}

impl RuntimeLocation {
    /// Runtime location for a hostpython3 build under `dist`.
    ///
    /// Mirrors the layout the orchestrator's hostpython3 recipe installs:
    /// `<dist>/hostpython3/include/python3.11` and
    /// `<dist>/hostpython3/lib`.
    #[must_use]
    pub fn hostpython3(dist: &Path) -> Self {
        Self {
            include_dir: dist.join("hostpython3/include/python3.11"),
            lib_dir: dist.join("hostpython3/lib"),
            link_lib: "python3.11".to_string(),
        }
    }
}
