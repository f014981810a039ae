//! Per-platform build step for the QuickLZ compression library.
//!
//! This crate implements the native-build core of a QuickLZ recipe for an
//! iOS cross-compilation pipeline: given a platform descriptor (device or
//! simulator, CPU architecture), it resolves the matching Apple SDK,
//! compiles `quicklz.c` and the Python binding `quicklzmodule.c` against
//! that SDK, and merges the two objects into a single `libquicklz.a` that
//! downstream link stages consume.
//!
//! The surrounding orchestrator owns everything else: fetching and
//! extracting the source archive, building the embedded Python runtime the
//! binding links against, installing headers, and enumerating the target
//! platforms. Its side of the contract is modeled by
//! [`RecipeMetadata`] and [`RuntimeLocation`].
//!
//! # Usage
//!
//! ```no_run
//! use quicklz_build::{Platform, Recipe, RecipeMetadata, RuntimeLocation};
//! use std::path::Path;
//!
//! let runtime = RuntimeLocation::hostpython3(Path::new("dist"));
//! let recipe = Recipe::new(RecipeMetadata::default(), runtime);
//!
//! let platform = Platform::new("iphoneos-arm64", "arm64");
//! let archive = recipe.build(&platform, Path::new("build/iphoneos-arm64"))?;
//! println!("built {}", archive.path.display());
//! # Ok::<(), quicklz_build::BuildError>(())
//! ```

/// Recipe metadata and embedded-runtime locations.
pub mod config;
/// Platform descriptors and SDK resolution.
pub mod platform;
/// The build step itself.
pub mod recipe;
/// Compiler and archiver command construction.
pub mod toolchain;

pub use config::{RecipeMetadata, RuntimeLocation};
pub use platform::{Platform, Sdk};
pub use recipe::{Recipe, StaticArchive};
pub use toolchain::{CompileUnit, Toolchain};

use std::io;
use std::path::PathBuf;

/// Errors that can occur while building a platform archive.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The platform descriptor name does not map to a known SDK.
    #[error("unsupported platform: {name}")]
    UnsupportedPlatform {
        /// The descriptor name that failed to resolve.
        name: String,
    },
    /// An embedded-runtime path required by the binding compile is absent.
    #[error("missing dependency path: {}", path.display())]
    MissingDependency {
        /// The include or library directory that does not exist.
        path: PathBuf,
    },
    /// A compiler or archiver process exited with a non-zero status.
    #[error("toolchain command failed: {command}\n{output}")]
    Toolchain {
        /// The rendered command line.
        command: String,
        /// Diagnostic output captured from the failing process.
        output: String,
    },
    /// A toolchain process could not be started at all.
    #[error("failed to spawn {command}: {source}")]
    Spawn {
        /// The rendered command line.
        command: String,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },
    /// A filesystem operation around archiving failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}
