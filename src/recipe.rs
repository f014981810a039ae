//! The per-platform build step.
//!
//! One [`Recipe::build`] call compiles the two QuickLZ compile units
//! against the platform's SDK and archives them. The step is stateless
//! across invocations; its only side effects are the two object files and
//! the archive written into the caller-supplied build directory.

use crate::BuildError;
use crate::config::{RecipeMetadata, RuntimeLocation};
use crate::platform::Platform;
use crate::toolchain::{self, CompileUnit, Toolchain};
use std::fs;
use std::path::{Path, PathBuf};

/// Core compression library source, expected in the build directory.
const CORE_SOURCE: &str = "quicklz.c";
/// Python binding source, expected in the build directory.
const BINDING_SOURCE: &str = "quicklzmodule.c";

/// Builds QuickLZ and its Python binding for one platform.
#[derive(Debug, Clone)]
pub struct Recipe {
    metadata: RecipeMetadata,
    runtime: RuntimeLocation,
    toolchain: Toolchain,
}

/// The archive produced by a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticArchive {
    /// Path of the archive file inside the build directory.
    pub path: PathBuf,
    /// Member object files, in archive order.
    pub members: Vec<PathBuf>,
}

impl Recipe {
    /// A recipe using the default (`xcrun`/`ar`) toolchain.
    #[must_use]
    pub fn new(metadata: RecipeMetadata, runtime: RuntimeLocation) -> Self {
        Self {
            metadata,
            runtime,
            toolchain: Toolchain::default(),
        }
    }

    /// Replace the toolchain programs.
    #[must_use]
    pub fn with_toolchain(mut self, toolchain: Toolchain) -> Self {
        self.toolchain = toolchain;
        self
    }

    /// The recipe's declarative metadata.
    #[must_use]
    pub const fn metadata(&self) -> &RecipeMetadata {
        &self.metadata
    }

    /// Build the platform archive in `build_dir`.
    ///
    /// `build_dir` must already contain the extracted sources
    /// (`quicklz.c`, `quicklzmodule.c`). Invocations for different
    /// platforms may run in parallel, but each needs its own build
    /// directory; a shared directory clobbers object files.
    ///
    /// All command paths are relative to `build_dir`, so re-running with
    /// identical inputs yields byte-identical outputs as long as the
    /// toolchain itself is deterministic.
    ///
    /// # Errors
    ///
    /// Fails with [`BuildError::UnsupportedPlatform`] before anything is
    /// spawned, [`BuildError::MissingDependency`] if the runtime paths are
    /// absent, or [`BuildError::Toolchain`] / [`BuildError::Spawn`] from
    /// the first compiler or archiver invocation that fails. A failed
    /// archiver run removes the half-written archive; earlier failures
    /// never create one.
    pub fn build(&self, platform: &Platform, build_dir: &Path) -> Result<StaticArchive, BuildError> {
        let sdk = platform.sdk()?;
        self.check_runtime()?;

        log::info!(
            "building {} for {} against the {} SDK",
            self.metadata.library,
            platform.name,
            sdk.identifier()
        );

        let core = CompileUnit::new(CORE_SOURCE, "quicklz.o");
        let binding = CompileUnit::new(BINDING_SOURCE, "quicklzmodule.o")
            .include_dir(&self.runtime.include_dir)
            .lib_dir(&self.runtime.lib_dir)
            .link_lib(&self.runtime.link_lib);

        for unit in [&core, &binding] {
            let mut cmd = self.toolchain.compile_command(
                sdk,
                &platform.arch,
                &self.metadata.version_min,
                unit,
            );
            cmd.current_dir(build_dir);
            toolchain::run(&mut cmd)?;
        }

        let members = vec![core.object, binding.object];
        let archive_path = build_dir.join(&self.metadata.library);
        let mut cmd = self.toolchain.archive_command(&self.metadata.library, &members);
        cmd.current_dir(build_dir);
        if let Err(err) = toolchain::run(&mut cmd) {
            // A half-written archive must not be mistaken for a finished
            // one; its absence is the failure signal downstream.
            if archive_path.exists() {
                fs::remove_file(&archive_path)?;
            }
            return Err(err);
        }

        log::info!("archived {}", archive_path.display());
        Ok(StaticArchive {
            path: archive_path,
            members,
        })
    }

    /// Verify the embedded runtime is where the orchestrator promised.
    ///
    /// Runs before any compile so a missing hostpython3 build surfaces as
    /// an actionable error instead of a compiler "file not found".
    fn check_runtime(&self) -> Result<(), BuildError> {
        for path in [&self.runtime.include_dir, &self.runtime.lib_dir] {
            if !path.is_dir() {
                return Err(BuildError::MissingDependency { path: path.clone() });
            }
        }
        Ok(())
    }
}
