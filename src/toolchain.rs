//! Compiler and archiver command construction.
//!
//! All toolchain interaction goes through explicit argument lists built
//! here. Program selection is part of [`Toolchain`] rather than read from
//! the environment, so a build reproduces across differently-configured
//! host machines and the step can be pointed at a stub toolchain in tests.

use crate::BuildError;
use crate::platform::Sdk;
use std::path::PathBuf;
use std::process::Command;

/// One source file plus the flags needed to produce its object file.
#[derive(Debug, Clone)]
pub struct CompileUnit {
    /// Source path, relative to the build directory.
    pub source: PathBuf,
    /// Object output path, relative to the build directory.
    pub object: PathBuf,
    /// Extra header search paths.
    pub include_dirs: Vec<PathBuf>,
    /// Extra library search paths.
    pub lib_dirs: Vec<PathBuf>,
    /// Libraries linked by name.
    pub link_libs: Vec<String>,
}

impl CompileUnit {
    /// A unit with no extra search paths or libraries.
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, object: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            object: object.into(),
            include_dirs: Vec::new(),
            lib_dirs: Vec::new(),
            link_libs: Vec::new(),
        }
    }

    /// Add a header search path.
    #[must_use]
    pub fn include_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.include_dirs.push(path.into());
        self
    }

    /// Add a library search path.
    #[must_use]
    pub fn lib_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.lib_dirs.push(path.into());
        self
    }

    /// Link a library by name.
    #[must_use]
    pub fn link_lib(mut self, name: impl Into<String>) -> Self {
        self.link_libs.push(name.into());
        self
    }
}

/// The external programs the build step drives.
#[derive(Debug, Clone)]
pub struct Toolchain {
    /// SDK-aware compiler launcher, `xcrun` on Apple hosts.
    pub cc_launcher: PathBuf,
    /// Compiler invoked through the launcher.
    pub compiler: String,
    /// Static archiver.
    pub archiver: PathBuf,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            cc_launcher: PathBuf::from("xcrun"),
            compiler: "clang".to_string(),
            archiver: PathBuf::from("ar"),
        }
    }
}

impl Toolchain {
    /// Compiler invocation for one unit:
    /// `xcrun -sdk <sdk> clang -arch <arch> <version_min> [-I …] [-L …]
    /// -c <source> -o <object> [-l<name> …]`.
    #[must_use]
    pub fn compile_command(
        &self,
        sdk: Sdk,
        arch: &str,
        version_min: &str,
        unit: &CompileUnit,
    ) -> Command {
        let mut cmd = Command::new(&self.cc_launcher);
        cmd.arg("-sdk")
            .arg(sdk.identifier())
            .arg(&self.compiler)
            .arg("-arch")
            .arg(arch)
            .arg(version_min);
        for dir in &unit.include_dirs {
            cmd.arg("-I").arg(dir);
        }
        for dir in &unit.lib_dirs {
            cmd.arg("-L").arg(dir);
        }
        cmd.arg("-c")
            .arg(&unit.source)
            .arg("-o")
            .arg(&unit.object);
        for lib in &unit.link_libs {
            cmd.arg(format!("-l{lib}"));
        }
        cmd
    }

    /// Archiver invocation: `ar rcs <archive> <objects…>`.
    ///
    /// Member order follows the `objects` slice so archives are
    /// reproducible.
    #[must_use]
    pub fn archive_command(&self, archive: &str, objects: &[PathBuf]) -> Command {
        let mut cmd = Command::new(&self.archiver);
        cmd.arg("rcs").arg(archive);
        for object in objects {
            cmd.arg(object);
        }
        cmd
    }
}

/// Run a toolchain command to completion, capturing its output.
///
/// # Errors
///
/// [`BuildError::Spawn`] if the process cannot be started,
/// [`BuildError::Toolchain`] with the captured diagnostics if it exits
/// non-zero.
pub fn run(cmd: &mut Command) -> Result<(), BuildError> {
    let rendered = render(cmd);
    log::debug!("running: {rendered}");

    let output = cmd.output().map_err(|source| BuildError::Spawn {
        command: rendered.clone(),
        source,
    })?;

    if output.status.success() {
        Ok(())
    } else {
        let mut diagnostics = String::from_utf8_lossy(&output.stderr).into_owned();
        if diagnostics.is_empty() {
            diagnostics = String::from_utf8_lossy(&output.stdout).into_owned();
        }
        log::error!("command failed ({}): {rendered}", output.status);
        Err(BuildError::Toolchain {
            command: rendered,
            output: diagnostics,
        })
    }
}

/// Render a command line for logs and errors.
fn render(cmd: &Command) -> String {
    let mut rendered = cmd.get_program().to_string_lossy().into_owned();
    for arg in cmd.get_args() {
        rendered.push(' ');
        rendered.push_str(&arg.to_string_lossy());
    }
    rendered
}
