//! Shared test harness: a stub toolchain in a temporary directory.
//!
//! The stub compiler honors the real argument shape (`-c <src> -o <obj>`
//! somewhere in the argv), fails when the source is missing, and writes a
//! deterministic object file derived from it. The stub archiver
//! concatenates its members. Together they let the whole build step run
//! on any Unix host without Xcode.

use quicklz_build::{Recipe, RecipeMetadata, RuntimeLocation, Toolchain};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const STUB_CC: &str = r#"
src=""; out=""
while [ $# -gt 0 ]; do
  case "$1" in
    -c) src="$2"; shift ;;
    -o) out="$2"; shift ;;
  esac
  shift
done
if [ ! -f "$src" ]; then
  echo "no such source file: $src" >&2
  exit 1
fi
printf 'object %s\n' "$src" > "$out"
cat "$src" >> "$out"
"#;

const STUB_AR: &str = r#"
shift
archive="$1"
shift
: > "$archive"
for member in "$@"; do
  printf 'member %s\n' "$member" >> "$archive"
  cat "$member" >> "$archive"
done
"#;

const FAILING_AR: &str = r#"
shift
archive="$1"
printf 'partial' > "$archive"
echo "archiver exploded" >&2
exit 1
"#;

/// One temp directory holding the stub toolchain, a fake hostpython3
/// dist, and per-platform build directories.
pub struct TestEnv {
    pub dir: TempDir,
    pub toolchain: Toolchain,
    pub runtime: RuntimeLocation,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_archiver(STUB_AR)
    }

    /// Environment whose archiver leaves a partial file and exits 1.
    pub fn with_failing_archiver() -> Self {
        Self::with_archiver(FAILING_AR)
    }

    fn with_archiver(ar_body: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let cc = write_script(dir.path(), "stub-cc", STUB_CC);
        let ar = write_script(dir.path(), "stub-ar", ar_body);

        let dist = dir.path().join("dist");
        fs::create_dir_all(dist.join("hostpython3/include/python3.11")).unwrap();
        fs::create_dir_all(dist.join("hostpython3/lib")).unwrap();

        Self {
            dir,
            toolchain: Toolchain {
                cc_launcher: cc,
                compiler: "clang".to_string(),
                archiver: ar,
            },
            runtime: RuntimeLocation::hostpython3(&dist),
        }
    }

    pub fn recipe(&self) -> Recipe {
        Recipe::new(RecipeMetadata::default(), self.runtime.clone())
            .with_toolchain(self.toolchain.clone())
    }

    /// A build directory pre-populated with the two extracted sources.
    pub fn build_dir(&self, platform_name: &str) -> PathBuf {
        let dir = self.dir.path().join("build").join(platform_name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("quicklz.c"), "core compression source\n").unwrap();
        fs::write(dir.join("quicklzmodule.c"), "python binding source\n").unwrap();
        dir
    }
}

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh{body}")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}
