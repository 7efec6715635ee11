#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Absolute path of a CSV fixture under `tests/data`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Fixture path as a command-line argument.
pub fn fixture_arg(name: &str) -> String {
    path_arg(&fixture_path(name))
}

pub fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Scratch directory for uploads, saved configs and chart payloads. Removed
/// on drop.
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path for a file the command under test is expected to create.
    pub fn target(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        self.write_bytes(name, contents.as_bytes())
    }

    /// Raw bytes, for inputs that are not valid UTF-8.
    pub fn write_bytes(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.target(name);
        fs::write(&path, contents).expect("write workspace file");
        path
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.target(name)).expect("read workspace file")
    }
}
