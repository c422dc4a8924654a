use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A throwaway home for one test: data directory plus optional config.
pub struct TestHome {
    dir: TempDir,
}

impl TestHome {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    /// Command with the data dir pinned to this home.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("tsk").expect("binary");
        cmd.env("TSK_DATA_DIR", self.data_dir());
        cmd.env_remove("TSK_CONFIG");
        cmd
    }

    pub fn write_config(&self, contents: &str) -> PathBuf {
        let path = self.dir.path().join("tsk.toml");
        fs::write(&path, contents).expect("write config");
        path
    }

    /// Raw contents of one storage record, if present.
    pub fn read_key(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.data_dir().join(key)).ok()
    }

    pub fn write_key(&self, key: &str, contents: &str) {
        let dir = self.data_dir();
        fs::create_dir_all(&dir).expect("create data dir");
        fs::write(dir.join(key), contents).expect("write key");
    }
}
