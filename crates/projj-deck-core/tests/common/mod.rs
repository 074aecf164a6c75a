//! Common test helpers for projj-deck-core integration tests
//!
//! Builds throwaway home directories with a `.projj` folder in them.

use std::fs;

use projj_deck_core::ManagerPaths;
use tempfile::TempDir;

/// A temporary home directory and the projj paths resolved against it
pub struct FakeHome {
    pub dir: TempDir,
    pub paths: ManagerPaths,
}

impl FakeHome {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp home");
        let paths = ManagerPaths::from_home(dir.path());
        fs::create_dir_all(paths.manager_dir()).expect("create .projj");
        Self { dir, paths }
    }

    /// Write `~/.projj/config.json`
    #[allow(dead_code)]
    pub fn with_config(self, content: &str) -> Self {
        fs::write(self.paths.config_path(), content).expect("write config");
        self
    }

    /// Write `~/.projj/cache.json`
    #[allow(dead_code)]
    pub fn with_cache(self, content: &str) -> Self {
        fs::write(self.paths.cache_path(), content).expect("write cache");
        self
    }
}
