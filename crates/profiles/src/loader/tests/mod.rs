//! Tests for the document loader.
//!
//! Responsibilities:
//! - Test chain construction, cycle detection and collaborator misconfiguration.
//! - Test merge-then-validate loading and aggregated validation errors.
//! - Test body folding, mention expansion, batch loading and environment overrides.
//!
//! Invariants:
//! - Tests touching environment variables use `serial_test` and `env_lock()`.
//! - Fixtures live in `tempfile` directories and are cleaned up automatically.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

pub mod env_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// A temporary directory tree of documents.
pub struct Fixture {
    temp: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.temp.path().join(relative)
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }
}

/// A complete root profile.
pub const FOUNDATION: &str = "\
---
profile:
  name: foundation
  version: 1.0.0
  description: Foundation profile
session:
  orchestrator:
    module: loop-basic
    source: git+https://example.com/loop-basic
  context:
    module: context-simple
tools:
  - module: tool-filesystem
    source: git+https://example.com/fs
    config:
      allowed: [.]
hooks:
  - module: hooks-logging
    config:
      level: info
---
";
