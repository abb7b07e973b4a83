//! Shared test utilities for amplifier-profiles integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Lay out bundled, user, project and collection directories in a temp dir.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper will be hermetic by default.
//! - The user and project layers always point into the temp dir, never at `~/.amplifier`.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const FOUNDATION: &str = "\
---
profile:
  name: foundation
  version: 1.0.0
  description: Foundation profile
session:
  orchestrator: {module: loop-basic}
  context: {module: context-simple}
tools:
  - module: tool-filesystem
---
You are Amplifier.
";

/// Returns a hermetic `amplifier-profiles` command for integration testing.
pub fn profiles_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("amplifier-profiles");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    // Clear potential host leakage
    cmd.env_remove("AMPLIFIER_HOME")
        .env_remove("AMPLIFIER_BUNDLED_DIR")
        .env_remove("AMPLIFIER_PROJECT_DIR")
        .env_remove("RUST_LOG");

    cmd
}

/// A temporary Amplifier installation.
pub struct Workspace {
    temp: TempDir,
}

impl Workspace {
    /// Empty bundled, user and project directories.
    pub fn new() -> Self {
        let workspace = Self {
            temp: TempDir::new().unwrap(),
        };
        for dir in ["bundled", "home", "project"] {
            fs::create_dir_all(workspace.path(dir)).unwrap();
        }
        workspace
    }

    /// A workspace with a foundation profile, a user profile extending it, a
    /// collection named `design` and two agents.
    pub fn standard() -> Self {
        let workspace = Self::new();
        workspace.write("bundled/profiles/foundation.md", FOUNDATION);
        workspace.write(
            "home/profiles/dev.md",
            "---\nprofile:\n  name: dev\n  description: Development\n  extends: foundation\ntools:\n  - module: tool-bash\n---\n",
        );
        workspace.write(
            "bundled/collections/design-kit/pyproject.toml",
            "[project]\nname = \"design\"\n",
        );
        workspace.write(
            "bundled/collections/design-kit/profiles/designer.md",
            "---\nprofile:\n  name: designer\n  extends: foundation\n---\n",
        );
        workspace.write(
            "bundled/agents/reviewer.md",
            "---\nmeta:\n  name: reviewer\n  description: Reviews code\ntools:\n  - module: tool-grep\n---\nReview carefully.\n",
        );
        workspace.write(
            "project/.amplifier/agents/helper.md",
            "---\nmeta:\n  name: helper\n  description: Helps\n---\n",
        );
        workspace
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

    /// A hermetic command searching this workspace.
    pub fn cmd(&self) -> Command {
        let mut cmd = profiles_cmd();
        cmd.current_dir(self.root())
            .env("AMPLIFIER_BUNDLED_DIR", self.path("bundled"))
            .env("AMPLIFIER_HOME", self.path("home"))
            .env("AMPLIFIER_PROJECT_DIR", self.path("project"));
        cmd
    }
}
