// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers: temp projects and fluent assertions over `ghr` runs.

pub use ghr_config::test_support::valid_environment;
pub use serde_json::{json, Value};

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;
use tempfile::TempDir;

/// `ghr` run from a scratch directory with no context files.
pub fn cli() -> Ghr {
    Project::empty().ghr_owned()
}

/// A temporary project directory.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self { dir: TempDir::new().expect("create temp project") }
    }

    /// `ghr.json` selecting `prod`, with `prod` (build) and `dev` (consumer)
    /// environments and a `docker/` build context.
    pub fn runners() -> Self {
        let project = Self::empty();
        let mut dev = valid_environment("dev");
        dev["BuildParameters"]["skipContainerBuild"] = json!(true);
        project.context(&json!({
            "config": "prod",
            "prod": valid_environment("prod"),
            "dev": dev,
        }));
        project.file("docker/Dockerfile", "FROM ubuntu:24.04\n");
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `ghr.json`.
    pub fn context(&self, context: &Value) {
        self.file("ghr.json", &serde_json::to_string_pretty(context).expect("serialize context"));
    }

    pub fn file(&self, rel: &str, content: &str) {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(path, content).expect("write project file");
    }

    pub fn read_json(&self, rel: &str) -> Value {
        let text = fs::read_to_string(self.path().join(rel)).expect("read output file");
        serde_json::from_str(&text).expect("output is JSON")
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.path().join(rel).exists()
    }

    /// `ghr` with the project as working directory.
    pub fn ghr(&self) -> Ghr {
        Ghr::new(self.path(), None)
    }

    fn ghr_owned(self) -> Ghr {
        let dir = self.path().to_path_buf();
        Ghr::new(&dir, Some(self))
    }
}

/// Command builder. Color is off and the user defaults file never exists.
pub struct Ghr {
    cmd: Command,
    _project: Option<Project>,
}

impl Ghr {
    fn new(dir: &Path, project: Option<Project>) -> Self {
        let mut cmd = Command::cargo_bin("ghr").expect("ghr binary is built");
        cmd.current_dir(dir)
            .env("NO_COLOR", "1")
            .env("GHR_USER_CONTEXT", absent_user_context(dir))
            .env_remove("GHR_LOG");
        Self { cmd, _project: project }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn passes(self) -> Run {
        let run = self.run();
        assert!(
            run.output.status.success(),
            "expected success, got {:?}\nstderr: {}",
            run.output.status.code(),
            run.stderr()
        );
        run
    }

    pub fn fails(self) -> Run {
        let run = self.run();
        assert!(!run.output.status.success(), "expected failure\nstdout: {}", run.stdout());
        run
    }

    pub fn exits(self, code: i32) -> Run {
        let run = self.run();
        assert_eq!(
            run.output.status.code(),
            Some(code),
            "unexpected exit code\nstderr: {}",
            run.stderr()
        );
        run
    }

    fn run(mut self) -> Run {
        let output = self.cmd.output().expect("ghr should run");
        Run { output, _project: self._project }
    }
}

/// Finished run.
pub struct Run {
    output: Output,
    _project: Option<Project>,
}

impl Run {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.output.stdout).expect("stdout is JSON")
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(needle), "stdout missing {needle:?}:\n{stdout}");
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(!stdout.contains(needle), "stdout has {needle:?}:\n{stdout}");
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let stderr = self.stderr();
        assert!(stderr.contains(needle), "stderr missing {needle:?}:\n{stderr}");
        self
    }
}

fn absent_user_context(dir: &Path) -> PathBuf {
    dir.join(".no-user-context.json")
}
