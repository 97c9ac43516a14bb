// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for running the allerscan binary in a throwaway
//! project directory.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::Predicate;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Trait for converting into a string predicate.
/// Allows passing `&str` (as contains) or any `Predicate<str>`.
pub trait IntoStrPredicate<P: Predicate<str>> {
    fn into_predicate(self) -> P;
}

impl IntoStrPredicate<predicates::str::ContainsPredicate> for &str {
    fn into_predicate(self) -> predicates::str::ContainsPredicate {
        predicates::str::contains(self)
    }
}

impl<P: Predicate<str>> IntoStrPredicate<P> for P {
    fn into_predicate(self) -> P {
        self
    }
}

/// Returns a Command configured to run the allerscan binary
pub fn allerscan_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("allerscan"));
    cmd.env_remove("ALLERSCAN_CONFIG")
        .env_remove("ALLERSCAN_DATA_DIR")
        .env_remove("ALLERSCAN_LOG")
        .env_remove("COLOR")
        .env("NO_COLOR", "1");
    cmd
}

/// A temporary project directory with its own data directory.
pub struct Project {
    dir: tempfile::TempDir,
}

#[allow(dead_code)]
impl Project {
    /// A project with no config file.
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// A project with `allerscan.toml` set to `config`.
    pub fn with_config(config: &str) -> Self {
        let project = Self::empty();
        project.file("allerscan.toml", config);
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Default data directory for this project.
    pub fn data_dir(&self) -> PathBuf {
        self.path().join(".allerscan")
    }

    /// Write a file relative to the project root.
    pub fn file(&self, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Read and parse a JSON file.
    pub fn json_file(path: &Path) -> serde_json::Value {
        let content = std::fs::read_to_string(path).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    /// Start building an allerscan invocation in this project.
    pub fn run(&self, args: &[&str]) -> Run {
        let mut cmd = allerscan_cmd();
        cmd.current_dir(self.path()).args(args);
        Run { cmd, stdin: None }
    }
}

/// An invocation ready to execute.
pub struct Run {
    cmd: Command,
    stdin: Option<String>,
}

#[allow(dead_code)]
impl Run {
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Run from a directory other than the project root.
    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cmd.current_dir(dir);
        self
    }

    pub fn stdin(mut self, input: &str) -> Self {
        self.stdin = Some(input.to_string());
        self
    }

    /// Expect exit code 0.
    pub fn passes(self) -> RunAssert {
        self.exits(0)
    }

    /// Expect a specific exit code.
    pub fn exits(self, code: i32) -> RunAssert {
        let output = self.output();
        assert_eq!(
            output.status.code(),
            Some(code),
            "expected exit code {}, got {:?}\nstdout: {}\nstderr: {}",
            code,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    fn output(mut self) -> std::process::Output {
        let Some(input) = self.stdin else {
            return self.cmd.stdin(Stdio::null()).output().expect("command should run");
        };
        let mut child = self
            .cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("command should spawn");
        child
            .stdin
            .take()
            .expect("stdin should be piped")
            .write_all(input.as_bytes())
            .unwrap();
        child.wait_with_output().expect("command should finish")
    }
}

/// Assertions on a finished invocation.
pub struct RunAssert {
    output: std::process::Output,
}

#[allow(dead_code)]
impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Get stderr as string
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.output.stdout).expect("stdout should be JSON")
    }

    /// Assert stdout equals expected (with diff on failure)
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stdout matches predicate.
    pub fn stdout_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = self.stdout();
        let predicate = predicate.into_predicate();
        assert!(
            predicate.eval(&stdout),
            "stdout does not match predicate\nstdout: {}",
            stdout
        );
        self
    }

    /// Assert stdout does not contain `text`.
    pub fn stdout_lacks(self, text: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            !stdout.contains(text),
            "stdout unexpectedly contains {:?}\nstdout: {}",
            text,
            stdout
        );
        self
    }

    /// Assert stderr matches predicate.
    pub fn stderr_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = self.stderr();
        let predicate = predicate.into_predicate();
        assert!(
            predicate.eval(&stderr),
            "stderr does not match predicate\nstderr: {}",
            stderr
        );
        self
    }
}
