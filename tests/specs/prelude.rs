//! Test helpers for behavioral specifications.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Returns a Command configured to run the stoke binary
pub fn stoke_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("stoke"))
}

/// Returns a `stoke run` Command rooted in the given project.
pub fn run_in(project: &Project) -> Command {
    let mut cmd = stoke_cmd();
    cmd.arg("run").current_dir(project.path());
    cmd
}

/// Run a command and assert its exact exit code.
pub fn assert_exits(mut cmd: Command, code: i32) -> std::process::Output {
    let output = cmd.output().expect("command should run");
    assert_eq!(
        output.status.code(),
        Some(code),
        "expected exit code {}, got {:?}\nstdout: {}\nstderr: {}",
        code,
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

/// Temporary test project directory with helper methods.
///
/// Step commands in these tests are tiny shell scripts that record
/// their invocations, so specs can assert which steps ran and with
/// what arguments.
pub struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    /// Create an empty project with no files
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Get the project path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write stoke.toml (auto-prefixes with `version = 1` if not present)
    pub fn config(&self, content: &str) {
        let content = if content.contains("version") {
            content.to_string()
        } else {
            format!("version = 1\n{}", content)
        };
        std::fs::write(self.dir.path().join("stoke.toml"), content).unwrap();
    }

    /// Write a file at the given path (parent directories created automatically)
    pub fn file(&self, path: impl AsRef<Path>, content: &str) {
        let full_path = self.dir.path().join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full_path, content).unwrap();
    }

    /// Write an executable shell script into the project.
    pub fn script(&self, name: &str, body: &str) {
        use std::os::unix::fs::PermissionsExt;

        let path = self.dir.path().join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
    }

    /// Absolute path to a file inside the project.
    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Read a file the step scripts wrote, or None if it never appeared.
    pub fn read(&self, name: &str) -> Option<String> {
        std::fs::read_to_string(self.join(name)).ok()
    }

    /// True if the named marker file exists.
    pub fn ran(&self, marker: &str) -> bool {
        self.join(marker).exists()
    }
}

/// Project whose three steps log their invocations.
///
/// Each step appends `<name> <args...>` to `invocations.txt` and creates
/// `<name>.ran`, then exits with the given code.
pub fn logging_project(build_exit: i32, test_exit: i32, bench_exit: i32) -> Project {
    let project = Project::empty();
    for (name, code) in [
        ("build", build_exit),
        ("test", test_exit),
        ("bench", bench_exit),
    ] {
        project.script(
            &format!("{name}.sh"),
            &format!(
                "echo \"{name} $@\" >> invocations.txt\ntouch {name}.ran\nexit {code}\n"
            ),
        );
    }
    project.config(
        r#"
[steps.build]
command = ["./build.sh"]

[steps.test]
command = ["./test.sh"]

[steps.bench]
command = ["./bench.sh"]
"#,
    );
    project
}
