//! Shared fixtures for grove's integration tests.
//!
//! Tests either run against real git in an isolated throwaway repository
//! ([`TestRepo`]), or against a scripted `git` shim on PATH ([`FakeGit`],
//! unix only) when the assertion is about exactly which commands grove
//! issues.

// Each test binary uses its own subset of these helpers.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

#[cfg(windows)]
pub const NULL_DEVICE: &str = "NUL";
#[cfg(not(windows))]
pub const NULL_DEVICE: &str = "/dev/null";

/// Deterministic environment for any git invocation in tests: no user or
/// system config, fixed dates, no terminal prompts.
pub fn configure_git_env(cmd: &mut Command) {
    cmd.env("GIT_CONFIG_GLOBAL", NULL_DEVICE);
    cmd.env("GIT_CONFIG_SYSTEM", NULL_DEVICE);
    cmd.env("GIT_AUTHOR_DATE", "2025-01-01T00:00:00Z");
    cmd.env("GIT_COMMITTER_DATE", "2025-01-01T00:00:00Z");
    cmd.env("GIT_TERMINAL_PROMPT", "0");
    cmd.env("LC_ALL", "C");
}

/// A throwaway git repository with one commit on `main`.
pub struct TestRepo {
    dir: TempDir,
    root: PathBuf,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("repo");
        std::fs::create_dir(&root).unwrap();
        let repo = Self { dir, root };
        repo.git(&["init", "--initial-branch=main"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo.write_file("README.md", "# fixture\n");
        repo.commit_all("Initial commit");
        repo
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write a file relative to the repository root, creating parent
    /// directories as needed.
    pub fn write_file(&self, rel: &str, content: &str) {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    /// Stage everything and commit.
    pub fn commit_all(&self, message: &str) {
        self.git(&["add", "."]);
        self.git(&["commit", "-m", message]);
    }

    /// Run git in the repository root, panicking on failure.
    pub fn git(&self, args: &[&str]) -> String {
        let mut cmd = Command::new("git");
        cmd.args(args);
        cmd.current_dir(&self.root);
        configure_git_env(&mut cmd);
        let output = cmd.output().unwrap();
        if !output.status.success() {
            panic!(
                "git {args:?} failed\nstdout: {}\nstderr: {}",
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr),
            );
        }
        String::from_utf8_lossy(&output.stdout).into_owned()
    }
}

#[rstest::fixture]
pub fn repo() -> TestRepo {
    TestRepo::new()
}

/// The grove binary, ready to run in `dir` with an isolated git environment
/// and colors disabled so output asserts stay plain.
pub fn grove_command(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_grove"));
    for (key, _) in std::env::vars() {
        if key.starts_with("GIT_") {
            cmd.env_remove(&key);
        }
    }
    configure_git_env(&mut cmd);
    cmd.env("NO_COLOR", "1");
    cmd.env("RUST_LOG", "warn");
    cmd.current_dir(dir);
    cmd
}

/// Run to completion with stdin closed; an interactive prompt then resolves
/// to its default answer.
pub fn run(mut cmd: Command) -> Output {
    cmd.stdin(Stdio::null());
    cmd.output().unwrap()
}

/// Run to completion with `input` piped to stdin.
pub fn run_with_stdin(mut cmd: Command, input: &str) -> Output {
    use std::io::Write;

    cmd.stdin(Stdio::piped());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    let mut child = cmd.spawn().unwrap();
    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

pub fn stdout_str(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr_str(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Last stdout line: where `grove new` reports the worktree path.
pub fn final_stdout_line(output: &Output) -> String {
    stdout_str(output).lines().last().unwrap_or_default().to_string()
}

pub fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "expected success, got {:?}\nstdout: {}\nstderr: {}",
        output.status.code(),
        stdout_str(output),
        stderr_str(output),
    );
}

pub fn assert_failure(output: &Output) {
    assert!(
        !output.status.success(),
        "expected failure, got success\nstdout: {}\nstderr: {}",
        stdout_str(output),
        stderr_str(output),
    );
}

/// A scripted `git` on PATH that logs every argv it receives and answers
/// from `FAKE_GIT_*` environment variables. Lets tests pin down command
/// sequencing (what ran, in which order, and what never ran) without a real
/// repository.
///
/// Knobs, all set on the returned [`Command`]:
/// - `FAKE_GIT_BRANCH_EXISTS`: exit code for `show-ref` (default 1, missing)
/// - `FAKE_GIT_ADD_EXIT` / `FAKE_GIT_REMOVE_EXIT`: worktree add/remove
/// - `FAKE_GIT_LISTING` / `FAKE_GIT_LIST_EXIT`: `worktree list` output
#[cfg(unix)]
pub struct FakeGit {
    dir: TempDir,
}

#[cfg(unix)]
impl FakeGit {
    pub fn new() -> Self {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let bin = dir.path().join("bin");
        std::fs::create_dir(&bin).unwrap();
        std::fs::create_dir(dir.path().join("repo")).unwrap();

        let script = r#"#!/bin/sh
echo "$@" >> "$FAKE_GIT_LOG"
case "$1 $2" in
    "rev-parse --show-toplevel")
        echo "$FAKE_GIT_TOPLEVEL"
        exit 0
        ;;
    "show-ref --verify")
        exit "${FAKE_GIT_BRANCH_EXISTS:-1}"
        ;;
    "branch --show-current")
        echo "main"
        exit 0
        ;;
    "branch "*)
        exit 0
        ;;
    "worktree list")
        printf '%s' "$FAKE_GIT_LISTING"
        exit "${FAKE_GIT_LIST_EXIT:-0}"
        ;;
    "worktree add")
        exit "${FAKE_GIT_ADD_EXIT:-0}"
        ;;
    "worktree remove")
        if [ "${FAKE_GIT_REMOVE_EXIT:-0}" -ne 0 ]; then
            echo "fatal: scripted removal failure" >&2
        fi
        exit "${FAKE_GIT_REMOVE_EXIT:-0}"
        ;;
    *)
        exit 0
        ;;
esac
"#;
        let git_path = bin.join("git");
        std::fs::write(&git_path, script).unwrap();
        std::fs::set_permissions(&git_path, std::fs::Permissions::from_mode(0o755)).unwrap();

        Self { dir }
    }

    /// Repository root the shim reports for `rev-parse --show-toplevel`.
    pub fn toplevel(&self) -> PathBuf {
        self.dir.path().join("repo")
    }

    /// The grove binary wired up to this shim.
    pub fn grove_command(&self) -> Command {
        let mut cmd = grove_command(&self.toplevel());
        let bin = self.dir.path().join("bin");
        let path = match std::env::var("PATH") {
            Ok(path) => format!("{}:{path}", bin.display()),
            Err(_) => bin.display().to_string(),
        };
        cmd.env("PATH", path);
        cmd.env("FAKE_GIT_LOG", self.dir.path().join("git.log"));
        cmd.env("FAKE_GIT_TOPLEVEL", self.toplevel());
        cmd
    }

    /// Every git invocation so far, one argv per line.
    pub fn logged(&self) -> Vec<String> {
        match std::fs::read_to_string(self.dir.path().join("git.log")) {
            Ok(log) => log.lines().map(str::to_owned).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Index of the first logged invocation starting with `prefix`.
    pub fn position_of(&self, prefix: &str) -> Option<usize> {
        self.logged()
            .iter()
            .position(|line| line.starts_with(prefix))
    }
}
