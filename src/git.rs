//! Git repository context and worktree operations.
//!
//! [`Repository`] carries the resolved repository root, and every git command
//! it issues runs with that root as its working directory. Nothing in this
//! module reads the ambient current directory after [`Repository::discover`]
//! has resolved it, so operations behave the same no matter where in the tree
//! the process happens to sit.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use color_print::cformat;
use serde::Serialize;

use crate::exec::{self, CommandResult};
use crate::path::format_path_for_display;
use crate::styling::{FormattedMessage, error_message, hint_message};

/// Directory under the repository root where grove places worktrees.
pub const WORKTREES_DIR: &str = ".worktrees";

/// One entry reported by `git worktree list --porcelain`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Worktree {
    /// Absolute path of the worktree.
    pub path: PathBuf,
    /// Commit hash of HEAD.
    pub head: String,
    /// Checked-out branch, without the `refs/heads/` prefix. `None` for
    /// detached or bare entries.
    pub branch: Option<String>,
    /// Whether this is a bare repository entry.
    pub bare: bool,
    /// Whether HEAD is detached.
    pub detached: bool,
}

/// Errors from git and worktree operations.
///
/// `Display` renders the styled, user-facing form: a headline, then any
/// captured git output indented and dimmed, then a hint where one helps.
#[derive(Debug, Clone, PartialEq)]
pub enum GitError {
    /// The working directory is not inside a git repository.
    NotARepository,
    /// The branch name would be rejected by git or escape the worktrees
    /// directory.
    InvalidBranchName {
        branch: String,
        reason: &'static str,
    },
    /// A worktree directory for this branch already exists.
    WorktreeAlreadyExists { branch: String, path: PathBuf },
    /// No worktree directory exists for this branch.
    WorktreeNotFound { branch: String },
    /// `git branch` exited non-zero.
    BranchCreationFailed { branch: String, error: String },
    /// `git worktree add` exited non-zero.
    WorktreeCreationFailed { branch: String, error: String },
    /// `git worktree remove` exited non-zero.
    WorktreeRemovalFailed {
        branch: String,
        path: PathBuf,
        error: String,
    },
    /// `git worktree list` exited non-zero.
    ListingFailed { error: String },
    /// git itself could not be run.
    CommandFailed { error: String },
    /// Anything else with a one-line explanation.
    Other { message: String },
}

impl fmt::Display for GitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitError::NotARepository => write!(
                f,
                "{}\n{}",
                error_message("Not in a git repository"),
                hint_message(cformat!(
                    "Run grove inside a repository, or create one with <bold>git init</>"
                ))
            ),
            GitError::InvalidBranchName { branch, reason } => write!(
                f,
                "{}\n{}",
                error_message(cformat!("Invalid branch name <bold>{branch}</>")),
                hint_message(reason)
            ),
            GitError::WorktreeAlreadyExists { branch, path } => write!(
                f,
                "{}\n{}",
                error_message(cformat!("Worktree for <bold>{branch}</> already exists")),
                hint_message(cformat!(
                    "Found at <bold>{}</>",
                    format_path_for_display(path)
                ))
            ),
            GitError::WorktreeNotFound { branch } => write!(
                f,
                "{}\n{}",
                error_message(cformat!("No worktree for <bold>{branch}</>")),
                hint_message(cformat!("Create it with <bold>grove new {branch}</>"))
            ),
            GitError::BranchCreationFailed { branch, error } => write!(
                f,
                "{}",
                format_error_block(
                    error_message(cformat!("Failed to create branch <bold>{branch}</>")),
                    error
                )
            ),
            GitError::WorktreeCreationFailed { branch, error } => write!(
                f,
                "{}",
                format_error_block(
                    error_message(cformat!("Failed to create worktree for <bold>{branch}</>")),
                    error
                )
            ),
            GitError::WorktreeRemovalFailed {
                branch,
                path,
                error,
            } => write!(
                f,
                "{}",
                format_error_block(
                    error_message(cformat!(
                        "Failed to remove worktree for <bold>{branch}</> @ <bold>{}</>",
                        format_path_for_display(path)
                    )),
                    error
                )
            ),
            GitError::ListingFailed { error } => write!(
                f,
                "{}",
                format_error_block(error_message("Failed to list worktrees"), error)
            ),
            GitError::CommandFailed { error } => write!(
                f,
                "{}\n{}",
                format_error_block(error_message("Failed to run git"), error),
                hint_message("Is git installed and on your PATH?")
            ),
            GitError::Other { message } => write!(f, "{}", error_message(message)),
        }
    }
}

impl std::error::Error for GitError {}

/// Headline plus captured subprocess output, indented and dimmed. Output that
/// is empty after trimming leaves the headline alone.
fn format_error_block(header: FormattedMessage, detail: &str) -> String {
    let trimmed = detail.trim();
    if trimmed.is_empty() {
        return header.into_inner();
    }
    let mut block = header.into_inner();
    for line in trimmed.lines() {
        block.push('\n');
        block.push_str(&cformat!("  <dim>{line}</>"));
    }
    block
}

/// Validate a branch name before it reaches git or the filesystem.
///
/// Slashes are allowed (the worktree lands in a nested directory under
/// `.worktrees/`). Everything rejected here is either refused by git itself
/// or would escape the worktrees directory or read as a command-line flag.
pub fn validate_branch_name(branch: &str) -> Result<(), GitError> {
    let invalid = |reason: &'static str| {
        Err(GitError::InvalidBranchName {
            branch: branch.to_string(),
            reason,
        })
    };

    if branch.is_empty() {
        return invalid("branch name is empty");
    }
    if branch.starts_with('-') {
        return invalid("branch names cannot start with '-'");
    }
    if branch.starts_with('/') || branch.ends_with('/') {
        return invalid("branch names cannot start or end with '/'");
    }
    if branch.ends_with(".lock") {
        return invalid("branch names cannot end with '.lock'");
    }
    if branch.ends_with('.') {
        return invalid("branch names cannot end with '.'");
    }
    if branch.contains("..") {
        return invalid("branch names cannot contain '..'");
    }
    if branch.contains("//") {
        return invalid("branch names cannot contain '//'");
    }
    if branch.contains("@{") {
        return invalid("branch names cannot contain '@{'");
    }
    if branch
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || "~^:?*[\\".contains(c))
    {
        return invalid("branch names cannot contain whitespace or any of ~ ^ : ? * [ \\");
    }
    Ok(())
}

/// A discovered git repository.
#[derive(Debug, Clone, PartialEq)]
pub struct Repository {
    root: PathBuf,
}

impl Repository {
    /// Wrap an already-known repository root without consulting git.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Discover the repository containing the current directory.
    pub fn discover() -> Result<Self, GitError> {
        Self::discover_from(".")
    }

    /// Discover the repository containing `dir`.
    ///
    /// Resolves the root of the main working tree via
    /// `git rev-parse --show-toplevel`; any failure (not a repository, git
    /// missing output) maps to [`GitError::NotARepository`].
    pub fn discover_from(dir: impl AsRef<Path>) -> Result<Self, GitError> {
        let mut cmd = Command::new("git");
        cmd.args(["rev-parse", "--show-toplevel"]);
        cmd.current_dir(dir.as_ref());
        let result = exec::run(&mut cmd).map_err(|e| GitError::CommandFailed {
            error: e.to_string(),
        })?;
        if !result.success() {
            return Err(GitError::NotARepository);
        }
        Ok(Self::at(result.output.trim()))
    }

    /// The repository root (top level of the main working tree).
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Canonical location for a branch's worktree:
    /// `<root>/.worktrees/<branch>`.
    pub fn worktree_path(&self, branch: &str) -> PathBuf {
        self.root.join(WORKTREES_DIR).join(branch)
    }

    /// Whether a worktree directory for this branch exists on disk.
    ///
    /// Directory presence is the source of truth, not git's worktree
    /// metadata: an entry whose directory was deleted out from under git
    /// reports `false` here and can be created anew.
    pub fn worktree_exists(&self, branch: &str) -> bool {
        self.worktree_path(branch).is_dir()
    }

    /// Whether a local branch with this name exists.
    pub fn branch_exists(&self, branch: &str) -> Result<bool, GitError> {
        let ref_name = format!("refs/heads/{branch}");
        let result = self.run(&["show-ref", "--verify", "--quiet", &ref_name])?;
        Ok(result.success())
    }

    /// Create a local branch at the current HEAD.
    pub fn create_branch(&self, branch: &str) -> Result<(), GitError> {
        let result = self.run(&["branch", branch])?;
        if !result.success() {
            return Err(GitError::BranchCreationFailed {
                branch: branch.to_string(),
                error: result.output,
            });
        }
        Ok(())
    }

    /// The currently checked-out branch, or `None` when HEAD is detached.
    pub fn current_branch(&self) -> Result<Option<String>, GitError> {
        let result = self.run(&["branch", "--show-current"])?;
        if !result.success() {
            return Err(GitError::Other {
                message: format!("Failed to read the current branch: {}", result.output.trim()),
            });
        }
        let branch = result.output.trim();
        Ok((!branch.is_empty()).then(|| branch.to_string()))
    }

    /// All worktrees git knows about, in the order git reports them (the
    /// main working tree first).
    pub fn list_worktrees(&self) -> Result<Vec<Worktree>, GitError> {
        let result = self.run(&["worktree", "list", "--porcelain"])?;
        if !result.success() {
            return Err(GitError::ListingFailed {
                error: result.output,
            });
        }
        Ok(parse_worktree_list(&result.output))
    }

    /// Create a worktree for an existing branch at its canonical path.
    ///
    /// The branch must already exist; callers create it first. Returns the
    /// worktree path on success.
    pub fn add_worktree(&self, branch: &str) -> Result<PathBuf, GitError> {
        let path = self.worktree_path(branch);
        let path_str = path_as_str(&path)?;
        let result = self.run(&["worktree", "add", path_str, branch])?;
        if !result.success() {
            return Err(GitError::WorktreeCreationFailed {
                branch: branch.to_string(),
                error: result.output,
            });
        }
        Ok(path)
    }

    /// Remove a branch's worktree, discarding uncommitted changes.
    ///
    /// Passes `--force` so dirty or untracked state never blocks removal.
    /// The branch itself is kept. Stale metadata is pruned afterwards, and a
    /// failed prune never turns a completed removal into an error.
    pub fn remove_worktree(&self, branch: &str) -> Result<(), GitError> {
        let path = self.worktree_path(branch);
        let path_str = path_as_str(&path)?;
        let result = self.run(&["worktree", "remove", path_str, "--force"])?;
        if !result.success() {
            return Err(GitError::WorktreeRemovalFailed {
                branch: branch.to_string(),
                path,
                error: result.output,
            });
        }

        match exec::run(&mut self.git_command(&["worktree", "prune"])) {
            Ok(prune) if !prune.success() => {
                log::debug!(
                    "worktree prune exited with {}: {}",
                    prune.code,
                    prune.output.trim()
                );
            }
            Err(e) => log::debug!("worktree prune failed to start: {e}"),
            Ok(_) => {}
        }
        Ok(())
    }

    fn git_command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new("git");
        cmd.args(args);
        cmd.current_dir(&self.root);
        cmd
    }

    fn run(&self, args: &[&str]) -> Result<CommandResult, GitError> {
        exec::run(&mut self.git_command(args)).map_err(|e| GitError::CommandFailed {
            error: e.to_string(),
        })
    }
}

fn path_as_str(path: &Path) -> Result<&str, GitError> {
    path.to_str().ok_or_else(|| GitError::Other {
        message: "Worktree path is not valid UTF-8".to_string(),
    })
}

/// Parse `git worktree list --porcelain` output.
///
/// Records are blank-line separated `key value` lines; `bare` and `detached`
/// appear as bare markers. A record is emitted when its terminating blank
/// line (or end of input) is reached. Lines that fit no known shape and keys
/// from newer git versions are skipped so the parser keeps working as the
/// porcelain format grows.
fn parse_worktree_list(output: &str) -> Vec<Worktree> {
    let mut worktrees = Vec::new();
    let mut current: Option<Worktree> = None;

    for line in output.lines() {
        if line.is_empty() {
            if let Some(wt) = current.take() {
                worktrees.push(wt);
            }
            continue;
        }

        let (key, value) = match line.split_once(' ') {
            Some((key, value)) => (key, Some(value)),
            None => (line, None),
        };

        match key {
            "worktree" => {
                // Opens a record; a path-less worktree line is malformed and
                // opens nothing.
                if let Some(path) = value {
                    current = Some(Worktree {
                        path: PathBuf::from(path),
                        head: String::new(),
                        branch: None,
                        bare: false,
                        detached: false,
                    });
                }
            }
            "HEAD" => {
                if let (Some(wt), Some(value)) = (current.as_mut(), value) {
                    wt.head = value.to_string();
                }
            }
            "branch" => {
                if let (Some(wt), Some(value)) = (current.as_mut(), value) {
                    wt.branch = Some(
                        value
                            .strip_prefix("refs/heads/")
                            .unwrap_or(value)
                            .to_string(),
                    );
                }
            }
            "bare" => {
                if let Some(wt) = current.as_mut() {
                    wt.bare = true;
                }
            }
            "detached" => {
                if let Some(wt) = current.as_mut() {
                    wt.detached = true;
                }
            }
            _ => {}
        }
    }

    if let Some(wt) = current {
        worktrees.push(wt);
    }

    worktrees
}
