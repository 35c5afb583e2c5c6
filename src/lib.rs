//! Branch-per-worktree development: git worktrees with a ready-to-run local
//! environment.
//!
//! `grove new <branch>` creates the branch if needed, checks it out as a
//! worktree under `.worktrees/` at the repository root, copies
//! `.env.example` into place, gives the worktree its own sqlite database,
//! and runs any project-defined setup commands. Every branch gets an
//! isolated working copy and database, so switching work never means
//! stashing or migrating.
//!
//! This crate is the implementation of the `grove` binary; the library
//! surface exists for the binary and its integration tests and is not
//! stable.

pub mod bootstrap;
pub mod cli;
pub mod commands;
pub mod config;
pub mod env_file;
pub mod exec;
pub mod git;
pub mod output;
pub mod path;
pub mod styling;
