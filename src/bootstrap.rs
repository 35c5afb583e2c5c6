//! Environment bootstrapping for fresh worktrees.
//!
//! A new worktree checks out tracked files only; the `.env` file and sqlite
//! database that local development needs are untracked and must be
//! provisioned. [`setup`] does that, and is safe to run again on a worktree
//! that already has them.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

use crate::env_file::EnvFile;

/// Environment file consumed by the application.
pub const ENV_FILE: &str = ".env";
/// Tracked template the environment file is copied from.
pub const ENV_EXAMPLE_FILE: &str = ".env.example";
/// Directory holding the per-worktree database.
pub const DATABASE_DIR: &str = "database";
/// Sqlite database file name.
pub const DATABASE_FILE: &str = "database.sqlite";

/// What [`setup`] changed, for the caller to report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BootstrapReport {
    /// `.env` was created by copying `.env.example`.
    pub env_copied: bool,
    /// `database/database.sqlite` was created empty.
    pub database_created: bool,
    /// `.env` was rewritten to point at the worktree's database.
    pub env_rewritten: bool,
}

/// Provision a worktree with a self-contained local environment.
///
/// Steps, in order:
/// 1. Copy `.env.example` to `.env` when `.env` does not exist yet.
/// 2. Ensure the `database/` directory exists.
/// 3. Ensure `database/database.sqlite` exists. An existing database is
///    never touched, let alone truncated.
/// 4. Rewrite `.env` (when one exists) to use sqlite: `DB_CONNECTION=sqlite`,
///    `DB_DATABASE=<absolute sqlite path>`, and the server-oriented keys
///    `DB_HOST`, `DB_PORT`, `DB_USERNAME`, `DB_PASSWORD` commented out.
///
/// The path is canonicalized first so `DB_DATABASE` is absolute regardless
/// of how the caller spelled the worktree path. Running `setup` twice leaves
/// every file byte-identical to the first run.
pub fn setup(worktree: &Path) -> io::Result<BootstrapReport> {
    let worktree = dunce::canonicalize(worktree)?;
    let mut report = BootstrapReport::default();

    let env_path = worktree.join(ENV_FILE);
    let example_path = worktree.join(ENV_EXAMPLE_FILE);
    if !env_path.exists() && example_path.exists() {
        fs::copy(&example_path, &env_path)?;
        report.env_copied = true;
    }

    let database_dir = worktree.join(DATABASE_DIR);
    fs::create_dir_all(&database_dir)?;

    let database_path = database_dir.join(DATABASE_FILE);
    // create_new cannot truncate: it fails when the file is already there.
    match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&database_path)
    {
        Ok(_) => report.database_created = true,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
        Err(e) => return Err(e),
    }

    if env_path.exists() {
        let content = fs::read_to_string(&env_path)?;
        let mut env = EnvFile::parse(&content);

        env.set("DB_CONNECTION", "sqlite");
        env.set("DB_DATABASE", &database_path.display().to_string());
        for key in ["DB_HOST", "DB_PORT", "DB_USERNAME", "DB_PASSWORD"] {
            env.comment_out(key);
        }

        fs::write(&env_path, env.render())?;
        report.env_rewritten = true;
    }

    Ok(report)
}
