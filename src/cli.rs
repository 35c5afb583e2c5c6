//! Command-line interface.
//!
//! Argument parsing lives here; the work happens in [`crate::commands`].
//! Branch names are validated at this boundary so nothing questionable ever
//! reaches git or the filesystem.

use clap::{Parser, Subcommand};

use crate::commands;
use crate::git::{self, GitError};

#[derive(Parser)]
#[command(name = "grove")]
#[command(version)]
#[command(about = "Git worktrees with a ready-to-run local environment")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show every external command grove runs
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a branch, its worktree, and a local environment
    ///
    /// The worktree lands at .worktrees/<branch> under the repository root,
    /// gets a .env copied from .env.example, and a private sqlite database.
    /// Prints the worktree path as the final line of stdout.
    New {
        /// Branch to create a worktree for
        branch: String,

        /// Answer yes to every prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Remove a branch's worktree (the branch itself is kept)
    Remove {
        /// Branch whose worktree to remove
        branch: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List all worktrees
    #[command(visible_aliases = ["list", "ls"])]
    Worktrees {
        /// Emit the list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Re-run environment setup for an existing worktree
    Init {
        /// Branch of the worktree to provision (defaults to the current checkout)
        branch: Option<String>,
    },
}

impl Cli {
    /// Dispatch to the selected subcommand.
    pub fn run(self) -> Result<(), GitError> {
        match self.command {
            Commands::New { branch, yes } => {
                git::validate_branch_name(&branch)?;
                commands::handle_new(&branch, yes)
            }
            Commands::Remove { branch, yes } => {
                git::validate_branch_name(&branch)?;
                commands::handle_remove(&branch, yes)
            }
            Commands::Worktrees { json } => commands::handle_list(json),
            Commands::Init { branch } => {
                if let Some(branch) = &branch {
                    git::validate_branch_name(branch)?;
                }
                commands::handle_init(branch.as_deref())
            }
        }
    }
}
