//! Environment provisioning shared by `new` and `init`.

use std::path::Path;

use color_print::cformat;

use crate::bootstrap;
use crate::config::{CONFIG_FILE, ProjectConfig};
use crate::exec;
use crate::git::Repository;
use crate::styling::{eprintln, info_message, progress_message, warning_message};

/// Bootstrap the environment and run the project's post-create commands.
///
/// Everything here is best-effort: the worktree already exists and is never
/// rolled back, so failures surface as warnings and provisioning continues
/// with the next step.
pub(crate) fn provision(repo: &Repository, worktree: &Path) {
    eprintln!("{}", progress_message("Setting up environment..."));
    match bootstrap::setup(worktree) {
        Ok(report) => {
            if report.env_copied {
                eprintln!(
                    "{}",
                    info_message(cformat!("Created <bold>.env</> from <bold>.env.example</>"))
                );
            }
            if report.database_created {
                eprintln!(
                    "{}",
                    info_message(cformat!("Created <bold>database/database.sqlite</>"))
                );
            }
        }
        Err(e) => {
            eprintln!(
                "{}",
                warning_message(format!("Environment setup failed: {e}"))
            );
        }
    }

    run_post_create_commands(repo, worktree);
}

fn run_post_create_commands(repo: &Repository, worktree: &Path) {
    let config = match ProjectConfig::load(repo.root()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", warning_message(format!("{e}")));
            return;
        }
    };

    for key in config.unknown_keys() {
        eprintln!(
            "{}",
            warning_message(cformat!("Unknown key <bold>{key}</> in {CONFIG_FILE}"))
        );
    }

    for command in &config.post_create_commands {
        eprintln!(
            "{}",
            progress_message(cformat!("Running <bold>{command}</>..."))
        );
        let mut cmd = exec::shell_command(command);
        cmd.current_dir(worktree);
        match exec::run(&mut cmd) {
            Ok(result) => {
                let output = result.output.trim_end();
                if !output.is_empty() {
                    eprintln!("{output}");
                }
                if !result.success() {
                    eprintln!(
                        "{}",
                        warning_message(cformat!(
                            "<bold>{command}</> exited with code {}; continuing",
                            result.code
                        ))
                    );
                }
            }
            Err(e) => {
                eprintln!(
                    "{}",
                    warning_message(cformat!("Failed to run <bold>{command}</>: {e}"))
                );
            }
        }
    }
}
