//! `grove init`: re-run provisioning for an existing worktree.

use color_print::cformat;

use crate::git::{GitError, Repository};
use crate::styling::{eprintln, progress_message, success_message};

use super::provision::provision;

/// Provision `branch`'s worktree, or the current checkout when no branch is
/// given.
///
/// Useful after `.env.example` or `.grove.toml` changed upstream, and for
/// adopting grove in a checkout that was not created by `grove new`.
/// Provisioning is idempotent, so running it on an already-provisioned
/// worktree changes nothing.
pub fn handle_init(branch: Option<&str>) -> Result<(), GitError> {
    let repo = Repository::discover()?;

    let (path, label) = match branch {
        Some(branch) => {
            if !repo.worktree_exists(branch) {
                return Err(GitError::WorktreeNotFound {
                    branch: branch.to_string(),
                });
            }
            (repo.worktree_path(branch), branch.to_string())
        }
        None => {
            let current = repo.current_branch()?.ok_or_else(|| GitError::Other {
                message: "Not on a branch (detached HEAD); name the worktree to provision"
                    .to_string(),
            })?;
            (repo.root().to_path_buf(), current)
        }
    };

    eprintln!(
        "{}",
        progress_message(cformat!("Provisioning <bold>{label}</>..."))
    );
    provision(&repo, &path);
    eprintln!("{}", success_message(cformat!("<bold>{label}</> is ready")));

    Ok(())
}
