//! `grove remove`: delete a branch's worktree, keep the branch.

use color_print::cformat;

use crate::git::{GitError, Repository};
use crate::output::confirm;
use crate::path::format_path_for_display;
use crate::styling::{eprintln, hint_message, info_message, progress_message, success_message};

use super::prompt_error;

/// Remove the worktree for `branch` after confirmation.
///
/// Removal is forced, so uncommitted changes in the worktree are discarded.
/// The underlying branch survives and can get a fresh worktree later.
pub fn handle_remove(branch: &str, yes: bool) -> Result<(), GitError> {
    let repo = Repository::discover()?;

    if !repo.worktree_exists(branch) {
        return Err(GitError::WorktreeNotFound {
            branch: branch.to_string(),
        });
    }

    if !yes {
        let path = repo.worktree_path(branch);
        eprintln!(
            "{}",
            hint_message(cformat!(
                "This deletes <bold>{}</> including any uncommitted changes",
                format_path_for_display(&path)
            ))
        );
        let question = cformat!("Remove the worktree for <bold>{branch}</>?");
        if !confirm(&question, false).map_err(prompt_error)? {
            eprintln!("{}", info_message("Aborted."));
            return Ok(());
        }
    }

    eprintln!(
        "{}",
        progress_message(cformat!("Removing worktree for <bold>{branch}</>..."))
    );
    repo.remove_worktree(branch)?;
    eprintln!(
        "{}",
        success_message(cformat!("Removed worktree for <bold>{branch}</>"))
    );

    Ok(())
}
