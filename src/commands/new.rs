//! `grove new`: branch, worktree, and environment in one step.

use color_print::cformat;

use crate::git::{GitError, Repository};
use crate::output::confirm;
use crate::path::format_path_for_display;
use crate::styling::{eprintln, info_message, println, progress_message, success_message};

use super::prompt_error;
use super::provision::provision;

/// Create a worktree for `branch`, creating the branch first when needed.
///
/// The resolved worktree path is printed as the final stdout line so shell
/// wrappers can `cd "$(grove new my-branch)"`; everything else goes to
/// stderr.
pub fn handle_new(branch: &str, yes: bool) -> Result<(), GitError> {
    let repo = Repository::discover()?;

    if repo.worktree_exists(branch) {
        return Err(GitError::WorktreeAlreadyExists {
            branch: branch.to_string(),
            path: repo.worktree_path(branch),
        });
    }

    if !repo.branch_exists(branch)? {
        if !yes {
            let question = cformat!("Branch <bold>{branch}</> does not exist. Create it?");
            if !confirm(&question, true).map_err(prompt_error)? {
                eprintln!("{}", info_message("Aborted."));
                return Ok(());
            }
        }
        eprintln!(
            "{}",
            progress_message(cformat!("Creating branch <bold>{branch}</>..."))
        );
        repo.create_branch(branch)?;
    }

    eprintln!(
        "{}",
        progress_message(cformat!("Creating worktree for <bold>{branch}</>..."))
    );
    let path = repo.add_worktree(branch)?;

    provision(&repo, &path);

    eprintln!(
        "{}",
        success_message(cformat!(
            "Worktree created at <bold>{}</>",
            format_path_for_display(&path)
        ))
    );
    println!("{}", path.display());

    Ok(())
}
