//! Subcommand implementations.
//!
//! Each handler discovers the repository once and threads the resulting
//! [`Repository`](crate::git::Repository) context through everything it does;
//! no handler touches the ambient current directory after discovery.

mod init;
mod list;
mod new;
mod provision;
mod remove;

pub use init::handle_init;
pub use list::handle_list;
pub use new::handle_new;
pub use remove::handle_remove;

use crate::git::GitError;

/// Map an I/O failure while reading a confirmation into a domain error.
pub(crate) fn prompt_error(e: std::io::Error) -> GitError {
    GitError::Other {
        message: format!("Failed to read confirmation: {e}"),
    }
}
