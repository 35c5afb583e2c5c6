//! Interactive prompts.
//!
//! Prompts are written to stderr so piped stdout stays machine-readable, and
//! answers are read from stdin. When stdin is closed (scripts, CI), reading
//! yields an empty answer and the prompt resolves to its default.

use std::io::{self, Write};

use color_print::cformat;

use crate::styling::{eprint, prompt_message};

/// Ask a yes/no question and return the answer, using `default` for an empty
/// response.
///
/// The question may already contain styling. `y`/`yes` in any case means
/// yes; any other non-empty answer means no.
pub fn confirm(question: &str, default: bool) -> io::Result<bool> {
    let choices = if default { "[Y/n]" } else { "[y/N]" };
    eprint!(
        "{} ",
        prompt_message(cformat!("{question} <bold>{choices}</>"))
    );
    io::stderr().flush()?;

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    let response = response.trim().to_lowercase();

    Ok(match response.as_str() {
        "" => default,
        "y" | "yes" => true,
        _ => false,
    })
}
