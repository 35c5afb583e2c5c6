//! Terminal styling: symbols, message constructors, and output macros.
//!
//! ## stdout vs stderr principle
//!
//! - **stdout**: primary data (the worktree path, table data, JSON)
//! - **stderr**: status messages (progress, success, errors, hints, warnings)
//!
//! This separation keeps piping (`grove worktrees | grep foo`, `cd $(grove new
//! x)`) working without status messages interfering. Use `println!` for primary
//! output, `eprintln!` for status messages -- the re-exported anstream versions,
//! which strip color when the stream is not a terminal.

use color_print::{cformat, cstr};

// Re-exports from anstream (auto-detecting color support)
pub use anstream::{eprint, eprintln, print, println};

// Re-export from anstyle (for composition)
pub use anstyle::Style as AnstyleStyle;

/// Symbol for in-progress messages (cyan circle)
pub const PROGRESS_SYMBOL: &str = cstr!("<cyan>◎</>");

/// Symbol for success messages (green check)
pub const SUCCESS_SYMBOL: &str = cstr!("<green>✓</>");

/// Symbol for error messages (red cross)
pub const ERROR_SYMBOL: &str = cstr!("<red>✗</>");

/// Symbol for warning messages (yellow triangle)
pub const WARNING_SYMBOL: &str = cstr!("<yellow>▲</>");

/// Symbol for hint messages (dimmed arrow)
pub const HINT_SYMBOL: &str = cstr!("<dim>↳</>");

/// Symbol for informational messages (dimmed circle)
pub const INFO_SYMBOL: &str = cstr!("<dim>○</>");

/// Symbol for interactive prompts (cyan chevron)
pub const PROMPT_SYMBOL: &str = cstr!("<cyan>❯</>");

/// A message that has already been formatted with a symbol and color.
///
/// This type prevents double-formatting: once a message is formatted (e.g. via
/// [`error_message`]), it cannot accidentally be passed through another
/// formatting function, because the constructors take `impl AsRef<str>` and
/// `FormattedMessage` deliberately does not implement `AsRef<str>`.
///
/// # Example
///
/// ```
/// use grove::styling::error_message;
///
/// let msg = error_message("Something went wrong");
/// eprintln!("{}", msg);
/// ```
///
/// ```compile_fail
/// use grove::styling::{error_message, hint_message};
///
/// let msg = error_message("first");
/// let double = hint_message(msg); // does not compile
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedMessage(String);

impl FormattedMessage {
    /// Wrap an already-formatted string.
    pub fn new(formatted: String) -> Self {
        Self(formatted)
    }

    /// Consume and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// View the formatted content.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FormattedMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<FormattedMessage> for String {
    fn from(msg: FormattedMessage) -> Self {
        msg.0
    }
}

/// Format an error message: red cross, red text.
pub fn error_message(content: impl AsRef<str>) -> FormattedMessage {
    FormattedMessage(cformat!("{ERROR_SYMBOL} <red>{}</>", content.as_ref()))
}

/// Format a hint message: dimmed arrow, dimmed text.
pub fn hint_message(content: impl AsRef<str>) -> FormattedMessage {
    FormattedMessage(cformat!("{HINT_SYMBOL} <dim>{}</>", content.as_ref()))
}

/// Format a warning message: yellow triangle, yellow text.
pub fn warning_message(content: impl AsRef<str>) -> FormattedMessage {
    FormattedMessage(cformat!("{WARNING_SYMBOL} <yellow>{}</>", content.as_ref()))
}

/// Format a success message: green check, green text.
pub fn success_message(content: impl AsRef<str>) -> FormattedMessage {
    FormattedMessage(cformat!("{SUCCESS_SYMBOL} <green>{}</>", content.as_ref()))
}

/// Format an in-progress message: cyan circle, cyan text.
pub fn progress_message(content: impl AsRef<str>) -> FormattedMessage {
    FormattedMessage(cformat!("{PROGRESS_SYMBOL} <cyan>{}</>", content.as_ref()))
}

/// Format an informational message: dimmed circle, plain text.
pub fn info_message(content: impl AsRef<str>) -> FormattedMessage {
    FormattedMessage(format!("{INFO_SYMBOL} {}", content.as_ref()))
}

/// Format an interactive prompt: cyan chevron, plain text.
///
/// Prompts are written with `eprint!` (no newline) so the cursor stays on the
/// prompt line while waiting for input.
pub fn prompt_message(content: impl AsRef<str>) -> FormattedMessage {
    FormattedMessage(format!("{PROMPT_SYMBOL} {}", content.as_ref()))
}
