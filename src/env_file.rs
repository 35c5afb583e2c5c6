//! Line-oriented rewriting of `.env` files.
//!
//! Not a dotenv parser. The bootstrapper only needs replace-or-append and
//! comment-out for a fixed set of keys, so the file is held as ordered lines
//! and keys are matched on a line-anchored `KEY=` prefix. Comments, blank
//! lines, and unrelated entries pass through byte-for-byte, which keeps the
//! whole rewrite idempotent: applying it twice produces identical content.

/// An `.env` file held as its lines, in original order.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvFile {
    lines: Vec<String>,
}

impl EnvFile {
    /// Split file content into lines. Line endings are normalized to `\n`
    /// when the file is rendered back.
    pub fn parse(content: &str) -> Self {
        Self {
            lines: content.lines().map(str::to_owned).collect(),
        }
    }

    /// Set `key` to `value`, replacing the first line that assigns the key
    /// or appending `key=value` at the end when none does.
    ///
    /// Only the first match is rewritten; later duplicates stay untouched,
    /// matching how most dotenv loaders treat the first assignment as
    /// authoritative.
    pub fn set(&mut self, key: &str, value: &str) {
        let entry = format!("{key}={value}");
        match self.lines.iter_mut().find(|line| assigns_key(line, key)) {
            Some(line) => *line = entry,
            None => self.lines.push(entry),
        }
    }

    /// Comment out every line that assigns `key` by prefixing it with `# `,
    /// keeping the old value readable.
    ///
    /// A commented line no longer assigns its key, so running this again is
    /// a no-op.
    pub fn comment_out(&mut self, key: &str) {
        for line in &mut self.lines {
            if assigns_key(line, key) {
                *line = format!("# {line}");
            }
        }
    }

    /// Render back to file content with a trailing newline.
    pub fn render(&self) -> String {
        if self.lines.is_empty() {
            return String::new();
        }
        let mut content = self.lines.join("\n");
        content.push('\n');
        content
    }
}

/// Whether a line assigns `key`, i.e. starts with exactly `key=`.
fn assigns_key(line: &str, key: &str) -> bool {
    line.strip_prefix(key)
        .is_some_and(|rest| rest.starts_with('='))
}
