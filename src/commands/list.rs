//! `grove worktrees`: the worktree catalog as a table or JSON.

use unicode_width::UnicodeWidthStr;

use crate::git::{GitError, Repository, Worktree};
use crate::path::format_path_for_display;
use crate::styling::{AnstyleStyle, eprintln, info_message, println};

/// Hash characters shown in the HEAD column.
const HEAD_WIDTH: usize = 8;

/// List every worktree git reports, the main working tree included.
///
/// The table goes to stdout (it is the data), with paths abbreviated for
/// reading. `--json` emits the raw records instead, full paths and all.
pub fn handle_list(json: bool) -> Result<(), GitError> {
    let repo = Repository::discover()?;
    let worktrees = repo.list_worktrees()?;

    if json {
        let rendered = serde_json::to_string_pretty(&worktrees).map_err(|e| GitError::Other {
            message: format!("Failed to serialize worktrees: {e}"),
        })?;
        println!("{rendered}");
        return Ok(());
    }

    if worktrees.is_empty() {
        eprintln!("{}", info_message("No worktrees found."));
        return Ok(());
    }

    print_table(&worktrees);
    Ok(())
}

fn print_table(worktrees: &[Worktree]) {
    let rows: Vec<[String; 3]> = worktrees.iter().map(row).collect();

    let branch_width = column_width("Branch", rows.iter().map(|row| row[0].as_str()));
    let path_width = column_width("Path", rows.iter().map(|row| row[1].as_str()));

    let header = AnstyleStyle::new().bold();
    println!(
        "{header}{}  {}  {}{header:#}",
        pad("Branch", branch_width),
        pad("Path", path_width),
        "HEAD"
    );
    for row in &rows {
        println!(
            "{}  {}  {}",
            pad(&row[0], branch_width),
            pad(&row[1], path_width),
            row[2]
        );
    }
}

fn row(wt: &Worktree) -> [String; 3] {
    let branch = match &wt.branch {
        Some(branch) => branch.clone(),
        None if wt.detached => "(detached)".to_string(),
        None if wt.bare => "(bare)".to_string(),
        None => "-".to_string(),
    };
    let head = if wt.head.is_empty() {
        "-".to_string()
    } else {
        wt.head.chars().take(HEAD_WIDTH).collect()
    };
    [branch, format_path_for_display(&wt.path), head]
}

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .map(UnicodeWidthStr::width)
        .chain([header.width()])
        .max()
        .unwrap_or(0)
}

/// Pad to a display width; `{:<width$}` counts chars, not columns.
fn pad(cell: &str, width: usize) -> String {
    let padding = width.saturating_sub(cell.width());
    format!("{cell}{}", " ".repeat(padding))
}
