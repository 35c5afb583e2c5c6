//! Subprocess execution.
//!
//! [`run`] is the **only** way grove runs external commands. Routing every
//! invocation through it gives uniform debug logging (`RUST_LOG=debug` or
//! `--verbose` shows each command with timing) and a single place where exit
//! codes are captured. A non-zero exit is not an error here; it is data the
//! caller inspects through [`CommandResult`]. Only failing to start the
//! process at all is an `Err`.

use std::process::Command;
use std::time::Instant;

/// Outcome of one finished subprocess.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandResult {
    /// Captured stdout followed by captured stderr, lossily decoded.
    pub output: String,
    /// Exit code; `-1` when the process was terminated by a signal.
    pub code: i32,
}

impl CommandResult {
    /// Whether the process exited with code zero.
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Run a command to completion and capture its merged output.
///
/// Blocks until the process exits; there is no timeout. The command's stdin is
/// not connected, so subprocesses that prompt will read EOF rather than hang
/// on the user's terminal.
pub fn run(cmd: &mut Command) -> std::io::Result<CommandResult> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    let args = cmd
        .get_args()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    let cmd_str = if args.is_empty() {
        program
    } else {
        format!("{} {}", program, args.join(" "))
    };

    log::debug!("$ {cmd_str}");

    let start = Instant::now();
    let result = cmd.output();
    let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

    match &result {
        Ok(output) => {
            log::debug!(
                "[grove-trace] cmd=\"{}\" dur={:.1}ms ok={}",
                cmd_str,
                duration_ms,
                output.status.success()
            );
        }
        Err(e) => {
            log::debug!(
                "[grove-trace] cmd=\"{}\" dur={:.1}ms err=\"{}\"",
                cmd_str,
                duration_ms,
                e
            );
        }
    }

    let output = result?;
    let mut merged = String::from_utf8_lossy(&output.stdout).into_owned();
    merged.push_str(&String::from_utf8_lossy(&output.stderr));

    Ok(CommandResult {
        output: merged,
        code: output.status.code().unwrap_or(-1),
    })
}

/// Build a command that hands `command` to the platform shell.
///
/// Only user-authored post-create commands go through a shell; everything
/// grove runs itself uses explicit argument vectors.
pub fn shell_command(command: &str) -> Command {
    #[cfg(windows)]
    {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", command]);
        cmd
    }
    #[cfg(not(windows))]
    {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", command]);
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_captures_output() {
        let result = run(&mut shell_command("echo hello")).unwrap();
        assert!(result.success());
        assert_eq!(result.code, 0);
        assert!(result.output.contains("hello"));
    }

    #[test]
    fn test_run_captures_exit_code() {
        let result = run(&mut shell_command("exit 3")).unwrap();
        assert!(!result.success());
        assert_eq!(result.code, 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_run_merges_stdout_and_stderr() {
        let result = run(&mut shell_command("echo out; echo err 1>&2")).unwrap();
        assert!(result.success());
        assert!(result.output.contains("out"));
        assert!(result.output.contains("err"));
        // stdout comes first in the merged output
        assert!(result.output.find("out").unwrap() < result.output.find("err").unwrap());
    }

    #[test]
    fn test_run_errors_when_program_is_missing() {
        let mut cmd = Command::new("grove-test-no-such-binary");
        assert!(run(&mut cmd).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_command_runs_in_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut cmd = shell_command("pwd");
        cmd.current_dir(dir.path());
        let result = run(&mut cmd).unwrap();
        assert!(result.success());
        let reported = std::fs::canonicalize(result.output.trim()).unwrap();
        let expected = std::fs::canonicalize(dir.path()).unwrap();
        assert_eq!(reported, expected);
    }
}
