//! Subprocess invocation with outcome classification.
//!
//! Every CLI call funnels through [`invoke`], which folds the messy space of
//! spawn failures, exit codes, and stream contents into a small outcome enum
//! the protocol layer can match on.

use std::io::Write as _;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::ClassifyOptions;

/// Classified outcome of one CLI invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Exit status zero; trimmed stdout.
    Success(String),
    /// Exit status one with empty stdout and stderr from a filter tool: the
    /// tool ran fine and the answer is "no match", not a failure.
    KnownEmptyMatch,
    /// The tool ran and reported a genuine failure.
    ToolError { status: i32, detail: String },
    /// The executable could not be spawned at all.
    ToolMissing(String),
}

/// Run one tool to completion, optionally feeding `input` on stdin.
///
/// `empty_match_ok` marks filter-tool calls where exit status one with silent
/// streams means "no formula/automaton matched" rather than an error.
pub(crate) fn invoke(
    program: &Path,
    args: &[&str],
    input: Option<&str>,
    empty_match_ok: bool,
    options: &ClassifyOptions,
) -> Invocation {
    if options.verbose {
        eprintln!("[tlstat] invoking {}", render_command(program, args));
    }

    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Invocation::ToolMissing(program.display().to_string());
        }
        Err(err) => {
            return Invocation::ToolError {
                status: -1,
                detail: format!("failed to spawn `{}`: {err}", program.display()),
            };
        }
    };

    if let Some(text) = input {
        if let Some(mut stdin) = child.stdin.take() {
            // A tool that exits before reading all of stdin produces a broken
            // pipe here; the exit status below is the interesting part.
            let _ = stdin.write_all(text.as_bytes());
        }
    }

    let output = match child.wait_with_output() {
        Ok(output) => output,
        Err(err) => {
            return Invocation::ToolError {
                status: -1,
                detail: format!("failed to collect output of `{}`: {err}", program.display()),
            };
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if output.status.success() {
        return Invocation::Success(stdout);
    }

    let status = output.status.code().unwrap_or(-1);
    if empty_match_ok && status == 1 && stdout.is_empty() && stderr.is_empty() {
        return Invocation::KnownEmptyMatch;
    }

    let mut detail = format!(
        "`{}` returned non-zero exit status {status}",
        render_command(program, args)
    );
    if !stderr.is_empty() {
        detail.push_str("\nStderr: ");
        detail.push_str(&stderr);
    }
    if !stdout.is_empty() {
        detail.push_str("\nStdout: ");
        detail.push_str(&stdout);
    }
    Invocation::ToolError { status, detail }
}

fn render_command(program: &Path, args: &[&str]) -> String {
    let mut line = program.display().to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_executable_reports_tool_missing() {
        let outcome = invoke(
            Path::new("/nonexistent/tlstat-no-such-tool"),
            &["--version"],
            None,
            false,
            &ClassifyOptions::default(),
        );
        match outcome {
            Invocation::ToolMissing(name) => assert!(name.contains("tlstat-no-such-tool")),
            other => panic!("expected ToolMissing, got {other:?}"),
        }
    }

    #[test]
    fn command_line_renders_program_and_args() {
        let line = render_command(Path::new("/usr/bin/ltlfilt"), &["-f", "G p", "--safety"]);
        assert_eq!(line, "/usr/bin/ltlfilt -f G p --safety");
    }
}
