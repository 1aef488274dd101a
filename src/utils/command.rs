//! Child process execution
//!
//! Every external call (git, gh) goes through these helpers so that exit
//! codes and captured output are handled in one place.

use std::path::Path;
use std::process::Command;

/// Captured outcome of a child process
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code, -1 when terminated by a signal
    pub exit_code: i32,
    /// Trimmed standard output
    pub stdout: String,
    /// Trimmed standard error
    pub stderr: String,
}

impl CommandResult {
    /// Whether the process exited with code 0
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Render a command line for error messages
pub fn command_line(program: &str, args: &[&str]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

/// Run a command and capture its output
///
/// Returns `Err` only when the program could not be started; a non-zero exit
/// is reported through [`CommandResult::success`].
pub fn run(program: &str, args: &[&str], dir: Option<&Path>) -> std::io::Result<CommandResult> {
    let mut cmd = Command::new(program);
    cmd.args(args);

    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }

    let output = cmd.output()?;

    Ok(CommandResult {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    })
}

/// Run a command and return stdout, failing on any non-zero exit
pub fn run_checked(program: &str, args: &[&str], dir: Option<&Path>) -> Result<String, String> {
    let result = run(program, args, dir)
        .map_err(|e| format!("Failed to execute '{}': {}", command_line(program, args), e))?;

    if result.success() {
        Ok(result.stdout)
    } else {
        Err(format!(
            "'{}' failed with exit code {}: {}",
            command_line(program, args),
            result.exit_code,
            result.stderr
        ))
    }
}
