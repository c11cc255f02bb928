//! External command execution
//!
//! Runs a program with its arguments as-is (no shell), merges stderr into
//! stdout and returns the exit code together with the trimmed output lines.

use crate::error::{Result, YumError};

/// Exit code and non-empty, trimmed output lines of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    pub exit_code: i32,
    pub lines: Vec<String>,
}

impl ExecOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Something that can run a command to completion
pub trait Executor {
    fn execute(&self, command: &[String]) -> Result<ExecOutput>;
}

/// Executes commands as child processes of the current process
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn execute(&self, command: &[String]) -> Result<ExecOutput> {
        let (program, args) = command.split_first().ok_or(YumError::EmptyCommand)?;
        let rendered = render_command(command);
        log::debug!("Running: {}", rendered);

        let output = duct::cmd(program, args)
            .stderr_to_stdout()
            .stdout_capture()
            .unchecked()
            .run()
            .map_err(|source| YumError::ProcessSpawn {
                command: rendered.clone(),
                source,
            })?;

        // Killed by a signal
        let exit_code = output.status.code().unwrap_or(-1);
        log::debug!("`{}` exited with {}", rendered, exit_code);

        let text = String::from_utf8(output.stdout).map_err(|source| YumError::Decode {
            command: rendered,
            source,
        })?;

        Ok(ExecOutput {
            exit_code,
            lines: split_output(&text),
        })
    }
}

/// Split raw output into trimmed lines, dropping the ones left empty
pub fn split_output(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Render a command for logs and dry-run messages
pub fn render_command(command: &[String]) -> String {
    command.join(" ")
}
