//! Package manager detection
//!
//! Picks the front-end to drive when the configuration does not name one.
//! `dnf` wins over `yum` because on newer systems `yum` is only a shim.

use crate::error::{Result, YumError};
use crate::types::Tool;

const CANDIDATES: [Tool; 2] = [Tool::Dnf, Tool::Yum];

/// Detect the package manager available on this system
pub fn detect_tool() -> Result<Tool> {
    detect_tool_with(command_exists)
}

fn detect_tool_with(exists: impl Fn(&str) -> bool) -> Result<Tool> {
    let tool = CANDIDATES
        .iter()
        .copied()
        .find(|tool| exists(tool.as_str()))
        .ok_or_else(|| YumError::ToolNotFound {
            tried: CANDIDATES.iter().map(|t| t.as_str().to_string()).collect(),
        })?;

    log::debug!("Detected package manager: {}", tool.as_str());
    Ok(tool)
}

/// Check if a command exists in PATH
fn command_exists(cmd: &str) -> bool {
    duct::cmd("which", [cmd])
        .stdout_null()
        .stderr_null()
        .unchecked()
        .run()
        .map(|output| output.status.success())
        .unwrap_or(false)
}
