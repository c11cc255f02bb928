//! Core data types for yumwrap
//!
//! Package records parsed from yum/dnf listings, plus the results of
//! list and install operations.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Represents one line of `yum list` / `dnf list` output
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
pub struct Package {
    /// Base name without the architecture suffix, e.g. "libwpg"
    pub name: String,
    pub arch: String,
    pub version: String,
    /// Repository name with the leading `@` removed
    pub repo: String,
}

impl Package {
    /// Name with architecture suffix, e.g. "libwpg.x86_64"
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.name, self.arch)
    }

    /// Long form, e.g. "libwpg.x86_64-0.3.0-1.el7-anaconda"
    pub fn info(&self) -> String {
        format!("{}.{}-{}-{}", self.name, self.arch, self.version, self.repo)
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Result of a listing, split into installed and available sections
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct PackageList {
    pub installed: Vec<Package>,
    pub available: Vec<Package>,
    /// Exit code reported by the package manager
    pub exit_code: i32,
}

impl PackageList {
    pub fn is_empty(&self) -> bool {
        self.installed.is_empty() && self.available.is_empty()
    }

    /// Get summary string (e.g., "3 installed · 5 available")
    pub fn summary(&self) -> String {
        format!(
            "{} installed · {} available",
            self.installed.len(),
            self.available.len()
        )
    }
}

/// Which part of the package universe `list` should cover
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Installed,
    Available,
    All,
}

impl Selection {
    pub fn all() -> &'static [Selection] {
        &[Selection::Installed, Selection::Available, Selection::All]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Selection::Installed => "installed",
            Selection::Available => "available",
            Selection::All => "all",
        }
    }
}

impl FromStr for Selection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selection::all()
            .iter()
            .copied()
            .find(|sel| sel.as_str() == s)
            .ok_or_else(|| format!("Unknown selection '{}' (expected installed, available or all)", s))
    }
}

/// Supported package manager front-ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Yum,
    Dnf,
}

impl Tool {
    /// Binary name on PATH
    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::Yum => "yum",
            Tool::Dnf => "dnf",
        }
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yum" => Ok(Tool::Yum),
            "dnf" => Ok(Tool::Dnf),
            other => Err(format!("Unsupported package manager '{}' (expected yum or dnf)", other)),
        }
    }
}

/// Result of a single install command
#[derive(Debug, Clone, Serialize)]
pub struct CommandResult {
    pub success: bool,
    pub exit_code: i32,
    pub command: String,
    pub output: Vec<String>,
}

impl CommandResult {
    /// Last line of output, which is where yum/dnf put the error reason
    pub fn message(&self) -> String {
        self.output
            .last()
            .cloned()
            .unwrap_or_else(|| format!("Command failed with exit code: {}", self.exit_code))
    }
}

/// A package that failed to install during a batch
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InstallFailure {
    pub name: String,
    pub exit_code: i32,
    pub message: String,
}

/// Outcome of installing a list of packages
#[derive(Debug, Clone, Serialize)]
pub struct InstallReport {
    pub started: DateTime<Local>,
    pub installed: Vec<String>,
    pub failed: Vec<InstallFailure>,
}

impl InstallReport {
    pub fn new() -> Self {
        Self {
            started: Local::now(),
            installed: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Format the start time for display
    pub fn formatted_date(&self) -> String {
        self.started.format("%d.%m.%y %H:%M").to_string()
    }

    /// Get summary string (e.g., "8 installed · 1 failed")
    pub fn summary(&self) -> String {
        format!(
            "{} installed · {} failed",
            self.installed.len(),
            self.failed.len()
        )
    }
}

impl Default for InstallReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn libwpg() -> Package {
        Package {
            name: "libwpg".into(),
            arch: "x86_64".into(),
            version: "0.3.0-1.el7".into(),
            repo: "anaconda".into(),
        }
    }

    #[test]
    fn test_package_display_is_bare_name() {
        assert_eq!(libwpg().to_string(), "libwpg");
    }

    #[test]
    fn test_package_long_forms() {
        let pkg = libwpg();
        assert_eq!(pkg.full_name(), "libwpg.x86_64");
        assert_eq!(pkg.info(), "libwpg.x86_64-0.3.0-1.el7-anaconda");
    }

    #[test]
    fn test_selection_from_str() {
        assert_eq!("installed".parse::<Selection>(), Ok(Selection::Installed));
        assert_eq!("all".parse::<Selection>(), Ok(Selection::All));
        assert!("everything".parse::<Selection>().is_err());
    }

    #[test]
    fn test_tool_from_str() {
        assert_eq!("dnf".parse::<Tool>(), Ok(Tool::Dnf));
        assert_eq!(Tool::Yum.as_str(), "yum");
        assert!("apt".parse::<Tool>().is_err());
    }

    #[test]
    fn test_install_report_summary() {
        let mut report = InstallReport::new();
        assert!(report.is_success());
        report.installed.push("clang".into());
        report.failed.push(InstallFailure {
            name: "nosuchpkg".into(),
            exit_code: 1,
            message: "Error: Nothing to do".into(),
        });
        assert!(!report.is_success());
        assert_eq!(report.summary(), "1 installed · 1 failed");
    }

    #[test]
    fn test_package_list_summary() {
        let list = PackageList {
            installed: vec![libwpg()],
            available: Vec::new(),
            exit_code: 0,
        };
        assert!(!list.is_empty());
        assert_eq!(list.summary(), "1 installed · 0 available");
    }

    #[test]
    fn test_package_list_json() {
        let list = PackageList {
            installed: Vec::new(),
            available: vec![libwpg()],
            exit_code: 0,
        };
        let json: serde_json::Value = serde_json::to_value(&list).unwrap();
        assert_eq!(json["available"][0]["name"], "libwpg");
        assert_eq!(json["available"][0]["repo"], "anaconda");
        assert_eq!(json["installed"].as_array().unwrap().len(), 0);
        assert_eq!(json["exit_code"], 0);
    }

    #[test]
    fn test_command_result_message_falls_back_to_exit_code() {
        let result = CommandResult {
            success: false,
            exit_code: 127,
            command: "sudo yum install -y foo".into(),
            output: Vec::new(),
        };
        assert_eq!(result.message(), "Command failed with exit code: 127");
    }
}
