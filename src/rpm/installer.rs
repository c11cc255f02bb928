//! Install and list RPM packages through yum or dnf
//!
//! Every operation is a single blocking invocation of the package manager.
//! Installs run one after another: yum/dnf hold an exclusive lock, so
//! overlapping invocations would fail anyway.

use super::exec::{render_command, Executor, SystemExecutor};
use super::package_file::read_package_file;
use super::packages::package_list_from_output;
use crate::error::Result;
use crate::types::{CommandResult, InstallFailure, InstallReport, PackageList, Selection, Tool};
use std::path::Path;

pub struct RpmInstaller<E: Executor = SystemExecutor> {
    tool: Tool,
    /// Privilege prefix for installs, e.g. "sudo"
    elevation: Option<String>,
    dry_run: bool,
    executor: E,
}

impl RpmInstaller<SystemExecutor> {
    pub fn new(tool: Tool) -> Self {
        Self::with_executor(tool, SystemExecutor)
    }
}

impl<E: Executor> RpmInstaller<E> {
    pub fn with_executor(tool: Tool, executor: E) -> Self {
        Self {
            tool,
            elevation: Some("sudo".to_string()),
            dry_run: false,
            executor,
        }
    }

    /// Set the privilege prefix; `None` runs installs unprivileged
    pub fn elevation(mut self, elevation: Option<String>) -> Self {
        self.elevation = elevation.filter(|e| !e.trim().is_empty());
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// List packages, split into installed and available
    ///
    /// `packages` may contain wildcards; an empty slice lists everything
    /// the selection covers.
    pub fn list(&self, packages: &[String], selection: Option<Selection>) -> Result<PackageList> {
        let command = self.build_list_command(packages, selection);
        let output = self.executor.execute(&command)?;

        if !output.success() {
            log::warn!(
                "`{}` exited with {}",
                render_command(&command),
                output.exit_code
            );
        }

        let list = package_list_from_output(&output.lines, output.exit_code)?;
        log::info!("Listed {}", list.summary());
        Ok(list)
    }

    /// Install a single package
    pub fn install(&self, package: &str) -> Result<CommandResult> {
        let command = self.build_install_command(package);
        let rendered = render_command(&command);

        if self.dry_run {
            log::info!("Dry run: would execute `{}`", rendered);
            return Ok(CommandResult {
                success: true,
                exit_code: 0,
                command: rendered,
                output: vec![format!("Dry run: Would install {}", package)],
            });
        }

        log::info!("Installing {}", package);
        let output = self.executor.execute(&command)?;
        if !output.success() {
            log::warn!("Failed to install {} (exit code {})", package, output.exit_code);
        }

        Ok(CommandResult {
            success: output.success(),
            exit_code: output.exit_code,
            command: rendered,
            output: output.lines,
        })
    }

    /// Install packages in order
    ///
    /// A package that fails to install is recorded in the report and the
    /// batch carries on. Failing to start the package manager at all ends
    /// the batch with an error.
    pub fn install_list<S: AsRef<str>>(&self, packages: &[S]) -> Result<InstallReport> {
        let mut report = InstallReport::new();

        for package in packages {
            let package = package.as_ref();
            let result = self.install(package)?;
            if result.success {
                report.installed.push(package.to_string());
            } else {
                report.failed.push(InstallFailure {
                    name: package.to_string(),
                    exit_code: result.exit_code,
                    message: result.message(),
                });
            }
        }

        log::info!("Install finished: {}", report.summary());
        Ok(report)
    }

    /// Install every package named in a package file
    pub fn install_file(&self, path: &Path) -> Result<InstallReport> {
        let packages = read_package_file(path)?;
        self.install_list(&packages)
    }

    fn build_list_command(&self, packages: &[String], selection: Option<Selection>) -> Vec<String> {
        let mut command = vec![self.tool.as_str().to_string(), "list".to_string()];
        if let Some(selection) = selection {
            command.push(selection.as_str().to_string());
        }
        command.extend(packages.iter().cloned());
        command
    }

    fn build_install_command(&self, package: &str) -> Vec<String> {
        let mut command = Vec::with_capacity(5);
        if let Some(elevation) = &self.elevation {
            command.push(elevation.clone());
        }
        command.extend(
            [self.tool.as_str(), "install", "-y", package]
                .iter()
                .map(|s| s.to_string()),
        );
        command
    }
}
