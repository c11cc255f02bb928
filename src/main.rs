//! yumwrap - RPM package installer and lister
//!
//! A small CLI around yum / dnf.
//!
//! Features:
//! - Install every package named in a package file
//! - List installed and available packages, split into sections
//! - Dry-run mode for installs
//! - JSON output for scripting
//!
//! Usage: yumwrap [--install] [--list <names...>] [OPTIONS]

mod config;
mod error;
mod rpm;
mod types;

use anyhow::{bail, Context, Result};
use config::Config;
use rpm::{detect_tool, RpmInstaller};
use std::path::PathBuf;
use types::{InstallReport, PackageList, Selection, Tool};

/// Parsed command-line arguments
#[derive(Debug, Default, PartialEq)]
struct Args {
    install: bool,
    list: Option<Vec<String>>,
    selection: Option<Selection>,
    tool: Option<Tool>,
    package_file: Option<PathBuf>,
    json: bool,
    dry_run: bool,
    help: bool,
    version: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            eprintln!("Run 'yumwrap --help' for usage.");
            std::process::exit(1);
        }
    };

    if args.help {
        print_help();
        return;
    }

    if args.version {
        println!("yumwrap {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    match run(&args) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn print_help() {
    println!(
        r#"yumwrap - RPM package installer and lister

USAGE:
    yumwrap [OPTIONS]

OPTIONS:
        --install                 Install packages from the package file
        --list <NAME>...          List matching packages (wildcards allowed)
        --selection <SELECTION>   Limit --list to installed, available or all
        --tool <TOOL>             Package manager to use: yum or dnf
        --package-file <PATH>     Package file to install from (implies --install)
        --json                    Print results as JSON
    -n, --dry-run                 Show what would be installed without executing
    -h, --help                    Print help information
    -v, --version                 Print version information

PACKAGE FILE:
    One package name per line. Blank lines and lines starting with '#'
    are ignored. Default: ~/Packagefile

CONFIG:
    ~/.config/yumwrap/config.toml

ENVIRONMENT:
    RUST_LOG                      Log filter, e.g. RUST_LOG=debug
"#
    );
}

fn parse_args(argv: &[String]) -> Result<Args> {
    let mut args = Args::default();
    let mut iter = argv.iter().peekable();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--install" => args.install = true,
            "--list" => {
                let mut names = Vec::new();
                while let Some(name) = iter.next_if(|next| !next.starts_with('-')) {
                    names.push(name.clone());
                }
                if names.is_empty() {
                    bail!("--list expects at least one package name");
                }
                args.list.get_or_insert_with(Vec::new).extend(names);
            }
            "--selection" => {
                let value = iter.next().context("--selection expects a value")?;
                args.selection = Some(value.parse().map_err(anyhow::Error::msg)?);
            }
            "--tool" => {
                let value = iter.next().context("--tool expects a value")?;
                args.tool = Some(value.parse().map_err(anyhow::Error::msg)?);
            }
            "--package-file" => {
                let value = iter.next().context("--package-file expects a path")?;
                args.package_file = Some(PathBuf::from(value));
                args.install = true;
            }
            "--json" => args.json = true,
            "--dry-run" | "-n" => args.dry_run = true,
            "--help" | "-h" => args.help = true,
            "--version" | "-v" => args.version = true,
            other => bail!("Unknown argument '{}'", other),
        }
    }

    Ok(args)
}

fn run(args: &Args) -> Result<i32> {
    if !args.install && args.list.is_none() {
        bail!("Nothing to do: pass --install or --list (see --help)");
    }

    let config = Config::load().context("Failed to load configuration")?;

    let tool = match args.tool.or(config.tool) {
        Some(tool) => tool,
        None => detect_tool().context("Failed to detect package manager")?,
    };

    let installer = RpmInstaller::new(tool)
        .elevation(config.elevation())
        .dry_run(args.dry_run);
    log::debug!("Using {}", installer.tool().as_str());

    let mut code = 0;

    if args.install {
        let path = match &args.package_file {
            Some(path) => path.clone(),
            None => {
                let home = dirs::home_dir().context("Could not determine home directory")?;
                config.package_file_path(&home)
            }
        };

        if args.dry_run {
            eprintln!("Running in dry-run mode (no changes will be made)");
        }

        let report = installer
            .install_file(&path)
            .with_context(|| format!("Failed to install packages from {:?}", path))?;
        print_install_report(&report, args.json)?;

        if !report.is_success() {
            code = 1;
        }
    }

    if let Some(names) = &args.list {
        let list = installer
            .list(names, args.selection)
            .context("Failed to list packages")?;
        print_package_list(&list, args.json)?;
    }

    Ok(code)
}

fn print_install_report(report: &InstallReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("Install started {}: {}", report.formatted_date(), report.summary());
    for failure in &report.failed {
        println!(
            "  FAILED {} (exit code {}): {}",
            failure.name, failure.exit_code, failure.message
        );
    }
    Ok(())
}

fn print_package_list(list: &PackageList, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(list)?);
        return Ok(());
    }

    if list.is_empty() && list.exit_code != 0 {
        eprintln!("No matching packages (package manager exit code {})", list.exit_code);
    }

    for (title, packages) in [("Installed", &list.installed), ("Available", &list.available)] {
        println!("{} ({}):", title, packages.len());
        for package in packages {
            println!("  {:<40} {:<28} {}", package.full_name(), package.version, package.repo);
        }
    }
    Ok(())
}
