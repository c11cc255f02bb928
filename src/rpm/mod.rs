//! Package manager interaction layer
//!
//! This module handles all interactions with yum / dnf:
//! - Package manager detection
//! - Command execution
//! - Listing output parsing
//! - Package file reading
//! - Install and list operations

pub mod detect;
pub mod exec;
pub mod installer;
pub mod package_file;
pub mod packages;

pub use detect::detect_tool;
pub use installer::RpmInstaller;
