//! Parsing of `yum list` / `dnf list` output
//!
//! The listing is a free-form header followed by up to two sections, each
//! introduced by a literal marker line:
//!
//! ```text
//! Loaded plugins: fastestmirror
//! Installed Packages
//! libxml2-python.x86_64    2.9.1-6.el7_9.6    @updates
//! Available Packages
//! libwpg.x86_64            0.3.0-1.el7        anaconda
//! ```

use crate::error::{Result, YumError};
use crate::types::{Package, PackageList};

pub const INSTALLED_MARKER: &str = "Installed Packages";
pub const AVAILABLE_MARKER: &str = "Available Packages";

/// Parse a single `Name.Arch Version Repo` line
///
/// Example: "libwpg.x86_64 0.3.0-1.el7 @anaconda" -> libwpg / x86_64 / 0.3.0-1.el7 / anaconda
pub fn parse_package(line: &str) -> Result<Package> {
    let malformed = || YumError::MalformedLine(line.to_string());

    let fields: Vec<&str> = line.split_whitespace().collect();
    let [name_arch, version, repo] = fields[..] else {
        return Err(malformed());
    };

    // Exactly one dot separates name and arch
    let (name, arch) = name_arch
        .split_once('.')
        .filter(|(_, arch)| !arch.contains('.'))
        .ok_or_else(malformed)?;
    if name.is_empty() || arch.is_empty() {
        return Err(malformed());
    }

    let repo = repo.strip_prefix('@').unwrap_or(repo);

    Ok(Package {
        name: name.to_string(),
        arch: arch.to_string(),
        version: version.to_string(),
        repo: repo.to_string(),
    })
}

/// Parse every line, stopping at the first malformed one
pub fn parse_packages<S: AsRef<str>>(lines: &[S]) -> Result<Vec<Package>> {
    lines.iter().map(|line| parse_package(line.as_ref())).collect()
}

/// Split listing output into installed and available packages
///
/// A section runs from its marker to the next marker or the end of output.
/// A missing marker yields an empty section.
pub fn classify_listing<S: AsRef<str>>(lines: &[S]) -> Result<(Vec<Package>, Vec<Package>)> {
    let installed_at = find_marker(lines, INSTALLED_MARKER);
    let available_at = find_marker(lines, AVAILABLE_MARKER);

    let installed = parse_packages(section(lines, installed_at, available_at))?;
    let available = parse_packages(section(lines, available_at, installed_at))?;

    Ok((installed, available))
}

/// Build a `PackageList` from raw listing output and the tool's exit code
pub fn package_list_from_output<S: AsRef<str>>(lines: &[S], exit_code: i32) -> Result<PackageList> {
    let (installed, available) = classify_listing(lines)?;
    Ok(PackageList {
        installed,
        available,
        exit_code,
    })
}

fn find_marker<S: AsRef<str>>(lines: &[S], marker: &str) -> Option<usize> {
    lines.iter().position(|line| line.as_ref() == marker)
}

/// Lines after `start`, up to `other` if that marker comes later
fn section<S>(lines: &[S], start: Option<usize>, other: Option<usize>) -> &[S] {
    let Some(start) = start else {
        return &[];
    };
    let end = match other {
        Some(other) if other > start => other,
        _ => lines.len(),
    };
    &lines[start + 1..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkg(name: &str, arch: &str, version: &str, repo: &str) -> Package {
        Package {
            name: name.into(),
            arch: arch.into(),
            version: version.into(),
            repo: repo.into(),
        }
    }

    #[test]
    fn test_parse_package_strips_at_sign() {
        let p = parse_package("libxml2-python.x86_64 2.9.1-6.el7_9.6 @updates").unwrap();
        assert_eq!(p, pkg("libxml2-python", "x86_64", "2.9.1-6.el7_9.6", "updates"));
    }

    #[test]
    fn test_parse_package_keeps_repo_without_at() {
        let p = parse_package("libwpg.x86_64 0.3.0-1.el7 anaconda").unwrap();
        assert_eq!(p.repo, "anaconda");
    }

    #[test]
    fn test_parse_package_strips_only_one_at() {
        let p = parse_package("foo.noarch 1.0-1 @@odd").unwrap();
        assert_eq!(p.repo, "@odd");
    }

    #[test]
    fn test_parse_package_column_padding() {
        let p = parse_package("libzstd.x86_64        1.5.2-1.el7        @epel").unwrap();
        assert_eq!(p, pkg("libzstd", "x86_64", "1.5.2-1.el7", "epel"));
    }

    #[test]
    fn test_parse_package_rejects_extra_dots() {
        for line in ["python3.11.x86_64 3.11.2-2.el9 appstream", "a.b.c 1.0 base"] {
            let err = parse_package(line).unwrap_err();
            assert!(matches!(err, YumError::MalformedLine(ref l) if l == line));
        }
    }

    #[test]
    fn test_parse_package_wrong_field_count() {
        for line in ["badline", "foo.x86_64 1.0", "foo.x86_64 1.0 base extra", ""] {
            let err = parse_package(line).unwrap_err();
            assert!(matches!(err, YumError::MalformedLine(ref l) if l == line));
        }
    }

    #[test]
    fn test_parse_package_missing_arch() {
        for line in ["foo 1.0 base", ".x86_64 1.0 base", "foo. 1.0 base"] {
            assert!(matches!(parse_package(line), Err(YumError::MalformedLine(_))));
        }
    }

    #[test]
    fn test_parse_package_is_deterministic() {
        let line = "libyaml.x86_64 0.1.4-11.el7_0 @anaconda";
        assert_eq!(parse_package(line).unwrap(), parse_package(line).unwrap());
    }

    #[test]
    fn test_classify_listing() {
        let lines = [
            "header",
            "Installed Packages",
            "libxml2-python.x86_64 2.9.1-6.el7_9.6 updates",
            "Available Packages",
            "libwpg.x86_64 0.3.0-1.el7 anaconda",
        ];
        let (installed, available) = classify_listing(&lines).unwrap();
        assert_eq!(
            installed,
            vec![pkg("libxml2-python", "x86_64", "2.9.1-6.el7_9.6", "updates")]
        );
        assert_eq!(available, vec![pkg("libwpg", "x86_64", "0.3.0-1.el7", "anaconda")]);
    }

    #[test]
    fn test_classify_keeps_emission_order() {
        let lines = [
            "Installed Packages",
            "libxshmfence.x86_64 1.2-1.el7 @anaconda",
            "libxslt.x86_64 1.1.28-6.el7 @anaconda",
            "libyaml.x86_64 0.1.4-11.el7_0 @anaconda",
            "libzstd.x86_64 1.5.2-1.el7 @epel",
        ];
        let (installed, available) = classify_listing(&lines).unwrap();
        let names: Vec<&str> = installed.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["libxshmfence", "libxslt", "libyaml", "libzstd"]);
        assert!(available.is_empty());
    }

    #[test]
    fn test_classify_only_available() {
        let lines = [
            "Last metadata expiration check: 0:12:01 ago.",
            "Available Packages",
            "libwps.x86_64 0.4.7-1.el7 base",
        ];
        let (installed, available) = classify_listing(&lines).unwrap();
        assert!(installed.is_empty());
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].repo, "base");
    }

    #[test]
    fn test_classify_without_markers() {
        let lines = ["Error: No matching Packages to list"];
        let (installed, available) = classify_listing(&lines).unwrap();
        assert!(installed.is_empty());
        assert!(available.is_empty());
    }

    #[test]
    fn test_classify_markers_in_reverse_order() {
        let lines = [
            "Available Packages",
            "libxcb.x86_64 1.13-1.el7 anaconda",
            "Installed Packages",
            "libzstd.x86_64 1.5.2-1.el7 @epel",
        ];
        let (installed, available) = classify_listing(&lines).unwrap();
        assert_eq!(installed[0].name, "libzstd");
        assert_eq!(available[0].name, "libxcb");
        assert_eq!(available.len(), 1);
    }

    #[test]
    fn test_classify_fails_fast_on_bad_line() {
        let lines = [
            "Installed Packages",
            "libzstd.x86_64 1.5.2-1.el7 @epel",
            "badline",
            "Available Packages",
            "libwpg.x86_64 0.3.0-1.el7 anaconda",
        ];
        let err = classify_listing(&lines).unwrap_err();
        assert!(matches!(err, YumError::MalformedLine(ref l) if l == "badline"));
    }

    #[test]
    fn test_header_lines_are_not_parsed() {
        let lines = [
            "Loaded plugins: fastestmirror, langpacks",
            "Loading mirror speeds from cached hostfile",
            "Installed Packages",
        ];
        let list = package_list_from_output(&lines, 0).unwrap();
        assert!(list.is_empty());
        assert_eq!(list.exit_code, 0);
    }
}
