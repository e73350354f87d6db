//! Toolchain discovery.
//!
//! Tools are located by scanning a `PATH`-style search string for executable
//! files; nothing is invoked during detection. Version strings are probed
//! lazily and only for availability reporting.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::{env, fs};

use tlstat_types::ToolStatus;

/// The three Spot CLI tools the protocol drives.
pub const REQUIRED_TOOLS: [&str; 3] = ["ltl2tgba", "ltlfilt", "autfilt"];

/// Resolved absolute paths of the full toolchain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ToolPaths {
    pub ltl2tgba: PathBuf,
    pub ltlfilt: PathBuf,
    pub autfilt: PathBuf,
}

/// Locate all required tools, or report which ones are absent.
pub(crate) fn locate(search_path: Option<&OsStr>) -> Result<ToolPaths, Vec<&'static str>> {
    let ltl2tgba = find_tool("ltl2tgba", search_path);
    let ltlfilt = find_tool("ltlfilt", search_path);
    let autfilt = find_tool("autfilt", search_path);
    match (ltl2tgba, ltlfilt, autfilt) {
        (Some(ltl2tgba), Some(ltlfilt), Some(autfilt)) => Ok(ToolPaths {
            ltl2tgba,
            ltlfilt,
            autfilt,
        }),
        (ltl2tgba, ltlfilt, autfilt) => {
            let mut missing = Vec::new();
            if ltl2tgba.is_none() {
                missing.push("ltl2tgba");
            }
            if ltlfilt.is_none() {
                missing.push("ltlfilt");
            }
            if autfilt.is_none() {
                missing.push("autfilt");
            }
            Err(missing)
        }
    }
}

/// Availability and version report for every required tool.
///
/// A present tool gets its resolved path and, when the binary answers
/// `--version`, the first line of that answer. An absent tool reports both
/// fields empty.
#[must_use]
pub fn tool_status(search_path: Option<&OsStr>) -> BTreeMap<String, ToolStatus> {
    let mut report = BTreeMap::new();
    for name in REQUIRED_TOOLS {
        let path = find_tool(name, search_path);
        let version = path.as_deref().and_then(probe_version);
        report.insert(name.to_string(), ToolStatus { path, version });
    }
    report
}

fn find_tool(name: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
    let path = match search_path {
        Some(path) => path.to_os_string(),
        None => env::var_os("PATH")?,
    };
    for dir in env::split_paths(&path) {
        if dir.as_os_str().is_empty() {
            continue;
        }
        let candidate = dir.join(name);
        if is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    fs::metadata(path).map(|meta| meta.is_file()).unwrap_or(false)
}

fn probe_version(path: &Path) -> Option<String> {
    let output = Command::new(path).arg("--version").output().ok()?;
    let text = if output.stdout.is_empty() {
        output.stderr
    } else {
        output.stdout
    };
    let text = String::from_utf8_lossy(&text);
    let line = text.lines().next()?.trim();
    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}
