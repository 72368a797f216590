//! Release-version management: a strict `X.Y.Z` version kept in a
//! `VERSION` file, monotonic bumps, a human-readable history log, and
//! optional git tagging.

use std::fmt;
use std::fs;
use std::io::Write as _;
use std::path::Path;
use std::process::Command;
use std::str::FromStr;

use chrono::Local;
use thiserror::Error;
use tracing::info;

/// Default history log, appended on every accepted bump.
pub const HISTORY_FILE: &str = "VERSION_HISTORY.md";

#[derive(Error, Debug)]
pub enum VersionError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed version '{0}': expected X.Y.Z with numeric parts")]
    Malformed(String),

    #[error("version file '{0}' has no version line")]
    MissingVersion(String),

    #[error("new version {new} is not greater than current {current}")]
    NotGreater { current: Version, new: Version },

    #[error("git {command} failed: {detail}")]
    Git { command: String, detail: String },
}

/// A strict three-part semantic version. No pre-release or build
/// suffixes; the release flow here never produces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// The next version for the given bump kind. Lower components reset.
    #[must_use]
    pub const fn bumped(self, kind: BumpKind) -> Self {
        match kind {
            BumpKind::Major => Self::new(self.major + 1, 0, 0),
            BumpKind::Minor => Self::new(self.major, self.minor + 1, 0),
            BumpKind::Patch => Self::new(self.major, self.minor, self.patch + 1),
        }
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('.').collect();
        let [major, minor, patch] = parts[..] else {
            return Err(VersionError::Malformed(s.to_string()));
        };
        let parse = |p: &str| {
            p.parse::<u64>()
                .map_err(|_| VersionError::Malformed(s.to_string()))
        };
        Ok(Self::new(parse(major)?, parse(minor)?, parse(patch)?))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpKind {
    Major,
    Minor,
    Patch,
}

/// Read the current version: the first non-empty line of the file.
pub fn read_version(path: &Path) -> Result<Version, VersionError> {
    let contents = fs::read_to_string(path)?;
    let line = contents
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .ok_or_else(|| VersionError::MissingVersion(path.display().to_string()))?;
    line.parse()
}

/// Record `new` as the current version.
///
/// Rejects anything not strictly greater than the file's current version
/// before touching the file, so a failed bump leaves everything as it was.
/// Returns the version that was replaced.
pub fn write_version(path: &Path, new: Version) -> Result<Version, VersionError> {
    let current = read_version(path)?;
    if new <= current {
        return Err(VersionError::NotGreater { current, new });
    }
    fs::write(path, format!("{new}\n"))?;
    info!(%current, %new, "version updated");
    Ok(current)
}

/// Append a dated entry for `version` to the history log, creating the
/// log with a header on first use.
pub fn append_history(path: &Path, version: Version, notes: &[String]) -> Result<(), VersionError> {
    let mut file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    if file.metadata()?.len() == 0 {
        writeln!(file, "# Version history\n")?;
    }
    writeln!(file, "## {version} ({})\n", Local::now().format("%Y-%m-%d"))?;
    if notes.is_empty() {
        writeln!(file, "- (no notes)\n")?;
    } else {
        for note in notes {
            writeln!(file, "- {note}")?;
        }
        writeln!(file)?;
    }
    Ok(())
}

/// Commit any pending changes and create an annotated `vX.Y.Z` tag,
/// optionally pushing the branch and the tag.
pub fn git_tag(version: Version, push: bool) -> Result<(), VersionError> {
    let status = git(&["status", "--porcelain"])?;
    if !status.trim().is_empty() {
        git(&["add", "-A"])?;
        git(&["commit", "-m", &format!("Release {version}")])?;
    }

    let tag = format!("v{version}");
    git(&["tag", "-a", &tag, "-m", &format!("Release {version}")])?;
    info!(%tag, "tag created");

    if push {
        git(&["push"])?;
        git(&["push", "origin", &tag])?;
        info!(%tag, "tag pushed");
    }
    Ok(())
}

fn git(args: &[&str]) -> Result<String, VersionError> {
    let output = Command::new("git").args(args).output().map_err(|e| {
        VersionError::Git {
            command: args.join(" "),
            detail: e.to_string(),
        }
    })?;
    if !output.status.success() {
        return Err(VersionError::Git {
            command: args.join(" "),
            detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
