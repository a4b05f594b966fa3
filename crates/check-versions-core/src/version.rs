//! Version extraction and comparison
//!
//! Extraction always looks for the first `MAJOR.MINOR.PATCH` run in the text,
//! so a leading `v` (as in `v20.1.0`) is skipped naturally and no separate
//! prefix stripping exists. Comparison only looks at the numeric triplet;
//! pre-release and build suffixes are ignored.

use crate::error::{CheckError, Result};
use regex::Regex;
use semver::Version;
use std::fmt;
use std::sync::LazyLock;

static VERSION_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+\.[0-9]+\.[0-9]+").unwrap());

static LEADING_TRIPLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\.([0-9]+)\.([0-9]+)").unwrap());

/// Pull the first version-shaped substring out of free-form text.
///
/// The result starts at the first digit of the match and runs up to the next
/// whitespace character, so suffixes such as `-rc.1` or `.windows.1` are kept.
pub fn extract_version(text: &str) -> Result<String> {
    let found = VERSION_RUN
        .find(text)
        .ok_or_else(|| CheckError::Extraction {
            input: text.trim().to_string(),
        })?;

    let version = text[found.start()..]
        .split_whitespace()
        .next()
        .unwrap_or(found.as_str())
        .trim();

    Ok(version.to_string())
}

/// Parse the leading numeric triplet of an extracted version.
pub fn parse_triplet(version: &str) -> Result<Version> {
    let invalid = || CheckError::Extraction {
        input: version.to_string(),
    };

    let caps = LEADING_TRIPLET.captures(version).ok_or_else(invalid)?;
    let part = |i: usize| -> Result<u64> { caps[i].parse().map_err(|_| invalid()) };

    Ok(Version::new(part(1)?, part(2)?, part(3)?))
}

/// Whether the installed version trails the latest release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    UpToDate,
    Outdated,
}

impl Freshness {
    pub fn is_outdated(&self) -> bool {
        matches!(self, Freshness::Outdated)
    }
}

impl fmt::Display for Freshness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Freshness::UpToDate => write!(f, "up to date"),
            Freshness::Outdated => write!(f, "out of date"),
        }
    }
}

/// Compare an installed version against the latest published one.
///
/// Equal versions count as up to date.
pub fn compare_versions(current: &str, latest: &str) -> Result<Freshness> {
    let current = parse_triplet(current)?;
    let latest = parse_triplet(latest)?;

    if current < latest {
        Ok(Freshness::Outdated)
    } else {
        Ok(Freshness::UpToDate)
    }
}
