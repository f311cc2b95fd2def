//! Version-range predicates for dependency constraints
//!
//! A dependency's constraint is a conjunction of vertices; a candidate
//! version must satisfy every vertex. The variant set is closed:
//! - `Exact`: candidate equals the reference version
//! - `GreaterThan`: candidate is strictly newer than the reference
//! - `CompatibleUpdate`: candidate looks like a genuine upward revision of
//!   an installed version (used to anchor system updates)
//! - `Any`: no constraint
//!
//! Textual forms accepted from descriptor files: `= 1.2.3.4`, `> 1.2`,
//! a bare version (exact), and `*` (any). `CompatibleUpdate` has no textual
//! form; it is only synthesized in-memory during system updates.

use super::Version;
use crate::error::DescriptorError;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// A single version-range predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionVertex {
    /// Candidate must equal the reference version
    Exact(Version),
    /// Candidate must be strictly newer than the reference version
    GreaterThan(Version),
    /// Candidate must be an upward revision of the anchored installed
    /// version: a revision, build, minor or major bump, checked in that
    /// order. Equality and older-branch versions are never compatible.
    CompatibleUpdate(Version),
    /// Any version is acceptable
    Any,
}

impl VersionVertex {
    /// Checks whether a candidate version satisfies this predicate.
    /// Pure; any version is a valid input.
    pub fn is_compatible_with(&self, candidate: &Version) -> bool {
        match self {
            VersionVertex::Exact(reference) => candidate == reference,
            VersionVertex::GreaterThan(reference) => candidate > reference,
            VersionVertex::CompatibleUpdate(anchor) => {
                (anchor.major == candidate.major
                    && anchor.minor == candidate.minor
                    && anchor.build == candidate.build
                    && anchor.revision < candidate.revision)
                    || (anchor.major == candidate.major
                        && anchor.minor == candidate.minor
                        && anchor.build < candidate.build)
                    || (anchor.major == candidate.major && anchor.minor < candidate.minor)
                    || (anchor.major < candidate.major)
            }
            VersionVertex::Any => true,
        }
    }
}

impl fmt::Display for VersionVertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionVertex::Exact(v) => write!(f, "= {}", v),
            VersionVertex::GreaterThan(v) => write!(f, "> {}", v),
            VersionVertex::CompatibleUpdate(v) => write!(f, "update of {}", v),
            VersionVertex::Any => write!(f, "*"),
        }
    }
}

fn constraint_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(>|=)?\s*(v?\d+(?:\.\d+){0,3})$").expect("constraint pattern is valid")
    })
}

/// Parses a single constraint token into a vertex
fn parse_token(name: &str, token: &str) -> Result<VersionVertex, DescriptorError> {
    let token = token.trim();
    if token.is_empty() || token == "*" {
        return Ok(VersionVertex::Any);
    }

    let captures = constraint_pattern().captures(token).ok_or_else(|| {
        DescriptorError::invalid_constraint(name, token, "expected '= x.y', '> x.y', '*' or 'x.y'")
    })?;

    let version: Version = captures[2]
        .parse()
        .map_err(|e| DescriptorError::invalid_constraint(name, token, format!("{}", e)))?;

    match captures.get(1).map(|m| m.as_str()) {
        Some(">") => Ok(VersionVertex::GreaterThan(version)),
        // A bare version pins exactly, same as an explicit '='
        _ => Ok(VersionVertex::Exact(version)),
    }
}

/// Parses a comma-separated constraint string into a conjunction of vertices
pub fn parse_constraints(name: &str, spec: &str) -> Result<Vec<VersionVertex>, DescriptorError> {
    let spec = spec.trim();
    if spec.is_empty() || spec == "*" {
        return Ok(vec![VersionVertex::Any]);
    }
    spec.split(',').map(|token| parse_token(name, token)).collect()
}
