//! Core domain models for wrapup
//!
//! This module contains the fundamental types used throughout the
//! application:
//! - Four-component package versions and version-range predicates
//! - Named dependency requirements and descriptors
//! - Resolved package artifacts
//! - Resolution result structures

mod dependency;
mod descriptor;
mod package;
mod resolution;
mod version;
mod vertex;

pub use dependency::PackageDependency;
pub use descriptor::PackageDescriptor;
pub use package::{Package, PackageSource};
pub use resolution::{DependencyResolutionResult, ResolvedDependency};
pub use version::Version;
pub use vertex::{parse_constraints, VersionVertex};
