//! wrapup - package update and repository synchronization library
//!
//! This library provides the core functionality for keeping package
//! repositories in sync:
//! - dependency declarations and version constraints (wrap.toml)
//! - layered package repositories (project, system, current directory,
//!   remote feeds)
//! - ordered-precedence dependency resolution
//! - copy-and-expand synchronization between repositories

pub mod cli;
pub mod commands;
pub mod config;
pub mod descriptor;
pub mod domain;
pub mod environment;
pub mod error;
pub mod output;
pub mod package_manager;
pub mod progress;
pub mod repository;
pub mod resolver;

#[cfg(test)]
mod test_support;
