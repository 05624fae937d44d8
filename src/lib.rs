//! A minimal content-addressed version-control engine.
//!
//! - `areas`: on-disk state (object store, staging index, HEAD, working directory)
//! - `artifacts`: object types and the algorithms that operate on them
//! - `commands`: the public operations exposed on [`areas::repository::Repository`]
//! - `errors`: the crate-wide error type

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

/// Name of the repository metadata directory at the workspace root
pub const METADATA_DIR: &str = "git";
