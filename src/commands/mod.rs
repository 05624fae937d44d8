//! Command implementations
//!
//! Every command is an `impl Repository` block, split in two groups:
//!
//! - `plumbing`: direct object manipulation (hash-object, cat-file, write-tree, treeify)
//! - `porcelain`: the user-facing workflow (init, add, commit, checkout, log)

pub mod plumbing;
pub mod porcelain;
