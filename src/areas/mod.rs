//! Core repository components
//!
//! - `database`: flat, content-addressed object store
//! - `index`: staging area mapping paths to staged content hashes
//! - `refs`: the HEAD pointer
//! - `repository`: handle owning all of the above
//! - `workspace`: working directory file system operations

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
