//! Staging index format and the tree builder
//!
//! ## File Format
//!
//! ```text
//! <40-hex-hash> <root-relative-path>
//! <40-hex-hash> <root-relative-path>
//! ```
//!
//! UTF-8 text, no header, no trailing newline. Lines appear in insertion
//! order; updating an entry keeps its line where it was.
//!
//! - `index_entry`: a single staged record
//! - `work_list`: collapses the flat record list into nested trees

pub mod index_entry;
pub mod work_list;

/// Separator used in index paths, independent of the host platform
pub const PATH_SEPARATOR: char = '/';
