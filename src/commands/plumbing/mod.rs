//! Plumbing commands (low-level object operations)
//!
//! - `hash-object`: compute a blob ID and optionally store it
//! - `cat-file`: print a stored object
//! - `write-tree`: store the index as trees
//! - `treeify`: snapshot a directory without staging it

pub mod cat_file;
pub mod hash_object;
pub mod treeify;
pub mod write_tree;
