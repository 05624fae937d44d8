//! Object formats and the algorithms built on them
//!
//! - `checkout`: restoring a tree graph into the working directory
//! - `index`: index records and the tree builder
//! - `objects`: blob, tree and commit objects and their hashing

pub mod checkout;
pub mod index;
pub mod objects;
