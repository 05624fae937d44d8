//! Object types and operations
//!
//! Every stored object is identified by the SHA-1 hash of its exact bytes:
//!
//! - **Blob**: raw file content
//! - **Tree**: directory listing, one `<kind> <hash> <name>` line per entry
//! - **Commit**: snapshot metadata, one `<field>: <value>` line per field
//!
//! Objects carry no type header on disk; the kind of an object is known from
//! the reference that points at it.

pub mod blob;
pub mod commit;
pub mod hasher;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
