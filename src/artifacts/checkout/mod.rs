//! Checkout: rematerialising a snapshot in the working directory
//!
//! A checkout validates the target commit, wipes the working directory
//! (except the metadata directory) and then walks the commit's tree graph,
//! writing every blob back to disk. Objects that cannot be read during the
//! walk are skipped and reported rather than aborting the restore.

pub mod restoration;
