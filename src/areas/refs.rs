//! HEAD pointer
//!
//! `HEAD` is a single file holding the hash of the current commit, or
//! nothing before the first commit.

use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the metadata directory (typically `git`)
    path: Box<Path>,
}

impl Refs {
    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn read_head(&self) -> Result<Option<ObjectId>> {
        let head_path = self.head_path();

        if !head_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&head_path)?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        Ok(Some(ObjectId::try_parse(content)?))
    }

    /// Point HEAD at `oid`
    ///
    /// Acquires an exclusive lock on the HEAD file during the update.
    pub fn update_head(&self, oid: &ObjectId) -> Result<()> {
        let mut head_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.head_path())?;
        let mut lock = file_guard::lock(&mut head_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(oid.as_ref().as_bytes())?;

        Ok(())
    }
}
