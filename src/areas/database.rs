//! Object store
//!
//! A flat directory of write-once objects, each named by the 40-character
//! hash of its content and holding exactly that content: raw bytes for
//! blobs, joined entry lines for trees, field lines for commits. No
//! compression, no packing, no garbage collection.

use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::hasher;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{Error, Result};
use bytes::Bytes;
use fake::rand;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self, object_id: &ObjectId) -> bool {
        self.object_path(object_id).is_file()
    }

    /// Persist an object unless one with the same ID is already stored
    pub fn store(&self, object: &impl Object) -> Result<ObjectId> {
        let content = object.serialize();
        let object_id = hasher::hash(&content);

        self.put(&object_id, &content)?;

        Ok(object_id)
    }

    /// Write-once persistence of raw bytes under `object_id`
    ///
    /// Identical IDs imply identical content, so an existing object is left
    /// untouched.
    pub fn put(&self, object_id: &ObjectId, content: &[u8]) -> Result<()> {
        let object_path = self.object_path(object_id);

        if object_path.exists() {
            tracing::trace!(oid = %object_id, "object already stored");
            return Ok(());
        }

        self.write_object(object_path, content)?;
        tracing::debug!(oid = %object_id, size = content.len(), "stored object");

        Ok(())
    }

    pub fn load(&self, object_id: &ObjectId) -> Result<Bytes> {
        let object_path = self.object_path(object_id);

        match std::fs::read(&object_path) {
            Ok(content) => Ok(content.into()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::ObjectNotFound(object_id.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> Result<Tree> {
        let content = self.load(object_id)?;

        Tree::deserialize(object_id, Cursor::new(content))
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> Result<Commit> {
        let content = self.load(object_id).map_err(|err| match err {
            Error::ObjectNotFound(oid) => Error::CommitNotFound(oid),
            err => err,
        })?;

        Commit::deserialize(object_id, Cursor::new(content))
    }

    fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.to_path())
    }

    fn write_object(&self, object_path: PathBuf, content: &[u8]) -> Result<()> {
        let temp_object_path = self.path.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)?;
        file.write_all(content)?;
        file.sync_all()?;

        // rename the temp file to the object file to make it atomic
        if let Err(err) = std::fs::rename(&temp_object_path, &object_path) {
            let _ = std::fs::remove_file(&temp_object_path);
            return Err(err.into());
        }

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
