use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Content hash of a file, without touching the object store
    pub fn hash_of(&self, path: impl AsRef<Path>) -> Result<ObjectId> {
        let data = Workspace::read_loose_file(path.as_ref())?;

        Ok(Blob::new(data).object_id())
    }

    /// Hash a file and, if `write` is set, store it as a blob
    pub fn hash_object(&self, path: impl AsRef<Path>, write: bool) -> Result<ObjectId> {
        let blob = Blob::new(Workspace::read_loose_file(path.as_ref())?);

        let object_id = if write {
            self.ensure_initialized()?;
            self.database().store(&blob)?
        } else {
            blob.object_id()
        };

        writeln!(self.writer(), "{}", object_id)?;

        Ok(object_id)
    }

    pub fn object_exists(&self, object_id: &ObjectId) -> bool {
        self.database().exists(object_id)
    }
}
