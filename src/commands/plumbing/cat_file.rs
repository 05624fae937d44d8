use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use bytes::Bytes;
use std::io::Write;

impl Repository {
    /// Print the raw bytes of a stored object
    pub fn cat_file(&self, object_id: &ObjectId) -> Result<Bytes> {
        self.ensure_initialized()?;

        let content = self.database().load(object_id)?;
        self.writer().write_all(&content)?;

        Ok(content)
    }
}
