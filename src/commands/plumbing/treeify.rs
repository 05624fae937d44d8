use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use crate::errors::{Error, Result};
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Snapshot a live directory straight into stored trees
    ///
    /// Unlike the index path, entries keep their root-relative names and
    /// appear in directory-listing order. Files are stored as blobs but the
    /// index is left alone.
    pub fn treeify(&self, dir: impl AsRef<Path>) -> Result<ObjectId> {
        self.ensure_initialized()?;

        let relative = self.workspace().resolve_dir(dir.as_ref())?;
        let tree_id = self.treeify_dir(&relative)?;

        writeln!(self.writer(), "{}", tree_id)?;

        Ok(tree_id)
    }

    fn treeify_dir(&self, relative: &Path) -> Result<ObjectId> {
        let mut entries = Vec::new();

        for path in self.workspace().list_dir(relative)? {
            let child = path
                .strip_prefix(self.workspace().path())
                .map_err(|_| Error::OutsideRepository(path.clone()))?;
            let name = IndexEntry::normalize_name(child)?;

            let entry = if path.is_dir() {
                TreeEntry::Tree {
                    oid: self.treeify_dir(child)?,
                    name,
                }
            } else {
                let data = self.workspace().read_file(child)?;
                TreeEntry::Blob {
                    oid: self.database().store(&Blob::new(data))?,
                    name,
                }
            };

            entries.push(entry);
        }

        let tree_id = self.database().store(&Tree::new(entries))?;
        tracing::debug!(dir = %relative.display(), tree = %tree_id, "treeified directory");

        Ok(tree_id)
    }
}
