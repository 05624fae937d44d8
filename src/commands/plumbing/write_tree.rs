use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::index::work_list::WorkList;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use std::io::Write;

impl Repository {
    /// Store the tree hierarchy of the current index and print its root ID
    pub async fn write_tree(&self) -> Result<ObjectId> {
        self.ensure_initialized()?;

        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;
        let tree_id = self.build_tree(&index)?;

        writeln!(self.writer(), "{}", tree_id)?;

        Ok(tree_id)
    }

    /// Collapse the flat index into stored trees, returning the root tree ID
    pub(crate) fn build_tree(&self, index: &Index) -> Result<ObjectId> {
        WorkList::from_entries(index.entries()).build(|tree| self.database().store(tree))
    }
}
