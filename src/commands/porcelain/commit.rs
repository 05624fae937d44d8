use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use std::io::Write;

impl Repository {
    /// Snapshot the index as a new commit on top of HEAD
    ///
    /// An empty index commits the empty tree. HEAD only moves once the tree
    /// and the commit object are both stored. The author must fit on one line.
    pub async fn commit(&self, author: &str, message: &str) -> Result<ObjectId> {
        self.ensure_initialized()?;

        let author = author.trim();
        if author.contains(['\n', '\r']) {
            return Err(Error::InvalidAuthor(author.to_string()));
        }

        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        let tree_id = self.build_tree(&index)?;
        let parent = self.refs().read_head()?;
        let is_root = match parent {
            Some(_) => "",
            None => "(root-commit) ",
        };

        let commit = Commit::new(
            parent,
            tree_id,
            author.to_string(),
            Commit::timestamp_from_env(),
            message.trim().to_string(),
        );
        let commit_id = self.database().store(&commit)?;

        writeln!(
            self.writer(),
            "[{}{}] {}",
            is_root,
            commit_id,
            commit.short_message()
        )?;
        self.refs().update_head(&commit_id)?;

        tracing::info!(commit = %commit_id, tree = %commit.tree(), "created commit");

        Ok(commit_id)
    }
}
