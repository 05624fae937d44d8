use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;

impl Repository {
    /// Current commit, if any
    pub fn head(&self) -> Result<Option<ObjectId>> {
        self.refs().read_head()
    }

    /// Commits reachable from HEAD through `parent` links, newest first
    pub fn log(&self) -> Result<Vec<(ObjectId, Commit)>> {
        let mut history = Vec::new();
        let mut curr_commit_oid = self.refs().read_head()?;

        while let Some(commit_oid) = curr_commit_oid {
            let commit = self.database().parse_object_as_commit(&commit_oid)?;

            // Move to the parent commit for the next iteration
            curr_commit_oid = commit.parent().cloned();
            history.push((commit_oid, commit));
        }

        Ok(history)
    }
}
