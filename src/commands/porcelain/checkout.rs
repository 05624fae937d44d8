use crate::areas::repository::Repository;
use crate::artifacts::checkout::restoration::{RestoreReport, Restoration};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use std::io::Write;

impl Repository {
    /// Replace the working directory with the snapshot of `commit_id`
    ///
    /// The commit and its root tree are validated before anything is
    /// deleted. Entries whose objects are missing are skipped and listed in
    /// the returned report. On success HEAD points at `commit_id` and the
    /// index mirrors the restored files.
    pub async fn checkout(&self, commit_id: &ObjectId) -> Result<RestoreReport> {
        self.ensure_initialized()?;

        let commit = self.database().parse_object_as_commit(commit_id)?;
        self.database().parse_object_as_tree(commit.tree())?;

        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        self.workspace().wipe()?;
        let report = Restoration::new(self.database(), self.workspace()).restore(commit.tree())?;

        index.replace_all(report.restored.clone());
        index.write_updates()?;
        self.refs().update_head(commit_id)?;

        tracing::info!(
            commit = %commit_id,
            restored = report.restored.len(),
            omitted = report.omissions.len(),
            "checked out commit"
        );

        for omission in &report.omissions {
            writeln!(self.writer(), "warning: {}", omission)?;
        }
        writeln!(
            self.writer(),
            "HEAD is now at {} {}",
            commit_id.to_short_oid(),
            commit.short_message()
        )?;

        Ok(report)
    }
}
