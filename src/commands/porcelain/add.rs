use crate::areas::index::AddOutcome;
use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::errors::Result;
use std::path::Path;

impl Repository {
    /// Stage a single file
    ///
    /// Stores the file's content as a blob and points its index record at
    /// it. The index file is only rewritten when the record was appended or
    /// replaced; staging unchanged content leaves it untouched.
    pub async fn stage(&self, path: impl AsRef<Path>) -> Result<AddOutcome> {
        self.ensure_initialized()?;
        let file = self.workspace().resolve_file(path.as_ref())?;

        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        let data = self.workspace().read_file(&file.path)?;
        let blob_id = self.database().store(&Blob::new(data))?;

        let outcome = index.add(file.name.clone(), blob_id.clone());
        index.write_updates()?;

        tracing::debug!(path = %file.name, oid = %blob_id, ?outcome, "staged file");

        Ok(outcome)
    }

    /// Stage every file named by `paths`, expanding directories
    pub async fn add(&self, paths: &[String]) -> Result<Vec<(String, AddOutcome)>> {
        self.ensure_initialized()?;

        let files = paths
            .iter()
            .map(|path| {
                let absolute_path = std::path::absolute(path)?;
                self.workspace().list_files(&absolute_path)
            })
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .flatten();

        let mut outcomes = Vec::new();
        for file in files {
            let outcome = self.stage(&file).await?;
            let name = self.workspace().resolve_file(&file)?.name;
            outcomes.push((name, outcome));
        }

        Ok(outcomes)
    }
}
