use crate::areas::repository::Repository;
use crate::errors::Result;
use std::fs;
use std::io::Write;

impl Repository {
    /// Lay out the metadata directory, object store, index and HEAD
    ///
    /// Only missing pieces are created; existing files are never rewritten,
    /// so re-running `init` leaves their contents and timestamps alone.
    pub async fn init(&self) -> Result<()> {
        let metadata_path = self.metadata_path();
        let already_initialized = self.database().objects_path().is_dir()
            && self.refs().head_path().is_file();

        fs::create_dir_all(self.database().objects_path())?;

        let head_path = self.refs().head_path();
        if !head_path.exists() {
            fs::write(&head_path, b"")?;
        }

        let index = self.index();
        let index = index.lock().await;
        // create the index file if it does not exist
        if !index.path().exists() {
            fs::write(index.path(), b"")?;
        }

        if already_initialized {
            tracing::debug!(path = %metadata_path.display(), "repository already initialized");
            writeln!(
                self.writer(),
                "Reinitialized existing twig repository in {}",
                metadata_path.display()
            )?;
        } else {
            tracing::info!(path = %metadata_path.display(), "initialized repository");
            writeln!(
                self.writer(),
                "Initialized empty twig repository in {}",
                metadata_path.display()
            )?;
        }

        Ok(())
    }
}
