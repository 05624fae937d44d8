use crate::METADATA_DIR;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::errors::{Error, Result};
use bytes::Bytes;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// A staged file, located both on disk and in the index namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceFile {
    /// Absolute path on disk
    pub path: PathBuf,
    /// Root-relative index name
    pub name: String,
}

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve a caller-supplied path to a stageable file
    ///
    /// Relative paths are taken against the process working directory; the
    /// resulting name is relative to the repository root regardless.
    pub fn resolve_file(&self, file_path: &Path) -> Result<WorkspaceFile> {
        if Self::stat(file_path)?.is_dir() {
            return Err(Error::IsDirectory(file_path.to_path_buf()));
        }

        let (path, relative) = self.relativize(file_path)?;
        let name = IndexEntry::normalize_name(&relative)?;

        Ok(WorkspaceFile { path, name })
    }

    /// Resolve a caller-supplied directory to its root-relative path
    pub fn resolve_dir(&self, dir_path: &Path) -> Result<PathBuf> {
        if !Self::stat(dir_path)?.is_dir() {
            return Err(Error::NotADirectory(dir_path.to_path_buf()));
        }

        let (_, relative) = self.relativize(dir_path)?;

        Ok(relative)
    }

    /// Read any regular file, inside the repository or not
    pub fn read_loose_file(file_path: &Path) -> Result<Bytes> {
        if Self::stat(file_path)?.is_dir() {
            return Err(Error::IsDirectory(file_path.to_path_buf()));
        }

        Ok(std::fs::read(file_path)?.into())
    }

    fn stat(path: &Path) -> Result<std::fs::Metadata> {
        std::fs::metadata(path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => Error::PathNotFound(path.to_path_buf()),
            _ => err.into(),
        })
    }

    /// Canonical absolute path and its root-relative counterpart
    fn relativize(&self, path: &Path) -> Result<(PathBuf, PathBuf)> {
        let absolute = path.canonicalize()?;
        let relative = absolute
            .strip_prefix(&self.path)
            .map_err(|_| Error::OutsideRepository(path.to_path_buf()))?
            .to_path_buf();

        if Self::is_metadata_path(&relative) {
            return Err(Error::OutsideRepository(path.to_path_buf()));
        }

        Ok((absolute, relative))
    }

    fn is_metadata_path(relative: &Path) -> bool {
        matches!(
            relative.components().next(),
            Some(Component::Normal(first)) if first == METADATA_DIR
        )
    }

    pub fn read_file(&self, file_path: &Path) -> Result<Bytes> {
        let content = std::fs::read(self.path.join(file_path))?;

        Ok(content.into())
    }

    /// Entries of a directory in the order the file system lists them
    ///
    /// The metadata directory is skipped.
    pub fn list_dir(&self, dir_path: &Path) -> Result<Vec<PathBuf>> {
        let dir_path = self.path.join(dir_path);

        if !dir_path.exists() {
            return Err(Error::PathNotFound(dir_path));
        }

        Ok(std::fs::read_dir(&dir_path)?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<std::io::Result<Vec<_>>>()?
            .into_iter()
            .filter(|path| {
                path.strip_prefix(&self.path)
                    .map_or(true, |relative| !Self::is_metadata_path(relative))
            })
            .collect())
    }

    /// Every file under `root_path`, or `root_path` itself if it is a file
    ///
    /// Files are listed in file-name order and the metadata directory is
    /// skipped.
    pub fn list_files(&self, root_path: &Path) -> Result<Vec<PathBuf>> {
        let root_path = self.path.join(root_path);

        if !root_path.exists() {
            return Err(Error::PathNotFound(root_path));
        }
        let root_path = root_path.canonicalize()?;

        if !root_path.is_dir() {
            return Ok(vec![root_path]);
        }

        WalkDir::new(&root_path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry
                    .path()
                    .strip_prefix(&self.path)
                    .map_or(true, |relative| !Self::is_metadata_path(relative))
            })
            .filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_file() => Some(Ok(entry.into_path())),
                Ok(_) => None,
                Err(err) => Some(Err(std::io::Error::from(err).into())),
            })
            .collect()
    }

    /// Delete everything in the working directory except the metadata directory
    pub fn wipe(&self) -> Result<()> {
        for path in self.list_dir(Path::new(""))? {
            let metadata = std::fs::symlink_metadata(&path)?;

            if metadata.is_dir() {
                std::fs::remove_dir_all(&path)?;
            } else {
                std::fs::remove_file(&path)?;
            }
        }

        Ok(())
    }

    pub fn write_file(&self, file_path: &Path, content: &[u8]) -> Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path.join(file_path))?;

        file.write_all(content)?;

        Ok(())
    }

    pub fn make_directory(&self, dir_path: &Path) -> Result<()> {
        let dir_path = self.path.join(dir_path);

        if dir_path.is_file() {
            std::fs::remove_file(&dir_path)?;
        }

        std::fs::create_dir_all(&dir_path)?;

        Ok(())
    }
}
