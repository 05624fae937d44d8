use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::TreeEntry;
use crate::errors::Error;
use std::path::{Component, Path, PathBuf};

/// An entry that could not be restored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Omission {
    pub kind: ObjectType,
    pub oid: ObjectId,
    /// Where the entry would have been restored, relative to the root
    pub path: PathBuf,
    pub reason: String,
}

impl std::fmt::Display for Omission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "skipped {} {} at {}: {}",
            self.kind,
            self.oid,
            self.path.display(),
            self.reason
        )
    }
}

/// Outcome of restoring a tree graph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Every restored file, in walk order
    pub restored: Vec<IndexEntry>,
    pub omissions: Vec<Omission>,
}

impl RestoreReport {
    pub fn is_complete(&self) -> bool {
        self.omissions.is_empty()
    }
}

/// Recursive tree walker writing blobs into the workspace
pub struct Restoration<'r> {
    database: &'r Database,
    workspace: &'r Workspace,
    report: RestoreReport,
}

impl<'r> Restoration<'r> {
    pub fn new(database: &'r Database, workspace: &'r Workspace) -> Self {
        Restoration {
            database,
            workspace,
            report: RestoreReport::default(),
        }
    }

    /// Restore the tree `tree_oid` into the workspace root
    pub fn restore(mut self, tree_oid: &ObjectId) -> crate::errors::Result<RestoreReport> {
        self.restore_tree(tree_oid, Path::new(""))?;

        Ok(self.report)
    }

    fn restore_tree(&mut self, tree_oid: &ObjectId, dir: &Path) -> crate::errors::Result<()> {
        let tree = match self.database.parse_object_as_tree(tree_oid) {
            Ok(tree) => tree,
            Err(err @ (Error::ObjectNotFound(_) | Error::MalformedTree { .. })) => {
                self.omit(ObjectType::Tree, tree_oid, dir, err.to_string());
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        for entry in tree.entries() {
            let Some(path) = Self::entry_path(dir, entry.name()) else {
                self.omit(
                    entry.object_type(),
                    entry.oid(),
                    &dir.join(entry.name()),
                    "entry name escapes its directory".to_string(),
                );
                continue;
            };

            match entry {
                TreeEntry::Blob { oid, .. } => self.restore_blob(oid, &path)?,
                TreeEntry::Tree { oid, .. } => {
                    self.workspace.make_directory(&path)?;
                    self.restore_tree(oid, &path)?;
                }
            }
        }

        Ok(())
    }

    fn restore_blob(&mut self, oid: &ObjectId, path: &Path) -> crate::errors::Result<()> {
        let content = match self.database.load(oid) {
            Ok(content) => content,
            Err(err @ Error::ObjectNotFound(_)) => {
                self.omit(ObjectType::Blob, oid, path, err.to_string());
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            self.workspace.make_directory(parent)?;
        }
        self.workspace.write_file(path, &content)?;

        tracing::debug!(path = %path.display(), oid = %oid, "restored file");
        self.report.restored.push(IndexEntry::new(
            IndexEntry::normalize_name(path)?,
            oid.clone(),
        ));

        Ok(())
    }

    /// Join an entry name under `dir`, refusing names that leave it
    fn entry_path(dir: &Path, name: &str) -> Option<PathBuf> {
        let name = Path::new(name);
        let is_contained = name
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));

        is_contained.then(|| dir.join(name))
    }

    fn omit(&mut self, kind: ObjectType, oid: &ObjectId, path: &Path, reason: String) {
        let omission = Omission {
            kind,
            oid: oid.clone(),
            path: path.to_path_buf(),
            reason,
        };

        tracing::warn!("{}", omission);
        self.report.omissions.push(omission);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::blob::Blob;
    use crate::artifacts::objects::hasher;
    use crate::artifacts::objects::tree::Tree;
    use assert_fs::TempDir;
    use bytes::Bytes;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    struct Fixture {
        _dir: TempDir,
        database: Database,
        workspace: Workspace,
    }

    #[fixture]
    fn areas() -> Fixture {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let objects = dir.path().join("objects");
        let root = dir.path().join("root");
        std::fs::create_dir_all(&objects).unwrap();
        std::fs::create_dir_all(&root).unwrap();

        Fixture {
            database: Database::new(objects.into_boxed_path()),
            workspace: Workspace::new(root.into_boxed_path()),
            _dir: dir,
        }
    }

    #[rstest]
    fn restores_nested_trees(areas: Fixture) {
        let blob = areas.database.store(&Blob::new(Bytes::from_static(b"yo"))).unwrap();
        let inner = areas
            .database
            .store(&Tree::new(vec![TreeEntry::Blob {
                oid: blob.clone(),
                name: "b.txt".to_string(),
            }]))
            .unwrap();
        let root = areas
            .database
            .store(&Tree::new(vec![TreeEntry::Tree {
                oid: inner,
                name: "dir".to_string(),
            }]))
            .unwrap();

        let report = Restoration::new(&areas.database, &areas.workspace)
            .restore(&root)
            .unwrap();

        assert!(report.is_complete());
        assert_eq!(report.restored, vec![IndexEntry::new("dir/b.txt".to_string(), blob)]);
        assert_eq!(
            std::fs::read(areas.workspace.path().join("dir").join("b.txt")).unwrap(),
            b"yo"
        );
    }

    #[rstest]
    fn skips_missing_objects_and_keeps_going(areas: Fixture) {
        let present = areas.database.store(&Blob::new(Bytes::from_static(b"ok"))).unwrap();
        let missing_blob = hasher::hash(b"gone");
        let missing_tree = hasher::hash(b"gone tree");
        let root = areas
            .database
            .store(&Tree::new(vec![
                TreeEntry::Blob {
                    oid: missing_blob.clone(),
                    name: "lost.txt".to_string(),
                },
                TreeEntry::Tree {
                    oid: missing_tree.clone(),
                    name: "lost".to_string(),
                },
                TreeEntry::Blob {
                    oid: present,
                    name: "kept.txt".to_string(),
                },
            ]))
            .unwrap();

        let report = Restoration::new(&areas.database, &areas.workspace)
            .restore(&root)
            .unwrap();

        let omitted = report
            .omissions
            .iter()
            .map(|omission| (omission.kind, omission.oid.clone(), omission.path.clone()))
            .collect::<Vec<_>>();
        assert_eq!(
            omitted,
            vec![
                (ObjectType::Blob, missing_blob, PathBuf::from("lost.txt")),
                (ObjectType::Tree, missing_tree, PathBuf::from("lost")),
            ]
        );
        assert_eq!(report.restored.len(), 1);
        assert!(areas.workspace.path().join("kept.txt").is_file());
        assert!(!areas.workspace.path().join("lost.txt").exists());
    }

    #[rstest]
    fn refuses_names_outside_the_workspace(areas: Fixture) {
        let blob = areas.database.store(&Blob::new(Bytes::from_static(b"x"))).unwrap();
        let root = areas
            .database
            .store(&Tree::new(vec![TreeEntry::Blob {
                oid: blob,
                name: "../escape.txt".to_string(),
            }]))
            .unwrap();

        let report = Restoration::new(&areas.database, &areas.workspace)
            .restore(&root)
            .unwrap();

        assert_eq!(report.omissions.len(), 1);
        assert!(!areas.workspace.path().join("..").join("escape.txt").exists());
    }
}
