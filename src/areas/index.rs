//! Staging index
//!
//! The index records, for every staged path, the hash of the content that
//! was last staged for it. Records are kept in insertion order and written
//! back one per line.
//!
//! Staging a path has three observable outcomes:
//!
//! - unseen path: a record is appended
//! - known path, new content: the record's hash is replaced in place
//! - known path, same content: nothing changes and the file is not rewritten

use crate::artifacts::index::PATH_SEPARATOR;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::Path;

/// Effect of staging a path on the index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Appended,
    Replaced,
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `git/index`)
    path: Box<Path>,
    entries: Vec<IndexEntry>,
    /// Whether the in-memory entries differ from what is on disk
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: Vec::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn entry_by_path(&self, name: &str) -> Option<&IndexEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter()
    }

    /// Load the index from disk
    ///
    /// A missing or empty file yields an empty index. Acquires a shared lock
    /// on the index file while reading.
    pub fn rehydrate(&mut self) -> Result<()> {
        self.entries.clear();
        self.changed = false;

        if !self.path.exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new().read(true).open(&self.path)?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        let mut content = String::new();
        lock.deref_mut().read_to_string(&mut content)?;

        self.entries = content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(number, line)| IndexEntry::parse(number + 1, line))
            .collect::<Result<Vec<_>>>()?;

        Ok(())
    }

    /// Record `oid` as the staged content of `name`
    pub fn add(&mut self, name: String, oid: ObjectId) -> AddOutcome {
        if let Some(existing) = self.entries.iter_mut().find(|entry| entry.name == name) {
            if existing.oid == oid {
                return AddOutcome::Unchanged;
            }

            existing.oid = oid;
            self.changed = true;
            return AddOutcome::Replaced;
        }

        self.discard_conflicts(&name);
        self.entries.push(IndexEntry::new(name, oid));
        self.changed = true;

        AddOutcome::Appended
    }

    /// Replace every record, e.g. after restoring a snapshot
    pub fn replace_all(&mut self, entries: Vec<IndexEntry>) {
        if self.entries != entries {
            self.entries = entries;
            self.changed = true;
        }
    }

    /// Remove records that cannot coexist with a file at `name`
    ///
    /// A file at `a/b` rules out a file at `a` as well as anything under `a/b/`.
    fn discard_conflicts(&mut self, name: &str) {
        let before = self.entries.len();

        self.entries.retain(|entry| {
            let is_parent = name
                .strip_prefix(entry.name.as_str())
                .is_some_and(|rest| rest.starts_with(PATH_SEPARATOR));
            let is_child = entry
                .name
                .strip_prefix(name)
                .is_some_and(|rest| rest.starts_with(PATH_SEPARATOR));

            !is_parent && !is_child
        });

        if self.entries.len() != before {
            tracing::debug!(
                path = name,
                discarded = before - self.entries.len(),
                "discarded conflicting index entries"
            );
        }
    }

    /// Persist the index if anything changed since the last load
    ///
    /// Returns whether the file was rewritten. Acquires an exclusive lock on
    /// the index file while writing.
    pub fn write_updates(&mut self) -> Result<bool> {
        if !self.changed {
            return Ok(false);
        }

        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

        let content = self
            .entries
            .iter()
            .map(IndexEntry::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        lock.deref_mut().write_all(content.as_bytes())?;

        self.changed = false;

        Ok(true)
    }
}
