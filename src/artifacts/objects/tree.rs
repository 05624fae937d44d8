//! Tree object
//!
//! Trees are directory listings. Each entry references either a blob (file
//! content) or another tree (nested directory).
//!
//! ## Format
//!
//! ```text
//! <kind> <hash> <name>
//! <kind> <hash> <name>
//! ```
//!
//! Entries are joined with a single `\n` and there is no trailing newline, so
//! the empty tree serialises to the empty byte string. Entry order is part of
//! the content and therefore of the hash.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::Error;
use bytes::Bytes;
use std::io::BufRead;

/// A single tree line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEntry {
    Blob { oid: ObjectId, name: String },
    Tree { oid: ObjectId, name: String },
}

impl TreeEntry {
    pub fn new(object_type: ObjectType, oid: ObjectId, name: String) -> Option<Self> {
        match object_type {
            ObjectType::Blob => Some(TreeEntry::Blob { oid, name }),
            ObjectType::Tree => Some(TreeEntry::Tree { oid, name }),
            ObjectType::Commit => None,
        }
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            TreeEntry::Blob { .. } => ObjectType::Blob,
            TreeEntry::Tree { .. } => ObjectType::Tree,
        }
    }

    pub fn oid(&self) -> &ObjectId {
        match self {
            TreeEntry::Blob { oid, .. } | TreeEntry::Tree { oid, .. } => oid,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TreeEntry::Blob { name, .. } | TreeEntry::Tree { name, .. } => name,
        }
    }

    fn parse(tree_oid: &ObjectId, line: &str) -> crate::errors::Result<Self> {
        let malformed = |reason: String| Error::MalformedTree {
            oid: tree_oid.clone(),
            reason,
        };

        let mut parts = line.splitn(3, ' ');
        let (Some(kind), Some(hash), Some(name)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed(format!("expected `<kind> <hash> <name>`, got {:?}", line)));
        };

        if name.is_empty() {
            return Err(malformed(format!("empty entry name in {:?}", line)));
        }

        let object_type = ObjectType::try_from(kind).map_err(malformed)?;
        let oid = ObjectId::try_parse(hash).map_err(|err| malformed(err.to_string()))?;

        Self::new(object_type, oid, name.to_string())
            .ok_or_else(|| malformed(format!("commit entry {:?} inside a tree", line)))
    }
}

impl std::fmt::Display for TreeEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.object_type(), self.oid(), self.name())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn new(entries: Vec<TreeEntry>) -> Self {
        Tree { entries }
    }

    pub fn entries(&self) -> impl Iterator<Item = &TreeEntry> {
        self.entries.iter()
    }
}

impl Packable for Tree {
    fn serialize(&self) -> Bytes {
        self.display().into()
    }
}

impl Unpackable for Tree {
    fn deserialize(oid: &ObjectId, reader: impl BufRead) -> crate::errors::Result<Self> {
        let entries = reader
            .lines()
            .map(|line| {
                let line = line.map_err(|err| Error::MalformedTree {
                    oid: oid.clone(),
                    reason: err.to_string(),
                })?;
                TreeEntry::parse(oid, &line)
            })
            .collect::<crate::errors::Result<Vec<_>>>()?;

        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.entries
            .iter()
            .map(TreeEntry::to_string)
            .collect::<Vec<String>>()
            .join("\n")
    }
}
