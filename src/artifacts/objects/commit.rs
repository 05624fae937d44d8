//! Commit object
//!
//! Commits wrap a root tree with authorship metadata and link to the previous
//! commit, forming a singly-linked history.
//!
//! ## Format
//!
//! ```text
//! tree: <tree-sha>
//! parent: <parent-sha>
//! author: <author>
//! date: <rfc3339 timestamp>
//! summary: <message>
//! ```
//!
//! `parent` is omitted for the first commit. `summary` is always the last
//! field and runs to the end of the object, so multi-line messages survive a
//! round trip. There is no trailing newline.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::Error;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, SecondsFormat};
use derive_new::new;
use std::io::BufRead;

const TREE_FIELD: &str = "tree";
const PARENT_FIELD: &str = "parent";
const AUTHOR_FIELD: &str = "author";
const DATE_FIELD: &str = "date";
const SUMMARY_FIELD: &str = "summary";

/// Environment variable pinning the commit timestamp
pub const AUTHOR_DATE_ENV: &str = "TWIG_AUTHOR_DATE";

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Commit {
    parent: Option<ObjectId>,
    tree: ObjectId,
    author: String,
    date: DateTime<FixedOffset>,
    summary: String,
}

impl Commit {
    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn tree(&self) -> &ObjectId {
        &self.tree
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn date(&self) -> DateTime<FixedOffset> {
        self.date
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// First line of the summary
    pub fn short_message(&self) -> &str {
        self.summary.lines().next().unwrap_or_default()
    }

    /// Timestamp for a new commit
    ///
    /// Reads `TWIG_AUTHOR_DATE` (RFC 2822, RFC 3339 or `%Y-%m-%d %H:%M:%S %z`),
    /// falling back to the local clock when unset or unparsable.
    pub fn timestamp_from_env() -> DateTime<FixedOffset> {
        std::env::var(AUTHOR_DATE_ENV)
            .ok()
            .and_then(|date_str| Self::parse_date(&date_str))
            .unwrap_or_else(|| chrono::Local::now().fixed_offset())
    }

    fn parse_date(date_str: &str) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(date_str)
            .or_else(|_| DateTime::parse_from_rfc2822(date_str))
            .or_else(|_| DateTime::parse_from_str(date_str, "%Y-%m-%d %H:%M:%S %z"))
            .ok()
    }
}

impl Packable for Commit {
    fn serialize(&self) -> Bytes {
        self.display().into()
    }
}

impl Unpackable for Commit {
    fn deserialize(oid: &ObjectId, mut reader: impl BufRead) -> crate::errors::Result<Self> {
        let malformed = |reason: String| Error::MalformedCommit {
            oid: oid.clone(),
            reason,
        };

        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(|err| malformed(err.to_string()))?;

        let mut tree = None;
        let mut parent = None;
        let mut author = None;
        let mut date = None;
        let mut summary = None;

        let mut rest = content.as_str();
        while !rest.is_empty() {
            if let Some(message) = rest.strip_prefix(&format!("{SUMMARY_FIELD}: ")) {
                summary = Some(message.to_string());
                break;
            }

            let (line, remainder) = rest.split_once('\n').unwrap_or((rest, ""));
            rest = remainder;

            let (key, value) = line
                .split_once(": ")
                .ok_or_else(|| malformed(format!("expected `<field>: <value>`, got {:?}", line)))?;

            match key {
                TREE_FIELD => {
                    tree = Some(ObjectId::try_parse(value).map_err(|e| malformed(e.to_string()))?)
                }
                PARENT_FIELD => {
                    parent =
                        Some(ObjectId::try_parse(value).map_err(|e| malformed(e.to_string()))?)
                }
                AUTHOR_FIELD => author = Some(value.to_string()),
                DATE_FIELD => {
                    date = Some(
                        Self::parse_date(value)
                            .ok_or_else(|| malformed(format!("invalid date {:?}", value)))?,
                    )
                }
                _ => return Err(malformed(format!("unknown field {:?}", key))),
            }
        }

        let missing = |field: &str| malformed(format!("missing `{}` field", field));

        Ok(Commit {
            tree: tree.ok_or_else(|| missing(TREE_FIELD))?,
            parent,
            author: author.ok_or_else(|| missing(AUTHOR_FIELD))?,
            date: date.ok_or_else(|| missing(DATE_FIELD))?,
            summary: summary.ok_or_else(|| missing(SUMMARY_FIELD))?,
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        let mut lines = vec![format!("{TREE_FIELD}: {}", self.tree)];

        if let Some(parent) = &self.parent {
            lines.push(format!("{PARENT_FIELD}: {}", parent));
        }

        lines.push(format!("{AUTHOR_FIELD}: {}", self.author));
        lines.push(format!(
            "{DATE_FIELD}: {}",
            self.date.to_rfc3339_opts(SecondsFormat::Secs, false)
        ));
        lines.push(format!("{SUMMARY_FIELD}: {}", self.summary));

        lines.join("\n")
    }
}
