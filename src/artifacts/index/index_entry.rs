//! Index entry representation
//!
//! Each entry maps a repository-relative path to the hash of the content that
//! was last staged for it.

use crate::artifacts::index::PATH_SEPARATOR;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Error;
use derive_new::new;
use std::path::{Component, Path};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    /// Root-relative path using `/` separators
    pub name: String,
    /// Hash of the staged content
    pub oid: ObjectId,
}

impl IndexEntry {
    /// Build the canonical index name for a root-relative path
    ///
    /// Separators are normalised to `/`. `.` components are dropped and
    /// `..` components are rejected, so the same file always yields the same
    /// name no matter how the caller spelled it.
    pub fn normalize_name(relative_path: &Path) -> crate::errors::Result<String> {
        let mut segments = Vec::new();

        for component in relative_path.components() {
            match component {
                Component::Normal(segment) => segments.push(segment.to_string_lossy().into_owned()),
                Component::CurDir => {}
                _ => return Err(Error::OutsideRepository(relative_path.to_path_buf())),
            }
        }

        Ok(segments.join(&PATH_SEPARATOR.to_string()))
    }

    pub fn parse(line_number: usize, line: &str) -> crate::errors::Result<Self> {
        let malformed = |reason: String| Error::MalformedIndex {
            line: line_number,
            reason,
        };

        let (hash, name) = line
            .split_once(' ')
            .ok_or_else(|| malformed(format!("expected `<hash> <path>`, got {:?}", line)))?;
        if name.is_empty() {
            return Err(malformed("empty path".to_string()));
        }
        let oid = ObjectId::try_parse(hash).map_err(|err| malformed(err.to_string()))?;

        Ok(IndexEntry::new(name.to_string(), oid))
    }
}

impl std::fmt::Display for IndexEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.oid, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::hasher;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use std::path::PathBuf;

    #[fixture]
    fn oid() -> ObjectId {
        hasher::hash(b"test data")
    }

    #[rstest]
    #[case("a/b/c.txt", "a/b/c.txt")]
    #[case("./a/./b.txt", "a/b.txt")]
    #[case("top.txt", "top.txt")]
    fn normalizes_names(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(
            IndexEntry::normalize_name(&PathBuf::from(raw)).unwrap(),
            expected
        );
    }

    #[test]
    fn rejects_parent_components() {
        assert!(matches!(
            IndexEntry::normalize_name(Path::new("../escape.txt")),
            Err(Error::OutsideRepository(_))
        ));
    }

    #[rstest]
    fn parses_its_own_line(oid: ObjectId) {
        let entry = IndexEntry::new("dir/with space.txt".to_string(), oid);

        let parsed = IndexEntry::parse(1, &entry.to_string()).unwrap();

        assert_eq!(parsed, entry);
    }

    #[rstest]
    #[case("no-separator")]
    #[case("abc path.txt")]
    #[case("c22b5f9178342609428d6f51b2c5af4c0bde6a42 ")]
    fn rejects_malformed_lines(#[case] line: &str) {
        assert!(matches!(
            IndexEntry::parse(3, line),
            Err(Error::MalformedIndex { line: 3, .. })
        ));
    }
}
