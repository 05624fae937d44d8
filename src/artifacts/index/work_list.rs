//! Tree building from the staging index
//!
//! The flat list of staged paths is collapsed into nested trees bottom-up,
//! without ever materialising the directory hierarchy:
//!
//! 1. every index entry becomes a `blob <hash> <path>` working record
//! 2. records are kept sorted by path (byte order)
//! 3. the deepest parent directory is picked; its immediate children are
//!    written out as a tree and replaced by one `tree <hash> <dir>` record
//! 4. once no path contains a separator, the remaining records form the root
//!
//! When several paths share the maximum depth, the first one in sorted order
//! wins, i.e. the lexicographically smallest path. Tree entries are always
//! named by their last path segment.

use crate::artifacts::index::PATH_SEPARATOR;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use derive_new::new;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct WorkRecord {
    kind: ObjectType,
    oid: ObjectId,
    path: String,
}

impl WorkRecord {
    fn depth(&self) -> usize {
        self.path.matches(PATH_SEPARATOR).count()
    }

    fn parent_dir(&self) -> Option<&str> {
        self.path.rsplit_once(PATH_SEPARATOR).map(|(parent, _)| parent)
    }

    fn basename(&self) -> &str {
        self.path
            .rsplit_once(PATH_SEPARATOR)
            .map_or(self.path.as_str(), |(_, basename)| basename)
    }

    /// Whether this record sits directly inside `dir`
    fn is_child_of(&self, dir: &str) -> bool {
        self.path
            .strip_prefix(dir)
            .and_then(|rest| rest.strip_prefix(PATH_SEPARATOR))
            .is_some_and(|rest| !rest.contains(PATH_SEPARATOR))
    }

    fn to_tree_entry(&self) -> Option<TreeEntry> {
        TreeEntry::new(self.kind, self.oid.clone(), self.basename().to_string())
    }
}

impl std::fmt::Display for WorkRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.kind, self.oid, self.path)
    }
}

#[derive(Debug, Clone, Default)]
pub struct WorkList {
    records: Vec<WorkRecord>,
}

impl WorkList {
    pub fn from_entries<'e>(entries: impl Iterator<Item = &'e IndexEntry>) -> Self {
        let mut work_list = WorkList {
            records: entries
                .map(|entry| WorkRecord::new(ObjectType::Blob, entry.oid.clone(), entry.name.clone()))
                .collect(),
        };
        work_list.sort();

        work_list
    }

    fn sort(&mut self) {
        self.records
            .sort_by(|left, right| left.path.as_bytes().cmp(right.path.as_bytes()));
    }

    /// Parent directory of the deepest path; ties go to the first path in sorted order
    pub fn leaf_most_parent(&self) -> Option<String> {
        let mut deepest: Option<(usize, &str)> = None;

        for record in &self.records {
            let depth = record.depth();
            if depth == 0 || deepest.is_some_and(|(max_depth, _)| depth <= max_depth) {
                continue;
            }
            if let Some(parent) = record.parent_dir() {
                deepest = Some((depth, parent));
            }
        }

        deepest.map(|(_, parent)| parent.to_string())
    }

    /// Collapse the list into trees, handing each tree to `store`
    ///
    /// `store` must persist the tree and return its object ID. The returned ID
    /// is the root tree's; an empty list yields the empty tree.
    pub fn build<F>(mut self, mut store: F) -> crate::errors::Result<ObjectId>
    where
        F: FnMut(&Tree) -> crate::errors::Result<ObjectId>,
    {
        while let Some(dir) = self.leaf_most_parent() {
            let tree = self.tree_of(|record| record.is_child_of(&dir));
            let tree_id = store(&tree)?;

            tracing::debug!(dir = %dir, tree = %tree_id, "collapsed directory");

            self.records
                .retain(|record| record.path != dir && !record.is_child_of(&dir));
            self.records
                .push(WorkRecord::new(ObjectType::Tree, tree_id, dir));
            self.sort();
        }

        let root = self.tree_of(|_| true);
        store(&root)
    }

    fn tree_of(&self, predicate: impl Fn(&WorkRecord) -> bool) -> Tree {
        Tree::new(
            self.records
                .iter()
                .filter(|record| predicate(record))
                .filter_map(WorkRecord::to_tree_entry)
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::hasher;
    use crate::artifacts::objects::object::{Object, Packable};
    use bytes::Bytes;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn entry(name: &str, content: &str) -> IndexEntry {
        IndexEntry::new(name.to_string(), hasher::hash(content.as_bytes()))
    }

    fn build(entries: &[IndexEntry]) -> (ObjectId, HashMap<ObjectId, Bytes>) {
        let mut store = HashMap::new();
        let root = WorkList::from_entries(entries.iter())
            .build(|tree| {
                let oid = tree.object_id();
                store.insert(oid.clone(), tree.serialize());
                Ok(oid)
            })
            .unwrap();

        (root, store)
    }

    #[test]
    fn empty_list_yields_empty_tree() {
        let (root, store) = build(&[]);

        assert_eq!(root.as_ref(), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
        assert_eq!(store.get(&root), Some(&Bytes::new()));
    }

    #[test]
    fn nests_one_directory() {
        let (root, store) = build(&[entry("dir/b.txt", "yo"), entry("a.txt", "hi")]);

        let dir_content = format!("blob {} b.txt", hasher::hash(b"yo"));
        let dir_id = hasher::hash(dir_content.as_bytes());
        let root_content = format!("blob {} a.txt\ntree {} dir", hasher::hash(b"hi"), dir_id);

        assert_eq!(store[&dir_id], Bytes::from(dir_content));
        assert_eq!(store[&root], Bytes::from(root_content.clone()));
        assert_eq!(root, hasher::hash(root_content.as_bytes()));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn collapses_deepest_directories_first() {
        let (root, store) = build(&[
            entry("a/b/c/d.txt", "d"),
            entry("a/e.txt", "e"),
            entry("f.txt", "f"),
        ]);

        let c_id = hasher::hash(format!("blob {} d.txt", hasher::hash(b"d")).as_bytes());
        let b_id = hasher::hash(format!("tree {} c", c_id).as_bytes());
        let a_id = hasher::hash(
            format!("tree {} b\nblob {} e.txt", b_id, hasher::hash(b"e")).as_bytes(),
        );
        let expected_root = hasher::hash(
            format!("tree {} a\nblob {} f.txt", a_id, hasher::hash(b"f")).as_bytes(),
        );

        assert_eq!(root, expected_root);
        for oid in [&c_id, &b_id, &a_id, &expected_root] {
            assert!(store.contains_key(oid), "missing tree {oid}");
        }
    }

    #[rstest]
    #[case(&["x/1/f", "y/2/g", "x/h"], "x/1")]
    #[case(&["b/z/q", "a/z/q"], "a/z")]
    #[case(&["top", "one/two"], "one")]
    #[case(&["top", "other"], "")]
    fn picks_first_deepest_parent(#[case] paths: &[&str], #[case] expected: &str) {
        let entries = paths.iter().map(|p| entry(p, p)).collect::<Vec<_>>();
        let work_list = WorkList::from_entries(entries.iter());

        let expected = (!expected.is_empty()).then(|| expected.to_string());
        assert_eq!(work_list.leaf_most_parent(), expected);
    }

    #[test]
    fn unchanged_subtrees_keep_their_hash() {
        let before = [entry("dir/b.txt", "yo"), entry("other/c.txt", "c"), entry("a.txt", "hi")];
        let after = [entry("dir/b.txt", "yo!"), entry("other/c.txt", "c"), entry("a.txt", "hi")];

        let (root_before, store_before) = build(&before);
        let (root_after, store_after) = build(&after);

        let other_id = hasher::hash(format!("blob {} c.txt", hasher::hash(b"c")).as_bytes());
        assert_ne!(root_before, root_after);
        assert!(store_before.contains_key(&other_id));
        assert!(store_after.contains_key(&other_id));
    }

    proptest! {
        #[test]
        fn root_hash_ignores_index_order(
            files in proptest::collection::btree_map("[a-c]{1,2}(/[a-c]{1,2}){0,3}", "[a-z]{0,8}", 1..12)
        ) {
            // a path cannot be both a file and a directory
            let files = files
                .iter()
                .filter(|(path, _)| !files.keys().any(|other| other.starts_with(&format!("{path}/"))))
                .map(|(path, content)| entry(path, content))
                .collect::<Vec<_>>();
            let mut reversed = files.clone();
            reversed.reverse();

            let (forward_root, _) = build(&files);
            let (reversed_root, _) = build(&reversed);

            prop_assert_eq!(forward_root, reversed_root);
        }
    }
}
