use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("Is a directory: {}", .0.display())]
    IsDirectory(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Path is outside the repository: {}", .0.display())]
    OutsideRepository(PathBuf),

    #[error("Object not found: {0}")]
    ObjectNotFound(ObjectId),

    #[error("Commit not found: {0}")]
    CommitNotFound(ObjectId),

    #[error("Malformed commit {oid}: {reason}")]
    MalformedCommit { oid: ObjectId, reason: String },

    #[error("Malformed tree {oid}: {reason}")]
    MalformedTree { oid: ObjectId, reason: String },

    #[error("Malformed index line {line}: {reason}")]
    MalformedIndex { line: usize, reason: String },

    #[error("Invalid author {0:?}: must fit on a single line")]
    InvalidAuthor(String),

    #[error("Invalid object ID: {0}")]
    InvalidObjectId(String),

    #[error("Not a twig repository (missing {})", .0.display())]
    NotARepository(PathBuf),
}
