//! Object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character lowercase hexadecimal strings. They are the
//! only key the object store accepts, so every ID is validated once at the
//! boundary where it enters the system (user input, index lines, tree
//! entries, commit fields) and trusted afterwards.
//!
//! ## Storage
//!
//! Objects are stored flat, as `<objects-dir>/<40-hex-chars>`.

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::errors::Error;
use std::path::PathBuf;

/// Object identifier (SHA-1 hash rendered as hex)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// Uppercase digits are accepted and normalised to lowercase so that the
    /// same object always maps to the same file name.
    pub fn try_parse(id: impl AsRef<str>) -> crate::errors::Result<Self> {
        let id = id.as_ref().trim();

        if id.len() != OBJECT_ID_LENGTH {
            return Err(Error::InvalidObjectId(format!(
                "invalid length {} for {:?}",
                id.len(),
                id
            )));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidObjectId(format!(
                "invalid characters in {:?}",
                id
            )));
        }

        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Wrap an already rendered digest
    pub(crate) fn from_rendered_digest(hex: String) -> Self {
        debug_assert_eq!(hex.len(), OBJECT_ID_LENGTH);
        Self(hex)
    }

    /// File name of the object inside the flat object directory
    pub fn to_path(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }

    /// First 7 characters of the hash
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for ObjectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse(s)
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
