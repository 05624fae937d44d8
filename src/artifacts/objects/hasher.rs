//! SHA-1 content hashing
//!
//! The digest is taken over the exact bytes given: no `<type> <size>\0`
//! header, no encoding transformation. Hex rendering is always lowercase.

use crate::artifacts::objects::object_id::ObjectId;
use sha1::{Digest, Sha1};

pub const DIGEST_SIZE: usize = 20;

pub fn digest(data: &[u8]) -> [u8; DIGEST_SIZE] {
    let mut hasher = Sha1::new();
    hasher.update(data);

    hasher.finalize().into()
}

pub fn render_hex(digest: &[u8; DIGEST_SIZE]) -> String {
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}

/// Hash a byte sequence into an object ID
pub fn hash(data: &[u8]) -> ObjectId {
    ObjectId::from_rendered_digest(render_hex(&digest(data)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(b"", "da39a3ee5e6b4b0d3255bfef95601890afd80709")]
    #[case(b"hi", "c22b5f9178342609428d6f51b2c5af4c0bde6a42")]
    #[case(b"abc", "a9993e364706816aba3e25717850c26c9cd0d89d")]
    fn hashes_exact_bytes(#[case] data: &[u8], #[case] expected: &str) {
        assert_eq!(hash(data).as_ref(), expected);
    }

    #[test]
    fn equal_bytes_yield_equal_ids() {
        let left = b"same content".to_vec();
        let right = String::from("same content").into_bytes();

        assert_eq!(hash(&left), hash(&right));
    }

    #[test]
    fn rendering_is_fixed_width() {
        let rendered = render_hex(&[0u8; DIGEST_SIZE]);

        assert_eq!(rendered.len(), 40);
        assert!(rendered.chars().all(|c| c == '0'));
    }
}
