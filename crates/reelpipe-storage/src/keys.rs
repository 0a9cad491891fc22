//! Shared key generation for storage backends.
//!
//! Key format: `{category}/{random_id}.{extension}`.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;
use reelpipe_core::models::AspectCategory;

/// Random bytes per object id (256 bits).
const OBJECT_ID_BYTES: usize = 32;

/// Generate an unpadded base64url object id from the thread-local CSPRNG.
pub fn random_object_id() -> String {
    let mut bytes = [0u8; OBJECT_ID_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Generate a fresh storage key under the category's prefix.
pub fn generate_storage_key(category: AspectCategory, extension: &str) -> String {
    format!(
        "{}/{}.{}",
        category.as_str(),
        random_object_id(),
        extension.trim_start_matches('.')
    )
}

/// Reject keys that could escape a backend's namespace.
pub fn validate_key(storage_key: &str) -> bool {
    !storage_key.is_empty() && !storage_key.contains("..") && !storage_key.starts_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_key_layout() {
        let key = generate_storage_key(AspectCategory::Landscape, "mp4");
        assert!(key.starts_with("landscape/"));
        assert!(key.ends_with(".mp4"));

        let id = key
            .trim_start_matches("landscape/")
            .trim_end_matches(".mp4");
        // 32 bytes -> 43 base64url chars without padding
        assert_eq!(id.len(), 43);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_extension_leading_dot_is_ignored() {
        let key = generate_storage_key(AspectCategory::Other, ".mov");
        assert!(key.starts_with("other/"));
        assert!(key.ends_with(".mov"));
        assert!(!key.contains(".."));
    }

    #[test]
    fn test_object_ids_do_not_repeat() {
        let ids: HashSet<String> = (0..1000).map(|_| random_object_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("portrait/abc.mp4"));
        assert!(!validate_key("../etc/passwd"));
        assert!(!validate_key("/absolute.mp4"));
        assert!(!validate_key(""));
    }
}
