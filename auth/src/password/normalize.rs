use std::borrow::Cow;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::Digest;
use sha2::Sha256;

/// Largest input bcrypt consumes. Bytes past this limit are silently dropped
/// by the primitive.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Password bytes ready to be fed to bcrypt.
///
/// Passwords whose UTF-8 encoding fits in [`MAX_PASSWORD_BYTES`] are used
/// as-is. Longer ones are replaced by the padded base64 text of their SHA-256
/// digest (always 44 ASCII bytes), so every byte of the original input still
/// influences the stored hash.
///
/// Hashing and verification must both go through this type.
#[derive(Clone, PartialEq, Eq)]
pub struct NormalizedPassword<'a>(Cow<'a, [u8]>);

impl<'a> NormalizedPassword<'a> {
    /// Normalize a raw password.
    ///
    /// # Arguments
    /// * `raw` - Plaintext password
    ///
    /// # Returns
    /// Byte sequence of at most 72 bytes
    pub fn new(raw: &'a str) -> Self {
        let bytes = raw.as_bytes();

        if bytes.len() > MAX_PASSWORD_BYTES {
            let digest = Sha256::digest(bytes);
            Self(Cow::Owned(STANDARD.encode(digest).into_bytes()))
        } else {
            Self(Cow::Borrowed(bytes))
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Whether the raw password was replaced by its digest.
    pub fn is_digest(&self) -> bool {
        matches!(self.0, Cow::Owned(_))
    }
}

impl AsRef<[u8]> for NormalizedPassword<'_> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_empty_password_is_kept() {
        let normalized = NormalizedPassword::new("");
        assert!(normalized.as_bytes().is_empty());
        assert!(!normalized.is_digest());
    }

    #[test]
    fn test_exactly_72_bytes_is_kept() {
        let password = "x".repeat(72);
        let normalized = NormalizedPassword::new(&password);

        assert!(!normalized.is_digest());
        assert_eq!(normalized.as_bytes(), password.as_bytes());
    }

    #[test]
    fn test_73_bytes_is_digested() {
        let password = "a".repeat(73);
        let normalized = NormalizedPassword::new(&password);

        assert!(normalized.is_digest());
        assert_eq!(
            normalized.as_bytes(),
            b"DgWOP30EOfkFTVnHNVh66ZZV9kc6I0zklNgrVYb36sY="
        );
    }

    #[test]
    fn test_multibyte_length_measured_in_bytes() {
        // 36 chars, 72 bytes
        let at_limit = "é".repeat(36);
        assert!(!NormalizedPassword::new(&at_limit).is_digest());

        // 37 chars, 74 bytes
        let over_limit = "é".repeat(37);
        let normalized = NormalizedPassword::new(&over_limit);
        assert!(normalized.is_digest());
        assert_eq!(normalized.as_bytes().len(), 44);
    }

    proptest! {
        #[test]
        fn normalized_never_exceeds_limit(raw in ".{0,200}") {
            let normalized = NormalizedPassword::new(&raw);
            prop_assert!(normalized.as_bytes().len() <= MAX_PASSWORD_BYTES);
        }

        #[test]
        fn normalization_is_deterministic(raw in ".{0,200}") {
            prop_assert!(NormalizedPassword::new(&raw) == NormalizedPassword::new(&raw));
        }

        #[test]
        fn short_passwords_pass_through(raw in "[ -~]{0,72}") {
            let normalized = NormalizedPassword::new(&raw);
            prop_assert!(!normalized.is_digest());
            prop_assert_eq!(normalized.as_bytes(), raw.as_bytes());
        }
    }
}
