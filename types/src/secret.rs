//! Signing-secret container.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A base58-encoded signing secret (the full 64-byte ed25519 keypair).
///
/// `Debug` is redacted and there is deliberately no `Display`: the only code
/// allowed to see the plaintext goes through [`Base58Secret::reveal`], which
/// keeps accidental logging of key material grep-able to one call site kind.
/// The buffer is zeroized when dropped.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Base58Secret(String);

impl Base58Secret {
    pub fn new(encoded: String) -> Self {
        Self(encoded)
    }

    /// The plaintext base58 secret.
    pub fn reveal(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Base58Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Base58Secret(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_is_redacted() {
        let secret = Base58Secret::new("5firstsecretbytes".to_string());
        let rendered = format!("{:?}", secret);
        assert!(!rendered.contains("firstsecret"));
        assert!(rendered.contains("redacted"));
    }

    #[test]
    fn reveal_returns_plaintext() {
        let secret = Base58Secret::new("abc123".to_string());
        assert_eq!(secret.reveal(), "abc123");
    }
}
