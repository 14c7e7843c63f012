//! Key pair generation and reconstruction.
//!
//! Wallets are only ever created from freshly generated key pairs, so the
//! secret is always available at creation time. The stored form is the
//! base58 encoding of the full 64-byte ed25519 keypair.

use solana_sdk::signature::Keypair;
use solana_sdk::signer::Signer;
use solvault_types::Base58Secret;
use zeroize::Zeroize;

use crate::CustodyError;

/// Generate a fresh key pair from OS randomness.
pub fn generate() -> (String, Base58Secret) {
    let keypair = Keypair::new();
    let public_key = keypair.pubkey().to_string();
    let secret = Base58Secret::new(keypair.to_base58_string());
    (public_key, secret)
}

/// Reconstruct a signing key pair from a stored secret.
pub fn keypair_from_secret(secret: &Base58Secret) -> Result<Keypair, CustodyError> {
    let mut bytes = bs58::decode(secret.reveal())
        .into_vec()
        .map_err(|e| CustodyError::Key(format!("secret is not valid base58: {e}")))?;
    let keypair = Keypair::from_bytes(&bytes)
        .map_err(|e| CustodyError::Key(format!("secret is not a valid keypair: {e}")));
    bytes.zeroize();
    keypair
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::pubkey::Pubkey;
    use std::collections::HashSet;
    use std::str::FromStr;

    #[test]
    fn generated_public_keys_do_not_collide() {
        let mut seen = HashSet::new();
        for _ in 0..256 {
            let (public_key, _) = generate();
            assert!(seen.insert(public_key));
        }
    }

    #[test]
    fn secret_round_trips_through_storage_form() {
        let (public_key, secret) = generate();
        let keypair = keypair_from_secret(&secret).unwrap();
        assert_eq!(keypair.pubkey().to_string(), public_key);
    }

    #[test]
    fn reconstructed_keypair_signs_verifiably() {
        let (public_key, secret) = generate();
        let keypair = keypair_from_secret(&secret).unwrap();

        let message = b"withdrawal authorization";
        let signature = keypair.sign_message(message);
        let pubkey = Pubkey::from_str(&public_key).unwrap();
        assert!(signature.verify(pubkey.as_ref(), message));
    }

    #[test]
    fn garbage_secret_is_rejected() {
        let err = keypair_from_secret(&Base58Secret::new("not base58 !!!".to_string()));
        assert!(matches!(err, Err(CustodyError::Key(_))));

        // Valid base58 but the wrong length.
        let err = keypair_from_secret(&Base58Secret::new("abc".to_string()));
        assert!(matches!(err, Err(CustodyError::Key(_))));
    }
}
