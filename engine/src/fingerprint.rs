//! Stable digests of serializable state, for determinism and regression checks.

use serde::Serialize;
use sha2::{Digest, Sha256};

pub fn bytes_sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Hashes the JSON encoding of `state`.
///
/// Two states with the same fingerprint serialized to identical JSON, which is
/// what replay tests compare.
pub fn state_sha256_hex<S: Serialize>(state: &S) -> serde_json::Result<String> {
    let json = serde_json::to_vec(state)?;
    Ok(bytes_sha256_hex(&json))
}

/// Hashes each state of a history and chains the digests in order.
pub fn history_sha256_hex<S: Serialize>(history: &[S]) -> serde_json::Result<String> {
    let mut hasher = Sha256::new();
    for state in history {
        hasher.update(serde_json::to_vec(state)?);
        hasher.update(b"\n");
    }
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_of_empty_input_matches_known_digest() {
        assert_eq!(
            bytes_sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn equal_states_hash_equal_and_order_matters_for_history() {
        let a = state_sha256_hex(&[1, 2, 3]).expect("hash");
        let b = state_sha256_hex(&[1, 2, 3]).expect("hash");
        let c = state_sha256_hex(&[3, 2, 1]).expect("hash");
        assert_eq!(a, b);
        assert_ne!(a, c);

        let h1 = history_sha256_hex(&[1, 2]).expect("hash");
        let h2 = history_sha256_hex(&[2, 1]).expect("hash");
        assert_ne!(h1, h2);
    }
}
