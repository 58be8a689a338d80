use crate::constants::DIFFICULTY_PREFIX;
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use tracing::info;

/// Linear scan from zero until a candidate satisfies [`is_valid`].
/// Deterministic for a given `last_proof`; unbounded by design.
pub fn search(last_proof: u64) -> u64 {
    let mut proof = 0u64;
    while !is_valid(last_proof, proof) {
        proof += 1;
    }
    info!(last_proof, proof, "proof found");
    proof
}

/// A proof is accepted when the SHA-256 digest of the concatenated decimal
/// strings `last_proof ++ proof` starts with four zero hex characters.
pub fn is_valid(last_proof: u64, proof: u64) -> bool {
    let guess = format!("{last_proof}{proof}");
    let mut hasher = Sha256::new();
    hasher.update(guess.as_bytes());
    hex::encode(hasher.finalize()).starts_with(DIFFICULTY_PREFIX)
}

/// Shards the candidate space across rayon workers. Returns some valid
/// proof, not necessarily the lowest-numbered one.
pub fn search_parallel(last_proof: u64) -> u64 {
    (0u64..u64::MAX)
        .into_par_iter()
        .find_any(|candidate| is_valid(last_proof, *candidate))
        .expect("candidate space exhausted (practically impossible)")
}
