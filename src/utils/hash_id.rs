//! Feed identifier generation
//!
//! Identifiers are public (they appear in feed URLs) and double as storage
//! keys, so they are short and URL-safe. Each ID is the first 8 bytes of
//! `sha256(salt | seed | counter)` encoded as unpadded URL-safe base64, giving
//! an 11 character string.
//!
//! The counter never repeats within an instance, so two calls never hash the
//! same input. Nothing is remembered per issued ID; memory stays constant no
//! matter how many feeds are created.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::errors::{AppError, AppResult};

/// Bytes of digest kept in an identifier
const ID_BYTES: usize = 8;

/// Produces public feed identifiers
#[cfg_attr(test, mockall::automock)]
pub trait IdGenerator: Send + Sync {
    /// Generate a fresh identifier from an opaque seed
    fn generate(&self, seed: &str) -> AppResult<String>;
}

/// Salted SHA-256 identifier generator
pub struct HashIdGenerator {
    salt: [u8; 16],
    counter: AtomicU64,
}

impl HashIdGenerator {
    /// Create a generator with a random per-instance salt
    pub fn new() -> Self {
        Self::with_salt(rand::random())
    }

    /// Create a generator with a fixed salt, making output reproducible
    pub fn with_salt(salt: [u8; 16]) -> Self {
        Self::starting_at(salt, 0)
    }

    fn starting_at(salt: [u8; 16], counter: u64) -> Self {
        Self {
            salt,
            counter: AtomicU64::new(counter),
        }
    }

    /// Claim the next counter value; `None` once the sequence is used up
    fn next_counter(&self) -> Option<u64> {
        self.counter
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_add(1))
            .ok()
    }

    fn digest(&self, seed: &str, counter: u64) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.salt);
        hasher.update(seed.as_bytes());
        hasher.update(counter.to_be_bytes());
        let digest = hasher.finalize();

        URL_SAFE_NO_PAD.encode(&digest[..ID_BYTES])
    }
}

impl Default for HashIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for HashIdGenerator {
    fn generate(&self, seed: &str) -> AppResult<String> {
        let counter = self.next_counter().ok_or_else(|| AppError::Generation {
            message: "identifier counter exhausted".to_string(),
        })?;
        Ok(self.digest(seed, counter))
    }
}
