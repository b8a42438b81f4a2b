//! Password value object - Domain layer credential hashing.
//!
//! Encapsulates the one-way transformation of a plaintext secret into a
//! storable digest. The digest is a PHC string, so the salt and work
//! factor used to produce it travel with it and the factor can be raised
//! later without changing the record format.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::config::{DEFAULT_HASH_ITERATIONS, DEFAULT_HASH_MEMORY_KIB, DEFAULT_HASH_PARALLELISM};
use crate::errors::{AppError, AppResult};

/// Tunable work factor for the credential hasher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashSettings {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Iteration count
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for HashSettings {
    fn default() -> Self {
        Self {
            memory_kib: DEFAULT_HASH_MEMORY_KIB,
            iterations: DEFAULT_HASH_ITERATIONS,
            parallelism: DEFAULT_HASH_PARALLELISM,
        }
    }
}

/// Password value object holding a salted one-way digest.
///
/// Never holds the plaintext; the plaintext is consumed during hashing
/// and not retained anywhere.
#[derive(Clone)]
pub struct Password {
    digest: String,
}

// Don't expose the digest in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("digest", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plaintext secret into a new password digest.
    ///
    /// Fails only on internal hasher failure, never because of the
    /// input content.
    pub fn new(plaintext: &str, settings: &HashSettings) -> AppResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = Self::argon2(settings)?
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| AppError::hashing(format!("argon2 failure: {}", e)))?
            .to_string();
        Ok(Self { digest })
    }

    /// Reconstruct a Password from a stored digest.
    pub fn from_digest(digest: String) -> Self {
        Self { digest }
    }

    /// Get the digest string for storage.
    pub fn as_str(&self) -> &str {
        &self.digest
    }

    /// Consume and return the digest string.
    pub fn into_string(self) -> String {
        self.digest
    }

    /// Verify a plaintext secret against this digest.
    ///
    /// The digest self-describes its salt and parameters, so records
    /// hashed under an older work factor still verify.
    pub fn verify(&self, plaintext: &str) -> bool {
        PasswordHash::new(&self.digest)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(plaintext.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    /// Build an Argon2 instance for the given work factor.
    fn argon2(settings: &HashSettings) -> AppResult<Argon2<'static>> {
        let params = Params::new(
            settings.memory_kib,
            settings.iterations,
            settings.parallelism,
            None,
        )
        .map_err(|e| AppError::hashing(format!("invalid hash settings: {}", e)))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}
