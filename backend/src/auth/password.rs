//! Password hashing using bcrypt
//!
//! Provides secure password hashing and verification.
//!
//! bcrypt only reads the first 72 bytes of its input. Passwords are cut at
//! that boundary explicitly (on a character boundary) before hashing and
//! verifying, so two passwords sharing their first 72 bytes are
//! indistinguishable.
//!
//! # Backend selection
//!
//! The hashing backend is chosen once at startup by [`CredentialHasher::probe`]:
//! the bcrypt crate's own `hash` is preferred; if it cannot produce a hash,
//! the service falls back to calling the bcrypt primitive directly with a
//! salt drawn from the OS RNG. Both produce standard `$2b$` hashes, so
//! verification is identical for either backend.
//!
//! # Performance Considerations
//!
//! bcrypt is intentionally CPU-intensive. In async contexts use
//! [`CredentialHasher::hash_async`] / [`CredentialHasher::verify_async`].

use argon2::password_hash::rand_core::{OsRng, RngCore};
use bcrypt::Version;
use thiserror::Error;
use tracing::{debug, warn};

/// Largest number of password bytes bcrypt takes into account
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Cost factors bcrypt accepts
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

const PROBE_PASSWORD: &str = "backend-probe";

/// Hashing failure
#[derive(Error, Debug)]
pub enum HashError {
    #[error("Failed to hash password: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("Hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Which implementation produces new hashes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashBackend {
    /// `bcrypt::hash`, salt generated by the crate
    Bcrypt,
    /// `bcrypt::hash_with_salt` with a salt from `OsRng`
    SaltedPrimitive,
}

/// Password hashing service
///
/// Cheap to clone; holds only the selected backend and the cost factor.
#[derive(Debug, Clone, Copy)]
pub struct CredentialHasher {
    backend: HashBackend,
    cost: u32,
}

impl CredentialHasher {
    /// Pick the preferred backend if it works, otherwise the fallback
    ///
    /// Call once at startup. A cost outside bcrypt's accepted range is clamped
    /// into it.
    pub fn probe(cost: u32) -> Self {
        let cost = clamp_cost(cost);
        let backend = match bcrypt::hash(PROBE_PASSWORD, cost) {
            Ok(_) => HashBackend::Bcrypt,
            Err(e) => {
                warn!(error = %e, "bcrypt backend unavailable, using salted primitive");
                HashBackend::SaltedPrimitive
            }
        };
        debug!(?backend, cost, "Password hashing backend selected");
        Self { backend, cost }
    }

    /// Use a specific backend without probing
    pub fn with_backend(backend: HashBackend, cost: u32) -> Self {
        Self {
            backend,
            cost: clamp_cost(cost),
        }
    }

    #[inline]
    pub fn cost(&self) -> u32 {
        self.cost
    }

    #[inline]
    pub fn backend(&self) -> HashBackend {
        self.backend
    }

    /// Hash a password (blocking operation)
    pub fn hash(&self, password: &str) -> Result<String, HashError> {
        let password = truncate_password(password);
        match self.backend {
            HashBackend::Bcrypt => Ok(bcrypt::hash(password, self.cost)?),
            HashBackend::SaltedPrimitive => {
                let mut salt = [0u8; 16];
                OsRng.fill_bytes(&mut salt);
                let parts = bcrypt::hash_with_salt(password, self.cost, salt)?;
                Ok(parts.format_for_version(Version::TwoB))
            }
        }
    }

    /// Verify a password against a stored hash (blocking operation)
    ///
    /// A malformed stored hash never matches.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        match bcrypt::verify(truncate_password(password), hash) {
            Ok(matches) => matches,
            Err(e) => {
                debug!(error = %e, "Stored password hash could not be parsed");
                false
            }
        }
    }

    /// Do the work of a verification when there is no stored hash
    ///
    /// Always `false`; keeps a login for an unknown user as slow as one for a
    /// known user.
    pub fn verify_missing(&self, password: &str) -> bool {
        let salt = [0u8; 16];
        if let Err(e) = bcrypt::hash_with_salt(truncate_password(password), self.cost, salt) {
            debug!(error = %e, "Placeholder hash failed");
        }
        false
    }

    /// Hash a password on the blocking thread pool
    pub async fn hash_async(&self, password: String) -> Result<String, HashError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&password)).await?
    }

    /// Verify a password on the blocking thread pool
    pub async fn verify_async(&self, password: String, hash: String) -> Result<bool, HashError> {
        let hasher = *self;
        Ok(tokio::task::spawn_blocking(move || hasher.verify(&password, &hash)).await?)
    }

    /// [`verify_missing`](Self::verify_missing) on the blocking thread pool
    pub async fn verify_missing_async(&self, password: String) -> Result<bool, HashError> {
        let hasher = *self;
        Ok(tokio::task::spawn_blocking(move || hasher.verify_missing(&password)).await?)
    }
}

fn clamp_cost(cost: u32) -> u32 {
    let clamped = cost.clamp(MIN_BCRYPT_COST, MAX_BCRYPT_COST);
    if clamped != cost {
        warn!(requested = cost, used = clamped, "bcrypt cost out of range, clamped");
    }
    clamped
}

/// Cut a password to at most [`MAX_PASSWORD_BYTES`] bytes
///
/// A multi-byte character straddling the limit is dropped whole.
pub fn truncate_password(password: &str) -> &str {
    if password.len() <= MAX_PASSWORD_BYTES {
        return password;
    }
    let mut end = MAX_PASSWORD_BYTES;
    while !password.is_char_boundary(end) {
        end -= 1;
    }
    &password[..end]
}
