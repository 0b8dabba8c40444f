//! # Secure Salt Type
//!
//! Participant-side holder for a salt between commit and reveal.
//!
//! Until it is revealed, the salt is the only thing protecting the
//! commitment. The wrapper zeroes the bytes on drop and never prints them.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::errors::Salt;

/// A salt that zeroizes on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecureSalt {
    inner: Salt,
}

impl SecureSalt {
    /// Wrap raw salt bytes.
    pub fn new(bytes: Salt) -> Self {
        Self { inner: bytes }
    }

    /// Borrow the salt bytes.
    pub fn as_bytes(&self) -> &Salt {
        &self.inner
    }

    /// Copy out the salt, for passing to `reveal`.
    pub fn expose(&self) -> Salt {
        self.inner
    }
}

impl std::fmt::Debug for SecureSalt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecureSalt(***)")
    }
}
