//! Security level selection
//!
//! A level bundles the derivation hash, the derived-key split, and the AEAD
//! key size. The three always move together; a level is an explicit argument
//! to every envelope operation, never process-wide state. Both peers must
//! agree on the level out-of-band — the wire format does not carry it.

use crate::MAC_KEY_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecurityLevel {
    /// AES-128-GCM, keys split from a SHA-256 digest (16 + 16 bytes).
    Standard,
    /// AES-256-GCM, keys split from a SHA-384 digest (32 + 16 bytes).
    High,
}

impl SecurityLevel {
    /// AEAD key size in bytes.
    pub const fn enc_key_len(self) -> usize {
        match self {
            SecurityLevel::Standard => 16,
            SecurityLevel::High => 32,
        }
    }

    /// MAC key size in bytes. The same at both levels.
    pub const fn mac_key_len(self) -> usize {
        MAC_KEY_SIZE
    }

    /// Width of the derivation digest: encryption key followed by MAC key.
    pub const fn digest_len(self) -> usize {
        self.enc_key_len() + MAC_KEY_SIZE
    }
}
