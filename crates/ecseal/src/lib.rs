//! ecseal: hybrid elliptic-curve envelope encryption
//!
//! Pipeline: ephemeral P-256 ECDH → digest split into enc + MAC keys →
//! block-pad → AES-GCM seal → HMAC-SHA1 trailer tag
//!
//! Envelope format (binary):
//! ```text
//! [1 byte: ephemeral pubkey length][65 bytes: SEC1 uncompressed pubkey]
//! [16 bytes: outer IV][12-byte GCM nonce ‖ ciphertext ‖ 16-byte GCM tag]
//! [20 bytes: HMAC-SHA1 over IV ‖ GCM nonce ‖ ciphertext ‖ GCM tag]
//! ```
//!
//! Two security levels share one code path:
//! ```text
//! Standard: SHA-256(x) → 16-byte AES-128-GCM key ‖ 16-byte MAC key
//! High:     SHA-384(x) → 32-byte AES-256-GCM key ‖ 16-byte MAC key
//! ```
//! The level is an explicit argument to every call and is not carried in
//! the envelope; peers agree on it out-of-band.

pub mod aead;
pub mod agree;
pub mod envelope;
pub mod error;
pub mod keys;
pub mod level;
pub mod mac;
pub mod padding;

pub use agree::{derive, DerivedKeys, SharedSecret};
pub use envelope::{decrypt, encrypt, encrypt_with_rng};
pub use error::{Error, Result};
pub use keys::{KeyPair, PrivateKey, PublicKey};
pub use level::SecurityLevel;

/// Padding block size; also the outer IV width.
pub const BLOCK_SIZE: usize = 16;

/// Size of the outer IV written after the ephemeral public key.
pub const IV_SIZE: usize = 16;

/// Size of the AES-GCM nonce prefixed to the sealed data.
pub const NONCE_SIZE: usize = 12;

/// Size of the AES-GCM authentication tag.
pub const GCM_TAG_SIZE: usize = 16;

/// Size of the HMAC-SHA1 trailer tag.
pub const MAC_TAG_SIZE: usize = 20;

/// Size of the derived MAC key at either security level.
pub const MAC_KEY_SIZE: usize = 16;

/// Size of a SEC1 uncompressed P-256 public key.
pub const PUBLIC_KEY_SIZE: usize = 65;
