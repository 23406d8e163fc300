//! P-256 key types: generation, SEC1 encoding, secret hygiene
//!
//! The curve is fixed at the type level. Keys are closed newtypes — there is
//! no runtime dispatch over key algorithms, and no process-wide curve
//! selection.

use p256::{AffinePoint, NonZeroScalar, SecretKey};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::error::{Error, Result};

/// A P-256 private scalar. Zeroized on drop.
#[derive(Clone)]
pub struct PrivateKey {
    inner: SecretKey,
}

impl PrivateKey {
    /// Parse a 32-byte big-endian scalar. Rejects zero and out-of-range
    /// values.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        SecretKey::from_slice(bytes)
            .map(|inner| Self { inner })
            .map_err(|_| Error::InvalidPoint)
    }

    /// The scalar as 32 big-endian bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.inner.to_bytes().into()
    }

    /// The matching public point.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            inner: self.inner.public_key(),
        }
    }

    pub(crate) fn scalar(&self) -> NonZeroScalar {
        self.inner.to_nonzero_scalar()
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("scalar", &"[REDACTED]")
            .finish()
    }
}

/// A P-256 public point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    inner: p256::PublicKey,
}

impl PublicKey {
    /// Parse a SEC1-encoded point (compressed or uncompressed). Off-curve
    /// encodings and the identity are rejected.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        p256::PublicKey::from_sec1_bytes(bytes)
            .map(|inner| Self { inner })
            .map_err(|_| Error::InvalidPoint)
    }

    /// SEC1 uncompressed encoding: `04 || X || Y`, 65 bytes.
    pub fn to_sec1_bytes(&self) -> Vec<u8> {
        use p256::elliptic_curve::sec1::ToEncodedPoint;
        self.inner.to_encoded_point(false).as_bytes().to_vec()
    }

    pub(crate) fn as_affine(&self) -> &AffinePoint {
        self.inner.as_affine()
    }
}

/// A freshly generated private/public pair.
#[derive(Debug, Clone)]
pub struct KeyPair {
    pub public: PublicKey,
    pub private: PrivateKey,
}

impl KeyPair {
    /// Generate from the operating system RNG.
    pub fn generate() -> Self {
        Self::generate_with_rng(&mut OsRng)
    }

    /// Generate from the supplied RNG. Tests inject a deterministic source
    /// here; production callers use [`KeyPair::generate`].
    pub fn generate_with_rng<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let private = PrivateKey {
            inner: SecretKey::random(rng),
        };
        let public = private.public_key();
        Self { public, private }
    }
}
