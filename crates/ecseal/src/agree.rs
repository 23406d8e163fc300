//! ECDH agreement and key derivation
//!
//! Agreement multiplies the peer's public point by a private scalar and
//! keeps only the X-coordinate, as 32 fixed-width big-endian bytes. A
//! product at the point at infinity is rejected outright — it must never
//! flow onward as an all-zero secret.
//!
//! Derivation hashes the X-coordinate with the level's digest and splits
//! the output into the encryption key followed by the MAC key. There is no
//! salt and the public keys are not bound into the hash input; the split
//! digest IS the wire-compatible derivation.

use p256::elliptic_curve::group::Group;
use p256::elliptic_curve::point::AffineCoordinates;
use p256::{AffinePoint, NonZeroScalar, ProjectivePoint};
use sha2::{Digest, Sha256, Sha384};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};
use crate::level::SecurityLevel;

/// X-coordinate of an agreed point. Transient; zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret([u8; 32]);

impl SharedSecret {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SharedSecret").field(&"[REDACTED]").finish()
    }
}

/// The (encryption key, MAC key) split of one derivation digest.
/// Zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKeys {
    enc: Vec<u8>,
    mac: Vec<u8>,
}

impl DerivedKeys {
    /// AEAD key: 16 bytes at Standard, 32 at High.
    pub fn enc_key(&self) -> &[u8] {
        &self.enc
    }

    /// MAC key: 16 bytes at either level.
    pub fn mac_key(&self) -> &[u8] {
        &self.mac
    }
}

impl std::fmt::Debug for DerivedKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKeys")
            .field("enc", &"[REDACTED]")
            .field("mac", &"[REDACTED]")
            .finish()
    }
}

/// Scalar-multiply `point` by `scalar` and return the X-coordinate.
pub(crate) fn agree(scalar: &NonZeroScalar, point: &AffinePoint) -> Result<SharedSecret> {
    let product = ProjectivePoint::from(*point) * *scalar.as_ref();
    if bool::from(product.is_identity()) {
        return Err(Error::InvalidPoint);
    }

    let x = product.to_affine().x();
    let mut secret = [0u8; 32];
    secret.copy_from_slice(x.as_slice());
    Ok(SharedSecret(secret))
}

/// Split the level's digest of `secret` into encryption and MAC keys.
pub fn derive(secret: &[u8], level: SecurityLevel) -> DerivedKeys {
    let mut digest = match level {
        SecurityLevel::Standard => Sha256::digest(secret).to_vec(),
        SecurityLevel::High => Sha384::digest(secret).to_vec(),
    };
    debug_assert_eq!(digest.len(), level.digest_len());

    let split = level.enc_key_len();
    let keys = DerivedKeys {
        enc: digest[..split].to_vec(),
        mac: digest[split..].to_vec(),
    };
    digest.zeroize();
    keys
}
