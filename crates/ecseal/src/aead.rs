//! AES-GCM sealing with a nonce-prefixed output
//!
//! Sealed format: `[12-byte GCM nonce][ciphertext + 16-byte GCM tag]`.
//! The envelope's outer IV rides through here as associated data only; the
//! GCM nonce is drawn fresh from the supplied RNG for every seal.
//!
//! `open` collapses every failure — wrong key, corrupted data, mismatched
//! associated data, truncation — into [`Error::Authentication`].

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes128Gcm, Aes256Gcm, Nonce};
use rand::{CryptoRng, RngCore};

use crate::error::{Error, Result};
use crate::level::SecurityLevel;
use crate::{GCM_TAG_SIZE, NONCE_SIZE};

/// Seal `plaintext` under `key`, authenticating `aad` alongside it.
///
/// Returns `[nonce][ciphertext + tag]`. The key length must match the
/// level's AEAD (16 or 32 bytes).
pub fn seal<R: RngCore + CryptoRng>(
    rng: &mut R,
    level: SecurityLevel,
    key: &[u8],
    aad: &[u8],
    plaintext: &[u8],
) -> Result<Vec<u8>> {
    match level {
        SecurityLevel::Standard => seal_with::<Aes128Gcm, R>(rng, key, aad, plaintext),
        SecurityLevel::High => seal_with::<Aes256Gcm, R>(rng, key, aad, plaintext),
    }
}

/// Open the output of [`seal`] with the same key and associated data.
pub fn open(level: SecurityLevel, key: &[u8], aad: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    match level {
        SecurityLevel::Standard => open_with::<Aes128Gcm>(key, aad, data),
        SecurityLevel::High => open_with::<Aes256Gcm>(key, aad, data),
    }
}

fn seal_with<A: Aead + KeyInit, R: RngCore + CryptoRng>(
    rng: &mut R,
    key: &[u8],
    aad: &[u8],
    plaintext: &[u8],
) -> Result<Vec<u8>> {
    let cipher = A::new_from_slice(key).map_err(|_| Error::KeyGeneration)?;

    let mut nonce = [0u8; NONCE_SIZE];
    rng.fill_bytes(&mut nonce);

    let sealed = cipher
        .encrypt(
            Nonce::from_slice(&nonce),
            Payload {
                msg: plaintext,
                aad,
            },
        )
        .map_err(|_| Error::KeyGeneration)?;

    let mut out = Vec::with_capacity(NONCE_SIZE + sealed.len());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&sealed);
    Ok(out)
}

fn open_with<A: Aead + KeyInit>(key: &[u8], aad: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    if data.len() < NONCE_SIZE + GCM_TAG_SIZE {
        return Err(Error::Authentication);
    }

    let cipher = A::new_from_slice(key).map_err(|_| Error::Authentication)?;
    let (nonce, ciphertext) = data.split_at(NONCE_SIZE);

    cipher
        .decrypt(
            Nonce::from_slice(nonce),
            Payload {
                msg: ciphertext,
                aad,
            },
        )
        .map_err(|_| Error::Authentication)
}
