//! Envelope construction and opening
//!
//! Envelope format (binary):
//! ```text
//! [1 byte:  ephemeral pubkey length]
//! [65 bytes: ephemeral pubkey, SEC1 uncompressed]
//! [16 bytes: outer IV — AEAD associated data, not an encryption nonce]
//! [12 bytes: GCM nonce][N bytes: ciphertext + 16-byte GCM tag]
//! [20 bytes: HMAC-SHA1 over outer IV ‖ GCM nonce ‖ ciphertext ‖ GCM tag]
//! ```
//!
//! Each call is single-shot: an envelope is built atomically by [`encrypt`]
//! and consumed atomically by [`decrypt`]. There is no session state, and
//! concurrent calls share nothing but the OS random source.
//!
//! Opening verifies the outer MAC before any decryption is attempted, so a
//! tampered envelope never reaches the cipher.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::keys::{KeyPair, PrivateKey, PublicKey};
use crate::level::SecurityLevel;
use crate::{aead, agree, mac, padding};
use crate::{IV_SIZE, MAC_TAG_SIZE};

/// Encrypt `plaintext` to `recipient` using the OS random source.
pub fn encrypt(recipient: &PublicKey, plaintext: &[u8], level: SecurityLevel) -> Result<Vec<u8>> {
    encrypt_with_rng(&mut OsRng, recipient, plaintext, level)
}

/// Encrypt with an explicit random source.
///
/// Draw order is fixed: ephemeral scalar, outer IV, GCM nonce. A
/// deterministic RNG therefore reproduces an envelope byte for byte, which
/// is how the sealing path is tested.
pub fn encrypt_with_rng<R: RngCore + CryptoRng>(
    rng: &mut R,
    recipient: &PublicKey,
    plaintext: &[u8],
    level: SecurityLevel,
) -> Result<Vec<u8>> {
    tracing::trace!(?level, plaintext_len = plaintext.len(), "sealing envelope");

    let ephemeral = KeyPair::generate_with_rng(rng);
    let eph_bytes = ephemeral.public.to_sec1_bytes();
    if eph_bytes.len() > u8::MAX as usize {
        return Err(Error::Encoding);
    }

    let secret = agree::agree(&ephemeral.private.scalar(), recipient.as_affine())
        .map_err(|_| Error::KeyGeneration)?;
    let keys = agree::derive(secret.as_bytes(), level);

    let mut padded = padding::pad(plaintext);

    let mut iv = [0u8; IV_SIZE];
    rng.fill_bytes(&mut iv);

    let sealed = aead::seal(rng, level, keys.enc_key(), &iv, &padded)?;
    padded.zeroize();

    let mut envelope =
        Vec::with_capacity(1 + eph_bytes.len() + IV_SIZE + sealed.len() + MAC_TAG_SIZE);
    envelope.push(eph_bytes.len() as u8);
    envelope.extend_from_slice(&eph_bytes);
    envelope.extend_from_slice(&iv);
    envelope.extend_from_slice(&sealed);
    envelope.extend_from_slice(&mac::tag(keys.mac_key(), &[&iv, &sealed]));
    Ok(envelope)
}

/// Decrypt an envelope produced by [`encrypt`] at the same level.
///
/// Returns the full original plaintext or an error; never a partial result.
pub fn decrypt(recipient: &PrivateKey, envelope: &[u8], level: SecurityLevel) -> Result<Vec<u8>> {
    tracing::trace!(?level, envelope_len = envelope.len(), "opening envelope");

    let (&key_len, rest) = envelope.split_first().ok_or(Error::MalformedInput)?;
    let key_len = key_len as usize;
    if rest.len() < key_len {
        return Err(Error::MalformedInput);
    }
    let (eph_bytes, ct) = rest.split_at(key_len);
    if ct.len() < IV_SIZE + MAC_TAG_SIZE {
        return Err(Error::MalformedInput);
    }

    let ephemeral = PublicKey::from_sec1_bytes(eph_bytes)?;
    let secret = agree::agree(&recipient.scalar(), ephemeral.as_affine())?;
    let keys = agree::derive(secret.as_bytes(), level);

    let (body, tag) = ct.split_at(ct.len() - MAC_TAG_SIZE);
    if !mac::verify(keys.mac_key(), &[body], tag) {
        return Err(Error::Authentication);
    }

    let (iv, sealed) = body.split_at(IV_SIZE);
    let mut padded = aead::open(level, keys.enc_key(), iv, sealed)?;

    let plaintext = match padding::unpad(&padded) {
        Ok(stripped) => stripped.to_vec(),
        Err(e) => {
            padded.zeroize();
            return Err(e);
        }
    };
    padded.zeroize();
    Ok(plaintext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BLOCK_SIZE, GCM_TAG_SIZE, NONCE_SIZE, PUBLIC_KEY_SIZE};
    use proptest::prelude::*;

    /// Counter-pattern RNG: every draw continues the byte sequence
    /// seed, seed+1, ... so envelopes are exactly reproducible.
    struct FixedRng {
        next: u8,
    }

    impl FixedRng {
        fn new(seed: u8) -> Self {
            Self { next: seed }
        }
    }

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            let mut bytes = [0u8; 4];
            self.fill_bytes(&mut bytes);
            u32::from_le_bytes(bytes)
        }

        fn next_u64(&mut self) -> u64 {
            let mut bytes = [0u8; 8];
            self.fill_bytes(&mut bytes);
            u64::from_le_bytes(bytes)
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for byte in dest.iter_mut() {
                *byte = self.next;
                self.next = self.next.wrapping_add(1);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    impl rand::CryptoRng for FixedRng {}

    fn envelope_len(plaintext_len: usize) -> usize {
        let padded = plaintext_len + (BLOCK_SIZE - plaintext_len % BLOCK_SIZE);
        1 + PUBLIC_KEY_SIZE + IV_SIZE + NONCE_SIZE + padded + GCM_TAG_SIZE + MAC_TAG_SIZE
    }

    #[test]
    fn roundtrip_both_levels() {
        let pair = KeyPair::generate();
        for level in [SecurityLevel::Standard, SecurityLevel::High] {
            let envelope = encrypt(&pair.public, b"attack at dawn", level).unwrap();
            let plaintext = decrypt(&pair.private, &envelope, level).unwrap();
            assert_eq!(plaintext, b"attack at dawn");
        }
    }

    #[test]
    fn roundtrip_empty_plaintext() {
        let pair = KeyPair::generate();
        for level in [SecurityLevel::Standard, SecurityLevel::High] {
            let envelope = encrypt(&pair.public, b"", level).unwrap();
            assert_eq!(envelope.len(), envelope_len(0));
            assert_eq!(decrypt(&pair.private, &envelope, level).unwrap(), b"");
        }
    }

    #[test]
    fn layout_of_sealed_envelope() {
        let pair = KeyPair::generate();
        // 16-byte plaintext pads to 32
        let envelope = encrypt(&pair.public, &[0x5Au8; 16], SecurityLevel::High).unwrap();

        assert_eq!(envelope.len(), envelope_len(16));
        assert_eq!(envelope[0] as usize, PUBLIC_KEY_SIZE);
        assert_eq!(envelope[1], 0x04, "uncompressed SEC1 prefix");
    }

    #[test]
    fn fresh_randomness_every_call() {
        let pair = KeyPair::generate();
        let a = encrypt(&pair.public, b"same input", SecurityLevel::Standard).unwrap();
        let b = encrypt(&pair.public, b"same input", SecurityLevel::Standard).unwrap();
        assert_ne!(a, b, "ephemeral key and nonces must differ per call");
    }

    #[test]
    fn deterministic_rng_reproduces_envelope_exactly() {
        let recipient = KeyPair::generate_with_rng(&mut FixedRng::new(0xA0));
        let plaintext = b"fixed vector input";

        let first = encrypt_with_rng(
            &mut FixedRng::new(7),
            &recipient.public,
            plaintext,
            SecurityLevel::High,
        )
        .unwrap();
        let second = encrypt_with_rng(
            &mut FixedRng::new(7),
            &recipient.public,
            plaintext,
            SecurityLevel::High,
        )
        .unwrap();

        assert_eq!(first, second, "same RNG stream must give identical bytes");
        assert_eq!(
            decrypt(&recipient.private, &first, SecurityLevel::High).unwrap(),
            plaintext
        );

        // Replay the stream: the ephemeral scalar consumes the first 32
        // bytes, then the outer IV and GCM nonce follow in order.
        let mut replay = FixedRng::new(7);
        let mut scalar = [0u8; 32];
        replay.fill_bytes(&mut scalar);
        let mut iv = [0u8; IV_SIZE];
        replay.fill_bytes(&mut iv);
        let mut nonce = [0u8; NONCE_SIZE];
        replay.fill_bytes(&mut nonce);

        let iv_start = 1 + PUBLIC_KEY_SIZE;
        assert_eq!(&first[iv_start..iv_start + IV_SIZE], &iv);
        let nonce_start = iv_start + IV_SIZE;
        assert_eq!(&first[nonce_start..nonce_start + NONCE_SIZE], &nonce);
    }

    #[test]
    fn different_rng_seeds_diverge() {
        let recipient = KeyPair::generate();
        let a = encrypt_with_rng(
            &mut FixedRng::new(1),
            &recipient.public,
            b"input",
            SecurityLevel::Standard,
        )
        .unwrap();
        let b = encrypt_with_rng(
            &mut FixedRng::new(2),
            &recipient.public,
            b"input",
            SecurityLevel::Standard,
        )
        .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn any_flipped_bit_after_key_is_rejected() {
        let pair = KeyPair::generate();
        let envelope = encrypt(&pair.public, b"attack at dawn", SecurityLevel::Standard).unwrap();

        // Everything past the ephemeral key: outer IV, GCM nonce,
        // ciphertext, GCM tag, outer MAC.
        for index in (1 + PUBLIC_KEY_SIZE)..envelope.len() {
            let mut tampered = envelope.clone();
            tampered[index] ^= 0x01;
            assert_eq!(
                decrypt(&pair.private, &tampered, SecurityLevel::Standard).unwrap_err(),
                Error::Authentication,
                "bit flip at byte {index} must fail authentication"
            );
        }
    }

    #[test]
    fn wrong_private_key_is_rejected() {
        let pair = KeyPair::generate();
        let other = KeyPair::generate();
        let envelope = encrypt(&pair.public, b"for the right holder", SecurityLevel::High).unwrap();
        assert_eq!(
            decrypt(&other.private, &envelope, SecurityLevel::High).unwrap_err(),
            Error::Authentication
        );
    }

    #[test]
    fn mismatched_level_is_rejected() {
        let pair = KeyPair::generate();
        let envelope = encrypt(&pair.public, b"level bound", SecurityLevel::High).unwrap();
        assert_eq!(
            decrypt(&pair.private, &envelope, SecurityLevel::Standard).unwrap_err(),
            Error::Authentication
        );
    }

    #[test]
    fn short_envelopes_are_malformed_not_panics() {
        let pair = KeyPair::generate();
        // Structural minimum is 1 length byte + 16 IV + 20 tag
        for len in 0..(1 + IV_SIZE + MAC_TAG_SIZE) {
            let short = vec![0u8; len];
            assert_eq!(
                decrypt(&pair.private, &short, SecurityLevel::Standard).unwrap_err(),
                Error::MalformedInput,
                "length {len}"
            );
        }
    }

    #[test]
    fn declared_key_length_overrunning_buffer_is_malformed() {
        let pair = KeyPair::generate();
        let envelope = [200u8, 1, 2, 3];
        assert_eq!(
            decrypt(&pair.private, &envelope, SecurityLevel::Standard).unwrap_err(),
            Error::MalformedInput
        );
    }

    #[test]
    fn truncated_ciphertext_after_valid_key_is_malformed() {
        let pair = KeyPair::generate();
        let eph = KeyPair::generate();

        let mut envelope = vec![PUBLIC_KEY_SIZE as u8];
        envelope.extend_from_slice(&eph.public.to_sec1_bytes());
        envelope.extend_from_slice(&[0u8; IV_SIZE + MAC_TAG_SIZE - 1]);
        assert_eq!(
            decrypt(&pair.private, &envelope, SecurityLevel::Standard).unwrap_err(),
            Error::MalformedInput
        );
    }

    #[test]
    fn off_curve_ephemeral_key_is_invalid_point() {
        let pair = KeyPair::generate();

        let mut envelope = vec![PUBLIC_KEY_SIZE as u8];
        envelope.extend_from_slice(&[0xAAu8; PUBLIC_KEY_SIZE]);
        envelope.extend_from_slice(&[0u8; IV_SIZE + NONCE_SIZE + GCM_TAG_SIZE + MAC_TAG_SIZE]);
        assert_eq!(
            decrypt(&pair.private, &envelope, SecurityLevel::Standard).unwrap_err(),
            Error::InvalidPoint
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn roundtrip_arbitrary_plaintext(
            plaintext in proptest::collection::vec(any::<u8>(), 0..=512),
            high in any::<bool>(),
        ) {
            let level = if high { SecurityLevel::High } else { SecurityLevel::Standard };
            let pair = KeyPair::generate();

            let envelope = encrypt(&pair.public, &plaintext, level).unwrap();
            prop_assert_eq!(envelope.len(), envelope_len(plaintext.len()));

            let opened = decrypt(&pair.private, &envelope, level).unwrap();
            prop_assert_eq!(opened, plaintext);
        }
    }
}
