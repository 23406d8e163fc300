//! HMAC-SHA1 trailer tags
//!
//! The envelope format fixes the outer MAC at HMAC-SHA1 with a 160-bit tag.
//! That digest is weaker than the rest of the scheme; changing it would
//! change the wire format, so it stays. Verification is constant-time.

use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::MAC_TAG_SIZE;

type HmacSha1 = Hmac<Sha1>;

/// MAC over the concatenation of `parts`.
pub fn tag(key: &[u8], parts: &[&[u8]]) -> [u8; MAC_TAG_SIZE] {
    let mut mac = HmacSha1::new_from_slice(key).expect("HMAC accepts keys of any length");
    for part in parts {
        mac.update(part);
    }
    mac.finalize().into_bytes().into()
}

/// Constant-time tag check. Never short-circuits on a byte mismatch.
pub fn verify(key: &[u8], parts: &[&[u8]], expected: &[u8]) -> bool {
    let mut mac = HmacSha1::new_from_slice(key).expect("HMAC accepts keys of any length");
    for part in parts {
        mac.update(part);
    }
    mac.verify_slice(expected).is_ok()
}
