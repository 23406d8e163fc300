//! Block-16 padding
//!
//! Every plaintext is padded to a 16-byte boundary before sealing, even
//! though AES-GCM itself needs no alignment — the padding is part of the
//! wire format. Each pad byte holds the pad count, so an already-aligned
//! message gains a full extra block (count range 1..=16). Removal trusts
//! only the trailing byte and rejects counts of 0 or above 16.

use crate::error::{Error, Result};
use crate::BLOCK_SIZE;

/// Append padding up to the next block boundary.
pub fn pad(message: &[u8]) -> Vec<u8> {
    let fill = BLOCK_SIZE - message.len() % BLOCK_SIZE;
    let mut out = Vec::with_capacity(message.len() + fill);
    out.extend_from_slice(message);
    out.resize(message.len() + fill, fill as u8);
    out
}

/// Strip the padding added by [`pad`].
pub fn unpad(buf: &[u8]) -> Result<&[u8]> {
    let count = *buf.last().ok_or(Error::Padding)? as usize;
    if count == 0 || count > BLOCK_SIZE || count > buf.len() {
        return Err(Error::Padding);
    }
    Ok(&buf[..buf.len() - count])
}
