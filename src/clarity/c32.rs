//! c32check decoding for Stacks addresses
//!
//! An address is `S` + version character + c32(hash160 ‖ checksum), where the
//! checksum is the first four bytes of `sha256(sha256(version ‖ hash160))`.

use num_bigint::BigUint;
use num_traits::Zero;
use sha2::{Digest, Sha256};
use thiserror::Error;

const C32_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// hash160 plus the four checksum bytes
const DECODED_LEN: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum C32Error {
    #[error("address must start with 'S'")]
    InvalidPrefix,

    #[error("invalid c32 character {0:?}")]
    InvalidCharacter(char),

    #[error("decoded payload is {0} bytes, expected {DECODED_LEN}")]
    InvalidLength(usize),

    #[error("checksum mismatch")]
    ChecksumMismatch,
}

/// A decoded standard principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardPrincipal {
    pub version: u8,
    pub hash160: [u8; 20],
}

/// Decode a Stacks address such as `SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7`.
pub fn decode_address(address: &str) -> Result<StandardPrincipal, C32Error> {
    let rest = address.strip_prefix('S').ok_or(C32Error::InvalidPrefix)?;

    let mut chars = rest.chars();
    let version = match chars.next() {
        Some(c) => c32_digit(c)?,
        None => return Err(C32Error::InvalidLength(0)),
    };

    let payload = c32_decode(chars.as_str())?;
    if payload.len() != DECODED_LEN {
        return Err(C32Error::InvalidLength(payload.len()));
    }

    let (hash, checksum) = payload.split_at(20);
    if checksum != &c32_checksum(version, hash)[..] {
        return Err(C32Error::ChecksumMismatch);
    }

    let mut hash160 = [0u8; 20];
    hash160.copy_from_slice(hash);

    Ok(StandardPrincipal { version, hash160 })
}

/// Decode a c32 string into bytes. Every leading `0` character stands for
/// one leading zero byte.
fn c32_decode(input: &str) -> Result<Vec<u8>, C32Error> {
    let digits = input.chars().map(c32_digit).collect::<Result<Vec<_>, _>>()?;

    let leading_zeros = digits.iter().take_while(|&&d| d == 0).count();

    let value = BigUint::from_radix_be(&digits, 32).unwrap_or_default();
    let mut bytes = vec![0u8; leading_zeros];
    if !value.is_zero() {
        bytes.extend(value.to_bytes_be());
    }

    Ok(bytes)
}

fn c32_digit(c: char) -> Result<u8, C32Error> {
    // Crockford-style normalisation of easily confused characters
    let normalized = match c.to_ascii_uppercase() {
        'O' => '0',
        'L' | 'I' => '1',
        other => other,
    };

    C32_ALPHABET
        .iter()
        .position(|&a| a as char == normalized)
        .map(|p| p as u8)
        .ok_or(C32Error::InvalidCharacter(c))
}

fn c32_checksum(version: u8, hash160: &[u8]) -> [u8; 4] {
    let mut hasher = Sha256::new();
    hasher.update([version]);
    hasher.update(hash160);
    let first = hasher.finalize();
    let second = Sha256::digest(first);

    let mut checksum = [0u8; 4];
    checksum.copy_from_slice(&second[..4]);
    checksum
}
