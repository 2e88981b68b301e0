//! Base58 encoding with a double-SHA-256 checksum.
//!
//! The string form of transactions and UTXOs appends the first 4 bytes of
//! SHA-256(SHA-256(payload)) to the payload before Base58 encoding, so a
//! single corrupted character is caught at decode time.

use crate::constants::CHECKSUM_LEN;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Base58 alphabet (Bitcoin variant: no 0, O, I, l).
const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Base58Error {
    #[error("invalid character '{0}' at position {1}")]
    InvalidCharacter(char, usize),

    #[error("decoded payload too short ({0} bytes, need at least 4)")]
    TooShort(usize),

    #[error("checksum mismatch")]
    ChecksumMismatch,
}

/// Build reverse alphabet lookup table at compile time. -1 = invalid.
const fn build_reverse_alphabet() -> [i8; 128] {
    let mut table = [-1i8; 128];
    let mut i = 0;
    while i < 58 {
        table[ALPHABET[i] as usize] = i as i8;
        i += 1;
    }
    table
}

static REVERSE_ALPHABET: [i8; 128] = build_reverse_alphabet();

fn sha256d(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    Sha256::digest(first).into()
}

/// Encode binary data to Base58.
pub fn encode(data: &[u8]) -> String {
    let zeros = data.iter().take_while(|&&b| b == 0).count();

    // Base-256 to base-58 digit conversion, least-significant digit first.
    let mut digits: Vec<u8> = Vec::with_capacity(data.len() * 138 / 100 + 1);
    for &byte in &data[zeros..] {
        let mut carry = byte as u32;
        for digit in digits.iter_mut() {
            carry += (*digit as u32) << 8;
            *digit = (carry % 58) as u8;
            carry /= 58;
        }
        while carry > 0 {
            digits.push((carry % 58) as u8);
            carry /= 58;
        }
    }

    let mut result = String::with_capacity(zeros + digits.len());
    for _ in 0..zeros {
        result.push('1');
    }
    for &digit in digits.iter().rev() {
        result.push(ALPHABET[digit as usize] as char);
    }
    result
}

/// Decode a Base58 string to binary data.
pub fn decode(encoded: &str) -> Result<Vec<u8>, Base58Error> {
    let bytes = encoded.as_bytes();
    let zeros = bytes.iter().take_while(|&&c| c == b'1').count();

    let mut result: Vec<u8> = Vec::with_capacity(bytes.len() * 733 / 1000 + 1);
    for (i, &ch) in bytes.iter().enumerate() {
        if ch >= 128 {
            return Err(Base58Error::InvalidCharacter(ch as char, i));
        }
        let digit = REVERSE_ALPHABET[ch as usize];
        if digit < 0 {
            return Err(Base58Error::InvalidCharacter(ch as char, i));
        }

        let mut carry = digit as u32;
        for byte in result.iter_mut() {
            carry += (*byte as u32) * 58;
            *byte = (carry & 0xff) as u8;
            carry >>= 8;
        }
        while carry > 0 {
            result.push((carry & 0xff) as u8);
            carry >>= 8;
        }
    }

    result.extend(std::iter::repeat(0u8).take(zeros));
    result.reverse();
    Ok(result)
}

/// Encode with a 4-byte double-SHA-256 checksum appended to the payload.
pub fn encode_with_checksum(payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    data.extend_from_slice(payload);
    let hash = sha256d(payload);
    data.extend_from_slice(&hash[..CHECKSUM_LEN]);
    encode(&data)
}

/// Decode and verify the trailing 4-byte checksum, returning the payload.
pub fn decode_with_checksum(encoded: &str) -> Result<Vec<u8>, Base58Error> {
    let decoded = decode(encoded)?;
    if decoded.len() < CHECKSUM_LEN {
        return Err(Base58Error::TooShort(decoded.len()));
    }

    let (payload, checksum) = decoded.split_at(decoded.len() - CHECKSUM_LEN);
    let hash = sha256d(payload);
    if &hash[..CHECKSUM_LEN] != checksum {
        return Err(Base58Error::ChecksumMismatch);
    }

    Ok(payload.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_known_vector() {
        assert_eq!(encode(b"hello world"), "StV1DL6CwTryKyV");
    }

    #[test]
    fn test_leading_zeros() {
        let data = [0u8, 0, 0, 1, 2, 3];
        let encoded = encode(&data);
        assert!(encoded.starts_with("111"));
        assert_eq!(decode(&encoded).unwrap(), data);
    }

    #[test]
    fn test_roundtrip() {
        let data: Vec<u8> = (0..=255u8).collect();
        assert_eq!(decode(&encode(&data)).unwrap(), data);

        assert_eq!(encode(&[]), "");
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_invalid_character() {
        assert_eq!(
            decode("abcO"),
            Err(Base58Error::InvalidCharacter('O', 3))
        );
        assert_eq!(
            decode("ab0c"),
            Err(Base58Error::InvalidCharacter('0', 2))
        );
    }

    #[test]
    fn test_checksum_roundtrip() {
        let payload = vec![0xabu8; 37];
        let encoded = encode_with_checksum(&payload);
        assert_eq!(decode_with_checksum(&encoded).unwrap(), payload);
    }

    #[test]
    fn test_checksum_mismatch() {
        let payload = vec![0x42u8; 24];
        let encoded = encode_with_checksum(&payload);

        // Flip each character in turn to another valid alphabet character.
        for i in 0..encoded.len() {
            let mut corrupted: Vec<u8> = encoded.as_bytes().to_vec();
            corrupted[i] = if corrupted[i] == b'1' { b'2' } else { b'1' };
            let corrupted = String::from_utf8(corrupted).unwrap();
            assert_eq!(
                decode_with_checksum(&corrupted),
                Err(Base58Error::ChecksumMismatch),
                "corruption at position {} went undetected",
                i
            );
        }
    }

    #[test]
    fn test_checksum_too_short() {
        assert_eq!(decode_with_checksum("1"), Err(Base58Error::TooShort(1)));
    }
}
