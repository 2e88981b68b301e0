//! Human-readable Firn addresses.
//!
//! An address string is the chain alias, a dash, then the Base58-check
//! encoding of the 20-byte payment address: `X-2qvyZKcPVRo6KJYeUG...`.
//! The alias names the chain the address lives on ("X" for the asset
//! chain, "P" for the platform chain).

use crate::base58;
use crate::constants::SHORT_ID_LEN;
use crate::ids::ShortId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("address must be a non-empty string")]
    Empty,

    #[error("missing chain alias separator '-'")]
    MissingSeparator,

    #[error("base58 decode error: {0}")]
    Base58(#[from] base58::Base58Error),

    #[error("invalid address payload: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// Render a 20-byte address as a chain-qualified string.
pub fn format_address(chain_alias: &str, address: &ShortId) -> String {
    format!(
        "{}-{}",
        chain_alias,
        base58::encode_with_checksum(address.as_bytes())
    )
}

/// Parse a chain-qualified address string into its alias and 20-byte id.
pub fn parse_address(address: &str) -> Result<(&str, ShortId), AddressError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(AddressError::Empty);
    }

    let (alias, encoded) = address
        .split_once('-')
        .ok_or(AddressError::MissingSeparator)?;
    let payload = base58::decode_with_checksum(encoded)?;
    let short = ShortId::from_slice(&payload).ok_or(AddressError::InvalidLength {
        expected: SHORT_ID_LEN,
        actual: payload.len(),
    })?;

    Ok((alias, short))
}
