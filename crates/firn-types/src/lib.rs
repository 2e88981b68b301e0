//! Core types and constants for the Firn network.
//!
//! This crate provides the foundational types used across all Firn SDK
//! crates: fixed-width identifiers, Base58-with-checksum string encoding,
//! human-readable addresses, network ids, and the wire type-tag registries.

pub mod address;
pub mod base58;
pub mod constants;
pub mod ids;

pub use constants::Network;
pub use ids::{Id, ShortId, Signature, UtxoId};
