//! Fixed-width identifiers used across the Firn chains.
//!
//! All identifiers are opaque byte strings of fixed length. Ordering and
//! equality are plain byte comparisons; the wire form is the value itself.

use crate::constants::{ID_LEN, SHORT_ID_LEN, SIGNATURE_LEN};
use std::fmt;

/// A 32-byte identifier: transaction ids, asset ids, blockchain ids.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Id(pub [u8; ID_LEN]);

impl Id {
    pub const fn empty() -> Self {
        Self([0u8; ID_LEN])
    }

    /// Build from a slice; `None` unless it is exactly 32 bytes.
    pub fn from_slice(data: &[u8]) -> Option<Self> {
        let bytes: [u8; ID_LEN] = data.try_into().ok()?;
        Some(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; ID_LEN] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == [0u8; ID_LEN]
    }
}

impl From<[u8; ID_LEN]> for Id {
    fn from(bytes: [u8; ID_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", hex::encode(self.0))
    }
}

/// A 20-byte identifier: payment addresses and node ids.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ShortId(pub [u8; SHORT_ID_LEN]);

impl ShortId {
    pub const fn empty() -> Self {
        Self([0u8; SHORT_ID_LEN])
    }

    /// Build from a slice; `None` unless it is exactly 20 bytes.
    pub fn from_slice(data: &[u8]) -> Option<Self> {
        let bytes: [u8; SHORT_ID_LEN] = data.try_into().ok()?;
        Some(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; SHORT_ID_LEN] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == [0u8; SHORT_ID_LEN]
    }
}

impl From<[u8; SHORT_ID_LEN]> for ShortId {
    fn from(bytes: [u8; SHORT_ID_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for ShortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for ShortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShortId({})", hex::encode(self.0))
    }
}

/// Reference to a consumable UTXO: the transaction that created it plus
/// the index of the output within that transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtxoId {
    pub tx_id: Id,
    pub output_index: u32,
}

impl UtxoId {
    pub fn new(tx_id: Id, output_index: u32) -> Self {
        Self { tx_id, output_index }
    }
}

/// A 65-byte recoverable ECDSA signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub [u8; SIGNATURE_LEN]);

impl Signature {
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }
}

impl From<[u8; SIGNATURE_LEN]> for Signature {
    fn from(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", hex::encode(self.0))
    }
}
