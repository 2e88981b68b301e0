//! Firn network constants and wire type-tag registries.
//!
//! The registries are closed sets: every tag the codec will ever accept is
//! enumerated here. Adding a kind is a source-level change.

use serde::{Deserialize, Serialize};

/// Length of a full identifier (transaction, asset, blockchain ids).
pub const ID_LEN: usize = 32;

/// Length of a short identifier (addresses, node ids).
pub const SHORT_ID_LEN: usize = 20;

/// Length of a recoverable ECDSA signature.
pub const SIGNATURE_LEN: usize = 65;

/// Checksum bytes appended before Base58 encoding.
pub const CHECKSUM_LEN: usize = 4;

/// Largest allowed asset denomination.
pub const MAX_DENOMINATION: u8 = 32;

/// Asset-chain transaction type tags.
pub mod tx_type {
    pub const BASE: u32 = 0x0000_0000;
    pub const CREATE_ASSET: u32 = 0x0000_0001;
    pub const OPERATION: u32 = 0x0000_0002;
    pub const IMPORT: u32 = 0x0000_0003;
    pub const EXPORT: u32 = 0x0000_0004;
}

/// Platform-chain transaction type tags (separate registry domain).
pub mod platform_tx_type {
    pub const ADD_DEFAULT_SUBNET_DELEGATOR: u32 = 0x0000_000e;
}

/// Input type tags.
pub mod input_type {
    pub const SECP_TRANSFER: u32 = 0x0000_0005;
}

/// Output type tags.
pub mod output_type {
    pub const SECP_MINT: u32 = 0x0000_0006;
    pub const SECP_TRANSFER: u32 = 0x0000_0007;
    pub const NFT_MINT: u32 = 0x0000_000a;
    pub const NFT_TRANSFER: u32 = 0x0000_000b;
}

/// Operation type tags.
pub mod op_type {
    pub const SECP_MINT: u32 = 0x0000_0008;
    pub const NFT_MINT: u32 = 0x0000_000c;
    pub const NFT_TRANSFER: u32 = 0x0000_000d;
}

/// Credential type tags.
pub mod credential_type {
    pub const SECP256K1: u32 = 0x0000_0009;
    pub const NFT: u32 = 0x0000_000e;
}

/// Network identifier. Both parties of a transaction must agree; the
/// network rejects a mismatched id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    Mainnet,
    Testnet,
    Local,
}

impl Network {
    /// The on-wire network id.
    pub fn id(self) -> u32 {
        match self {
            Network::Mainnet => 1,
            Network::Testnet => 3,
            Network::Local => 12345,
        }
    }

    pub fn from_id(id: u32) -> Option<Network> {
        match id {
            1 => Some(Network::Mainnet),
            3 => Some(Network::Testnet),
            12345 => Some(Network::Local),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_id_roundtrip() {
        for net in [Network::Mainnet, Network::Testnet, Network::Local] {
            assert_eq!(Network::from_id(net.id()), Some(net));
        }
        assert_eq!(Network::from_id(999), None);
    }
}
