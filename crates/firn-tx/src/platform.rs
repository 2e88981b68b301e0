//! Platform-chain staking transaction.
//!
//! The platform chain uses an account/nonce model: no input or output
//! vectors, and a single payer signature instead of a credentials array.

use crate::wire::{put_u32, put_u64, Cursor};
use crate::TxError;
use firn_types::constants::platform_tx_type;
use firn_types::ids::{ShortId, Signature};

/// Registers a delegation of stake to a validator on the default subnet.
///
/// Wire layout after the u32 type tag: `node_id`, `weight`, `start_time`,
/// `end_time`, `network_id`, `nonce`, `destination`. All numeric fields
/// are full-width u64 except `network_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddDefaultSubnetDelegatorTx {
    pub node_id: ShortId,
    pub weight: u64,
    pub start_time: u64,
    pub end_time: u64,
    pub network_id: u32,
    pub nonce: u64,
    pub destination: ShortId,
}

impl AddDefaultSubnetDelegatorTx {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        node_id: ShortId,
        weight: u64,
        start_time: u64,
        end_time: u64,
        network_id: u32,
        nonce: u64,
        destination: ShortId,
    ) -> Self {
        Self {
            node_id,
            weight,
            start_time,
            end_time,
            network_id,
            nonce,
            destination,
        }
    }

    fn decode(c: &mut Cursor) -> Result<Self, TxError> {
        let node_id = c.read_short_id()?;
        let weight = c.read_u64()?;
        let start_time = c.read_u64()?;
        let end_time = c.read_u64()?;
        let network_id = c.read_u32()?;
        let nonce = c.read_u64()?;
        let destination = c.read_short_id()?;
        Ok(Self {
            node_id,
            weight,
            start_time,
            end_time,
            network_id,
            nonce,
            destination,
        })
    }

    fn encode(&self, buf: &mut Vec<u8>) {
        put_u32(buf, platform_tx_type::ADD_DEFAULT_SUBNET_DELEGATOR);
        buf.extend_from_slice(self.node_id.as_bytes());
        put_u64(buf, self.weight);
        put_u64(buf, self.start_time);
        put_u64(buf, self.end_time);
        put_u32(buf, self.network_id);
        put_u64(buf, self.nonce);
        buf.extend_from_slice(self.destination.as_bytes());
    }

    /// The canonical serialized form: what the payer's key signs over.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode(&mut buf);
        buf
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, TxError> {
        let mut c = Cursor::new(data);
        let id = c.read_u32()?;
        if id != platform_tx_type::ADD_DEFAULT_SUBNET_DELEGATOR {
            return Err(TxError::UnknownTypeId {
                domain: "platform_tx",
                id,
            });
        }
        let tx = Self::decode(&mut c)?;
        c.finish()?;
        Ok(tx)
    }
}

/// A signed platform-chain transaction: the unsigned bytes followed by
/// one 65-byte recoverable signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedDelegatorTx {
    pub unsigned: AddDefaultSubnetDelegatorTx,
    pub signature: Signature,
}

impl SignedDelegatorTx {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = self.unsigned.to_bytes();
        buf.extend_from_slice(self.signature.as_bytes());
        buf
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, TxError> {
        let mut c = Cursor::new(data);
        let id = c.read_u32()?;
        if id != platform_tx_type::ADD_DEFAULT_SUBNET_DELEGATOR {
            return Err(TxError::UnknownTypeId {
                domain: "platform_tx",
                id,
            });
        }
        let unsigned = AddDefaultSubnetDelegatorTx::decode(&mut c)?;
        let signature = c.read_signature()?;
        c.finish()?;
        Ok(Self {
            unsigned,
            signature,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tx() -> AddDefaultSubnetDelegatorTx {
        AddDefaultSubnetDelegatorTx::new(
            ShortId([0x6e; 20]),
            2000,
            1_600_000_000,
            1_602_592_000,
            3,
            7,
            ShortId([0xdd; 20]),
        )
    }

    #[test]
    fn test_fixed_layout() {
        let bytes = sample_tx().to_bytes();
        // tag, node id, weight, start, end, network id, nonce, destination
        assert_eq!(bytes.len(), 4 + 20 + 8 + 8 + 8 + 4 + 8 + 20);
        assert_eq!(&bytes[..4], &[0x00, 0x00, 0x00, 0x0e]);
        assert_eq!(&bytes[24..32], &2000u64.to_be_bytes());
        assert_eq!(&bytes[48..52], &[0x00, 0x00, 0x00, 0x03]);
        assert_eq!(&bytes[60..80], &[0xdd; 20]);
    }

    #[test]
    fn test_unsigned_roundtrip() {
        let tx = sample_tx();
        assert_eq!(
            AddDefaultSubnetDelegatorTx::from_bytes(&tx.to_bytes()).unwrap(),
            tx
        );
    }

    #[test]
    fn test_signed_roundtrip() {
        let signed = SignedDelegatorTx {
            unsigned: sample_tx(),
            signature: Signature([0x5c; 65]),
        };
        let bytes = signed.to_bytes();
        assert_eq!(bytes.len(), 80 + 65);
        assert_eq!(SignedDelegatorTx::from_bytes(&bytes).unwrap(), signed);
    }

    #[test]
    fn test_unknown_platform_tag() {
        let mut bytes = sample_tx().to_bytes();
        bytes[3] = 0x01;
        assert!(matches!(
            AddDefaultSubnetDelegatorTx::from_bytes(&bytes).unwrap_err(),
            TxError::UnknownTypeId {
                domain: "platform_tx",
                id: 1
            }
        ));
    }
}
