//! Asset-chain output kinds and the transferable wrapper.
//!
//! Every output is a tagged wire element: a u32 type id followed by a
//! kind-specific payload. The canonical form (tag plus payload) is also
//! the sort key the network expects for the header's output section.

use crate::wire::{put_u32, put_u64, Cursor};
use crate::TxError;
use firn_types::base58;
use firn_types::constants::{output_type, SHORT_ID_LEN};
use firn_types::ids::{Id, ShortId, UtxoId};
use std::cmp::Ordering;
use std::fmt;

/// Owner group shared by every output kind: the addresses that may spend
/// the output, how many of them must sign, and the time before which none
/// of them can.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputOwners {
    pub locktime: u64,
    pub threshold: u32,
    pub addresses: Vec<ShortId>,
}

impl OutputOwners {
    pub fn new(locktime: u64, threshold: u32, addresses: Vec<ShortId>) -> Self {
        Self {
            locktime,
            threshold,
            addresses,
        }
    }

    pub(crate) fn decode(c: &mut Cursor) -> Result<Self, TxError> {
        let locktime = c.read_u64()?;
        let threshold = c.read_u32()?;
        let (count, capacity) = c.read_count(SHORT_ID_LEN)?;
        let mut addresses = Vec::with_capacity(capacity);
        for _ in 0..count {
            addresses.push(c.read_short_id()?);
        }
        Ok(Self {
            locktime,
            threshold,
            addresses,
        })
    }

    pub(crate) fn encode(&self, buf: &mut Vec<u8>) {
        put_u64(buf, self.locktime);
        put_u32(buf, self.threshold);
        put_u32(buf, self.addresses.len() as u32);
        for address in &self.addresses {
            buf.extend_from_slice(address.as_bytes());
        }
    }
}

/// Output payload, discriminated on the wire by its type id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Grants the right to mint more of a fungible asset.
    SecpMint { owners: OutputOwners },
    /// A spendable amount of a fungible asset.
    SecpTransfer { amount: u64, owners: OutputOwners },
    /// Grants the right to mint NFTs into a group.
    NftMint { group_id: u32, owners: OutputOwners },
    /// An NFT: a group id plus an opaque payload.
    NftTransfer {
        group_id: u32,
        payload: Vec<u8>,
        owners: OutputOwners,
    },
}

impl Output {
    pub fn type_id(&self) -> u32 {
        match self {
            Output::SecpMint { .. } => output_type::SECP_MINT,
            Output::SecpTransfer { .. } => output_type::SECP_TRANSFER,
            Output::NftMint { .. } => output_type::NFT_MINT,
            Output::NftTransfer { .. } => output_type::NFT_TRANSFER,
        }
    }

    pub fn owners(&self) -> &OutputOwners {
        match self {
            Output::SecpMint { owners }
            | Output::SecpTransfer { owners, .. }
            | Output::NftMint { owners, .. }
            | Output::NftTransfer { owners, .. } => owners,
        }
    }

    pub(crate) fn decode(c: &mut Cursor) -> Result<Self, TxError> {
        let id = c.read_u32()?;
        match id {
            output_type::SECP_MINT => Ok(Output::SecpMint {
                owners: OutputOwners::decode(c)?,
            }),
            output_type::SECP_TRANSFER => {
                let amount = c.read_u64()?;
                let owners = OutputOwners::decode(c)?;
                Ok(Output::SecpTransfer { amount, owners })
            }
            output_type::NFT_MINT => {
                let group_id = c.read_u32()?;
                let owners = OutputOwners::decode(c)?;
                Ok(Output::NftMint { group_id, owners })
            }
            output_type::NFT_TRANSFER => {
                let group_id = c.read_u32()?;
                let len = c.read_u32()? as usize;
                let payload = c.read_bytes(len)?.to_vec();
                let owners = OutputOwners::decode(c)?;
                Ok(Output::NftTransfer {
                    group_id,
                    payload,
                    owners,
                })
            }
            id => Err(TxError::UnknownTypeId {
                domain: "output",
                id,
            }),
        }
    }

    /// Canonical form: u32 type id followed by the payload.
    pub(crate) fn encode(&self, buf: &mut Vec<u8>) {
        put_u32(buf, self.type_id());
        match self {
            Output::SecpMint { owners } => owners.encode(buf),
            Output::SecpTransfer { amount, owners } => {
                put_u64(buf, *amount);
                owners.encode(buf);
            }
            Output::NftMint { group_id, owners } => {
                put_u32(buf, *group_id);
                owners.encode(buf);
            }
            Output::NftTransfer {
                group_id,
                payload,
                owners,
            } => {
                put_u32(buf, *group_id);
                put_u32(buf, payload.len() as u32);
                buf.extend_from_slice(payload);
                owners.encode(buf);
            }
        }
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode(&mut buf);
        buf
    }
}

/// An output bound to the asset it denominates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferableOutput {
    pub asset_id: Id,
    pub output: Output,
}

impl TransferableOutput {
    pub fn new(asset_id: Id, output: Output) -> Self {
        Self { asset_id, output }
    }

    pub(crate) fn decode(c: &mut Cursor) -> Result<Self, TxError> {
        let asset_id = c.read_id()?;
        let output = Output::decode(c)?;
        Ok(Self { asset_id, output })
    }

    pub(crate) fn encode(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.asset_id.as_bytes());
        self.output.encode(buf);
    }

    /// The network's sort key: the full encoded form.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode(&mut buf);
        buf
    }

    /// Lexicographic order over the canonical form. Stable across
    /// implementations; all sorts of the output section delegate here.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.canonical_bytes().cmp(&other.canonical_bytes())
    }
}

/// A single unspent output, as enumerated by a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utxo {
    pub utxo_id: UtxoId,
    pub asset_id: Id,
    pub output: Output,
}

impl Utxo {
    pub fn new(utxo_id: UtxoId, asset_id: Id, output: Output) -> Self {
        Self {
            utxo_id,
            asset_id,
            output,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(self.utxo_id.tx_id.as_bytes());
        put_u32(&mut buf, self.utxo_id.output_index);
        buf.extend_from_slice(self.asset_id.as_bytes());
        self.output.encode(&mut buf);
        buf
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, TxError> {
        let mut c = Cursor::new(data);
        let tx_id = c.read_id()?;
        let output_index = c.read_u32()?;
        let asset_id = c.read_id()?;
        let output = Output::decode(&mut c)?;
        c.finish()?;
        Ok(Self {
            utxo_id: UtxoId::new(tx_id, output_index),
            asset_id,
            output,
        })
    }

    /// Decode the Base58-check string form returned by a node's UTXO
    /// enumeration API.
    pub fn from_string(encoded: &str) -> Result<Self, TxError> {
        let bytes = base58::decode_with_checksum(encoded)?;
        Self::from_bytes(&bytes)
    }
}

impl fmt::Display for Utxo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&base58::encode_with_checksum(&self.to_bytes()))
    }
}
