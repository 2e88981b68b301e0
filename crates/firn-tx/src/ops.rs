//! Asset-chain operations: minting and NFT transfers.
//!
//! Operations consume UTXOs by reference (the UTXO id list travels with
//! the operation) and carry their own signer indices. Unlike the header's
//! input section, the operation list and each operation's UTXO id list
//! keep authored order on the wire.

use crate::inputs::{decode_sig_indices, encode_sig_indices, SigIdx};
use crate::outputs::OutputOwners;
use crate::wire::{put_u32, put_u64, Cursor};
use crate::TxError;
use firn_types::constants::{credential_type, op_type, ID_LEN};
use firn_types::ids::{Id, UtxoId};

/// Operation payload, discriminated on the wire by its type id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Mints new units of a fungible asset: spends a mint output,
    /// recreates it, and produces the minted amount.
    SecpMint {
        sig_indices: Vec<SigIdx>,
        mint_owners: OutputOwners,
        transfer_amount: u64,
        transfer_owners: OutputOwners,
    },
    /// Mints NFTs into a group, one per owner group.
    NftMint {
        sig_indices: Vec<SigIdx>,
        group_id: u32,
        payload: Vec<u8>,
        owner_groups: Vec<OutputOwners>,
    },
    /// Transfers an NFT to a new owner group.
    NftTransfer {
        sig_indices: Vec<SigIdx>,
        group_id: u32,
        payload: Vec<u8>,
        owners: OutputOwners,
    },
}

impl Operation {
    pub fn type_id(&self) -> u32 {
        match self {
            Operation::SecpMint { .. } => op_type::SECP_MINT,
            Operation::NftMint { .. } => op_type::NFT_MINT,
            Operation::NftTransfer { .. } => op_type::NFT_TRANSFER,
        }
    }

    /// The credential kind that must accompany this operation.
    pub fn credential_type_id(&self) -> u32 {
        match self {
            Operation::SecpMint { .. } => credential_type::SECP256K1,
            Operation::NftMint { .. } | Operation::NftTransfer { .. } => credential_type::NFT,
        }
    }

    pub fn sig_indices(&self) -> &[SigIdx] {
        match self {
            Operation::SecpMint { sig_indices, .. }
            | Operation::NftMint { sig_indices, .. }
            | Operation::NftTransfer { sig_indices, .. } => sig_indices,
        }
    }

    pub(crate) fn decode(c: &mut Cursor) -> Result<Self, TxError> {
        let id = c.read_u32()?;
        match id {
            op_type::SECP_MINT => {
                let sig_indices = decode_sig_indices(c)?;
                let mint_owners = OutputOwners::decode(c)?;
                let transfer_amount = c.read_u64()?;
                let transfer_owners = OutputOwners::decode(c)?;
                Ok(Operation::SecpMint {
                    sig_indices,
                    mint_owners,
                    transfer_amount,
                    transfer_owners,
                })
            }
            op_type::NFT_MINT => {
                let sig_indices = decode_sig_indices(c)?;
                let group_id = c.read_u32()?;
                let len = c.read_u32()? as usize;
                let payload = c.read_bytes(len)?.to_vec();
                let (count, capacity) = c.read_count(16)?;
                let mut owner_groups = Vec::with_capacity(capacity);
                for _ in 0..count {
                    owner_groups.push(OutputOwners::decode(c)?);
                }
                Ok(Operation::NftMint {
                    sig_indices,
                    group_id,
                    payload,
                    owner_groups,
                })
            }
            op_type::NFT_TRANSFER => {
                let sig_indices = decode_sig_indices(c)?;
                let group_id = c.read_u32()?;
                let len = c.read_u32()? as usize;
                let payload = c.read_bytes(len)?.to_vec();
                let owners = OutputOwners::decode(c)?;
                Ok(Operation::NftTransfer {
                    sig_indices,
                    group_id,
                    payload,
                    owners,
                })
            }
            id => Err(TxError::UnknownTypeId {
                domain: "operation",
                id,
            }),
        }
    }

    /// Canonical form: u32 type id followed by the payload.
    pub(crate) fn encode(&self, buf: &mut Vec<u8>) {
        put_u32(buf, self.type_id());
        match self {
            Operation::SecpMint {
                sig_indices,
                mint_owners,
                transfer_amount,
                transfer_owners,
            } => {
                encode_sig_indices(buf, sig_indices);
                mint_owners.encode(buf);
                put_u64(buf, *transfer_amount);
                transfer_owners.encode(buf);
            }
            Operation::NftMint {
                sig_indices,
                group_id,
                payload,
                owner_groups,
            } => {
                encode_sig_indices(buf, sig_indices);
                put_u32(buf, *group_id);
                put_u32(buf, payload.len() as u32);
                buf.extend_from_slice(payload);
                put_u32(buf, owner_groups.len() as u32);
                for owners in owner_groups {
                    owners.encode(buf);
                }
            }
            Operation::NftTransfer {
                sig_indices,
                group_id,
                payload,
                owners,
            } => {
                encode_sig_indices(buf, sig_indices);
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

/// An operation bound to its asset and the UTXOs it references.
/// The UTXO id list order is preserved as authored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferableOperation {
    pub asset_id: Id,
    pub utxo_ids: Vec<UtxoId>,
    pub op: Operation,
}

impl TransferableOperation {
    pub fn new(asset_id: Id, utxo_ids: Vec<UtxoId>, op: Operation) -> Self {
        Self {
            asset_id,
            utxo_ids,
            op,
        }
    }

    pub(crate) fn decode(c: &mut Cursor) -> Result<Self, TxError> {
        let asset_id = c.read_id()?;
        let (count, capacity) = c.read_count(ID_LEN + 4)?;
        let mut utxo_ids = Vec::with_capacity(capacity);
        for _ in 0..count {
            let tx_id = c.read_id()?;
            let output_index = c.read_u32()?;
            utxo_ids.push(UtxoId::new(tx_id, output_index));
        }
        let op = Operation::decode(c)?;
        Ok(Self {
            asset_id,
            utxo_ids,
            op,
        })
    }

    pub(crate) fn encode(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.asset_id.as_bytes());
        put_u32(buf, self.utxo_ids.len() as u32);
        for utxo_id in &self.utxo_ids {
            buf.extend_from_slice(utxo_id.tx_id.as_bytes());
            put_u32(buf, utxo_id.output_index);
        }
        self.op.encode(buf);
    }
}
