//! Asset-chain input kinds, signer indices, and the transferable wrapper.

use crate::wire::{put_u32, put_u64, Cursor};
use crate::TxError;
use firn_types::constants::input_type;
use firn_types::ids::{Id, ShortId, UtxoId};
use std::cmp::Ordering;

/// Pointer into the consumed UTXO's address list, plus the local-only
/// hint telling the keychain which key satisfies it. Only `index` goes on
/// the wire; `source` never does, so equality and hashing ignore it.
#[derive(Debug, Clone, Copy)]
pub struct SigIdx {
    pub index: u32,
    pub source: ShortId,
}

impl SigIdx {
    pub fn new(index: u32, source: ShortId) -> Self {
        Self { index, source }
    }

    /// A decoded index: the wire carries no source hint.
    pub fn bare(index: u32) -> Self {
        Self {
            index,
            source: ShortId::empty(),
        }
    }
}

impl PartialEq for SigIdx {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for SigIdx {}

impl std::hash::Hash for SigIdx {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

pub(crate) fn decode_sig_indices(c: &mut Cursor) -> Result<Vec<SigIdx>, TxError> {
    let (count, capacity) = c.read_count(4)?;
    let mut sig_indices = Vec::with_capacity(capacity);
    for _ in 0..count {
        sig_indices.push(SigIdx::bare(c.read_u32()?));
    }
    Ok(sig_indices)
}

pub(crate) fn encode_sig_indices(buf: &mut Vec<u8>, sig_indices: &[SigIdx]) {
    put_u32(buf, sig_indices.len() as u32);
    for sig_idx in sig_indices {
        put_u32(buf, sig_idx.index);
    }
}

/// Input payload, discriminated on the wire by its type id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Consumes an amount of a fungible asset; each signer index points
    /// at an address of the spent output's owner group.
    SecpTransfer {
        amount: u64,
        sig_indices: Vec<SigIdx>,
    },
}

impl Input {
    pub fn type_id(&self) -> u32 {
        match self {
            Input::SecpTransfer { .. } => input_type::SECP_TRANSFER,
        }
    }

    pub fn sig_indices(&self) -> &[SigIdx] {
        match self {
            Input::SecpTransfer { sig_indices, .. } => sig_indices,
        }
    }

    pub(crate) fn decode(c: &mut Cursor) -> Result<Self, TxError> {
        let id = c.read_u32()?;
        match id {
            input_type::SECP_TRANSFER => {
                let amount = c.read_u64()?;
                let sig_indices = decode_sig_indices(c)?;
                Ok(Input::SecpTransfer {
                    amount,
                    sig_indices,
                })
            }
            id => Err(TxError::UnknownTypeId {
                domain: "input",
                id,
            }),
        }
    }

    /// Canonical form: u32 type id followed by the payload.
    pub(crate) fn encode(&self, buf: &mut Vec<u8>) {
        put_u32(buf, self.type_id());
        match self {
            Input::SecpTransfer {
                amount,
                sig_indices,
            } => {
                put_u64(buf, *amount);
                encode_sig_indices(buf, sig_indices);
            }
        }
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode(&mut buf);
        buf
    }
}

/// An input bound to the UTXO it consumes and that UTXO's asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferableInput {
    pub utxo_id: UtxoId,
    pub asset_id: Id,
    pub input: Input,
}

impl TransferableInput {
    pub fn new(utxo_id: UtxoId, asset_id: Id, input: Input) -> Self {
        Self {
            utxo_id,
            asset_id,
            input,
        }
    }

    pub fn sig_indices(&self) -> &[SigIdx] {
        self.input.sig_indices()
    }

    pub(crate) fn decode(c: &mut Cursor) -> Result<Self, TxError> {
        let tx_id = c.read_id()?;
        let output_index = c.read_u32()?;
        let asset_id = c.read_id()?;
        let input = Input::decode(c)?;
        Ok(Self {
            utxo_id: UtxoId::new(tx_id, output_index),
            asset_id,
            input,
        })
    }

    pub(crate) fn encode(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.utxo_id.tx_id.as_bytes());
        put_u32(buf, self.utxo_id.output_index);
        buf.extend_from_slice(self.asset_id.as_bytes());
        self.input.encode(buf);
    }

    /// The network's sort key: the full encoded form.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode(&mut buf);
        buf
    }

    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.canonical_bytes().cmp(&other.canonical_bytes())
    }
}
