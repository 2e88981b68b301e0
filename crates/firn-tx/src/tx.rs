//! Asset-chain transactions: the shared header, the five concrete kinds,
//! and the unsigned/signed envelopes.
//!
//! The header's output and input sections are sorted into canonical byte
//! order by the constructors, so a freshly built transaction serializes
//! in the exact form the network hashes. Decoding preserves stream order
//! and never re-sorts; a foreign transaction therefore re-encodes
//! byte-identically, which keeps its signing digest intact.

use crate::credentials::Credential;
use crate::inputs::{SigIdx, TransferableInput};
use crate::ops::TransferableOperation;
use crate::outputs::{Output, TransferableOutput};
use crate::wire::{put_string, put_u32, put_u8, Cursor};
use crate::TxError;
use firn_types::base58;
use firn_types::constants::{credential_type, tx_type, MAX_DENOMINATION};
use firn_types::ids::Id;
use sha2::{Digest, Sha256};
use std::fmt;

/// Shared header of every asset-chain transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseTx {
    pub network_id: u32,
    pub blockchain_id: Id,
    pub outputs: Vec<TransferableOutput>,
    pub inputs: Vec<TransferableInput>,
}

impl BaseTx {
    /// Build a header, sorting both sections into canonical byte order.
    pub fn new(
        network_id: u32,
        blockchain_id: Id,
        mut outputs: Vec<TransferableOutput>,
        mut inputs: Vec<TransferableInput>,
    ) -> Self {
        outputs.sort_by_cached_key(|output| output.canonical_bytes());
        inputs.sort_by_cached_key(|input| input.canonical_bytes());
        Self {
            network_id,
            blockchain_id,
            outputs,
            inputs,
        }
    }

    fn decode(c: &mut Cursor) -> Result<Self, TxError> {
        let network_id = c.read_u32()?;
        let blockchain_id = c.read_id()?;

        let (num_outputs, capacity) = c.read_count(32 + 4)?;
        let mut outputs = Vec::with_capacity(capacity);
        for _ in 0..num_outputs {
            outputs.push(TransferableOutput::decode(c)?);
        }

        let (num_inputs, capacity) = c.read_count(32 + 4 + 32 + 4)?;
        let mut inputs = Vec::with_capacity(capacity);
        for _ in 0..num_inputs {
            inputs.push(TransferableInput::decode(c)?);
        }

        Ok(Self {
            network_id,
            blockchain_id,
            outputs,
            inputs,
        })
    }

    fn encode(&self, buf: &mut Vec<u8>) {
        put_u32(buf, self.network_id);
        buf.extend_from_slice(self.blockchain_id.as_bytes());
        put_u32(buf, self.outputs.len() as u32);
        for output in &self.outputs {
            output.encode(buf);
        }
        put_u32(buf, self.inputs.len() as u32);
        for input in &self.inputs {
            input.encode(buf);
        }
    }
}

/// One feature extension's outputs in a newly created asset's genesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialState {
    pub fx_id: u32,
    pub outputs: Vec<Output>,
}

impl InitialState {
    pub fn new(fx_id: u32, outputs: Vec<Output>) -> Self {
        Self { fx_id, outputs }
    }

    fn decode(c: &mut Cursor) -> Result<Self, TxError> {
        let fx_id = c.read_u32()?;
        let (count, capacity) = c.read_count(4)?;
        let mut outputs = Vec::with_capacity(capacity);
        for _ in 0..count {
            outputs.push(Output::decode(c)?);
        }
        Ok(Self { fx_id, outputs })
    }

    fn encode(&self, buf: &mut Vec<u8>) {
        put_u32(buf, self.fx_id);
        put_u32(buf, self.outputs.len() as u32);
        for output in &self.outputs {
            output.encode(buf);
        }
    }
}

/// Creates a new asset with a name, symbol, denomination, and the genesis
/// outputs of each feature extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAssetTx {
    pub base: BaseTx,
    pub name: String,
    pub symbol: String,
    pub denomination: u8,
    pub initial_states: Vec<InitialState>,
}

impl CreateAssetTx {
    pub fn new(
        base: BaseTx,
        name: String,
        symbol: String,
        denomination: u8,
        initial_states: Vec<InitialState>,
    ) -> Result<Self, TxError> {
        if denomination > MAX_DENOMINATION {
            return Err(TxError::InvalidDenomination {
                value: denomination,
            });
        }
        Ok(Self {
            base,
            name,
            symbol,
            denomination,
            initial_states,
        })
    }

    fn decode(c: &mut Cursor) -> Result<Self, TxError> {
        let base = BaseTx::decode(c)?;
        let name = c.read_string()?;
        let symbol = c.read_string()?;
        let denomination = c.read_u8()?;
        if denomination > MAX_DENOMINATION {
            return Err(TxError::InvalidDenomination {
                value: denomination,
            });
        }
        let (count, capacity) = c.read_count(8)?;
        let mut initial_states = Vec::with_capacity(capacity);
        for _ in 0..count {
            initial_states.push(InitialState::decode(c)?);
        }
        Ok(Self {
            base,
            name,
            symbol,
            denomination,
            initial_states,
        })
    }

    fn encode(&self, buf: &mut Vec<u8>) {
        self.base.encode(buf);
        put_string(buf, &self.name);
        put_string(buf, &self.symbol);
        put_u8(buf, self.denomination);
        put_u32(buf, self.initial_states.len() as u32);
        for state in &self.initial_states {
            state.encode(buf);
        }
    }
}

/// Carries operations against existing UTXOs (minting, NFT transfers).
/// The operation list keeps authored order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationTx {
    pub base: BaseTx,
    pub operations: Vec<TransferableOperation>,
}

impl OperationTx {
    pub fn new(base: BaseTx, operations: Vec<TransferableOperation>) -> Self {
        Self { base, operations }
    }

    fn decode(c: &mut Cursor) -> Result<Self, TxError> {
        let base = BaseTx::decode(c)?;
        let (count, capacity) = c.read_count(32 + 4 + 4)?;
        let mut operations = Vec::with_capacity(capacity);
        for _ in 0..count {
            operations.push(TransferableOperation::decode(c)?);
        }
        Ok(Self { base, operations })
    }

    fn encode(&self, buf: &mut Vec<u8>) {
        self.base.encode(buf);
        put_u32(buf, self.operations.len() as u32);
        for op in &self.operations {
            op.encode(buf);
        }
    }
}

/// Consumes UTXOs exported from another chain. The import-side inputs
/// keep authored order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportTx {
    pub base: BaseTx,
    pub import_inputs: Vec<TransferableInput>,
}

impl ImportTx {
    pub fn new(base: BaseTx, import_inputs: Vec<TransferableInput>) -> Self {
        Self { base, import_inputs }
    }

    fn decode(c: &mut Cursor) -> Result<Self, TxError> {
        let base = BaseTx::decode(c)?;
        let (count, capacity) = c.read_count(32 + 4 + 32 + 4)?;
        let mut import_inputs = Vec::with_capacity(capacity);
        for _ in 0..count {
            import_inputs.push(TransferableInput::decode(c)?);
        }
        Ok(Self { base, import_inputs })
    }

    fn encode(&self, buf: &mut Vec<u8>) {
        self.base.encode(buf);
        put_u32(buf, self.import_inputs.len() as u32);
        for input in &self.import_inputs {
            input.encode(buf);
        }
    }
}

/// Moves outputs to another chain. Export outputs have no signers and
/// keep authored order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTx {
    pub base: BaseTx,
    pub export_outputs: Vec<TransferableOutput>,
}

impl ExportTx {
    pub fn new(base: BaseTx, export_outputs: Vec<TransferableOutput>) -> Self {
        Self {
            base,
            export_outputs,
        }
    }

    fn decode(c: &mut Cursor) -> Result<Self, TxError> {
        let base = BaseTx::decode(c)?;
        let (count, capacity) = c.read_count(32 + 4)?;
        let mut export_outputs = Vec::with_capacity(capacity);
        for _ in 0..count {
            export_outputs.push(TransferableOutput::decode(c)?);
        }
        Ok(Self {
            base,
            export_outputs,
        })
    }

    fn encode(&self, buf: &mut Vec<u8>) {
        self.base.encode(buf);
        put_u32(buf, self.export_outputs.len() as u32);
        for output in &self.export_outputs {
            output.encode(buf);
        }
    }
}

/// One element of a transaction that requires signatures, in the order
/// credentials must appear.
pub struct SignableElement<'a> {
    pub credential_type: u32,
    pub sig_indices: &'a [SigIdx],
}

/// An unsigned asset-chain transaction: a u32 type tag followed by the
/// kind-specific body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnsignedTx {
    Base(BaseTx),
    CreateAsset(CreateAssetTx),
    Operation(OperationTx),
    Import(ImportTx),
    Export(ExportTx),
}

impl UnsignedTx {
    pub fn type_id(&self) -> u32 {
        match self {
            UnsignedTx::Base(_) => tx_type::BASE,
            UnsignedTx::CreateAsset(_) => tx_type::CREATE_ASSET,
            UnsignedTx::Operation(_) => tx_type::OPERATION,
            UnsignedTx::Import(_) => tx_type::IMPORT,
            UnsignedTx::Export(_) => tx_type::EXPORT,
        }
    }

    pub fn base(&self) -> &BaseTx {
        match self {
            UnsignedTx::Base(tx) => tx,
            UnsignedTx::CreateAsset(tx) => &tx.base,
            UnsignedTx::Operation(tx) => &tx.base,
            UnsignedTx::Import(tx) => &tx.base,
            UnsignedTx::Export(tx) => &tx.base,
        }
    }

    pub(crate) fn encode(&self, buf: &mut Vec<u8>) {
        put_u32(buf, self.type_id());
        match self {
            UnsignedTx::Base(tx) => tx.encode(buf),
            UnsignedTx::CreateAsset(tx) => tx.encode(buf),
            UnsignedTx::Operation(tx) => tx.encode(buf),
            UnsignedTx::Import(tx) => tx.encode(buf),
            UnsignedTx::Export(tx) => tx.encode(buf),
        }
    }

    /// The canonical serialized form: what the network hashes and signs.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode(&mut buf);
        buf
    }

    pub(crate) fn decode(c: &mut Cursor) -> Result<Self, TxError> {
        let id = c.read_u32()?;
        match id {
            tx_type::BASE => Ok(UnsignedTx::Base(BaseTx::decode(c)?)),
            tx_type::CREATE_ASSET => Ok(UnsignedTx::CreateAsset(CreateAssetTx::decode(c)?)),
            tx_type::OPERATION => Ok(UnsignedTx::Operation(OperationTx::decode(c)?)),
            tx_type::IMPORT => Ok(UnsignedTx::Import(ImportTx::decode(c)?)),
            tx_type::EXPORT => Ok(UnsignedTx::Export(ExportTx::decode(c)?)),
            id => Err(TxError::UnknownTypeId { domain: "tx", id }),
        }
    }

    /// Parse a framed slice; fails with `TrailingBytes` unless the
    /// transaction consumes it exactly.
    pub fn from_bytes(data: &[u8]) -> Result<Self, TxError> {
        let mut c = Cursor::new(data);
        let tx = Self::decode(&mut c)?;
        c.finish()?;
        Ok(tx)
    }

    /// Signable elements in the order their credentials must appear:
    /// header inputs first (already in canonical order), then the
    /// kind-specific elements in authored order.
    pub fn signable_elements(&self) -> Vec<SignableElement<'_>> {
        let mut elements: Vec<SignableElement> = self
            .base()
            .inputs
            .iter()
            .map(|input| SignableElement {
                credential_type: credential_type::SECP256K1,
                sig_indices: input.sig_indices(),
            })
            .collect();

        match self {
            UnsignedTx::Operation(tx) => {
                for op in &tx.operations {
                    elements.push(SignableElement {
                        credential_type: op.op.credential_type_id(),
                        sig_indices: op.op.sig_indices(),
                    });
                }
            }
            UnsignedTx::Import(tx) => {
                for input in &tx.import_inputs {
                    elements.push(SignableElement {
                        credential_type: credential_type::SECP256K1,
                        sig_indices: input.sig_indices(),
                    });
                }
            }
            _ => {}
        }

        elements
    }
}

/// A signed asset-chain transaction: the unsigned body plus one
/// credential per signable element, in positional correspondence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTx {
    pub unsigned: UnsignedTx,
    pub credentials: Vec<Credential>,
}

impl SignedTx {
    pub fn new(unsigned: UnsignedTx, credentials: Vec<Credential>) -> Self {
        Self {
            unsigned,
            credentials,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.unsigned.encode(&mut buf);
        put_u32(&mut buf, self.credentials.len() as u32);
        for credential in &self.credentials {
            credential.encode(&mut buf);
        }
        buf
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, TxError> {
        let mut c = Cursor::new(data);
        let unsigned = UnsignedTx::decode(&mut c)?;
        let (count, capacity) = c.read_count(8)?;
        let mut credentials = Vec::with_capacity(capacity);
        for _ in 0..count {
            credentials.push(Credential::decode(&mut c)?);
        }
        c.finish()?;
        Ok(Self {
            unsigned,
            credentials,
        })
    }

    /// The transaction id: SHA-256 of the signed bytes.
    pub fn id(&self) -> Id {
        Id(Sha256::digest(self.to_bytes()).into())
    }

    /// Decode the Base58-check string form, verifying the checksum before
    /// parsing.
    pub fn from_string(encoded: &str) -> Result<Self, TxError> {
        let bytes = base58::decode_with_checksum(encoded)?;
        Self::from_bytes(&bytes)
    }
}

impl fmt::Display for SignedTx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&base58::encode_with_checksum(&self.to_bytes()))
    }
}
