//! Firn transaction codec and signing.
//!
//! Implements the deterministic wire format shared by the Firn asset chain
//! (UTXO transfers, asset creation, NFT operations, cross-chain moves) and
//! the platform chain (staking), plus the signing pipeline that turns an
//! unsigned transaction into network-ready signed bytes.
//!
//! The format is bit-exact and order-sensitive: the header's output and
//! input sections are kept in canonical byte order, the signing digest is
//! SHA-256 of the exact serialized form, and credentials correspond
//! positionally to the elements they satisfy. Curve math stays behind the
//! [`Signer`] trait; the codec never touches it.

pub mod credentials;
pub mod inputs;
pub mod keychain;
pub mod ops;
pub mod outputs;
pub mod platform;
pub mod sign;
pub mod tx;
pub mod wire;

pub use credentials::Credential;
pub use inputs::{Input, SigIdx, TransferableInput};
pub use keychain::{Keychain, MemoryKeychain, Signer};
pub use ops::{Operation, TransferableOperation};
pub use outputs::{Output, OutputOwners, TransferableOutput, Utxo};
pub use platform::{AddDefaultSubnetDelegatorTx, SignedDelegatorTx};
pub use sign::{
    sign_add_delegator, sign_add_delegator_with, sign_transaction, sign_transaction_with,
    Sha256Hasher, TxHasher,
};
pub use tx::{
    BaseTx, CreateAssetTx, ExportTx, ImportTx, InitialState, OperationTx, SignableElement,
    SignedTx, UnsignedTx,
};

use firn_types::base58::Base58Error;
use firn_types::ids::ShortId;
use thiserror::Error;

/// Errors produced by the codec and signing pipeline. Every failure is
/// fatal to the current call; no partial products are returned.
#[derive(Debug, Error)]
pub enum TxError {
    #[error("truncated input: need {expected} bytes, have {available}")]
    Truncated { expected: usize, available: usize },

    #[error("{remaining} trailing bytes after transaction")]
    TrailingBytes { remaining: usize },

    #[error("unknown {domain} type id {id:#010x}")]
    UnknownTypeId { domain: &'static str, id: u32 },

    #[error("asset denomination {value} out of range (max 32)")]
    InvalidDenomination { value: u8 },

    #[error("invalid UTF-8 in string field")]
    InvalidUtf8,

    #[error(transparent)]
    Base58(#[from] Base58Error),

    #[error("no key in keychain for address {address}")]
    MissingKey { address: ShortId },

    #[error("signer failure: {inner}")]
    SignerFailure { inner: String },

    #[error("invariant violation: {detail}")]
    InvariantViolation { detail: String },
}
