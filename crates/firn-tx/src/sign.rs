//! Signing pipeline.
//!
//! Canonical serialization, then one SHA-256 digest, then one signature
//! per signer index of each signable element, assembled into credentials
//! whose positions mirror the elements they satisfy:
//!
//!   1. `bytes  = unsigned.to_bytes()` (canonical, header sections sorted)
//!   2. `digest = sha256(bytes)`
//!   3. per signable element, per signer index: look up the key by the
//!      index's source address and sign the digest
//!   4. assemble the signed transaction
//!
//! A failed lookup or signer aborts the whole call; no partial results.

use crate::credentials::Credential;
use crate::keychain::Keychain;
use crate::platform::{AddDefaultSubnetDelegatorTx, SignedDelegatorTx};
use crate::tx::{SignedTx, UnsignedTx};
use crate::TxError;
use firn_types::ids::ShortId;
use sha2::{Digest, Sha256};

/// Hash capability for the signing digest. The network hashes with
/// SHA-256; tests may inject a deterministic stand-in to pin fixtures.
pub trait TxHasher {
    fn hash(&self, data: &[u8]) -> [u8; 32];
}

/// The network's hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl TxHasher for Sha256Hasher {
    fn hash(&self, data: &[u8]) -> [u8; 32] {
        Sha256::digest(data).into()
    }
}

/// Sign every signable element of `unsigned` with keys from `keychain`.
pub fn sign_transaction(
    unsigned: &UnsignedTx,
    keychain: &dyn Keychain,
) -> Result<SignedTx, TxError> {
    sign_transaction_with(unsigned, keychain, &Sha256Hasher)
}

/// As [`sign_transaction`], with an injected hash capability.
pub fn sign_transaction_with(
    unsigned: &UnsignedTx,
    keychain: &dyn Keychain,
    hasher: &dyn TxHasher,
) -> Result<SignedTx, TxError> {
    let bytes = unsigned.to_bytes();
    let digest = hasher.hash(&bytes);

    let mut credentials = Vec::new();
    for element in unsigned.signable_elements() {
        let mut signatures = Vec::with_capacity(element.sig_indices.len());
        for sig_idx in element.sig_indices {
            let signer = keychain.get(&sig_idx.source).ok_or(TxError::MissingKey {
                address: sig_idx.source,
            })?;
            let signature = signer
                .sign(&digest)
                .map_err(|inner| TxError::SignerFailure { inner })?;
            signatures.push(signature);
        }
        credentials.push(Credential::new(element.credential_type, signatures));
    }

    Ok(SignedTx::new(unsigned.clone(), credentials))
}

/// Sign a platform-chain delegator transaction with the payer's key.
pub fn sign_add_delegator(
    unsigned: &AddDefaultSubnetDelegatorTx,
    keychain: &dyn Keychain,
    payer: &ShortId,
) -> Result<SignedDelegatorTx, TxError> {
    sign_add_delegator_with(unsigned, keychain, payer, &Sha256Hasher)
}

/// As [`sign_add_delegator`], with an injected hash capability.
pub fn sign_add_delegator_with(
    unsigned: &AddDefaultSubnetDelegatorTx,
    keychain: &dyn Keychain,
    payer: &ShortId,
    hasher: &dyn TxHasher,
) -> Result<SignedDelegatorTx, TxError> {
    let digest = hasher.hash(&unsigned.to_bytes());
    let signer = keychain
        .get(payer)
        .ok_or(TxError::MissingKey { address: *payer })?;
    let signature = signer
        .sign(&digest)
        .map_err(|inner| TxError::SignerFailure { inner })?;
    Ok(SignedDelegatorTx {
        unsigned: unsigned.clone(),
        signature,
    })
}
