//! Signature credentials attached to a signed transaction.

use crate::wire::{put_u32, Cursor};
use crate::TxError;
use firn_types::constants::{credential_type, SIGNATURE_LEN};
use firn_types::ids::Signature;

/// A tagged bundle of signatures satisfying one signable element's signer
/// set. Position in the credentials array corresponds 1:1 to the signed
/// element's position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub credential_type: u32,
    pub signatures: Vec<Signature>,
}

impl Credential {
    pub fn new(credential_type: u32, signatures: Vec<Signature>) -> Self {
        Self {
            credential_type,
            signatures,
        }
    }

    pub(crate) fn decode(c: &mut Cursor) -> Result<Self, TxError> {
        let id = c.read_u32()?;
        match id {
            credential_type::SECP256K1 | credential_type::NFT => {}
            id => {
                return Err(TxError::UnknownTypeId {
                    domain: "credential",
                    id,
                })
            }
        }
        let (count, capacity) = c.read_count(SIGNATURE_LEN)?;
        let mut signatures = Vec::with_capacity(capacity);
        for _ in 0..count {
            signatures.push(c.read_signature()?);
        }
        Ok(Self {
            credential_type: id,
            signatures,
        })
    }

    pub(crate) fn encode(&self, buf: &mut Vec<u8>) {
        put_u32(buf, self.credential_type);
        put_u32(buf, self.signatures.len() as u32);
        for signature in &self.signatures {
            buf.extend_from_slice(signature.as_bytes());
        }
    }
}
