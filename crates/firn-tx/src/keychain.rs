//! Signer and keychain capabilities.
//!
//! The codec never touches curve math. A [`Signer`] produces a 65-byte
//! recoverable signature over a 32-byte digest; a [`Keychain`] locates
//! the signer for a 20-byte address. Wallets provide real
//! implementations; tests inject deterministic ones.

use firn_types::ids::{ShortId, Signature};
use std::collections::HashMap;

/// A signing capability for one keypair.
pub trait Signer {
    /// Sign a 32-byte digest, producing a recoverable signature.
    fn sign(&self, digest: &[u8; 32]) -> Result<Signature, String>;

    /// The 20-byte address derived from this signer's public key.
    fn address(&self) -> ShortId;
}

/// Read-only lookup from address to signer. A snapshot is sufficient:
/// signing never mutates the keychain.
pub trait Keychain {
    fn get(&self, address: &ShortId) -> Option<&dyn Signer>;
}

/// In-memory keychain over boxed signers, keyed by address.
#[derive(Default)]
pub struct MemoryKeychain {
    signers: HashMap<ShortId, Box<dyn Signer>>,
}

impl MemoryKeychain {
    pub fn new() -> Self {
        Self {
            signers: HashMap::new(),
        }
    }

    /// Register a signer under its own address.
    pub fn add(&mut self, signer: Box<dyn Signer>) {
        self.signers.insert(signer.address(), signer);
    }

    pub fn len(&self) -> usize {
        self.signers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }
}

impl Keychain for MemoryKeychain {
    fn get(&self, address: &ShortId) -> Option<&dyn Signer> {
        self.signers.get(address).map(|signer| signer.as_ref())
    }
}
