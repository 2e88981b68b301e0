//! Signing pipeline tests with deterministic signers: credential
//! assembly, positional correspondence, digest stability, and failure
//! modes.

use firn_tx::{
    sign_add_delegator, sign_transaction, AddDefaultSubnetDelegatorTx, BaseTx, Input, Keychain,
    MemoryKeychain, Operation, OperationTx, Output, OutputOwners, SigIdx, Signer, SignedTx,
    TransferableInput, TransferableOperation, TransferableOutput, TxError, UnsignedTx,
};
use firn_types::constants::credential_type;
use firn_types::ids::{Id, ShortId, Signature, UtxoId};
use sha2::{Digest, Sha256};

/// Deterministic signer: tags the signature with one byte of identity and
/// embeds the digest, so tests can check exactly what was signed.
struct TestSigner {
    address: ShortId,
    tag: u8,
}

impl TestSigner {
    fn new(tag: u8) -> Self {
        Self {
            address: ShortId([tag; 20]),
            tag,
        }
    }
}

impl Signer for TestSigner {
    fn sign(&self, digest: &[u8; 32]) -> Result<Signature, String> {
        let mut sig = [0u8; 65];
        sig[0] = self.tag;
        sig[1..33].copy_from_slice(digest);
        Ok(Signature(sig))
    }

    fn address(&self) -> ShortId {
        self.address
    }
}

/// Signer that always refuses, for the failure path.
struct RefusingSigner(ShortId);

impl Signer for RefusingSigner {
    fn sign(&self, _digest: &[u8; 32]) -> Result<Signature, String> {
        Err("hardware wallet declined".into())
    }

    fn address(&self) -> ShortId {
        self.0
    }
}

fn keychain_with(tags: &[u8]) -> MemoryKeychain {
    let mut keychain = MemoryKeychain::new();
    for &tag in tags {
        keychain.add(Box::new(TestSigner::new(tag)));
    }
    keychain
}

fn owners(addr_byte: u8) -> OutputOwners {
    OutputOwners::new(0, 1, vec![ShortId([addr_byte; 20])])
}

fn input_with_signers(tx_byte: u8, tags: &[u8]) -> TransferableInput {
    TransferableInput::new(
        UtxoId::new(Id([tx_byte; 32]), 0),
        Id([0x01; 32]),
        Input::SecpTransfer {
            amount: 1000,
            sig_indices: tags
                .iter()
                .enumerate()
                .map(|(i, &tag)| SigIdx::new(i as u32, ShortId([tag; 20])))
                .collect(),
        },
    )
}

fn operation_tx() -> UnsignedTx {
    let base = BaseTx::new(
        3,
        Id([0x10; 32]),
        vec![TransferableOutput::new(
            Id([0x01; 32]),
            Output::SecpTransfer {
                amount: 900,
                owners: owners(0x44),
            },
        )],
        vec![
            input_with_signers(0xaa, &[0x51, 0x52]),
            input_with_signers(0xbb, &[0x53, 0x54]),
        ],
    );
    UnsignedTx::Operation(OperationTx::new(
        base,
        vec![TransferableOperation::new(
            Id([0x02; 32]),
            vec![UtxoId::new(Id([0xcc; 32]), 1)],
            Operation::NftTransfer {
                sig_indices: vec![SigIdx::new(0, ShortId([0x55; 20]))],
                group_id: 0,
                payload: b"summit badge".to_vec(),
                owners: owners(0x45),
            },
        )],
    ))
}

#[test]
fn test_credential_counts_and_order() {
    let unsigned = operation_tx();
    let keychain = keychain_with(&[0x51, 0x52, 0x53, 0x54, 0x55]);

    let signed = sign_transaction(&unsigned, &keychain).unwrap();

    // two inputs then one operation, positionally
    assert_eq!(signed.credentials.len(), 3);
    let counts: Vec<usize> = signed
        .credentials
        .iter()
        .map(|cred| cred.signatures.len())
        .collect();
    assert_eq!(counts, vec![2, 2, 1]);
    assert_eq!(
        signed.credentials[0].credential_type,
        credential_type::SECP256K1
    );
    assert_eq!(
        signed.credentials[1].credential_type,
        credential_type::SECP256K1
    );
    assert_eq!(signed.credentials[2].credential_type, credential_type::NFT);
}

#[test]
fn test_signatures_cover_unsigned_digest() {
    let unsigned = operation_tx();
    let keychain = keychain_with(&[0x51, 0x52, 0x53, 0x54, 0x55]);

    let signed = sign_transaction(&unsigned, &keychain).unwrap();
    let digest: [u8; 32] = Sha256::digest(unsigned.to_bytes()).into();

    for cred in &signed.credentials {
        for sig in &cred.signatures {
            assert_eq!(&sig.as_bytes()[1..33], &digest);
        }
    }
    // the NFT credential was produced by the operation's signer
    assert_eq!(signed.credentials[2].signatures[0].as_bytes()[0], 0x55);
}

#[test]
fn test_signing_is_deterministic() {
    let unsigned = operation_tx();
    let keychain = keychain_with(&[0x51, 0x52, 0x53, 0x54, 0x55]);

    let first = sign_transaction(&unsigned, &keychain).unwrap();
    let second = sign_transaction(&unsigned, &keychain).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_bytes(), second.to_bytes());
}

#[test]
fn test_digest_invariant_under_permutation() {
    let ins_a = input_with_signers(0x00, &[0x51]);
    let ins_b = input_with_signers(0xff, &[0x51]);

    let forward = UnsignedTx::Base(BaseTx::new(
        3,
        Id([0x10; 32]),
        vec![],
        vec![ins_a.clone(), ins_b.clone()],
    ));
    let reversed = UnsignedTx::Base(BaseTx::new(3, Id([0x10; 32]), vec![], vec![ins_b, ins_a]));

    let digest_forward: [u8; 32] = Sha256::digest(forward.to_bytes()).into();
    let digest_reversed: [u8; 32] = Sha256::digest(reversed.to_bytes()).into();
    assert_eq!(digest_forward, digest_reversed);
}

#[test]
fn test_signed_bytes_roundtrip() {
    let unsigned = operation_tx();
    let keychain = keychain_with(&[0x51, 0x52, 0x53, 0x54, 0x55]);

    let signed = sign_transaction(&unsigned, &keychain).unwrap();
    let decoded = SignedTx::from_bytes(&signed.to_bytes()).unwrap();
    assert_eq!(decoded, signed);
}

#[test]
fn test_missing_key() {
    let unsigned = operation_tx();
    // 0x54 deliberately absent
    let keychain = keychain_with(&[0x51, 0x52, 0x53, 0x55]);

    let err = sign_transaction(&unsigned, &keychain).unwrap_err();
    match err {
        TxError::MissingKey { address } => assert_eq!(address, ShortId([0x54; 20])),
        other => panic!("expected MissingKey, got {other:?}"),
    }
}

#[test]
fn test_signer_failure() {
    let unsigned = operation_tx();
    let mut keychain = keychain_with(&[0x52, 0x53, 0x54, 0x55]);
    keychain.add(Box::new(RefusingSigner(ShortId([0x51; 20]))));

    let err = sign_transaction(&unsigned, &keychain).unwrap_err();
    match err {
        TxError::SignerFailure { inner } => assert_eq!(inner, "hardware wallet declined"),
        other => panic!("expected SignerFailure, got {other:?}"),
    }
}

#[test]
fn test_empty_base_tx_signs_to_zero_credentials() {
    let unsigned = UnsignedTx::Base(BaseTx::new(3, Id([0x10; 32]), vec![], vec![]));
    let keychain = MemoryKeychain::new();

    let signed = sign_transaction(&unsigned, &keychain).unwrap();
    assert!(signed.credentials.is_empty());
}

#[test]
fn test_platform_delegator_signing() {
    let unsigned = AddDefaultSubnetDelegatorTx::new(
        ShortId([0x6e; 20]),
        2000,
        1_600_000_000,
        1_602_592_000,
        3,
        1,
        ShortId([0x51; 20]),
    );
    let keychain = keychain_with(&[0x51]);
    let payer = ShortId([0x51; 20]);

    let signed = sign_add_delegator(&unsigned, &keychain, &payer).unwrap();

    // signed form is the unsigned bytes with the signature appended
    let bytes = signed.to_bytes();
    let unsigned_bytes = unsigned.to_bytes();
    assert_eq!(&bytes[..unsigned_bytes.len()], &unsigned_bytes[..]);
    assert_eq!(&bytes[unsigned_bytes.len()..], signed.signature.as_bytes());

    let digest: [u8; 32] = Sha256::digest(&unsigned_bytes).into();
    assert_eq!(&signed.signature.as_bytes()[1..33], &digest);

    // absent payer key
    let err = sign_add_delegator(&unsigned, &keychain, &ShortId([0x99; 20])).unwrap_err();
    assert!(matches!(err, TxError::MissingKey { .. }));
}

#[test]
fn test_custom_hasher_is_honored() {
    use firn_tx::{sign_transaction_with, TxHasher};

    struct ZeroHasher;
    impl TxHasher for ZeroHasher {
        fn hash(&self, _data: &[u8]) -> [u8; 32] {
            [0u8; 32]
        }
    }

    let unsigned = operation_tx();
    let keychain = keychain_with(&[0x51, 0x52, 0x53, 0x54, 0x55]);

    let signed = sign_transaction_with(&unsigned, &keychain, &ZeroHasher).unwrap();
    for cred in &signed.credentials {
        for sig in &cred.signatures {
            assert_eq!(&sig.as_bytes()[1..33], &[0u8; 32]);
        }
    }
}

// the keychain trait object is what the pipeline sees; make sure a
// borrowed custom implementation works too
#[test]
fn test_custom_keychain_impl() {
    struct SingleKey(TestSigner);

    impl Keychain for SingleKey {
        fn get(&self, address: &ShortId) -> Option<&dyn Signer> {
            (self.0.address() == *address).then_some(&self.0 as &dyn Signer)
        }
    }

    let unsigned = UnsignedTx::Base(BaseTx::new(
        3,
        Id([0x10; 32]),
        vec![],
        vec![input_with_signers(0xaa, &[0x51])],
    ));
    let keychain = SingleKey(TestSigner::new(0x51));

    let signed = sign_transaction(&unsigned, &keychain).unwrap();
    assert_eq!(signed.credentials.len(), 1);
    assert_eq!(signed.credentials[0].signatures.len(), 1);
}
