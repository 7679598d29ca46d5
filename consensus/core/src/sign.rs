use crate::{
    hashing::{
        sighash::{calc_schnorr_signature_hash, SigHashReusedValues},
        sighash_type::{SigHashType, SIG_HASH_ALL},
    },
    tx::{SignableTransaction, VerifiableTransaction},
};
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("{0}")]
    Message(String),

    #[error("Secp256k1 -> {0}")]
    Secp256k1Error(#[from] secp256k1::Error),
}

/// Sign all transaction inputs using schnorr, assuming every input pays to
/// the schnorr key directly (p2pk).
pub fn sign(mut signable_tx: SignableTransaction, schnorr_key: secp256k1::Keypair) -> SignableTransaction {
    for i in 0..signable_tx.tx.inputs.len() {
        signable_tx.tx.inputs[i].sig_op_count = 1;
    }

    let mut reused_values = SigHashReusedValues::new();
    for i in 0..signable_tx.tx.inputs.len() {
        let sig_hash = calc_schnorr_signature_hash(&signable_tx.as_verifiable(), i, SIG_HASH_ALL, &mut reused_values);
        let msg = secp256k1::Message::from_digest(sig_hash.as_bytes());
        let sig: [u8; 64] = *schnorr_key.sign_schnorr(msg).as_ref();
        // This represents OP_DATA_65 <SIGNATURE+SIGHASH_TYPE> (since signature length is 64 bytes and SIGHASH_TYPE is one byte)
        signable_tx.tx.inputs[i].signature_script = std::iter::once(65u8).chain(sig).chain([SIG_HASH_ALL.to_u8()]).collect();
    }
    signable_tx
}

/// Sign a single transaction input with a sighash_type using schnorr.
/// Returns the 66-byte signature push: OP_DATA_65 followed by the 64-byte
/// signature and the sighash-type byte.
pub fn sign_input(tx: &impl VerifiableTransaction, input_index: usize, schnorr_key: &secp256k1::Keypair, hash_type: SigHashType) -> Vec<u8> {
    let mut reused_values = SigHashReusedValues::new();

    let hash = calc_schnorr_signature_hash(tx, input_index, hash_type, &mut reused_values);
    let msg = secp256k1::Message::from_digest(hash.as_bytes());
    let sig: [u8; 64] = *schnorr_key.sign_schnorr(msg).as_ref();

    // This represents OP_DATA_65 <SIGNATURE+SIGHASH_TYPE> (since signature length is 64 bytes and SIGHASH_TYPE is one byte)
    std::iter::once(65u8).chain(sig).chain([hash_type.to_u8()]).collect()
}

/// Verifies the schnorr signatures of a fully signed p2pk transaction.
pub fn verify(tx: &impl VerifiableTransaction) -> Result<(), Error> {
    let mut reused_values = SigHashReusedValues::new();
    for (i, (input, entry)) in tx.populated_inputs().enumerate() {
        if input.signature_script.is_empty() {
            return Err(Error::Message(format!("Signature is empty for input: {i}")));
        }
        let pk = &entry.script_public_key.script()[1..33];
        let pk = secp256k1::XOnlyPublicKey::from_slice(pk)?;
        let sig = secp256k1::schnorr::Signature::from_slice(&input.signature_script[1..65])?;
        let sig_hash = calc_schnorr_signature_hash(tx, i, SIG_HASH_ALL, &mut reused_values);
        let msg = secp256k1::Message::from_digest(sig_hash.as_bytes());
        sig.verify(&msg, &pk)?;
    }

    Ok(())
}
