use kaspa_covenant_hashes::{Hash, Hasher, HasherBase, TransactionSigningHash};

use crate::{
    subnets::SUBNETWORK_ID_NATIVE,
    tx::{ScriptPublicKey, TransactionOutpoint, TransactionOutput, VerifiableTransaction},
};

use super::{sighash_type::SigHashType, HasherExtensions};

/// Hashes shared between all the sighashes of a single transaction.
/// Computed lazily on first use.
#[derive(Default)]
pub struct SigHashReusedValues {
    previous_outputs_hash: Option<Hash>,
    sequence_hash: Option<Hash>,
    sig_op_counts_hash: Option<Hash>,
    outputs_hash: Option<Hash>,
}

impl SigHashReusedValues {
    pub fn new() -> Self {
        Self::default()
    }
}

fn previous_output_hash(tx: &impl VerifiableTransaction, hash_type: SigHashType, reused_values: &mut SigHashReusedValues) -> Hash {
    if hash_type.is_sighash_anyone_can_pay() {
        return 0.into();
    }

    if let Some(previous_outputs_hash) = reused_values.previous_outputs_hash {
        previous_outputs_hash
    } else {
        let mut hasher = TransactionSigningHash::new();
        for input in tx.inputs().iter() {
            hasher.update(input.previous_outpoint.transaction_id.as_bytes());
            hasher.write_u32(input.previous_outpoint.index);
        }
        let previous_outputs_hash = hasher.finalize();
        reused_values.previous_outputs_hash = Some(previous_outputs_hash);
        previous_outputs_hash
    }
}

fn sequence_hash(tx: &impl VerifiableTransaction, hash_type: SigHashType, reused_values: &mut SigHashReusedValues) -> Hash {
    if hash_type.is_sighash_single() || hash_type.is_sighash_anyone_can_pay() || hash_type.is_sighash_none() {
        return 0.into();
    }

    if let Some(sequence_hash) = reused_values.sequence_hash {
        sequence_hash
    } else {
        let mut hasher = TransactionSigningHash::new();
        for input in tx.inputs().iter() {
            hasher.write_u64(input.sequence);
        }
        let sequence_hash = hasher.finalize();
        reused_values.sequence_hash = Some(sequence_hash);
        sequence_hash
    }
}

fn sig_op_counts_hash(tx: &impl VerifiableTransaction, hash_type: SigHashType, reused_values: &mut SigHashReusedValues) -> Hash {
    if hash_type.is_sighash_anyone_can_pay() {
        return 0.into();
    }

    if let Some(sig_op_counts_hash) = reused_values.sig_op_counts_hash {
        sig_op_counts_hash
    } else {
        let mut hasher = TransactionSigningHash::new();
        for input in tx.inputs().iter() {
            hasher.write_u8(input.sig_op_count);
        }
        let sig_op_counts_hash = hasher.finalize();
        reused_values.sig_op_counts_hash = Some(sig_op_counts_hash);
        sig_op_counts_hash
    }
}

fn payload_hash(tx: &impl VerifiableTransaction) -> Hash {
    if tx.tx().subnetwork_id == SUBNETWORK_ID_NATIVE {
        return 0.into();
    }

    let mut hasher = TransactionSigningHash::new();
    hasher.write_var_bytes(&tx.tx().payload);
    hasher.finalize()
}

fn outputs_hash(
    tx: &impl VerifiableTransaction,
    hash_type: SigHashType,
    reused_values: &mut SigHashReusedValues,
    input_index: usize,
) -> Hash {
    if hash_type.is_sighash_none() {
        return 0.into();
    }

    let version = tx.tx().version;
    if hash_type.is_sighash_single() {
        // If the relevant output exists - return its hash, otherwise return zero-hash
        if input_index >= tx.outputs().len() {
            return 0.into();
        }

        let mut hasher = TransactionSigningHash::new();
        hash_output(&mut hasher, &tx.outputs()[input_index], version);
        return hasher.finalize();
    }

    // Otherwise, return hash of all outputs. Re-use hash if available.
    if let Some(outputs_hash) = reused_values.outputs_hash {
        outputs_hash
    } else {
        let mut hasher = TransactionSigningHash::new();
        for output in tx.outputs().iter() {
            hash_output(&mut hasher, output, version);
        }
        let outputs_hash = hasher.finalize();
        reused_values.outputs_hash = Some(outputs_hash);
        outputs_hash
    }
}

fn hash_outpoint(hasher: &mut impl Hasher, outpoint: TransactionOutpoint) {
    hasher.update(outpoint.transaction_id);
    hasher.write_u32(outpoint.index);
}

fn hash_output(hasher: &mut impl Hasher, output: &TransactionOutput, version: u16) {
    hasher.write_u64(output.value);
    hash_script_public_key(hasher, &output.script_public_key);
    // Signatures over version >= 1 transactions commit to the covenant
    // bindings, matching the transaction encoding in `hashing::tx`.
    if version >= 1 {
        hasher.write_bool(output.covenant.is_some());
        if let Some(covenant) = &output.covenant {
            hasher.write_u16(covenant.authorizing_input);
            hasher.update(covenant.covenant_id);
        }
    }
}

fn hash_script_public_key(hasher: &mut impl Hasher, script_public_key: &ScriptPublicKey) {
    hasher.write_u16(script_public_key.version());
    hasher.write_var_bytes(script_public_key.script());
}

pub fn calc_schnorr_signature_hash(
    tx: &impl VerifiableTransaction,
    input_index: usize,
    hash_type: SigHashType,
    reused_values: &mut SigHashReusedValues,
) -> Hash {
    let (input, entry) = tx.populated_input(input_index);
    let mut hasher = TransactionSigningHash::new();
    hasher.write_u16(tx.tx().version);
    hasher.update(previous_output_hash(tx, hash_type, reused_values));
    hasher.update(sequence_hash(tx, hash_type, reused_values));
    hasher.update(sig_op_counts_hash(tx, hash_type, reused_values));
    hash_outpoint(&mut hasher, input.previous_outpoint);
    hash_script_public_key(&mut hasher, &entry.script_public_key);
    hasher.write_u64(entry.amount);
    hasher.write_u64(input.sequence);
    hasher.write_u8(input.sig_op_count);
    hasher.update(outputs_hash(tx, hash_type, reused_values, input_index));
    hasher.write_u64(tx.tx().lock_time);
    hasher.update(&tx.tx().subnetwork_id);
    hasher.write_u64(tx.tx().gas);
    hasher.update(payload_hash(tx));
    hasher.write_u8(hash_type.to_u8());
    hasher.finalize()
}
