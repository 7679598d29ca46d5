use super::HasherExtensions;
use crate::tx::{Transaction, TransactionId, TransactionInput, TransactionOutpoint, TransactionOutput};
use kaspa_covenant_hashes::{Hash, Hasher, HasherBase, PayloadDigest};

bitflags::bitflags! {
    /// A bitmask defining which transaction fields we want to encode and which to ignore.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TxEncodingFlags: u8 {
        const FULL = 0;
        const EXCLUDE_SIGNATURE_SCRIPT = 1 << 0;
        const EXCLUDE_MASS_COMMIT = 1 << 1;
        const EXCLUDE_PAYLOAD = 1 << 2;
    }
}

/// Returns the transaction hash. Note that this is different than the transaction ID.
pub fn hash(tx: &Transaction) -> Hash {
    let mut hasher = kaspa_covenant_hashes::TransactionHash::new();
    write_transaction(&mut hasher, tx, TxEncodingFlags::FULL);
    hasher.finalize()
}

/// Not intended for direct use by clients. Instead use `tx.id()`
pub fn id(tx: &Transaction) -> TransactionId {
    if tx.version == 0 { id_v0(tx) } else { id_v1(tx) }
}

pub fn id_v0(tx: &Transaction) -> TransactionId {
    // Encode the transaction, replace signature script with an empty array,
    // skip the mass commitment and hash the result.
    let mut hasher = kaspa_covenant_hashes::TransactionID::new();
    write_transaction(&mut hasher, tx, TxEncodingFlags::EXCLUDE_SIGNATURE_SCRIPT | TxEncodingFlags::EXCLUDE_MASS_COMMIT);
    hasher.finalize()
}

/// Computes the Transaction ID for a version 1 transaction. The payload is
/// hashed separately so that payload-carrying protocols can commit to the
/// rest of the transaction without the full payload at hand.
pub fn id_v1(tx: &Transaction) -> TransactionId {
    let payload_digest = payload_digest(&tx.payload);
    let rest_digest = {
        let mut hasher = kaspa_covenant_hashes::TransactionRest::new();
        write_transaction(
            &mut hasher,
            tx,
            TxEncodingFlags::EXCLUDE_PAYLOAD | TxEncodingFlags::EXCLUDE_SIGNATURE_SCRIPT | TxEncodingFlags::EXCLUDE_MASS_COMMIT,
        );
        hasher.finalize()
    };

    let mut hasher = kaspa_covenant_hashes::TransactionV1Id::new();
    hasher.update(payload_digest).update(rest_digest);
    hasher.finalize()
}

/// Computes the digest of the transaction payload using the `PayloadDigest` hasher.
pub fn payload_digest(payload: &[u8]) -> Hash {
    PayloadDigest::hash(payload)
}

/// Write the transaction into the provided hasher according to the encoding flags
fn write_transaction<T: HasherBase>(hasher: &mut T, tx: &Transaction, encoding_flags: TxEncodingFlags) {
    hasher.update(tx.version.to_le_bytes()).write_len(tx.inputs.len());
    for input in tx.inputs.iter() {
        write_input(hasher, input, encoding_flags);
    }

    hasher.write_len(tx.outputs.len());
    for output in tx.outputs.iter() {
        write_output(hasher, output, tx.version);
    }

    hasher.update(tx.lock_time.to_le_bytes()).update(&tx.subnetwork_id).update(tx.gas.to_le_bytes());
    if !encoding_flags.contains(TxEncodingFlags::EXCLUDE_PAYLOAD) {
        hasher.write_var_bytes(&tx.payload);
    } else {
        hasher.write_var_bytes(&[]);
    };

    // The mass commitment participates only in tx::hash, never in tx::id
    // (see KIP-0009). For version 0 a zero mass is a no-op to keep legacy
    // hashes stable; for version >= 1 the field is always encoded so the
    // encoding stays unambiguous and invertible.
    if !encoding_flags.contains(TxEncodingFlags::EXCLUDE_MASS_COMMIT) {
        let mass = tx.mass();
        if tx.version < 1 {
            if mass > 0 {
                hasher.update(mass.to_le_bytes());
            }
        } else {
            hasher.update(mass.to_le_bytes());
        }
    }
}

#[inline(always)]
fn write_input<T: HasherBase>(hasher: &mut T, input: &TransactionInput, encoding_flags: TxEncodingFlags) {
    write_outpoint(hasher, &input.previous_outpoint);
    if !encoding_flags.contains(TxEncodingFlags::EXCLUDE_SIGNATURE_SCRIPT) {
        hasher.write_var_bytes(input.signature_script.as_slice()).update([input.sig_op_count]);
    } else {
        hasher.write_var_bytes(&[]);
    }
    hasher.update(input.sequence.to_le_bytes());
}

#[inline(always)]
fn write_outpoint<T: HasherBase>(hasher: &mut T, outpoint: &TransactionOutpoint) {
    hasher.update(outpoint.transaction_id).update(outpoint.index.to_le_bytes());
}

#[inline(always)]
fn write_output<T: HasherBase>(hasher: &mut T, output: &TransactionOutput, version: u16) {
    hasher
        .update(output.value.to_le_bytes())
        .update(output.script_public_key.version().to_le_bytes())
        .write_var_bytes(output.script_public_key.script());

    if version >= 1 {
        hasher.write_bool(output.covenant.is_some());
        if let Some(covenant) = &output.covenant {
            hasher.write_u16(covenant.authorizing_input);
            hasher.update(covenant.covenant_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        subnets::SUBNETWORK_ID_NATIVE,
        tx::{CovenantBinding, ScriptPublicKey, ScriptVec},
    };

    fn sample_inputs() -> Vec<TransactionInput> {
        vec![TransactionInput::new(TransactionOutpoint::new(Hash::from_u64_word(7), 2), vec![1, 2], 7, 5)]
    }

    fn sample_outputs() -> Vec<TransactionOutput> {
        vec![TransactionOutput::new(1564, ScriptPublicKey::new(7, ScriptVec::from_slice(&[1, 2, 3, 4, 5])))]
    }

    #[test]
    fn test_id_excludes_signature_script() {
        let mut tx = Transaction::new(0, sample_inputs(), sample_outputs(), 0, SUBNETWORK_ID_NATIVE, 0, vec![]);
        let unsigned_id = tx.id();
        let unsigned_hash = hash(&tx);
        tx.inputs[0].signature_script = vec![9; 70];
        assert_eq!(tx.id(), unsigned_id, "the id must not commit to signature scripts");
        assert_ne!(hash(&tx), unsigned_hash, "the hash must commit to signature scripts");
    }

    #[test]
    fn test_mass_commits_to_hash_only() {
        let tx = Transaction::new(0, sample_inputs(), sample_outputs(), 0, SUBNETWORK_ID_NATIVE, 0, vec![]);
        let mut massful = tx.clone();
        massful.set_mass(5);
        assert_eq!(tx.id(), massful.id());
        assert_ne!(hash(&tx), hash(&massful));
    }

    #[test]
    fn test_v1_mass_always_encoded() {
        // For v1 a zero mass is part of the hash preimage, so setting mass
        // to zero and to nonzero must both hash differently than each other.
        let tx = Transaction::new(1, sample_inputs(), sample_outputs(), 0, SUBNETWORK_ID_NATIVE, 0, vec![]);
        let mut massful = tx.clone();
        massful.set_mass(5);
        assert_ne!(hash(&tx), hash(&massful));
    }

    #[test]
    fn test_version_affects_id() {
        let v0 = Transaction::new(0, sample_inputs(), sample_outputs(), 0, SUBNETWORK_ID_NATIVE, 0, vec![]);
        let v1 = Transaction::new(1, sample_inputs(), sample_outputs(), 0, SUBNETWORK_ID_NATIVE, 0, vec![]);
        assert_ne!(v0.id(), v1.id());
    }

    #[test]
    fn test_v1_id_commits_to_covenant_binding() {
        let mut tx = Transaction::new(1, sample_inputs(), sample_outputs(), 0, SUBNETWORK_ID_NATIVE, 0, vec![]);
        let unbound_id = tx.id();
        tx.outputs[0].covenant = Some(CovenantBinding::new(0, Hash::from_u64_word(42)));
        let bound_id = tx.id();
        assert_ne!(unbound_id, bound_id);

        // A different authorizing input changes the id too.
        tx.outputs[0].covenant = Some(CovenantBinding::new(1, Hash::from_u64_word(42)));
        assert_ne!(bound_id, tx.id());
    }

    #[test]
    fn test_v1_id_commits_to_payload_via_digest() {
        let empty = Transaction::new(1, sample_inputs(), sample_outputs(), 0, SUBNETWORK_ID_NATIVE, 0, vec![]);
        let with_payload = Transaction::new(1, sample_inputs(), sample_outputs(), 0, SUBNETWORK_ID_NATIVE, 0, vec![1, 2, 3]);
        assert_ne!(empty.id(), with_payload.id());
        assert_ne!(payload_digest(&[]), payload_digest(&[1, 2, 3]));
    }
}
