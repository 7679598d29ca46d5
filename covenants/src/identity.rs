use crate::error::{CovenantError, CovenantResult};
use kaspa_covenant_consensus_core::{
    hashing::covenant_id,
    tx::{TransactionOutpoint, TransactionOutput},
};
use kaspa_covenant_hashes::Hash;

/// Derives the covenant id binding `creating_outpoint` to the ordered
/// `auth_outputs`.
///
/// The outputs must be previews: amount and script public key only, without
/// a covenant binding. The id is derived before any binding exists, so an
/// output that already carries one would make the id depend on itself.
pub fn derive_covenant_id(creating_outpoint: TransactionOutpoint, auth_outputs: &[TransactionOutput]) -> CovenantResult<Hash> {
    if let Some(index) = auth_outputs.iter().position(|output| output.covenant.is_some()) {
        return Err(CovenantError::BoundAuthOutput(index));
    }
    Ok(covenant_id::covenant_id(creating_outpoint, auth_outputs.iter().enumerate().map(|(i, o)| (i as u32, o))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kaspa_covenant_consensus_core::tx::{CovenantBinding, ScriptPublicKey};

    fn preview(value: u64, script: &[u8]) -> TransactionOutput {
        TransactionOutput::new(value, ScriptPublicKey::from_vec(0, script.to_vec()))
    }

    #[test]
    fn test_derive_is_deterministic_and_order_sensitive() {
        let outpoint = TransactionOutpoint::new(Hash::from_u64_word(11), 0);
        let outputs = vec![preview(10_000_000, &[1, 2, 3]), preview(5_000_000, &[4, 5, 6])];
        let id = derive_covenant_id(outpoint, &outputs).unwrap();
        assert_eq!(id, derive_covenant_id(outpoint, &outputs).unwrap());

        let swapped = vec![outputs[1].clone(), outputs[0].clone()];
        assert_ne!(id, derive_covenant_id(outpoint, &swapped).unwrap());
    }

    #[test]
    fn test_derive_rejects_bound_outputs() {
        let outpoint = TransactionOutpoint::new(Hash::from_u64_word(11), 0);
        let mut outputs = vec![preview(10_000_000, &[1, 2, 3]), preview(5_000_000, &[4, 5, 6])];
        outputs[1].covenant = Some(CovenantBinding::new(0, Hash::from_u64_word(99)));
        assert_eq!(derive_covenant_id(outpoint, &outputs), Err(CovenantError::BoundAuthOutput(1)));
    }
}
