use super::HasherExtensions;
use crate::tx::{TransactionOutpoint, TransactionOutput};
use kaspa_covenant_hashes::{CovenantID, Hash, Hasher, HasherBase};

/// Computes the covenant identifier binding `outpoint` (the creating
/// outpoint) to the ordered sequence of authorized outputs.
///
/// The outputs are hashed by their index, amount and script public key
/// only. The covenant binding an output may eventually carry is excluded
/// by construction: the id is derived before the binding exists, so the
/// caller must pass preview outputs (see `kaspa_covenants::identity`).
pub fn covenant_id<'a>(outpoint: TransactionOutpoint, auth_outputs: impl Iterator<Item = (u32, &'a TransactionOutput)>) -> Hash {
    let mut hasher = CovenantID::new();
    hasher.update(outpoint.transaction_id).update(outpoint.index.to_le_bytes());
    for (index, output) in auth_outputs {
        hasher
            .write_u32(index)
            .write_u64(output.value)
            .write_u16(output.script_public_key.version())
            .write_var_bytes(output.script_public_key.script());
    }
    hasher.finalize()
}
