use crate::error::CovenantResult;
use kaspa_covenant_txscript::{
    opcodes::codes::{OpFalse, OpTrue},
    script_builder::ScriptBuilder,
};

/// Length of a schnorr signature script: OP_DATA_65 followed by the 64-byte
/// signature and the sighash-type byte.
pub const SIGNATURE_SCRIPT_LEN: usize = 66;

/// Assembles a pay-to-script-hash unlock script.
///
/// `signature` must be the pre-encoded signature push produced by the
/// signing primitive (see `kaspa_covenant_consensus_core::sign::sign_input`),
/// which already forms a valid script push. The optional `branch` selects the
/// conditional body of a branch-selecting redeem script: `true` pushes the
/// opcode consumed by the if-branch, `false` by the else-branch. The redeem
/// script follows as a canonical data push, with no intervening bytes.
pub fn unlock_script(signature: &[u8], branch: Option<bool>, redeem_script: &[u8]) -> CovenantResult<Vec<u8>> {
    let redeem_push = ScriptBuilder::new().add_data(redeem_script)?.drain();
    let mut script = Vec::with_capacity(signature.len() + branch.map_or(0, |_| 1) + redeem_push.len());
    script.extend_from_slice(signature);
    if let Some(branch) = branch {
        script.push(if branch { OpTrue } else { OpFalse });
    }
    script.extend(redeem_push);
    Ok(script)
}

/// Returns the exact byte length `unlock_script` will produce for a redeem
/// script of the given bytes. Used to size placeholder signature scripts so
/// mass measurement sees the final transaction layout.
pub fn unlock_script_len(redeem_script: &[u8], branch: Option<bool>) -> usize {
    SIGNATURE_SCRIPT_LEN + branch.map_or(0, |_| 1) + ScriptBuilder::canonical_data_size(redeem_script)
}
