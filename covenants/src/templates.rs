//! Redeem script templates for covenant-bound outputs.
//!
//! Every template is a stateless builder returning finished script bytes,
//! intended to be wrapped in a pay-to-script-hash lock via
//! [`pay_to_script_hash_script`](kaspa_covenant_txscript::standard::pay_to_script_hash_script)
//! and revealed at spend time through the unlock script.

use kaspa_covenant_consensus_core::tx::ScriptPublicKey;
use kaspa_covenant_txscript::{
    opcodes::codes::*,
    script_builder::{ScriptBuilder, ScriptBuilderResult},
    SpkEncoding,
};

/// Builds a redeem script that forces the spending transaction to pay a
/// single hardcoded recipient.
///
/// The script asserts exactly one output exists, that its script public key
/// equals `recipient`, and that the spend is signed by `owner_pub_key`. A
/// spend towards any other destination is unspendable rather than merely
/// discouraged.
pub fn single_recipient_script(recipient: &ScriptPublicKey, owner_pub_key: &[u8; 32]) -> ScriptBuilderResult<Vec<u8>> {
    Ok(ScriptBuilder::new()
        .add_op(OpTxOutputCount)?
        .add_op(OpTrue)?
        .add_op(OpEqualVerify)?
        .add_op(OpFalse)?
        .add_op(OpTxOutputSpk)?
        .add_data(&recipient.to_bytes())?
        .add_op(OpEqualVerify)?
        .add_data(owner_pub_key)?
        .add_op(OpCheckSig)?
        .drain())
}

/// Builds a branch-selecting vault redeem script.
///
/// The spender chooses the branch by placing a boolean on the stack right
/// below the redeem script push (see `unlock::unlock_script`):
///
/// - emergency branch (true): sweeps the vault to the hardcoded `recovery`
///   script at any time, as the only output, signed by `recovery_pub_key`;
/// - normal branch (false): spendable only once the transaction lock time
///   reaches `lock_time`, with exactly one authorized continuation output,
///   signed by `owner_pub_key`.
pub fn vault_script(
    owner_pub_key: &[u8; 32],
    recovery_pub_key: &[u8; 32],
    recovery: &ScriptPublicKey,
    lock_time: u64,
) -> ScriptBuilderResult<Vec<u8>> {
    Ok(ScriptBuilder::new()
        .add_op(OpIf)?
        // Emergency: a single output paying the recovery script.
        .add_op(OpFalse)?
        .add_op(OpTxOutputSpk)?
        .add_data(&recovery.to_bytes())?
        .add_op(OpEqualVerify)?
        .add_op(OpTxOutputCount)?
        .add_op(OpTrue)?
        .add_op(OpEqualVerify)?
        .add_data(recovery_pub_key)?
        .add_op(OpCheckSig)?
        .add_op(OpElse)?
        // Normal: time-locked withdrawal with a single continuation output.
        .add_lock_time(lock_time)?
        .add_op(OpCheckLockTimeVerify)?
        .add_op(OpDrop)?
        .add_op(OpTxInputIndex)?
        .add_op(OpAuthOutputCount)?
        .add_op(OpTrue)?
        .add_op(OpEqualVerify)?
        .add_data(owner_pub_key)?
        .add_op(OpCheckSig)?
        .add_op(OpEndIf)?
        .drain())
}

/// Builds the singleton-continuation redeem script: the spending input must
/// authorize exactly one continuation output, and the spend must be signed
/// by `owner_pub_key`. This is the per-output rule for individually
/// transferable covenant outputs, preventing both splitting and merging.
pub fn singleton_script(owner_pub_key: &[u8; 32]) -> ScriptBuilderResult<Vec<u8>> {
    Ok(ScriptBuilder::new()
        .add_op(OpTxInputIndex)?
        .add_op(OpAuthOutputCount)?
        .add_op(OpTrue)?
        .add_op(OpEqualVerify)?
        .add_data(owner_pub_key)?
        .add_op(OpCheckSig)?
        .drain())
}

/// Builds the leader redeem script for an `lanes`-way joint conservation
/// check: the covenant input at position 0 sums the amounts of covenant
/// inputs `0..lanes` and covenant outputs `0..lanes` and asserts both totals
/// are equal, then requires the owner signature.
///
/// The positional queries each consume the covenant id from the stack, so
/// the id is parked on the alt stack between queries. The loop below unrolls
/// the `2 * lanes` queries at construction time; the stack machine itself
/// has no iteration construct.
pub fn conservation_leader_script(owner_pub_key: &[u8; 32], lanes: usize) -> ScriptBuilderResult<Vec<u8>> {
    assert!(lanes >= 1, "a conservation check needs at least one lane");
    let mut builder = ScriptBuilder::new();

    // Fetch our covenant id and verify we occupy the leader position.
    builder
        .add_op(OpTxInputIndex)?
        .add_op(OpInputCovenantId)?
        .add_op(OpDup)?
        .add_op(OpFalse)?
        .add_op(OpCovInputIdx)?
        .add_op(OpTxInputIndex)?
        .add_op(OpEqualVerify)?
        .add_op(OpToAltStack)?;

    let total_queries = 2 * lanes;
    for query in 0..total_queries {
        let (lane, position_op, amount_op) =
            if query < lanes { (query, OpCovInputIdx, OpTxInputAmount) } else { (query - lanes, OpCovOutputIdx, OpTxOutputAmount) };

        builder.add_op(OpFromAltStack)?;
        // Keep a copy of the covenant id around for every query but the last.
        if query < total_queries - 1 {
            builder.add_op(OpDup)?.add_op(OpToAltStack)?;
        }
        builder.add_i64(lane as i64)?.add_op(position_op)?.add_op(amount_op)?;
        // Accumulate within each side of the conservation equation.
        if lane > 0 {
            builder.add_op(OpAdd)?;
        }
    }

    // total_in == total_out, then the owner signs off.
    builder.add_op(OpEqualVerify)?.add_data(owner_pub_key)?.add_op(OpCheckSig)?;
    Ok(builder.drain())
}

/// Builds the delegator redeem script: verifies that the leader (covenant
/// position 0) sits at a strictly lower input index, attesting that the
/// aggregate conservation check already ran, then requires the owner
/// signature.
pub fn conservation_delegator_script(owner_pub_key: &[u8; 32]) -> ScriptBuilderResult<Vec<u8>> {
    Ok(ScriptBuilder::new()
        .add_op(OpTxInputIndex)?
        .add_op(OpInputCovenantId)?
        .add_op(OpFalse)?
        .add_op(OpCovInputIdx)?
        .add_op(OpTxInputIndex)?
        .add_op(OpLessThan)?
        .add_op(OpVerify)?
        .add_data(owner_pub_key)?
        .add_op(OpCheckSig)?
        .drain())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kaspa_covenant_txscript::standard::pay_to_pub_key;

    const OWNER: [u8; 32] = [0xaa; 32];
    const RECOVERY: [u8; 32] = [0xbb; 32];

    fn owner_sig_suffix() -> Vec<u8> {
        let mut suffix = vec![OpData32];
        suffix.extend_from_slice(&OWNER);
        suffix.push(OpCheckSig);
        suffix
    }

    #[test]
    fn test_single_recipient_layout() {
        let recipient = pay_to_pub_key(&[0x11; 32]);
        let script = single_recipient_script(&recipient, &OWNER).unwrap();

        let mut expected = vec![OpTxOutputCount, OpTrue, OpEqualVerify, OpFalse, OpTxOutputSpk];
        // The recipient spk is 36 bytes once version-prefixed, pushed with OpData36.
        expected.push(OpData36);
        expected.extend_from_slice(&recipient.to_bytes());
        expected.push(OpEqualVerify);
        expected.extend(owner_sig_suffix());
        assert_eq!(script, expected);
    }

    #[test]
    fn test_vault_layout() {
        let recovery_spk = pay_to_pub_key(&[0x22; 32]);
        let lock_time = 500u64;
        let script = vault_script(&OWNER, &RECOVERY, &recovery_spk, lock_time).unwrap();

        let mut expected = vec![OpIf, OpFalse, OpTxOutputSpk, OpData36];
        expected.extend_from_slice(&recovery_spk.to_bytes());
        expected.extend([OpEqualVerify, OpTxOutputCount, OpTrue, OpEqualVerify, OpData32]);
        expected.extend_from_slice(&RECOVERY);
        expected.extend([OpCheckSig, OpElse]);
        // 500 = 0x01f4 little-endian, a two byte push.
        expected.extend([OpData2, 0xf4, 0x01]);
        expected.extend([OpCheckLockTimeVerify, OpDrop, OpTxInputIndex, OpAuthOutputCount, OpTrue, OpEqualVerify]);
        expected.extend(owner_sig_suffix());
        expected.push(OpEndIf);
        assert_eq!(script, expected);
    }

    #[test]
    fn test_singleton_layout() {
        let script = singleton_script(&OWNER).unwrap();
        let mut expected = vec![OpTxInputIndex, OpAuthOutputCount, OpTrue, OpEqualVerify];
        expected.extend(owner_sig_suffix());
        assert_eq!(script, expected);
    }

    #[test]
    fn test_delegator_layout() {
        let script = conservation_delegator_script(&OWNER).unwrap();
        let mut expected = vec![OpTxInputIndex, OpInputCovenantId, OpFalse, OpCovInputIdx, OpTxInputIndex, OpLessThan, OpVerify];
        expected.extend(owner_sig_suffix());
        assert_eq!(script, expected);
    }

    #[test]
    fn test_leader_layout_two_lanes() {
        let script = conservation_leader_script(&OWNER, 2).unwrap();

        let mut expected = vec![
            // Leader position check, covenant id parked on the alt stack.
            OpTxInputIndex,
            OpInputCovenantId,
            OpDup,
            OpFalse,
            OpCovInputIdx,
            OpTxInputIndex,
            OpEqualVerify,
            OpToAltStack,
            // Covenant input 0.
            OpFromAltStack,
            OpDup,
            OpToAltStack,
            OpFalse,
            OpCovInputIdx,
            OpTxInputAmount,
            // Covenant input 1.
            OpFromAltStack,
            OpDup,
            OpToAltStack,
            OpTrue,
            OpCovInputIdx,
            OpTxInputAmount,
            OpAdd,
            // Covenant output 0.
            OpFromAltStack,
            OpDup,
            OpToAltStack,
            OpFalse,
            OpCovOutputIdx,
            OpTxOutputAmount,
            // Covenant output 1 consumes the last alt stack copy.
            OpFromAltStack,
            OpTrue,
            OpCovOutputIdx,
            OpTxOutputAmount,
            OpAdd,
            // Conservation and signature.
            OpEqualVerify,
        ];
        expected.extend(owner_sig_suffix());
        assert_eq!(script, expected);
    }

    #[test]
    fn test_leader_lane_indices_use_minimal_pushes() {
        // With 18 lanes the indices 17.. no longer fit small-int opcodes and
        // must fall back to minimal data pushes.
        let script = conservation_leader_script(&OWNER, 18).unwrap();
        let needle = [OpData1, 0x11, OpCovInputIdx, OpTxInputAmount];
        assert!(script.windows(needle.len()).any(|w| w == needle), "lane 17 must be pushed as OpData1 0x11");
    }
}
