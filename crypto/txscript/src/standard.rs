use crate::{
    opcodes::codes::{OpBlake2b, OpCheckSig, OpData32, OpEqual},
    script_builder::{ScriptBuilder, ScriptBuilderResult},
};
use blake2b_simd::Params;
use kaspa_covenant_consensus_core::tx::{ScriptPublicKey, ScriptVec};
use smallvec::SmallVec;
use std::iter::once;

/// The script public key version used by all standard scripts.
pub const STANDARD_SCRIPT_VERSION: u16 = 0;

/// Creates a new script to pay a transaction output to a 32-byte schnorr pubkey.
pub fn pay_to_pub_key(pub_key: &[u8]) -> ScriptPublicKey {
    assert_eq!(pub_key.len(), 32);
    let script: ScriptVec = SmallVec::from_iter(once(OpData32).chain(pub_key.iter().copied()).chain(once(OpCheckSig)));
    ScriptPublicKey::new(STANDARD_SCRIPT_VERSION, script)
}

/// Creates a new script to pay a transaction output to a script hash.
/// It is expected that the input is a valid hash.
fn pay_to_script_hash(script_hash: &[u8]) -> ScriptVec {
    assert_eq!(script_hash.len(), 32);
    SmallVec::from_iter([OpBlake2b, OpData32].iter().copied().chain(script_hash.iter().copied()).chain(once(OpEqual)))
}

/// Takes a script and returns an equivalent pay-to-script-hash script
pub fn pay_to_script_hash_script(redeem_script: &[u8]) -> ScriptPublicKey {
    let redeem_script_hash = Params::new().hash_length(32).to_state().update(redeem_script).finalize();
    let script = pay_to_script_hash(redeem_script_hash.as_bytes());
    ScriptPublicKey::new(STANDARD_SCRIPT_VERSION, script)
}

/// Generates a signature script that fits a pay-to-script-hash script
pub fn pay_to_script_hash_signature_script(redeem_script: Vec<u8>, signature: Vec<u8>) -> ScriptBuilderResult<Vec<u8>> {
    let redeem_script_as_data = ScriptBuilder::new().add_data(&redeem_script)?.drain();
    Ok(Vec::from_iter(signature.iter().copied().chain(redeem_script_as_data.iter().copied())))
}
