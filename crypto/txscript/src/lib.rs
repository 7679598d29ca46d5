pub mod opcodes;
pub mod script_builder;
pub mod standard;

use kaspa_covenant_consensus_core::tx::ScriptPublicKey;

pub const MAX_SCRIPTS_SIZE: usize = 10_000;
pub const MAX_SCRIPT_ELEMENT_SIZE: usize = 520;

/// Encodes a script public key the way script introspection opcodes expose
/// it on the stack: the version as big-endian bytes followed by the script.
pub trait SpkEncoding {
    fn to_bytes(&self) -> Vec<u8>;
}

impl SpkEncoding for ScriptPublicKey {
    fn to_bytes(&self) -> Vec<u8> {
        self.version().to_be_bytes().into_iter().chain(self.script().iter().copied()).collect()
    }
}
