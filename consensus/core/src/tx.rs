use crate::{hashing, subnets::SubnetworkId};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt::{Debug, Display, Formatter};

pub use kaspa_covenant_hashes::Hash;

/// Represents the ID of a Kaspa transaction
pub type TransactionId = Hash;

/// Size of the inline storage backing a script public key. Chosen to fit
/// the longest standard script (33-byte key + opcodes) without spilling
/// to the heap.
pub const SCRIPT_VECTOR_SIZE: usize = 36;

/// Used as the underlying type for script public key data, optimized for the common p2pk script size (34).
pub type ScriptVec = SmallVec<[u8; SCRIPT_VECTOR_SIZE]>;

/// Represents a Kaspad ScriptPublicKey
#[derive(Default, Debug, PartialEq, Eq, Clone, Hash, Serialize, Deserialize)]
pub struct ScriptPublicKey {
    version: u16,
    script: ScriptVec,
}

impl ScriptPublicKey {
    pub fn new(version: u16, script: ScriptVec) -> Self {
        Self { version, script }
    }

    pub fn from_vec(version: u16, script: Vec<u8>) -> Self {
        Self { version, script: ScriptVec::from_vec(script) }
    }

    pub fn version(&self) -> u16 {
        self.version
    }

    pub fn script(&self) -> &[u8] {
        &self.script
    }
}

/// Declares that an output's continued spending authority is proven by the
/// input at `authorizing_input` of the spending transaction carrying
/// `covenant_id`. Attached to outputs of version >= 1 transactions.
#[derive(Debug, PartialEq, Eq, Clone, Hash, Serialize, Deserialize)]
pub struct CovenantBinding {
    pub authorizing_input: u16,
    pub covenant_id: Hash,
}

impl CovenantBinding {
    pub fn new(authorizing_input: u16, covenant_id: Hash) -> Self {
        Self { authorizing_input, covenant_id }
    }
}

/// Holds details about an individual transaction output in a utxo
/// set such as whether or not it was contained in a coinbase tx, the daa
/// score of the block that accepts the tx, its public key script, and how
/// much it pays. A covenant-bound output also records its covenant ID.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct UtxoEntry {
    pub amount: u64,
    pub script_public_key: ScriptPublicKey,
    pub block_daa_score: u64,
    pub is_coinbase: bool,
    pub covenant_id: Option<Hash>,
}

impl UtxoEntry {
    pub fn new(amount: u64, script_public_key: ScriptPublicKey, block_daa_score: u64, is_coinbase: bool) -> Self {
        Self { amount, script_public_key, block_daa_score, is_coinbase, covenant_id: None }
    }

    pub fn new_covenant(
        amount: u64,
        script_public_key: ScriptPublicKey,
        block_daa_score: u64,
        is_coinbase: bool,
        covenant_id: Hash,
    ) -> Self {
        Self { amount, script_public_key, block_daa_score, is_coinbase, covenant_id: Some(covenant_id) }
    }
}

/// Represents a Kaspa transaction outpoint
#[derive(Eq, Hash, PartialEq, Debug, Copy, Clone, Serialize, Deserialize)]
pub struct TransactionOutpoint {
    pub transaction_id: TransactionId,
    pub index: u32,
}

impl TransactionOutpoint {
    pub fn new(transaction_id: TransactionId, index: u32) -> Self {
        Self { transaction_id, index }
    }
}

impl Display for TransactionOutpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.transaction_id, self.index)
    }
}

/// Represents a Kaspa transaction input
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct TransactionInput {
    pub previous_outpoint: TransactionOutpoint,
    pub signature_script: Vec<u8>,
    pub sequence: u64,
    pub sig_op_count: u8,
}

impl TransactionInput {
    pub fn new(previous_outpoint: TransactionOutpoint, signature_script: Vec<u8>, sequence: u64, sig_op_count: u8) -> Self {
        Self { previous_outpoint, signature_script, sequence, sig_op_count }
    }
}

/// Represents a Kaspad transaction output
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct TransactionOutput {
    pub value: u64,
    pub script_public_key: ScriptPublicKey,
    pub covenant: Option<CovenantBinding>,
}

impl TransactionOutput {
    pub fn new(value: u64, script_public_key: ScriptPublicKey) -> Self {
        Self { value, script_public_key, covenant: None }
    }

    pub fn new_covenant(value: u64, script_public_key: ScriptPublicKey, covenant: CovenantBinding) -> Self {
        Self { value, script_public_key, covenant: Some(covenant) }
    }
}

/// Represents a Kaspa transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub version: u16,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub lock_time: u64,
    pub subnetwork_id: SubnetworkId,
    pub gas: u64,
    pub payload: Vec<u8>,

    /// Holds a commitment to the storage mass (KIP-0009). Zero until computed.
    mass: u64,
}

impl Transaction {
    pub fn new(
        version: u16,
        inputs: Vec<TransactionInput>,
        outputs: Vec<TransactionOutput>,
        lock_time: u64,
        subnetwork_id: SubnetworkId,
        gas: u64,
        payload: Vec<u8>,
    ) -> Self {
        Self { version, inputs, outputs, lock_time, subnetwork_id, gas, payload, mass: 0 }
    }

    /// Determines whether or not a transaction is a coinbase transaction. A coinbase
    /// transaction is a special transaction created by miners that distributes fees and block subsidy
    /// to the previous blocks' miners, and specifies the script_pub_key that will be used to pay the current
    /// miner in future blocks.
    pub fn is_coinbase(&self) -> bool {
        self.subnetwork_id == crate::subnets::SUBNETWORK_ID_COINBASE
    }

    /// Returns the transaction ID. Note that this is a function of the
    /// unsigned transaction: signature scripts and the mass commitment
    /// are excluded.
    pub fn id(&self) -> TransactionId {
        hashing::tx::id(self)
    }

    pub fn mass(&self) -> u64 {
        self.mass
    }

    pub fn set_mass(&mut self, mass: u64) {
        self.mass = mass;
    }
}

/// A transaction bundled with the UTXO entries of its inputs, ready for
/// sighash computation and signing.
#[derive(Debug, Clone)]
pub struct SignableTransaction {
    pub tx: Transaction,
    pub entries: Vec<UtxoEntry>,
}

impl SignableTransaction {
    pub fn with_entries(tx: Transaction, entries: Vec<UtxoEntry>) -> Self {
        assert_eq!(tx.inputs.len(), entries.len(), "every input must have a matching utxo entry");
        Self { tx, entries }
    }

    pub fn as_verifiable(&self) -> PopulatedTransaction<'_> {
        PopulatedTransaction { tx: &self.tx, entries: &self.entries }
    }
}

/// A read-only view over a transaction with fully populated UTXO entries.
#[derive(Clone, Copy)]
pub struct PopulatedTransaction<'a> {
    pub tx: &'a Transaction,
    pub entries: &'a [UtxoEntry],
}

impl<'a> PopulatedTransaction<'a> {
    pub fn new(tx: &'a Transaction, entries: &'a [UtxoEntry]) -> Self {
        assert_eq!(tx.inputs.len(), entries.len(), "every input must have a matching utxo entry");
        Self { tx, entries }
    }
}

/// Abstracts the populated-transaction access pattern used by sighash
/// computation, signing, verification and contextual mass calculation.
pub trait VerifiableTransaction {
    fn tx(&self) -> &Transaction;

    /// Returns the `i`'th populated input
    fn populated_input(&self, index: usize) -> (&TransactionInput, &UtxoEntry);

    /// Returns an iterator over populated `(input, entry)` pairs. The
    /// iterator is cloneable so storage mass calculation can traverse the
    /// inputs twice.
    fn populated_inputs(&self) -> impl ExactSizeIterator<Item = (&TransactionInput, &UtxoEntry)> + Clone {
        (0..self.tx().inputs.len()).map(|i| self.populated_input(i))
    }

    fn inputs(&self) -> &[TransactionInput] {
        &self.tx().inputs
    }

    fn outputs(&self) -> &[TransactionOutput] {
        &self.tx().outputs
    }

    fn is_coinbase(&self) -> bool {
        self.tx().is_coinbase()
    }

    fn id(&self) -> TransactionId {
        self.tx().id()
    }
}

impl VerifiableTransaction for PopulatedTransaction<'_> {
    fn tx(&self) -> &Transaction {
        self.tx
    }

    fn populated_input(&self, index: usize) -> (&TransactionInput, &UtxoEntry) {
        (&self.tx.inputs[index], &self.entries[index])
    }
}
