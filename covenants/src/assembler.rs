//! Mass-aware transaction assembly.
//!
//! Building a covenant spend is a four step pipeline, with one type per
//! step: [`TransactionDraft`] collects inputs and target outputs,
//! [`MeasuredTransaction`] carries the mass of a placeholder rendition,
//! [`PricedTransaction`] has consulted the fee oracle and knows the fee, and
//! [`FinalTransaction`] is signed, unlocked and ready for submission. Each
//! step consumes the previous one, so a transaction cannot skip measurement
//! or be submitted with a stale mass.

use crate::{
    error::{CovenantError, CovenantResult},
    unlock::{unlock_script, unlock_script_len, SIGNATURE_SCRIPT_LEN},
};
use async_trait::async_trait;
use kaspa_covenant_consensus_core::{
    constants::TX_VERSION,
    hashing::sighash_type::SIG_HASH_ALL,
    mass::MassCalculator,
    sign,
    subnets::SUBNETWORK_ID_NATIVE,
    tx::{
        CovenantBinding, ScriptPublicKey, SignableTransaction, Transaction, TransactionId, TransactionInput, TransactionOutpoint,
        TransactionOutput, UtxoEntry,
    },
};
use log::debug;

/// A UTXO owned by the spender, as reported by the external UTXO tracker.
#[derive(Debug, Clone)]
pub struct UtxoEntryReference {
    pub outpoint: TransactionOutpoint,
    pub entry: UtxoEntry,
}

impl UtxoEntryReference {
    pub fn new(outpoint: TransactionOutpoint, entry: UtxoEntry) -> Self {
        Self { outpoint, entry }
    }
}

/// Describes how an input will eventually be unlocked. The final unlock
/// script is only assembled after signing, but its exact byte length is
/// known up front and is used to size the placeholder signature script
/// during mass measurement.
#[derive(Debug, Clone)]
pub enum UnlockContext {
    /// A plain schnorr signature against a pay-to-pubkey entry.
    PayToPubKey,
    /// A pay-to-script-hash entry revealing `redeem_script`, optionally
    /// preceded by a branch selector byte.
    ScriptHash { redeem_script: Vec<u8>, branch: Option<bool> },
}

impl UnlockContext {
    fn signature_script_len(&self) -> usize {
        match self {
            UnlockContext::PayToPubKey => SIGNATURE_SCRIPT_LEN,
            UnlockContext::ScriptHash { redeem_script, branch } => unlock_script_len(redeem_script, *branch),
        }
    }
}

#[derive(Debug, Clone)]
struct PlannedInput {
    utxo: UtxoEntryReference,
    unlock: UnlockContext,
}

#[derive(Debug, Clone)]
struct PlannedOutput {
    value: u64,
    script_public_key: ScriptPublicKey,
    covenant: Option<CovenantBinding>,
}

/// Obtains the current priority feerate (sompi per mass unit) from an
/// external oracle, typically the node's fee estimate call.
#[async_trait]
pub trait FeeEstimator {
    async fn priority_feerate(&self) -> CovenantResult<f64>;
}

/// Submits a fully assembled transaction to the network.
#[async_trait]
pub trait TransactionSubmitter {
    async fn submit_transaction(&self, transaction: &Transaction, allow_orphan: bool) -> CovenantResult<TransactionId>;
}

/// Produces the pre-encoded signature push for a single input.
pub trait InputSigner {
    fn sign_input(&self, tx: &SignableTransaction, input_index: usize) -> Vec<u8>;
}

impl InputSigner for secp256k1::Keypair {
    fn sign_input(&self, tx: &SignableTransaction, input_index: usize) -> Vec<u8> {
        sign::sign_input(&tx.as_verifiable(), input_index, self, SIG_HASH_ALL)
    }
}

/// Draft state: collects inputs and the target output shape. Output values
/// must sum to the input total; the fee is later taken out of the
/// designated fee-paying output.
#[derive(Debug, Clone, Default)]
pub struct TransactionDraft {
    inputs: Vec<PlannedInput>,
    outputs: Vec<PlannedOutput>,
    fee_paying_output: usize,
    lock_time: u64,
}

impl TransactionDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(mut self, utxo: UtxoEntryReference, unlock: UnlockContext) -> Self {
        self.inputs.push(PlannedInput { utxo, unlock });
        self
    }

    pub fn output(mut self, value: u64, script_public_key: ScriptPublicKey) -> Self {
        self.outputs.push(PlannedOutput { value, script_public_key, covenant: None });
        self
    }

    pub fn covenant_output(mut self, value: u64, script_public_key: ScriptPublicKey, covenant: CovenantBinding) -> Self {
        self.outputs.push(PlannedOutput { value, script_public_key, covenant: Some(covenant) });
        self
    }

    /// Selects which output absorbs the fee. Defaults to the first output.
    pub fn fee_paying_output(mut self, index: usize) -> Self {
        self.fee_paying_output = index;
        self
    }

    pub fn lock_time(mut self, lock_time: u64) -> Self {
        self.lock_time = lock_time;
        self
    }

    fn inputs_total(&self) -> u64 {
        self.inputs.iter().map(|input| input.utxo.entry.amount).sum()
    }

    fn outputs_total(&self) -> u64 {
        self.outputs.iter().map(|output| output.value).sum()
    }

    fn build_inputs(&self, placeholder: bool) -> Vec<TransactionInput> {
        self.inputs
            .iter()
            .map(|input| {
                let signature_script = if placeholder { vec![0u8; input.unlock.signature_script_len()] } else { vec![] };
                TransactionInput::new(input.utxo.outpoint, signature_script, 0, 1)
            })
            .collect()
    }

    fn build_outputs(&self) -> Vec<TransactionOutput> {
        self.outputs
            .iter()
            .map(|output| TransactionOutput {
                value: output.value,
                script_public_key: output.script_public_key.clone(),
                covenant: output.covenant.clone(),
            })
            .collect()
    }

    fn entries(&self) -> Vec<UtxoEntry> {
        self.inputs.iter().map(|input| input.utxo.entry.clone()).collect()
    }

    /// Measures the mass of this draft using a placeholder transaction whose
    /// signature scripts are zero-filled but already have their final byte
    /// length, so the measurement matches the submitted layout.
    pub fn measure(self, calculator: &MassCalculator) -> CovenantResult<MeasuredTransaction> {
        assert!(!self.inputs.is_empty(), "a draft needs at least one input");
        assert!(self.fee_paying_output < self.outputs.len(), "the fee-paying output must exist");

        let (inputs_total, outputs_total) = (self.inputs_total(), self.outputs_total());
        if inputs_total != outputs_total {
            return Err(CovenantError::UnbalancedDraft { inputs: inputs_total, outputs: outputs_total });
        }

        let tx = Transaction::new(
            TX_VERSION,
            self.build_inputs(true),
            self.build_outputs(),
            self.lock_time,
            SUBNETWORK_ID_NATIVE,
            0,
            vec![],
        );
        let signable = SignableTransaction::with_entries(tx, self.entries());
        let non_contextual = calculator.calc_non_contextual_masses(&signable.tx);
        let contextual = calculator.calc_contextual_masses(&signable.as_verifiable()).ok_or(CovenantError::MassIncomputable)?;
        let mass = contextual.max(non_contextual);
        debug!("measured draft mass: {mass} ({non_contextual}, {contextual})");

        Ok(MeasuredTransaction { draft: self, calculator: calculator.clone(), mass })
    }
}

/// Measured state: the draft plus the mass of its placeholder rendition.
pub struct MeasuredTransaction {
    draft: TransactionDraft,
    calculator: MassCalculator,
    mass: u64,
}

impl MeasuredTransaction {
    pub fn mass(&self) -> u64 {
        self.mass
    }

    /// Consults the fee oracle and prices the transaction: fee = mass x
    /// feerate, rounded up. Fails with `InsufficientFunds` before any
    /// further network interaction if the fee-paying output cannot absorb
    /// the fee.
    pub async fn price(self, estimator: &impl FeeEstimator) -> CovenantResult<PricedTransaction> {
        let feerate = estimator.priority_feerate().await?;
        let fee = (self.mass as f64 * feerate).ceil() as u64;
        let available = self.draft.outputs[self.draft.fee_paying_output].value;
        debug!("pricing transaction: mass {} x feerate {feerate} = fee {fee} (available {available})", self.mass);
        if fee >= available {
            return Err(CovenantError::InsufficientFunds { available, required: fee });
        }
        Ok(PricedTransaction { draft: self.draft, calculator: self.calculator, mass: self.mass, feerate, fee })
    }
}

/// Priced state: fee known, amounts not yet adjusted.
pub struct PricedTransaction {
    draft: TransactionDraft,
    calculator: MassCalculator,
    mass: u64,
    feerate: f64,
    fee: u64,
}

impl PricedTransaction {
    pub fn fee(&self) -> u64 {
        self.fee
    }

    pub fn feerate(&self) -> f64 {
        self.feerate
    }

    /// Builds the final transaction: subtracts the fee from the fee-paying
    /// output, signs every input, installs the unlock scripts and commits
    /// the recomputed mass of the exact byte layout being submitted.
    pub fn finalize(self, signer: &impl InputSigner) -> CovenantResult<FinalTransaction> {
        let mut outputs = self.draft.build_outputs();
        outputs[self.draft.fee_paying_output].value -= self.fee;

        let tx = Transaction::new(
            TX_VERSION,
            self.draft.build_inputs(false),
            outputs,
            self.draft.lock_time,
            SUBNETWORK_ID_NATIVE,
            0,
            vec![],
        );
        let mut signable = SignableTransaction::with_entries(tx, self.draft.entries());

        // The signature digest never commits to signature scripts, so the
        // inputs can be signed and unlocked one by one.
        for index in 0..self.draft.inputs.len() {
            let signature = signer.sign_input(&signable, index);
            let signature_script = match &self.draft.inputs[index].unlock {
                UnlockContext::PayToPubKey => signature,
                UnlockContext::ScriptHash { redeem_script, branch } => unlock_script(&signature, *branch, redeem_script)?,
            };
            signable.tx.inputs[index].signature_script = signature_script;
        }

        // Commit the mass of the signed layout. The placeholder signature
        // scripts already had the final length, so only the storage mass
        // can move (the fee subtraction lowered the output amounts).
        let non_contextual = self.calculator.calc_non_contextual_masses(&signable.tx);
        let contextual = self.calculator.calc_contextual_masses(&signable.as_verifiable()).ok_or(CovenantError::MassIncomputable)?;
        let mass = contextual.max(non_contextual);
        signable.tx.set_mass(mass);
        debug!("finalized transaction {} with mass {mass} and fee {} sompi", signable.tx.id(), self.fee);

        Ok(FinalTransaction { signable, measured_mass: self.mass, fee: self.fee, feerate: self.feerate })
    }
}

/// Final state: signed, unlocked and carrying its committed mass.
pub struct FinalTransaction {
    signable: SignableTransaction,
    measured_mass: u64,
    fee: u64,
    feerate: f64,
}

impl FinalTransaction {
    pub fn transaction(&self) -> &Transaction {
        &self.signable.tx
    }

    pub fn signable(&self) -> &SignableTransaction {
        &self.signable
    }

    pub fn mass(&self) -> u64 {
        self.signable.tx.mass()
    }

    /// The mass measured at the placeholder stage, from which the fee was
    /// derived.
    pub fn measured_mass(&self) -> u64 {
        self.measured_mass
    }

    pub fn fee(&self) -> u64 {
        self.fee
    }

    pub fn feerate(&self) -> f64 {
        self.feerate
    }

    /// Submits the transaction, disallowing orphans. Rejections are
    /// reported verbatim; no retry or mutation is attempted here.
    pub async fn submit(&self, submitter: &impl TransactionSubmitter) -> CovenantResult<TransactionId> {
        let id = submitter.submit_transaction(&self.signable.tx, false).await?;
        debug!("submitted transaction {id}");
        Ok(id)
    }
}
