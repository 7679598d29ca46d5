use kaspa_covenant_txscript::script_builder::ScriptBuilderError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CovenantError {
    #[error(transparent)]
    Script(#[from] ScriptBuilderError),

    #[error("authorized output at index {0} already carries a covenant binding")]
    BoundAuthOutput(usize),

    #[error("draft outputs total {outputs} does not match inputs total {inputs}")]
    UnbalancedDraft { inputs: u64, outputs: u64 },

    #[error("insufficient funds: fee of {required} sompi exceeds the {available} sompi available in the fee-paying output")]
    InsufficientFunds { available: u64, required: u64 },

    #[error("transaction storage mass is incomputable (an output amount is too small)")]
    MassIncomputable,

    #[error("rpc error: {0}")]
    Rpc(String),
}

pub type CovenantResult<T> = std::result::Result<T, CovenantError>;
