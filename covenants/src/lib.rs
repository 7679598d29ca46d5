//! Covenant SDK for Kaspa-style UTXO transactions.
//!
//! Covenants constrain how an output may be spent by inspecting the spending
//! transaction from within its script. This crate provides the building
//! blocks for working with them off-chain:
//!
//! - [`identity`]: covenant id derivation binding a creating outpoint to its
//!   ordered authorized outputs;
//! - [`templates`]: redeem script templates (forced recipient, vault,
//!   singleton continuation, joint conservation);
//! - [`unlock`]: unlock script assembly revealing a redeem script, with an
//!   optional branch selector;
//! - [`assembler`]: a mass-aware transaction pipeline that measures, prices,
//!   signs and submits a spend.

pub mod assembler;
pub mod error;
pub mod identity;
pub mod templates;
pub mod unlock;

pub use error::{CovenantError, CovenantResult};
