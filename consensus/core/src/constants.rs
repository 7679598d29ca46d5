/// The current transaction version. Outputs carrying a covenant binding
/// require version >= 1, and version 1 IDs commit to the binding.
pub const TX_VERSION: u16 = 1;

/// SompiPerKaspa is the number of sompi in one kaspa (1 KAS).
pub const SOMPI_PER_KASPA: u64 = 100_000_000;

/// The parameter for scaling inverse KAS value to mass units (KIP-0009).
pub const STORAGE_MASS_PARAMETER: u64 = SOMPI_PER_KASPA * 10_000;

/// The parameter defining how much mass per byte to charge for transient storage.
pub const TRANSIENT_BYTE_TO_MASS_FACTOR: u64 = 4;

/// Default consensus rates for converting serialized size and script
/// complexity into compute mass.
pub const MASS_PER_TX_BYTE: u64 = 1;
pub const MASS_PER_SCRIPT_PUB_KEY_BYTE: u64 = 10;
pub const MASS_PER_SIG_OP: u64 = 1000;
