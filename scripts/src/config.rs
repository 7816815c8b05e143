//! Configuration values built once at startup and passed to each command

use crate::batch::{gas::GasSchedule, row::RowFormat};

/// The network and identity the scripts operate with
#[derive(Clone)]
pub struct ScriptConfig {
    /// The deployment environment, e.g. `devnet` or `mainnet`
    pub environment: String,
    /// Network RPC URL
    pub rpc_url: String,
    /// Private key of the operator account
    pub priv_key: String,
    /// Path to the deployments file
    pub deployments_path: String,
}

/// The settings of one batch run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchConfig {
    /// The delimiter conventions of the input file
    pub format: RowFormat,
    /// Whether the first line of the input is a header
    pub has_header: bool,
    /// The gas limit formulas
    pub gas: GasSchedule,
}
