//! Constants used in the staking pool scripts

/// The gas limit attached to a single-collection score update, and the base
/// of every per-item budget
pub const BASE_GAS_LIMIT: u64 = 15_000_000;

/// The additional gas reserved for each item nonce a score update touches
pub const PER_ITEM_GAS: u64 = 100_000;

/// The hard ceiling on the gas limit of a nonce range update
pub const MAX_RANGE_GAS_LIMIT: u64 = 600_000_000;

/// The gas limit used for contract deployment and upgrade transactions
pub const DEFAULT_DEPLOY_GAS_LIMIT: u64 = 200_000_000;

/// The default column delimiter of the batch input files
pub const DEFAULT_COLUMN_DELIMITER: char = ',';

/// The default delimiter between item nonces within the `nonces` column
pub const DEFAULT_NONCE_DELIMITER: char = ';';

/// The number of columns in a score row
pub const SCORE_ROW_COLUMNS: usize = 6;

/// The number of columns in a stake reset row
pub const RESET_ROW_COLUMNS: usize = 4;

/// The default RPC URL, a local devnet node
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// The default deployment environment
pub const DEFAULT_ENVIRONMENT: &str = "devnet";

/// The default path of the deployments file
pub const DEFAULT_DEPLOYMENTS_PATH: &str = "deployments.json";

/// The default path of the ERC1967 proxy bytecode artifact
pub const DEFAULT_PROXY_BYTECODE_PATH: &str = "artifacts/ERC1967Proxy.bin";

/// The deployments key in the `deployments.json` file
pub const DEPLOYMENTS_KEY: &str = "deployments";

/// The staking pool proxy contract key in the `deployments.json` file
///
/// This is the address all score updates are sent to
pub const STAKING_CONTRACT_KEY: &str = "staking_contract";

/// The staking pool implementation contract key in the `deployments.json` file
pub const STAKING_IMPLEMENTATION_KEY: &str = "staking_implementation";
