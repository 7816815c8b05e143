//! Definitions of CLI arguments and commands for the staking pool scripts

use clap::{Args, Parser, Subcommand};
use tool_utils::{
    prompt_for_bool, prompt_for_eth_address, prompt_for_input, prompt_for_menu_choice,
    prompt_with_default,
};

use crate::{
    batch::{gas::GasSchedule, row::RowFormat},
    commands::{deploy, reset_stakes, set_scores, upgrade},
    config::{BatchConfig, ScriptConfig},
    constants::{
        BASE_GAS_LIMIT, DEFAULT_COLUMN_DELIMITER, DEFAULT_DEPLOYMENTS_PATH,
        DEFAULT_DEPLOY_GAS_LIMIT, DEFAULT_ENVIRONMENT, DEFAULT_NONCE_DELIMITER,
        DEFAULT_PROXY_BYTECODE_PATH, DEFAULT_RPC_URL, MAX_RANGE_GAS_LIMIT, PER_ITEM_GAS,
    },
    errors::ScriptError,
};

/// The options of the interactive menu, in `Command` order
const MENU_OPTIONS: [&str; 4] = ["Deploy", "Upgrade", "Set pool scores", "Reset stakes"];

/// Administer the staking pool contract
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Deployment environment, selects the contract addresses in the deployments file
    #[arg(short, long, env = "ENVIRONMENT", default_value = DEFAULT_ENVIRONMENT)]
    pub environment: String,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Private key of the operator account
    #[arg(short, long, env = "PKEY")]
    pub priv_key: String,

    /// Path to the deployments file
    #[arg(short, long, env = "DEPLOYMENTS_PATH", default_value = DEFAULT_DEPLOYMENTS_PATH)]
    pub deployments_path: String,

    /// The command to run, chosen from a menu when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// The configuration shared by every command
    pub fn config(&self) -> ScriptConfig {
        ScriptConfig {
            environment: self.environment.clone(),
            rpc_url: self.rpc_url.clone(),
            priv_key: self.priv_key.clone(),
            deployments_path: self.deployments_path.clone(),
        }
    }
}

/// The commands supported by the scripts
#[derive(Subcommand)]
pub enum Command {
    /// Deploy the staking pool implementation behind an upgradeable proxy
    Deploy(DeployArgs),
    /// Deploy a new staking pool implementation and point the proxy at it
    Upgrade(UpgradeArgs),
    /// Apply a batch of pool score updates from a delimited file
    SetScores(SetScoresArgs),
    /// Reset a batch of staked positions from a delimited file
    ResetStakes(ResetStakesArgs),
}

impl Command {
    /// Run the command against the configured network
    pub async fn run(self, config: &ScriptConfig) -> Result<(), ScriptError> {
        match self {
            Command::Deploy(args) => deploy(args, config).await,
            Command::Upgrade(args) => upgrade(args, config).await,
            Command::SetScores(args) => set_scores(args, config).await,
            Command::ResetStakes(args) => reset_stakes(args, config).await,
        }
    }

    /// Choose a command and its arguments interactively
    pub fn prompt() -> Result<Self, ScriptError> {
        let choice =
            prompt_for_menu_choice("Please choose an option", &MENU_OPTIONS).map_err(prompt_err)?;

        match choice {
            0 => Ok(Command::Deploy(DeployArgs::prompt()?)),
            1 => Ok(Command::Upgrade(UpgradeArgs::prompt()?)),
            2 => Ok(Command::SetScores(SetScoresArgs {
                batch: BatchArgs::prompt()?,
                base_gas: BASE_GAS_LIMIT,
                per_item_gas: PER_ITEM_GAS,
                max_range_gas: MAX_RANGE_GAS_LIMIT,
            })),
            3 => Ok(Command::ResetStakes(ResetStakesArgs {
                batch: BatchArgs::prompt()?,
                gas_limit: BASE_GAS_LIMIT,
            })),
            _ => Err(ScriptError::InvalidArgument("Invalid option".to_string())),
        }
    }
}

/// Deploy the staking pool contract.
///
/// The implementation is deployed first, then an ERC1967 proxy pointing at it
/// which calls `initialize` on construction. Score updates are sent to the proxy.
#[derive(Args)]
pub struct DeployArgs {
    /// Path to the hex-encoded staking pool implementation bytecode
    #[arg(short, long)]
    pub bytecode: String,

    /// Path to the hex-encoded ERC1967 proxy bytecode
    #[arg(long, default_value = DEFAULT_PROXY_BYTECODE_PATH)]
    pub proxy_bytecode: String,

    /// Address of the token rewards are paid in
    #[arg(long)]
    pub reward_token: String,

    /// Gas limit of each deployment transaction
    #[arg(long, default_value_t = DEFAULT_DEPLOY_GAS_LIMIT)]
    pub gas_limit: u64,
}

impl DeployArgs {
    /// Prompt for the deployment arguments
    fn prompt() -> Result<Self, ScriptError> {
        Ok(Self {
            bytecode: prompt_for_input("Path to the implementation bytecode").map_err(prompt_err)?,
            proxy_bytecode: prompt_with_default(
                "Path to the proxy bytecode",
                DEFAULT_PROXY_BYTECODE_PATH,
            )
            .map_err(prompt_err)?,
            reward_token: prompt_for_eth_address("Enter reward token address")
                .map_err(prompt_err)?,
            gas_limit: DEFAULT_DEPLOY_GAS_LIMIT,
        })
    }
}

/// Upgrade the staking pool implementation
#[derive(Args)]
pub struct UpgradeArgs {
    /// Path to the hex-encoded bytecode of the new implementation
    #[arg(short, long)]
    pub bytecode: String,

    /// Optional calldata, in hex form, with which to
    /// call the new implementation when upgrading
    #[arg(short, long)]
    pub calldata: Option<String>,

    /// Gas limit of the deployment and upgrade transactions
    #[arg(long, default_value_t = DEFAULT_DEPLOY_GAS_LIMIT)]
    pub gas_limit: u64,
}

impl UpgradeArgs {
    /// Prompt for the upgrade arguments
    fn prompt() -> Result<Self, ScriptError> {
        let bytecode =
            prompt_for_input("Path to the new implementation bytecode").map_err(prompt_err)?;
        let calldata = prompt_for_input("Upgrade calldata in hex (leave empty for none)")
            .map_err(prompt_err)?;

        Ok(Self {
            bytecode,
            calldata: (!calldata.is_empty()).then_some(calldata),
            gas_limit: DEFAULT_DEPLOY_GAS_LIMIT,
        })
    }
}

/// The input file of a batch command
#[derive(Args)]
pub struct BatchArgs {
    /// Path to the delimited input file
    #[arg(short, long)]
    pub input: String,

    /// Whether the first line of the input is a header
    #[arg(long)]
    pub has_header: bool,

    /// The delimiter between columns
    #[arg(long, default_value_t = DEFAULT_COLUMN_DELIMITER)]
    pub delimiter: char,

    /// The delimiter between item nonces in the `nonces` column
    #[arg(long, default_value_t = DEFAULT_NONCE_DELIMITER)]
    pub nonce_delimiter: char,
}

impl BatchArgs {
    /// Build the batch settings for the given gas schedule
    pub fn batch_config(&self, gas: GasSchedule) -> Result<BatchConfig, ScriptError> {
        Ok(BatchConfig {
            format: RowFormat::new(self.delimiter, self.nonce_delimiter)?,
            has_header: self.has_header,
            gas,
        })
    }

    /// Prompt for the input file
    fn prompt() -> Result<Self, ScriptError> {
        let input = prompt_for_input("Path to the input file").map_err(prompt_err)?;
        let has_header =
            prompt_for_bool("Does the file start with a header row", true).map_err(prompt_err)?;

        Ok(Self {
            input,
            has_header,
            delimiter: DEFAULT_COLUMN_DELIMITER,
            nonce_delimiter: DEFAULT_NONCE_DELIMITER,
        })
    }
}

/// Apply pool score updates.
///
/// Each row reads `collectionId,nonces,rangeStart,rangeEnd,score,fullSetBonusScore`,
/// where `nonces` is `;`-joined and every column but the collection and score may be empty.
#[derive(Args)]
pub struct SetScoresArgs {
    /// The input file
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Gas limit of a single-collection update, and base of every per-item limit
    #[arg(long, default_value_t = BASE_GAS_LIMIT)]
    pub base_gas: u64,

    /// Additional gas per item nonce updated
    #[arg(long, default_value_t = PER_ITEM_GAS)]
    pub per_item_gas: u64,

    /// Ceiling on the gas limit of a nonce range update
    #[arg(long, default_value_t = MAX_RANGE_GAS_LIMIT)]
    pub max_range_gas: u64,
}

impl SetScoresArgs {
    /// The gas schedule configured on the command line
    pub fn gas_schedule(&self) -> GasSchedule {
        GasSchedule {
            base: self.base_gas,
            per_item: self.per_item_gas,
            range_ceiling: self.max_range_gas,
        }
    }
}

/// Reset staked positions.
///
/// Each row reads `userAddress,collectionId,nonce,amount`.
#[derive(Args)]
pub struct ResetStakesArgs {
    /// The input file
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Gas limit of each reset transaction
    #[arg(long, default_value_t = BASE_GAS_LIMIT)]
    pub gas_limit: u64,
}

/// Map a prompt failure into a script error
fn prompt_err(e: impl ToString) -> ScriptError {
    ScriptError::InvalidArgument(e.to_string())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use crate::constants::{BASE_GAS_LIMIT, MAX_RANGE_GAS_LIMIT, PER_ITEM_GAS};

    use super::{Cli, Command};

    const PKEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_set_scores_defaults() {
        let cli = Cli::try_parse_from([
            "staking-scripts",
            "--priv-key",
            PKEY,
            "set-scores",
            "--input",
            "scores.csv",
            "--has-header",
        ])
        .unwrap();

        let Some(Command::SetScores(args)) = cli.command else {
            panic!("expected set-scores");
        };

        let schedule = args.gas_schedule();
        assert_eq!(schedule.base, BASE_GAS_LIMIT);
        assert_eq!(schedule.per_item, PER_ITEM_GAS);
        assert_eq!(schedule.range_ceiling, MAX_RANGE_GAS_LIMIT);

        let config = args.batch.batch_config(schedule).unwrap();
        assert!(config.has_header);
        assert_eq!(config.format.column_delimiter(), ',');
        assert_eq!(config.format.nonce_delimiter(), ';');
    }

    #[test]
    fn test_clashing_delimiters_rejected() {
        let cli = Cli::try_parse_from([
            "staking-scripts",
            "--priv-key",
            PKEY,
            "set-scores",
            "--input",
            "scores.csv",
            "--delimiter",
            ";",
        ])
        .unwrap();

        let Some(Command::SetScores(args)) = cli.command else {
            panic!("expected set-scores");
        };
        assert!(args.batch.batch_config(args.gas_schedule()).is_err());
    }

    #[test]
    fn test_missing_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["staking-scripts", "--priv-key", PKEY, "-e", "mainnet"])
            .unwrap();

        assert!(cli.command.is_none());
        assert_eq!(cli.config().environment, "mainnet");
    }
}
