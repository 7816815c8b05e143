//! Implementations of the staking pool scripts

use std::str::FromStr;

use alloy::{network::TransactionBuilder, providers::Provider, rpc::types::TransactionRequest};
use alloy_primitives::{Address, Bytes};
use alloy_sol_types::{SolCall, SolValue};
use tracing::{info, warn};

use crate::{
    batch::{
        gas::GasSchedule,
        report::BatchReport,
        row::{ResetRow, ScoreRow},
        BatchRunner,
    },
    cli::{DeployArgs, ResetStakesArgs, SetScoresArgs, UpgradeArgs},
    client::StakingContractClient,
    config::ScriptConfig,
    constants::{STAKING_CONTRACT_KEY, STAKING_IMPLEMENTATION_KEY},
    errors::ScriptError,
    solidity::{initializeCall, upgradeToAndCallCall},
    utils::{
        parse_addr_from_deployments_file, parse_calldata, read_bytecode, read_input_lines,
        setup_client, write_deployed_address, Wallet,
    },
};

pub async fn deploy(args: DeployArgs, config: &ScriptConfig) -> Result<(), ScriptError> {
    let reward_token = Address::from_str(&args.reward_token)
        .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))?;
    let implementation_code = read_bytecode(&args.bytecode)?;
    let mut proxy_code = read_bytecode(&args.proxy_bytecode)?;

    let client = setup_client(&config.priv_key, &config.rpc_url).await?;

    info!("Deploying staking pool on {}...", config.environment);
    let implementation = deploy_contract(&client, implementation_code, args.gas_limit).await?;
    info!("Implementation contract deployed at {:#x}", implementation);

    // The proxy constructor takes the implementation and the calldata it
    // delegates to it on construction
    let init_calldata = Bytes::from(initializeCall { reward_token }.abi_encode());
    proxy_code.extend((implementation, init_calldata).abi_encode_params());
    let proxy = deploy_contract(&client, proxy_code, args.gas_limit).await?;
    info!("Proxy contract deployed at {:#x}", proxy);

    write_deployed_address(
        &config.deployments_path,
        &config.environment,
        STAKING_IMPLEMENTATION_KEY,
        implementation,
    )?;
    write_deployed_address(
        &config.deployments_path,
        &config.environment,
        STAKING_CONTRACT_KEY,
        proxy,
    )?;

    info!("Deployment completed. Contract address: {:#x}", proxy);
    Ok(())
}

pub async fn upgrade(args: UpgradeArgs, config: &ScriptConfig) -> Result<(), ScriptError> {
    let proxy = parse_addr_from_deployments_file(
        &config.deployments_path,
        &config.environment,
        STAKING_CONTRACT_KEY,
    )?;
    let implementation_code = read_bytecode(&args.bytecode)?;
    let data = parse_calldata(args.calldata.as_deref())?;

    let client = setup_client(&config.priv_key, &config.rpc_url).await?;

    info!("Upgrading staking pool {:#x} on {}...", proxy, config.environment);
    let implementation = deploy_contract(&client, implementation_code, args.gas_limit).await?;
    info!("Implementation contract deployed at {:#x}", implementation);

    let calldata = upgradeToAndCallCall {
        new_implementation: implementation,
        data: data.into(),
    }
    .abi_encode();
    let tx = TransactionRequest::default()
        .with_to(proxy)
        .with_input(calldata)
        .with_gas_limit(args.gas_limit);

    let receipt = client
        .send_transaction(tx)
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
        .get_receipt()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    if !receipt.status() {
        return Err(ScriptError::ContractInteraction(format!(
            "upgrade reverted in tx {:#x}",
            receipt.transaction_hash
        )));
    }

    write_deployed_address(
        &config.deployments_path,
        &config.environment,
        STAKING_IMPLEMENTATION_KEY,
        implementation,
    )?;

    info!("Upgrade completed. Contract address: {:#x}", proxy);
    Ok(())
}

pub async fn set_scores(args: SetScoresArgs, config: &ScriptConfig) -> Result<(), ScriptError> {
    let batch_config = args.batch.batch_config(args.gas_schedule())?;
    let lines = read_input_lines(&args.batch.input)?;

    let client = StakingContractClient::connect(config).await?;
    let report = BatchRunner::new(&client, batch_config)
        .run::<ScoreRow>(&lines)
        .await;

    log_failures(&report);
    Ok(())
}

pub async fn reset_stakes(args: ResetStakesArgs, config: &ScriptConfig) -> Result<(), ScriptError> {
    let gas = GasSchedule {
        base: args.gas_limit,
        ..GasSchedule::default()
    };
    let batch_config = args.batch.batch_config(gas)?;
    let lines = read_input_lines(&args.batch.input)?;

    let client = StakingContractClient::connect(config).await?;
    let report = BatchRunner::new(&client, batch_config)
        .run::<ResetRow>(&lines)
        .await;

    log_failures(&report);
    Ok(())
}

// -----------
// | Helpers |
// -----------

/// Send a contract creation transaction and return the deployed address
async fn deploy_contract(
    client: &Wallet,
    code: Vec<u8>,
    gas_limit: u64,
) -> Result<Address, ScriptError> {
    let tx = TransactionRequest::default()
        .with_deploy_code(code)
        .with_gas_limit(gas_limit);

    let receipt = client
        .send_transaction(tx)
        .await
        .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?
        .get_receipt()
        .await
        .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

    if !receipt.status() {
        return Err(ScriptError::ContractDeployment(format!(
            "deployment reverted in tx {:#x}",
            receipt.transaction_hash
        )));
    }

    receipt.contract_address.ok_or_else(|| {
        ScriptError::ContractDeployment("receipt carries no contract address".to_string())
    })
}

/// Failed rows are reported, not escalated to the exit code
fn log_failures(report: &BatchReport) {
    if report.failed() > 0 {
        warn!(
            "{} rows failed, rerun them after fixing: {:?}",
            report.failed(),
            report.failed_indices()
        );
    }
}
