//! The boundary between the batch dispatcher and the chain

use alloy::{
    network::TransactionBuilder, providers::Provider, rpc::types::TransactionRequest,
};
use alloy_primitives::Address;
use async_trait::async_trait;
use tracing::{debug, info};

use crate::{
    config::ScriptConfig,
    constants::STAKING_CONTRACT_KEY,
    errors::ScriptError,
    types::{ContractOperation, GasBudget},
    utils::{parse_addr_from_deployments_file, setup_client, Wallet},
};

/// A client able to submit contract operations and await their confirmation
///
/// Implementations own the signer and its transaction nonce; each call to
/// [`ChainClient::submit`] consumes exactly one nonce
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Sign, send and await the confirmation of `operation` with the given gas limit.
    ///
    /// Returns whether the transaction executed successfully on chain. An `Err`
    /// means the operation could not be submitted or confirmed at all.
    async fn submit(
        &self,
        operation: &ContractOperation,
        gas_limit: GasBudget,
    ) -> Result<bool, ScriptError>;
}

/// A [`ChainClient`] sending operations to the deployed staking pool contract
pub struct StakingContractClient {
    /// The signing provider
    client: Wallet,
    /// The address of the staking pool proxy
    contract_address: Address,
}

impl StakingContractClient {
    /// Create a client for an already-resolved contract address
    pub fn new(client: Wallet, contract_address: Address) -> Self {
        Self {
            client,
            contract_address,
        }
    }

    /// Connect to the network described by `config` and resolve the staking pool
    /// address of its environment from the deployments file
    pub async fn connect(config: &ScriptConfig) -> Result<Self, ScriptError> {
        let contract_address = parse_addr_from_deployments_file(
            &config.deployments_path,
            &config.environment,
            STAKING_CONTRACT_KEY,
        )?;
        let client = setup_client(&config.priv_key, &config.rpc_url).await?;

        info!(
            "Using staking pool {:#x} on {}",
            contract_address, config.environment
        );
        Ok(Self::new(client, contract_address))
    }

    /// The address operations are sent to
    pub fn contract_address(&self) -> Address {
        self.contract_address
    }
}

#[async_trait]
impl ChainClient for StakingContractClient {
    async fn submit(
        &self,
        operation: &ContractOperation,
        gas_limit: GasBudget,
    ) -> Result<bool, ScriptError> {
        let tx = TransactionRequest::default()
            .with_to(self.contract_address())
            .with_input(operation.calldata())
            .with_gas_limit(gas_limit);

        let pending_tx = self
            .client
            .send_transaction(tx)
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
        info!(
            "Transaction sent for `{}`. Tx hash: {:#x}",
            operation.method_name(),
            pending_tx.tx_hash()
        );

        let receipt = pending_tx
            .get_receipt()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
        debug!(
            "`{}` confirmed in block {:?}, gas used {}",
            operation.method_name(),
            receipt.block_number,
            receipt.gas_used
        );

        Ok(receipt.status())
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, Address};

    use crate::{config::ScriptConfig, errors::ScriptError, utils::write_deployed_address};

    use super::StakingContractClient;

    const PROXY: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
    const PKEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn config(deployments_path: &str, environment: &str) -> ScriptConfig {
        ScriptConfig {
            environment: environment.to_string(),
            rpc_url: "http://127.0.0.1:8545".to_string(),
            priv_key: PKEY.to_string(),
            deployments_path: deployments_path.to_string(),
        }
    }

    #[tokio::test]
    async fn test_connect_targets_recorded_proxy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deployments.json");
        let path = path.to_str().unwrap();
        write_deployed_address(path, "devnet", "staking_contract", PROXY).unwrap();

        let client = StakingContractClient::connect(&config(path, "devnet"))
            .await
            .unwrap();
        assert_eq!(client.contract_address(), PROXY);

        let res = StakingContractClient::connect(&config(path, "mainnet")).await;
        assert!(matches!(res, Err(ScriptError::MissingDeployment(_))));
    }
}
