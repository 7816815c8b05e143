//! Utilities for the staking pool scripts.

use std::{
    fs::{self, File},
    io::Read,
    path::PathBuf,
    str::FromStr,
};

use alloy::{
    network::{Ethereum, EthereumWallet},
    providers::{DynProvider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use alloy_primitives::Address;
use json::JsonValue;

use crate::{constants::DEPLOYMENTS_KEY, errors::ScriptError};

/// The signing provider type used by the scripts
pub type Wallet = DynProvider<Ethereum>;

/// Sets up a signing client for the given private key and RPC url.
///
/// The client fills in the chain ID, fees and transaction nonce of every
/// transaction it sends.
pub async fn setup_client(priv_key: &str, rpc_url: &str) -> Result<Wallet, ScriptError> {
    let url = Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .on_http(url);

    Ok(DynProvider::new(provider))
}

/// Read the lines of a batch input file
pub fn read_input_lines(file_path: &str) -> Result<Vec<String>, ScriptError> {
    let contents = fs::read_to_string(file_path)
        .map_err(|e| ScriptError::ReadFile(format!("{}: {}", file_path, e)))?;

    Ok(contents.lines().map(str::to_string).collect())
}

/// Read a hex-encoded bytecode artifact, with or without a `0x` prefix
pub fn read_bytecode(file_path: &str) -> Result<Vec<u8>, ScriptError> {
    let contents = fs::read_to_string(file_path)
        .map_err(|e| ScriptError::ReadFile(format!("{}: {}", file_path, e)))?;
    let trimmed = contents.trim();
    let hex_str = trimmed.strip_prefix("0x").unwrap_or(trimmed);

    let bytecode =
        hex::decode(hex_str).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;
    if bytecode.is_empty() {
        return Err(ScriptError::ArtifactParsing(format!(
            "{} contains no bytecode",
            file_path
        )));
    }

    Ok(bytecode)
}

/// Decode optional hex calldata, absent calldata is empty
pub fn parse_calldata(calldata: Option<&str>) -> Result<Vec<u8>, ScriptError> {
    match calldata {
        Some(calldata) => {
            let hex_str = calldata.strip_prefix("0x").unwrap_or(calldata);
            hex::decode(hex_str).map_err(|e| ScriptError::CalldataConstruction(e.to_string()))
        }
        None => Ok(Vec::new()),
    }
}

// --------------------
// | Deployments File |
// --------------------

/// Read and parse a JSON file
pub fn get_json_from_file(file_path: &str) -> Result<JsonValue, ScriptError> {
    let mut file_contents = String::new();
    File::open(file_path)
        .map_err(|e| ScriptError::ReadFile(e.to_string()))?
        .read_to_string(&mut file_contents)
        .map_err(|e| ScriptError::ReadFile(e.to_string()))?;

    json::parse(&file_contents).map_err(|e| ScriptError::ReadFile(e.to_string()))
}

/// Look up the address recorded under `contract_key` for `environment`
pub fn parse_addr_from_deployments_file(
    file_path: &str,
    environment: &str,
    contract_key: &str,
) -> Result<Address, ScriptError> {
    if !PathBuf::from(file_path).exists() {
        return Err(ScriptError::MissingDeployment(format!(
            "no deployments file at {}",
            file_path
        )));
    }
    let parsed_json = get_json_from_file(file_path)?;

    let address = parsed_json[environment][DEPLOYMENTS_KEY][contract_key]
        .as_str()
        .ok_or_else(|| {
            ScriptError::MissingDeployment(format!("`{}` on {}", contract_key, environment))
        })?;

    Address::from_str(address).map_err(|e| ScriptError::ReadFile(e.to_string()))
}

/// Record `address` under `contract_key` for `environment`, creating the file if needed
pub fn write_deployed_address(
    file_path: &str,
    environment: &str,
    contract_key: &str,
    address: Address,
) -> Result<(), ScriptError> {
    // If the file doesn't exist, create it
    if !PathBuf::from(file_path).exists() {
        fs::write(file_path, "{}").map_err(|e| ScriptError::WriteFile(e.to_string()))?;
    }
    let mut parsed_json = get_json_from_file(file_path)?;

    parsed_json[environment][DEPLOYMENTS_KEY][contract_key] =
        JsonValue::String(format!("{address:#x}"));

    fs::write(file_path, json::stringify_pretty(parsed_json, 4))
        .map_err(|e| ScriptError::WriteFile(e.to_string()))?;

    Ok(())
}
