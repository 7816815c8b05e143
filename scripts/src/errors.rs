//! Definitions of errors that can occur during the execution of the staking pool scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the staking pool scripts
#[derive(Debug)]
pub enum ScriptError {
    /// Error reading an input, artifact, or deployments file
    ReadFile(String),
    /// Error writing the deployments file
    WriteFile(String),
    /// Error parsing a bytecode artifact
    ArtifactParsing(String),
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// Error constructing calldata for a contract method
    CalldataConstruction(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error submitting or confirming a contract call
    ContractInteraction(String),
    /// A contract the command depends on has not been deployed in this environment
    MissingDeployment(String),
    /// A malformed batch input row
    RowParsing(String),
    /// An invalid command line or prompt argument
    InvalidArgument(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::ReadFile(s) => write!(f, "error reading file: {}", s),
            ScriptError::WriteFile(s) => write!(f, "error writing file: {}", s),
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::CalldataConstruction(s) => write!(f, "error constructing calldata: {}", s),
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            ScriptError::MissingDeployment(s) => {
                write!(f, "contract not deployed: {}, please deploy first", s)
            }
            ScriptError::RowParsing(s) => write!(f, "malformed row: {}", s),
            ScriptError::InvalidArgument(s) => write!(f, "invalid argument: {}", s),
        }
    }
}

impl Error for ScriptError {}
