//! Scripts for deploying, upgrading and configuring the staking pool contract.

#![deny(missing_docs)]

pub mod batch;
pub mod cli;
pub mod client;
mod commands;
pub mod config;
pub mod constants;
pub mod errors;
mod solidity;
pub mod types;
pub mod utils;
