//! Type definitions used throughout the scripts

use std::fmt::{self, Display};

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;

use crate::{
    errors::ScriptError,
    solidity::{
        resetCall, setBaseAssetScoreCall, setFullSetBonusScoreCall, setNonceAssetScoreCall,
        setNonceRangeAssetScoreCall,
    },
};

/// The gas limit attached to a single submitted operation
pub type GasBudget = u64;

/// An inclusive range of item nonces within a collection
///
/// The start of the range never exceeds its end
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NonceRange {
    /// The first nonce in the range
    start: u64,
    /// The last nonce in the range
    end: u64,
}

impl NonceRange {
    /// Construct a range, rejecting reversed bounds
    pub fn new(start: u64, end: u64) -> Result<Self, ScriptError> {
        if start > end {
            return Err(ScriptError::RowParsing(format!(
                "nonce range start {} is after its end {}",
                start, end
            )));
        }

        Ok(Self { start, end })
    }

    /// The first nonce in the range
    pub fn start(&self) -> u64 {
        self.start
    }

    /// The last nonce in the range
    pub fn end(&self) -> u64 {
        self.end
    }

    /// The distance between the bounds, `end - start`
    pub fn span(&self) -> u64 {
        self.end - self.start
    }
}

impl Display for NonceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A fully-built contract call, ready to be signed and submitted
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContractOperation {
    /// Set the score of every item in a collection
    SetBaseAssetScore {
        /// The collection identifier
        collection_id: String,
        /// The score to assign
        score: u64,
    },
    /// Set the score of an explicit list of items in a collection
    SetNonceAssetScore {
        /// The collection identifier
        collection_id: String,
        /// The item nonces to update
        nonces: Vec<u64>,
        /// The score to assign
        score: u64,
    },
    /// Set the score of a contiguous range of items in a collection
    SetNonceRangeAssetScore {
        /// The collection identifier
        collection_id: String,
        /// The item nonces to update
        range: NonceRange,
        /// The score to assign
        score: u64,
    },
    /// Set the bonus awarded for staking a full set of a collection
    SetFullSetBonusScore {
        /// The collection identifier
        collection_id: String,
        /// The bonus score
        score: u64,
    },
    /// Reset a user's staked position in a collection
    ResetStake {
        /// The staker
        user: Address,
        /// The collection identifier
        collection_id: String,
        /// The staked item nonce
        nonce: u64,
        /// The staked amount to reset to
        amount: u64,
    },
}

impl ContractOperation {
    /// The name of the contract method this operation calls
    pub fn method_name(&self) -> &'static str {
        match self {
            ContractOperation::SetBaseAssetScore { .. } => "setBaseAssetScore",
            ContractOperation::SetNonceAssetScore { .. } => "setNonceAssetScore",
            ContractOperation::SetNonceRangeAssetScore { .. } => "setNonceRangeAssetScore",
            ContractOperation::SetFullSetBonusScore { .. } => "setFullSetBonusScore",
            ContractOperation::ResetStake { .. } => "reset",
        }
    }

    /// ABI-encode the operation as calldata for the staking pool contract
    pub fn calldata(&self) -> Vec<u8> {
        match self {
            ContractOperation::SetBaseAssetScore {
                collection_id,
                score,
            } => setBaseAssetScoreCall {
                collection_id: collection_id.clone(),
                score: U256::from(*score),
            }
            .abi_encode(),
            ContractOperation::SetNonceAssetScore {
                collection_id,
                nonces,
                score,
            } => setNonceAssetScoreCall {
                collection_id: collection_id.clone(),
                nonces: nonces.clone(),
                score: U256::from(*score),
            }
            .abi_encode(),
            ContractOperation::SetNonceRangeAssetScore {
                collection_id,
                range,
                score,
            } => setNonceRangeAssetScoreCall {
                collection_id: collection_id.clone(),
                nonce_start: range.start(),
                nonce_end: range.end(),
                score: U256::from(*score),
            }
            .abi_encode(),
            ContractOperation::SetFullSetBonusScore {
                collection_id,
                score,
            } => setFullSetBonusScoreCall {
                collection_id: collection_id.clone(),
                score: U256::from(*score),
            }
            .abi_encode(),
            ContractOperation::ResetStake {
                user,
                collection_id,
                nonce,
                amount,
            } => resetCall {
                user: *user,
                collection_id: collection_id.clone(),
                nonce: *nonce,
                amount: U256::from(*amount),
            }
            .abi_encode(),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy_sol_types::SolCall;

    use super::{ContractOperation, NonceRange};
    use crate::solidity::{setNonceAssetScoreCall, setNonceRangeAssetScoreCall};

    #[test]
    fn test_reversed_range_rejected() {
        assert!(NonceRange::new(20, 10).is_err());
        assert_eq!(NonceRange::new(10, 10).unwrap().span(), 0);
    }

    #[test]
    fn test_calldata_selector() {
        let op = ContractOperation::SetNonceAssetScore {
            collection_id: "TOKEN-abcdef".to_string(),
            nonces: vec![1, 2, 3],
            score: 50,
        };

        let calldata = op.calldata();
        assert_eq!(calldata[..4], setNonceAssetScoreCall::SELECTOR);
    }

    #[test]
    fn test_range_calldata_carries_bounds() {
        let op = ContractOperation::SetNonceRangeAssetScore {
            collection_id: "TOKEN-abcdef".to_string(),
            range: NonceRange::new(10, 20).unwrap(),
            score: 7,
        };

        let decoded = setNonceRangeAssetScoreCall::abi_decode(&op.calldata(), true).unwrap();
        assert_eq!(decoded.collection_id, "TOKEN-abcdef");
        assert_eq!(decoded.nonce_start, 10);
        assert_eq!(decoded.nonce_end, 20);
    }
}
