//! Definitions of the Solidity functions called by the scripts

use alloy_sol_types::sol;

// Staking pool methods
sol! {
    function initialize(address reward_token) external;
    function setBaseAssetScore(string memory collection_id, uint256 score) external;
    function setNonceAssetScore(string memory collection_id, uint64[] memory nonces, uint256 score) external;
    function setNonceRangeAssetScore(string memory collection_id, uint64 nonce_start, uint64 nonce_end, uint256 score) external;
    function setFullSetBonusScore(string memory collection_id, uint256 score) external;
    function reset(address user, string memory collection_id, uint64 nonce, uint256 amount) external;
}

// UUPS upgrade entrypoint, exposed by the staking pool proxy
sol! {
    function upgradeToAndCall(address new_implementation, bytes memory data) external payable;
}
