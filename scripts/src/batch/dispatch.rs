//! Sequential submission of the operations planned for one row

use tracing::{debug, warn};

use crate::{
    client::ChainClient,
    errors::ScriptError,
    types::{ContractOperation, GasBudget},
};

/// An operation paired with the gas limit it is submitted with
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedOperation {
    /// The operation to submit
    pub operation: ContractOperation,
    /// The gas limit to submit it with
    pub gas_limit: GasBudget,
}

impl PlannedOperation {
    /// Pair an operation with its gas limit
    pub fn new(operation: ContractOperation, gas_limit: GasBudget) -> Self {
        Self {
            operation,
            gas_limit,
        }
    }
}

/// Submit each planned operation in order, awaiting each confirmation before
/// sending the next.
///
/// Returns the conjunction of the outcomes. An empty plan is a failure, never a
/// no-op success. A reverted operation does not stop the later ones, but an
/// error from the client does: the remaining operations are not sent.
pub async fn dispatch<C: ChainClient + ?Sized>(
    client: &C,
    plan: &[PlannedOperation],
) -> Result<bool, ScriptError> {
    if plan.is_empty() {
        warn!("No applicable update for row");
        return Ok(false);
    }

    let mut success = true;
    for planned in plan {
        let PlannedOperation {
            operation,
            gas_limit,
        } = planned;

        debug!(
            "Submitting `{}` with gas limit {}",
            operation.method_name(),
            gas_limit
        );
        let outcome = client.submit(operation, *gas_limit).await?;
        if !outcome {
            warn!("`{}` failed on chain", operation.method_name());
        }

        success &= outcome;
    }

    Ok(success)
}
