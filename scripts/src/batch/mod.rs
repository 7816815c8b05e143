//! The batch directive dispatcher: parses input rows, plans the contract
//! operations each one requests, and submits them one row at a time.
//!
//! Rows are processed strictly in file order and every operation is confirmed
//! before the next one is sent, so the signer's transaction nonces are consumed
//! in a deterministic order. A failing row is reported and skipped; it never
//! aborts the rest of the batch.

pub mod classify;
pub mod dispatch;
pub mod gas;
pub mod report;
pub mod row;

use std::fmt::Display;

use tracing::{error, info, warn};

use crate::{
    client::ChainClient, config::BatchConfig, errors::ScriptError, types::ContractOperation,
};

use self::{
    classify::{classify, UpdateShape},
    dispatch::{dispatch, PlannedOperation},
    gas::GasSchedule,
    report::{done_line, pending_line, BatchReport, RowResult},
    row::{ResetRow, RowFormat, ScoreRow},
};

/// A row type the batch runner can process
pub trait Directive: Sized + Display {
    /// Parse one raw input line
    fn parse(line: &str, format: &RowFormat) -> Result<Self, ScriptError>;

    /// The operations to submit for this row, in submission order
    fn plan(&self, gas: &GasSchedule) -> Vec<PlannedOperation>;
}

impl Directive for ScoreRow {
    fn parse(line: &str, format: &RowFormat) -> Result<Self, ScriptError> {
        ScoreRow::parse(line, format)
    }

    fn plan(&self, gas: &GasSchedule) -> Vec<PlannedOperation> {
        if !self.nonces.is_empty() && self.nonce_range.is_some() {
            warn!(
                "Row for {} sets both a nonce list and a nonce range, submitting both",
                self.collection_id
            );
        }

        classify(self)
            .into_iter()
            .filter_map(|shape| {
                let operation = self.operation(shape)?;
                Some(PlannedOperation::new(operation, gas.estimate(shape, self)))
            })
            .collect()
    }
}

impl ScoreRow {
    /// Build the contract operation applying `shape` to this row, if the row
    /// carries the fields the shape needs
    pub fn operation(&self, shape: UpdateShape) -> Option<ContractOperation> {
        let collection_id = self.collection_id.clone();
        let operation = match shape {
            UpdateShape::BaseAssetScore => ContractOperation::SetBaseAssetScore {
                collection_id,
                score: self.score,
            },
            UpdateShape::NonceAssetScore => ContractOperation::SetNonceAssetScore {
                collection_id,
                nonces: self.nonces.clone(),
                score: self.score,
            },
            UpdateShape::NonceRangeAssetScore => ContractOperation::SetNonceRangeAssetScore {
                collection_id,
                range: self.nonce_range?,
                score: self.score,
            },
            UpdateShape::FullSetBonusScore => ContractOperation::SetFullSetBonusScore {
                collection_id,
                score: self.full_set_bonus_score?,
            },
        };

        Some(operation)
    }
}

impl Directive for ResetRow {
    fn parse(line: &str, format: &RowFormat) -> Result<Self, ScriptError> {
        ResetRow::parse(line, format)
    }

    fn plan(&self, gas: &GasSchedule) -> Vec<PlannedOperation> {
        let operation = ContractOperation::ResetStake {
            user: self.user,
            collection_id: self.collection_id.clone(),
            nonce: self.nonce,
            amount: self.amount,
        };

        vec![PlannedOperation::new(operation, gas.base)]
    }
}

/// Runs a batch of directives against a chain client
pub struct BatchRunner<'a, C: ChainClient + ?Sized> {
    /// The client every operation is submitted through
    client: &'a C,
    /// The batch settings
    config: BatchConfig,
}

impl<'a, C: ChainClient + ?Sized> BatchRunner<'a, C> {
    /// Create a runner submitting through `client`
    pub fn new(client: &'a C, config: BatchConfig) -> Self {
        Self { client, config }
    }

    /// Process every data row of `lines` in order.
    ///
    /// Blank lines are ignored, and the first non-blank line is skipped as the
    /// header when configured.
    /// Row indices are 0-based over the remaining data rows.
    pub async fn run<D: Directive>(&self, lines: &[String]) -> BatchReport {
        let skip = usize::from(self.config.has_header);
        let rows: Vec<&str> = lines
            .iter()
            .map(String::as_str)
            .filter(|line| !line.trim().is_empty())
            .skip(skip)
            .collect();

        info!("Processing {} rows", rows.len());

        let mut report = BatchReport::default();
        for (index, line) in rows.into_iter().enumerate() {
            let result = match self.process_row::<D>(index, line).await {
                Ok(success) => RowResult {
                    index,
                    success,
                    error: None,
                },
                Err(e) => {
                    error!("Row {} failed: {}", index, e);
                    RowResult {
                        index,
                        success: false,
                        error: Some(e.to_string()),
                    }
                }
            };

            report.rows.push(result);
        }

        info!("{}", report);
        report
    }

    /// Parse, plan and dispatch a single row
    async fn process_row<D: Directive>(
        &self,
        index: usize,
        line: &str,
    ) -> Result<bool, ScriptError> {
        let directive = D::parse(line, &self.config.format)
            .inspect_err(|_| info!("{}", done_line(index, line.trim(), false)))?;
        let description = directive.to_string();
        info!("{}", pending_line(index, &description));

        let plan = directive.plan(&self.config.gas);
        let success = dispatch(self.client, &plan)
            .await
            .inspect_err(|_| info!("{}", done_line(index, &description, false)))?;

        info!("{}", done_line(index, &description, success));
        Ok(success)
    }
}
