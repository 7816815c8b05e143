//! Human-readable status lines for batch rows and runs

use std::fmt::{self, Display};

use itertools::Itertools;

use super::row::{ResetRow, ScoreRow};

/// The placeholder rendered for an absent column
const ABSENT: &str = "-";

impl Display for ScoreRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nonces = if self.nonces.is_empty() {
            ABSENT.to_string()
        } else {
            self.nonces.iter().join(";")
        };
        let range = self
            .nonce_range
            .map_or_else(|| ABSENT.to_string(), |range| range.to_string());
        let bonus = self
            .full_set_bonus_score
            .map_or_else(|| ABSENT.to_string(), |bonus| bonus.to_string());

        write!(
            f,
            "collection {} | nonces: {} | range: {} | score: {} | bonus: {}",
            self.collection_id, nonces, range, self.score, bonus
        )
    }
}

impl Display for ResetRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "reset {:#x} | collection {} | nonce: {} | amount: {}",
            self.user, self.collection_id, self.nonce, self.amount
        )
    }
}

/// Render the line emitted before a row's operations are submitted
pub fn pending_line(index: usize, description: &str) -> String {
    format!("[row {}] {}", index, description)
}

/// Render the line emitted once a row's operations have settled
pub fn done_line(index: usize, description: &str, success: bool) -> String {
    let status = if success { "success" } else { "failed" };
    format!("[row {}] {} => done: {}", index, description, status)
}

/// The settled outcome of one batch row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowResult {
    /// The 0-based index of the row among the data rows
    pub index: usize,
    /// Whether every operation of the row succeeded
    pub success: bool,
    /// The error that aborted the row, if any
    pub error: Option<String>,
}

/// The per-row outcomes of a batch run, in input order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// One result per data row
    pub rows: Vec<RowResult>,
}

impl BatchReport {
    /// The success flag of each row, in input order
    pub fn flags(&self) -> Vec<bool> {
        self.rows.iter().map(|row| row.success).collect()
    }

    /// The number of rows that succeeded
    pub fn succeeded(&self) -> usize {
        self.rows.iter().filter(|row| row.success).count()
    }

    /// The number of rows that failed or errored
    pub fn failed(&self) -> usize {
        self.rows.len() - self.succeeded()
    }

    /// The indices of the rows that did not succeed
    pub fn failed_indices(&self) -> Vec<usize> {
        self.rows
            .iter()
            .filter(|row| !row.success)
            .map(|row| row.index)
            .collect()
    }
}

impl Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows processed: {} succeeded, {} failed",
            self.rows.len(),
            self.succeeded(),
            self.failed()
        )
    }
}
