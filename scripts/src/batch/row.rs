//! Parsing of raw batch input lines into typed rows

use std::str::FromStr;

use alloy_primitives::Address;

use crate::{
    constants::{
        DEFAULT_COLUMN_DELIMITER, DEFAULT_NONCE_DELIMITER, RESET_ROW_COLUMNS, SCORE_ROW_COLUMNS,
    },
    errors::ScriptError,
    types::NonceRange,
};

/// The delimiter conventions of a batch input file
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowFormat {
    /// The delimiter between columns
    column_delimiter: char,
    /// The delimiter between item nonces within the `nonces` column
    nonce_delimiter: char,
}

impl RowFormat {
    /// Construct a row format, the two delimiters must differ
    pub fn new(column_delimiter: char, nonce_delimiter: char) -> Result<Self, ScriptError> {
        if column_delimiter == nonce_delimiter {
            return Err(ScriptError::InvalidArgument(format!(
                "column and nonce delimiters must differ, both are `{}`",
                column_delimiter
            )));
        }

        Ok(Self {
            column_delimiter,
            nonce_delimiter,
        })
    }

    /// The delimiter between columns
    pub fn column_delimiter(&self) -> char {
        self.column_delimiter
    }

    /// The delimiter between item nonces
    pub fn nonce_delimiter(&self) -> char {
        self.nonce_delimiter
    }

    /// Trim a raw line and split it into exactly `N` trimmed columns
    pub fn split_columns<'a, const N: usize>(
        &self,
        line: &'a str,
    ) -> Result<[&'a str; N], ScriptError> {
        let columns: Vec<&str> = line
            .trim()
            .split(self.column_delimiter)
            .map(str::trim)
            .collect();

        <[&str; N]>::try_from(columns).map_err(|columns| {
            ScriptError::RowParsing(format!(
                "expected {} columns, found {}",
                N,
                columns.len()
            ))
        })
    }
}

impl Default for RowFormat {
    fn default() -> Self {
        Self {
            column_delimiter: DEFAULT_COLUMN_DELIMITER,
            nonce_delimiter: DEFAULT_NONCE_DELIMITER,
        }
    }
}

/// One score directive: which items of a collection to score, and how
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreRow {
    /// The collection identifier, e.g. `TOKEN-abcdef`
    pub collection_id: String,
    /// An explicit list of item nonces, empty when absent
    pub nonces: Vec<u64>,
    /// A range of item nonces, present only when both bounds are given
    pub nonce_range: Option<NonceRange>,
    /// The score to assign
    pub score: u64,
    /// The bonus for staking a full set of the collection
    pub full_set_bonus_score: Option<u64>,
}

impl ScoreRow {
    /// Parse a raw line of the form
    /// `collectionId,nonces,rangeStart,rangeEnd,score,fullSetBonusScore`
    pub fn parse(line: &str, format: &RowFormat) -> Result<Self, ScriptError> {
        let [collection_id, nonces, range_start, range_end, score, bonus] =
            format.split_columns::<SCORE_ROW_COLUMNS>(line)?;

        let collection_id = parse_collection_id(collection_id)?;
        let nonces = match present(nonces) {
            Some(nonces) => nonces
                .split(format.nonce_delimiter())
                .map(|nonce| parse_u64(nonce.trim(), "nonce"))
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        let nonce_range = match (present(range_start), present(range_end)) {
            (Some(start), Some(end)) => Some(NonceRange::new(
                parse_u64(start, "range start")?,
                parse_u64(end, "range end")?,
            )?),
            (None, None) => None,
            _ => {
                return Err(ScriptError::RowParsing(
                    "nonce range requires both a start and an end".to_string(),
                ))
            }
        };

        let score = parse_u64(score, "score")?;
        let full_set_bonus_score = present(bonus)
            .map(|bonus| parse_u64(bonus, "full set bonus score"))
            .transpose()?;

        Ok(Self {
            collection_id,
            nonces,
            nonce_range,
            score,
            full_set_bonus_score,
        })
    }
}

/// One stake reset directive
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResetRow {
    /// The staker whose position is reset
    pub user: Address,
    /// The collection identifier
    pub collection_id: String,
    /// The staked item nonce
    pub nonce: u64,
    /// The amount to reset the position to
    pub amount: u64,
}

impl ResetRow {
    /// Parse a raw line of the form `userAddress,collectionId,nonce,amount`
    pub fn parse(line: &str, format: &RowFormat) -> Result<Self, ScriptError> {
        let [user, collection_id, nonce, amount] =
            format.split_columns::<RESET_ROW_COLUMNS>(line)?;

        let user = Address::from_str(user).map_err(|e| {
            ScriptError::RowParsing(format!("invalid user address `{}`: {}", user, e))
        })?;

        Ok(Self {
            user,
            collection_id: parse_collection_id(collection_id)?,
            nonce: parse_u64(nonce, "nonce")?,
            amount: parse_u64(amount, "amount")?,
        })
    }
}

// -----------
// | Helpers |
// -----------

/// Normalize an empty column to absent
fn present(column: &str) -> Option<&str> {
    (!column.is_empty()).then_some(column)
}

fn parse_collection_id(column: &str) -> Result<String, ScriptError> {
    present(column)
        .map(str::to_string)
        .ok_or_else(|| ScriptError::RowParsing("missing collection id".to_string()))
}

fn parse_u64(column: &str, field: &str) -> Result<u64, ScriptError> {
    column
        .parse::<u64>()
        .map_err(|e| ScriptError::RowParsing(format!("invalid {} `{}`: {}", field, column, e)))
}
