//! Classification of score rows into the contract updates they request

use std::fmt::{self, Display};

use super::row::ScoreRow;

/// The kinds of score update a row can request
///
/// Variants are declared in dispatch order
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UpdateShape {
    /// A score applied to every item in the collection
    BaseAssetScore,
    /// A score applied to an explicit list of item nonces
    NonceAssetScore,
    /// A score applied to a contiguous range of item nonces
    NonceRangeAssetScore,
    /// A bonus for staking a full set of the collection
    FullSetBonusScore,
}

impl Display for UpdateShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateShape::BaseAssetScore => write!(f, "base-asset-score"),
            UpdateShape::NonceAssetScore => write!(f, "nonce-asset-score"),
            UpdateShape::NonceRangeAssetScore => write!(f, "nonce-range-asset-score"),
            UpdateShape::FullSetBonusScore => write!(f, "full-set-bonus-score"),
        }
    }
}

/// Select every update shape that applies to the row, in dispatch order
///
/// The rules are independent of one another, so a row carrying both a nonce
/// list and a nonce range selects both nonce shapes
pub fn classify(row: &ScoreRow) -> Vec<UpdateShape> {
    let mut shapes = Vec::with_capacity(2);

    if row.nonces.is_empty() && row.nonce_range.is_none() {
        shapes.push(UpdateShape::BaseAssetScore);
    }
    if !row.nonces.is_empty() {
        shapes.push(UpdateShape::NonceAssetScore);
    }
    if row.nonce_range.is_some() {
        shapes.push(UpdateShape::NonceRangeAssetScore);
    }
    if row.full_set_bonus_score.is_some() {
        shapes.push(UpdateShape::FullSetBonusScore);
    }

    shapes
}

#[cfg(test)]
mod tests {
    use crate::{
        batch::row::{RowFormat, ScoreRow},
        types::NonceRange,
    };

    use super::{classify, UpdateShape};

    fn row(line: &str) -> ScoreRow {
        ScoreRow::parse(line, &RowFormat::default()).unwrap()
    }

    #[test]
    fn test_base_only() {
        assert_eq!(
            classify(&row("TOKEN-abcdef,,,,100,")),
            vec![UpdateShape::BaseAssetScore]
        );
    }

    #[test]
    fn test_base_with_bonus() {
        assert_eq!(
            classify(&row("TOKEN-abcdef,,,,100,5")),
            vec![UpdateShape::BaseAssetScore, UpdateShape::FullSetBonusScore]
        );
    }

    #[test]
    fn test_nonce_list() {
        assert_eq!(
            classify(&row("TOKEN-abcdef,5;7,,,100,")),
            vec![UpdateShape::NonceAssetScore]
        );
    }

    #[test]
    fn test_nonce_range_with_bonus() {
        assert_eq!(
            classify(&row("TOKEN-abcdef,,10,20,100,3")),
            vec![
                UpdateShape::NonceRangeAssetScore,
                UpdateShape::FullSetBonusScore
            ]
        );
    }

    #[test]
    fn test_nonce_list_and_range_both_fire() {
        let mut row = row("TOKEN-abcdef,1;2,,,100,");
        row.nonce_range = Some(NonceRange::new(3, 9).unwrap());

        assert_eq!(
            classify(&row),
            vec![
                UpdateShape::NonceAssetScore,
                UpdateShape::NonceRangeAssetScore
            ]
        );
    }

    #[test]
    fn test_shapes_come_out_in_dispatch_order() {
        let row = row("TOKEN-abcdef,1;2,3,4,100,8");
        let shapes = classify(&row);

        let mut sorted = shapes.clone();
        sorted.sort();
        assert_eq!(shapes, sorted);
        assert_eq!(shapes.last(), Some(&UpdateShape::FullSetBonusScore));
    }
}
