//! Gas limits for each kind of score update

use crate::{
    constants::{BASE_GAS_LIMIT, MAX_RANGE_GAS_LIMIT, PER_ITEM_GAS},
    types::GasBudget,
};

use super::{classify::UpdateShape, row::ScoreRow};

/// The parameters of the gas limit formulas
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GasSchedule {
    /// The gas limit of a single-collection update, and the base of every per-item limit
    pub base: GasBudget,
    /// The surcharge per item nonce touched
    pub per_item: GasBudget,
    /// The ceiling applied to nonce range updates
    pub range_ceiling: GasBudget,
}

impl Default for GasSchedule {
    fn default() -> Self {
        Self {
            base: BASE_GAS_LIMIT,
            per_item: PER_ITEM_GAS,
            range_ceiling: MAX_RANGE_GAS_LIMIT,
        }
    }
}

impl GasSchedule {
    /// The gas limit for submitting `shape` on behalf of `row`
    pub fn estimate(&self, shape: UpdateShape, row: &ScoreRow) -> GasBudget {
        match shape {
            UpdateShape::BaseAssetScore | UpdateShape::FullSetBonusScore => self.base,
            UpdateShape::NonceAssetScore => self.per_items(row.nonces.len() as u64),
            UpdateShape::NonceRangeAssetScore => {
                let span = row.nonce_range.map(|range| range.span()).unwrap_or_default();
                self.per_items(span).min(self.range_ceiling)
            }
        }
    }

    /// `base + items * per_item`, saturating
    fn per_items(&self, items: u64) -> GasBudget {
        self.base.saturating_add(items.saturating_mul(self.per_item))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        batch::{
            classify::UpdateShape,
            row::{RowFormat, ScoreRow},
        },
        constants::{BASE_GAS_LIMIT, MAX_RANGE_GAS_LIMIT, PER_ITEM_GAS},
    };

    use super::GasSchedule;

    fn row(line: &str) -> ScoreRow {
        ScoreRow::parse(line, &RowFormat::default()).unwrap()
    }

    #[test]
    fn test_fixed_budgets() {
        let schedule = GasSchedule::default();
        let row = row("TOKEN-abcdef,,,,100,20");

        assert_eq!(
            schedule.estimate(UpdateShape::BaseAssetScore, &row),
            BASE_GAS_LIMIT
        );
        assert_eq!(
            schedule.estimate(UpdateShape::FullSetBonusScore, &row),
            BASE_GAS_LIMIT
        );
    }

    #[test]
    fn test_nonce_list_budget() {
        let schedule = GasSchedule::default();
        let row = row("TOKEN-abcdef,5;7,,,100,");

        assert_eq!(
            schedule.estimate(UpdateShape::NonceAssetScore, &row),
            BASE_GAS_LIMIT + 2 * PER_ITEM_GAS
        );
    }

    #[test]
    fn test_nonce_range_budget() {
        let schedule = GasSchedule::default();
        let row = row("TOKEN-abcdef,,10,20,100,");

        assert_eq!(
            schedule.estimate(UpdateShape::NonceRangeAssetScore, &row),
            BASE_GAS_LIMIT + 10 * PER_ITEM_GAS
        );
    }

    #[test]
    fn test_nonce_range_budget_clamped() {
        let schedule = GasSchedule::default();
        let wide = row("TOKEN-abcdef,,0,6000000,100,");
        assert_eq!(
            schedule.estimate(UpdateShape::NonceRangeAssetScore, &wide),
            MAX_RANGE_GAS_LIMIT
        );

        let saturating = row(&format!("TOKEN-abcdef,,0,{},100,", u64::MAX));
        assert_eq!(
            schedule.estimate(UpdateShape::NonceRangeAssetScore, &saturating),
            MAX_RANGE_GAS_LIMIT
        );
    }

    #[test]
    fn test_custom_schedule() {
        let schedule = GasSchedule {
            base: 1_000,
            per_item: 10,
            range_ceiling: 1_050,
        };

        assert_eq!(
            schedule.estimate(
                UpdateShape::NonceAssetScore,
                &row("TOKEN-abcdef,1;2;3,,,1,")
            ),
            1_030
        );
        assert_eq!(
            schedule.estimate(
                UpdateShape::NonceRangeAssetScore,
                &row("TOKEN-abcdef,,0,100,1,")
            ),
            1_050
        );
    }
}
