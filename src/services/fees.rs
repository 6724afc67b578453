//! Late-fee calculation strategies

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::item::Category;

/// Daily compounding factor for the compound strategy
const COMPOUND_FACTOR: Decimal = Decimal::from_parts(105, 0, 0, false, 2);

/// Named late-fee strategies. Selected through configuration; the
/// circulation default is `Linear`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FeeModel {
    /// Days late multiplied by the category's daily rate
    Linear,
    /// The linear fee, compounded by 5% once per late day
    Compound,
}

impl FeeModel {
    /// Fee owed for an item of the given category returned `days_late` days
    /// past its due date. Zero when the return is on time, and
    /// non-decreasing in `days_late` for both strategies.
    pub fn late_fee(&self, category: Category, days_late: i64) -> Decimal {
        let days = days_late.max(0);
        let linear = category.daily_fee_rate() * Decimal::from(days);
        match self {
            FeeModel::Linear => linear,
            FeeModel::Compound => compound_fee(linear, days as u32),
        }
    }
}

impl Default for FeeModel {
    fn default() -> Self {
        FeeModel::Linear
    }
}

/// Compound a base fee by 5% once per late day. Iterative so arbitrarily
/// large `days_late` inputs cannot exhaust the stack.
pub fn compound_fee(base: Decimal, days_late: u32) -> Decimal {
    let mut fee = base;
    for _ in 0..days_late {
        fee *= COMPOUND_FACTOR;
    }
    fee
}
