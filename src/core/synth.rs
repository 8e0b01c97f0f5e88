use std::ops::Range;

use tracing::debug;

use super::rng::Rng;
use super::types::{FinancialHistory, FinancialRecord, REPORT_YEARS};

pub const REVENUE_RANGE: Range<i64> = 5_000_000..30_000_000;
pub const NET_INCOME_RANGE: Range<i64> = -2_000_000..5_000_000;
pub const ASSETS_RANGE: Range<i64> = 10_000_000..50_000_000;
pub const LIABILITIES_RANGE: Range<i64> = 3_000_000..25_000_000;

/// Seed for a company's synthetic history: its name length in characters.
///
/// Names of equal length share a seed and therefore an identical history.
pub fn name_seed(name: &str) -> u64 {
    name.chars().count() as u64
}

/// Fabricates five years of financials for `name`.
///
/// Each call owns its generator, so concurrent callers never share state.
pub fn synthesize(name: &str) -> FinancialHistory {
    let seed = name_seed(name);
    let mut rng = Rng::from_mixed_seed(seed);

    let records = REPORT_YEARS
        .iter()
        .map(|&year| FinancialRecord {
            year,
            revenue: rng.range_i64(REVENUE_RANGE),
            net_income: rng.range_i64(NET_INCOME_RANGE),
            assets: rng.range_i64(ASSETS_RANGE),
            liabilities: rng.range_i64(LIABILITIES_RANGE),
        })
        .collect();

    debug!(seed, "synthesized financial history");
    FinancialHistory::from_records(records)
}
