use tracing::debug;

use super::error::RiskError;
use super::types::{FinancialHistory, RiskAssessment, RiskFlag};

pub const CHECK_PENALTY: u32 = 25;
pub const MAX_SCORE: u32 = CHECK_PENALTY * 4;
pub const LEVERAGE_LIMIT: f64 = 0.6;
pub const ADVERSE_NEWS_PROBABILITY: f64 = 0.2;
pub const MIN_RECORDS: usize = 2;

/// Source of the adverse-news draw. Implementations return a value in [0, 1).
pub trait NewsSource {
    fn draw(&mut self) -> f64;
}

/// Unseeded news draws from the thread-local generator. Two assessments of the
/// same company can disagree on the adverse-news check.
#[derive(Copy, Clone, Debug, Default)]
pub struct EntropyNews;

impl NewsSource for EntropyNews {
    fn draw(&mut self) -> f64 {
        rand::random::<f64>()
    }
}

/// Scores `history` with the four fixed checks, in order: net loss, high
/// leverage, revenue decline, adverse news.
///
/// Fails with [`RiskError::InvalidInput`] when fewer than two records are
/// supplied, since the revenue trend needs a previous year.
pub fn assess<N: NewsSource + ?Sized>(
    history: &FinancialHistory,
    news: &mut N,
) -> Result<RiskAssessment, RiskError> {
    let Some((previous, latest)) = history.latest_pair() else {
        return Err(RiskError::InvalidInput {
            required: MIN_RECORDS,
            actual: history.len(),
        });
    };

    let mut assessment = RiskAssessment::default();

    if latest.net_income < 0 {
        assessment.record(RiskFlag::NetLoss, CHECK_PENALTY);
    }

    // Zero assets count as over-leveraged.
    let over_leveraged = latest
        .leverage_ratio()
        .is_none_or(|ratio| ratio > LEVERAGE_LIMIT);
    if over_leveraged {
        assessment.record(RiskFlag::HighLeverage, CHECK_PENALTY);
    }

    if latest.revenue < previous.revenue {
        assessment.record(RiskFlag::RevenueDecline, CHECK_PENALTY);
    }

    if news.draw() < ADVERSE_NEWS_PROBABILITY {
        assessment.record(RiskFlag::AdverseNews, CHECK_PENALTY);
    }

    debug!(
        year = latest.year,
        score = assessment.score,
        flags = assessment.flags.len(),
        "assessed financial history"
    );
    Ok(assessment)
}
