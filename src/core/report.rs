use tracing::info;

use super::error::RiskError;
use super::export::csv_file_name;
use super::scoring::{NewsSource, assess};
use super::synth::synthesize;
use super::types::{
    ChartKind, ChartPoint, ChartSeries, CompanyReport, FinancialHistory, FinancialRecord,
    RiskAssessment,
};

pub const CLEAR_SUMMARY: &str = "No signs of elevated risk detected";

/// Synthesizes, scores and packages everything a dashboard needs for one company.
pub fn build_report<N: NewsSource + ?Sized>(
    company: &str,
    news: &mut N,
) -> Result<CompanyReport, RiskError> {
    let history = synthesize(company);
    let assessment = assess(&history, news)?;
    info!(company, score = assessment.score, "built company report");

    Ok(CompanyReport {
        company: company.to_string(),
        summary: summarize(&assessment),
        charts: chart_series(&history),
        csv_file_name: csv_file_name(company),
        history,
        assessment,
    })
}

pub fn summarize(assessment: &RiskAssessment) -> String {
    if assessment.is_clear() {
        return CLEAR_SUMMARY.to_string();
    }
    format!(
        "Reasons for elevated risk: {}",
        assessment.details.join("; ")
    )
}

/// Revenue as bars and net income as a line, one point per year.
pub fn chart_series(history: &FinancialHistory) -> Vec<ChartSeries> {
    vec![
        series(history, "Revenue by year", ChartKind::Bar, |r| r.revenue),
        series(history, "Net income", ChartKind::Line, |r| r.net_income),
    ]
}

fn series(
    history: &FinancialHistory,
    title: &str,
    kind: ChartKind,
    value: fn(&FinancialRecord) -> i64,
) -> ChartSeries {
    ChartSeries {
        title: title.to_string(),
        kind,
        points: history
            .records()
            .iter()
            .map(|r| ChartPoint {
                year: r.year,
                value: value(r),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::Rng;
    use crate::core::types::RiskFlag;

    struct FixedNews(f64);

    impl NewsSource for FixedNews {
        fn draw(&mut self) -> f64 {
            self.0
        }
    }

    #[test]
    fn report_bundles_history_and_assessment() {
        let report = build_report("Roshen", &mut FixedNews(0.99)).expect("report");
        assert_eq!(report.company, "Roshen");
        assert_eq!(report.history, synthesize("Roshen"));
        assert_eq!(report.csv_file_name, "Roshen_data.csv");
        assert_eq!(report.assessment.flags, vec![RiskFlag::HighLeverage]);
        assert_eq!(
            report.summary,
            "Reasons for elevated risk: High debt ratio"
        );
    }

    #[test]
    fn summary_for_clear_assessment() {
        assert_eq!(summarize(&RiskAssessment::default()), CLEAR_SUMMARY);
    }

    #[test]
    fn summary_lists_details_in_order() {
        let mut assessment = RiskAssessment::default();
        assessment.record(RiskFlag::NetLoss, 25);
        assessment.record(RiskFlag::RevenueDecline, 25);
        assert_eq!(
            summarize(&assessment),
            "Reasons for elevated risk: Loss in the most recent year; Revenue decline"
        );
        assert_eq!(assessment.score_label(), "50 / 100");
    }

    #[test]
    fn charts_follow_history_years() {
        let history = synthesize("Rosh");
        let charts = chart_series(&history);
        assert_eq!(charts.len(), 2);
        assert_eq!(charts[0].kind, ChartKind::Bar);
        assert_eq!(charts[1].kind, ChartKind::Line);

        for (point, record) in charts[0].points.iter().zip(history.records()) {
            assert_eq!(point.year, record.year);
            assert_eq!(point.value, record.revenue);
        }
        for (point, record) in charts[1].points.iter().zip(history.records()) {
            assert_eq!(point.value, record.net_income);
        }
    }

    #[test]
    fn seeded_reports_are_identical() {
        let a = build_report("Roshen", &mut Rng::new(7)).expect("report");
        let b = build_report("Nestle", &mut Rng::new(7)).expect("report");
        assert_eq!(a.history, b.history);
        assert_eq!(a.assessment, b.assessment);
        assert_ne!(a.csv_file_name, b.csv_file_name);
    }
}
