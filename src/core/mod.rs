mod error;
mod export;
mod report;
mod rng;
mod scoring;
mod synth;
mod types;

pub use error::{ExportError, RiskError};
pub use export::{CSV_HEADER, csv_file_name, to_csv};
pub use report::{CLEAR_SUMMARY, build_report, chart_series, summarize};
pub use rng::Rng;
pub use scoring::{
    ADVERSE_NEWS_PROBABILITY, CHECK_PENALTY, EntropyNews, LEVERAGE_LIMIT, MAX_SCORE, MIN_RECORDS,
    NewsSource, assess,
};
pub use synth::{
    ASSETS_RANGE, LIABILITIES_RANGE, NET_INCOME_RANGE, REVENUE_RANGE, name_seed, synthesize,
};
pub use types::{
    ChartKind, ChartPoint, ChartSeries, CompanyReport, FinancialHistory, FinancialRecord,
    REPORT_YEARS, RiskAssessment, RiskFlag,
};
