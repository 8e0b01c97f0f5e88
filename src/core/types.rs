use serde::{Deserialize, Serialize};

/// Reporting years of a synthesized history, oldest first.
pub const REPORT_YEARS: [u32; 5] = [2020, 2021, 2022, 2023, 2024];

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecord {
    pub year: u32,
    pub revenue: i64,
    pub net_income: i64,
    pub assets: i64,
    pub liabilities: i64,
}

impl FinancialRecord {
    /// Liabilities over assets. `None` when assets are zero.
    pub fn leverage_ratio(&self) -> Option<f64> {
        if self.assets == 0 {
            return None;
        }
        Some(self.liabilities as f64 / self.assets as f64)
    }
}

/// Yearly records in ascending year order. Position matters: the last record
/// is the most recent year.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FinancialHistory {
    records: Vec<FinancialRecord>,
}

impl FinancialHistory {
    pub fn from_records(records: Vec<FinancialRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[FinancialRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn latest(&self) -> Option<&FinancialRecord> {
        self.records.last()
    }

    /// Most recent record together with the one before it.
    pub fn latest_pair(&self) -> Option<(&FinancialRecord, &FinancialRecord)> {
        match self.records.as_slice() {
            [.., previous, latest] => Some((previous, latest)),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskFlag {
    NetLoss,
    HighLeverage,
    RevenueDecline,
    AdverseNews,
}

impl RiskFlag {
    pub fn detail(self) -> &'static str {
        match self {
            RiskFlag::NetLoss => "Loss in the most recent year",
            RiskFlag::HighLeverage => "High debt ratio",
            RiskFlag::RevenueDecline => "Revenue decline",
            RiskFlag::AdverseNews => "Negative news / sanctions",
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub score: u32,
    pub details: Vec<String>,
    pub flags: Vec<RiskFlag>,
}

impl RiskAssessment {
    pub(crate) fn record(&mut self, flag: RiskFlag, penalty: u32) {
        self.score += penalty;
        self.details.push(flag.detail().to_string());
        self.flags.push(flag);
    }

    pub fn is_clear(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn score_label(&self) -> String {
        format!("{} / 100", self.score)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ChartPoint {
    pub year: u32,
    pub value: i64,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub title: String,
    pub kind: ChartKind,
    pub points: Vec<ChartPoint>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyReport {
    pub company: String,
    pub history: FinancialHistory,
    pub assessment: RiskAssessment,
    pub summary: String,
    pub charts: Vec<ChartSeries>,
    pub csv_file_name: String,
}
