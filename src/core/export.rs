use csv::{Terminator, WriterBuilder};

use super::error::ExportError;
use super::types::FinancialHistory;

pub const CSV_HEADER: [&str; 5] = ["year", "revenue", "net_income", "assets", "liabilities"];

/// Download name for a company's exported history.
pub fn csv_file_name(company: &str) -> String {
    format!("{company}_data.csv")
}

/// Renders `history` as UTF-8 CSV: one header row, then one row per record in
/// stored order.
pub fn to_csv(history: &FinancialHistory) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for record in history.records() {
        writer.write_record([
            record.year.to_string(),
            record.revenue.to_string(),
            record.net_income.to_string(),
            record.assets.to_string(),
            record.liabilities.to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::synth::synthesize;
    use crate::core::types::FinancialRecord;
    use std::fs;
    use std::path::Path;

    fn assert_golden_snapshot(path: &str, actual: &str) {
        let update = matches!(
            std::env::var("UPDATE_GOLDEN").as_deref(),
            Ok("1") | Ok("true") | Ok("TRUE")
        );
        let snapshot_path = Path::new(path);

        if update {
            if let Some(parent) = snapshot_path.parent() {
                fs::create_dir_all(parent).expect("failed to create snapshot directory");
            }
            fs::write(snapshot_path, actual).expect("failed to write golden snapshot");
            return;
        }

        let expected = fs::read_to_string(snapshot_path).unwrap_or_else(|_| {
            panic!("missing golden snapshot at {path}; run with UPDATE_GOLDEN=1 to generate")
        });
        assert_eq!(
            actual, expected,
            "snapshot mismatch for {path}; run with UPDATE_GOLDEN=1 to refresh if expected"
        );
    }

    #[test]
    fn empty_history_exports_header_only() {
        let csv = to_csv(&FinancialHistory::default()).expect("export");
        assert_eq!(csv, "year,revenue,net_income,assets,liabilities\n");
    }

    #[test]
    fn rows_keep_stored_order_and_negative_values() {
        let history = FinancialHistory::from_records(vec![
            FinancialRecord {
                year: 2020,
                revenue: 10_000_000,
                net_income: -1_500_000,
                assets: 20_000_000,
                liabilities: 13_000_000,
            },
            FinancialRecord {
                year: 2021,
                revenue: 9_000_000,
                net_income: 250_000,
                assets: 21_000_000,
                liabilities: 4_000_000,
            },
        ]);
        let csv = to_csv(&history).expect("export");
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "year,revenue,net_income,assets,liabilities",
                "2020,10000000,-1500000,20000000,13000000",
                "2021,9000000,250000,21000000,4000000",
            ]
        );
    }

    #[test]
    fn file_name_keeps_company_as_given() {
        assert_eq!(csv_file_name("Roshen"), "Roshen_data.csv");
        assert_eq!(csv_file_name(""), "_data.csv");
    }

    #[test]
    fn golden_snapshot_roshen_csv() {
        let csv = to_csv(&synthesize("Roshen")).expect("export");
        assert_golden_snapshot("tests/golden/roshen_history.csv", &csv);
    }
}
