use clap::{Args, Parser, Subcommand};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::{DEFAULT_COMPANY, news_source};
use crate::core::{CSV_HEADER, CompanyReport, build_report, csv_file_name, to_csv};

#[derive(Parser, Debug)]
#[command(
    name = "microscope",
    about = "Company under the microscope: synthetic financials and a heuristic risk score"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the JSON/CSV HTTP API
    Serve {
        #[arg(default_value_t = 8080)]
        port: u16,
    },
    /// Print a company report to stdout
    Report(ReportArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[arg(long, default_value = DEFAULT_COMPANY)]
    pub company: String,
    #[arg(
        long,
        help = "Seed for the adverse-news check; unseeded when omitted"
    )]
    pub news_seed: Option<u64>,
    #[arg(
        long,
        help = "Write the history as CSV to this file, or into this directory as <company>_data.csv"
    )]
    pub csv: Option<PathBuf>,
}

/// Builds the report for `args`, writes the CSV export when requested and
/// returns the text to print.
pub fn run_report(args: &ReportArgs) -> Result<String, String> {
    let mut news = news_source(args.news_seed);
    let report = build_report(&args.company, news.as_mut()).map_err(|e| e.to_string())?;
    let mut out = render_report(&report);

    if let Some(target) = &args.csv {
        let path = csv_target(target, &report.company);
        let csv = to_csv(&report.history).map_err(|e| e.to_string())?;
        fs::write(&path, csv).map_err(|e| format!("failed to write {}: {e}", path.display()))?;
        info!(path = %path.display(), "exported history CSV");
        let _ = writeln!(out, "\nSaved CSV to {}", path.display());
    }

    Ok(out)
}

fn csv_target(target: &Path, company: &str) -> PathBuf {
    if target.is_dir() {
        target.join(csv_file_name(company))
    } else {
        target.to_path_buf()
    }
}

pub fn render_report(report: &CompanyReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Company under the microscope: {}", report.company);

    let _ = writeln!(out, "\nFinancial indicators");
    let _ = writeln!(
        out,
        "{:<6}{:>14}{:>14}{:>14}{:>14}",
        CSV_HEADER[0], CSV_HEADER[1], CSV_HEADER[2], CSV_HEADER[3], CSV_HEADER[4]
    );
    for r in report.history.records() {
        let _ = writeln!(
            out,
            "{:<6}{:>14}{:>14}{:>14}{:>14}",
            r.year, r.revenue, r.net_income, r.assets, r.liabilities
        );
    }

    let _ = writeln!(out, "\nRisk assessment");
    let _ = writeln!(out, "Overall risk: {}", report.assessment.score_label());
    if report.assessment.is_clear() {
        let _ = writeln!(out, "{}", report.summary);
    } else {
        let _ = writeln!(out, "Reasons for elevated risk:");
        for detail in &report.assessment.details {
            let _ = writeln!(out, "  - {detail}");
        }
    }

    out
}
