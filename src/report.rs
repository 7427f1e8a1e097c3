/*!
 * Reporting functionality for digestfs
 *
 * Renders a post-run summary of one ingestion using the tabled library for
 * clean, consistent table output.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::estimator::TokenEstimator;
use crate::types::Summary;
use crate::utils::format_file_size;

/// Statistics for one completed ingestion run
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Ingested root directory
    pub target: String,
    /// Where the digest was written
    pub destination: String,
    /// Time taken to walk and assemble
    pub duration: Duration,
    /// Digest summary
    pub summary: Summary,
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for ingestion results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Generate a report string for a completed run
    pub fn generate_report(&self, report: &ScanReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
        }
    }

    /// Print the report to stderr, keeping stdout clean for digest output
    pub fn print_report(&self, report: &ScanReport) {
        eprintln!("\n{}", self.generate_report(report));
    }

    fn generate_console_report(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let summary = &report.summary;
        let rows = vec![
            SummaryRow {
                key: "📂 Target".to_string(),
                value: report.target.clone(),
            },
            SummaryRow {
                key: "📄 Output".to_string(),
                value: report.destination.clone(),
            },
            SummaryRow {
                key: "⏱️ Process Time".to_string(),
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "📝 Files Analyzed".to_string(),
                value: TokenEstimator::humanize(summary.file_count),
            },
            SummaryRow {
                key: "📁 Directories".to_string(),
                value: TokenEstimator::humanize(summary.dir_count),
            },
            SummaryRow {
                key: "💾 Content Size".to_string(),
                value: format_file_size(summary.total_size_bytes),
            },
            SummaryRow {
                key: "🚫 Skipped Files".to_string(),
                value: TokenEstimator::humanize(summary.truncated_file_count),
            },
            SummaryRow {
                key: "📦 Estimated Tokens".to_string(),
                value: TokenEstimator::humanize(summary.token_count),
            },
        ];

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        format!("✅  DIGEST COMPLETE\n{}", table)
    }
}
