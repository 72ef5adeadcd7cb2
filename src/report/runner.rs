use colored::*;
use std::io::Write;

use crate::cli::cli_args::OutputFormat;
use crate::cli::output_formatter::OutputFormatter;
use crate::client::client_trait::AnalyticsClient;
use crate::report::suite::{dashboard_suite, ReportSection};
use crate::utils::error::{AnalyticsError, AnalyticsResult};

/// Runs a report suite against an analytics client
///
/// Execution is strictly sequential: each section is queried, formatted and
/// written before the next query is issued, so a failure in section N leaves
/// sections 1..N-1 already on screen and never runs N+1 onward. The runner
/// does not aggregate, filter or re-sort returned rows; sorting and limiting
/// are requested of the API through the query itself.
pub struct ReportRunner {
    client: Box<dyn AnalyticsClient>,
    format: OutputFormat,
    verbose: bool,
}

impl ReportRunner {
    /// Create a runner over the given client
    pub fn new(client: Box<dyn AnalyticsClient>) -> Self {
        Self {
            client,
            format: OutputFormat::Table,
            verbose: false,
        }
    }

    /// Select the output format for formatted tables
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable verbose progress output on stderr
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Run the default dashboard suite for a trailing-day window
    pub async fn run<W: Write + Send>(&self, days: u32, out: &mut W) -> AnalyticsResult<()> {
        let suite = dashboard_suite(days)?;

        writeln!(out).map_err(write_failed)?;
        writeln!(
            out,
            "{}",
            format!("--- Recruiter Dashboard (Last {} Days) ---", days).bold()
        )
        .map_err(write_failed)?;
        writeln!(out).map_err(write_failed)?;

        self.run_suite(&suite, out).await
    }

    /// Run an arbitrary suite of report sections in order
    pub async fn run_suite<W: Write + Send>(
        &self,
        sections: &[ReportSection],
        out: &mut W,
    ) -> AnalyticsResult<()> {
        for (index, section) in sections.iter().enumerate() {
            if self.verbose {
                eprintln!(
                    "{}",
                    OutputFormatter::format_info(&format!(
                        "Running '{}' ({} -> {})",
                        section.label, section.query.start_date, section.query.end_date
                    ))
                );
            }

            writeln!(out, "{}. {}:", index + 1, section.label.bold()).map_err(write_failed)?;

            let result = self.client.run_report(&section.query).await?;

            if self.verbose {
                eprintln!(
                    "{}",
                    OutputFormatter::format_info(&format!("{} rows returned", result.row_count()))
                );
            }

            writeln!(out, "{}", OutputFormatter::format_result(&result, &self.format))
                .map_err(write_failed)?;
            out.flush().map_err(write_failed)?;
        }

        Ok(())
    }

    /// Property id of the underlying client
    pub fn property_id(&self) -> &str {
        self.client.property_id()
    }
}

fn write_failed(e: std::io::Error) -> AnalyticsError {
    AnalyticsError::Internal(format!("failed to write output: {}", e))
}
