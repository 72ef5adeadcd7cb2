use clap::Parser;
use colored::*;
use std::io;

use crate::cli::cli_args::{CliArgs, Commands};
use crate::cli::output_formatter::OutputFormatter;
use crate::client::{AnalyticsClient, Ga4Client, MockAnalyticsClient};
use crate::report::runner::ReportRunner;
use crate::report::suite::{dashboard_suite, ReportSection};
use crate::utils::config::ClientConfig;
use crate::utils::error::AnalyticsResult;

/// Build the analytics client for a run
fn build_client(property: Option<String>, sample: bool) -> AnalyticsResult<Box<dyn AnalyticsClient>> {
    if sample {
        return Ok(Box::new(MockAnalyticsClient::new()));
    }

    let mut config = ClientConfig::from_env();
    if let Some(property) = property {
        config = config.with_property_id(&property);
    }

    Ok(Box::new(Ga4Client::new(config)?))
}

/// Render the configured report sections for the `sections` command
fn format_sections(sections: &[ReportSection], detailed: bool) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", "Configured Report Sections:".bold()));

    for (index, section) in sections.iter().enumerate() {
        output.push_str(&format!(
            "  {} {}. {}\n",
            "•".green(),
            index + 1,
            section.label.cyan().bold()
        ));

        if detailed {
            let query = &section.query;
            output.push_str(&format!(
                "    Date Range: {} -> {}\n",
                query.start_date, query.end_date
            ));
            output.push_str(&format!("    Metrics: {}\n", query.metrics.join(", ")));
            output.push_str(&format!(
                "    Dimensions: {}\n",
                if query.dimensions.is_empty() {
                    "(none)".to_string()
                } else {
                    query.dimensions.join(", ")
                }
            ));
            if let Some(limit) = query.limit {
                output.push_str(&format!("    Limit: {}\n", limit));
            }
            if let Some(order_by) = &query.order_by {
                output.push_str(&format!(
                    "    Order: {} {:?}\n",
                    order_by.field, order_by.direction
                ));
            }
        }
    }

    output
}

/// Main entry point for CLI execution
///
/// The single error boundary for a dashboard run lives here: any failure
/// from client construction through the last query prints one diagnostic
/// line and exits non-zero. Sections already written stay on screen.
pub async fn run_cli() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    match args.command {
        Commands::Run {
            days,
            format,
            property,
            sample,
            verbose,
        } => {
            let client = match build_client(property, sample) {
                Ok(client) => client,
                Err(e) => {
                    eprintln!("{}", OutputFormatter::format_error(&e));
                    std::process::exit(1);
                }
            };

            let runner = ReportRunner::new(client)
                .with_format(format)
                .with_verbose(verbose);

            if verbose {
                eprintln!(
                    "{}",
                    OutputFormatter::format_info(&format!(
                        "Reporting on property {}",
                        runner.property_id()
                    ))
                );
            }

            let mut stdout = io::stdout();
            if let Err(e) = runner.run(days, &mut stdout).await {
                eprintln!("{}", OutputFormatter::format_error(&e));
                std::process::exit(1);
            }

            Ok(())
        }

        Commands::Sections { days, detailed } => match dashboard_suite(days) {
            Ok(sections) => {
                println!("{}", format_sections(&sections, detailed));
                Ok(())
            }
            Err(e) => {
                eprintln!("{}", OutputFormatter::format_error(&e));
                std::process::exit(1);
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::AnalyticsError;

    #[test]
    fn test_build_client_sample_mode_needs_no_credentials() {
        let client = build_client(None, true).unwrap();
        assert_eq!(client.property_id(), "000000000");
    }

    #[test]
    fn test_build_client_live_mode_without_credentials_fails() {
        // No property or token configured
        let config = ClientConfig::new();
        let result = Ga4Client::new(config);

        assert!(result.is_err());
        match result.unwrap_err() {
            AnalyticsError::Configuration(_) => {}
            _ => panic!("Expected Configuration error"),
        }
    }

    #[test]
    fn test_format_sections_lists_all_labels() {
        let sections = dashboard_suite(30).unwrap();
        let output = format_sections(&sections, false);

        assert!(output.contains("Traffic Overview (Total)"));
        assert!(output.contains("Top Traffic Sources"));
        assert!(output.contains("Top Pages & Views"));
        assert!(output.contains("User Locations"));
    }

    #[test]
    fn test_format_sections_detailed_shows_queries() {
        let sections = dashboard_suite(7).unwrap();
        let output = format_sections(&sections, true);

        assert!(output.contains("7daysAgo -> today"));
        assert!(output.contains("sessionSourceMedium"));
        assert!(output.contains("Limit: 10"));
        assert!(output.contains("Order: sessions Descending"));
        assert!(output.contains("Dimensions: (none)"));
    }
}
