use colored::*;
use serde_json::{json, Value as JsonValue};

use crate::cli::cli_args::OutputFormat;
use crate::utils::error::AnalyticsError;
use crate::utils::types::{MetricValue, ReportResult};

/// Formats report results for CLI output
pub struct OutputFormatter;

impl OutputFormatter {
    /// Format a report result according to the specified format
    pub fn format_result(result: &ReportResult, format: &OutputFormat) -> String {
        match format {
            OutputFormat::Table => Self::format_table(result),
            OutputFormat::Json => Self::format_json(result),
            OutputFormat::Csv => Self::format_csv(result),
        }
    }

    /// Format a result as a colored table
    fn format_table(result: &ReportResult) -> String {
        if result.is_empty() {
            return "No data for this report.".dimmed().to_string();
        }

        let columns = result.column_names();
        let mut output = String::new();

        // Calculate column widths
        let mut col_widths: Vec<usize> = columns.iter().map(|c| c.len()).collect();

        for row in &result.rows {
            let cells = Self::row_cells(row);
            for (i, cell) in cells.iter().enumerate() {
                if i < col_widths.len() {
                    col_widths[i] = col_widths[i].max(cell.len());
                }
            }
        }

        // Ensure minimum width
        for width in &mut col_widths {
            *width = (*width).max(8);
        }

        // Header
        output.push_str(&Self::format_table_separator(&col_widths));
        output.push('|');
        for (i, col) in columns.iter().enumerate() {
            output.push_str(&format!(
                " {:<width$} |",
                col.bold().cyan(),
                width = col_widths[i]
            ));
        }
        output.push('\n');
        output.push_str(&Self::format_table_separator(&col_widths));

        // Data rows: dimension cells first, then metric cells
        for row in &result.rows {
            output.push('|');
            let dim_count = row.dimension_values.len();
            for (i, cell) in Self::row_cells(row).iter().enumerate() {
                if i < col_widths.len() {
                    let colored_cell = if i < dim_count {
                        cell.normal()
                    } else {
                        Self::format_metric_colored(&row.metric_values[i - dim_count])
                    };
                    output.push_str(&format!(
                        " {:<width$} |",
                        colored_cell,
                        width = col_widths[i]
                    ));
                }
            }
            output.push('\n');
        }

        output.push_str(&Self::format_table_separator(&col_widths));

        // Footer with metadata
        output.push_str(&format!(
            "{} {} in {}ms\n",
            result.row_count().to_string().green().bold(),
            if result.row_count() == 1 { "row" } else { "rows" },
            result.execution_time.as_millis()
        ));

        output
    }

    /// Format table border line
    fn format_table_separator(col_widths: &[usize]) -> String {
        let mut separator = String::new();
        separator.push('+');
        for &width in col_widths {
            separator.push_str(&"-".repeat(width + 2));
            separator.push('+');
        }
        separator.push('\n');
        separator
    }

    /// Format a result as JSON
    fn format_json(result: &ReportResult) -> String {
        let columns = result.column_names();
        let mut rows = Vec::new();

        for row in &result.rows {
            let mut row_obj = serde_json::Map::new();

            for (i, value) in row.dimension_values.iter().enumerate() {
                if let Some(col) = columns.get(i) {
                    row_obj.insert(col.clone(), JsonValue::String(value.clone()));
                }
            }
            let dim_count = row.dimension_values.len();
            for (i, value) in row.metric_values.iter().enumerate() {
                if let Some(col) = columns.get(dim_count + i) {
                    row_obj.insert(col.clone(), Self::metric_to_json(value));
                }
            }

            rows.push(JsonValue::Object(row_obj));
        }

        let output = json!({
            "data": rows,
            "metadata": {
                "dimensions": result.dimension_headers,
                "metrics": result.metric_headers.iter().map(|h| h.name.clone()).collect::<Vec<_>>(),
                "row_count": result.row_count(),
                "execution_time_ms": result.execution_time.as_millis() as u64
            }
        });

        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format a result as CSV
    fn format_csv(result: &ReportResult) -> String {
        let mut writer = csv::Writer::from_writer(vec![]);

        let _ = writer.write_record(result.column_names());
        for row in &result.rows {
            let _ = writer.write_record(Self::row_cells(row));
        }

        writer
            .into_inner()
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .unwrap_or_default()
    }

    /// All cells of a row as display strings, dimensions first
    fn row_cells(row: &crate::utils::types::ReportRow) -> Vec<String> {
        row.dimension_values
            .iter()
            .cloned()
            .chain(row.metric_values.iter().map(|v| v.to_string()))
            .collect()
    }

    /// Convert a metric cell to a colored string for table display
    fn format_metric_colored(value: &MetricValue) -> ColoredString {
        match value {
            MetricValue::Integer(i) => i.to_string().blue(),
            MetricValue::Float(f) => format!("{:.2}", f).blue(),
            MetricValue::Text(s) => s.dimmed(),
        }
    }

    /// Convert a metric cell to JSON
    fn metric_to_json(value: &MetricValue) -> JsonValue {
        match value {
            MetricValue::Integer(i) => JsonValue::Number((*i).into()),
            MetricValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            MetricValue::Text(s) => JsonValue::String(s.clone()),
        }
    }

    /// Format error message for CLI display
    pub fn format_error(error: &AnalyticsError) -> String {
        format!("{} {}", "Error running analysis:".red().bold(), error.to_string().red())
    }

    /// Format info message for CLI display
    pub fn format_info(message: &str) -> String {
        format!("{} {}", "Info:".blue().bold(), message)
    }
}
