use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result of a single report query
///
/// Rows arrive already sorted and limited by the API; the runner treats this
/// structure as opaque and hands it straight to the formatter.
#[derive(Debug, Clone)]
pub struct ReportResult {
    pub dimension_headers: Vec<String>,
    pub metric_headers: Vec<MetricHeader>,
    pub rows: Vec<ReportRow>,
    pub execution_time: Duration,
}

/// Metadata for a metric column
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MetricHeader {
    pub name: String,
    #[serde(default)]
    pub metric_type: MetricType,
}

/// Metric value types reported by the API
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub enum MetricType {
    #[default]
    Integer,
    Float,
    Currency,
    Seconds,
}

/// A single result row: dimension values followed by metric values
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub dimension_values: Vec<String>,
    pub metric_values: Vec<MetricValue>,
}

/// A metric cell, parsed from the API's string representation
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl MetricValue {
    /// Parse a raw API cell, preferring integer over float over text
    pub fn parse(raw: &str) -> Self {
        if let Ok(i) = raw.parse::<i64>() {
            MetricValue::Integer(i)
        } else if let Ok(f) = raw.parse::<f64>() {
            MetricValue::Float(f)
        } else {
            MetricValue::Text(raw.to_string())
        }
    }
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricValue::Integer(i) => write!(f, "{}", i),
            MetricValue::Float(v) => write!(f, "{:.2}", v),
            MetricValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl ReportResult {
    /// Create a new empty result
    pub fn new() -> Self {
        Self {
            dimension_headers: Vec::new(),
            metric_headers: Vec::new(),
            rows: Vec::new(),
            execution_time: Duration::from_millis(0),
        }
    }

    /// All column names in display order: dimensions first, then metrics
    pub fn column_names(&self) -> Vec<String> {
        self.dimension_headers
            .iter()
            .cloned()
            .chain(self.metric_headers.iter().map(|h| h.name.clone()))
            .collect()
    }

    /// Get the number of rows in the result
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the result is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Default for ReportResult {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRow {
    /// Create a new row from dimension and metric cells
    pub fn new(dimension_values: Vec<String>, metric_values: Vec<MetricValue>) -> Self {
        Self {
            dimension_values,
            metric_values,
        }
    }
}
