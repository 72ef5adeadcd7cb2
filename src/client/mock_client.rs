use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::client::client_trait::AnalyticsClient;
use crate::report::query::ReportQuery;
use crate::utils::error::{AnalyticsResult, ClientError};
use crate::utils::types::{MetricHeader, MetricType, MetricValue, ReportResult, ReportRow};

/// Mock analytics client with deterministic in-memory data
///
/// Records every query it receives and can be told to fail on the Nth call,
/// which is how the stop-on-failure behavior of the runner is tested. Also
/// backs the CLI's offline sample mode. Clones share the query log, so a
/// test can keep a handle while the runner owns the boxed client.
#[derive(Clone)]
pub struct MockAnalyticsClient {
    property_id: String,
    recorded: Arc<Mutex<Vec<ReportQuery>>>,
    fail_on_call: Option<usize>,
}

/// Deterministic sample values keyed by dimension name
fn sample_dimension_values(dimension: &str, row: usize) -> String {
    match dimension {
        "sessionSourceMedium" => {
            let sources = ["google / organic", "linkedin.com / referral", "(direct) / (none)"];
            sources[row % sources.len()].to_string()
        }
        "pagePath" => {
            let paths = ["/", "/resume", "/projects/web-trader"];
            paths[row % paths.len()].to_string()
        }
        "city" => {
            let cities = ["Amsterdam", "London", "(not set)"];
            cities[row % cities.len()].to_string()
        }
        "country" => {
            let countries = ["Netherlands", "United Kingdom", "United States"];
            countries[row % countries.len()].to_string()
        }
        _ => format!("{}_{}", dimension, row),
    }
}

impl MockAnalyticsClient {
    /// Create a new mock client
    pub fn new() -> Self {
        Self {
            property_id: "000000000".to_string(),
            recorded: Arc::new(Mutex::new(Vec::new())),
            fail_on_call: None,
        }
    }

    /// Fail the Nth run_report call (1-based) with a request error
    pub fn fail_on_call(mut self, call: usize) -> Self {
        self.fail_on_call = Some(call);
        self
    }

    /// Queries received so far, in arrival order
    pub fn recorded_queries(&self) -> Vec<ReportQuery> {
        self.recorded.lock().expect("query log poisoned").clone()
    }

    /// Number of queries received so far
    pub fn call_count(&self) -> usize {
        self.recorded.lock().expect("query log poisoned").len()
    }

    /// Build a deterministic result shaped like the query
    fn generate_result(&self, query: &ReportQuery) -> ReportResult {
        let row_count = if query.dimensions.is_empty() {
            // Totals query: a single aggregate row
            1
        } else {
            query.limit.unwrap_or(3).min(3) as usize
        };

        let rows = (0..row_count)
            .map(|row| {
                let dimension_values = query
                    .dimensions
                    .iter()
                    .map(|d| sample_dimension_values(d, row))
                    .collect();
                let metric_values = query
                    .metrics
                    .iter()
                    .enumerate()
                    .map(|(col, _)| MetricValue::Integer((100 * (col as i64 + 1)) - 10 * row as i64))
                    .collect();
                ReportRow::new(dimension_values, metric_values)
            })
            .collect();

        ReportResult {
            dimension_headers: query.dimensions.clone(),
            metric_headers: query
                .metrics
                .iter()
                .map(|m| MetricHeader {
                    name: m.clone(),
                    metric_type: MetricType::Integer,
                })
                .collect(),
            rows,
            execution_time: Duration::from_millis(1),
        }
    }
}

impl Default for MockAnalyticsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalyticsClient for MockAnalyticsClient {
    async fn run_report(&self, query: &ReportQuery) -> AnalyticsResult<ReportResult> {
        query.validate()?;

        let call_number = {
            let mut recorded = self.recorded.lock().expect("query log poisoned");
            recorded.push(query.clone());
            recorded.len()
        };

        if self.fail_on_call == Some(call_number) {
            return Err(ClientError::RequestFailed(format!(
                "injected failure on call {}",
                call_number
            ))
            .into());
        }

        Ok(self.generate_result(query))
    }

    fn property_id(&self) -> &str {
        &self.property_id
    }
}
