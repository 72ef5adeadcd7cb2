use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use url::Url;

use crate::client::client_trait::AnalyticsClient;
use crate::report::query::{OrderDirection, ReportQuery};
use crate::utils::config::ClientConfig;
use crate::utils::error::{AnalyticsResult, ClientError};
use crate::utils::types::{MetricHeader, MetricType, MetricValue, ReportResult, ReportRow};

/// GA4 Data API client
///
/// Speaks the `runReport` endpoint with bearer authentication. Sorting and
/// row limiting are requested of the API, never performed locally.
#[derive(Debug)]
pub struct Ga4Client {
    http: Client,
    endpoint: Url,
    property_id: String,
    access_token: String,
}

impl Ga4Client {
    /// Construct a client from a validated configuration
    ///
    /// Fails when the property id or access token is missing, or when the
    /// endpoint cannot be parsed.
    pub fn new(config: ClientConfig) -> AnalyticsResult<Self> {
        config.validate()?;

        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| ClientError::ConstructionFailed(format!("invalid endpoint: {}", e)))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                ClientError::ConstructionFailed(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            endpoint,
            property_id: config.property_id.unwrap_or_default(),
            access_token: config.access_token.unwrap_or_default(),
        })
    }

    fn report_url(&self) -> AnalyticsResult<Url> {
        self.endpoint
            .join(&format!("v1beta/properties/{}:runReport", self.property_id))
            .map_err(|e| ClientError::RequestFailed(format!("failed to build URL: {}", e)).into())
    }

    fn build_request_body(&self, query: &ReportQuery) -> RunReportRequest {
        let order_bys = query.order_by.as_ref().map(|order_by| {
            let field = FieldOrderBy {
                name: order_by.field.clone(),
            };
            let (metric, dimension) = if query.orders_by_metric() {
                (Some(field), None)
            } else {
                (None, Some(field))
            };
            vec![ApiOrderBy {
                desc: order_by.direction == OrderDirection::Descending,
                metric,
                dimension,
            }]
        });

        RunReportRequest {
            date_ranges: vec![DateRange {
                start_date: query.start_date.clone(),
                end_date: query.end_date.clone(),
            }],
            metrics: query.metrics.iter().map(|m| Field { name: m.clone() }).collect(),
            dimensions: query
                .dimensions
                .iter()
                .map(|d| Field { name: d.clone() })
                .collect(),
            limit: query.limit,
            order_bys,
        }
    }
}

#[async_trait]
impl AnalyticsClient for Ga4Client {
    async fn run_report(&self, query: &ReportQuery) -> AnalyticsResult<ReportResult> {
        query.validate()?;

        let url = self.report_url()?;
        let body = self.build_request_body(query);
        let start_time = Instant::now();

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    ClientError::AuthenticationFailed(format!("{}: {}", status, detail))
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    ClientError::QuotaExhausted(format!("{}: {}", status, detail))
                }
                _ => ClientError::RequestFailed(format!("{}: {}", status, detail)),
            }
            .into());
        }

        let parsed: RunReportResponse = response.json().await.map_err(|e| {
            ClientError::InvalidResponse(format!("failed to parse JSON response: {}", e))
        })?;

        Ok(parsed.into_result(start_time.elapsed()))
    }

    fn property_id(&self) -> &str {
        &self.property_id
    }
}

/// `runReport` request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunReportRequest {
    date_ranges: Vec<DateRange>,
    metrics: Vec<Field>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    dimensions: Vec<Field>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order_bys: Option<Vec<ApiOrderBy>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DateRange {
    start_date: String,
    end_date: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Field {
    name: String,
}

#[derive(Debug, Serialize)]
struct FieldOrderBy {
    name: String,
}

#[derive(Debug, Serialize)]
struct ApiOrderBy {
    desc: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    metric: Option<FieldOrderBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dimension: Option<FieldOrderBy>,
}

/// `runReport` response body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RunReportResponse {
    #[serde(default)]
    dimension_headers: Vec<Field>,
    #[serde(default)]
    metric_headers: Vec<ApiMetricHeader>,
    #[serde(default)]
    rows: Vec<ApiRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiMetricHeader {
    name: String,
    #[serde(rename = "type", default)]
    metric_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiRow {
    #[serde(default)]
    dimension_values: Vec<ApiCell>,
    #[serde(default)]
    metric_values: Vec<ApiCell>,
}

#[derive(Debug, Deserialize)]
struct ApiCell {
    #[serde(default)]
    value: String,
}

impl ApiMetricHeader {
    fn metric_type(&self) -> MetricType {
        match self.metric_type.as_deref() {
            Some("TYPE_FLOAT") => MetricType::Float,
            Some("TYPE_CURRENCY") => MetricType::Currency,
            Some("TYPE_SECONDS") => MetricType::Seconds,
            _ => MetricType::Integer,
        }
    }
}

impl RunReportResponse {
    fn into_result(self, execution_time: Duration) -> ReportResult {
        ReportResult {
            dimension_headers: self.dimension_headers.into_iter().map(|h| h.name).collect(),
            metric_headers: self
                .metric_headers
                .iter()
                .map(|h| MetricHeader {
                    name: h.name.clone(),
                    metric_type: h.metric_type(),
                })
                .collect(),
            rows: self
                .rows
                .into_iter()
                .map(|row| {
                    ReportRow::new(
                        row.dimension_values.into_iter().map(|c| c.value).collect(),
                        row.metric_values
                            .iter()
                            .map(|c| MetricValue::parse(&c.value))
                            .collect(),
                    )
                })
                .collect(),
            execution_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::query::OrderBy;
    use crate::utils::error::AnalyticsError;

    fn test_config() -> ClientConfig {
        ClientConfig::new()
            .with_property_id("123456789")
            .with_access_token("token")
    }

    #[test]
    fn test_construction_fails_without_credentials() {
        let result = Ga4Client::new(ClientConfig::new());

        assert!(result.is_err());
        match result.unwrap_err() {
            AnalyticsError::Configuration(_) => {}
            _ => panic!("Expected Configuration error"),
        }
    }

    #[test]
    fn test_construction_fails_on_invalid_endpoint() {
        let config = test_config().with_endpoint("not a url");
        let result = Ga4Client::new(config);

        assert!(result.is_err());
        match result.unwrap_err() {
            AnalyticsError::Client(ClientError::ConstructionFailed(msg)) => {
                assert!(msg.contains("invalid endpoint"));
            }
            _ => panic!("Expected ConstructionFailed error"),
        }
    }

    #[test]
    fn test_report_url_includes_property() {
        let client = Ga4Client::new(test_config()).unwrap();
        let url = client.report_url().unwrap();

        assert_eq!(
            url.as_str(),
            "https://analyticsdata.googleapis.com/v1beta/properties/123456789:runReport"
        );
    }

    #[test]
    fn test_request_body_metric_order_by() {
        let client = Ga4Client::new(test_config()).unwrap();
        let query = ReportQuery::trailing(7)
            .with_metrics(&["sessions", "activeUsers"])
            .with_dimensions(&["sessionSourceMedium"])
            .with_limit(10)
            .with_order_by(OrderBy::descending("sessions"));

        let body = client.build_request_body(&query);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["dateRanges"][0]["startDate"], "7daysAgo");
        assert_eq!(json["dateRanges"][0]["endDate"], "today");
        assert_eq!(json["metrics"][0]["name"], "sessions");
        assert_eq!(json["metrics"][1]["name"], "activeUsers");
        assert_eq!(json["dimensions"][0]["name"], "sessionSourceMedium");
        assert_eq!(json["limit"], 10);
        assert_eq!(json["orderBys"][0]["desc"], true);
        assert_eq!(json["orderBys"][0]["metric"]["name"], "sessions");
        assert!(json["orderBys"][0].get("dimension").is_none());
    }

    #[test]
    fn test_request_body_totals_query_omits_optional_fields() {
        let client = Ga4Client::new(test_config()).unwrap();
        let query = ReportQuery::trailing(30).with_metrics(&[
            "activeUsers",
            "sessions",
            "newUsers",
            "screenPageViews",
        ]);

        let body = client.build_request_body(&query);
        let json = serde_json::to_value(&body).unwrap();

        assert!(json.get("dimensions").is_none());
        assert!(json.get("limit").is_none());
        assert!(json.get("orderBys").is_none());
        assert_eq!(json["metrics"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_request_body_dimension_order_by() {
        let client = Ga4Client::new(test_config()).unwrap();
        let query = ReportQuery::trailing(30)
            .with_metrics(&["sessions"])
            .with_dimensions(&["country"])
            .with_order_by(OrderBy::ascending("country"));

        let body = client.build_request_body(&query);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["orderBys"][0]["desc"], false);
        assert_eq!(json["orderBys"][0]["dimension"]["name"], "country");
        assert!(json["orderBys"][0].get("metric").is_none());
    }

    #[test]
    fn test_response_parsing_into_result() {
        let raw = r#"{
            "dimensionHeaders": [{"name": "city"}, {"name": "country"}],
            "metricHeaders": [
                {"name": "activeUsers", "type": "TYPE_INTEGER"},
                {"name": "averageSessionDuration", "type": "TYPE_SECONDS"}
            ],
            "rows": [
                {
                    "dimensionValues": [{"value": "Amsterdam"}, {"value": "Netherlands"}],
                    "metricValues": [{"value": "42"}, {"value": "63.5"}]
                }
            ],
            "rowCount": 1
        }"#;

        let response: RunReportResponse = serde_json::from_str(raw).unwrap();
        let result = response.into_result(Duration::from_millis(5));

        assert_eq!(result.dimension_headers, vec!["city", "country"]);
        assert_eq!(result.metric_headers[0].metric_type, MetricType::Integer);
        assert_eq!(result.metric_headers[1].metric_type, MetricType::Seconds);
        assert_eq!(result.row_count(), 1);
        assert_eq!(result.rows[0].dimension_values[0], "Amsterdam");
        assert_eq!(result.rows[0].metric_values[0], MetricValue::Integer(42));
        assert_eq!(result.rows[0].metric_values[1], MetricValue::Float(63.5));
    }

    #[test]
    fn test_response_parsing_empty_report() {
        // GA omits "rows" entirely when a report has no data
        let raw = r#"{
            "metricHeaders": [{"name": "sessions", "type": "TYPE_INTEGER"}],
            "rowCount": 0
        }"#;

        let response: RunReportResponse = serde_json::from_str(raw).unwrap();
        let result = response.into_result(Duration::from_millis(1));

        assert!(result.is_empty());
        assert!(result.dimension_headers.is_empty());
        assert_eq!(result.metric_headers.len(), 1);
    }
}
