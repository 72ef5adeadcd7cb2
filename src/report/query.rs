use chrono::NaiveDate;
use regex::Regex;

use crate::utils::error::{AnalyticsResult, ReportError};

/// Parameter bundle describing one analytics report request
///
/// Built fresh for every call; never reused or persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportQuery {
    pub start_date: String,
    pub end_date: String,
    pub metrics: Vec<String>,
    pub dimensions: Vec<String>,
    pub limit: Option<u64>,
    pub order_by: Option<OrderBy>,
}

/// Ordering specification for a report query
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: OrderDirection,
}

/// Sort direction
#[derive(Debug, Clone, PartialEq)]
pub enum OrderDirection {
    Ascending,
    Descending,
}

impl OrderBy {
    /// Order ascending by the given field
    pub fn ascending(field: &str) -> Self {
        Self {
            field: field.to_string(),
            direction: OrderDirection::Ascending,
        }
    }

    /// Order descending by the given field
    pub fn descending(field: &str) -> Self {
        Self {
            field: field.to_string(),
            direction: OrderDirection::Descending,
        }
    }
}

impl ReportQuery {
    /// Create a query with an explicit date range
    pub fn new(start_date: &str, end_date: &str) -> Self {
        Self {
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
            metrics: Vec::new(),
            dimensions: Vec::new(),
            limit: None,
            order_by: None,
        }
    }

    /// Create a query covering the trailing `days` window up to today
    pub fn trailing(days: u32) -> Self {
        Self::new(&format!("{}daysAgo", days), "today")
    }

    /// Set the requested metrics
    pub fn with_metrics(mut self, metrics: &[&str]) -> Self {
        self.metrics = metrics.iter().map(|m| m.to_string()).collect();
        self
    }

    /// Set the breakdown dimensions
    pub fn with_dimensions(mut self, dimensions: &[&str]) -> Self {
        self.dimensions = dimensions.iter().map(|d| d.to_string()).collect();
        self
    }

    /// Cap the number of returned rows
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Request server-side ordering
    pub fn with_order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = Some(order_by);
        self
    }

    /// Validate the query before it is sent to the API
    ///
    /// Every query carries at least one metric; dimensions may legitimately
    /// be empty (totals query). The order field must name one of the query's
    /// own metrics or dimensions.
    pub fn validate(&self) -> AnalyticsResult<()> {
        if self.metrics.is_empty() {
            return Err(ReportError::EmptyMetrics.into());
        }

        validate_date_expression(&self.start_date)?;
        validate_date_expression(&self.end_date)?;

        for field in self.metrics.iter().chain(self.dimensions.iter()) {
            validate_field_name(field)?;
        }

        if let Some(order_by) = &self.order_by {
            validate_field_name(&order_by.field)?;
            if !self.metrics.contains(&order_by.field) && !self.dimensions.contains(&order_by.field) {
                return Err(ReportError::UnknownOrderField(order_by.field.clone()).into());
            }
        }

        Ok(())
    }

    /// True when the order field names one of the query's metrics
    pub fn orders_by_metric(&self) -> bool {
        match &self.order_by {
            Some(order_by) => self.metrics.contains(&order_by.field),
            None => false,
        }
    }
}

/// Accept relative expressions ("today", "yesterday", "NdaysAgo") or a
/// literal ISO date
fn validate_date_expression(expr: &str) -> AnalyticsResult<()> {
    if expr == "today" || expr == "yesterday" {
        return Ok(());
    }

    let relative = Regex::new(r"^\d+daysAgo$")
        .map(|re| re.is_match(expr))
        .unwrap_or(false);
    if relative {
        return Ok(());
    }

    if NaiveDate::parse_from_str(expr, "%Y-%m-%d").is_ok() {
        return Ok(());
    }

    Err(ReportError::InvalidDateExpression(expr.to_string()).into())
}

/// GA API field names are camelCase alphanumeric identifiers
fn validate_field_name(name: &str) -> AnalyticsResult<()> {
    let valid = Regex::new(r"^[a-zA-Z][a-zA-Z0-9]*$")
        .map(|re| re.is_match(name))
        .unwrap_or(false);
    if valid {
        Ok(())
    } else {
        Err(ReportError::InvalidFieldName(name.to_string()).into())
    }
}
