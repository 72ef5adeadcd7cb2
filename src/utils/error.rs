use thiserror::Error;

/// Main error type for the dashboard
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Analytics client errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Client construction failed: {0}")]
    ConstructionFailed(String),

    #[error("Report request failed: {0}")]
    RequestFailed(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("API quota exhausted: {0}")]
    QuotaExhausted(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

/// Report query validation errors
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Report query has no metrics")]
    EmptyMetrics,

    #[error("Invalid date expression: {0}")]
    InvalidDateExpression(String),

    #[error("Invalid field name: {0}")]
    InvalidFieldName(String),

    #[error("Order field '{0}' is neither a metric nor a dimension of the query")]
    UnknownOrderField(String),

    #[error("Day window must be greater than zero")]
    InvalidDayWindow,
}

/// Result type alias for dashboard operations
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
