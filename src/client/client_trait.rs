use async_trait::async_trait;

use crate::report::query::ReportQuery;
use crate::utils::error::AnalyticsResult;
use crate::utils::types::ReportResult;

/// Interface to the analytics backend
///
/// Implementations own authentication, transport and response parsing. The
/// runner only ever issues queries through this seam.
#[async_trait]
pub trait AnalyticsClient: Send + Sync {
    /// Execute a single report query and return the result set
    async fn run_report(&self, query: &ReportQuery) -> AnalyticsResult<ReportResult>;

    /// The GA4 property this client reports on
    fn property_id(&self) -> &str;
}
