use crate::report::query::{OrderBy, ReportQuery};
use crate::utils::error::{AnalyticsResult, ReportError};

/// One titled report in a dashboard suite
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection {
    pub label: String,
    pub query: ReportQuery,
}

impl ReportSection {
    /// Create a new section
    pub fn new(label: &str, query: ReportQuery) -> Self {
        Self {
            label: label.to_string(),
            query,
        }
    }
}

/// The recruiter dashboard suite: four reports over a trailing-day window
///
/// Section order is fixed; downstream readers of the printed dashboard rely
/// on it. Adding a report means adding an entry here, not new control flow.
pub fn dashboard_suite(days: u32) -> AnalyticsResult<Vec<ReportSection>> {
    if days == 0 {
        return Err(ReportError::InvalidDayWindow.into());
    }

    Ok(vec![
        ReportSection::new(
            "Traffic Overview (Total)",
            ReportQuery::trailing(days).with_metrics(&[
                "activeUsers",
                "sessions",
                "newUsers",
                "screenPageViews",
            ]),
        ),
        ReportSection::new(
            "Top Traffic Sources",
            ReportQuery::trailing(days)
                .with_metrics(&["sessions", "activeUsers"])
                .with_dimensions(&["sessionSourceMedium"])
                .with_limit(10)
                .with_order_by(OrderBy::descending("sessions")),
        ),
        ReportSection::new(
            "Top Pages & Views",
            ReportQuery::trailing(days)
                .with_metrics(&["screenPageViews", "activeUsers"])
                .with_dimensions(&["pagePath"])
                .with_limit(10)
                .with_order_by(OrderBy::descending("screenPageViews")),
        ),
        ReportSection::new(
            "User Locations",
            ReportQuery::trailing(days)
                .with_metrics(&["activeUsers", "sessions"])
                .with_dimensions(&["city", "country"])
                .with_limit(10)
                .with_order_by(OrderBy::descending("activeUsers")),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::query::OrderDirection;
    use crate::utils::error::AnalyticsError;

    #[test]
    fn test_suite_has_four_sections_in_fixed_order() {
        let suite = dashboard_suite(30).unwrap();

        assert_eq!(suite.len(), 4);
        assert_eq!(suite[0].label, "Traffic Overview (Total)");
        assert_eq!(suite[1].label, "Top Traffic Sources");
        assert_eq!(suite[2].label, "Top Pages & Views");
        assert_eq!(suite[3].label, "User Locations");
    }

    #[test]
    fn test_all_sections_share_the_date_window() {
        let suite = dashboard_suite(7).unwrap();

        for section in &suite {
            assert_eq!(section.query.start_date, "7daysAgo");
            assert_eq!(section.query.end_date, "today");
        }
    }

    #[test]
    fn test_overview_section_contents() {
        let suite = dashboard_suite(30).unwrap();
        let overview = &suite[0].query;

        assert_eq!(
            overview.metrics,
            vec!["activeUsers", "sessions", "newUsers", "screenPageViews"]
        );
        assert!(overview.dimensions.is_empty());
        assert!(overview.limit.is_none());
        assert!(overview.order_by.is_none());
    }

    #[test]
    fn test_sources_section_contents() {
        let suite = dashboard_suite(30).unwrap();
        let sources = &suite[1].query;

        assert_eq!(sources.metrics, vec!["sessions", "activeUsers"]);
        assert_eq!(sources.dimensions, vec!["sessionSourceMedium"]);
        assert_eq!(sources.limit, Some(10));
        let order = sources.order_by.as_ref().unwrap();
        assert_eq!(order.field, "sessions");
        assert_eq!(order.direction, OrderDirection::Descending);
    }

    #[test]
    fn test_pages_section_contents() {
        let suite = dashboard_suite(30).unwrap();
        let pages = &suite[2].query;

        assert_eq!(pages.metrics, vec!["screenPageViews", "activeUsers"]);
        assert_eq!(pages.dimensions, vec!["pagePath"]);
        assert_eq!(pages.limit, Some(10));
        let order = pages.order_by.as_ref().unwrap();
        assert_eq!(order.field, "screenPageViews");
        assert_eq!(order.direction, OrderDirection::Descending);
    }

    #[test]
    fn test_locations_section_contents() {
        let suite = dashboard_suite(30).unwrap();
        let locations = &suite[3].query;

        assert_eq!(locations.metrics, vec!["activeUsers", "sessions"]);
        assert_eq!(locations.dimensions, vec!["city", "country"]);
        assert_eq!(locations.limit, Some(10));
        let order = locations.order_by.as_ref().unwrap();
        assert_eq!(order.field, "activeUsers");
        assert_eq!(order.direction, OrderDirection::Descending);
    }

    #[test]
    fn test_every_section_query_validates() {
        let suite = dashboard_suite(30).unwrap();
        for section in &suite {
            assert!(section.query.validate().is_ok(), "{}", section.label);
        }
    }

    #[test]
    fn test_zero_day_window_rejected() {
        let result = dashboard_suite(0);

        assert!(result.is_err());
        match result.unwrap_err() {
            AnalyticsError::Report(ReportError::InvalidDayWindow) => {}
            _ => panic!("Expected InvalidDayWindow error"),
        }
    }
}
