// ✅ Catalog Validation - Content checks for the static catalogs
//
// Catalog data is edited by hand, so every invariant is re-checked at load:
// - ids unique within a catalog
// - tool ratings within 0.0 - 5.0
// - confidence levels only on future events, years non-decreasing,
//   percentages <= 100
// - timeline years parseable (Warning: they still sort last, never crash)

use crate::entities::{Catalogs, Regulation, TimelineEvent, Tool};
use crate::entities::tool::{MAX_RATING, MIN_RATING};
use crate::error::{CatalogError, CatalogResult};
use crate::year::parse_year;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

// ============================================================================
// ISSUES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub catalog: String,
    pub record_id: String,
    pub field: String,
    pub message: String,
    pub severity: Severity,
}

impl ValidationIssue {
    fn new(catalog: &str, record_id: &str, field: &str, message: String, severity: Severity) -> Self {
        ValidationIssue {
            catalog: catalog.to_string(),
            record_id: record_id.to_string(),
            field: field.to_string(),
            message,
            severity,
        }
    }
}

// ============================================================================
// REPORT
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub records_checked: usize,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn has_critical_issues(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Critical)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "Checked {} records: {} issues ({} critical, {} warnings)",
            self.records_checked,
            self.issues.len(),
            self.count(Severity::Critical),
            self.count(Severity::Warning)
        )
    }

    /// Turn critical issues into an error, for start-up paths that refuse bad data
    pub fn into_result(self) -> CatalogResult<Self> {
        if let Some(first) = self.issues.iter().find(|i| i.severity == Severity::Critical) {
            return Err(CatalogError::InvalidCatalog {
                catalog: first.catalog.clone(),
                message: format!("{} ({}): {}", first.record_id, first.field, first.message),
            });
        }
        Ok(self)
    }

    fn merge(&mut self, other: ValidationReport) {
        self.records_checked += other.records_checked;
        self.issues.extend(other.issues);
    }
}

// ============================================================================
// CHECKS
// ============================================================================

fn check_unique_ids<'a, I>(catalog: &str, ids: I, report: &mut ValidationReport)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            report.issues.push(ValidationIssue::new(
                catalog,
                id,
                "id",
                "id is empty".to_string(),
                Severity::Critical,
            ));
        } else if !seen.insert(id) {
            report.issues.push(ValidationIssue::new(
                catalog,
                id,
                "id",
                format!("duplicate id '{}'", id),
                Severity::Critical,
            ));
        }
    }
}

pub fn validate_regulations(records: &[Regulation]) -> ValidationReport {
    let mut report = ValidationReport {
        records_checked: records.len(),
        issues: Vec::new(),
    };
    check_unique_ids("regulations", records.iter().map(|r| r.id.as_str()), &mut report);

    for reg in records {
        if reg.number.trim().is_empty() {
            report.issues.push(ValidationIssue::new(
                "regulations",
                &reg.id,
                "number",
                "citation number is empty".to_string(),
                Severity::Warning,
            ));
        }
        if reg.title.trim().is_empty() {
            report.issues.push(ValidationIssue::new(
                "regulations",
                &reg.id,
                "title",
                "title is empty".to_string(),
                Severity::Warning,
            ));
        }
    }

    report
}

pub fn validate_tools(records: &[Tool]) -> ValidationReport {
    let mut report = ValidationReport {
        records_checked: records.len(),
        issues: Vec::new(),
    };
    check_unique_ids("tools", records.iter().map(|t| t.id.as_str()), &mut report);

    for tool in records {
        if !tool.rating_in_bounds() {
            report.issues.push(ValidationIssue::new(
                "tools",
                &tool.id,
                "rating",
                format!(
                    "rating {} outside {:.1}..={:.1}",
                    tool.rating, MIN_RATING, MAX_RATING
                ),
                Severity::Critical,
            ));
        }
        if tool.review_count == 0 && tool.rating > 0.0 {
            report.issues.push(ValidationIssue::new(
                "tools",
                &tool.id,
                "review_count",
                "rated tool has no reviews".to_string(),
                Severity::Info,
            ));
        }
    }

    report
}

pub fn validate_timeline(records: &[TimelineEvent]) -> ValidationReport {
    let mut report = ValidationReport {
        records_checked: records.len(),
        issues: Vec::new(),
    };
    check_unique_ids("timeline", records.iter().map(|e| e.id.as_str()), &mut report);

    for event in records {
        if !parse_year(&event.year).is_parsed() {
            report.issues.push(ValidationIssue::new(
                "timeline",
                &event.id,
                "year",
                format!("year '{}' is not parseable; event will sort last", event.year),
                Severity::Warning,
            ));
        }

        let Some(levels) = &event.confidence_levels else {
            continue;
        };

        if !event.is_future {
            report.issues.push(ValidationIssue::new(
                "timeline",
                &event.id,
                "confidence_levels",
                "confidence levels on an event that is not marked future".to_string(),
                Severity::Critical,
            ));
        }
        if levels.windows(2).any(|w| w[1].year < w[0].year) {
            report.issues.push(ValidationIssue::new(
                "timeline",
                &event.id,
                "confidence_levels",
                "confidence level years decrease".to_string(),
                Severity::Critical,
            ));
        }
        if levels.iter().any(|l| l.confidence > 100) {
            report.issues.push(ValidationIssue::new(
                "timeline",
                &event.id,
                "confidence_levels",
                "confidence above 100%".to_string(),
                Severity::Critical,
            ));
        }
        if levels.is_empty() {
            report.issues.push(ValidationIssue::new(
                "timeline",
                &event.id,
                "confidence_levels",
                "empty confidence list".to_string(),
                Severity::Info,
            ));
        }
    }

    report
}

/// Validate all three catalogs and log every non-info issue
pub fn validate_catalogs(catalogs: &Catalogs) -> ValidationReport {
    let mut report = validate_regulations(catalogs.regulations.records());
    report.merge(validate_tools(catalogs.tools.records()));
    report.merge(validate_timeline(catalogs.timeline.records()));

    for issue in report.issues.iter().filter(|i| i.severity != Severity::Info) {
        warn!(
            catalog = %issue.catalog,
            record = %issue.record_id,
            field = %issue.field,
            severity = issue.severity.as_str(),
            "{}",
            issue.message
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Impact, PricingTier, TimelineCategory, ToolCategory};

    fn create_tool(id: &str, rating: f64) -> Tool {
        Tool::new(id, id, ToolCategory::Testing, "", PricingTier::Free, rating, 10)
    }

    fn create_event(id: &str, year: &str) -> TimelineEvent {
        TimelineEvent::new(id, year, id, "", TimelineCategory::Standard, Impact::Medium)
    }

    #[test]
    fn test_default_catalogs_are_clean() {
        let report = validate_catalogs(&Catalogs::with_defaults());
        println!("Report: {}", report.summary());

        assert!(!report.has_critical_issues());
        assert_eq!(report.count(Severity::Warning), 0);
        assert!(report.records_checked > 40);
    }

    #[test]
    fn test_duplicate_ids_are_critical() {
        let report = validate_tools(&[create_tool("v0", 4.0), create_tool("v0", 3.0)]);
        assert!(report.has_critical_issues());
        assert!(report.issues.iter().any(|i| i.message.contains("duplicate id")));
    }

    #[test]
    fn test_rating_out_of_bounds() {
        let report = validate_tools(&[create_tool("hi", 5.1), create_tool("lo", -0.1), create_tool("ok", 5.0)]);
        let bad: Vec<&str> = report
            .issues
            .iter()
            .filter(|i| i.field == "rating")
            .map(|i| i.record_id.as_str())
            .collect();
        assert_eq!(bad, vec!["hi", "lo"]);
    }

    #[test]
    fn test_confidence_on_past_event_is_critical() {
        let mut event = create_event("past", "1990").with_confidence(&[(1990, 50)]);
        event.is_future = false;

        let report = validate_timeline(&[event]);
        assert!(report.has_critical_issues());
        assert!(report.issues.iter().any(|i| i.field == "confidence_levels"));
    }

    #[test]
    fn test_decreasing_confidence_years() {
        let event = create_event("f", "2030").with_confidence(&[(2032, 40), (2030, 60)]);
        let report = validate_timeline(&[event]);
        assert!(report.issues.iter().any(|i| i.message.contains("decrease")));
    }

    #[test]
    fn test_unparseable_year_is_only_a_warning() {
        let report = validate_timeline(&[create_event("odd", "Antiquity")]);
        assert!(!report.has_critical_issues());
        assert_eq!(report.count(Severity::Warning), 1);
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn test_into_result_fails_on_critical() {
        let report = validate_tools(&[create_tool("a", 9.0)]);
        let err = report.into_result().unwrap_err();
        assert!(matches!(err, CatalogError::InvalidCatalog { .. }));
    }
}
