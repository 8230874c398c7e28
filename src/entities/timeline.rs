// ⏳ Timeline Entity - Medical device history and forecasts
//
// Years are editorial strings ("7000 BCE", "1280s", "1971-1972"), parsed on
// demand by year::parse_year. Future events may carry a forecast: an ordered
// list of (year, confidence %) pairs.

use crate::error::{CatalogError, CatalogResult};
use crate::year::{parse_year, Era, ParsedYear};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

// ============================================================================
// TIMELINE CATEGORY / IMPACT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineCategory {
    Medicine,
    Technology,
    Regulation,
    Standard,
    Ai,
}

impl TimelineCategory {
    pub const ALL: [TimelineCategory; 5] = [
        TimelineCategory::Medicine,
        TimelineCategory::Technology,
        TimelineCategory::Regulation,
        TimelineCategory::Standard,
        TimelineCategory::Ai,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            TimelineCategory::Medicine => "medicine",
            TimelineCategory::Technology => "technology",
            TimelineCategory::Regulation => "regulation",
            TimelineCategory::Standard => "standard",
            TimelineCategory::Ai => "ai",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimelineCategory::Medicine => "Medicine",
            TimelineCategory::Technology => "Technology",
            TimelineCategory::Regulation => "Regulation",
            TimelineCategory::Standard => "Standards",
            TimelineCategory::Ai => "AI",
        }
    }
}

impl fmt::Display for TimelineCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for TimelineCategory {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        TimelineCategory::ALL
            .iter()
            .copied()
            .find(|c| c.id() == wanted)
            .ok_or_else(|| CatalogError::unknown("timeline category", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::Low => "low",
            Impact::Medium => "medium",
            Impact::High => "high",
        }
    }
}

// ============================================================================
// TIMELINE EVENT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceLevel {
    pub year: i32,

    /// Percent, 0 - 100
    pub confidence: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: String,
    pub year: String,
    pub title: String,
    pub description: String,
    pub category: TimelineCategory,
    pub impact: Impact,

    #[serde(default)]
    pub is_future: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_levels: Option<Vec<ConfidenceLevel>>,
}

impl TimelineEvent {
    pub fn new(
        id: &str,
        year: &str,
        title: &str,
        description: &str,
        category: TimelineCategory,
        impact: Impact,
    ) -> Self {
        TimelineEvent {
            id: id.to_string(),
            year: year.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            category,
            impact,
            is_future: false,
            confidence_levels: None,
        }
    }

    /// Builder pattern: mark as a forecast
    pub fn future(mut self) -> Self {
        self.is_future = true;
        self
    }

    /// Builder pattern: attach a forecast curve (implies future)
    pub fn with_confidence(mut self, levels: &[(i32, u8)]) -> Self {
        self.is_future = true;
        self.confidence_levels = Some(
            levels
                .iter()
                .map(|&(year, confidence)| ConfidenceLevel { year, confidence })
                .collect(),
        );
        self
    }

    /// Year used for chronological sorting.
    ///
    /// A forecast with confidence levels is keyed by its first forecast year;
    /// everything else goes through the year parser.
    pub fn sort_year(&self) -> ParsedYear {
        if self.is_future {
            if let Some(first) = self.confidence_levels.as_ref().and_then(|l| l.first()) {
                return ParsedYear::Parsed(first.year);
            }
        }
        parse_year(&self.year)
    }

    /// Era band of the year string itself; forecast years never move an event
    /// into another band
    pub fn era(&self) -> Option<Era> {
        Era::classify(parse_year(&self.year))
    }
}

// ============================================================================
// TIMELINE CATALOG
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineCatalog {
    records: Vec<TimelineEvent>,
}

impl TimelineCatalog {
    pub fn from_records(records: Vec<TimelineEvent>) -> Self {
        TimelineCatalog { records }
    }

    pub fn with_defaults() -> Self {
        TimelineCatalog::from_records(default_events())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let records = super::read_json_records(path.as_ref())?;
        Ok(TimelineCatalog::from_records(records))
    }

    pub fn records(&self) -> &[TimelineEvent] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn future_count(&self) -> usize {
        self.records.iter().filter(|e| e.is_future).count()
    }
}

fn default_events() -> Vec<TimelineEvent> {
    use Impact::*;
    use TimelineCategory::*;

    vec![
        TimelineEvent::new(
            "trepanation",
            "7000 BCE",
            "Trepanation",
            "Earliest evidence of surgical instruments used to bore holes in the skull.",
            Medicine,
            Medium,
        ),
        TimelineEvent::new(
            "eyeglasses",
            "1280s",
            "Eyeglasses",
            "Convex lenses mounted in frames appear in Italy, one of the first corrective devices.",
            Technology,
            Medium,
        ),
        TimelineEvent::new(
            "stethoscope",
            "1816",
            "Stethoscope",
            "Laennec invents the stethoscope, the archetypal diagnostic instrument.",
            Technology,
            High,
        ),
        TimelineEvent::new(
            "x-ray",
            "1895",
            "Discovery of X-rays",
            "Roentgen discovers X-rays, launching medical imaging.",
            Technology,
            High,
        ),
        TimelineEvent::new(
            "fdc-act",
            "1938",
            "Federal Food, Drug, and Cosmetic Act",
            "First US law to bring medical devices under FDA authority, targeting adulteration and misbranding.",
            Regulation,
            High,
        ),
        TimelineEvent::new(
            "pacemaker",
            "1958",
            "Implantable Pacemaker",
            "First fully implanted cardiac pacemaker.",
            Medicine,
            High,
        ),
        TimelineEvent::new(
            "ct-scanner",
            "1971-1972",
            "CT Scanner",
            "First clinical computed tomography scan and commercial scanner introduction.",
            Technology,
            High,
        ),
        TimelineEvent::new(
            "mda-1976",
            "1976",
            "Medical Device Amendments",
            "Creates the three-class risk system, premarket notification and premarket approval.",
            Regulation,
            High,
        ),
        TimelineEvent::new(
            "therac-25",
            "1985-1987",
            "Therac-25 Accidents",
            "Radiation overdoses caused by software race conditions reshape thinking on software safety.",
            Technology,
            High,
        ),
        TimelineEvent::new(
            "mdd",
            "1993",
            "EU Medical Devices Directive",
            "Harmonised CE marking framework for medical devices across Europe.",
            Regulation,
            High,
        ),
        TimelineEvent::new(
            "qsr",
            "1996",
            "Quality System Regulation",
            "FDA adds design controls to current good manufacturing practice requirements.",
            Regulation,
            High,
        ),
        TimelineEvent::new(
            "iso-14971-first",
            "2000",
            "ISO 14971 First Edition",
            "International standard for device risk management is published.",
            Standard,
            Medium,
        ),
        TimelineEvent::new(
            "iec-62304-first",
            "2006",
            "IEC 62304 Published",
            "Software life cycle standard for medical device software.",
            Standard,
            Medium,
        ),
        TimelineEvent::new(
            "eu-mdr",
            "2017",
            "EU MDR Adopted",
            "Regulation (EU) 2017/745 replaces the directive with stricter clinical evidence rules.",
            Regulation,
            High,
        ),
        TimelineEvent::new(
            "aiml-framework",
            "2019",
            "FDA AI/ML Discussion Paper",
            "Proposed regulatory framework for modifications to AI/ML-based software as a medical device.",
            Ai,
            Medium,
        ),
        TimelineEvent::new(
            "eu-ai-act",
            "2024",
            "EU AI Act",
            "Medical AI systems are classified as high-risk with obligations layered on top of MDR.",
            Ai,
            High,
        ),
        TimelineEvent::new(
            "qmsr-effective",
            "2026",
            "QMSR Takes Effect",
            "FDA quality system requirements formally incorporate ISO 13485 by reference.",
            Regulation,
            High,
        )
        .future(),
        TimelineEvent::new(
            "adaptive-ai",
            "2027-2030",
            "Continuously Learning Devices Cleared",
            "Routine clearance of adaptive algorithms under predetermined change control plans.",
            Ai,
            High,
        )
        .with_confidence(&[(2027, 52), (2028, 68), (2030, 85)]),
        TimelineEvent::new(
            "global-reliance",
            "2030s",
            "Global Regulatory Reliance",
            "Regulators routinely accept each other's reviews through reliance pathways.",
            Regulation,
            Medium,
        )
        .with_confidence(&[(2032, 40), (2035, 60)]),
        TimelineEvent::new(
            "digital-twins",
            "2040",
            "In Silico Trials Accepted",
            "Computational models of patients replace a share of clinical investigations.",
            Technology,
            Medium,
        )
        .with_confidence(&[(2038, 30), (2040, 45), (2044, 60)]),
        TimelineEvent::new(
            "autonomous-surgery",
            "2050",
            "Autonomous Surgical Systems",
            "Fully autonomous robotic procedures approved for routine interventions.",
            Medicine,
            High,
        )
        .with_confidence(&[(2048, 20), (2050, 35)]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_year_uses_first_confidence_level() {
        let event = TimelineEvent::new("x", "2027-2030", "X", "", TimelineCategory::Ai, Impact::High)
            .with_confidence(&[(2027, 52), (2029, 70)]);
        assert!(event.is_future);
        assert_eq!(event.sort_year(), ParsedYear::Parsed(2027));
    }

    #[test]
    fn test_era_uses_year_string_not_forecast() {
        let event = TimelineEvent::new("x", "2034", "X", "", TimelineCategory::Ai, Impact::Medium)
            .with_confidence(&[(2036, 40), (2040, 70)]);
        assert_eq!(event.sort_year(), ParsedYear::Parsed(2036));
        assert_eq!(event.era(), Some(Era::NearFuture));
    }

    #[test]
    fn test_sort_year_falls_back_to_year_string() {
        let event = TimelineEvent::new("x", "1280s", "X", "", TimelineCategory::Technology, Impact::Low);
        assert_eq!(event.sort_year(), ParsedYear::Parsed(1280));
        assert_eq!(event.era(), Some(Era::Ancient));
    }

    #[test]
    fn test_confidence_on_non_future_event_is_ignored_for_sorting() {
        let mut event = TimelineEvent::new("x", "1990", "X", "", TimelineCategory::Medicine, Impact::Low)
            .with_confidence(&[(2040, 10)]);
        event.is_future = false;
        assert_eq!(event.sort_year(), ParsedYear::Parsed(1990));
    }

    #[test]
    fn test_default_events_all_parse() {
        let catalog = TimelineCatalog::with_defaults();
        assert!(catalog.records().iter().all(|e| e.sort_year().is_parsed()));
        assert!(catalog.future_count() >= 4);
    }

    #[test]
    fn test_event_json_shape() {
        let json = r#"{
            "id": "x",
            "year": "2031",
            "title": "X",
            "description": "d",
            "category": "ai",
            "impact": "low",
            "is_future": true,
            "confidence_levels": [{"year": 2031, "confidence": 50}]
        }"#;
        let event: TimelineEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.category, TimelineCategory::Ai);
        assert_eq!(event.sort_year(), ParsedYear::Parsed(2031));
    }
}
