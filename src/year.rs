// 📅 Year Parser - One place for every year-string rule
//
// Timeline years are free-form editorial strings:
//   "7000 BCE"   → -7000
//   "1280s"      → 1280   (decade suffix)
//   "1971-1972"  → 1971   (range → start year)
//   "1500 CE"    → 1500
//   "2024"       → 2024
//
// Anything else falls back to the leading digits, and if there are none the
// result is Unparseable. Era classification and chronological sorting only
// ever consume ParsedYear, they never look at the raw string.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// PARSED YEAR
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "year", rename_all = "snake_case")]
pub enum ParsedYear {
    Parsed(i32),
    Unparseable,
}

impl ParsedYear {
    pub fn value(&self) -> Option<i32> {
        match self {
            ParsedYear::Parsed(year) => Some(*year),
            ParsedYear::Unparseable => None,
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, ParsedYear::Parsed(_))
    }

    /// Sort order: parsed years ascending, Unparseable after all of them
    pub fn sort_cmp(&self, other: &ParsedYear) -> Ordering {
        match (self, other) {
            (ParsedYear::Parsed(a), ParsedYear::Parsed(b)) => a.cmp(b),
            (ParsedYear::Parsed(_), ParsedYear::Unparseable) => Ordering::Less,
            (ParsedYear::Unparseable, ParsedYear::Parsed(_)) => Ordering::Greater,
            (ParsedYear::Unparseable, ParsedYear::Unparseable) => Ordering::Equal,
        }
    }
}

/// Parse a free-form year string. Never panics.
pub fn parse_year(raw: &str) -> ParsedYear {
    let text = raw.trim();
    if text.is_empty() {
        return ParsedYear::Unparseable;
    }

    // Era suffixes: BCE negates, CE is noise
    if let Some(body) = strip_suffix_ci(text, "BCE").or_else(|| strip_suffix_ci(text, "BC")) {
        return match parse_body(body.trim()) {
            ParsedYear::Parsed(year) => ParsedYear::Parsed(-year),
            ParsedYear::Unparseable => ParsedYear::Unparseable,
        };
    }
    if let Some(body) = strip_suffix_ci(text, "CE").or_else(|| strip_suffix_ci(text, "AD")) {
        return parse_body(body.trim());
    }

    parse_body(text)
}

fn strip_suffix_ci<'a>(text: &'a str, suffix: &str) -> Option<&'a str> {
    if text.len() <= suffix.len() {
        return None;
    }
    let split = text.len() - suffix.len();
    if !text.is_char_boundary(split) {
        return None;
    }
    let (body, tail) = text.split_at(split);
    // Require whitespace before the suffix so "1280s" isn't read as "1280" + "s"
    if tail.eq_ignore_ascii_case(suffix) && body.ends_with(char::is_whitespace) {
        Some(body)
    } else {
        None
    }
}

fn parse_body(text: &str) -> ParsedYear {
    // Plain "NNNN"
    if let Ok(year) = text.parse::<i32>() {
        return ParsedYear::Parsed(year);
    }

    // Decade "NNNNs"
    if let Some(decade) = text.strip_suffix("'s").or_else(|| text.strip_suffix('s')) {
        if let Ok(year) = decade.trim().parse::<i32>() {
            return ParsedYear::Parsed(year);
        }
    }

    // Range "NNNN-NNNN" (also en dash) → start year
    if let Some((start, _end)) = text.split_once(['-', '–']) {
        if let Ok(year) = start.trim().parse::<i32>() {
            return ParsedYear::Parsed(year);
        }
    }

    leading_digits(text)
}

/// Best-effort fallback: the run of ASCII digits at the start of the string
fn leading_digits(text: &str) -> ParsedYear {
    let digits: String = text.chars().take_while(|c| c.is_ascii_digit()).collect();
    match digits.parse::<i32>() {
        Ok(year) => ParsedYear::Parsed(year),
        Err(_) => ParsedYear::Unparseable,
    }
}

// ============================================================================
// ERA CLASSIFICATION
// ============================================================================

/// Time bands for the timeline era filter.
///
/// Boundaries are editorial content and kept as opaque constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Era {
    Ancient,
    Historical,
    Recent,
    NearFuture,
    MidFuture,
    FarFuture,
}

pub const HISTORICAL_START: i32 = 1800;
pub const RECENT_START: i32 = 1950;
pub const NEAR_FUTURE_START: i32 = 2025;
pub const MID_FUTURE_START: i32 = 2035;
pub const FAR_FUTURE_START: i32 = 2045;

impl Era {
    pub const ALL: [Era; 6] = [
        Era::Ancient,
        Era::Historical,
        Era::Recent,
        Era::NearFuture,
        Era::MidFuture,
        Era::FarFuture,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Era::Ancient => "ancient",
            Era::Historical => "historical",
            Era::Recent => "recent",
            Era::NearFuture => "near-future",
            Era::MidFuture => "mid-future",
            Era::FarFuture => "far-future",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Era::Ancient => "Ancient (before 1800)",
            Era::Historical => "Historical (1800-1949)",
            Era::Recent => "Recent (1950-2024)",
            Era::NearFuture => "Near Future (2025-2034)",
            Era::MidFuture => "Mid Future (2035-2044)",
            Era::FarFuture => "Far Future (2045+)",
        }
    }

    /// Classify a parsed year. Unparseable years belong to no era.
    pub fn classify(year: ParsedYear) -> Option<Era> {
        let year = year.value()?;
        let era = if year < HISTORICAL_START {
            Era::Ancient
        } else if year < RECENT_START {
            Era::Historical
        } else if year < NEAR_FUTURE_START {
            Era::Recent
        } else if year < MID_FUTURE_START {
            Era::NearFuture
        } else if year < FAR_FUTURE_START {
            Era::MidFuture
        } else {
            Era::FarFuture
        };
        Some(era)
    }

    /// Next era in the cycle; None stands for "all eras"
    pub fn cycle(current: Option<Era>) -> Option<Era> {
        match current {
            None => Some(Era::Ancient),
            Some(Era::FarFuture) => None,
            Some(era) => {
                let idx = Era::ALL.iter().position(|e| *e == era).unwrap_or(0);
                Era::ALL.get(idx + 1).copied()
            }
        }
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Era {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Era::ALL
            .iter()
            .copied()
            .find(|era| era.id() == wanted)
            .ok_or_else(|| CatalogError::unknown("era", s))
    }
}
