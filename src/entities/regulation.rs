// 📜 Regulation Entity - The regulations directory
//
// Every regulation, directive and standard the reference site indexes.
// Records are fixed content: they are defined here (or in a JSON override
// file), loaded once, and only ever filtered.

use crate::error::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

// ============================================================================
// REGULATION CATEGORY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegulationCategory {
    /// US FDA regulations (21 CFR)
    Fda,

    /// European Union regulations and directives
    Eu,

    /// ISO standards
    Iso,

    /// IEC standards
    Iec,

    /// Non-binding guidance documents
    Guidance,
}

impl RegulationCategory {
    pub const ALL: [RegulationCategory; 5] = [
        RegulationCategory::Fda,
        RegulationCategory::Eu,
        RegulationCategory::Iso,
        RegulationCategory::Iec,
        RegulationCategory::Guidance,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            RegulationCategory::Fda => "fda",
            RegulationCategory::Eu => "eu",
            RegulationCategory::Iso => "iso",
            RegulationCategory::Iec => "iec",
            RegulationCategory::Guidance => "guidance",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RegulationCategory::Fda => "FDA Regulations",
            RegulationCategory::Eu => "EU Regulations",
            RegulationCategory::Iso => "ISO Standards",
            RegulationCategory::Iec => "IEC Standards",
            RegulationCategory::Guidance => "Guidance Documents",
        }
    }
}

impl fmt::Display for RegulationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for RegulationCategory {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        RegulationCategory::ALL
            .iter()
            .copied()
            .find(|c| c.id() == wanted)
            .ok_or_else(|| CatalogError::unknown("regulation category", s))
    }
}

// ============================================================================
// REGULATION STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegulationStatus {
    Active,
    Transition,
    Superseded,
    Draft,
}

impl RegulationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegulationStatus::Active => "active",
            RegulationStatus::Transition => "transition",
            RegulationStatus::Superseded => "superseded",
            RegulationStatus::Draft => "draft",
        }
    }
}

// ============================================================================
// REGULATION RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Regulation {
    /// Unique within the catalog
    pub id: String,

    /// Citation, e.g. "21 CFR Part 820" or "ISO 14971:2019"
    pub number: String,

    pub title: String,
    pub description: String,
    pub category: RegulationCategory,
    pub status: RegulationStatus,
}

impl Regulation {
    pub fn new(
        id: &str,
        number: &str,
        title: &str,
        description: &str,
        category: RegulationCategory,
        status: RegulationStatus,
    ) -> Self {
        Regulation {
            id: id.to_string(),
            number: number.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            category,
            status,
        }
    }
}

// ============================================================================
// REGULATION CATALOG
// ============================================================================

/// Ordered, read-only collection of regulations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegulationCatalog {
    records: Vec<Regulation>,
}

impl RegulationCatalog {
    pub fn from_records(records: Vec<Regulation>) -> Self {
        RegulationCatalog { records }
    }

    /// Catalog with the built-in directory content
    pub fn with_defaults() -> Self {
        RegulationCatalog::from_records(default_regulations())
    }

    /// Load a catalog from a JSON array of regulations
    pub fn from_file<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let records = super::read_json_records(path.as_ref())?;
        Ok(RegulationCatalog::from_records(records))
    }

    pub fn records(&self) -> &[Regulation] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up by citation number (case-insensitive, whitespace-trimmed)
    pub fn find_by_number(&self, number: &str) -> Option<&Regulation> {
        let wanted = number.trim();
        self.records
            .iter()
            .find(|r| r.number.eq_ignore_ascii_case(wanted))
    }

    pub fn count_by_category(&self, category: RegulationCategory) -> usize {
        self.records.iter().filter(|r| r.category == category).count()
    }
}

fn default_regulations() -> Vec<Regulation> {
    use RegulationCategory::*;
    use RegulationStatus::*;

    vec![
        // ====================================================================
        // FDA
        // ====================================================================
        Regulation::new(
            "cfr-820",
            "21 CFR Part 820",
            "Quality Management System Regulation",
            "Current good manufacturing practice requirements for the methods, facilities and controls used in the design, manufacture, packaging, labeling, storage and servicing of finished devices. Now aligned with ISO 13485.",
            Fda,
            Transition,
        ),
        Regulation::new(
            "cfr-803",
            "21 CFR Part 803",
            "Medical Device Reporting",
            "Mandatory reporting of deaths, serious injuries and malfunctions by manufacturers, importers and device user facilities.",
            Fda,
            Active,
        ),
        Regulation::new(
            "cfr-807",
            "21 CFR Part 807",
            "Establishment Registration and Premarket Notification",
            "Registration and device listing obligations plus the 510(k) premarket notification pathway for demonstrating substantial equivalence.",
            Fda,
            Active,
        ),
        Regulation::new(
            "cfr-814",
            "21 CFR Part 814",
            "Premarket Approval of Medical Devices",
            "PMA application content, review procedures and post-approval requirements for Class III devices.",
            Fda,
            Active,
        ),
        Regulation::new(
            "cfr-830",
            "21 CFR Part 830",
            "Unique Device Identification",
            "Labeler obligations for UDI assignment, label formats and submission of device identifiers to the GUDID database.",
            Fda,
            Active,
        ),
        Regulation::new(
            "cfr-11",
            "21 CFR Part 11",
            "Electronic Records; Electronic Signatures",
            "Criteria under which electronic records and electronic signatures are considered trustworthy, reliable and equivalent to paper records.",
            Fda,
            Active,
        ),
        // ====================================================================
        // EU
        // ====================================================================
        Regulation::new(
            "eu-mdr",
            "Regulation (EU) 2017/745",
            "Medical Device Regulation (MDR)",
            "Replaces the Medical Devices Directive with stricter clinical evidence, post-market surveillance and notified body oversight requirements.",
            Eu,
            Transition,
        ),
        Regulation::new(
            "eu-ivdr",
            "Regulation (EU) 2017/746",
            "In Vitro Diagnostic Regulation (IVDR)",
            "Risk-based classification and performance evaluation rules for in vitro diagnostic devices sold in the European market.",
            Eu,
            Transition,
        ),
        Regulation::new(
            "eu-mdd",
            "Directive 93/42/EEC",
            "Medical Devices Directive",
            "Former EU framework for medical devices, superseded by the MDR with legacy device provisions.",
            Eu,
            Superseded,
        ),
        // ====================================================================
        // ISO / IEC
        // ====================================================================
        Regulation::new(
            "iso-13485",
            "ISO 13485:2016",
            "Medical devices - Quality management systems",
            "Requirements for a quality management system where an organization needs to demonstrate its ability to provide devices that consistently meet customer and regulatory requirements.",
            Iso,
            Active,
        ),
        Regulation::new(
            "iso-14971",
            "ISO 14971:2019",
            "Application of risk management to medical devices",
            "Process for identifying hazards, estimating and evaluating risks, controlling them and monitoring the effectiveness of the controls across the device lifecycle.",
            Iso,
            Active,
        ),
        Regulation::new(
            "iec-62304",
            "IEC 62304:2006+A1:2015",
            "Medical device software - Software life cycle processes",
            "Life cycle requirements for medical device software development and maintenance, scaled by software safety classification.",
            Iec,
            Active,
        ),
        Regulation::new(
            "iec-60601",
            "IEC 60601-1",
            "Medical electrical equipment - General requirements for basic safety and essential performance",
            "Core electrical, mechanical and thermal safety requirements for medical electrical equipment and systems.",
            Iec,
            Active,
        ),
        Regulation::new(
            "iec-62366",
            "IEC 62366-1:2015",
            "Application of usability engineering to medical devices",
            "Usability engineering process to analyse, specify, develop and evaluate the usability of a device as it relates to safety.",
            Iec,
            Active,
        ),
        // ====================================================================
        // GUIDANCE
        // ====================================================================
        Regulation::new(
            "fda-pccp",
            "FDA PCCP Guidance",
            "Predetermined Change Control Plans for AI-Enabled Device Software Functions",
            "Recommendations on describing planned modifications to machine learning enabled device software and the associated validation and impact assessment methods.",
            Guidance,
            Draft,
        ),
        Regulation::new(
            "fda-cybersecurity",
            "FDA Premarket Cybersecurity Guidance",
            "Cybersecurity in Medical Devices: Quality System Considerations and Content of Premarket Submissions",
            "Expectations for secure product development frameworks, threat modeling and software bill of materials in premarket submissions.",
            Guidance,
            Active,
        ),
    ]
}
