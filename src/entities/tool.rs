// 🤖 Tool Entity - The AI tools directory
//
// AI and ML tools useful to device software teams, with pricing tier and
// community rating. Pricing tiers are ordinal: Free < $ < $$ < $$$ < $$$$.

use crate::error::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 5.0;

// ============================================================================
// TOOL CATEGORY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolCategory {
    MlFramework,
    CodeAssistant,
    UiGeneration,
    DocumentAnalysis,
    RegulatoryIntelligence,
    Testing,
}

impl ToolCategory {
    pub const ALL: [ToolCategory; 6] = [
        ToolCategory::MlFramework,
        ToolCategory::CodeAssistant,
        ToolCategory::UiGeneration,
        ToolCategory::DocumentAnalysis,
        ToolCategory::RegulatoryIntelligence,
        ToolCategory::Testing,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ToolCategory::MlFramework => "ml-framework",
            ToolCategory::CodeAssistant => "code-assistant",
            ToolCategory::UiGeneration => "ui-generation",
            ToolCategory::DocumentAnalysis => "document-analysis",
            ToolCategory::RegulatoryIntelligence => "regulatory-intelligence",
            ToolCategory::Testing => "testing",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ToolCategory::MlFramework => "ML Framework",
            ToolCategory::CodeAssistant => "Code Assistant",
            ToolCategory::UiGeneration => "UI Generation",
            ToolCategory::DocumentAnalysis => "Document Analysis",
            ToolCategory::RegulatoryIntelligence => "Regulatory Intelligence",
            ToolCategory::Testing => "Testing",
        }
    }
}

impl fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ToolCategory {
    type Err = CatalogError;

    /// Accepts either the id ("code-assistant") or the label ("Code Assistant")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ToolCategory::ALL
            .iter()
            .copied()
            .find(|c| c.id().eq_ignore_ascii_case(wanted) || c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CatalogError::unknown("tool category", s))
    }
}

// ============================================================================
// PRICING TIER
// ============================================================================

/// Ordinal pricing tier. Declaration order is the total order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PricingTier {
    #[serde(rename = "Free")]
    Free,
    #[serde(rename = "$")]
    Low,
    #[serde(rename = "$$")]
    Medium,
    #[serde(rename = "$$$")]
    High,
    #[serde(rename = "$$$$")]
    Enterprise,
}

impl PricingTier {
    pub const ALL: [PricingTier; 5] = [
        PricingTier::Free,
        PricingTier::Low,
        PricingTier::Medium,
        PricingTier::High,
        PricingTier::Enterprise,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            PricingTier::Free => "Free",
            PricingTier::Low => "$",
            PricingTier::Medium => "$$",
            PricingTier::High => "$$$",
            PricingTier::Enterprise => "$$$$",
        }
    }

    /// Position in the ordering, Free = 0
    pub fn rank(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for PricingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for PricingTier {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PricingTier::ALL
            .iter()
            .copied()
            .find(|t| t.symbol().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CatalogError::unknown("pricing tier", s))
    }
}

// ============================================================================
// TOOL RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub id: String,
    pub name: String,
    pub category: ToolCategory,
    pub description: String,

    #[serde(default)]
    pub use_cases: Vec<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    pub pricing: PricingTier,

    /// 0.0 - 5.0
    pub rating: f64,

    pub review_count: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Tool {
    pub fn new(
        id: &str,
        name: &str,
        category: ToolCategory,
        description: &str,
        pricing: PricingTier,
        rating: f64,
        review_count: u32,
    ) -> Self {
        Tool {
            id: id.to_string(),
            name: name.to_string(),
            category,
            description: description.to_string(),
            use_cases: Vec::new(),
            tags: Vec::new(),
            pricing,
            rating,
            review_count,
            url: None,
        }
    }

    /// Builder pattern: add use cases
    pub fn with_use_cases(mut self, use_cases: &[&str]) -> Self {
        self.use_cases = use_cases.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Builder pattern: add tags
    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Builder pattern: add homepage
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    pub fn rating_in_bounds(&self) -> bool {
        (MIN_RATING..=MAX_RATING).contains(&self.rating)
    }
}

// ============================================================================
// TOOL CATALOG
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCatalog {
    records: Vec<Tool>,
}

impl ToolCatalog {
    pub fn from_records(records: Vec<Tool>) -> Self {
        ToolCatalog { records }
    }

    pub fn with_defaults() -> Self {
        ToolCatalog::from_records(default_tools())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let records = super::read_json_records(path.as_ref())?;
        Ok(ToolCatalog::from_records(records))
    }

    pub fn records(&self) -> &[Tool] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Tool> {
        self.records.iter().find(|t| t.id == id)
    }

    /// Review-weighted mean rating, None for an empty catalog
    pub fn average_rating(&self) -> Option<f64> {
        let reviews: u64 = self.records.iter().map(|t| t.review_count as u64).sum();
        if reviews == 0 {
            return None;
        }
        let weighted: f64 = self
            .records
            .iter()
            .map(|t| t.rating * t.review_count as f64)
            .sum();
        Some(weighted / reviews as f64)
    }
}

fn default_tools() -> Vec<Tool> {
    use PricingTier::*;
    use ToolCategory::*;

    vec![
        Tool::new(
            "scikit-learn",
            "scikit-learn",
            MlFramework,
            "Classical machine learning in Python with well understood, reproducible algorithms.",
            Free,
            4.7,
            2150,
        )
        .with_use_cases(&["Risk prediction models", "Signal classification"])
        .with_tags(&["python", "open-source", "classical-ml"])
        .with_url("https://scikit-learn.org"),
        Tool::new(
            "tensorflow",
            "TensorFlow",
            MlFramework,
            "End-to-end deep learning platform with deployment targets for embedded and mobile hardware.",
            Free,
            4.5,
            1890,
        )
        .with_use_cases(&["Medical imaging models", "On-device inference"])
        .with_tags(&["python", "open-source", "deep-learning"])
        .with_url("https://www.tensorflow.org"),
        Tool::new(
            "pytorch",
            "PyTorch",
            MlFramework,
            "Deep learning framework favoured in research, with a mature ecosystem for imaging.",
            Free,
            4.8,
            2430,
        )
        .with_use_cases(&["Medical imaging models", "Model prototyping"])
        .with_tags(&["python", "open-source", "deep-learning"])
        .with_url("https://pytorch.org"),
        Tool::new(
            "github-copilot",
            "GitHub Copilot",
            CodeAssistant,
            "AI pair programmer integrated into common editors.",
            Low,
            4.4,
            3120,
        )
        .with_use_cases(&["Unit test generation", "Boilerplate reduction"])
        .with_tags(&["ide", "completion"]),
        Tool::new(
            "codeium",
            "Codeium",
            CodeAssistant,
            "Code completion and chat assistant with a free individual plan.",
            Free,
            4.2,
            860,
        )
        .with_use_cases(&["Code completion", "Refactoring"])
        .with_tags(&["ide", "completion"]),
        Tool::new(
            "cursor",
            "Cursor",
            CodeAssistant,
            "AI-first code editor with codebase-aware chat and multi-file edits.",
            Low,
            4.6,
            1410,
        )
        .with_use_cases(&["Refactoring", "Codebase navigation"])
        .with_tags(&["ide", "editor"]),
        Tool::new(
            "v0",
            "v0",
            UiGeneration,
            "Generates React interface components from natural language prompts.",
            Free,
            4.1,
            530,
        )
        .with_use_cases(&["Prototype clinician dashboards"])
        .with_tags(&["react", "frontend"]),
        Tool::new(
            "chatgpt-team",
            "ChatGPT Team",
            DocumentAnalysis,
            "General purpose assistant for drafting and summarising technical documentation.",
            Medium,
            4.3,
            2760,
        )
        .with_use_cases(&["Design history file drafting", "Summarising standards"])
        .with_tags(&["llm", "writing"]),
        Tool::new(
            "claude-team",
            "Claude Team",
            DocumentAnalysis,
            "Long-context assistant for reviewing large submission documents and SOPs.",
            Medium,
            4.5,
            1240,
        )
        .with_use_cases(&["SOP review", "Gap analysis"])
        .with_tags(&["llm", "long-context"]),
        Tool::new(
            "regdesk",
            "RegDesk",
            RegulatoryIntelligence,
            "Regulatory intelligence platform tracking requirements across global markets.",
            Enterprise,
            4.0,
            95,
        )
        .with_use_cases(&["Market entry planning", "Submission tracking"])
        .with_tags(&["regulatory", "saas"]),
        Tool::new(
            "greenlight-guru",
            "Greenlight Guru",
            RegulatoryIntelligence,
            "Medical device QMS software with design controls and risk management workflows.",
            High,
            4.4,
            310,
        )
        .with_use_cases(&["Design controls", "Risk management file"])
        .with_tags(&["qms", "saas"]),
        Tool::new(
            "testim",
            "Testim",
            Testing,
            "AI-assisted end-to-end test authoring with self-healing locators.",
            High,
            3.9,
            220,
        )
        .with_use_cases(&["Verification test automation"])
        .with_tags(&["testing", "e2e"]),
        Tool::new(
            "diffblue-cover",
            "Diffblue Cover",
            Testing,
            "Autonomous Java unit test writing for legacy code bases.",
            Enterprise,
            3.8,
            75,
        )
        .with_use_cases(&["Regression test coverage"])
        .with_tags(&["java", "unit-tests"]),
    ]
}
