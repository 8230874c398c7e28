// Entity Models - the three static catalogs
//
// Each catalog is a fixed, ordered sequence of records:
// - defined as literal data (or a JSON file of the same shape)
// - loaded once at start-up
// - never mutated afterwards, only filtered for display

pub mod regulation;
pub mod tool;
pub mod timeline;

pub use regulation::{Regulation, RegulationCatalog, RegulationCategory, RegulationStatus};
pub use tool::{PricingTier, Tool, ToolCatalog, ToolCategory};
pub use timeline::{ConfidenceLevel, Impact, TimelineCatalog, TimelineCategory, TimelineEvent};

use crate::error::{CatalogError, CatalogResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

pub const REGULATIONS_FILE: &str = "regulations.json";
pub const TOOLS_FILE: &str = "tools.json";
pub const TIMELINE_FILE: &str = "timeline.json";

/// Which catalog a command or request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    Regulations,
    Tools,
    Timeline,
}

impl CatalogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogKind::Regulations => "regulations",
            CatalogKind::Tools => "tools",
            CatalogKind::Timeline => "timeline",
        }
    }
}

impl FromStr for CatalogKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "regulations" | "regs" => Ok(CatalogKind::Regulations),
            "tools" | "ai-tools" => Ok(CatalogKind::Tools),
            "timeline" => Ok(CatalogKind::Timeline),
            _ => Err(CatalogError::unknown("catalog", s)),
        }
    }
}

/// The three catalogs, loaded together
#[derive(Debug, Clone, Serialize)]
pub struct Catalogs {
    pub regulations: RegulationCatalog,
    pub tools: ToolCatalog,
    pub timeline: TimelineCatalog,
}

impl Catalogs {
    pub fn with_defaults() -> Self {
        Catalogs {
            regulations: RegulationCatalog::with_defaults(),
            tools: ToolCatalog::with_defaults(),
            timeline: TimelineCatalog::with_defaults(),
        }
    }

    /// Load catalogs from a directory.
    ///
    /// Each of regulations.json / tools.json / timeline.json replaces the
    /// built-in catalog when present; missing files keep the defaults.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> CatalogResult<Self> {
        let dir = dir.as_ref();
        let mut catalogs = Catalogs::with_defaults();

        let path = dir.join(REGULATIONS_FILE);
        if path.exists() {
            catalogs.regulations = RegulationCatalog::from_file(&path)?;
            info!(path = %path.display(), count = catalogs.regulations.len(), "loaded regulations override");
        }

        let path = dir.join(TOOLS_FILE);
        if path.exists() {
            catalogs.tools = ToolCatalog::from_file(&path)?;
            info!(path = %path.display(), count = catalogs.tools.len(), "loaded tools override");
        }

        let path = dir.join(TIMELINE_FILE);
        if path.exists() {
            catalogs.timeline = TimelineCatalog::from_file(&path)?;
            info!(path = %path.display(), count = catalogs.timeline.len(), "loaded timeline override");
        }

        Ok(catalogs)
    }

    pub fn len(&self, kind: CatalogKind) -> usize {
        match kind {
            CatalogKind::Regulations => self.regulations.len(),
            CatalogKind::Tools => self.tools.len(),
            CatalogKind::Timeline => self.timeline.len(),
        }
    }

    /// SHA-256 over the serialized catalogs, used as an HTTP ETag
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        // Serializing plain data with derived impls cannot fail
        if let Ok(bytes) = serde_json::to_vec(self) {
            hasher.update(&bytes);
        }
        format!("{:x}", hasher.finalize())
    }
}

pub(crate) fn read_json_records<T: DeserializeOwned>(path: &Path) -> CatalogResult<Vec<T>> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records: Vec<T> = serde_json::from_str(&content).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), count = records.len(), "read catalog file");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_catalog_kind_from_str() {
        assert_eq!("Tools".parse::<CatalogKind>().unwrap(), CatalogKind::Tools);
        assert_eq!("regs".parse::<CatalogKind>().unwrap(), CatalogKind::Regulations);
        assert!("devices".parse::<CatalogKind>().is_err());
    }

    #[test]
    fn test_load_dir_without_files_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let catalogs = Catalogs::load_dir(dir.path()).unwrap();
        let defaults = Catalogs::with_defaults();

        assert_eq!(catalogs.len(CatalogKind::Tools), defaults.len(CatalogKind::Tools));
        assert_eq!(catalogs.fingerprint(), defaults.fingerprint());
    }

    #[test]
    fn test_load_dir_overrides_single_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = fs::File::create(dir.path().join(TOOLS_FILE)).unwrap();
        write!(
            file,
            r#"[{{"id":"t1","name":"Tool One","category":"testing","description":"d",
                "pricing":"$$","rating":3.5,"review_count":4}}]"#
        )
        .unwrap();

        let catalogs = Catalogs::load_dir(dir.path()).unwrap();
        assert_eq!(catalogs.tools.len(), 1);
        assert_eq!(catalogs.tools.records()[0].pricing, PricingTier::Medium);
        assert!(catalogs.tools.records()[0].tags.is_empty());
        assert_eq!(
            catalogs.regulations.len(),
            RegulationCatalog::with_defaults().len()
        );
    }

    #[test]
    fn test_load_dir_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(TIMELINE_FILE), "{ not json").unwrap();

        let err = Catalogs::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Json { .. }));
    }

    #[test]
    fn test_fingerprint_changes_with_content() {
        let a = Catalogs::with_defaults();
        let mut b = Catalogs::with_defaults();
        b.tools = ToolCatalog::from_records(vec![]);
        assert_ne!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }
}
