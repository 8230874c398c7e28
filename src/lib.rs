// Medical Device Regulatory Catalog - Core Library
// Catalog data, filters and pagination shared by the TUI, the CLI and the API server

pub mod error;
pub mod logging;
pub mod config;
pub mod year;           // Year parsing + era classification
pub mod entities;       // Regulations, AI tools, timeline events
pub mod pagination;     // Load more / show all / collapse cursor
pub mod filter;         // Search, category, pricing, rating, era + reducer
pub mod validation;     // Content invariants for hand-edited catalogs
pub mod export;         // CSV export

#[cfg(feature = "server")]
pub mod api;            // axum router for the JSON API

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult};
pub use config::Config;
pub use year::{parse_year, Era, ParsedYear};
pub use entities::{
    CatalogKind, Catalogs,
    Regulation, RegulationCatalog, RegulationCategory, RegulationStatus,
    Tool, ToolCatalog, ToolCategory, PricingTier,
    TimelineEvent, TimelineCatalog, TimelineCategory, Impact, ConfidenceLevel,
};
pub use pagination::{paginate, Page, PageCursor, CursorState};
pub use filter::{
    apply_filters, compose_filters, matching_records, reduce, parse_selection,
    filter_by_search, filter_by_category, filter_by_pricing, filter_by_rating,
    filter_by_era, filter_future, sort_chronologically,
    Action, FilterState, FilteredView, Searchable, Categorized, Chronological, Filterable,
};
pub use validation::{
    validate_catalogs, validate_regulations, validate_tools, validate_timeline,
    ValidationReport, ValidationIssue, Severity,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
