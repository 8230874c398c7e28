// 📤 CSV Export - Write a (filtered) catalog view to CSV
//
// Rows are flat: list fields are joined with "; " and the optional forecast
// curve is rendered as "2027:52%; 2028:68%".

use crate::entities::{Regulation, TimelineEvent, Tool};
use crate::error::{CatalogError, CatalogResult};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Serialize)]
struct RegulationRow<'a> {
    id: &'a str,
    number: &'a str,
    title: &'a str,
    category: &'static str,
    status: &'static str,
    description: &'a str,
}

#[derive(Debug, Serialize)]
struct ToolRow<'a> {
    id: &'a str,
    name: &'a str,
    category: &'static str,
    pricing: &'static str,
    rating: f64,
    review_count: u32,
    tags: String,
    use_cases: String,
    description: &'a str,
}

#[derive(Debug, Serialize)]
struct TimelineRow<'a> {
    id: &'a str,
    year: &'a str,
    sort_year: Option<i32>,
    era: &'static str,
    title: &'a str,
    category: &'static str,
    impact: &'static str,
    is_future: bool,
    confidence: String,
}

impl<'a> From<&'a Regulation> for RegulationRow<'a> {
    fn from(r: &'a Regulation) -> Self {
        RegulationRow {
            id: &r.id,
            number: &r.number,
            title: &r.title,
            category: r.category.id(),
            status: r.status.as_str(),
            description: &r.description,
        }
    }
}

impl<'a> From<&'a Tool> for ToolRow<'a> {
    fn from(t: &'a Tool) -> Self {
        ToolRow {
            id: &t.id,
            name: &t.name,
            category: t.category.id(),
            pricing: t.pricing.symbol(),
            rating: t.rating,
            review_count: t.review_count,
            tags: t.tags.join("; "),
            use_cases: t.use_cases.join("; "),
            description: &t.description,
        }
    }
}

impl<'a> From<&'a TimelineEvent> for TimelineRow<'a> {
    fn from(e: &'a TimelineEvent) -> Self {
        let confidence = e
            .confidence_levels
            .as_ref()
            .map(|levels| {
                levels
                    .iter()
                    .map(|l| format!("{}:{}%", l.year, l.confidence))
                    .collect::<Vec<_>>()
                    .join("; ")
            })
            .unwrap_or_default();

        TimelineRow {
            id: &e.id,
            year: &e.year,
            sort_year: e.sort_year().value(),
            era: e.era().map(|era| era.id()).unwrap_or(""),
            title: &e.title,
            category: e.category.id(),
            impact: e.impact.as_str(),
            is_future: e.is_future,
            confidence,
        }
    }
}

fn write_rows<W, R, I>(writer: W, rows: I) -> CatalogResult<usize>
where
    W: Write,
    R: Serialize,
    I: IntoIterator<Item = R>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut count = 0;
    for row in rows {
        csv_writer.serialize(row)?;
        count += 1;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(count)
}

pub fn write_regulations<'a, W, I>(writer: W, records: I) -> CatalogResult<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Regulation>,
{
    write_rows(writer, records.into_iter().map(RegulationRow::from))
}

pub fn write_tools<'a, W, I>(writer: W, records: I) -> CatalogResult<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Tool>,
{
    write_rows(writer, records.into_iter().map(ToolRow::from))
}

pub fn write_timeline<'a, W, I>(writer: W, records: I) -> CatalogResult<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a TimelineEvent>,
{
    write_rows(writer, records.into_iter().map(TimelineRow::from))
}

/// Open `path` for writing, mapping the I/O error with its path
pub fn create_file(path: &Path) -> CatalogResult<File> {
    File::create(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{RegulationCatalog, TimelineCatalog, ToolCatalog};
    use crate::filter::filter_by_pricing;
    use crate::entities::PricingTier;

    #[test]
    fn test_export_regulations_header_and_rows() {
        let catalog = RegulationCatalog::with_defaults();
        let mut buf = Vec::new();
        let count = write_regulations(&mut buf, catalog.records()).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(count, catalog.len());
        assert!(text.starts_with("id,number,title,category,status,description\n"));
        assert!(text.contains("cfr-830,21 CFR Part 830,Unique Device Identification,fda,active,"));
    }

    #[test]
    fn test_export_filtered_tools() {
        let catalog = ToolCatalog::with_defaults();
        let free = filter_by_pricing(catalog.records(), Some(PricingTier::Free));
        let mut buf = Vec::new();
        let count = write_tools(&mut buf, free).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(count, 5);
        assert_eq!(text.lines().count(), 6);
        assert!(text.contains("python; open-source; deep-learning"));
    }

    #[test]
    fn test_export_timeline_confidence_column() {
        let catalog = TimelineCatalog::with_defaults();
        let mut buf = Vec::new();
        write_timeline(&mut buf, catalog.records()).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("2027:52%; 2028:68%; 2030:85%"));
        assert!(text.contains("trepanation,7000 BCE,-7000,ancient,"));
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tools.csv");
        let file = create_file(&path).unwrap();
        write_tools(file, ToolCatalog::with_defaults().records()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("scikit-learn"));
    }
}
