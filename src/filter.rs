// 🔍 Catalog Filter - Search, category, pricing, rating, era
//
// Every filter is a pure function over borrowed records:
// - output preserves input order (sort_chronologically excepted)
// - "all" selections are modeled as None and act as identity
// - filters are ANDed, so application order never changes the result set
//
// UI state lives in FilterState and only changes through reduce().

use crate::entities::{
    PricingTier, Regulation, RegulationCategory, TimelineCategory, TimelineEvent, Tool,
    ToolCategory,
};
use crate::error::CatalogResult;
use crate::pagination::{paginate, PageCursor};
use crate::year::{Era, ParsedYear};
use serde::Serialize;
use std::str::FromStr;

// ============================================================================
// RECORD TRAITS
// ============================================================================

/// Text fields a free-text query is matched against
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

/// Records with a closed category enum
pub trait Categorized {
    type Category: Copy + PartialEq;

    fn category(&self) -> Self::Category;
}

/// Records that can be placed on a timeline
pub trait Chronological {
    fn sort_year(&self) -> ParsedYear;
}

impl Searchable for Regulation {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.number.as_str(), self.title.as_str(), self.description.as_str()]
    }
}

impl Categorized for Regulation {
    type Category = RegulationCategory;

    fn category(&self) -> RegulationCategory {
        self.category
    }
}

impl Searchable for Tool {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.description.as_str(), self.category.label()];
        fields.extend(self.use_cases.iter().map(String::as_str));
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }
}

impl Categorized for Tool {
    type Category = ToolCategory;

    fn category(&self) -> ToolCategory {
        self.category
    }
}

impl Searchable for TimelineEvent {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.year.as_str(), self.title.as_str(), self.description.as_str()]
    }
}

impl Categorized for TimelineEvent {
    type Category = TimelineCategory;

    fn category(&self) -> TimelineCategory {
        self.category
    }
}

impl Chronological for TimelineEvent {
    fn sort_year(&self) -> ParsedYear {
        TimelineEvent::sort_year(self)
    }
}

// ============================================================================
// PREDICATES
// ============================================================================

/// Normalized query, None when the query is blank
fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Case-insensitive substring match on any search field
pub fn matches_query<T: Searchable + ?Sized>(record: &T, query: &str) -> bool {
    match normalize_query(query) {
        None => true,
        Some(needle) => matches_normalized(record, &needle),
    }
}

fn matches_normalized<T: Searchable + ?Sized>(record: &T, needle: &str) -> bool {
    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

pub fn filter_by_search<'a, T, I>(records: I, query: &str) -> Vec<&'a T>
where
    T: Searchable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    match normalize_query(query) {
        None => records.into_iter().collect(),
        Some(needle) => records
            .into_iter()
            .filter(|r| matches_normalized(*r, &needle))
            .collect(),
    }
}

// Single-record predicates, shared by the filter_by_* functions and
// Filterable::matches_extra. None always matches.

fn category_matches<T: Categorized>(record: &T, category: Option<T::Category>) -> bool {
    category.map_or(true, |c| record.category() == c)
}

fn pricing_matches(tool: &Tool, tier: Option<PricingTier>) -> bool {
    tier.map_or(true, |tier| tool.pricing == tier)
}

fn rating_matches(tool: &Tool, min_rating: Option<f64>) -> bool {
    min_rating.map_or(true, |min| tool.rating >= min)
}

fn era_matches(event: &TimelineEvent, era: Option<Era>) -> bool {
    era.map_or(true, |wanted| event.era() == Some(wanted))
}

fn future_matches(event: &TimelineEvent, show_future: bool) -> bool {
    show_future || !event.is_future
}

pub fn filter_by_category<'a, T, I>(records: I, category: Option<T::Category>) -> Vec<&'a T>
where
    T: Categorized + 'a,
    I: IntoIterator<Item = &'a T>,
{
    records
        .into_iter()
        .filter(|r| category_matches(*r, category))
        .collect()
}

pub fn filter_by_pricing<'a, I>(tools: I, tier: Option<PricingTier>) -> Vec<&'a Tool>
where
    I: IntoIterator<Item = &'a Tool>,
{
    tools.into_iter().filter(|t| pricing_matches(t, tier)).collect()
}

pub fn filter_by_rating<'a, I>(tools: I, min_rating: Option<f64>) -> Vec<&'a Tool>
where
    I: IntoIterator<Item = &'a Tool>,
{
    tools
        .into_iter()
        .filter(|t| rating_matches(t, min_rating))
        .collect()
}

/// Unparseable years fall in no era, so they only survive `None` (all eras)
pub fn filter_by_era<'a, I>(events: I, era: Option<Era>) -> Vec<&'a TimelineEvent>
where
    I: IntoIterator<Item = &'a TimelineEvent>,
{
    events.into_iter().filter(|e| era_matches(e, era)).collect()
}

pub fn filter_future<'a, I>(events: I, show_future: bool) -> Vec<&'a TimelineEvent>
where
    I: IntoIterator<Item = &'a TimelineEvent>,
{
    events
        .into_iter()
        .filter(|e| future_matches(e, show_future))
        .collect()
}

/// Stable ascending sort by parsed year; unparseable years go last
pub fn sort_chronologically<'a, T, I>(records: I) -> Vec<&'a T>
where
    T: Chronological + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut keyed: Vec<(ParsedYear, &'a T)> =
        records.into_iter().map(|r| (r.sort_year(), r)).collect();
    keyed.sort_by(|a, b| a.0.sort_cmp(&b.0));
    keyed.into_iter().map(|(_, r)| r).collect()
}

// ============================================================================
// SELECTION PARSING ("all" sentinel)
// ============================================================================

/// Parse a user selection where "all", "All Categories" or "" mean no filter
pub fn parse_selection<T>(raw: &str) -> CatalogResult<Option<T>>
where
    T: FromStr<Err = crate::error::CatalogError>,
{
    let trimmed = raw.trim();
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("all")
        || trimmed.eq_ignore_ascii_case("all categories")
    {
        return Ok(None);
    }
    trimmed.parse::<T>().map(Some)
}

// ============================================================================
// FILTER STATE & REDUCER
// ============================================================================

/// Everything the user controls on a catalog page.
///
/// `C` is the catalog's category type. Pricing/rating only apply to tools,
/// era/show_future only to the timeline; other catalogs ignore them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterState<C> {
    pub query: String,
    pub category: Option<C>,
    pub pricing: Option<PricingTier>,
    pub min_rating: Option<f64>,
    pub era: Option<Era>,
    pub show_future: bool,
    pub cursor: PageCursor,
}

impl<C> Default for FilterState<C> {
    fn default() -> Self {
        FilterState {
            query: String::new(),
            category: None,
            pricing: None,
            min_rating: None,
            era: None,
            show_future: true,
            cursor: PageCursor::default(),
        }
    }
}

impl<C> FilterState<C> {
    pub fn with_cursor(cursor: PageCursor) -> Self {
        FilterState {
            cursor,
            ..FilterState::default()
        }
    }

    /// True when any predicate differs from "show everything"
    pub fn has_active_filters(&self) -> bool {
        !self.query.trim().is_empty()
            || self.category.is_some()
            || self.pricing.is_some()
            || self.min_rating.is_some()
            || self.era.is_some()
            || !self.show_future
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action<C> {
    SetQuery(String),
    SetCategory(Option<C>),
    SetPricing(Option<PricingTier>),
    SetMinRating(Option<f64>),
    SetEra(Option<Era>),
    ToggleFuture,
    LoadMore,
    ShowAll,
    Collapse,
    /// Clear every predicate and collapse (the "no results → reset" action)
    Reset,
}

/// Pure state transition. Any predicate change resets the cursor so a stale
/// expanded slice is never shown for a new result set.
pub fn reduce<C: Copy + PartialEq>(state: FilterState<C>, action: Action<C>) -> FilterState<C> {
    let mut next = state;
    let changed = match action {
        Action::SetQuery(query) => replace(&mut next.query, query),
        Action::SetCategory(category) => replace(&mut next.category, category),
        Action::SetPricing(pricing) => replace(&mut next.pricing, pricing),
        Action::SetMinRating(min_rating) => replace(&mut next.min_rating, min_rating),
        Action::SetEra(era) => replace(&mut next.era, era),
        Action::ToggleFuture => {
            next.show_future = !next.show_future;
            true
        }
        Action::LoadMore => {
            next.cursor = next.cursor.load_more();
            false
        }
        Action::ShowAll => {
            next.cursor = next.cursor.show_all();
            false
        }
        Action::Collapse => {
            next.cursor = next.cursor.collapse();
            false
        }
        Action::Reset => {
            let cursor = next.cursor.collapse();
            next = FilterState::with_cursor(cursor);
            false
        }
    };

    if changed {
        next.cursor = next.cursor.collapse();
    }
    next
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

// ============================================================================
// APPLYING STATE TO A CATALOG
// ============================================================================

/// Catalog-specific predicates and ordering on top of search + category
pub trait Filterable: Searchable + Categorized + Sized {
    fn matches_extra(&self, _state: &FilterState<Self::Category>) -> bool {
        true
    }

    fn order(records: Vec<&Self>) -> Vec<&Self> {
        records
    }
}

impl Filterable for Regulation {}

impl Filterable for Tool {
    fn matches_extra(&self, state: &FilterState<ToolCategory>) -> bool {
        pricing_matches(self, state.pricing) && rating_matches(self, state.min_rating)
    }
}

impl Filterable for TimelineEvent {
    fn matches_extra(&self, state: &FilterState<TimelineCategory>) -> bool {
        future_matches(self, state.show_future) && era_matches(self, state.era)
    }

    fn order(records: Vec<&Self>) -> Vec<&Self> {
        sort_chronologically(records)
    }
}

/// What a view renders: the visible slice and the counts for its controls
#[derive(Debug, Clone, Serialize)]
pub struct FilteredView<'a, T> {
    pub records: Vec<&'a T>,
    pub total_matches: usize,
    pub visible_count: usize,
    pub has_more: bool,
    pub can_collapse: bool,
    pub is_empty: bool,
}

impl<'a, T> FilteredView<'a, T> {
    /// Active filters excluded everything, so offer a reset. An empty catalog
    /// with no filters is not a "no match".
    pub fn is_no_match<C>(&self, state: &FilterState<C>) -> bool {
        self.is_empty && state.has_active_filters()
    }
}

/// Records passing every predicate (logical AND), in input order
pub fn compose_filters<'a, T, I>(records: I, predicates: &[&dyn Fn(&T) -> bool]) -> Vec<&'a T>
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
{
    records
        .into_iter()
        .filter(|r| predicates.iter().all(|p| p(*r)))
        .collect()
}

/// Every matching record, in display order, ignoring the cursor
pub fn matching_records<'a, T: Filterable>(
    state: &FilterState<T::Category>,
    records: &'a [T],
) -> Vec<&'a T> {
    let needle = normalize_query(&state.query);
    let by_query = |r: &T| needle.as_deref().map_or(true, |n| matches_normalized(r, n));
    let by_category = |r: &T| category_matches(r, state.category);
    let by_extra = |r: &T| r.matches_extra(state);

    let predicates: [&dyn Fn(&T) -> bool; 3] = [&by_query, &by_category, &by_extra];

    T::order(compose_filters(records, &predicates))
}

pub fn apply_filters<'a, T: Filterable>(
    state: &FilterState<T::Category>,
    records: &'a [T],
) -> FilteredView<'a, T> {
    let matched = matching_records(state, records);
    let total_matches = matched.len();
    let visible_count = state.cursor.visible_count(total_matches);
    let page = paginate(&matched, visible_count);

    FilteredView {
        records: page.items.to_vec(),
        total_matches,
        visible_count,
        has_more: page.has_more,
        can_collapse: state.cursor.can_collapse(total_matches),
        is_empty: total_matches == 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        Impact, RegulationCatalog, RegulationStatus, TimelineCatalog, ToolCatalog,
    };
    use crate::pagination::CursorState;
    use crate::year::parse_year;

    fn ids<T, F: Fn(&T) -> &str>(records: &[&T], f: F) -> Vec<String> {
        records.iter().map(|r| f(r).to_string()).collect()
    }

    fn create_event(id: &str, year: &str) -> TimelineEvent {
        TimelineEvent::new(id, year, id, "", TimelineCategory::Medicine, Impact::Low)
    }

    // ------------------------------------------------------------------------
    // search / category
    // ------------------------------------------------------------------------

    #[test]
    fn test_empty_query_is_identity() {
        let catalog = RegulationCatalog::with_defaults();
        let all: Vec<&Regulation> = catalog.records().iter().collect();

        assert_eq!(filter_by_search(catalog.records(), ""), all);
        assert_eq!(filter_by_search(catalog.records(), "   \t"), all);
    }

    #[test]
    fn test_search_results_are_subset_containing_query() {
        let catalog = ToolCatalog::with_defaults();
        for query in ["python", "IDE", "imaging", "qms", "zzz-nothing"] {
            let results = filter_by_search(catalog.records(), query);
            let needle = query.to_lowercase();
            for tool in &results {
                assert!(catalog.records().iter().any(|t| std::ptr::eq(t, *tool)));
                assert!(tool
                    .search_fields()
                    .iter()
                    .any(|f| f.to_lowercase().contains(&needle)));
            }
        }
        assert!(filter_by_search(catalog.records(), "zzz-nothing").is_empty());
    }

    #[test]
    fn test_search_preserves_order() {
        let catalog = ToolCatalog::with_defaults();
        let results = filter_by_search(catalog.records(), "deep-learning");
        assert_eq!(ids(&results, |t| t.id.as_str()), vec!["tensorflow", "pytorch"]);
    }

    #[test]
    fn test_tool_search_covers_category_label_and_use_cases() {
        let catalog = ToolCatalog::with_defaults();
        let by_label = filter_by_search(catalog.records(), "ui generation");
        assert_eq!(ids(&by_label, |t| t.id.as_str()), vec!["v0"]);

        let by_use_case = filter_by_search(catalog.records(), "gap analysis");
        assert_eq!(ids(&by_use_case, |t| t.id.as_str()), vec!["claude-team"]);
    }

    #[test]
    fn test_category_all_is_identity() {
        let catalog = RegulationCatalog::with_defaults();
        let all: Vec<&Regulation> = catalog.records().iter().collect();
        assert_eq!(filter_by_category(catalog.records(), None), all);
    }

    #[test]
    fn test_category_exact_match() {
        let catalog = RegulationCatalog::with_defaults();
        let results = filter_by_category(catalog.records(), Some(RegulationCategory::Iec));
        assert!(!results.is_empty());
        assert!(results.iter().all(|r| r.category == RegulationCategory::Iec));
    }

    #[test]
    fn test_filters_commute() {
        let catalog = RegulationCatalog::with_defaults();
        for query in ["device", "risk", "software", ""] {
            for category in RegulationCategory::ALL.iter().copied().map(Some).chain([None]) {
                let a = filter_by_category(filter_by_search(catalog.records(), query), category);
                let b = filter_by_search(filter_by_category(catalog.records(), category), query);
                assert_eq!(a, b, "query={query:?} category={category:?}");
            }
        }
    }

    #[test]
    fn test_compose_filters_ignores_predicate_order() {
        let catalog = ToolCatalog::with_defaults();
        let free = |t: &Tool| t.pricing == PricingTier::Free;
        let rated = |t: &Tool| t.rating >= 4.5;

        let forward: [&dyn Fn(&Tool) -> bool; 2] = [&free, &rated];
        let backward: [&dyn Fn(&Tool) -> bool; 2] = [&rated, &free];

        let a = compose_filters(catalog.records(), &forward);
        let b = compose_filters(catalog.records(), &backward);
        assert_eq!(a, b);
        assert!(a.iter().all(|t| free(*t) && rated(*t)));

        let none: [&dyn Fn(&Tool) -> bool; 0] = [];
        assert_eq!(compose_filters(catalog.records(), &none).len(), catalog.len());
    }

    #[test]
    fn test_tool_filters_commute() {
        let catalog = ToolCatalog::with_defaults();
        let a = filter_by_rating(filter_by_pricing(catalog.records(), Some(PricingTier::Free)), Some(4.5));
        let b = filter_by_pricing(filter_by_rating(catalog.records(), Some(4.5)), Some(PricingTier::Free));
        assert_eq!(a, b);
        assert_eq!(ids(&a, |t| t.id.as_str()), vec!["scikit-learn", "tensorflow", "pytorch"]);
    }

    // ------------------------------------------------------------------------
    // end-to-end scenarios
    // ------------------------------------------------------------------------

    #[test]
    fn test_regulations_udi_scenario() {
        let catalog = RegulationCatalog::with_defaults();
        let state: FilterState<RegulationCategory> = reduce(
            FilterState::default(),
            Action::SetQuery("udi".to_string()),
        );
        let view = apply_filters(&state, catalog.records());

        assert_eq!(view.total_matches, 1);
        assert_eq!(view.records[0].number, "21 CFR Part 830");
    }

    #[test]
    fn test_tools_free_pricing_scenario() {
        let catalog = ToolCatalog::with_defaults();
        let results = filter_by_pricing(catalog.records(), Some(PricingTier::Free));
        assert_eq!(
            ids(&results, |t| t.id.as_str()),
            vec!["scikit-learn", "tensorflow", "pytorch", "codeium", "v0"]
        );
    }

    #[test]
    fn test_timeline_ancient_scenario() {
        let catalog = TimelineCatalog::with_defaults();
        let results = filter_by_era(catalog.records(), Some(Era::Ancient));
        let years: Vec<&str> = results.iter().map(|e| e.year.as_str()).collect();

        assert!(results
            .iter()
            .all(|e| parse_year(&e.year).value().map_or(false, |y| y < 1800)));
        assert!(years.contains(&"7000 BCE"));
        assert!(years.contains(&"1280s"));
        assert!(!years.contains(&"1895"));
    }

    // ------------------------------------------------------------------------
    // rating / era / future
    // ------------------------------------------------------------------------

    #[test]
    fn test_rating_threshold_is_inclusive() {
        let catalog = ToolCatalog::with_defaults();
        let results = filter_by_rating(catalog.records(), Some(4.7));
        assert!(results.iter().all(|t| t.rating >= 4.7));
        assert!(results.iter().any(|t| t.id == "scikit-learn"));
        assert_eq!(filter_by_rating(catalog.records(), None).len(), catalog.len());
    }

    #[test]
    fn test_unparseable_year_only_in_all_eras() {
        let events = vec![create_event("odd", "Antiquity"), create_event("x", "1895")];
        assert!(filter_by_era(&events, Some(Era::Ancient)).is_empty());
        assert_eq!(filter_by_era(&events, Some(Era::Historical)).len(), 1);
        assert_eq!(filter_by_era(&events, None).len(), 2);
    }

    #[test]
    fn test_filter_future_hides_forecasts() {
        let catalog = TimelineCatalog::with_defaults();
        let present = filter_future(catalog.records(), false);
        assert!(present.iter().all(|e| !e.is_future));
        assert_eq!(present.len(), catalog.len() - catalog.future_count());
        assert_eq!(filter_future(catalog.records(), true).len(), catalog.len());
    }

    // ------------------------------------------------------------------------
    // chronological sort
    // ------------------------------------------------------------------------

    #[test]
    fn test_sort_chronologically_keys() {
        let events = vec![
            create_event("c", "2024"),
            create_event("a", "7000 BCE"),
            create_event("broken", "sometime"),
            create_event("b", "1280s"),
            create_event("d", "1971-1972"),
            TimelineEvent::new("f", "2027-2030", "f", "", TimelineCategory::Ai, Impact::High)
                .with_confidence(&[(2027, 52), (2030, 80)]),
        ];
        let sorted = sort_chronologically(&events);
        assert_eq!(ids(&sorted, |e| e.id.as_str()), vec!["a", "b", "d", "c", "f", "broken"]);
    }

    #[test]
    fn test_sort_is_stable_and_idempotent() {
        let events = vec![
            create_event("first-1990", "1990"),
            create_event("second-1990", "1990s"),
            create_event("unknown-1", "?"),
            create_event("early", "1800"),
            create_event("unknown-2", "n/a"),
        ];
        let once = sort_chronologically(&events);
        assert_eq!(
            ids(&once, |e| e.id.as_str()),
            vec!["early", "first-1990", "second-1990", "unknown-1", "unknown-2"]
        );

        let twice = sort_chronologically(once.clone());
        assert_eq!(once, twice);
    }

    // ------------------------------------------------------------------------
    // selection parsing
    // ------------------------------------------------------------------------

    #[test]
    fn test_parse_selection_sentinels() {
        assert_eq!(parse_selection::<RegulationCategory>("all").unwrap(), None);
        assert_eq!(parse_selection::<ToolCategory>("All Categories").unwrap(), None);
        assert_eq!(parse_selection::<Era>("").unwrap(), None);
        assert_eq!(parse_selection::<Era>("ancient").unwrap(), Some(Era::Ancient));
        assert!(parse_selection::<PricingTier>("priceless").is_err());
    }

    // ------------------------------------------------------------------------
    // reducer / apply
    // ------------------------------------------------------------------------

    #[test]
    fn test_predicate_change_resets_cursor() {
        let state: FilterState<ToolCategory> = FilterState::default();
        let state = reduce(state, Action::LoadMore);
        assert_eq!(state.cursor.state(), CursorState::Expanded(20));

        let same = reduce(state.clone(), Action::SetQuery(String::new()));
        assert_eq!(same.cursor.state(), CursorState::Expanded(20));

        let changed = reduce(state, Action::SetPricing(Some(PricingTier::Free)));
        assert_eq!(changed.cursor.state(), CursorState::Initial);
        assert_eq!(changed.pricing, Some(PricingTier::Free));
    }

    #[test]
    fn test_toggle_future_resets_cursor() {
        let state: FilterState<TimelineCategory> = reduce(FilterState::default(), Action::ShowAll);
        let state = reduce(state, Action::ToggleFuture);
        assert!(!state.show_future);
        assert_eq!(state.cursor.state(), CursorState::Initial);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state: FilterState<ToolCategory> = FilterState::default();
        for action in [
            Action::SetQuery("ide".to_string()),
            Action::SetCategory(Some(ToolCategory::CodeAssistant)),
            Action::SetMinRating(Some(4.0)),
            Action::ShowAll,
        ] {
            state = reduce(state, action);
        }
        assert!(state.has_active_filters());

        let state = reduce(state, Action::Reset);
        assert!(!state.has_active_filters());
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn test_apply_filters_paginates_timeline() {
        let catalog = TimelineCatalog::with_defaults();
        let state: FilterState<TimelineCategory> = FilterState::default();

        let view = apply_filters(&state, catalog.records());
        assert_eq!(view.total_matches, catalog.len());
        assert_eq!(view.records.len(), 10);
        assert!(view.has_more);
        assert!(!view.can_collapse);
        assert_eq!(view.records[0].year, "7000 BCE");

        let state = reduce(state, Action::ShowAll);
        let view = apply_filters(&state, catalog.records());
        assert_eq!(view.records.len(), catalog.len());
        assert!(!view.has_more);
        assert!(view.can_collapse);

        let years: Vec<ParsedYear> = view.records.iter().map(|e| e.sort_year()).collect();
        assert!(years.windows(2).all(|w| w[0].sort_cmp(&w[1]).is_le()));
    }

    #[test]
    fn test_apply_filters_combines_timeline_predicates() {
        let catalog = TimelineCatalog::with_defaults();
        let state: FilterState<TimelineCategory> = FilterState {
            era: Some(Era::NearFuture),
            ..FilterState::default()
        };
        let view = apply_filters(&state, catalog.records());
        assert!(view.total_matches >= 2);
        assert!(view.records.iter().all(|e| e.era() == Some(Era::NearFuture)));

        let state = reduce(state, Action::ToggleFuture);
        let view = apply_filters(&state, catalog.records());
        assert!(view.is_empty);
        assert!(view.is_no_match(&state));
    }

    #[test]
    fn test_empty_catalog_without_filters_is_not_no_match() {
        let catalog = RegulationCatalog::from_records(vec![]);
        let state: FilterState<RegulationCategory> = FilterState::default();
        let view = apply_filters(&state, catalog.records());
        assert!(view.is_empty);
        assert!(!view.is_no_match(&state));
    }

    #[test]
    fn test_apply_filters_view_is_paginated_matches() {
        let catalog = TimelineCatalog::with_defaults();
        let mut state: FilterState<TimelineCategory> = FilterState::default();
        for _ in 0..3 {
            let matched = matching_records(&state, catalog.records());
            let view = apply_filters(&state, catalog.records());
            let page = paginate(&matched, view.visible_count);
            assert_eq!(view.records.as_slice(), page.items);
            assert_eq!(view.has_more, page.has_more);
            state = reduce(state, Action::LoadMore);
        }
    }

    #[test]
    fn test_matching_records_agrees_with_named_filters() {
        let catalog = TimelineCatalog::with_defaults();
        for era in Era::ALL.iter().copied().map(Some).chain([None]) {
            for show_future in [true, false] {
                let state: FilterState<TimelineCategory> = FilterState {
                    era,
                    show_future,
                    ..FilterState::default()
                };
                let named = sort_chronologically(filter_future(
                    filter_by_era(catalog.records(), era),
                    show_future,
                ));
                assert_eq!(matching_records(&state, catalog.records()), named);
            }
        }

        let tools = ToolCatalog::with_defaults();
        for tier in PricingTier::ALL.iter().copied().map(Some).chain([None]) {
            let state: FilterState<ToolCategory> = FilterState {
                pricing: tier,
                min_rating: Some(4.5),
                ..FilterState::default()
            };
            let named = filter_by_rating(filter_by_pricing(tools.records(), tier), Some(4.5));
            assert_eq!(matching_records(&state, tools.records()), named);
        }
    }

    #[test]
    fn test_era_filter_ignores_forecast_years() {
        let events = vec![
            TimelineEvent::new("q", "2034", "q", "", TimelineCategory::Regulation, Impact::Medium)
                .with_confidence(&[(2036, 40), (2040, 70)]),
        ];
        assert_eq!(filter_by_era(&events, Some(Era::NearFuture)).len(), 1);
        assert!(filter_by_era(&events, Some(Era::MidFuture)).is_empty());
    }

    #[test]
    fn test_apply_filters_no_match_is_not_an_error() {
        let catalog = RegulationCatalog::with_defaults();
        let state: FilterState<RegulationCategory> = FilterState {
            query: "pharmacovigilance".to_string(),
            category: Some(RegulationCategory::Iso),
            ..FilterState::default()
        };
        let view = apply_filters(&state, catalog.records());
        assert!(view.is_empty);
        assert_eq!(view.visible_count, 0);
        assert!(!view.has_more);
    }

    #[test]
    fn test_apply_matches_individual_filters() {
        let catalog = ToolCatalog::with_defaults();
        let state: FilterState<ToolCategory> = FilterState {
            query: "ide".to_string(),
            category: Some(ToolCategory::CodeAssistant),
            min_rating: Some(4.3),
            ..FilterState::default()
        };
        let composed = filter_by_rating(
            filter_by_category(filter_by_search(catalog.records(), "ide"), Some(ToolCategory::CodeAssistant)),
            Some(4.3),
        );
        assert_eq!(matching_records(&state, catalog.records()), composed);
        assert_eq!(ids(&composed, |t| t.id.as_str()), vec!["github-copilot", "cursor"]);
    }

    #[test]
    fn test_regulation_status_is_not_a_filter() {
        let catalog = RegulationCatalog::from_records(vec![Regulation::new(
            "x",
            "X 1",
            "Draft thing",
            "",
            RegulationCategory::Guidance,
            RegulationStatus::Draft,
        )]);
        let view = apply_filters(&FilterState::default(), catalog.records());
        assert_eq!(view.total_matches, 1);
    }
}
