use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use medreg_catalog::{
    apply_filters, matching_records, reduce, Action, Catalogs, Era, FilterState, FilteredView,
    PageCursor, PricingTier, RegulationCategory, TimelineCategory, ToolCategory,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use std::io;

/// Minimum-rating steps offered by `r`; after the last one it wraps to "any"
const RATING_STEPS: [f64; 3] = [3.0, 4.0, 4.5];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Regulations,
    Tools,
    Timeline,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Regulations, Page::Tools, Page::Timeline];

    pub fn next(&self) -> Self {
        match self {
            Page::Regulations => Page::Tools,
            Page::Tools => Page::Timeline,
            Page::Timeline => Page::Regulations,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Regulations => Page::Timeline,
            Page::Tools => Page::Regulations,
            Page::Timeline => Page::Tools,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Regulations => "Regulations",
            Page::Tools => "AI Tools",
            Page::Timeline => "Timeline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

/// Page-independent filter commands; category changes go through cycle_category
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Query(String),
    Pricing(Option<PricingTier>),
    MinRating(Option<f64>),
    Era(Option<Era>),
    ToggleFuture,
    LoadMore,
    ShowAll,
    Collapse,
    Reset,
}

impl Command {
    fn into_action<C>(self) -> Action<C> {
        match self {
            Command::Query(q) => Action::SetQuery(q),
            Command::Pricing(p) => Action::SetPricing(p),
            Command::MinRating(r) => Action::SetMinRating(r),
            Command::Era(e) => Action::SetEra(e),
            Command::ToggleFuture => Action::ToggleFuture,
            Command::LoadMore => Action::LoadMore,
            Command::ShowAll => Action::ShowAll,
            Command::Collapse => Action::Collapse,
            Command::Reset => Action::Reset,
        }
    }

    fn is_pagination(&self) -> bool {
        matches!(self, Command::LoadMore | Command::ShowAll | Command::Collapse)
    }
}

fn step<C: Copy + PartialEq>(state: &mut FilterState<C>, action: Action<C>) {
    *state = reduce(std::mem::take(state), action);
}

/// None → first → … → last → None
fn cycle<T: Copy + PartialEq>(all: &[T], current: Option<T>) -> Option<T> {
    match current {
        None => all.first().copied(),
        Some(value) => all
            .iter()
            .position(|v| *v == value)
            .and_then(|i| all.get(i + 1))
            .copied(),
    }
}

/// One rendered table row, owned so the table can borrow TableState mutably
pub struct TableRow {
    pub cells: Vec<String>,
    pub future: bool,
}

/// Everything the content area needs for the current page
pub struct PageView {
    pub headers: &'static [&'static str],
    pub widths: Vec<Constraint>,
    pub rows: Vec<TableRow>,
    pub total_matches: usize,
    pub visible_count: usize,
    pub has_more: bool,
    pub can_collapse: bool,
    pub is_empty: bool,
    pub offer_reset: bool,
}

impl PageView {
    fn from_view<T, C, F>(
        view: FilteredView<'_, T>,
        state: &FilterState<C>,
        headers: &'static [&'static str],
        widths: Vec<Constraint>,
        row: F,
    ) -> Self
    where
        F: Fn(&T) -> TableRow,
    {
        PageView {
            headers,
            widths,
            rows: view.records.iter().map(|r| row(*r)).collect(),
            total_matches: view.total_matches,
            visible_count: view.visible_count,
            has_more: view.has_more,
            can_collapse: view.can_collapse,
            is_empty: view.is_empty,
            offer_reset: view.is_no_match(state),
        }
    }
}

pub struct App {
    pub catalogs: Catalogs,
    pub current_page: Page,
    pub regulations: FilterState<RegulationCategory>,
    pub tools: FilterState<ToolCategory>,
    pub timeline: FilterState<TimelineCategory>,
    pub state: TableState,
    pub show_detail: bool,
    pub input_mode: InputMode,
}

impl App {
    pub fn new(catalogs: Catalogs, cursor: PageCursor) -> Self {
        let mut app = Self {
            catalogs,
            current_page: Page::Regulations,
            regulations: FilterState::with_cursor(cursor),
            tools: FilterState::with_cursor(cursor),
            timeline: FilterState::with_cursor(cursor),
            state: TableState::default(),
            show_detail: false,
            input_mode: InputMode::Normal,
        };
        app.select_first();
        app
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
        self.select_first();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
        self.select_first();
    }

    pub fn query(&self) -> &str {
        match self.current_page {
            Page::Regulations => &self.regulations.query,
            Page::Tools => &self.tools.query,
            Page::Timeline => &self.timeline.query,
        }
    }

    fn send(&mut self, command: Command) {
        let pagination = command.is_pagination();
        match self.current_page {
            Page::Regulations => step(&mut self.regulations, command.into_action()),
            Page::Tools => step(&mut self.tools, command.into_action()),
            Page::Timeline => step(&mut self.timeline, command.into_action()),
        }
        if pagination {
            self.clamp_selection();
        } else {
            self.select_first();
        }
    }

    pub fn push_query_char(&mut self, c: char) {
        let mut query = self.query().to_string();
        query.push(c);
        self.send(Command::Query(query));
    }

    pub fn pop_query_char(&mut self) {
        let mut query = self.query().to_string();
        query.pop();
        self.send(Command::Query(query));
    }

    pub fn cycle_category(&mut self) {
        match self.current_page {
            Page::Regulations => {
                let next = cycle(&RegulationCategory::ALL, self.regulations.category);
                step(&mut self.regulations, Action::SetCategory(next));
            }
            Page::Tools => {
                let next = cycle(&ToolCategory::ALL, self.tools.category);
                step(&mut self.tools, Action::SetCategory(next));
            }
            Page::Timeline => {
                let next = cycle(&TimelineCategory::ALL, self.timeline.category);
                step(&mut self.timeline, Action::SetCategory(next));
            }
        }
        self.select_first();
    }

    pub fn cycle_pricing(&mut self) {
        if self.current_page == Page::Tools {
            let next = cycle(&PricingTier::ALL, self.tools.pricing);
            self.send(Command::Pricing(next));
        }
    }

    pub fn cycle_min_rating(&mut self) {
        if self.current_page == Page::Tools {
            let next = cycle(&RATING_STEPS, self.tools.min_rating);
            self.send(Command::MinRating(next));
        }
    }

    pub fn cycle_era(&mut self) {
        if self.current_page == Page::Timeline {
            self.send(Command::Era(Era::cycle(self.timeline.era)));
        }
    }

    pub fn toggle_future(&mut self) {
        if self.current_page == Page::Timeline {
            self.send(Command::ToggleFuture);
        }
    }

    pub fn load_more(&mut self) {
        self.send(Command::LoadMore);
    }

    pub fn show_all(&mut self) {
        self.send(Command::ShowAll);
    }

    pub fn collapse(&mut self) {
        self.send(Command::Collapse);
    }

    pub fn reset_filters(&mut self) {
        self.send(Command::Reset);
    }

    /// Number of matches per page, ignoring pagination (for the header tabs)
    pub fn match_count(&self, page: Page) -> usize {
        match page {
            Page::Regulations => {
                matching_records(&self.regulations, self.catalogs.regulations.records()).len()
            }
            Page::Tools => matching_records(&self.tools, self.catalogs.tools.records()).len(),
            Page::Timeline => {
                matching_records(&self.timeline, self.catalogs.timeline.records()).len()
            }
        }
    }

    pub fn page_view(&self) -> PageView {
        match self.current_page {
            Page::Regulations => PageView::from_view(
                apply_filters(&self.regulations, self.catalogs.regulations.records()),
                &self.regulations,
                &["Number", "Category", "Status", "Title"],
                vec![
                    Constraint::Length(30),
                    Constraint::Length(10),
                    Constraint::Length(12),
                    Constraint::Min(20),
                ],
                |r| TableRow {
                    cells: vec![
                        r.number.clone(),
                        r.category.label().to_string(),
                        r.status.as_str().to_string(),
                        r.title.clone(),
                    ],
                    future: false,
                },
            ),
            Page::Tools => PageView::from_view(
                apply_filters(&self.tools, self.catalogs.tools.records()),
                &self.tools,
                &["Name", "Category", "Pricing", "Rating", "Reviews"],
                vec![
                    Constraint::Length(24),
                    Constraint::Length(26),
                    Constraint::Length(8),
                    Constraint::Length(8),
                    Constraint::Length(8),
                ],
                |t| TableRow {
                    cells: vec![
                        t.name.clone(),
                        t.category.label().to_string(),
                        t.pricing.symbol().to_string(),
                        format!("★ {:.1}", t.rating),
                        t.review_count.to_string(),
                    ],
                    future: false,
                },
            ),
            Page::Timeline => PageView::from_view(
                apply_filters(&self.timeline, self.catalogs.timeline.records()),
                &self.timeline,
                &["Year", "Era", "Category", "Impact", "Event"],
                vec![
                    Constraint::Length(12),
                    Constraint::Length(12),
                    Constraint::Length(12),
                    Constraint::Length(8),
                    Constraint::Min(20),
                ],
                |e| TableRow {
                    cells: vec![
                        e.year.clone(),
                        e.era().map(|era| era.label()).unwrap_or("-").to_string(),
                        e.category.label().to_string(),
                        e.impact.as_str().to_string(),
                        e.title.clone(),
                    ],
                    future: e.is_future,
                },
            ),
        }
    }

    /// Label/value pairs for the selected record's detail panel
    pub fn selected_detail(&self) -> Option<(String, Vec<(&'static str, String)>)> {
        let index = self.state.selected()?;
        match self.current_page {
            Page::Regulations => {
                let view = apply_filters(&self.regulations, self.catalogs.regulations.records());
                let r = view.records.get(index)?;
                Some((
                    r.number.clone(),
                    vec![
                        ("Title", r.title.clone()),
                        ("Category", r.category.label().to_string()),
                        ("Status", r.status.as_str().to_string()),
                        ("Description", r.description.clone()),
                    ],
                ))
            }
            Page::Tools => {
                let view = apply_filters(&self.tools, self.catalogs.tools.records());
                let t = view.records.get(index)?;
                Some((
                    t.name.clone(),
                    vec![
                        ("Category", t.category.label().to_string()),
                        ("Pricing", t.pricing.symbol().to_string()),
                        ("Rating", format!("{:.1} ({} reviews)", t.rating, t.review_count)),
                        ("Use cases", t.use_cases.join(", ")),
                        ("Tags", t.tags.join(", ")),
                        ("URL", t.url.clone().unwrap_or_default()),
                        ("Description", t.description.clone()),
                    ],
                ))
            }
            Page::Timeline => {
                let view = apply_filters(&self.timeline, self.catalogs.timeline.records());
                let e = view.records.get(index)?;
                let mut fields = vec![
                    ("Title", e.title.clone()),
                    ("Era", e.era().map(|era| era.label()).unwrap_or("Unknown").to_string()),
                    ("Category", e.category.label().to_string()),
                    ("Impact", e.impact.as_str().to_string()),
                ];
                if let Some(levels) = &e.confidence_levels {
                    let forecast = levels
                        .iter()
                        .map(|l| format!("{}: {}%", l.year, l.confidence))
                        .collect::<Vec<_>>()
                        .join(", ");
                    fields.push(("Forecast", forecast));
                }
                fields.push(("Description", e.description.clone()));
                Some((e.year.clone(), fields))
            }
        }
    }

    fn visible_len(&self) -> usize {
        self.page_view().rows.len()
    }

    fn select_first(&mut self) {
        let selected = if self.visible_len() == 0 { None } else { Some(0) };
        self.state.select(selected);
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_len();
        let selected = match self.state.selected() {
            _ if len == 0 => None,
            Some(i) if i >= len => Some(len - 1),
            Some(i) => Some(i),
            None => Some(0),
        };
        self.state.select(selected);
    }

    pub fn next(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    /// Returns true when the app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.input_mode == InputMode::Search {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => self.input_mode = InputMode::Normal,
                KeyCode::Backspace => self.pop_query_char(),
                KeyCode::Char(c) => self.push_query_char(c),
                _ => {}
            }
            return false;
        }

        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Esc if self.show_detail => self.show_detail = false,
            KeyCode::Esc => return true,
            KeyCode::Enter => self.toggle_detail(),
            KeyCode::Tab => self.next_page(),
            KeyCode::BackTab => self.previous_page(),
            KeyCode::Char('/') => self.input_mode = InputMode::Search,
            KeyCode::Char('c') => self.cycle_category(),
            KeyCode::Char('p') => self.cycle_pricing(),
            KeyCode::Char('r') => self.cycle_min_rating(),
            KeyCode::Char('e') => self.cycle_era(),
            KeyCode::Char('f') => self.toggle_future(),
            KeyCode::Char('m') => self.load_more(),
            KeyCode::Char('a') => self.show_all(),
            KeyCode::Char('l') => self.collapse(),
            KeyCode::Char('x') => self.reset_filters(),
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::Home => self.select_first(),
            KeyCode::End => {
                let len = self.visible_len();
                if len > 0 {
                    self.state.select(Some(len - 1));
                }
            }
            _ => {}
        }
        false
    }

    /// Active predicates of the current page, for the status bar
    pub fn filter_summary(&self) -> Vec<String> {
        let mut parts = Vec::new();
        let (query, category) = match self.current_page {
            Page::Regulations => (
                &self.regulations.query,
                self.regulations.category.map(|c| c.label()),
            ),
            Page::Tools => (&self.tools.query, self.tools.category.map(|c| c.label())),
            Page::Timeline => (&self.timeline.query, self.timeline.category.map(|c| c.label())),
        };
        if !query.is_empty() {
            parts.push(format!("\"{}\"", query));
        }
        parts.push(category.unwrap_or("All Categories").to_string());

        match self.current_page {
            Page::Tools => {
                if let Some(tier) = self.tools.pricing {
                    parts.push(tier.symbol().to_string());
                }
                if let Some(min) = self.tools.min_rating {
                    parts.push(format!("★ ≥ {:.1}", min));
                }
            }
            Page::Timeline => {
                parts.push(
                    self.timeline
                        .era
                        .map(|e| e.label())
                        .unwrap_or("All Eras")
                        .to_string(),
                );
                if !self.timeline.show_future {
                    parts.push("past only".to_string());
                }
            }
            Page::Regulations => {}
        }
        parts
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            // Windows reports both press and release
            if key.kind == KeyEventKind::Press && app.handle_key(key) {
                return Ok(());
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    let view = app.page_view();
    if view.is_empty {
        render_no_results(f, chunks[1], &view);
    } else if app.show_detail {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[1]);

        render_table(f, content_chunks[0], app, view);
        render_detail_panel(f, content_chunks[1], app);
    } else {
        render_table(f, chunks[1], app, view);
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![Span::styled(
        "🩺 MedReg  ",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];

    for (i, page) in Page::ALL.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(
            format!("{} ({})", page.title(), app.match_count(*page)),
            style,
        ));
    }

    let header = Paragraph::new(vec![Line::from(tab_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App, view: PageView) {
    let header_cells = view.headers.iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = view.rows.into_iter().map(|row| {
        let style = if row.future {
            Style::default().fg(Color::Magenta)
        } else {
            Style::default()
        };
        Row::new(row.cells.into_iter().map(|c| Cell::from(truncate(&c, 60)))).style(style)
    });

    let title = format!(
        " {} - showing {} of {} ",
        app.current_page.title(),
        view.visible_count,
        view.total_matches
    );

    let table = Table::new(rows, view.widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(title),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_no_results(f: &mut Frame, area: Rect, view: &PageView) {
    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  No results",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if view.offer_reset {
        content.push(Line::from(vec![
            Span::raw("  Nothing matches the current filters. Press "),
            Span::styled("x", Style::default().fg(Color::Yellow)),
            Span::raw(" to reset them."),
        ]));
    } else {
        content.push(Line::from("  This catalog is empty."));
    }

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );
    f.render_widget(paragraph, area);
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Details ");

    let (heading, fields) = match app.selected_detail() {
        Some(detail) => detail,
        None => {
            f.render_widget(Paragraph::new("Nothing selected").block(block), area);
            return;
        }
    };

    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", heading),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )),
        Line::from(""),
    ];
    for (name, value) in fields {
        if value.is_empty() {
            continue;
        }
        content.push(Line::from(vec![
            Span::styled(format!("  {}: ", name), label),
            Span::raw(value),
        ]));
        content.push(Line::from(""));
    }
    content.push(Line::from(Span::styled(
        "  Press Enter to close",
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
    )));

    let detail_panel = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(detail_panel, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let key = Style::default().fg(Color::Yellow);
    let mut spans = Vec::new();

    if app.input_mode == InputMode::Search {
        spans.push(Span::styled("Search: ", Style::default().fg(Color::Cyan)));
        spans.push(Span::raw(format!("{}▌", app.query())));
        spans.push(Span::raw("  "));
        spans.push(Span::styled("Enter", key));
        spans.push(Span::raw(" Done"));
    } else {
        spans.push(Span::styled(
            format!("[{}] ", app.filter_summary().join(" · ")),
            Style::default().fg(Color::Cyan),
        ));

        let view = app.page_view();
        if view.has_more {
            spans.push(Span::styled("m", key));
            spans.push(Span::raw(" More | "));
            spans.push(Span::styled("a", key));
            spans.push(Span::raw(" All | "));
        }
        if view.can_collapse {
            spans.push(Span::styled("l", key));
            spans.push(Span::raw(" Less | "));
        }

        spans.push(Span::styled("/", key));
        spans.push(Span::raw(" Search | "));
        spans.push(Span::styled("c", key));
        spans.push(Span::raw(" Category | "));
        match app.current_page {
            Page::Tools => {
                spans.push(Span::styled("p", key));
                spans.push(Span::raw(" Pricing | "));
                spans.push(Span::styled("r", key));
                spans.push(Span::raw(" Rating | "));
            }
            Page::Timeline => {
                spans.push(Span::styled("e", key));
                spans.push(Span::raw(" Era | "));
                spans.push(Span::styled("f", key));
                spans.push(Span::raw(" Future | "));
            }
            Page::Regulations => {}
        }
        spans.push(Span::styled("x", key));
        spans.push(Span::raw(" Reset | "));
        spans.push(Span::styled("Tab", key));
        spans.push(Span::raw(" Page | "));
        spans.push(Span::styled("q", Style::default().fg(Color::Red)));
        spans.push(Span::raw(" Quit"));
    }

    let status_bar = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
