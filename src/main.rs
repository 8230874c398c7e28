// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{bail, Context, Result};
use medreg_catalog::export::{create_file, write_regulations, write_timeline, write_tools};
use medreg_catalog::logging::{init_logging, Verbosity};
use medreg_catalog::{
    apply_filters, matching_records, validate_catalogs, CatalogKind, Catalogs, Config,
    FilterState, Severity,
};
use std::env;
use std::path::Path;
use tracing::debug;

const USAGE: &str = "\
Usage: medreg [-q|-v|-vv] [COMMAND]

Commands:
  ui                              Interactive catalog browser (default)
  search <catalog> <query>        Print records matching <query>
  export <catalog> <path> [query] Write matching records to CSV
  validate                        Check catalog content

Catalogs: regulations, tools, timeline";

fn main() -> Result<()> {
    let mut verbosity = Verbosity::default();
    let mut args: Vec<String> = Vec::new();
    for arg in env::args().skip(1) {
        match Verbosity::from_flag(&arg) {
            Some(v) => verbosity = v,
            None => args.push(arg),
        }
    }
    init_logging(verbosity);

    let config = Config::load().context("Failed to load configuration")?;
    debug!(?config, "configuration loaded");

    match args.first().map(String::as_str) {
        None | Some("ui") => run_ui_mode(&config),
        Some("search") => {
            let (kind, query) = match (args.get(1), args.get(2)) {
                (Some(kind), Some(query)) => (kind.parse::<CatalogKind>()?, query.as_str()),
                _ => bail!("search needs a catalog and a query\n\n{}", USAGE),
            };
            run_search(&config, kind, query)
        }
        Some("export") => {
            let (kind, path) = match (args.get(1), args.get(2)) {
                (Some(kind), Some(path)) => (kind.parse::<CatalogKind>()?, Path::new(path)),
                _ => bail!("export needs a catalog and an output path\n\n{}", USAGE),
            };
            let query = args.get(3).map(String::as_str).unwrap_or("");
            run_export(&config, kind, path, query)
        }
        Some("validate") => run_validate(&config),
        Some("help") | Some("-h") | Some("--help") => {
            println!("{}", USAGE);
            Ok(())
        }
        Some(other) => bail!("unknown command '{}'\n\n{}", other, USAGE),
    }
}

fn load_catalogs(config: &Config) -> Result<Catalogs> {
    config
        .load_catalogs()
        .context("Failed to load catalogs")
}

/// Free-text search over one catalog, every match printed
fn run_search(config: &Config, kind: CatalogKind, query: &str) -> Result<()> {
    let catalogs = load_catalogs(config)?;

    println!("🔍 Searching {} for \"{}\"", kind.as_str(), query);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let matches = match kind {
        CatalogKind::Regulations => {
            let state = search_state(config, query);
            let view = apply_filters(&state, catalogs.regulations.records());
            for r in &view.records {
                println!("  {:<28} {:<8} {}", r.number, r.category.label(), r.title);
            }
            view.total_matches
        }
        CatalogKind::Tools => {
            let state = search_state(config, query);
            let view = apply_filters(&state, catalogs.tools.records());
            for t in &view.records {
                println!(
                    "  {:<24} {:<5} ★ {:.1}  {}",
                    t.name,
                    t.pricing.symbol(),
                    t.rating,
                    t.category.label()
                );
            }
            view.total_matches
        }
        CatalogKind::Timeline => {
            let state = search_state(config, query);
            let view = apply_filters(&state, catalogs.timeline.records());
            for e in &view.records {
                let marker = if e.is_future { "🔮" } else { "  " };
                println!("  {} {:<12} {}", marker, e.year, e.title);
            }
            view.total_matches
        }
    };

    if matches == 0 {
        println!("  No results.");
    }
    println!("\n✓ {} match(es)", matches);
    Ok(())
}

fn search_state<C>(config: &Config, query: &str) -> FilterState<C> {
    let mut state = FilterState::with_cursor(config.cursor().show_all());
    state.query = query.to_string();
    state
}

fn run_export(config: &Config, kind: CatalogKind, path: &Path, query: &str) -> Result<()> {
    let catalogs = load_catalogs(config)?;

    println!("📤 Exporting {} to {:?}", kind.as_str(), path);

    let file = create_file(path)?;
    let count = match kind {
        CatalogKind::Regulations => {
            let state = search_state(config, query);
            write_regulations(file, matching_records(&state, catalogs.regulations.records()))?
        }
        CatalogKind::Tools => {
            let state = search_state(config, query);
            write_tools(file, matching_records(&state, catalogs.tools.records()))?
        }
        CatalogKind::Timeline => {
            let state = search_state(config, query);
            write_timeline(file, matching_records(&state, catalogs.timeline.records()))?
        }
    };

    println!("✓ Wrote {} rows", count);
    Ok(())
}

fn run_validate(config: &Config) -> Result<()> {
    let catalogs = load_catalogs(config)?;

    println!("🔎 Validating catalogs");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let report = validate_catalogs(&catalogs);
    for issue in &report.issues {
        let icon = match issue.severity {
            Severity::Critical => "❌",
            Severity::Warning => "⚠️ ",
            Severity::Info => "ℹ️ ",
        };
        println!(
            "{} [{}] {} ({}): {}",
            icon, issue.catalog, issue.record_id, issue.field, issue.message
        );
    }

    println!("\n{}", report.summary());
    if report.has_critical_issues() {
        std::process::exit(1);
    }
    println!("✅ Catalogs OK");
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: &Config) -> Result<()> {
    println!("🖥️  Loading Medical Device Regulatory Catalog...\n");

    let catalogs = load_catalogs(config)?;
    let report = validate_catalogs(&catalogs);
    if config.catalog.strict {
        report
            .into_result()
            .context("Refusing to start with invalid catalogs (catalog.strict = true)")?;
    }

    println!(
        "✓ Loaded {} regulations, {} tools, {} timeline events",
        catalogs.regulations.len(),
        catalogs.tools.len(),
        catalogs.timeline.len()
    );
    println!("Starting UI... (Press 'q' to quit)\n");

    let mut app = ui::App::new(catalogs, config.cursor());
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: &Config) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use the web UI: cargo run --bin medreg-server --features server");
    std::process::exit(1);
}
