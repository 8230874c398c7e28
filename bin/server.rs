// Medical Device Regulatory Catalog - Web Server
// JSON API + static index page over the in-memory catalogs

use anyhow::{Context, Result};
use medreg_catalog::api::{router, AppState};
use medreg_catalog::logging::{init_logging, Verbosity};
use medreg_catalog::{validate_catalogs, Config};
use std::env;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let verbosity = env::args()
        .skip(1)
        .find_map(|arg| Verbosity::from_flag(&arg))
        .unwrap_or_default();
    init_logging(verbosity);

    println!("🌐 Medical Device Regulatory Catalog - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = Config::load().context("Failed to load configuration")?;
    let catalogs = config.load_catalogs().context("Failed to load catalogs")?;
    println!(
        "✓ Catalogs loaded: {} regulations, {} tools, {} timeline events",
        catalogs.regulations.len(),
        catalogs.tools.len(),
        catalogs.timeline.len()
    );

    // Validate before serving
    let report = validate_catalogs(&catalogs);
    if report.is_clean() {
        println!("✓ Catalogs validated");
    } else {
        println!("⚠️  {}", report.summary());
        if config.catalog.strict {
            report
                .into_result()
                .context("Refusing to start with invalid catalogs (catalog.strict = true)")?;
        } else if report.has_critical_issues() {
            warn!("serving catalogs with critical validation issues");
        }
    }

    let state = AppState::new(catalogs, config.cursor());
    let app = router(state);

    let addr = config.server.bind.as_str();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!(%addr, "listening");

    println!("\n🚀 Server running on http://{}", addr);
    println!("   API: http://{}/api/regulations", addr);
    println!("   UI:  http://{}", addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
