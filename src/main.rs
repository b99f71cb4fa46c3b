//! Sentinel - headless dashboard runner
//!
//! Loads configuration, refreshes the dashboard once against the configured
//! backend and prints the KPI strip, the risk table and the active
//! scenario's watchlist. Falls back to built-in data when the backend is
//! unreachable.
//!
//! Usage: `sentinel-dash [scenario-id]`

use anyhow::Context;
use sentinel_dash::country::Country;
use sentinel_dash::dashboard::{format_strip, local_kpis, DashboardViewModel};
use sentinel_dash::scenario::{ScenarioHandle, ScenarioStore};
use sentinel_dash::settings::{AppConfig, Preferences};
use sentinel_dash::SentinelClient;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env();
    let prefs = Preferences::load();
    log::info!(
        "backend {} (timeout {}s), sidebar {}",
        config.api_url,
        config.request_timeout_secs,
        if prefs.sidebar_collapsed { "collapsed" } else { "expanded" }
    );
    if config.map_provider().is_builtin() {
        log::info!("no map token configured; using built-in vector map");
    }

    let scenario = ScenarioHandle::new(ScenarioStore::new());
    if let Some(id) = std::env::args().nth(1) {
        scenario
            .set_scenario(&id)
            .with_context(|| format!("selecting scenario '{}'", id))?;
    }

    let client = Arc::new(SentinelClient::from_config(&config).context("building HTTP client")?);
    match client.health_check().await {
        Ok(health) => log::info!("backend {} (ml ready: {}, version {})", health.status, health.ml, health.version),
        Err(e) => log::warn!("health check failed: {}", e),
    }

    let dashboard = DashboardViewModel::new(client);
    for handle in dashboard.refresh() {
        handle.await.context("dashboard load task failed")?;
    }

    let state = dashboard.dashboard.snapshot();
    if state.error {
        println!("! backend unreachable, showing fallback data");
    }
    println!("{}", format_strip(&state.data.strip));
    println!();
    print_table("Monitored countries", &state.data.countries);

    let activity = dashboard.recent_activity.snapshot();
    if let Some(issue) = activity.data.issue() {
        println!("{}", issue.message());
    }

    let effective = scenario.effective_scenario();
    let watchlist = effective.countries;
    println!();
    println!("Scenario: {} ({})", effective.name, effective.industry);
    println!("{}", format_strip(&local_kpis(&watchlist)));
    print_table("Watchlist", &watchlist);

    Ok(())
}

fn print_table(title: &str, countries: &[Country]) {
    println!("{}", title);
    println!("{:<4} {:<22} {:>5}  {:<9} {:<14} {:>7}", "CODE", "COUNTRY", "SCORE", "LEVEL", "TREND", "ANOMALY");
    for c in countries {
        println!(
            "{:<4} {:<22} {:>5.0}  {:<9} {:<14} {:>7}",
            c.code,
            c.name,
            c.risk_score,
            c.risk_level.label(),
            c.trend.label(),
            if c.anomaly.detected { c.anomaly.severity.label() } else { "-" },
        );
    }
}
