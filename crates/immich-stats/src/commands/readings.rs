//! Reading command handlers: one-shot refresh and periodic watch.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use tabled::Tabled;
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use immich_core::{Reading, ReadingRegistry, ReadingState, ServerConfig, TickSummary, spawn_poller};

use crate::cli::{GlobalOpts, WatchArgs};
use crate::error::CliError;
use crate::output;

// ── Views ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ReadingView {
    key: String,
    unique_id: String,
    name: String,
    value: Option<u64>,
    unit: &'static str,
    icon: &'static str,
    state: &'static str,
    updated_at: Option<DateTime<Utc>>,
}

impl From<&Arc<Reading>> for ReadingView {
    fn from(r: &Arc<Reading>) -> Self {
        Self {
            key: r.descriptor.key.clone(),
            unique_id: r.descriptor.unique_id(),
            name: r.descriptor.name.clone(),
            value: r.value(),
            unit: r.descriptor.unit,
            icon: r.descriptor.icon,
            state: r.state.label(),
            updated_at: r.updated_at,
        }
    }
}

#[derive(Tabled)]
struct ReadingRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Unit")]
    unit: &'static str,
    #[tabled(rename = "State")]
    state: &'static str,
}

impl From<&ReadingView> for ReadingRow {
    fn from(v: &ReadingView) -> Self {
        Self {
            key: v.key.clone(),
            name: v.name.clone(),
            value: v.value.map(|n| n.to_string()).unwrap_or_default(),
            unit: v.unit,
            state: v.state,
        }
    }
}

fn render(registry: &ReadingRegistry, global: &GlobalOpts) -> Result<String, CliError> {
    let views: Vec<ReadingView> = registry.snapshot().iter().map(ReadingView::from).collect();
    output::render_list(
        &global.output,
        &views,
        |v| ReadingRow::from(v),
        |v| {
            format!(
                "{}={}",
                v.key,
                v.value.map(|n| n.to_string()).unwrap_or_default()
            )
        },
    )
}

/// Returns `false` (and warns) when the poll task panicked or was aborted.
fn log_poller_exit(result: &Result<(), JoinError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "poll task ended abnormally");
            false
        }
    }
}

/// When nothing refreshed, surface the first failure as the command error.
fn tick_failure(registry: &ReadingRegistry, summary: &TickSummary, host: &str) -> Option<CliError> {
    if summary.fresh > 0 || summary.errored == 0 {
        return None;
    }
    registry.snapshot().iter().find_map(|r| match r.state {
        ReadingState::Errored(kind) => Some(CliError::from_reading_failure(kind, host)),
        _ => None,
    })
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn handle(server: &ServerConfig, global: &GlobalOpts) -> Result<(), CliError> {
    let client = Arc::new(server.connect()?);
    let registry = ReadingRegistry::discover(client).await;
    let summary = registry.refresh_all().await;

    if let Some(err) = tick_failure(&registry, &summary, server.credentials.host().as_str()) {
        return Err(err);
    }

    let out = render(&registry, global)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn watch(
    server: &ServerConfig,
    args: WatchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let client = Arc::new(server.connect()?);
    let registry = Arc::new(ReadingRegistry::discover(client).await);
    let period = args
        .interval
        .map_or(server.scan_interval, Duration::from_secs);
    let color = output::should_color(&global.color);

    let cancel = CancellationToken::new();
    let mut ticks = registry.subscribe_ticks();
    let mut poller = spawn_poller(Arc::clone(&registry), period, cancel.clone());

    if !global.quiet {
        eprintln!(
            "Watching {} readings every {}s (Ctrl-C to stop)",
            registry.len(),
            period.as_secs()
        );
    }

    let mut finished = None;
    loop {
        tokio::select! {
            biased;
            changed = ticks.changed() => {
                if changed.is_err() {
                    break;
                }
                let summary: TickSummary = registry.snapshot().iter().map(|r| r.state).collect();
                let time = Local::now().format("%H:%M:%S").to_string();
                output::print_output(&output::tick_line(&time, &summary, color), global.quiet);
                output::print_output(&render(&registry, global)?, global.quiet);
            }
            result = &mut poller => {
                finished = Some(result);
                break;
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    cancel.cancel();
    let result = match finished {
        Some(result) => result,
        None => poller.await,
    };
    log_poller_exit(&result);
    Ok(())
}
