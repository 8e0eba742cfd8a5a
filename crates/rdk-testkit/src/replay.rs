use anyhow::{Context, Result};
use chrono::Utc;
use uuid::Uuid;

use rdk_engine::{BarReason, StrategyConfig};
use rdk_host::HostedStrategy;
use rdk_schemas::{CsvBarRow, IntentRecord, ReplayReport};

use crate::clock::FixedSessionClock;
use crate::feed::ScriptedFeed;
use crate::gateway::RecordingGateway;

/// Replay a CSV bar series through a hosted strategy and report every
/// emitted intent.
///
/// Decision-log replay only: allocations paper-fill immediately, stops and
/// limits are recorded but never filled, and no cash or fees exist. The
/// session-end flatten event fires after the final bar.
///
/// Rows that fail micro conversion or OHLC validation are skipped and
/// counted, mirroring a quality gate that rejects bad rows rather than
/// aborting the run.
pub fn run_replay(
    cfg: StrategyConfig,
    config_hash: &str,
    rows: &[CsvBarRow],
) -> Result<ReplayReport> {
    let symbol = cfg.symbol.clone();

    let mut bars = Vec::new();
    let mut bars_skipped = 0usize;
    for row in rows {
        match row.to_engine_bar() {
            Ok(b) => bars.push(b),
            Err(_) => bars_skipped += 1,
        }
    }
    let last_ts = bars.last().map(|b| b.end_ts).unwrap_or(0);
    let bar_count = bars.len();

    // Flatten trigger lands exactly on the last bar's timestamp.
    let clock = FixedSessionClock::new(last_ts + cfg.session_end_lead_secs, cfg.session_end_lead_secs);
    let feed = ScriptedFeed::from_bars(bars);
    let gateway = RecordingGateway::default();

    let mut hosted = HostedStrategy::new(cfg, Box::new(feed), Box::new(gateway), Box::new(clock));

    let mut intents: Vec<IntentRecord> = Vec::new();
    let mut bars_processed = 0usize;
    for _ in 0..bar_count {
        let outcome = hosted.poll_bar().context("replay bar evaluation failed")?;
        if !matches!(
            outcome.reason,
            BarReason::MissingData | BarReason::IncompleteBar
        ) {
            bars_processed += 1;
        }
        intents.extend(outcome.intents.iter().map(IntentRecord::from));
    }

    if let Some(flatten) = hosted
        .poll_session_end(last_ts)
        .context("replay session-end dispatch failed")?
    {
        intents.extend(flatten.iter().map(IntentRecord::from));
    }

    Ok(ReplayReport {
        run_id: Uuid::new_v4(),
        generated_at_utc: Utc::now(),
        config_hash: config_hash.to_string(),
        symbol,
        bars_processed,
        bars_skipped,
        intents,
    })
}
