use crate::bracket::bracket_prices;
use crate::detector::{scan_range, RangeScan};
use crate::signal::entry_side;
use crate::types::{
    BarInput, BarOutcome, BarReason, OrderIntent, StrategyConfig, StrategyState,
};

/// Evaluate one bar.
///
/// Sequence:
/// 1. Guards: missing bar, incomplete bar, empty window. Each skips the
///    period entirely — no intents, no state change.
/// 2. Range detection replaces `state.zone` (never merges).
/// 3. Entry evaluation against the fresh zone and the reported position.
/// 4. On a fresh boundary entry: allocation intent followed by the bracket
///    (stop, then limit exit).
///
/// The engine never observes fills; a position closed host-side simply shows
/// up flat in the next bar's snapshot and re-arms entry.
pub fn on_bar(cfg: &StrategyConfig, state: &mut StrategyState, input: &BarInput) -> BarOutcome {
    // 1) Guards before any state change.
    let bar = match input.bar {
        Some(b) => b,
        None => return BarOutcome::hold(BarReason::MissingData),
    };
    if !bar.is_complete {
        return BarOutcome::hold(BarReason::IncompleteBar);
    }
    if input.window.is_empty() {
        return BarOutcome::hold(BarReason::InsufficientHistory);
    }

    // 2) Recompute the zone from scratch; full replacement every bar. One
    //    window scan yields both the zone and the no-zone reason.
    let zone = match scan_range(input.window, cfg.range_threshold) {
        RangeScan::Zone(z) => {
            state.zone = Some(z);
            z
        }
        RangeScan::Degenerate => {
            state.zone = None;
            return BarOutcome::hold(BarReason::DegenerateWindow);
        }
        RangeScan::NotConsolidating => {
            state.zone = None;
            return BarOutcome::hold(BarReason::NoZone);
        }
        // Unreachable past the empty-window guard; skip like the guard does.
        RangeScan::Empty => return BarOutcome::hold(BarReason::InsufficientHistory),
    };

    // 3) Boundary check at the bar close.
    let side = match entry_side(bar.close_micros, &zone) {
        Some(side) => side,
        None => return BarOutcome::hold(BarReason::InsideZone),
    };

    // Re-entry guard: while the reported position already points the
    // signalled way, emitting again would stack duplicate exit orders at
    // the host. A flat (or opposite) snapshot re-arms entry.
    if input.position.direction() == Some(side) {
        return BarOutcome::hold(BarReason::AlreadyPositioned);
    }

    // 4) Fresh entry: full allocation plus the bracket.
    let brackets = bracket_prices(
        bar.close_micros,
        side,
        cfg.stop_loss_pct,
        cfg.take_profit_pct,
    );

    BarOutcome {
        intents: vec![
            OrderIntent::SetAllocation {
                symbol: cfg.symbol.clone(),
                fraction_bps: side.full_allocation_bps(),
            },
            OrderIntent::PlaceStop {
                symbol: cfg.symbol.clone(),
                trigger_micros: brackets.stop_micros,
            },
            OrderIntent::PlaceLimitExit {
                symbol: cfg.symbol.clone(),
                limit_micros: brackets.target_micros,
            },
        ],
        reason: BarReason::Entered(side),
    }
}

/// Session-end flattener.
///
/// Fired by the host scheduler at the configured lead time before close.
/// Always exactly one liquidate intent, regardless of zone or position —
/// no position survives into the next session. Does not touch the zone;
/// its lifecycle is entirely bar-driven.
pub fn on_session_end_near(cfg: &StrategyConfig) -> Vec<OrderIntent> {
    vec![OrderIntent::LiquidateAll {
        symbol: cfg.symbol.clone(),
    }]
}
