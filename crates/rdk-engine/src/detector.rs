use crate::types::{Bar, ConsolidationZone};

/// Window extremes as `(min low, max high)`. `None` for an empty window.
pub fn window_extremes(window: &[Bar]) -> Option<(i64, i64)> {
    let low = window.iter().map(|b| b.low_micros).min()?;
    let high = window.iter().map(|b| b.high_micros).max()?;
    Some((low, high))
}

/// Classified detector result: one window scan yields both the zone and,
/// when there is none, the reason.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum RangeScan {
    Zone(ConsolidationZone),
    /// `min(low) <= 0`: the relative range is undefined.
    Degenerate,
    /// Range too wide for the threshold, or zero-width (no boundary to trade).
    NotConsolidating,
    Empty,
}

/// Range detection over a lookback window.
///
/// Computes `rel_range = (max(high) - min(low)) / min(low)` and yields the
/// zone iff `rel_range <= range_threshold`. Idempotent: the zone carries no
/// memory of prior bars.
pub(crate) fn scan_range(window: &[Bar], range_threshold: f64) -> RangeScan {
    let (low, high) = match window_extremes(window) {
        Some(extremes) => extremes,
        None => return RangeScan::Empty,
    };
    if low <= 0 {
        return RangeScan::Degenerate;
    }
    if high <= low {
        return RangeScan::NotConsolidating;
    }

    let rel_range = (high - low) as f64 / low as f64;
    if rel_range <= range_threshold {
        RangeScan::Zone(ConsolidationZone {
            low_micros: low,
            high_micros: high,
        })
    } else {
        RangeScan::NotConsolidating
    }
}

/// The zone alone, for callers that do not care why there is none.
pub fn detect_zone(window: &[Bar], range_threshold: f64) -> Option<ConsolidationZone> {
    match scan_range(window, range_threshold) {
        RangeScan::Zone(z) => Some(z),
        _ => None,
    }
}
