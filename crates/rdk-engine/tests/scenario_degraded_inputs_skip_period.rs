//! Degraded-input handling: every guard degrades to "no action this
//! period" — no intents, no panic, and (for missing/incomplete/empty
//! inputs) no state change.

use rdk_engine::*;

fn band_window() -> Vec<Bar> {
    (0..20)
        .map(|i| Bar::new(1000 + 60 * i, 101_000_000, 100_000_000, 100_500_000, true))
        .collect()
}

fn zone_from(window: &[Bar], cfg: &StrategyConfig, st: &mut StrategyState) {
    let out = on_bar(
        cfg,
        st,
        &BarInput {
            bar: Some(Bar::new(2200, 100_800_000, 100_200_000, 100_500_000, true)),
            window,
            position: PositionSnapshot::FLAT,
        },
    );
    assert_eq!(out.reason, BarReason::InsideZone);
}

#[test]
fn scenario_missing_bar_skips_and_preserves_state() {
    let cfg = StrategyConfig::defaults("SPY");
    let mut st = StrategyState::new();
    let window = band_window();
    zone_from(&window, &cfg, &mut st);
    let zone_before = st.zone;

    let out = on_bar(
        &cfg,
        &mut st,
        &BarInput {
            bar: None,
            window: &window,
            position: PositionSnapshot::FLAT,
        },
    );
    assert_eq!(out.reason, BarReason::MissingData);
    assert!(out.intents.is_empty());
    assert_eq!(st.zone, zone_before);
}

#[test]
fn scenario_incomplete_bar_skips_and_preserves_state() {
    let cfg = StrategyConfig::defaults("SPY");
    let mut st = StrategyState::new();
    let window = band_window();
    zone_from(&window, &cfg, &mut st);
    let zone_before = st.zone;

    let out = on_bar(
        &cfg,
        &mut st,
        &BarInput {
            bar: Some(Bar::new(2260, 100_400_000, 99_900_000, 100_000_000, false)),
            window: &window,
            position: PositionSnapshot::FLAT,
        },
    );
    assert_eq!(out.reason, BarReason::IncompleteBar);
    assert!(out.intents.is_empty());
    assert_eq!(st.zone, zone_before);
}

#[test]
fn scenario_empty_window_skips_and_preserves_state() {
    let cfg = StrategyConfig::defaults("SPY");
    let mut st = StrategyState::new();
    let window = band_window();
    zone_from(&window, &cfg, &mut st);
    let zone_before = st.zone;

    let out = on_bar(
        &cfg,
        &mut st,
        &BarInput {
            bar: Some(Bar::new(2260, 100_400_000, 99_900_000, 100_000_000, true)),
            window: &[],
            position: PositionSnapshot::FLAT,
        },
    );
    assert_eq!(out.reason, BarReason::InsufficientHistory);
    assert!(out.intents.is_empty());
    assert_eq!(st.zone, zone_before);
}

#[test]
fn scenario_zero_low_window_is_degenerate_not_fatal() {
    let cfg = StrategyConfig::defaults("SPY");
    let mut st = StrategyState::new();

    let window = vec![Bar::new(1000, 1_000_000, 0, 500_000, true)];
    let out = on_bar(
        &cfg,
        &mut st,
        &BarInput {
            bar: Some(Bar::new(1060, 600_000, 400_000, 500_000, true)),
            window: &window,
            position: PositionSnapshot::FLAT,
        },
    );

    // The relative-range division is undefined; treated as not
    // consolidating, and the degenerate window clears any prior zone.
    assert_eq!(out.reason, BarReason::DegenerateWindow);
    assert!(out.intents.is_empty());
    assert_eq!(st.zone, None);
}
