use rdk_engine::*;

fn band_window() -> Vec<Bar> {
    (0..20)
        .map(|i| Bar::new(1000 + 60 * i, 101_000_000, 100_000_000, 100_500_000, true))
        .collect()
}

#[test]
fn scenario_entry_at_zone_ceiling_goes_short() {
    let cfg = StrategyConfig::defaults("SPY");
    let mut st = StrategyState::new();
    let window = band_window();

    // Close exactly on the zone ceiling (101.0).
    let input = BarInput {
        bar: Some(Bar::new(2200, 101_200_000, 100_600_000, 101_000_000, true)),
        window: &window,
        position: PositionSnapshot::FLAT,
    };
    let out = on_bar(&cfg, &mut st, &input);

    assert_eq!(out.reason, BarReason::Entered(Direction::Short));
    assert_eq!(
        out.intents,
        vec![
            OrderIntent::SetAllocation {
                symbol: "SPY".to_string(),
                fraction_bps: -10_000,
            },
            // Short bracket is inverted: stop above entry, target below.
            OrderIntent::PlaceStop {
                symbol: "SPY".to_string(),
                trigger_micros: 102_010_000,
            },
            OrderIntent::PlaceLimitExit {
                symbol: "SPY".to_string(),
                limit_micros: 98_980_000,
            },
        ]
    );
}

#[test]
fn scenario_short_bracket_straddles_entry_inverted() {
    let entry = 101_000_000;
    let b = bracket_prices(entry, Direction::Short, 0.01, 0.02);
    assert!(b.stop_micros > entry);
    assert!(b.target_micros < entry);

    let b = bracket_prices(entry, Direction::Long, 0.01, 0.02);
    assert!(b.stop_micros < entry);
    assert!(b.target_micros > entry);
}
