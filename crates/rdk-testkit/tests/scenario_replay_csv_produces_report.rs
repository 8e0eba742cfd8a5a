use std::io::Write;

use rdk_config::{load_layered_yaml_from_strings, strategy_config};
use rdk_schemas::IntentRecord;
use rdk_testkit::{load_bars_csv, load_bars_csv_str, run_replay};

/// 21 warm-up rows in the 100..101 band followed by a floor touch, with one
/// malformed row in the middle.
fn fixture_csv() -> String {
    let mut src = String::from("symbol,end_ts,open,high,low,close,volume,is_complete\n");
    for i in 0..21 {
        src.push_str(&format!(
            "SPY,{},100.50,101.00,100.00,100.50,1000000,true\n",
            1000 + i * 60
        ));
    }
    // Bad row: close outside [low, high]; the replay quality gate skips it.
    src.push_str("SPY,2320,100.50,101.00,100.00,105.00,1000000,true\n");
    // Floor touch: long entry.
    src.push_str("SPY,2380,100.40,100.60,100.00,100.00,1000000,true\n");
    src
}

#[test]
fn scenario_replay_csv_produces_report() {
    let loaded =
        load_layered_yaml_from_strings(&["strategy:\n  symbol: SPY\n"]).unwrap();
    let cfg = strategy_config(&loaded).unwrap();

    let rows = load_bars_csv_str(&fixture_csv()).unwrap();
    let report = run_replay(cfg, &loaded.config_hash, &rows).unwrap();

    assert_eq!(report.symbol, "SPY");
    assert_eq!(report.config_hash, loaded.config_hash);
    assert_eq!(report.bars_skipped, 1);
    assert_eq!(report.bars_processed, 22);

    // One long entry (allocation + bracket) plus the session-end flatten.
    assert_eq!(
        report.intents,
        vec![
            IntentRecord::SetAllocation {
                symbol: "SPY".to_string(),
                fraction_bps: 10_000,
            },
            IntentRecord::PlaceStop {
                symbol: "SPY".to_string(),
                trigger_micros: 99_000_000,
            },
            IntentRecord::PlaceLimitExit {
                symbol: "SPY".to_string(),
                limit_micros: 102_000_000,
            },
            IntentRecord::LiquidateAll {
                symbol: "SPY".to_string(),
            },
        ]
    );

    // The report serialises cleanly for artifact storage.
    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"kind\":\"liquidate_all\""));
}

#[test]
fn scenario_replay_reads_csv_from_disk() {
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(fixture_csv().as_bytes()).unwrap();

    let rows = load_bars_csv(tmp.path()).unwrap();
    assert_eq!(rows.len(), 23);
}
