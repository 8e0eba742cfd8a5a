use rdk_engine::{OrderIntent, StrategyConfig};
use rdk_host::HostedStrategy;
use rdk_testkit::{FixedSessionClock, GatewayCall, RecordingGateway, ScriptedFeed};

fn hosted_with(
    qty: i64,
    close_ts: i64,
    lead: i64,
) -> (HostedStrategy, rdk_testkit::SharedGateway) {
    let cfg = StrategyConfig::defaults("SPY");
    let feed = ScriptedFeed::new(Vec::new());
    let gateway = RecordingGateway::new(100).with_position(qty).into_shared();
    let handle = gateway.clone();
    let clock = FixedSessionClock::new(close_ts, lead);
    (
        HostedStrategy::new(cfg, Box::new(feed), Box::new(gateway), Box::new(clock)),
        handle,
    )
}

#[test]
fn scenario_session_end_flattens_long_short_and_flat() {
    for qty in [100i64, -100, 0] {
        let (mut hosted, handle) = hosted_with(qty, 1000, 100);

        // Before the lead window: nothing.
        assert!(hosted.poll_session_end(899).unwrap().is_none());
        assert_eq!(handle.borrow().call_count(), 0);

        // At the lead boundary: exactly one liquidate, whatever was held.
        let intents = hosted.poll_session_end(900).unwrap().unwrap();
        assert_eq!(
            intents,
            vec![OrderIntent::LiquidateAll {
                symbol: "SPY".to_string(),
            }]
        );
        assert_eq!(
            handle.borrow().calls(),
            &[GatewayCall::LiquidateAll {
                symbol: "SPY".to_string(),
            }]
        );
        assert_eq!(handle.borrow().held_qty(), 0);
    }
}

#[test]
fn scenario_session_end_latches_per_session() {
    let (mut hosted, handle) = hosted_with(100, 1000, 100);

    assert!(hosted.poll_session_end(950).unwrap().is_some());
    // Later polls in the same session do not re-fire.
    assert!(hosted.poll_session_end(990).unwrap().is_none());
    assert!(hosted.poll_session_end(2000).unwrap().is_none());
    assert_eq!(handle.borrow().call_count(), 1);
}
