use std::fmt;

use tracing::{debug, info, warn};

use rdk_engine::{
    on_bar, on_session_end_near, BarInput, BarOutcome, BarReason, OrderIntent, StrategyConfig,
    StrategyState,
};

use crate::traits::{FeedError, GatewayError, MarketDataSource, OrderGateway, SessionClock};

/// Errors surfaced by the host pump. Engine state is never mutated by a
/// failed dispatch; the next bar re-evaluates from the reported position.
#[derive(Debug)]
pub enum HostError {
    Feed(FeedError),
    Gateway(GatewayError),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::Feed(e) => write!(f, "{e}"),
            HostError::Gateway(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for HostError {}

impl From<FeedError> for HostError {
    fn from(e: FeedError) -> Self {
        HostError::Feed(e)
    }
}

impl From<GatewayError> for HostError {
    fn from(e: GatewayError) -> Self {
        HostError::Gateway(e)
    }
}

/// One strategy wired to its collaborators.
///
/// Owns the engine state; both entry points are synchronous and run to
/// completion. The host guarantees serial delivery, so no locking here.
pub struct HostedStrategy {
    cfg: StrategyConfig,
    state: StrategyState,
    feed: Box<dyn MarketDataSource>,
    gateway: Box<dyn OrderGateway>,
    clock: Box<dyn SessionClock>,
}

impl HostedStrategy {
    pub fn new(
        cfg: StrategyConfig,
        feed: Box<dyn MarketDataSource>,
        gateway: Box<dyn OrderGateway>,
        clock: Box<dyn SessionClock>,
    ) -> Self {
        Self {
            cfg,
            state: StrategyState::new(),
            feed,
            gateway,
            clock,
        }
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.cfg
    }

    pub fn state(&self) -> &StrategyState {
        &self.state
    }

    pub fn gateway(&self) -> &dyn OrderGateway {
        self.gateway.as_ref()
    }

    /// Evaluate one trading period: pull the bar + window, run the engine,
    /// dispatch whatever it proposed.
    pub fn poll_bar(&mut self) -> Result<BarOutcome, HostError> {
        let bar = self.feed.next_bar()?;
        let window = self.feed.window(self.cfg.lookback)?;
        let position = self.gateway.position(&self.cfg.symbol);

        let input = BarInput {
            bar,
            window: &window,
            position,
        };
        let outcome = on_bar(&self.cfg, &mut self.state, &input);

        debug!(
            symbol = %self.cfg.symbol,
            reason = ?outcome.reason,
            zone = ?self.state.zone,
            intents = outcome.intents.len(),
            "bar evaluated"
        );
        if let BarReason::Entered(side) = outcome.reason {
            info!(symbol = %self.cfg.symbol, side = ?side, "boundary entry");
        }

        self.dispatch(&outcome.intents)?;
        Ok(outcome)
    }

    /// Fire the session-end flattener if the clock says the lead window has
    /// been reached. Returns the dispatched intents, `None` when the clock
    /// did not fire.
    pub fn poll_session_end(&mut self, now_ts: i64) -> Result<Option<Vec<OrderIntent>>, HostError> {
        if !self.clock.session_end_near(now_ts) {
            return Ok(None);
        }

        let intents = on_session_end_near(&self.cfg);
        info!(symbol = %self.cfg.symbol, "session end near; flattening");
        self.dispatch(&intents)?;
        Ok(Some(intents))
    }

    fn dispatch(&mut self, intents: &[OrderIntent]) -> Result<(), GatewayError> {
        for intent in intents {
            let res = match intent {
                OrderIntent::SetAllocation {
                    symbol,
                    fraction_bps,
                } => self.gateway.set_allocation(symbol, *fraction_bps),
                OrderIntent::PlaceStop {
                    symbol,
                    trigger_micros,
                } => {
                    // Closing order: mirror the post-allocation position
                    // with opposite sign so the fill exactly flattens.
                    let qty = -self.gateway.position(symbol).qty;
                    self.gateway.place_stop(symbol, qty, *trigger_micros)
                }
                OrderIntent::PlaceLimitExit {
                    symbol,
                    limit_micros,
                } => {
                    let qty = -self.gateway.position(symbol).qty;
                    self.gateway.place_limit_exit(symbol, qty, *limit_micros)
                }
                OrderIntent::LiquidateAll { symbol } => self.gateway.liquidate_all(symbol),
            };

            if let Err(e) = res {
                warn!(symbol = %self.cfg.symbol, intent = ?intent, error = %e, "gateway rejected intent");
                return Err(e);
            }
        }
        Ok(())
    }
}
