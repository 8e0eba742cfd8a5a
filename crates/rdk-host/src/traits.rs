use std::fmt;

use rdk_engine::{Bar, PositionSnapshot};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors a [`MarketDataSource`] implementation may return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// Network or transport failure.
    Transport(String),
    /// A payload could not be decoded into a bar.
    Decode(String),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Transport(msg) => write!(f, "feed transport error: {msg}"),
            FeedError::Decode(msg) => write!(f, "feed decode error: {msg}"),
        }
    }
}

impl std::error::Error for FeedError {}

/// Errors an [`OrderGateway`] implementation may return.
///
/// A rejection is terminal for the call that produced it: the engine holds
/// no order state, does not retry, and simply re-evaluates from whatever
/// position the host reports on the next bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The host's execution layer refused the intent.
    Rejected { reason: String },
    /// Network or transport failure.
    Transport(String),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Rejected { reason } => write!(f, "order rejected: {reason}"),
            GatewayError::Transport(msg) => write!(f, "gateway transport error: {msg}"),
        }
    }
}

impl std::error::Error for GatewayError {}

// ---------------------------------------------------------------------------
// Boundary traits
// ---------------------------------------------------------------------------

/// Host-supplied market data: one bar per trading period plus the trailing
/// lookback window ending at or before that bar.
pub trait MarketDataSource {
    /// The bar for the current period, or `None` when the feed produced
    /// nothing this period (the engine skips it).
    fn next_bar(&mut self) -> Result<Option<Bar>, FeedError>;

    /// The most recent `lookback` bars. May be shorter (or empty) when
    /// history is still warming up.
    fn window(&mut self, lookback: usize) -> Result<Vec<Bar>, FeedError>;
}

/// The single seam every order intent passes through.
///
/// Closing orders (`place_stop` / `place_limit_exit`) take an explicit
/// signed quantity sized to exactly flatten; the host resolves it from the
/// reported position because the engine never observes fills.
pub trait OrderGateway {
    fn set_allocation(&mut self, symbol: &str, fraction_bps: i32) -> Result<(), GatewayError>;

    fn place_stop(&mut self, symbol: &str, qty: i64, trigger_micros: i64)
        -> Result<(), GatewayError>;

    fn place_limit_exit(
        &mut self,
        symbol: &str,
        qty: i64,
        limit_micros: i64,
    ) -> Result<(), GatewayError>;

    fn liquidate_all(&mut self, symbol: &str) -> Result<(), GatewayError>;

    /// The position the host currently reports for `symbol`.
    fn position(&self, symbol: &str) -> PositionSnapshot;
}

/// Once-per-session flatten trigger.
///
/// Returns `true` exactly once per session, at the configured lead time
/// before close; latching is the implementation's responsibility. The
/// engine has no scheduling knowledge of its own.
pub trait SessionClock {
    fn session_end_near(&mut self, now_ts: i64) -> bool;
}
