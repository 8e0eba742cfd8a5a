//! rdk-host
//!
//! Dependency-injection boundary between the pure decision engine and the
//! process that owns market data, order routing, and the session schedule.
//!
//! The engine implements no framework base type; it sees only three narrow
//! traits supplied at construction:
//! - [`MarketDataSource`] — current bar + lookback window
//! - [`OrderGateway`] — the single seam all order flow passes through
//! - [`SessionClock`] — the once-per-session flatten trigger
//!
//! [`HostedStrategy`] pumps engine outcomes into gateway calls and carries
//! the tracing surface; the engine crate itself stays silent.

mod hosted;
mod traits;

pub use hosted::{HostError, HostedStrategy};
pub use traits::{FeedError, GatewayError, MarketDataSource, OrderGateway, SessionClock};
