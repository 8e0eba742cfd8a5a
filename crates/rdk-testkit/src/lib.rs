//! rdk-testkit
//!
//! Deterministic doubles and the replay harness for the consolidation
//! engine. No randomness, no network I/O: a scripted feed, a recording
//! gateway with paper-style immediate allocation, and a latching session
//! clock. Scenario tests and the CLI replay command both build on this.

mod bars;
mod clock;
mod feed;
mod gateway;
mod replay;

pub use bars::{band_bars, load_bars_csv, load_bars_csv_str};
pub use clock::FixedSessionClock;
pub use feed::ScriptedFeed;
pub use gateway::{GatewayCall, RecordingGateway, SharedGateway};
pub use replay::run_replay;
