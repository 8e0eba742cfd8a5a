//! rdk-engine
//!
//! Consolidation-range decision core for a single instrument.
//!
//! Architectural decisions:
//! - The zone is recomputed from scratch every bar (replace, never merge)
//! - Entry fires only at the zone boundary; inside the zone means no action
//! - Brackets are derived once per fresh entry, never re-issued while the
//!   reported position already points the signalled way
//! - Session-end flattening is unconditional and independent of zone state
//!
//! Pure deterministic logic. No IO, no wall-clock, no randomness. The host
//! supplies bars, the window, and the current position snapshot.

mod bracket;
mod detector;
mod engine;
mod signal;
mod types;

pub use bracket::bracket_prices;
pub use detector::detect_zone;
pub use engine::{on_bar, on_session_end_near};
pub use signal::entry_side;
pub use types::*;
