/// Full-allocation target in signed basis points (±10_000 = ±100%).
///
/// Allocation fractions stay integral on the decision surface; the host
/// converts to whatever its sizing layer wants.
pub const FULL_ALLOCATION_BPS: i32 = 10_000;

/// Entry direction for a boundary touch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    /// Target allocation for a full entry in this direction.
    pub fn full_allocation_bps(self) -> i32 {
        match self {
            Direction::Long => FULL_ALLOCATION_BPS,
            Direction::Short => -FULL_ALLOCATION_BPS,
        }
    }
}

/// Minimal bar payload for range detection and entry evaluation.
///
/// Prices are integer micros (1 unit = 1_000_000 micros). The host's data
/// layer normalises before bars reach the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Bar {
    /// Bar end time in epoch seconds (provided by the host's data adapter).
    pub end_ts: i64,
    pub high_micros: i64,
    pub low_micros: i64,
    pub close_micros: i64,
    /// If false, the bar period has not closed; the engine skips it.
    pub is_complete: bool,
}

impl Bar {
    pub fn new(
        end_ts: i64,
        high_micros: i64,
        low_micros: i64,
        close_micros: i64,
        is_complete: bool,
    ) -> Self {
        Self {
            end_ts,
            high_micros,
            low_micros,
            close_micros,
            is_complete,
        }
    }
}

/// The observed trading range when the window qualifies as consolidating.
///
/// By construction `low_micros` is the window's min low and `high_micros`
/// the window's max high, with `low_micros < high_micros`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ConsolidationZone {
    pub low_micros: i64,
    pub high_micros: i64,
}

impl ConsolidationZone {
    pub fn width_micros(&self) -> i64 {
        self.high_micros - self.low_micros
    }
}

/// Host-reported position, read-only to the engine.
/// Signed quantity: +long, -short, 0 = flat.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PositionSnapshot {
    pub qty: i64,
}

impl PositionSnapshot {
    pub const FLAT: PositionSnapshot = PositionSnapshot { qty: 0 };

    pub fn new(qty: i64) -> Self {
        Self { qty }
    }

    pub fn is_flat(&self) -> bool {
        self.qty == 0
    }

    pub fn direction(&self) -> Option<Direction> {
        match self.qty {
            q if q > 0 => Some(Direction::Long),
            q if q < 0 => Some(Direction::Short),
            _ => None,
        }
    }
}

/// Strategy parameters, immutable for the engine's lifetime.
///
/// Validation happens at config-load time (rdk-config); the engine assumes
/// every field is already in range.
#[derive(Clone, Debug, PartialEq)]
pub struct StrategyConfig {
    pub symbol: String,
    /// Window length for range detection, in bars (> 0).
    pub lookback: usize,
    /// Max relative range (high - low) / low that still counts as
    /// consolidation (> 0).
    pub range_threshold: f64,
    pub stop_loss_pct: f64,
    pub take_profit_pct: f64,
    /// How long before session close the host fires the flatten event.
    pub session_end_lead_secs: i64,
}

impl StrategyConfig {
    /// Reference defaults: 20-bar lookback, 2% range, 1% stop, 2% target,
    /// flatten 15 minutes before close.
    pub fn defaults<S: Into<String>>(symbol: S) -> Self {
        Self {
            symbol: symbol.into(),
            lookback: 20,
            range_threshold: 0.02,
            stop_loss_pct: 0.01,
            take_profit_pct: 0.02,
            session_end_lead_secs: 900,
        }
    }
}

/// Per-instrument mutable state, threaded explicitly through each call.
/// Fully rederivable from the next bar's window; nothing here survives a
/// restart on purpose.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrategyState {
    /// Most recently computed zone; replaced (not merged) every evaluated bar.
    pub zone: Option<ConsolidationZone>,
}

impl StrategyState {
    pub fn new() -> Self {
        Self { zone: None }
    }
}

impl Default for StrategyState {
    fn default() -> Self {
        Self::new()
    }
}

/// Inputs for one bar evaluation, all host-supplied.
#[derive(Clone, Debug)]
pub struct BarInput<'a> {
    /// Current bar; `None` when the feed produced nothing this period.
    pub bar: Option<Bar>,
    /// Most recent `lookback` bars ending at or before the current bar.
    /// Borrowed: the engine never caches or owns history.
    pub window: &'a [Bar],
    pub position: PositionSnapshot,
}

/// Order intents are proposals only; the host's execution layer turns them
/// into position changes. Closing orders (stop / limit exit) carry prices,
/// not quantities — the host sizes them to exactly flatten since the engine
/// never observes fills.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OrderIntent {
    SetAllocation { symbol: String, fraction_bps: i32 },
    PlaceStop { symbol: String, trigger_micros: i64 },
    PlaceLimitExit { symbol: String, limit_micros: i64 },
    LiquidateAll { symbol: String },
}

impl OrderIntent {
    pub fn symbol(&self) -> &str {
        match self {
            OrderIntent::SetAllocation { symbol, .. }
            | OrderIntent::PlaceStop { symbol, .. }
            | OrderIntent::PlaceLimitExit { symbol, .. }
            | OrderIntent::LiquidateAll { symbol } => symbol,
        }
    }
}

/// Why a bar evaluation produced (or withheld) intents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BarReason {
    /// Fresh boundary entry; allocation + bracket intents were emitted.
    Entered(Direction),
    /// Window range exceeded the threshold; no zone this bar.
    NoZone,
    /// Zone present but the close sits strictly inside it.
    InsideZone,
    /// Boundary touched but the reported position already points that way;
    /// re-issuing the bracket would stack duplicate exit orders host-side.
    AlreadyPositioned,
    /// Feed produced no bar this period; nothing evaluated, state untouched.
    MissingData,
    /// Empty window; nothing evaluated, state untouched.
    InsufficientHistory,
    /// Window min low <= 0 makes the relative range undefined; treated as
    /// not consolidating.
    DegenerateWindow,
    /// Current bar not closed; skipped like missing data (no lookahead).
    IncompleteBar,
}

/// Result of one bar evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BarOutcome {
    pub intents: Vec<OrderIntent>,
    pub reason: BarReason,
}

impl BarOutcome {
    /// No-action outcome for the given reason.
    pub fn hold(reason: BarReason) -> Self {
        Self {
            intents: Vec::new(),
            reason,
        }
    }
}

/// Stop/target pair for a bracket around one entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BracketPrices {
    pub stop_micros: i64,
    pub target_micros: i64,
}
