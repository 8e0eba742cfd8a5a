use std::cell::RefCell;
use std::rc::Rc;

use rdk_engine::{PositionSnapshot, FULL_ALLOCATION_BPS};
use rdk_host::{GatewayError, OrderGateway};

/// One recorded gateway call, in dispatch order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GatewayCall {
    SetAllocation { symbol: String, fraction_bps: i32 },
    PlaceStop { symbol: String, qty: i64, trigger_micros: i64 },
    PlaceLimitExit { symbol: String, qty: i64, limit_micros: i64 },
    LiquidateAll { symbol: String },
}

/// Recording gateway with paper-style allocation semantics.
///
/// `set_allocation` applies immediately (the position jumps to the target,
/// like a fill-at-close paper broker), so the host's post-allocation
/// position read sees what the original read from its portfolio. Stops and
/// limit exits are recorded but never filled — fill simulation is the
/// host's business, not this double's.
pub struct RecordingGateway {
    /// Shares held at full allocation (±10_000 bps).
    shares_per_full: i64,
    qty: i64,
    calls: Vec<GatewayCall>,
    fail_next: Option<GatewayError>,
}

impl Default for RecordingGateway {
    fn default() -> Self {
        Self::new(100)
    }
}

impl RecordingGateway {
    pub fn new(shares_per_full: i64) -> Self {
        Self {
            shares_per_full,
            qty: 0,
            calls: Vec::new(),
            fail_next: None,
        }
    }

    /// Preload a held position (signed quantity).
    pub fn with_position(mut self, qty: i64) -> Self {
        self.qty = qty;
        self
    }

    /// Make the next gateway call fail with `err`, once.
    pub fn fail_next(&mut self, err: GatewayError) {
        self.fail_next = Some(err);
    }

    pub fn calls(&self) -> &[GatewayCall] {
        &self.calls
    }

    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    pub fn held_qty(&self) -> i64 {
        self.qty
    }

    /// Wrap in a shared handle so a test can keep inspecting the gateway
    /// after handing it to a `HostedStrategy`.
    pub fn into_shared(self) -> SharedGateway {
        SharedGateway(Rc::new(RefCell::new(self)))
    }

    fn take_failure(&mut self) -> Result<(), GatewayError> {
        match self.fail_next.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Shared, test-inspectable recording gateway. Single-threaded by design,
/// matching the host's serial delivery guarantee.
#[derive(Clone)]
pub struct SharedGateway(Rc<RefCell<RecordingGateway>>);

impl SharedGateway {
    pub fn borrow(&self) -> std::cell::Ref<'_, RecordingGateway> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, RecordingGateway> {
        self.0.borrow_mut()
    }
}

impl OrderGateway for SharedGateway {
    fn set_allocation(&mut self, symbol: &str, fraction_bps: i32) -> Result<(), GatewayError> {
        self.0.borrow_mut().set_allocation(symbol, fraction_bps)
    }

    fn place_stop(
        &mut self,
        symbol: &str,
        qty: i64,
        trigger_micros: i64,
    ) -> Result<(), GatewayError> {
        self.0.borrow_mut().place_stop(symbol, qty, trigger_micros)
    }

    fn place_limit_exit(
        &mut self,
        symbol: &str,
        qty: i64,
        limit_micros: i64,
    ) -> Result<(), GatewayError> {
        self.0.borrow_mut().place_limit_exit(symbol, qty, limit_micros)
    }

    fn liquidate_all(&mut self, symbol: &str) -> Result<(), GatewayError> {
        self.0.borrow_mut().liquidate_all(symbol)
    }

    fn position(&self, symbol: &str) -> PositionSnapshot {
        self.0.borrow().position(symbol)
    }
}

impl OrderGateway for RecordingGateway {
    fn set_allocation(&mut self, symbol: &str, fraction_bps: i32) -> Result<(), GatewayError> {
        self.take_failure()?;
        self.calls.push(GatewayCall::SetAllocation {
            symbol: symbol.to_string(),
            fraction_bps,
        });
        // Immediate paper fill at the target allocation.
        self.qty = self.shares_per_full * i64::from(fraction_bps) / i64::from(FULL_ALLOCATION_BPS);
        Ok(())
    }

    fn place_stop(
        &mut self,
        symbol: &str,
        qty: i64,
        trigger_micros: i64,
    ) -> Result<(), GatewayError> {
        self.take_failure()?;
        self.calls.push(GatewayCall::PlaceStop {
            symbol: symbol.to_string(),
            qty,
            trigger_micros,
        });
        Ok(())
    }

    fn place_limit_exit(
        &mut self,
        symbol: &str,
        qty: i64,
        limit_micros: i64,
    ) -> Result<(), GatewayError> {
        self.take_failure()?;
        self.calls.push(GatewayCall::PlaceLimitExit {
            symbol: symbol.to_string(),
            qty,
            limit_micros,
        });
        Ok(())
    }

    fn liquidate_all(&mut self, symbol: &str) -> Result<(), GatewayError> {
        self.take_failure()?;
        self.calls.push(GatewayCall::LiquidateAll {
            symbol: symbol.to_string(),
        });
        self.qty = 0;
        Ok(())
    }

    fn position(&self, _symbol: &str) -> PositionSnapshot {
        PositionSnapshot::new(self.qty)
    }
}
