use rdk_host::SessionClock;

/// Latching session clock for one scripted session.
///
/// Fires the first time `now_ts` reaches `session_close_ts - lead_secs`,
/// then stays quiet: the flatten event is once per session.
pub struct FixedSessionClock {
    fire_at_ts: i64,
    fired: bool,
}

impl FixedSessionClock {
    pub fn new(session_close_ts: i64, lead_secs: i64) -> Self {
        Self {
            fire_at_ts: session_close_ts - lead_secs,
            fired: false,
        }
    }

    /// Reset for the next scripted session.
    pub fn next_session(&mut self, session_close_ts: i64, lead_secs: i64) {
        self.fire_at_ts = session_close_ts - lead_secs;
        self.fired = false;
    }
}

impl SessionClock for FixedSessionClock {
    fn session_end_near(&mut self, now_ts: i64) -> bool {
        if self.fired || now_ts < self.fire_at_ts {
            return false;
        }
        self.fired = true;
        true
    }
}
