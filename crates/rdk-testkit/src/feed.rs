use std::collections::VecDeque;

use rdk_engine::Bar;
use rdk_host::{FeedError, MarketDataSource};

/// Pre-scripted market data source.
///
/// Each `next_bar` call consumes one scripted period; `None` entries model
/// a period where the feed produced nothing. The window served alongside a
/// bar contains only bars delivered *before* it (the current bar joins the
/// history on the following period), matching a host that hands out
/// trailing history at event time.
pub struct ScriptedFeed {
    script: VecDeque<Option<Bar>>,
    history: Vec<Bar>,
    pending: Option<Bar>,
}

impl ScriptedFeed {
    pub fn new(script: Vec<Option<Bar>>) -> Self {
        Self {
            script: script.into(),
            history: Vec::new(),
            pending: None,
        }
    }

    /// Script where every period has a bar.
    pub fn from_bars(bars: Vec<Bar>) -> Self {
        Self::new(bars.into_iter().map(Some).collect())
    }

    /// Seed warm-up history served in windows before any scripted bar.
    pub fn with_history(mut self, history: Vec<Bar>) -> Self {
        self.history = history;
        self
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl MarketDataSource for ScriptedFeed {
    fn next_bar(&mut self) -> Result<Option<Bar>, FeedError> {
        // The previously delivered bar becomes history once a new period
        // starts. Incomplete bars never do: their provisional extremes must
        // not shape later windows.
        if let Some(prev) = self.pending.take() {
            if prev.is_complete {
                self.history.push(prev);
            }
        }

        let item = self.script.pop_front().flatten();
        self.pending = item;
        Ok(item)
    }

    fn window(&mut self, lookback: usize) -> Result<Vec<Bar>, FeedError> {
        let start = self.history.len().saturating_sub(lookback);
        Ok(self.history[start..].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_excludes_the_current_bar() {
        let a = Bar::new(1000, 101_000_000, 100_000_000, 100_500_000, true);
        let b = Bar::new(1060, 100_800_000, 100_200_000, 100_400_000, true);

        let mut feed = ScriptedFeed::from_bars(vec![a, b]);
        assert_eq!(feed.next_bar().unwrap(), Some(a));
        assert_eq!(feed.window(10).unwrap(), Vec::<Bar>::new());

        assert_eq!(feed.next_bar().unwrap(), Some(b));
        assert_eq!(feed.window(10).unwrap(), vec![a]);
    }

    #[test]
    fn incomplete_bars_never_enter_the_window() {
        let complete = Bar::new(1000, 101_000_000, 100_000_000, 100_500_000, true);
        // A forming bar with a wild provisional low.
        let partial = Bar::new(1060, 101_000_000, 1_000, 100_400_000, false);
        let next = Bar::new(1120, 100_800_000, 100_200_000, 100_400_000, true);

        let mut feed = ScriptedFeed::from_bars(vec![complete, partial, next]);
        assert_eq!(feed.next_bar().unwrap(), Some(complete));
        assert_eq!(feed.next_bar().unwrap(), Some(partial));
        assert_eq!(feed.next_bar().unwrap(), Some(next));

        assert_eq!(feed.window(10).unwrap(), vec![complete]);
    }
}
