// =============================================================================
// Application State
// =============================================================================
//
// Shared, read-only state handed to every handler via `Arc<AppState>`. Each
// chart request fetches and computes from scratch; nothing here is mutated
// after startup.

use std::sync::Arc;

use crate::market_data::BarSource;

pub struct AppState {
    /// Upstream provider of daily bars.
    pub source: Arc<dyn BarSource>,
    /// Days of history requested per chart.
    pub lookback_days: u32,
}

impl AppState {
    pub fn new(source: Arc<dyn BarSource>, lookback_days: u32) -> Self {
        Self {
            source,
            lookback_days,
        }
    }
}
