//! Per-tick timing and counters.
//!
//! [`TickMetrics`] is refreshed by every tick that runs. Durations are
//! in microseconds; counters are cumulative over the scheduler's life.

use ripple_core::TickId;

/// Timing and counters for the most recent tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickMetrics {
    /// Id of the last tick that ran.
    pub tick_id: TickId,
    /// Wall-clock time of the whole tick, in microseconds.
    pub total_us: u64,
    /// Time spent painting obstacle trails.
    pub geometry_us: u64,
    /// Time spent laying and injecting sources.
    pub source_us: u64,
    /// Time spent in the H updates of the tick.
    pub h_update_us: u64,
    /// Time spent in the E updates, boundary correction included.
    pub e_update_us: u64,
    /// Time spent building the published frame.
    pub output_us: u64,
    /// Bytes held by every grid slot.
    pub memory_bytes: usize,
    /// Commands applied so far.
    pub commands_applied: u64,
    /// Commands rejected so far.
    pub commands_rejected: u64,
    /// Ticks skipped because of an oversized elapsed time.
    pub skipped_ticks: u64,
    /// Ticks after which the finiteness probe found a bad cell.
    pub non_finite_ticks: u64,
}

impl TickMetrics {
    /// Zero the per-tick durations, keeping the cumulative counters.
    pub(crate) fn begin_tick(&mut self, tick_id: TickId) {
        self.tick_id = tick_id;
        self.total_us = 0;
        self.geometry_us = 0;
        self.source_us = 0;
        self.h_update_us = 0;
        self.e_update_us = 0;
        self.output_us = 0;
    }
}
