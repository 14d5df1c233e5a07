use std::time::{Duration, Instant};

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Fixed-timestep scheduler state. `last_tick` only ever moves forward by
/// whole tick lengths, so fractional leftover time carries across calls and
/// the long-run tick rate converges to exactly `1 / tick_length` no matter
/// how irregularly the host invokes `advance`.
#[derive(Debug, Clone, Copy)]
pub struct SimulationClock {
    tick_length: Duration,
    last_tick: Instant,
}

impl SimulationClock {
    pub fn new(tick_length: Duration, now: Instant) -> Self {
        Self {
            tick_length,
            last_tick: now,
        }
    }

    pub fn tick_length(&self) -> Duration {
        self.tick_length
    }

    /// Returns the number of whole ticks due at `now` and advances
    /// `last_tick` by exactly that many tick lengths, never to `now` itself.
    /// A wall clock that moved backwards yields zero ticks and no mutation.
    /// There is no tick cap: a long host stall replays every missed tick.
    pub fn advance(&mut self, now: Instant) -> u64 {
        let elapsed = now.saturating_duration_since(self.last_tick);
        let tick_nanos = self.tick_length.as_nanos();
        if tick_nanos == 0 {
            return 0;
        }

        let due = (elapsed.as_nanos() / tick_nanos) as u64;
        if due > 0 {
            self.last_tick += duration_from_nanos(tick_nanos * due as u128);
        }
        due
    }

    /// Re-anchors the clock at `now`. Used when resuming from a soft pause,
    /// where the suspended interval must not be replayed as catch-up ticks.
    pub fn restart(&mut self, now: Instant) {
        self.last_tick = now;
    }
}

fn duration_from_nanos(nanos: u128) -> Duration {
    Duration::new(
        (nanos / NANOS_PER_SEC) as u64,
        (nanos % NANOS_PER_SEC) as u32,
    )
}
