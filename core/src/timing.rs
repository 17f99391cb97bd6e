use core::time::Duration;

/// Fixed-period scheduler driven by externally supplied elapsed time.
///
/// Elapsed time accumulates while running and is handed out one whole period
/// at a time through [`Ticker::take_due`], so a long frame produces several
/// consecutive ticks instead of a single coalesced one.
#[derive(Clone, Debug, PartialEq)]
pub struct Ticker {
    period: Duration,
    elapsed: Duration,
    running: bool,
}

impl Ticker {
    pub const MIN_PERIOD: Duration = Duration::from_millis(1);

    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Self::MIN_PERIOD),
            elapsed: Duration::ZERO,
            running: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.elapsed = Duration::ZERO;
        }
    }

    /// Stops the ticker and drops any partially accumulated period.
    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed = Duration::ZERO;
    }

    pub fn feed(&mut self, elapsed: Duration) {
        if self.running {
            self.elapsed = self.elapsed.saturating_add(elapsed);
        }
    }

    /// Consumes one period if a whole one has accumulated.
    pub fn take_due(&mut self) -> bool {
        if self.running && self.elapsed >= self.period {
            self.elapsed -= self.period;
            true
        } else {
            false
        }
    }
}

/// One-shot delay used for deferred transitions.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Delay {
    remaining: Option<Duration>,
}

impl Delay {
    pub const fn idle() -> Self {
        Self { remaining: None }
    }

    pub fn arm(&mut self, duration: Duration) {
        self.remaining = Some(duration);
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub const fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }

    /// Counts the delay down, returning `true` exactly once when it expires.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        match self.remaining {
            Some(remaining) if elapsed >= remaining => {
                self.remaining = None;
                true
            }
            Some(remaining) => {
                self.remaining = Some(remaining - elapsed);
                false
            }
            None => false,
        }
    }
}
