use instant::Instant;

/// Which phase of a frame is being timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SystemPhase {
    Swarm = 0,
    Decay = 1,
    Composite = 2,
    Upload = 3,
    Render = 4,
}

impl SystemPhase {
    pub const COUNT: usize = 5;

    pub const ALL: [SystemPhase; Self::COUNT] = [
        Self::Swarm,
        Self::Decay,
        Self::Composite,
        Self::Upload,
        Self::Render,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Swarm => "Swarm",
            Self::Decay => "Decay",
            Self::Composite => "Composite",
            Self::Upload => "GPU Upload",
            Self::Render => "Render",
        }
    }
}

/// Per-phase timing with exponential moving average smoothing.
pub struct SystemTimers {
    /// EMA-smoothed duration in microseconds per phase.
    pub durations_us: [f64; SystemPhase::COUNT],
    /// Timestamp when `begin()` was called.
    start: Instant,
}

const EMA_ALPHA: f64 = 0.1;

impl SystemTimers {
    pub fn new() -> Self {
        Self {
            durations_us: [0.0; SystemPhase::COUNT],
            start: Instant::now(),
        }
    }

    /// Call before a phase runs.
    pub fn begin(&mut self) {
        self.start = Instant::now();
    }

    /// Call after a phase finishes. Records elapsed time for `phase`.
    pub fn end(&mut self, phase: SystemPhase) {
        let elapsed_us = self.start.elapsed().as_secs_f64() * 1_000_000.0;
        self.record(phase, elapsed_us);
    }

    fn record(&mut self, phase: SystemPhase, elapsed_us: f64) {
        let idx = phase as usize;
        self.durations_us[idx] =
            self.durations_us[idx] * (1.0 - EMA_ALPHA) + elapsed_us * EMA_ALPHA;
    }

    /// Sum of all phase durations (microseconds).
    pub fn total_us(&self) -> f64 {
        self.durations_us.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ema_converges() {
        let mut timers = SystemTimers::new();
        for _ in 0..200 {
            timers.record(SystemPhase::Decay, 100.0);
        }
        assert!((timers.durations_us[SystemPhase::Decay as usize] - 100.0).abs() < 0.01);
        assert_eq!(timers.durations_us[SystemPhase::Swarm as usize], 0.0);
        assert!((timers.total_us() - 100.0).abs() < 0.01);
    }

    #[test]
    fn labels_cover_all_phases() {
        for (i, phase) in SystemPhase::ALL.iter().enumerate() {
            assert_eq!(*phase as usize, i);
            assert!(!phase.label().is_empty());
        }
    }
}
