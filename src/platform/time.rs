//! Frame pacing for a callback-driven loop
//!
//! Animation frames arrive at whatever rate the display runs; the simulation
//! wants at most one tick per minimum interval. [`FrameGate`] sits between
//! the two: feed it every callback timestamp and it says whether this
//! callback gets to simulate. Timestamps come from the caller, so tests can
//! drive it with a made-up clock.

/// Minimum-interval gate over caller-supplied timestamps
///
/// The gate is closed until `interval_ms` has elapsed since it last fired
/// (or since the first timestamp after a reset); firing re-baselines it to
/// the firing timestamp, discarding any excess.
#[derive(Debug, Clone)]
pub struct FrameGate {
    interval_ms: f64,
    started: Option<f64>,
}

impl FrameGate {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            started: None,
        }
    }

    /// Feed one callback timestamp; true means "run a tick now"
    ///
    /// The first timestamp after construction or [`reset`](Self::reset) only
    /// baselines the gate and never fires.
    pub fn ready(&mut self, now_ms: f64) -> bool {
        match self.started {
            None => {
                self.started = Some(now_ms);
                false
            }
            Some(start) if now_ms - start > self.interval_ms => {
                self.started = Some(now_ms);
                true
            }
            Some(_) => false,
        }
    }

    /// Forget the baseline; the next timestamp re-baselines without firing
    pub fn reset(&mut self) {
        self.started = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_timestamp_only_baselines() {
        let mut gate = FrameGate::new(16.0);
        assert!(!gate.ready(1000.0));
    }

    #[test]
    fn test_fires_after_interval() {
        let mut gate = FrameGate::new(16.0);
        gate.ready(1000.0);
        // 8 ms later: too soon
        assert!(!gate.ready(1008.0));
        // 17 ms after the baseline: fire
        assert!(gate.ready(1017.0));
        // Re-baselined at 1017: the next callback is too soon again
        assert!(!gate.ready(1025.0));
        assert!(gate.ready(1034.0));
    }

    #[test]
    fn test_exact_interval_does_not_fire() {
        let mut gate = FrameGate::new(16.0);
        gate.ready(1000.0);
        assert!(!gate.ready(1016.0));
        assert!(gate.ready(1016.1));
    }

    #[test]
    fn test_excess_time_is_discarded() {
        let mut gate = FrameGate::new(16.0);
        gate.ready(1000.0);
        // A long stall fires once, not many times
        assert!(gate.ready(1100.0));
        assert!(!gate.ready(1101.0));
    }

    #[test]
    fn test_reset_swallows_next_timestamp() {
        let mut gate = FrameGate::new(16.0);
        gate.ready(1000.0);
        assert!(gate.ready(1020.0));
        gate.reset();
        // Post-reset: baseline again before firing
        assert!(!gate.ready(5000.0));
        assert!(gate.ready(5017.0));
    }
}
