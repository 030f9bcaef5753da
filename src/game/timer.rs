use std::time::{Duration, Instant};

/// How a round's time budget is measured and shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerPolicy {
    /// Progress from 0 to 100 %, one fixed step per `tick`, over `duration`.
    Fall { duration: Duration, tick: Duration },
    /// Whole seconds counting down from `secs` to 0.
    Countdown { secs: u32 },
}

impl TimerPolicy {
    fn tick_interval(&self) -> Duration {
        match *self {
            TimerPolicy::Fall { tick, .. } => tick.max(Duration::from_millis(1)),
            TimerPolicy::Countdown { .. } => Duration::from_secs(1),
        }
    }

    fn total_ticks(&self) -> u32 {
        match *self {
            TimerPolicy::Fall { duration, tick } => {
                let tick = tick.max(Duration::from_millis(1));
                let ticks = duration.as_nanos().div_ceil(tick.as_nanos());
                u32::try_from(ticks).unwrap_or(u32::MAX).max(1)
            }
            TimerPolicy::Countdown { secs } => secs.max(1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimerValue {
    /// Percent in [0, 100].
    Progress(f64),
    /// Seconds left in [0, total].
    Remaining { secs: u32, total: u32 },
}

impl TimerValue {
    /// Fraction of the budget already used, in [0, 1].
    pub fn ratio(&self) -> f64 {
        match *self {
            TimerValue::Progress(pct) => pct / 100.0,
            TimerValue::Remaining { secs, total } if total > 0 => {
                1.0 - secs as f64 / total as f64
            }
            TimerValue::Remaining { .. } => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerSignal {
    Running,
    /// Emitted exactly once, on the tick that reaches the bound.
    Timeout,
    Stopped,
}

/// One round's timer. Owned by the active round and dropped with it.
#[derive(Debug)]
pub struct RoundTimer {
    policy: TimerPolicy,
    interval: Duration,
    total_ticks: u32,
    ticks: u32,
    last_tick: Instant,
    running: bool,
    fired: bool,
}

impl RoundTimer {
    pub fn start(policy: TimerPolicy, now: Instant) -> Self {
        Self {
            policy,
            interval: policy.tick_interval(),
            total_ticks: policy.total_ticks(),
            ticks: 0,
            last_tick: now,
            running: true,
            fired: false,
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Apply every whole tick due by `now`.
    pub fn advance(&mut self, now: Instant) -> TimerSignal {
        if !self.running {
            return TimerSignal::Stopped;
        }

        let elapsed = now.saturating_duration_since(self.last_tick);
        let due = elapsed.as_nanos() / self.interval.as_nanos();
        if due == 0 {
            return TimerSignal::Running;
        }

        let due = u32::try_from(due).unwrap_or(u32::MAX);
        self.ticks = self.ticks.saturating_add(due).min(self.total_ticks);
        self.last_tick += self.interval * due;

        if self.ticks >= self.total_ticks {
            self.running = false;
            if !self.fired {
                self.fired = true;
                return TimerSignal::Timeout;
            }
            return TimerSignal::Stopped;
        }
        TimerSignal::Running
    }

    pub fn value(&self) -> TimerValue {
        match self.policy {
            TimerPolicy::Fall { .. } => {
                let pct = self.ticks as f64 * 100.0 / self.total_ticks as f64;
                TimerValue::Progress(pct.clamp(0.0, 100.0))
            }
            TimerPolicy::Countdown { .. } => TimerValue::Remaining {
                secs: self.total_ticks - self.ticks,
                total: self.total_ticks,
            },
        }
    }

    pub fn remaining(&self) -> Duration {
        self.interval * (self.total_ticks - self.ticks)
    }

    /// Instant of the tick that will time out, while running.
    pub fn deadline(&self) -> Option<Instant> {
        self.running.then(|| self.last_tick + self.remaining())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fall_10s() -> TimerPolicy {
        TimerPolicy::Fall {
            duration: Duration::from_secs(10),
            tick: Duration::from_millis(10),
        }
    }

    #[test]
    fn fall_steps_one_tenth_percent_per_tick() {
        let t0 = Instant::now();
        let mut timer = RoundTimer::start(fall_10s(), t0);
        assert_eq!(timer.value(), TimerValue::Progress(0.0));

        timer.advance(t0 + Duration::from_millis(10));
        match timer.value() {
            TimerValue::Progress(p) => assert!((p - 0.1).abs() < 1e-9),
            other => panic!("unexpected {other:?}"),
        }

        timer.advance(t0 + Duration::from_secs(5));
        assert_eq!(timer.value(), TimerValue::Progress(50.0));
    }

    #[test]
    fn partial_tick_does_not_advance() {
        let t0 = Instant::now();
        let mut timer = RoundTimer::start(fall_10s(), t0);
        assert_eq!(timer.advance(t0 + Duration::from_millis(9)), TimerSignal::Running);
        assert_eq!(timer.value(), TimerValue::Progress(0.0));
        // Leftover 9ms carries into the next tick
        timer.advance(t0 + Duration::from_millis(21));
        match timer.value() {
            TimerValue::Progress(p) => assert!((p - 0.2).abs() < 1e-9),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn fall_times_out_once_and_clamps() {
        let t0 = Instant::now();
        let mut timer = RoundTimer::start(fall_10s(), t0);
        assert_eq!(
            timer.advance(t0 + Duration::from_millis(9_990)),
            TimerSignal::Running
        );
        assert_eq!(timer.advance(t0 + Duration::from_secs(10)), TimerSignal::Timeout);
        assert_eq!(timer.value(), TimerValue::Progress(100.0));
        assert!(!timer.is_running());

        assert_eq!(timer.advance(t0 + Duration::from_secs(60)), TimerSignal::Stopped);
        assert_eq!(timer.value(), TimerValue::Progress(100.0));
    }

    #[test]
    fn late_advance_jumps_straight_to_timeout() {
        let t0 = Instant::now();
        let mut timer = RoundTimer::start(fall_10s(), t0);
        assert_eq!(timer.advance(t0 + Duration::from_secs(300)), TimerSignal::Timeout);
        assert_eq!(timer.value(), TimerValue::Progress(100.0));
    }

    #[test]
    fn countdown_decrements_each_second() {
        let t0 = Instant::now();
        let mut timer = RoundTimer::start(TimerPolicy::Countdown { secs: 3 }, t0);
        assert_eq!(timer.value(), TimerValue::Remaining { secs: 3, total: 3 });

        timer.advance(t0 + Duration::from_millis(1_500));
        assert_eq!(timer.value(), TimerValue::Remaining { secs: 2, total: 3 });

        assert_eq!(timer.advance(t0 + Duration::from_secs(3)), TimerSignal::Timeout);
        assert_eq!(timer.value(), TimerValue::Remaining { secs: 0, total: 3 });
        assert_eq!(timer.advance(t0 + Duration::from_secs(4)), TimerSignal::Stopped);
    }

    #[test]
    fn stop_is_idempotent_and_prevents_timeout() {
        let t0 = Instant::now();
        let mut timer = RoundTimer::start(TimerPolicy::Countdown { secs: 1 }, t0);
        timer.stop();
        timer.stop();
        assert_eq!(timer.advance(t0 + Duration::from_secs(5)), TimerSignal::Stopped);
        assert_eq!(timer.value(), TimerValue::Remaining { secs: 1, total: 1 });
    }

    #[test]
    fn ratio_tracks_used_budget() {
        assert_eq!(TimerValue::Progress(25.0).ratio(), 0.25);
        assert_eq!(TimerValue::Remaining { secs: 1, total: 4 }.ratio(), 0.75);
    }

    #[test]
    fn remaining_counts_whole_ticks() {
        let t0 = Instant::now();
        let mut timer = RoundTimer::start(fall_10s(), t0);
        timer.advance(t0 + Duration::from_secs(4));
        assert_eq!(timer.remaining(), Duration::from_secs(6));
    }

    #[test]
    fn deadline_is_fixed_and_gone_after_stop() {
        let t0 = Instant::now();
        let mut timer = RoundTimer::start(fall_10s(), t0);
        assert_eq!(timer.deadline(), Some(t0 + Duration::from_secs(10)));
        timer.advance(t0 + Duration::from_millis(3_333));
        assert_eq!(timer.deadline(), Some(t0 + Duration::from_secs(10)));
        timer.stop();
        assert_eq!(timer.deadline(), None);
    }
}
