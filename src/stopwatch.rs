use std::time::{Duration, Instant};

/// Elapsed-time clock for the timed stage. Timestamps come from the caller.
#[derive(Clone, Copy, Debug, Default)]
pub struct Stopwatch {
    started: Option<Instant>,
}

impl Stopwatch {
    /// Start the clock unless it is already running
    pub fn start(&mut self, now: Instant) {
        if self.started.is_none() {
            self.started = Some(now);
        }
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        self.started
            .map(|s| now.saturating_duration_since(s))
            .unwrap_or_default()
    }

    /// Stop the clock, returning how long it ran.
    pub fn stop(&mut self, now: Instant) -> Option<Duration> {
        self.started
            .take()
            .map(|s| now.saturating_duration_since(s))
    }

    pub fn reset(&mut self) {
        self.started = None;
    }
}

/// Live timer display, `MM:SS.cc`
pub fn format_clock(elapsed: Duration) -> String {
    let ms = elapsed.as_millis();
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    let centis = (ms % 1000) / 10;
    format!("{:02}:{:02}.{:02}", minutes, seconds, centis)
}

/// Leaderboard time, `m:ss.d`
pub fn format_record_time(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let minutes = (seconds / 60.0).floor() as u64;
    let whole = (seconds % 60.0).floor() as u64;
    let tenths = ((seconds - seconds.floor()) * 10.0).floor() as u64;
    format!("{}:{:02}.{}", minutes, whole, tenths)
}
