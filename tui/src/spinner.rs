//! Spinner Animation
//!
//! A self-contained periodic animation source: a rotating glyph cycle plus
//! the timer tick the render loop consumes. Ticking and advancing are
//! decoupled so the loop decides when the frame moves; the loop is the only
//! consumer, so no synchronization is needed.

use std::fmt;
use std::time::Duration;

use tokio::time::{self, Instant, Interval};

/// Spinner animation frames
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// A rotating-glyph animation driven by a fixed-period timer.
///
/// Not restartable: the interval runs for the spinner's whole life, so a
/// fresh run needs a fresh spinner.
pub struct Spinner {
    interval: Interval,
    frame: usize,
}

impl Spinner {
    /// Create a spinner whose tick fires every `period`, starting one full
    /// period from now.
    pub fn new(period: Duration) -> Self {
        Self {
            interval: time::interval_at(Instant::now() + period, period),
            frame: 0,
        }
    }

    /// Wait for the next tick.
    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }

    /// Advance to the next frame, wrapping around. Never resets mid-run.
    pub fn spin(&mut self) {
        self.frame = (self.frame + 1) % SPINNER_FRAMES.len();
    }

    /// The glyph for the current frame.
    pub fn frame(&self) -> &'static str {
        SPINNER_FRAMES[self.frame]
    }
}

impl fmt::Display for Spinner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.frame())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn frames_advance_in_order() {
        let mut spinner = Spinner::new(Duration::from_millis(100));
        assert_eq!(spinner.to_string(), SPINNER_FRAMES[0]);

        spinner.spin();
        assert_eq!(spinner.to_string(), SPINNER_FRAMES[1]);
    }

    #[tokio::test]
    async fn spin_wraps_around() {
        let mut spinner = Spinner::new(Duration::from_millis(100));
        let first = spinner.frame();

        for _ in 0..SPINNER_FRAMES.len() {
            spinner.spin();
        }
        assert_eq!(spinner.frame(), first);
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_fires_one_period_out() {
        let mut spinner = Spinner::new(Duration::from_millis(100));

        let start = Instant::now();
        spinner.tick().await;
        assert!(start.elapsed() >= Duration::from_millis(100));
    }
}
