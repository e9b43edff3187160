//! Progress-Bar Contract
//!
//! The dashboard drives the bar but never owns its look. Implementations
//! accumulate increments against a declared total and produce the bar text;
//! the engine only calls this contract.

/// A textual progress bar.
pub trait ProgressBar {
    /// Record `n` completed increments.
    fn increment(&mut self, n: usize);

    /// Declare how many increments make up a full bar.
    fn set_total_increments(&mut self, n: usize);

    /// Set the rendered width, in cells.
    fn set_width(&mut self, n: usize);

    /// Produce the current bar text.
    fn render(&self) -> String;
}
