//! kindseek TUI - in-place terminal dashboard for two-phase discovery
//!
//! This crate renders a live, self-updating dashboard that tracks a
//! discovery task: first an unknown-count "kind discovery" phase, then a
//! per-kind "resource fetch" phase whose total only becomes known once
//! phase one completes.
//!
//! # Architecture
//!
//! - **Terminfo**: capability lookup behind a trait, cached per engine
//! - **Console**: buffered output plus cursor/erase primitives
//! - **Spinner**: fixed-period rotating-glyph animation
//! - **UI**: the single select-loop that multiplexes cancellation,
//!   progress events, and spinner ticks into redraws
//!
//! The terminal is restored on every exit path: cancellation, completion,
//! or a closed event channel.

pub mod console;
pub mod events;
pub mod progress;
pub mod spinner;
pub mod terminfo;
pub mod ui;

pub use console::Console;
pub use events::{PhaseState, ProgressEvent};
pub use progress::ProgressBar;
pub use spinner::Spinner;
pub use terminfo::{CapabilityCache, TermInfo, TermInfoError};
pub use ui::{DiscoveryReporter, RenderEngine};
