//! Render Engine
//!
//! The single control loop that turns discovery progress into an in-place
//! dashboard. Exactly one task runs [`RenderEngine::run`]; the discovery
//! work and the spinner timer are independent producers, and the channels
//! between them are the only synchronization.
//!
//! # Lifecycle
//!
//! 1. Hide the cursor, enter the alternate screen, announce discovery.
//! 2. Wait for the phase-two total (or cancellation).
//! 3. Redraw the four-line dashboard on every progress event and spinner
//!    tick until the event channel closes (or cancellation).
//! 4. Restore the terminal and signal the caller, on every exit path.

use std::io::Write;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;

use crate::console::Console;
use crate::events::{PhaseState, ProgressEvent};
use crate::progress::ProgressBar;
use crate::spinner::Spinner;
use crate::terminfo::TermInfo;

/// Spinner advance period.
const SPINNER_PERIOD: Duration = Duration::from_millis(100);

/// Progress-bar display width, in cells.
const BAR_WIDTH: usize = 10;

/// Phase-two announcement: the kind count plus the receiving end of the
/// event channel the producer was handed.
struct TotalKinds {
    count: usize,
    events: mpsc::Receiver<ProgressEvent>,
}

/// Producer-side handle to the engine.
///
/// Clone it and hand it to the discovery task before the engine starts
/// running; the engine itself stays exclusively borrowed by its loop.
#[derive(Clone)]
pub struct DiscoveryReporter {
    announce: mpsc::Sender<TotalKinds>,
}

impl DiscoveryReporter {
    /// Announce the phase-two total and get the event channel back.
    ///
    /// Must be called exactly once, as soon as discovery knows how many
    /// kinds exist. The returned sender is bounded to `count`, so the
    /// producer can complete all its sends without the dashboard keeping
    /// up. Send one [`ProgressEvent`] per fetched kind; drop the sender
    /// early to stop the dashboard before all kinds are done.
    pub fn set_total_kinds(&self, count: usize) -> mpsc::Sender<ProgressEvent> {
        // a zero-capacity tokio channel is illegal; a zero-kind run still
        // needs a channel to close
        let (events_tx, events_rx) = mpsc::channel(count.max(1));
        let announcement = TotalKinds {
            count,
            events: events_rx,
        };
        if self.announce.try_send(announcement).is_err() {
            tracing::warn!(count, "total kinds announced more than once; ignoring");
        }
        events_tx
    }
}

/// The dashboard engine.
///
/// Owns the console (capability cache plus buffered sink) and the
/// progress-bar handle; drives them from a single cooperative loop.
pub struct RenderEngine<T: TermInfo, B: ProgressBar, W: Write> {
    console: Console<T, W>,
    bar: B,
    announce_tx: mpsc::Sender<TotalKinds>,
    announce_rx: mpsc::Receiver<TotalKinds>,
}

impl<T, B, W> RenderEngine<T, B, W>
where
    T: TermInfo,
    B: ProgressBar,
    W: Write,
{
    /// Create an engine over a progress bar, a capability source, and a
    /// byte sink.
    pub fn new(bar: B, term_info: T, writer: W) -> Self {
        let (announce_tx, announce_rx) = mpsc::channel(1);
        Self {
            console: Console::new(term_info, writer),
            bar,
            announce_tx,
            announce_rx,
        }
    }

    /// Handle for the discovery task to announce the total and stream
    /// progress events.
    pub fn reporter(&self) -> DiscoveryReporter {
        DiscoveryReporter {
            announce: self.announce_tx.clone(),
        }
    }

    /// Buffered raw output passthrough, no trailing newline, no flush.
    pub fn print(&mut self, text: impl std::fmt::Display) {
        self.console.print(text);
    }

    /// Buffered raw output passthrough with a trailing newline, no flush.
    pub fn println(&mut self, text: impl std::fmt::Display) {
        self.console.println(text);
    }

    /// Run the dashboard until cancellation or until the event channel
    /// closes.
    ///
    /// The terminal is restored on every exit path, and `done` fires last,
    /// so a waiting caller never observes completion before restoration.
    pub async fn run(&mut self, cancel: CancellationToken, done: oneshot::Sender<()>) {
        self.console.hide_cursor();
        self.console.enter_alternate_screen();
        self.console.print("Discovering kinds...");
        self.console.flush();

        self.drive(&cancel).await;

        // Teardown, in this order, on every path: flush what is buffered,
        // then restore the terminal straight through the raw sink, then
        // release the caller.
        self.console.flush();
        self.console.write_through("cvvis");
        self.console.write_through("rmcup");
        let _ = done.send(());
    }

    /// The AwaitingTotal and Rendering states; returns on any exit
    /// condition so `run` can tear down.
    async fn drive(&mut self, cancel: &CancellationToken) {
        let mut announcement = tokio::select! {
            _ = cancel.cancelled() => return,
            announced = self.announce_rx.recv() => match announced {
                Some(announced) => announced,
                None => return,
            },
        };

        self.console
            .print(format!(" found {}.\n", announcement.count));
        self.bar.set_width(BAR_WIDTH);
        self.bar.set_total_increments(announcement.count);

        let mut spinner = Spinner::new(SPINNER_PERIOD);
        let mut state = PhaseState::new(announcement.count);
        let erase_line = self.console.erase_line_seq();

        loop {
            self.redraw(&spinner, &state, &erase_line);

            tokio::select! {
                _ = cancel.cancelled() => return,
                event = announcement.events.recv() => match event {
                    Some(event) => {
                        self.bar.increment(1);
                        state.apply(event);
                    }
                    // producer dropped the sender: phase two is over
                    None => return,
                },
                _ = spinner.tick() => spinner.spin(),
            }
        }
    }

    /// Recompose and rewrite the whole dashboard block.
    ///
    /// The lines are joined by the erase-line sequence so trailing remnants
    /// of a previous, longer render are cleared in the same write.
    fn redraw(&mut self, spinner: &Spinner, state: &PhaseState, erase_line: &str) {
        self.console.cursor_home();
        let lines = [
            format!("Discovering kinds... found {}.\n", state.total_kinds),
            format!(
                "\r{} Fetched kinds: {} {}\n",
                spinner,
                self.bar.render(),
                state.fetched_counter()
            ),
            format!("Getting {}\n", state.last_processed_kind),
            format!("Total resources found: {}", state.resources_counter()),
        ];
        self.console.print(lines.join(erase_line));
        self.console.flush();
    }
}
