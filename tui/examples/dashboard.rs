//! Runnable dashboard demo
//!
//! Drives the render engine against a real terminal using hardcoded ANSI
//! sequences for the capability set and a block-character progress bar,
//! with a simulated discovery producer feeding events.
//!
//! ```sh
//! cargo run --example dashboard
//! ```

use std::io;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use kindseek_tui::{ProgressBar, ProgressEvent, RenderEngine, TermInfo, TermInfoError};

/// Capability source with canned ANSI sequences, enough for xterm-likes.
struct AnsiTermInfo;

impl TermInfo for AnsiTermInfo {
    fn query(&self, capname: &str) -> Result<String, TermInfoError> {
        let sequence = match capname {
            "civis" => "\x1b[?25l",
            "cvvis" => "\x1b[?25h",
            "smcup" => "\x1b[?1049h",
            "rmcup" => "\x1b[?1049l",
            "cuu1" => "\x1b[A",
            "el" => "\x1b[K",
            "cup 0 0" => "\x1b[H",
            _ => return Err(TermInfoError::Unsupported(capname.to_string())),
        };
        Ok(sequence.to_string())
    }

    fn query_int(&self, capname: &str) -> Result<i32, TermInfoError> {
        Err(TermInfoError::Unsupported(capname.to_string()))
    }
}

/// Block-character progress bar.
#[derive(Default)]
struct BlockBar {
    total: usize,
    done: usize,
    width: usize,
}

impl ProgressBar for BlockBar {
    fn increment(&mut self, n: usize) {
        self.done += n;
    }

    fn set_total_increments(&mut self, n: usize) {
        self.total = n;
    }

    fn set_width(&mut self, n: usize) {
        self.width = n;
    }

    fn render(&self) -> String {
        let filled = if self.total == 0 {
            0
        } else {
            (self.done * self.width) / self.total
        };
        let empty = self.width.saturating_sub(filled);
        format!("{}{}", "█".repeat(filled), "░".repeat(empty))
    }
}

const KINDS: &[(&str, u64)] = &[
    ("Pod", 14),
    ("Service", 6),
    ("Deployment", 3),
    ("ConfigMap", 22),
    ("Secret", 9),
    ("Ingress", 2),
    ("StatefulSet", 1),
    ("DaemonSet", 4),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // logs go to stderr so they don't fight the dashboard
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut engine = RenderEngine::new(BlockBar::default(), AnsiTermInfo, io::stdout());
    let reporter = engine.reporter();
    let cancel = CancellationToken::new();
    let (done_tx, done_rx) = oneshot::channel();

    // Simulated discovery: a pause to find the kinds, then one fetch per
    // kind, then a beat so the finished dashboard is visible.
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(800)).await;
        let events = reporter.set_total_kinds(KINDS.len());
        for &(kind, resources_found) in KINDS {
            tokio::time::sleep(Duration::from_millis(400)).await;
            let event = ProgressEvent {
                kind: kind.to_string(),
                resources_found,
            };
            if events.send(event).await.is_err() {
                break;
            }
        }
        tokio::time::sleep(Duration::from_millis(600)).await;
    });

    engine.run(cancel, done_tx).await;
    done_rx.await?;
    Ok(())
}
