//! Terminal Capability Lookup
//!
//! Wraps a terminfo-style capability source behind a small trait so the
//! render loop can be driven against canned responses in tests, plus a
//! per-engine cache that resolves each capability name at most once per run.

use std::collections::HashMap;

use thiserror::Error;

/// Errors from the underlying terminal-info source.
#[derive(Debug, Error)]
pub enum TermInfoError {
    /// The capability is not present in the terminal's database.
    #[error("capability `{0}` is not supported by this terminal")]
    Unsupported(String),
    /// The lookup itself failed (database missing, helper errored, ...).
    #[error("terminfo lookup for `{capname}` failed: {reason}")]
    Lookup { capname: String, reason: String },
}

/// A terminfo-style capability source.
///
/// Implementations resolve capability names (`civis`, `el`, `cuu1`, ...) to
/// escape sequences for the terminal in use. The dashboard only ever talks
/// to the terminal database through this trait, so tests substitute a
/// deterministic source.
pub trait TermInfo {
    /// Resolve a capability name to its escape sequence.
    fn query(&self, capname: &str) -> Result<String, TermInfoError>;

    /// Resolve a numeric capability (terminal geometry: `lines`, `cols`).
    fn query_int(&self, capname: &str) -> Result<i32, TermInfoError>;
}

/// Per-engine capability cache.
///
/// Each capability name hits the source at most once per run. A failed
/// lookup degrades to the empty string and is cached exactly like a
/// legitimately empty capability, so a transient failure stays empty for
/// the rest of the run. Deliberately instance state, not a process-wide
/// global: engines must not share resolved capabilities.
pub struct CapabilityCache<T: TermInfo> {
    source: T,
    resolved: HashMap<String, String>,
    lookups: usize,
}

impl<T: TermInfo> CapabilityCache<T> {
    /// Create an empty cache over the given source.
    pub fn new(source: T) -> Self {
        Self {
            source,
            resolved: HashMap::new(),
            lookups: 0,
        }
    }

    /// Resolve a capability, querying the source only on the first call.
    pub fn resolve(&mut self, capname: &str) -> &str {
        if !self.resolved.contains_key(capname) {
            self.lookups += 1;
            let sequence = match self.source.query(capname) {
                Ok(sequence) => sequence,
                Err(err) => {
                    tracing::debug!(capname, %err, "capability lookup failed");
                    String::new()
                }
            };
            self.resolved.insert(capname.to_string(), sequence);
        }
        &self.resolved[capname]
    }

    /// Number of queries issued to the underlying source so far.
    pub fn lookups(&self) -> usize {
        self.lookups
    }

    /// Terminal geometry as `(lines, cols)`. Uncached; geometry changes
    /// between calls when the window is resized.
    pub fn term_size(&self) -> Result<(i32, i32), TermInfoError> {
        let lines = self.source.query_int("lines")?;
        let cols = self.source.query_int("cols")?;
        Ok((lines, cols))
    }
}
