//! Progress Events and Phase Accounting
//!
//! The data flowing from the discovery/fetch work into the render loop,
//! and the counters the loop accumulates from it.

/// One completed unit of phase-two work: a kind was fetched and yielded
/// `resources_found` resources.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressEvent {
    /// The kind that was fetched (e.g. "Deployment").
    pub kind: String,
    /// How many resources of that kind were found.
    pub resources_found: u64,
}

/// Accumulated dashboard counters. Mutated only by the render loop; the
/// counters only ever grow within a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PhaseState {
    pub total_kinds: usize,
    pub processed_kinds: usize,
    pub total_resources_found: u64,
    pub last_processed_kind: String,
}

impl PhaseState {
    /// Fresh counters for a run with `total_kinds` kinds to fetch.
    pub fn new(total_kinds: usize) -> Self {
        Self {
            total_kinds,
            ..Default::default()
        }
    }

    /// Fold one completed unit into the counters.
    pub fn apply(&mut self, event: ProgressEvent) {
        self.processed_kinds += 1;
        self.total_resources_found += event.resources_found;
        self.last_processed_kind = event.kind;
    }

    /// Decimal digit width of the total, for the processed/total field.
    pub fn counter_width(&self) -> usize {
        self.total_kinds.to_string().len()
    }

    /// `processed/total`, zero-padded to the total's digit width.
    pub fn fetched_counter(&self) -> String {
        format!(
            "{:0width$}/{}",
            self.processed_kinds,
            self.total_kinds,
            width = self.counter_width()
        )
    }

    /// Resources counter with a minimum field width of 4; larger values
    /// widen the field rather than truncate.
    pub fn resources_counter(&self) -> String {
        format!("{:4}", self.total_resources_found)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn event(kind: &str, resources_found: u64) -> ProgressEvent {
        ProgressEvent {
            kind: kind.to_string(),
            resources_found,
        }
    }

    #[test]
    fn apply_accumulates_counters() {
        let mut state = PhaseState::new(3);

        state.apply(event("Pod", 10));
        state.apply(event("Service", 2));
        state.apply(event("Deployment", 0));

        assert_eq!(state.processed_kinds, 3);
        assert_eq!(state.total_resources_found, 12);
        assert_eq!(state.last_processed_kind, "Deployment");
    }

    #[test]
    fn fetched_counter_zero_pads_to_total_width() {
        let mut state = PhaseState::new(42);
        state.processed_kinds = 7;

        assert_eq!(state.fetched_counter(), "07/42");
    }

    #[test]
    fn fetched_counter_single_digit_total() {
        let mut state = PhaseState::new(3);
        state.processed_kinds = 3;

        assert_eq!(state.fetched_counter(), "3/3");
    }

    #[test]
    fn resources_counter_pads_to_four() {
        let mut state = PhaseState::new(1);
        state.total_resources_found = 5;

        assert_eq!(state.resources_counter(), "   5");
    }

    #[test]
    fn resources_counter_widens_past_four_digits() {
        let mut state = PhaseState::new(1);
        state.total_resources_found = 123_456;

        assert_eq!(state.resources_counter(), "123456");
    }
}
