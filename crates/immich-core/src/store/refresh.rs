// ── Tick bookkeeping ──
//
// Aggregates the per-reading outcomes of one tick and stamps the store.

use tracing::info;

use super::ReadingStore;
use crate::model::ReadingState;

/// Outcome counts for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub fresh: usize,
    pub missing: usize,
    pub errored: usize,
}

impl TickSummary {
    fn record(&mut self, state: ReadingState) {
        match state {
            ReadingState::Fresh(_) => self.fresh += 1,
            ReadingState::Missing => self.missing += 1,
            ReadingState::Errored(_) => self.errored += 1,
            ReadingState::Pending => {}
        }
    }

    pub fn total(&self) -> usize {
        self.fresh + self.missing + self.errored
    }
}

impl FromIterator<ReadingState> for TickSummary {
    fn from_iter<I: IntoIterator<Item = ReadingState>>(iter: I) -> Self {
        let mut summary = Self::default();
        for state in iter {
            summary.record(state);
        }
        summary
    }
}

impl ReadingStore {
    /// Close out a tick: stamp the refresh time and log the summary.
    pub(crate) fn finish_tick(&self, states: impl IntoIterator<Item = ReadingState>) -> TickSummary {
        let summary: TickSummary = states.into_iter().collect();
        self.mark_refreshed();

        info!(
            fresh = summary.fresh,
            missing = summary.missing,
            errored = summary.errored,
            "refresh tick finished"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use immich_api::ErrorKind;

    use super::*;
    use crate::model::static_descriptors;

    #[test]
    fn finish_tick_counts_and_stamps() {
        let store = ReadingStore::new(static_descriptors());
        let summary = store.finish_tick([
            ReadingState::Fresh(1),
            ReadingState::Fresh(0),
            ReadingState::Missing,
            ReadingState::Errored(ErrorKind::Api),
        ]);

        assert_eq!(
            summary,
            TickSummary {
                fresh: 2,
                missing: 1,
                errored: 1
            }
        );
        assert_eq!(summary.total(), 4);
        assert!(store.last_refresh().is_some());
    }
}
