//! Timeline hooks for the network.

use crate::sim::SimTime;
use crate::timeline::{TimelineEvent, TimelineEventKind, TimelineLogger};

use super::Network;

impl Network {
    /// Start recording protocol events; a no-op if already enabled.
    pub fn enable_timeline(&mut self) {
        if self.timeline.is_none() {
            self.timeline = Some(TimelineLogger::default());
        }
    }

    pub fn take_timeline(&mut self) -> Option<TimelineLogger> {
        self.timeline.take()
    }

    pub(crate) fn record(&mut self, now: SimTime, kind: TimelineEventKind) {
        if let Some(t) = &mut self.timeline {
            t.push(TimelineEvent {
                t: now.as_units(),
                kind,
            });
        }
    }
}
