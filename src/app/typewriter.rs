use std::time::Duration;

use tracing::{debug, info};

use super::feed::{CODE_SEQUENCES, Sequence};
use super::page::Page;
use super::panel::CodePanel;
use super::playback::{Playback, Wakeup};
use super::timer::TimerQueue;
use super::visibility::{GateEvent, VisibilityGate};

/// The mounted widget: a visibility gate driving playback into a code panel,
/// with every deferred step parked on one timer queue.
///
/// The host feeds it time through [`Typewriter::advance`] and visibility
/// through [`Typewriter::observe`]; call `advance` first so anything started
/// by `observe` is scheduled from the current instant.
#[derive(Debug)]
pub(crate) struct Typewriter {
    gate: VisibilityGate,
    playback: Playback,
    panel: CodePanel,
    timers: TimerQueue<Wakeup>,
}

impl Typewriter {
    /// Mounts onto the page's code window. Without one there is nothing to
    /// animate and the page simply stays static.
    pub(crate) fn attach(page: &Page) -> Option<Self> {
        if !page.has_code_window() {
            debug!("no code window on page; typewriter stays inert");
            return None;
        }
        Some(Self::with_sequences(CODE_SEQUENCES))
    }

    pub(crate) fn with_sequences(sequences: &'static [Sequence]) -> Self {
        Self {
            gate: VisibilityGate::default(),
            playback: Playback::new(sequences),
            panel: CodePanel::default(),
            timers: TimerQueue::default(),
        }
    }

    pub(crate) fn panel(&self) -> &CodePanel {
        &self.panel
    }

    pub(crate) fn playback(&self) -> &Playback {
        &self.playback
    }

    pub(crate) fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub(crate) fn observe(&mut self, ratio: f64) {
        match self.gate.observe(ratio) {
            Some(GateEvent::Start) => self.playback.start(&mut self.timers, &mut self.panel),
            Some(GateEvent::Stop) => self.playback.stop(&mut self.timers),
            None => {}
        }
    }

    /// Runs every wakeup due at or before `now`, including ones scheduled by
    /// wakeups handled in this call.
    pub(crate) fn advance(&mut self, now: Duration) {
        while let Some(due) = self.timers.pop_due(now) {
            self.playback.handle(due, &mut self.timers, &mut self.panel);
        }
    }

    /// Clears the panel back to its initial state. The gate is re-armed so
    /// the next observation restarts playback if the panel is still on screen.
    pub(crate) fn reset(&mut self) {
        self.playback.reset(&mut self.timers, &mut self.panel);
        self.gate.rearm();
    }

    pub(crate) fn teardown(&mut self) {
        self.gate.disconnect();
        self.playback.stop(&mut self.timers);
        info!("typewriter torn down");
    }
}
