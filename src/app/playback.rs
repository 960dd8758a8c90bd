use std::time::Duration;

use tracing::{debug, info};

use super::feed::{INITIAL_STATUS, Sequence};
use super::highlight::{RenderedLine, is_blank};
use super::timer::{Due, Scheduler, TimerHandle};

pub(crate) const LINE_DELAY: Duration = Duration::from_millis(150);
pub(crate) const SEQUENCE_DELAY: Duration = Duration::from_millis(1000);
pub(crate) const STATUS_FADE: Duration = Duration::from_millis(200);
/// Two frames at 60 Hz: the line is attached before its entrance starts.
pub(crate) const LAYOUT_SETTLE: Duration = Duration::from_millis(32);
pub(crate) const ENTRANCE: Duration = Duration::from_millis(400);
pub(crate) const EVICTION_FADE: Duration = Duration::from_millis(200);
pub(crate) const MAX_VISIBLE_LINES: usize = 10;

pub(crate) type LineId = u64;

/// The output container and status label playback writes into.
///
/// Operations on ids the surface no longer holds are no-ops.
pub(crate) trait OutputSurface {
    fn status_text(&self) -> &str;
    fn fade_status_out(&mut self);
    /// Replaces the label text and fades it back in.
    fn show_status(&mut self, text: &str);
    /// Attaches a line hidden and offset; the entrance runs later.
    fn append_line(&mut self, line: RenderedLine) -> LineId;
    fn reveal_line(&mut self, id: LineId);
    fn settle_line(&mut self, id: LineId);
    /// Lines attached and not yet fading out.
    fn live_line_count(&self) -> usize;
    fn begin_evict_oldest(&mut self) -> Option<LineId>;
    fn remove_line(&mut self, id: LineId);
    fn clear(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Wakeup {
    Tick,
    AdvanceSequence,
    StatusFadeIn(String),
    RevealLine(LineId),
    SettleLine(LineId),
    RemoveLine(LineId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Idle,
    AwaitingLineDelay(TimerHandle),
    AwaitingSequenceDelay(TimerHandle),
}

impl Phase {
    pub(crate) fn handle(self) -> Option<TimerHandle> {
        match self {
            Self::Idle => None,
            Self::AwaitingLineDelay(handle) | Self::AwaitingSequenceDelay(handle) => Some(handle),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlaybackState {
    pub(crate) active_sequence_index: usize,
    pub(crate) active_line_index: usize,
    pub(crate) next_display_line_number: u32,
    pub(crate) running: bool,
    pub(crate) phase: Phase,
    /// Fade-in already on its way to the status label.
    pub(crate) status_fade: Option<TimerHandle>,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            active_sequence_index: 0,
            active_line_index: 0,
            next_display_line_number: 1,
            running: false,
            phase: Phase::Idle,
            status_fade: None,
        }
    }
}

/// Walks the sequences one line per tick and wraps forever.
///
/// All mutation goes through `start`, `stop`, `reset` and `handle`; the
/// controller owns no timers itself, only the handle of the one playback
/// continuation it is waiting on.
#[derive(Debug)]
pub(crate) struct Playback {
    sequences: &'static [Sequence],
    state: PlaybackState,
}

impl Playback {
    pub(crate) fn new(sequences: &'static [Sequence]) -> Self {
        Self {
            sequences,
            state: PlaybackState::default(),
        }
    }

    pub(crate) fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub(crate) fn is_running(&self) -> bool {
        self.state.running
    }

    pub(crate) fn start<S, O>(&mut self, sched: &mut S, surface: &mut O)
    where
        S: Scheduler<Wakeup>,
        O: OutputSurface,
    {
        if self.state.running || self.sequences.is_empty() {
            return;
        }
        info!(
            sequence = self.state.active_sequence_index,
            line = self.state.active_line_index,
            "playback started"
        );
        self.state.running = true;
        self.tick(sched, surface);
    }

    pub(crate) fn stop<S: Scheduler<Wakeup>>(&mut self, sched: &mut S) {
        if !self.state.running {
            return;
        }
        self.state.running = false;
        if let Some(handle) = self.state.phase.handle() {
            sched.cancel(handle);
        }
        self.state.phase = Phase::Idle;
        info!("playback stopped");
    }

    pub(crate) fn reset<S, O>(&mut self, sched: &mut S, surface: &mut O)
    where
        S: Scheduler<Wakeup>,
        O: OutputSurface,
    {
        self.stop(sched);
        surface.clear();
        self.state = PlaybackState::default();
        surface.show_status(INITIAL_STATUS);
        info!("playback reset");
    }

    pub(crate) fn handle<S, O>(&mut self, due: Due<Wakeup>, sched: &mut S, surface: &mut O)
    where
        S: Scheduler<Wakeup>,
        O: OutputSurface,
    {
        match due.wakeup {
            Wakeup::Tick => {
                if self.claim(due.handle) {
                    self.tick(sched, surface);
                }
            }
            Wakeup::AdvanceSequence => {
                if self.claim(due.handle) {
                    self.advance_sequence(sched, surface);
                }
            }
            Wakeup::StatusFadeIn(label) => {
                if self.state.status_fade != Some(due.handle) {
                    return;
                }
                self.state.status_fade = None;
                if self.state.running {
                    surface.show_status(&label);
                }
            }
            Wakeup::RevealLine(id) => {
                surface.reveal_line(id);
                sched.schedule(ENTRANCE, Wakeup::SettleLine(id));
            }
            Wakeup::SettleLine(id) => surface.settle_line(id),
            Wakeup::RemoveLine(id) => surface.remove_line(id),
        }
    }

    /// Accepts a playback continuation only while running and only if it is
    /// the one currently tracked.
    fn claim(&mut self, handle: TimerHandle) -> bool {
        if !self.state.running || self.state.phase.handle() != Some(handle) {
            debug!(?handle, "discarding stale playback wakeup");
            return false;
        }
        self.state.phase = Phase::Idle;
        true
    }

    fn tick<S, O>(&mut self, sched: &mut S, surface: &mut O)
    where
        S: Scheduler<Wakeup>,
        O: OutputSurface,
    {
        if !self.state.running {
            return;
        }
        let sequence = self.sequences[self.state.active_sequence_index];

        let label = sequence.label();
        if surface.status_text() != label && self.state.status_fade.is_none() {
            debug!(%label, "status cross-fade");
            surface.fade_status_out();
            let handle = sched.schedule(STATUS_FADE, Wakeup::StatusFadeIn(label));
            self.state.status_fade = Some(handle);
        }

        let Some(text) = sequence.lines.get(self.state.active_line_index) else {
            let handle = sched.schedule(SEQUENCE_DELAY, Wakeup::AdvanceSequence);
            self.state.phase = Phase::AwaitingSequenceDelay(handle);
            return;
        };

        let number = (!is_blank(text)).then(|| {
            let number = self.state.next_display_line_number;
            self.state.next_display_line_number += 1;
            number
        });
        self.emit(RenderedLine::new(number, text), sched, surface);
        self.state.active_line_index += 1;

        let handle = sched.schedule(LINE_DELAY, Wakeup::Tick);
        self.state.phase = Phase::AwaitingLineDelay(handle);
    }

    fn emit<S, O>(&mut self, line: RenderedLine, sched: &mut S, surface: &mut O)
    where
        S: Scheduler<Wakeup>,
        O: OutputSurface,
    {
        debug!(number = ?line.number, text = %line.text(), "emit line");
        let id = surface.append_line(line);
        sched.schedule(LAYOUT_SETTLE, Wakeup::RevealLine(id));

        while surface.live_line_count() > MAX_VISIBLE_LINES {
            let Some(oldest) = surface.begin_evict_oldest() else {
                break;
            };
            sched.schedule(EVICTION_FADE, Wakeup::RemoveLine(oldest));
        }
    }

    fn advance_sequence<S, O>(&mut self, sched: &mut S, surface: &mut O)
    where
        S: Scheduler<Wakeup>,
        O: OutputSurface,
    {
        self.state.active_sequence_index =
            (self.state.active_sequence_index + 1) % self.sequences.len();
        self.state.active_line_index = 0;
        if self.state.active_sequence_index == 0 {
            self.state.next_display_line_number = 1;
        }
        debug!(
            sequence = self.state.active_sequence_index,
            "advanced to next sequence"
        );
        self.tick(sched, surface);
    }
}
