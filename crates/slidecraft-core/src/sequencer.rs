//! Staged reveal of a slide's elements during playback.

use crate::element::{Animation, Element, ElementId};

/// Milliseconds added per fragment-index step on top of an element's own
/// animation delay.
pub const FRAGMENT_STEP_MS: u64 = 1000;

/// Animation duration applied when an element does not specify one.
pub const DEFAULT_DURATION_MS: u64 = 1000;

/// One entry in a slide's playback schedule, relative to playback start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAnimation {
    pub element: ElementId,
    pub start_ms: u64,
    pub duration_ms: u64,
}

impl ScheduledAnimation {
    pub fn end_ms(&self) -> u64 {
        self.start_ms + self.duration_ms
    }
}

/// Compute the fire schedule for a slide's elements: those with an animation
/// other than `none`, ordered by `delay + fragment_index * 1000` ascending.
pub fn schedule(elements: &[Element]) -> Vec<ScheduledAnimation> {
    let mut entries: Vec<ScheduledAnimation> = elements
        .iter()
        .filter(|el| el.animation != Animation::None)
        .map(|el| ScheduledAnimation {
            element: el.id,
            start_ms: el.animation_delay_ms
                + u64::from(el.fragment_index.unwrap_or(0)) * FRAGMENT_STEP_MS,
            duration_ms: el.animation_duration_ms.unwrap_or(DEFAULT_DURATION_MS),
        })
        .collect();
    entries.sort_by_key(|entry| entry.start_ms);
    entries
}

/// Where an element is in its reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    /// Not yet revealed.
    Dormant,
    /// Transition currently playing.
    Animating,
    /// Final visual state retained, animation flag cleared.
    Settled,
}

/// A state transition emitted by [`Sequencer::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerEvent {
    Began(ElementId),
    Ended(ElementId),
    /// The last scheduled window has ended; emitted exactly once.
    Completed,
}

/// Drives a slide's reveal schedule against a caller-supplied clock.
///
/// The caller polls [`advance`](Self::advance) with the current playback time
/// (any monotonic millisecond source); transitions that fell due since the
/// last poll are returned in time order. Cancelling drops everything pending,
/// so a sequencer belonging to a slide the user navigated away from can never
/// touch a later slide's elements.
#[derive(Debug, Clone)]
pub struct Sequencer {
    schedule: Vec<ScheduledAnimation>,
    started_at: u64,
    begun: Vec<bool>,
    ended: Vec<bool>,
    completed: bool,
    cancelled: bool,
}

impl Sequencer {
    /// Start playback of a slide's elements at `now_ms`.
    pub fn start(elements: &[Element], now_ms: u64) -> Self {
        let schedule = schedule(elements);
        let len = schedule.len();
        log::debug!("sequencer started with {len} scheduled animations");
        Self {
            schedule,
            started_at: now_ms,
            begun: vec![false; len],
            ended: vec![false; len],
            completed: false,
            cancelled: false,
        }
    }

    /// Emit every transition due at or before `now_ms`, in time order.
    ///
    /// A schedule with no animated elements completes on the first call, so
    /// auto-advance still fires for static slides. After cancellation this
    /// returns nothing, ever.
    pub fn advance(&mut self, now_ms: u64) -> Vec<SequencerEvent> {
        if self.cancelled || self.completed {
            return Vec::new();
        }
        let elapsed = now_ms.saturating_sub(self.started_at);

        // (time, schedule index, is_end); begins sort before ends on ties.
        let mut due: Vec<(u64, usize, bool)> = Vec::new();
        for (i, entry) in self.schedule.iter().enumerate() {
            if !self.begun[i] && entry.start_ms <= elapsed {
                due.push((entry.start_ms, i, false));
            }
            if !self.ended[i]
                && (self.begun[i] || entry.start_ms <= elapsed)
                && entry.end_ms() <= elapsed
            {
                due.push((entry.end_ms(), i, true));
            }
        }
        due.sort_by_key(|&(time, _, is_end)| (time, is_end));

        let mut events = Vec::with_capacity(due.len());
        for (_, i, is_end) in due {
            if is_end {
                self.ended[i] = true;
                events.push(SequencerEvent::Ended(self.schedule[i].element));
            } else {
                self.begun[i] = true;
                events.push(SequencerEvent::Began(self.schedule[i].element));
            }
        }

        if self.ended.iter().all(|&done| done) {
            self.completed = true;
            events.push(SequencerEvent::Completed);
        }
        events
    }

    /// Stop playback: every pending transition is dropped and no further
    /// events fire.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Absolute time at which the completion event is (or was) due, `None`
    /// for an empty schedule.
    pub fn completion_at(&self) -> Option<u64> {
        self.schedule
            .iter()
            .map(|entry| self.started_at + entry.end_ms())
            .max()
    }

    /// Current play state of an element. Elements outside the schedule
    /// (no animation) count as settled: they are simply visible.
    pub fn state_of(&self, id: ElementId) -> PlayState {
        for (i, entry) in self.schedule.iter().enumerate() {
            if entry.element == id {
                return if self.ended[i] {
                    PlayState::Settled
                } else if self.begun[i] {
                    PlayState::Animating
                } else {
                    PlayState::Dormant
                };
            }
        }
        PlayState::Settled
    }
}
