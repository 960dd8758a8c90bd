use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct TimerHandle(u64);

/// Deferred work sink. Playback never sleeps; it asks a scheduler to hand a
/// wakeup back after `delay` and keeps the handle if it may need to cancel.
pub(crate) trait Scheduler<T> {
    fn schedule(&mut self, delay: Duration, wakeup: T) -> TimerHandle;

    /// Returns whether a pending entry was removed.
    fn cancel(&mut self, handle: TimerHandle) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Due<T> {
    pub(crate) handle: TimerHandle,
    pub(crate) wakeup: T,
}

/// Virtual-time timer queue. Time only moves when the owner calls
/// [`TimerQueue::pop_due`] with a later instant, so tests can step it exactly
/// and the terminal loop can feed it `Instant::elapsed`.
#[derive(Debug)]
pub(crate) struct TimerQueue<T> {
    now: Duration,
    next_id: u64,
    entries: BTreeMap<(Duration, TimerHandle), T>,
    deadlines: HashMap<TimerHandle, Duration>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            entries: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    #[cfg(test)]
    pub(crate) fn now(&self) -> Duration {
        self.now
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub(crate) fn is_pending(&self, handle: TimerHandle) -> bool {
        self.deadlines.contains_key(&handle)
    }

    pub(crate) fn next_deadline(&self) -> Option<Duration> {
        self.entries.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Removes the earliest entry due at or before `now`. The clock stops at
    /// that entry's deadline, so whatever it schedules is timed from when it
    /// was due; once nothing else is due the clock moves on to `now`. It never
    /// runs backwards. Entries with equal deadlines come out in scheduling
    /// order.
    pub(crate) fn pop_due(&mut self, now: Duration) -> Option<Due<T>> {
        let due = self
            .entries
            .keys()
            .next()
            .copied()
            .filter(|(deadline, _)| *deadline <= now);
        let Some((deadline, handle)) = due else {
            self.now = self.now.max(now);
            return None;
        };
        self.now = self.now.max(deadline);
        let wakeup = self.entries.remove(&(deadline, handle))?;
        self.deadlines.remove(&handle);
        Some(Due { handle, wakeup })
    }
}

impl<T> Scheduler<T> for TimerQueue<T> {
    fn schedule(&mut self, delay: Duration, wakeup: T) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        let deadline = self.now + delay;
        self.entries.insert((deadline, handle), wakeup);
        self.deadlines.insert(handle, deadline);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        let Some(deadline) = self.deadlines.remove(&handle) else {
            return false;
        };
        self.entries.remove(&(deadline, handle)).is_some()
    }
}
