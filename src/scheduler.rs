//! Virtual-clock timer queue with cancelable handles.
//!
//! [`Scheduler`] stands in for `setTimeout` / `setInterval`. Time only moves
//! when the owner calls [`advance_to`](Scheduler::advance_to), which runs every
//! due task in (due time, insertion order), each to completion. Every task has
//! a [`TaskId`] that can be cancelled at any point, including mid-way through a
//! repeating animation.

use std::collections::BTreeMap;
use std::time::Duration;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a scheduled task.
    pub struct TaskId;
}

/// Whether a repeating task wants another run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Run again after the task's period (one-shot tasks ignore this).
    Continue,
    /// Finished; drop the task.
    Done,
}

/// Shortest allowed repeat period.
const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug)]
struct Entry<T> {
    key: (Duration, u64),
    period: Option<Duration>,
    payload: T,
}

/// A queue of pending tasks keyed by virtual due time.
#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_seq: u64,
    tasks: SlotMap<TaskId, Entry<T>>,
    queue: BTreeMap<(Duration, u64), TaskId>,
}

impl<T> Scheduler<T> {
    /// Create an empty scheduler at time zero.
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            tasks: SlotMap::with_key(),
            queue: BTreeMap::new(),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Whether `id` is still pending.
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.contains_key(id)
    }

    /// Run `payload` once, `delay` from now.
    pub fn set_timeout(&mut self, delay: Duration, payload: T) -> TaskId {
        self.push(self.now + delay, None, payload)
    }

    /// Run `payload` first after `first_delay`, then every `period` until it
    /// returns [`Flow::Done`] or is cancelled.
    pub fn set_interval(&mut self, first_delay: Duration, period: Duration, payload: T) -> TaskId {
        self.push(self.now + first_delay, Some(period.max(MIN_PERIOD)), payload)
    }

    /// Cancel a pending task, returning its payload.
    pub fn cancel(&mut self, id: TaskId) -> Option<T> {
        let entry = self.tasks.remove(id)?;
        self.queue.remove(&entry.key);
        Some(entry.payload)
    }

    /// Cancel everything. Returns the number of tasks dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.tasks.len();
        self.tasks.clear();
        self.queue.clear();
        dropped
    }

    /// Due time of the earliest pending task.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.keys().next().map(|&(due, _)| due)
    }

    /// Advance the clock by `delta`, running due tasks. See [`advance_to`](Self::advance_to).
    pub fn advance_by(
        &mut self,
        delta: Duration,
        run: impl FnMut(TaskId, &mut T) -> Flow,
    ) -> usize {
        let target = self.now + delta;
        self.advance_to(target, run)
    }

    /// Advance the clock to `target`, running every task due at or before it.
    ///
    /// The clock is set to each task's due time while it runs. Repeating tasks
    /// that return [`Flow::Continue`] are requeued behind tasks already due at
    /// the same instant. Returns the number of task runs. A `target` in the
    /// past leaves the clock unchanged.
    pub fn advance_to(
        &mut self,
        target: Duration,
        mut run: impl FnMut(TaskId, &mut T) -> Flow,
    ) -> usize {
        let mut runs = 0;

        loop {
            let Some((&key, &id)) = self.queue.iter().next() else {
                break;
            };
            if key.0 > target {
                break;
            }
            self.queue.remove(&key);
            self.now = self.now.max(key.0);

            let Some(entry) = self.tasks.get_mut(id) else {
                continue;
            };
            let flow = run(id, &mut entry.payload);
            runs += 1;

            match (flow, entry.period) {
                (Flow::Continue, Some(period)) => {
                    let next = (key.0 + period, self.next_seq);
                    self.next_seq += 1;
                    entry.key = next;
                    self.queue.insert(next, id);
                }
                _ => {
                    self.tasks.remove(id);
                }
            }
        }

        self.now = self.now.max(target);
        runs
    }

    fn push(&mut self, due: Duration, period: Option<Duration>, payload: T) -> TaskId {
        let key = (due, self.next_seq);
        self.next_seq += 1;
        let id = self.tasks.insert(Entry {
            key,
            period,
            payload,
        });
        self.queue.insert(key, id);
        id
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    // ── Timeouts ─────────────────────────────────────────────────────

    #[test]
    fn timeout_runs_once_when_due() {
        let mut sched = Scheduler::new();
        sched.set_timeout(ms(100), "a");
        let mut seen = Vec::new();

        let mut record = |_: TaskId, p: &mut &'static str| {
            seen.push(*p);
            Flow::Done
        };
        assert_eq!(sched.advance_by(ms(99), &mut record), 0);
        assert_eq!(sched.advance_by(ms(1), &mut record), 1);
        assert_eq!(sched.advance_by(ms(500), &mut record), 0);
        assert_eq!(seen, vec!["a"]);
        assert!(sched.is_empty());
    }

    #[test]
    fn zero_delay_runs_on_next_advance() {
        let mut sched = Scheduler::new();
        sched.set_timeout(Duration::ZERO, 1);
        assert_eq!(sched.advance_by(Duration::ZERO, |_, _| Flow::Done), 1);
    }

    #[test]
    fn order_is_due_time_then_insertion() {
        let mut sched = Scheduler::new();
        sched.set_timeout(ms(20), "late");
        sched.set_timeout(ms(10), "first");
        sched.set_timeout(ms(10), "second");
        let mut seen = Vec::new();
        sched.advance_by(ms(50), |_, p| {
            seen.push(*p);
            Flow::Done
        });
        assert_eq!(seen, vec!["first", "second", "late"]);
    }

    #[test]
    fn clock_reports_task_due_time_during_run() {
        let mut sched: Scheduler<()> = Scheduler::new();
        sched.set_timeout(ms(30), ());
        let mut at = Vec::new();
        let now_before = sched.now();
        sched.advance_by(ms(100), |_, _| {
            at.push(());
            Flow::Done
        });
        assert_eq!(now_before, Duration::ZERO);
        assert_eq!(sched.now(), ms(100));
        assert_eq!(at.len(), 1);
    }

    // ── Intervals ────────────────────────────────────────────────────

    #[test]
    fn interval_repeats_until_done() {
        let mut sched = Scheduler::new();
        sched.set_interval(ms(40), ms(40), 0u32);
        let mut ticks = Vec::new();
        sched.advance_by(ms(1000), |_, n| {
            *n += 1;
            ticks.push(*n);
            if *n == 3 { Flow::Done } else { Flow::Continue }
        });
        assert_eq!(ticks, vec![1, 2, 3]);
        assert!(sched.is_empty());
    }

    #[test]
    fn interval_runs_exact_count_for_elapsed_time() {
        let mut sched = Scheduler::new();
        sched.set_interval(ms(40), ms(40), ());
        let runs = sched.advance_by(ms(200), |_, _| Flow::Continue);
        assert_eq!(runs, 5);
        assert_eq!(sched.next_deadline(), Some(ms(240)));
    }

    #[test]
    fn zero_period_is_clamped() {
        let mut sched = Scheduler::new();
        sched.set_interval(Duration::ZERO, Duration::ZERO, ());
        let runs = sched.advance_by(ms(3), |_, _| Flow::Continue);
        assert_eq!(runs, 4);
    }

    // ── Cancellation ─────────────────────────────────────────────────

    #[test]
    fn cancel_returns_payload_and_skips_run() {
        let mut sched = Scheduler::new();
        let id = sched.set_timeout(ms(10), "x");
        assert!(sched.is_pending(id));
        assert_eq!(sched.cancel(id), Some("x"));
        assert!(!sched.is_pending(id));
        assert_eq!(sched.cancel(id), None);
        assert_eq!(sched.advance_by(ms(100), |_, _| Flow::Done), 0);
    }

    #[test]
    fn cancel_interval_mid_flight() {
        let mut sched = Scheduler::new();
        let id = sched.set_interval(ms(10), ms(10), 0u32);
        sched.advance_by(ms(25), |_, n| {
            *n += 1;
            Flow::Continue
        });
        assert_eq!(sched.cancel(id), Some(2));
        assert_eq!(sched.advance_by(ms(100), |_, _| Flow::Continue), 0);
    }

    #[test]
    fn clear_drops_everything() {
        let mut sched = Scheduler::new();
        sched.set_timeout(ms(1), ());
        sched.set_interval(ms(1), ms(1), ());
        assert_eq!(sched.clear(), 2);
        assert!(sched.is_empty());
        assert_eq!(sched.next_deadline(), None);
    }

    #[test]
    fn advance_into_past_keeps_clock() {
        let mut sched: Scheduler<()> = Scheduler::new();
        sched.advance_to(ms(50), |_, _| Flow::Done);
        sched.advance_to(ms(10), |_, _| Flow::Done);
        assert_eq!(sched.now(), ms(50));
    }

    #[test]
    fn timeout_delay_is_relative_to_now() {
        let mut sched = Scheduler::new();
        sched.advance_to(ms(1000), |_, _| Flow::Done);
        sched.set_timeout(ms(10), ());
        assert_eq!(sched.next_deadline(), Some(ms(1010)));
    }
}
