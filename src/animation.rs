//! Scheduled jobs: the work timers perform when they fire.
//!
//! A [`Job`] is the payload stored in the page's
//! [`Scheduler`](crate::scheduler::Scheduler). Repeating jobs (counters,
//! typewriters) keep their progress inline and report [`Flow::Done`] once
//! finished. A job whose node has left the DOM finishes silently.

use std::time::Duration;

use slotmap::SecondaryMap;

use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::scheduler::{Flow, Scheduler, TaskId};

// ---------------------------------------------------------------------------
// CounterAnimation
// ---------------------------------------------------------------------------

/// Counts a node's text from 0 up to `target` over a fixed number of steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterAnimation {
    pub node: NodeId,
    pub target: u64,
    steps: u32,
    step: u32,
}

impl CounterAnimation {
    /// A counter that reaches `target` after `steps` ticks (at least one).
    pub fn new(node: NodeId, target: u64, steps: u32) -> Self {
        Self {
            node,
            target,
            steps: steps.max(1),
            step: 0,
        }
    }

    /// Displayed value after `k` ticks: `floor(target * k / steps)`, capped at
    /// `target`.
    pub fn value_at(&self, k: u32) -> u64 {
        let k = k.min(self.steps);
        let scaled = u128::from(self.target) * u128::from(k) / u128::from(self.steps);
        u64::try_from(scaled).unwrap_or(self.target)
    }

    /// Ticks taken so far.
    pub fn step(&self) -> u32 {
        self.step
    }

    fn tick(&mut self, dom: &mut Dom) -> Flow {
        let Some(node) = dom.get_mut(self.node) else {
            return Flow::Done;
        };
        self.step += 1;
        let value = self.value_at(self.step);
        node.text = value.to_string();
        if self.step >= self.steps || value >= self.target {
            Flow::Done
        } else {
            Flow::Continue
        }
    }
}

// ---------------------------------------------------------------------------
// TypewriterAnimation
// ---------------------------------------------------------------------------

/// Appends one character of `text` per tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypewriterAnimation {
    pub node: NodeId,
    text: Vec<char>,
    typed: usize,
}

impl TypewriterAnimation {
    pub fn new(node: NodeId, text: &str) -> Self {
        Self {
            node,
            text: text.chars().collect(),
            typed: 0,
        }
    }

    /// Characters written so far.
    pub fn typed(&self) -> usize {
        self.typed
    }

    fn tick(&mut self, dom: &mut Dom) -> Flow {
        let Some(node) = dom.get_mut(self.node) else {
            return Flow::Done;
        };
        let Some(&c) = self.text.get(self.typed) else {
            return Flow::Done;
        };
        node.text.push(c);
        self.typed += 1;
        if self.typed >= self.text.len() {
            Flow::Done
        } else {
            Flow::Continue
        }
    }
}

// ---------------------------------------------------------------------------
// Job
// ---------------------------------------------------------------------------

/// Work performed by a scheduled task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    /// Add a class (stagger items).
    Reveal { node: NodeId, class: String },
    Counter(CounterAnimation),
    Typewriter(TypewriterAnimation),
    /// Write one inline style property (second half of a helper transition).
    SetStyle {
        node: NodeId,
        property: String,
        value: String,
    },
}

impl Job {
    /// The node this job mutates.
    pub fn node(&self) -> NodeId {
        match self {
            Job::Reveal { node, .. } | Job::SetStyle { node, .. } => *node,
            Job::Counter(counter) => counter.node,
            Job::Typewriter(typewriter) => typewriter.node,
        }
    }

    /// Perform one run against the DOM.
    pub fn run(&mut self, dom: &mut Dom) -> Flow {
        match self {
            Job::Reveal { node, class } => {
                if let Some(data) = dom.get_mut(*node) {
                    data.add_class(class.as_str());
                }
                Flow::Done
            }
            Job::Counter(counter) => counter.tick(dom),
            Job::Typewriter(typewriter) => typewriter.tick(dom),
            Job::SetStyle {
                node,
                property,
                value,
            } => {
                if let Some(data) = dom.get_mut(*node) {
                    data.set_style(property.as_str(), value.as_str());
                }
                Flow::Done
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Animations
// ---------------------------------------------------------------------------

/// Pending tasks per node, so a node's in-flight animations can be aborted.
#[derive(Debug, Default)]
pub struct Animations {
    tasks: SecondaryMap<NodeId, Vec<TaskId>>,
}

impl Animations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `job` as a one-shot after `delay` and track it under its node.
    pub fn timeout(&mut self, scheduler: &mut Scheduler<Job>, delay: Duration, job: Job) -> TaskId {
        let node = job.node();
        let id = scheduler.set_timeout(delay, job);
        self.track(scheduler, node, id);
        id
    }

    /// Schedule `job` as a repeating task and track it under its node.
    pub fn interval(
        &mut self,
        scheduler: &mut Scheduler<Job>,
        first_delay: Duration,
        period: Duration,
        job: Job,
    ) -> TaskId {
        let node = job.node();
        let id = scheduler.set_interval(first_delay, period, job);
        self.track(scheduler, node, id);
        id
    }

    fn track(&mut self, scheduler: &Scheduler<Job>, node: NodeId, id: TaskId) {
        match self.tasks.get_mut(node) {
            Some(ids) => {
                ids.retain(|&t| scheduler.is_pending(t));
                ids.push(id);
            }
            None => {
                self.tasks.insert(node, vec![id]);
            }
        }
    }

    /// Tasks still pending for `node`.
    pub fn pending(&self, scheduler: &Scheduler<Job>, node: NodeId) -> Vec<TaskId> {
        self.tasks
            .get(node)
            .map(|ids| ids.iter().copied().filter(|&t| scheduler.is_pending(t)).collect())
            .unwrap_or_default()
    }

    /// Cancel every pending task for `node`. Returns how many were cancelled.
    pub fn cancel(&mut self, scheduler: &mut Scheduler<Job>, node: NodeId) -> usize {
        self.tasks
            .remove(node)
            .map(|ids| ids.into_iter().filter(|&t| scheduler.cancel(t).is_some()).count())
            .unwrap_or(0)
    }

    /// Forget all tracking (the scheduler is cleared separately).
    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

// ===========================================================================
// Tests
// ===========================================================================
