//! Role-specific effects applied when a watched element fires.

use tracing::{debug, warn};

use super::observer::WatchEntry;
use super::role::Roles;
use crate::animation::{Animations, CounterAnimation, Job, TypewriterAnimation};
use crate::config::MotionConfig;
use crate::css::model::SelectorList;
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::geometry::css_number;
use crate::scheduler::Scheduler;

/// Class added by reveal and stagger effects.
pub const VISIBLE: &str = "visible";
/// Class added to counters, progress bars and revealed images.
pub const ANIMATE: &str = "animate";
/// Class added to legacy section blocks.
pub const ANIMATE_IN: &str = "animate-in";

/// Everything an effect may touch.
pub struct Effects<'a> {
    pub dom: &'a mut Dom,
    pub scheduler: &'a mut Scheduler<Job>,
    pub animations: &'a mut Animations,
    pub config: &'a MotionConfig,
    pub stagger_items: &'a SelectorList,
}

impl Effects<'_> {
    /// Apply every effect for `entry`'s roles to `node`, in role order.
    pub fn apply(&mut self, node: NodeId, entry: &WatchEntry) {
        let roles = entry.roles;
        debug!(?node, ?roles, "watched element fired");

        if roles.contains(Roles::REVEAL) {
            self.add_class(node, VISIBLE);
        }
        if roles.contains(Roles::STAGGER) {
            self.stagger(node);
        }
        if roles.contains(Roles::IMAGE_REVEAL) {
            self.add_class(node, ANIMATE);
        }
        if roles.contains(Roles::COUNTER) {
            self.counter(node);
        }
        if roles.contains(Roles::PROGRESS) {
            self.progress(node);
        }
        if roles.contains(Roles::TYPEWRITER) {
            self.typewriter(node, entry.payload.as_deref().unwrap_or(""));
        }
        if roles.contains(Roles::ANIMATE_IN) {
            self.add_class(node, ANIMATE_IN);
        }
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(data) = self.dom.get_mut(node) {
            data.add_class(class);
        }
    }

    fn stagger(&mut self, container: NodeId) {
        let step = self.config.timing.stagger_step();
        let items = self.dom.select_within(container, self.stagger_items);
        for (index, item) in items.into_iter().enumerate() {
            let delay = step.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX));
            let job = Job::Reveal {
                node: item,
                class: VISIBLE.to_string(),
            };
            self.animations.timeout(self.scheduler, delay, job);
        }
    }

    fn counter(&mut self, node: NodeId) {
        let fallback = self.config.effects.default_count;
        let Some(data) = self.dom.get_mut(node) else {
            return;
        };
        let target = parse_count(data.data("count"), fallback);
        data.add_class(ANIMATE);

        let timing = &self.config.timing;
        let job = Job::Counter(CounterAnimation::new(node, target, timing.counter_steps));
        let step = timing.counter_step();
        self.animations.interval(self.scheduler, step, step, job);
    }

    fn progress(&mut self, node: NodeId) {
        let fallback = self.config.effects.default_percentage;
        let Some(data) = self.dom.get_mut(node) else {
            return;
        };
        let pct = parse_percentage(data.data("percentage"), fallback);
        data.set_style("width", format!("{}%", css_number(pct)));
        data.add_class(ANIMATE);
    }

    fn typewriter(&mut self, node: NodeId, text: &str) {
        let Some(data) = self.dom.get_mut(node) else {
            return;
        };
        data.set_style("width", "100%");

        let timing = &self.config.timing;
        let job = Job::Typewriter(TypewriterAnimation::new(node, text));
        self.animations.interval(
            self.scheduler,
            timing.typewriter_delay(),
            timing.typewriter_step(),
            job,
        );
    }
}

/// Capture and blank a typewriter's text before it is first shown.
///
/// Returns the captured text, or `None` if the node is gone.
pub fn prime_typewriter(dom: &mut Dom, node: NodeId) -> Option<String> {
    let data = dom.get_mut(node)?;
    let text = std::mem::take(&mut data.text);
    data.set_style("width", "0");
    Some(text)
}

// ---------------------------------------------------------------------------
// Attribute parsing
// ---------------------------------------------------------------------------

/// Parse `data-count` the way `parseInt` reads a base-10 prefix.
///
/// Leading whitespace and a `+` sign are accepted and trailing garbage is
/// ignored. Missing, zero, non-numeric, negative or overflowing values fall
/// back.
pub fn parse_count(raw: Option<&str>, fallback: u64) -> u64 {
    let Some(raw) = raw else {
        return fallback;
    };
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];

    match digits.parse::<u64>() {
        Ok(0) => {
            warn!(value = raw, fallback, "zero data-count, using fallback");
            fallback
        }
        Ok(_) if negative => {
            warn!(value = raw, fallback, "negative data-count, using fallback");
            fallback
        }
        Ok(value) => value,
        Err(_) => {
            warn!(value = raw, fallback, "malformed data-count, using fallback");
            fallback
        }
    }
}

/// Parse `data-percentage` as a number clamped to `0..=100`.
pub fn parse_percentage(raw: Option<&str>, fallback: f64) -> f64 {
    let Some(raw) = raw else {
        return fallback;
    };
    match raw.trim().trim_end_matches('%').trim_end().parse::<f64>() {
        Ok(value) if value.is_finite() => value.clamp(0.0, 100.0),
        _ => {
            warn!(value = raw, fallback, "malformed data-percentage, using fallback");
            fallback
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
