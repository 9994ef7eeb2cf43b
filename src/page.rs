//! Page controller: mount, event handling, timers, teardown.
//!
//! [`Page`] owns the DOM and every piece of behavior state: the scroll
//! tracker, the trigger registry, the listener registry, the timer queue and
//! the mobile menu. Hosts feed it [`PageEvent`]s, advance its clock, and
//! drain the [`HostCommand`]s it emits.

use std::time::Duration;

use tracing::{debug, info, trace};

use crate::animation::{Animations, Job};
use crate::config::{MotionConfig, SelectorConfig};
use crate::css::model::SelectorList;
use crate::css::parser::{parse_selector_list, SelectorError};
use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;
use crate::event::command::{CommandQueue, HostCommand};
use crate::event::input::{EventKind, Key, PageEvent};
use crate::event::listener::{Behavior, Delivery, Listener, ListenerRegistry, Scope};
use crate::geometry::Viewport;
use crate::nav::{MenuInput, MenuState, MobileNav};
use crate::scheduler::{Scheduler, TaskId};
use crate::scroll::{self, HeaderStyle, ScrollTracker};
use crate::trigger::effects::{self, Effects};
use crate::trigger::{RoleSelectors, Roles, TriggerRegistry};

/// Class toggled on the nav once the page has scrolled.
pub const SCROLLED: &str = "scrolled";
/// Class marking the nav link of the current section.
pub const ACTIVE_LINK: &str = "active";
/// Class of the element [`Page::show_loading`] creates.
pub const LOADING_SPINNER: &str = "loading-spinner";

// ---------------------------------------------------------------------------
// PageError
// ---------------------------------------------------------------------------

/// Errors from building or mounting a [`Page`].
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("invalid `{field}` selector: {source}")]
    Selector {
        field: &'static str,
        #[source]
        source: SelectorError,
    },
    #[error("invalid config: {}", .0.join("; "))]
    Config(Vec<String>),
    #[error("page is already mounted")]
    AlreadyMounted,
}

// ---------------------------------------------------------------------------
// PageSelectors
// ---------------------------------------------------------------------------

/// [`SelectorConfig`] compiled once at construction.
#[derive(Debug, Clone)]
pub struct PageSelectors {
    pub roles: RoleSelectors,
    pub stagger_item: SelectorList,
    pub parallax: SelectorList,
    pub nav: SelectorList,
    pub header: SelectorList,
    pub section: SelectorList,
    pub hamburger: SelectorList,
    pub hamburger_bar: SelectorList,
    pub nav_menu: SelectorList,
    pub nav_menu_link: SelectorList,
    pub active_link: SelectorList,
    pub anchor: SelectorList,
    pub idle_hint: SelectorList,
}

impl PageSelectors {
    pub fn compile(cfg: &SelectorConfig) -> Result<Self, PageError> {
        Ok(Self {
            roles: RoleSelectors {
                reveal: compile("reveal", &cfg.reveal)?,
                stagger: compile("stagger", &cfg.stagger)?,
                image_reveal: compile("image_reveal", &cfg.image_reveal)?,
                counter: compile("counter", &cfg.counter)?,
                progress: compile("progress", &cfg.progress)?,
                typewriter: compile("typewriter", &cfg.typewriter)?,
                animate_in: compile("animate_in", &cfg.animate_in)?,
            },
            stagger_item: compile("stagger_item", &cfg.stagger_item)?,
            parallax: compile("parallax", &cfg.parallax)?,
            nav: compile("nav", &cfg.nav)?,
            header: compile("header", &cfg.header)?,
            section: compile("section", &cfg.section)?,
            hamburger: compile("hamburger", &cfg.hamburger)?,
            hamburger_bar: compile("hamburger_bar", &cfg.hamburger_bar)?,
            nav_menu: compile("nav_menu", &cfg.nav_menu)?,
            nav_menu_link: compile("nav_menu_link", &cfg.nav_menu_link)?,
            active_link: compile("active_link", &cfg.active_link)?,
            anchor: compile("anchor", &cfg.anchor)?,
            idle_hint: compile("idle_hint", &cfg.idle_hint)?,
        })
    }
}

fn compile(field: &'static str, source: &str) -> Result<SelectorList, PageError> {
    parse_selector_list(source).map_err(|source| PageError::Selector { field, source })
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Outcome of delivering one event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// A listener cancelled the host's default action (e.g. anchor jump).
    pub default_prevented: bool,
    /// Number of listeners that ran.
    pub handled: usize,
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// The page behavior engine.
#[derive(Debug)]
pub struct Page {
    dom: Dom,
    viewport: Viewport,
    config: MotionConfig,
    selectors: PageSelectors,
    scheduler: Scheduler<Job>,
    animations: Animations,
    listeners: ListenerRegistry,
    commands: CommandQueue,
    triggers: TriggerRegistry,
    tracker: ScrollTracker,
    nav: MobileNav,
    mounted: bool,
    idle_primed: bool,
}

impl Page {
    /// Wrap `dom` with the default configuration.
    pub fn new(dom: Dom) -> Result<Self, PageError> {
        Self::with_config(dom, MotionConfig::default())
    }

    /// Wrap `dom` with `config`. Fails if the config does not validate or a
    /// configured selector is invalid.
    pub fn with_config(dom: Dom, config: MotionConfig) -> Result<Self, PageError> {
        let problems = config.validate();
        if !problems.is_empty() {
            return Err(PageError::Config(problems));
        }
        let selectors = PageSelectors::compile(&config.selectors)?;
        Ok(Self {
            dom,
            viewport: Viewport::default(),
            config,
            selectors,
            scheduler: Scheduler::new(),
            animations: Animations::new(),
            listeners: ListenerRegistry::new(),
            commands: CommandQueue::new(),
            triggers: TriggerRegistry::new(),
            tracker: ScrollTracker::default(),
            nav: MobileNav::default(),
            mounted: false,
            idle_primed: false,
        })
    }

    /// Set the initial viewport (builder).
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    // -- accessors ---------------------------------------------------------

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    /// Mutable DOM access for hosts that add or move content.
    ///
    /// Newly added elements are not watched until the next mount.
    pub fn dom_mut(&mut self) -> &mut Dom {
        &mut self.dom
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn triggers(&self) -> &TriggerRegistry {
        &self.triggers
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn menu_state(&self) -> MenuState {
        self.nav.state()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Number of pending timer tasks.
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    /// Pending tasks animating `node`.
    pub fn animations_for(&self, node: NodeId) -> Vec<TaskId> {
        self.animations.pending(&self.scheduler, node)
    }

    // -- lifecycle ---------------------------------------------------------

    /// Find the page's moving parts, install listeners, and run the first
    /// intersection pass.
    pub fn mount(&mut self) -> Result<(), PageError> {
        if self.mounted {
            return Err(PageError::AlreadyMounted);
        }

        self.tracker = ScrollTracker::new(self.viewport.scroll_y);
        self.mount_nav();
        self.mount_listeners();
        self.mount_triggers();
        self.mounted = true;

        info!(
            watched = self.triggers.len(),
            listeners = self.listeners.len(),
            "page mounted"
        );

        self.refresh_intersections();
        Ok(())
    }

    fn mount_nav(&mut self) {
        let hamburger = self.dom.select_first(&self.selectors.hamburger);
        let menu = self.dom.select_first(&self.selectors.nav_menu);
        let bars = hamburger
            .map(|h| self.dom.select_within(h, &self.selectors.hamburger_bar))
            .unwrap_or_default();
        self.nav = MobileNav::new(hamburger, menu, bars);
    }

    fn mount_listeners(&mut self) {
        let click = |scope, behavior| Listener::new(EventKind::Click, scope, behavior);

        if let Some(hamburger) = self.nav.hamburger {
            self.listeners
                .add(click(Scope::Node(hamburger), Behavior::NavToggle));
        }
        for link in self.dom.select(&self.selectors.nav_menu_link) {
            self.listeners
                .add(click(Scope::Node(link), Behavior::NavLinkClose));
        }
        self.listeners
            .add(click(Scope::Document, Behavior::DismissOutside));
        self.listeners.add(Listener::new(
            EventKind::KeyDown,
            Scope::Document,
            Behavior::EscapeClose,
        ));
        for anchor in self.dom.select(&self.selectors.anchor) {
            self.listeners
                .add(click(Scope::Node(anchor), Behavior::AnchorScroll));
        }
        self.listeners.add(click(Scope::Document, Behavior::MailtoLog));

        let window = |kind, behavior| Listener::new(kind, Scope::Window, behavior);
        self.listeners
            .add(window(EventKind::Scroll, Behavior::ScrollReactors));
        if self.dom.select_first(&self.selectors.parallax).is_some() {
            self.listeners
                .add(window(EventKind::Scroll, Behavior::Parallax));
        }
        self.listeners
            .add(window(EventKind::Scroll, Behavior::Intersections));
        self.listeners
            .add(window(EventKind::Resize, Behavior::Intersections));
        self.listeners
            .add(window(EventKind::Idle, Behavior::IdleHints));
    }

    fn mount_triggers(&mut self) {
        for (node, roles) in self.selectors.roles.detect(&self.dom) {
            let payload = if roles.contains(Roles::TYPEWRITER) {
                effects::prime_typewriter(&mut self.dom, node)
            } else {
                None
            };
            self.triggers.watch(node, roles, payload);
        }
    }

    /// Remove every listener, abort every timer, and forget watched elements.
    ///
    /// Typewriter text blanked at mount is restored so a later mount can
    /// capture it again. Calling this on an unmounted page is a no-op.
    pub fn teardown(&mut self) {
        if !self.mounted {
            return;
        }
        let listeners = self.listeners.clear();
        let tasks = self.scheduler.clear();
        self.animations.clear();

        let captured: Vec<(NodeId, String)> = self
            .triggers
            .iter()
            .filter_map(|(node, entry)| entry.payload.clone().map(|text| (node, text)))
            .collect();
        for (node, text) in captured {
            if let Some(data) = self.dom.get_mut(node) {
                data.text = text;
            }
        }
        self.triggers.clear();
        self.mounted = false;

        info!(listeners, tasks, "page torn down");
    }

    // -- events ------------------------------------------------------------

    /// Deliver a host event to the installed listeners.
    ///
    /// Scroll and resize events update the viewport even when nothing is
    /// listening.
    pub fn handle_event(&mut self, event: PageEvent) -> Dispatch {
        match event {
            PageEvent::Scroll { x, y } => {
                self.viewport.scroll_x = x;
                self.viewport.scroll_y = y;
                trace!(x, y, "scroll");
            }
            PageEvent::Resize { width, height } => {
                self.viewport.width = width;
                self.viewport.height = height;
            }
            _ => {}
        }

        let mut dispatch = Dispatch::default();
        for delivery in self.listeners.route(&self.dom, &event) {
            self.run_behavior(delivery, &event, &mut dispatch);
            dispatch.handled += 1;
        }
        dispatch
    }

    fn run_behavior(&mut self, delivery: Delivery, event: &PageEvent, dispatch: &mut Dispatch) {
        match delivery.behavior {
            Behavior::NavToggle => {
                self.nav.apply(&mut self.dom, MenuInput::HamburgerClick);
            }
            Behavior::NavLinkClose => {
                self.nav.apply(&mut self.dom, MenuInput::LinkClick);
            }
            Behavior::DismissOutside => {
                let Some(target) = event.target() else {
                    return;
                };
                if self.nav.state().is_open() && !self.nav.contains(&self.dom, target) {
                    self.nav.apply(&mut self.dom, MenuInput::OutsideClick);
                }
            }
            Behavior::EscapeClose => {
                if matches!(event, PageEvent::KeyDown(Key::Escape)) {
                    self.nav.apply(&mut self.dom, MenuInput::Escape);
                }
            }
            Behavior::AnchorScroll => {
                let Some(anchor) = delivery.current_target else {
                    return;
                };
                dispatch.default_prevented = true;
                self.scroll_to_anchor(anchor);
            }
            Behavior::MailtoLog => {
                let href = event
                    .target()
                    .and_then(|t| self.dom.get(t))
                    .and_then(NodeData::href);
                if let Some(href) = href.filter(|h| h.starts_with("mailto:")) {
                    debug!(href, "email link clicked");
                }
            }
            Behavior::ScrollReactors => self.run_scroll_reactors(),
            Behavior::Parallax => self.apply_parallax(),
            Behavior::Intersections => {
                self.refresh_intersections();
            }
            Behavior::IdleHints => self.on_idle(),
        }
    }

    fn scroll_to_anchor(&mut self, anchor: NodeId) {
        let Some(id) = self
            .dom
            .get(anchor)
            .and_then(NodeData::href)
            .and_then(|href| href.strip_prefix('#'))
        else {
            return;
        };
        let Some(target) = self.dom.query_by_id(id).and_then(|t| self.dom.get(t)) else {
            debug!(id, "anchor target missing");
            return;
        };
        let top = target.rect.y - self.config.scroll.anchor_offset;
        debug!(id, top, "anchor scroll");
        self.commands.push(HostCommand::ScrollTo { top, smooth: true });
    }

    // -- scroll reactors ---------------------------------------------------

    /// Re-evaluate nav, header and active-link state for the current offset.
    pub fn run_scroll_reactors(&mut self) {
        let y = self.viewport.scroll_y;
        let limits = &self.config.scroll;
        let visibility = self.tracker.observe(y, limits.nav_hide_after);
        let scrolled = scroll::is_scrolled(y, limits.scrolled_after);

        if let Some(nav) = self
            .dom
            .select_first(&self.selectors.nav)
            .and_then(|n| self.dom.get_mut(n))
        {
            nav.set_class(SCROLLED, scrolled);
            nav.set_style("transform", visibility.transform());
        }

        let header_style = HeaderStyle::for_offset(y, limits.scrolled_after);
        if let Some(header) = self
            .dom
            .select_first(&self.selectors.header)
            .and_then(|n| self.dom.get_mut(n))
        {
            header.set_style("background", header_style.background);
            header.set_style("box-shadow", header_style.box_shadow);
        }

        let current = {
            let sections = self
                .dom
                .select(&self.selectors.section)
                .into_iter()
                .filter_map(|n| self.dom.get(n))
                .map(|data| (data.id.as_deref(), data.rect.y));
            scroll::current_section(sections, y, limits.section_lead).map(str::to_string)
        };
        for link in self.dom.select(&self.selectors.active_link) {
            if let Some(data) = self.dom.get_mut(link) {
                let active = scroll::is_active_link(data.href(), current.as_deref());
                data.set_class(ACTIVE_LINK, active);
            }
        }
    }

    /// Offset every parallax element for the current scroll position.
    pub fn apply_parallax(&mut self) {
        let y = self.viewport.scroll_y;
        let fallback = self.config.effects.default_parallax_rate;
        for node in self.dom.select(&self.selectors.parallax) {
            if let Some(data) = self.dom.get_mut(node) {
                let rate = scroll::parse_rate(data.data("rate"), fallback);
                data.set_style("transform", scroll::parallax_transform(y, rate));
            }
        }
    }

    // -- visibility trigger ------------------------------------------------

    /// Fire every watched element now intersecting the viewport. Returns the
    /// number fired.
    pub fn refresh_intersections(&mut self) -> usize {
        if !self.mounted {
            return 0;
        }
        let fired = self
            .triggers
            .collect_due(&self.dom, &self.viewport, &self.config.observer);
        for &node in &fired {
            let Some(entry) = self.triggers.get(node).cloned() else {
                continue;
            };
            Effects {
                dom: &mut self.dom,
                scheduler: &mut self.scheduler,
                animations: &mut self.animations,
                config: &self.config,
                stagger_items: &self.selectors.stagger_item,
            }
            .apply(node, &entry);
        }
        fired.len()
    }

    /// Abort in-flight animations on `node`. Returns how many were cancelled.
    pub fn cancel_animations(&mut self, node: NodeId) -> usize {
        self.animations.cancel(&mut self.scheduler, node)
    }

    // -- clock -------------------------------------------------------------

    /// Advance the virtual clock by `delta`, running due timers.
    pub fn advance(&mut self, delta: Duration) -> usize {
        let target = self.scheduler.now() + delta;
        self.advance_to(target)
    }

    /// Advance the virtual clock to `target`, running due timers.
    pub fn advance_to(&mut self, target: Duration) -> usize {
        let dom = &mut self.dom;
        self.scheduler.advance_to(target, |_, job| job.run(dom))
    }

    /// When the next timer is due.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    /// Take the host commands issued so far.
    pub fn drain_commands(&mut self) -> Vec<HostCommand> {
        self.commands.drain()
    }

    // -- helpers -----------------------------------------------------------

    /// Fade `node` in over `duration` (default from config).
    pub fn fade_in(&mut self, node: NodeId, duration: Option<Duration>) -> Option<TaskId> {
        let ms = duration_ms(duration, self.config.timing.fade_ms);
        self.transition(
            node,
            ("opacity", "0"),
            format!("opacity {ms}ms ease"),
            ("opacity", "1"),
        )
    }

    /// Slide `node` in from the left over `duration` (default from config).
    pub fn slide_in_from_left(
        &mut self,
        node: NodeId,
        duration: Option<Duration>,
    ) -> Option<TaskId> {
        let ms = duration_ms(duration, self.config.timing.slide_ms);
        self.transition(
            node,
            ("transform", "translateX(-100%)"),
            format!("transform {ms}ms cubic-bezier(0.25, 0.46, 0.45, 0.94)"),
            ("transform", "translateX(0)"),
        )
    }

    /// Pop `node` in with an overshoot over `duration` (default from config).
    pub fn bounce_in(&mut self, node: NodeId, duration: Option<Duration>) -> Option<TaskId> {
        let ms = duration_ms(duration, self.config.timing.bounce_ms);
        self.transition(
            node,
            ("transform", "scale(0)"),
            format!("transform {ms}ms cubic-bezier(0.68, -0.55, 0.265, 1.55)"),
            ("transform", "scale(1)"),
        )
    }

    fn transition(
        &mut self,
        node: NodeId,
        start: (&str, &str),
        transition: String,
        end: (&str, &str),
    ) -> Option<TaskId> {
        let data = self.dom.get_mut(node)?;
        data.set_style(start.0, start.1);
        data.set_style("transition", transition);

        let job = Job::SetStyle {
            node,
            property: end.0.to_string(),
            value: end.1.to_string(),
        };
        let settle = self.config.timing.helper_settle();
        Some(self.animations.timeout(&mut self.scheduler, settle, job))
    }

    /// Request a smooth scroll to the element with `id`. Returns `false` if
    /// there is no such element.
    pub fn smooth_scroll_to(&mut self, id: &str) -> bool {
        let Some(target) = self.dom.query_by_id(id).and_then(|t| self.dom.get(t)) else {
            return false;
        };
        let top = target.rect.y - self.config.scroll.scroll_to_offset;
        self.commands.push(HostCommand::ScrollTo { top, smooth: true });
        true
    }

    /// Append a centred loading spinner to `body`.
    pub fn show_loading(&mut self) -> Option<NodeId> {
        let body = self.dom.query_by_tag("body").into_iter().next()?;
        let spinner = NodeData::new("div")
            .with_class(LOADING_SPINNER)
            .with_style("position", "fixed")
            .with_style("top", "50%")
            .with_style("left", "50%")
            .with_style("transform", "translate(-50%, -50%)")
            .with_style("z-index", "9999");
        Some(self.dom.insert_child(body, spinner))
    }

    /// Remove a spinner from [`show_loading`](Self::show_loading) if it is
    /// still attached. Returns whether it was removed.
    pub fn hide_loading(&mut self, spinner: NodeId) -> bool {
        if self.dom.parent(spinner).is_none() {
            return false;
        }
        self.dom.remove(spinner).is_some()
    }

    /// Hint the browser about elements that animate soon. Runs once.
    pub fn on_idle(&mut self) {
        if self.idle_primed {
            return;
        }
        self.idle_primed = true;
        for node in self.dom.select(&self.selectors.idle_hint) {
            if let Some(data) = self.dom.get_mut(node) {
                data.set_style("will-change", "transform, opacity");
            }
        }
    }
}

fn duration_ms(duration: Option<Duration>, default_ms: u64) -> u128 {
    duration.map_or(u128::from(default_ms), |d| d.as_millis())
}

// ===========================================================================
// Tests
// ===========================================================================
