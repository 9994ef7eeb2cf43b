//! Tunable motion parameters.
//!
//! [`MotionConfig`] gathers every threshold, delay and selector the page
//! behaviors use. `MotionConfig::default()` reproduces the stock portfolio
//! script; a TOML file can override any subset:
//!
//! ```toml
//! [observer]
//! threshold = 0.25
//!
//! [timing]
//! stagger_step_ms = 150
//!
//! [selectors]
//! counter = ".stat-number"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::geometry::Insets;

// ---------------------------------------------------------------------------
// MotionConfig
// ---------------------------------------------------------------------------

/// Top-level configuration for a [`Page`](crate::page::Page).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub observer: ObserverConfig,
    pub timing: TimingConfig,
    pub scroll: ScrollConfig,
    pub effects: EffectsConfig,
    pub selectors: SelectorConfig,
}

impl MotionConfig {
    /// Create a default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a TOML string. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Set the intersection threshold (builder).
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.observer.threshold = threshold;
        self
    }

    /// Set the observer root margin (builder).
    pub fn with_root_margin(mut self, margin: Insets) -> Self {
        self.observer.root_margin = margin;
        self
    }

    /// Set the delay between stagger items (builder).
    pub fn with_stagger_step(mut self, step: Duration) -> Self {
        self.timing.stagger_step_ms = duration_ms(step);
        self
    }

    /// Set the counter step count and spacing (builder).
    pub fn with_counter_steps(mut self, steps: u32, step: Duration) -> Self {
        self.timing.counter_steps = steps;
        self.timing.counter_step_ms = duration_ms(step);
        self
    }

    /// Replace the selector table (builder).
    pub fn with_selectors(mut self, selectors: SelectorConfig) -> Self {
        self.selectors = selectors;
        self
    }

    /// Check parameter ranges. An empty list means the config is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let threshold = self.observer.threshold;
        if !(0.0..=1.0).contains(&threshold) {
            errors.push(format!("observer.threshold must be in [0, 1], got {threshold}"));
        }
        if self.timing.counter_steps == 0 {
            errors.push("timing.counter_steps must be at least 1".to_string());
        }
        if self.timing.counter_step_ms == 0 {
            errors.push("timing.counter_step_ms must be at least 1".to_string());
        }
        if self.timing.typewriter_step_ms == 0 {
            errors.push("timing.typewriter_step_ms must be at least 1".to_string());
        }
        if !self.effects.default_parallax_rate.is_finite() {
            errors.push("effects.default_parallax_rate must be finite".to_string());
        }
        errors
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Intersection observer options shared by every watched role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverConfig {
    /// Minimum visible fraction of the element's height.
    pub threshold: f64,
    /// Grows (positive) or shrinks (negative) the viewport before testing.
    pub root_margin: Insets,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: Insets::bottom(-50.0),
        }
    }
}

/// Animation timings, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub stagger_step_ms: u64,
    pub counter_steps: u32,
    pub counter_step_ms: u64,
    pub typewriter_delay_ms: u64,
    pub typewriter_step_ms: u64,
    /// Gap between a helper's start pose and its end pose.
    pub helper_settle_ms: u64,
    pub fade_ms: u64,
    pub slide_ms: u64,
    pub bounce_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            stagger_step_ms: 100,
            counter_steps: 50,
            counter_step_ms: 40,
            typewriter_delay_ms: 500,
            typewriter_step_ms: 100,
            helper_settle_ms: 10,
            fade_ms: 500,
            slide_ms: 500,
            bounce_ms: 600,
        }
    }
}

impl TimingConfig {
    pub fn stagger_step(&self) -> Duration {
        Duration::from_millis(self.stagger_step_ms)
    }

    pub fn counter_step(&self) -> Duration {
        Duration::from_millis(self.counter_step_ms)
    }

    pub fn typewriter_delay(&self) -> Duration {
        Duration::from_millis(self.typewriter_delay_ms)
    }

    pub fn typewriter_step(&self) -> Duration {
        Duration::from_millis(self.typewriter_step_ms)
    }

    pub fn helper_settle(&self) -> Duration {
        Duration::from_millis(self.helper_settle_ms)
    }
}

/// Scroll offsets (document pixels) the reactors compare against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Nav hides when scrolling down past this offset.
    pub nav_hide_after: f64,
    /// Nav gets `scrolled` and the header its raised style past this offset.
    pub scrolled_after: f64,
    /// A section becomes current this far before its top reaches the viewport top.
    pub section_lead: f64,
    /// Header height subtracted when an anchor link scrolls to its target.
    pub anchor_offset: f64,
    /// Header height subtracted by [`Page::smooth_scroll_to`](crate::page::Page::smooth_scroll_to).
    pub scroll_to_offset: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            nav_hide_after: 500.0,
            scrolled_after: 100.0,
            section_lead: 200.0,
            anchor_offset: 70.0,
            scroll_to_offset: 80.0,
        }
    }
}

/// Fallbacks for malformed or missing data attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub default_count: u64,
    pub default_percentage: f64,
    pub default_parallax_rate: f64,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            default_count: 100,
            default_percentage: 100.0,
            default_parallax_rate: -0.5,
        }
    }
}

/// Selectors used to find the page's moving parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub reveal: String,
    pub stagger: String,
    pub stagger_item: String,
    pub image_reveal: String,
    pub counter: String,
    pub progress: String,
    pub typewriter: String,
    pub animate_in: String,
    pub parallax: String,
    pub nav: String,
    pub header: String,
    pub section: String,
    pub hamburger: String,
    pub hamburger_bar: String,
    pub nav_menu: String,
    pub nav_menu_link: String,
    pub active_link: String,
    pub anchor: String,
    pub idle_hint: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            reveal: ".animate-on-scroll, .stagger-container, .image-reveal".into(),
            stagger: ".stagger-container".into(),
            stagger_item: ".stagger-item".into(),
            image_reveal: ".image-reveal".into(),
            counter: ".counter".into(),
            progress: ".progress-fill".into(),
            typewriter: ".typewriter".into(),
            animate_in: ".project-card, .about-text, .contact-content".into(),
            parallax: ".parallax-element".into(),
            nav: "nav".into(),
            header: "header".into(),
            section: "section".into(),
            hamburger: ".hamburger".into(),
            hamburger_bar: "span".into(),
            nav_menu: ".nav-menu".into(),
            nav_menu_link: ".nav-menu li a".into(),
            active_link: ".nav-menu a".into(),
            anchor: r##"a[href^="#"]"##.into(),
            idle_hint: ".hero, nav, .cta-button".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a [`MotionConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[source] std::io::Error),
    #[error("invalid config: {0}")]
    Toml(#[source] toml::de::Error),
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_script() {
        let cfg = MotionConfig::default();
        assert_eq!(cfg.observer.threshold, 0.1);
        assert_eq!(cfg.observer.root_margin, Insets::new(0.0, 0.0, -50.0, 0.0));
        assert_eq!(cfg.timing.counter_steps, 50);
        assert_eq!(cfg.timing.counter_step(), Duration::from_millis(40));
        assert_eq!(cfg.timing.typewriter_delay(), Duration::from_millis(500));
        assert_eq!(cfg.scroll.nav_hide_after, 500.0);
        assert_eq!(cfg.effects.default_count, 100);
        assert_eq!(cfg.selectors.counter, ".counter");
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn builder_methods() {
        let cfg = MotionConfig::new()
            .with_threshold(0.5)
            .with_root_margin(Insets::ZERO)
            .with_stagger_step(Duration::from_millis(250))
            .with_counter_steps(10, Duration::from_millis(16));
        assert_eq!(cfg.observer.threshold, 0.5);
        assert_eq!(cfg.observer.root_margin, Insets::ZERO);
        assert_eq!(cfg.timing.stagger_step_ms, 250);
        assert_eq!(cfg.timing.counter_steps, 10);
        assert_eq!(cfg.timing.counter_step_ms, 16);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = MotionConfig::from_toml_str(
            r#"
            [observer]
            threshold = 0.25

            [observer.root_margin]
            bottom = -80.0

            [timing]
            stagger_step_ms = 150

            [selectors]
            counter = ".stat-number"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.observer.threshold, 0.25);
        assert_eq!(cfg.observer.root_margin.bottom, -80.0);
        assert_eq!(cfg.observer.root_margin.top, 0.0);
        assert_eq!(cfg.timing.stagger_step_ms, 150);
        assert_eq!(cfg.timing.counter_steps, 50);
        assert_eq!(cfg.selectors.counter, ".stat-number");
        assert_eq!(cfg.selectors.progress, ".progress-fill");
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(MotionConfig::from_toml_str("").unwrap(), MotionConfig::default());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let err = MotionConfig::from_toml_str("[timing]\nstagger_step_ms = \"fast\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
        assert!(err.to_string().starts_with("invalid config"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = MotionConfig::from_toml_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn validate_flags_bad_ranges() {
        let mut cfg = MotionConfig::new().with_threshold(1.5);
        cfg.timing.counter_steps = 0;
        let errors = cfg.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("observer.threshold"));
        assert!(errors[1].contains("counter_steps"));
    }
}
