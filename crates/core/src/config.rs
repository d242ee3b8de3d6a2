use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::level_filters::LevelFilter;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("reveal_threshold must be within [0, 1], got {0}")]
    RevealThreshold(f64),
    #[error("drag_click_slop must be a non-negative number, got {0}")]
    DragClickSlop(f64),
    #[error("selector `{0}` is empty")]
    EmptySelector(&'static str),
    #[error("unknown log level `{0}`")]
    LogLevel(String),
}

/// Page-wide configuration. Every field has a default, so a partial JSON
/// object only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub selectors: Selectors,
    pub classes: Classes,
    pub carousel: CarouselConfig,
    /// Fraction of an element's area that must be visible before it reveals.
    /// Elements taller than `1 / reveal_threshold` viewports never reveal.
    pub reveal_threshold: f64,
    /// Maximum parallax translation in px along each axis.
    pub parallax_strength: f64,
    /// Most verbose level forwarded to the browser console.
    pub log_level: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            classes: Classes::default(),
            carousel: CarouselConfig::default(),
            reveal_threshold: 0.2,
            parallax_strength: 24.0,
            log_level: "info".into(),
        }
    }
}

impl PageConfig {
    /// Parse and validate a JSON config object.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn log_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(ConfigError::RevealThreshold(self.reveal_threshold));
        }
        let slop = self.carousel.drag_click_slop;
        if !(slop >= 0.0 && slop.is_finite()) {
            return Err(ConfigError::DragClickSlop(slop));
        }
        self.log_filter()?;
        for (name, selector) in self.selectors.named() {
            if selector.trim().is_empty() {
                return Err(ConfigError::EmptySelector(name));
            }
        }
        Ok(())
    }
}

/// CSS selectors used to locate page elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub rail: String,
    pub card: String,
    pub prev: String,
    pub next: String,
    /// Descendants that keep their own click behaviour (card CTAs).
    pub interactive: String,
    pub anchor: String,
    pub detail_trigger: String,
    pub overlay: String,
    pub overlay_title: String,
    pub overlay_summary: String,
    pub overlay_link: String,
    pub overlay_close: String,
    pub reveal: String,
    pub timeline_node: String,
    pub parallax_layer: String,
    pub email_toggle: String,
    pub email_text: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            rail: ".project-rail".into(),
            card: ".project-card".into(),
            prev: ".rail-prev".into(),
            next: ".rail-next".into(),
            interactive: "a, button".into(),
            anchor: "a[href^=\"#\"]".into(),
            detail_trigger: ".view-details".into(),
            overlay: "#project-modal".into(),
            overlay_title: "#modal-title".into(),
            overlay_summary: "#modal-summary".into(),
            overlay_link: "#modal-link".into(),
            overlay_close: ".modal-close".into(),
            reveal: ".reveal".into(),
            timeline_node: ".timeline-node".into(),
            parallax_layer: ".hero-parallax".into(),
            email_toggle: ".email-toggle".into(),
            email_text: ".email-text".into(),
        }
    }
}

impl Selectors {
    fn named(&self) -> [(&'static str, &str); 17] {
        [
            ("rail", &self.rail),
            ("card", &self.card),
            ("prev", &self.prev),
            ("next", &self.next),
            ("interactive", &self.interactive),
            ("anchor", &self.anchor),
            ("detail_trigger", &self.detail_trigger),
            ("overlay", &self.overlay),
            ("overlay_title", &self.overlay_title),
            ("overlay_summary", &self.overlay_summary),
            ("overlay_link", &self.overlay_link),
            ("overlay_close", &self.overlay_close),
            ("reveal", &self.reveal),
            ("timeline_node", &self.timeline_node),
            ("parallax_layer", &self.parallax_layer),
            ("email_toggle", &self.email_toggle),
            ("email_text", &self.email_text),
        ]
    }
}

/// CSS classes the host toggles in response to commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Classes {
    pub active_card: String,
    pub dragging: String,
    pub revealed: String,
    pub overlay_hidden: String,
}

impl Default for Classes {
    fn default() -> Self {
        Self {
            active_card: "is-active".into(),
            dragging: "is-dragging".into(),
            revealed: "visible".into(),
            overlay_hidden: "hidden".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Horizontal travel in px after which the click ending a drag is
    /// swallowed instead of opening the card's section.
    pub drag_click_slop: f64,
    /// Animate arrow navigation.
    pub smooth: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            drag_click_slop: 5.0,
            smooth: true,
        }
    }
}
