use std::collections::BTreeMap;

use crate::foundation::core::Width;
use crate::foundation::error::{VitrineError, VitrineResult};

/// Autoplay interval used when none is configured.
pub const DEFAULT_INTERVAL_MS: u64 = 5500;

/// How the carousel treats navigation past either end of the slide list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoopMode {
    /// Stop at the first and last slide.
    Clamped,
    /// Jump from the last slide back to the first (and vice versa) without clones.
    #[default]
    Wrap,
    /// Pad the list with one clone on each side and snap off the clone after it lands.
    CloneWrap,
}

impl LoopMode {
    /// Parse a data-attribute value, accepting a few aliases.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clamped" | "clamp" | "none" => Some(Self::Clamped),
            "wrap" | "rewind" => Some(Self::Wrap),
            "clone-wrap" | "clone_wrap" | "clonewrap" | "infinite" => Some(Self::CloneWrap),
            _ => None,
        }
    }
}

/// Transition used for animated moves. Purely descriptive, hosts map it to CSS.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TransitionStyle {
    /// Length of one animated move.
    pub duration_ms: u64,
    /// CSS timing function.
    pub easing: String,
}

impl Default for TransitionStyle {
    fn default() -> Self {
        Self {
            duration_ms: 500,
            easing: "ease".to_string(),
        }
    }
}

impl TransitionStyle {
    /// The CSS `transition` value.
    pub fn to_css(&self) -> String {
        format!("transform {}ms {}", self.duration_ms, self.easing)
    }
}

/// Swipe distance a drag must exceed to navigate: `min(max_px, viewport_fraction * width)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DragThreshold {
    /// Upper bound in pixels.
    pub max_px: f64,
    /// Share of the viewport width.
    pub viewport_fraction: f64,
}

impl Default for DragThreshold {
    fn default() -> Self {
        Self {
            max_px: 140.0,
            viewport_fraction: 0.22,
        }
    }
}

impl DragThreshold {
    /// Threshold in pixels for a viewport. An unmeasured (zero) viewport uses the cap.
    pub fn for_width(self, viewport: Width) -> f64 {
        if viewport.px() <= 0.0 {
            return self.max_px;
        }
        (self.viewport_fraction * viewport.px()).min(self.max_px)
    }
}

/// Per-instance carousel configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Advance automatically every `interval_ms`.
    pub autoplay_enabled: bool,
    /// Autoplay period.
    pub interval_ms: u64,
    /// Pause autoplay while the pointer is over the root.
    pub pause_on_hover: bool,
    /// End-of-list behaviour.
    pub loop_mode: LoopMode,
    /// Host reports `prefers-reduced-motion: reduce`.
    pub reduced_motion: bool,
    /// Animated move style.
    pub transition: TransitionStyle,
    /// Swipe distance needed to navigate.
    pub drag_threshold: DragThreshold,
    /// Quiet period before a resize is reconciled. `0` applies it on the next `advance`.
    pub resize_debounce_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay_enabled: true,
            interval_ms: DEFAULT_INTERVAL_MS,
            pause_on_hover: true,
            loop_mode: LoopMode::default(),
            reduced_motion: false,
            transition: TransitionStyle::default(),
            drag_threshold: DragThreshold::default(),
            resize_debounce_ms: 100,
        }
    }
}

impl CarouselConfig {
    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> VitrineResult<()> {
        if self.interval_ms == 0 {
            return Err(VitrineError::configuration("interval_ms must be > 0"));
        }
        if self.transition.easing.trim().is_empty() {
            return Err(VitrineError::configuration(
                "transition easing must be non-empty",
            ));
        }
        let t = self.drag_threshold;
        if !t.max_px.is_finite() || t.max_px <= 0.0 {
            return Err(VitrineError::configuration(
                "drag_threshold.max_px must be finite and > 0",
            ));
        }
        if !t.viewport_fraction.is_finite()
            || t.viewport_fraction <= 0.0
            || t.viewport_fraction > 1.0
        {
            return Err(VitrineError::configuration(
                "drag_threshold.viewport_fraction must be in (0, 1]",
            ));
        }
        Ok(())
    }

    /// Whether the autoplay timer may ever run for this configuration.
    pub fn autoplay_allowed(&self) -> bool {
        self.autoplay_enabled && !self.reduced_motion
    }

    /// Overlay root `data-*` attributes (keyed the way `element.dataset` exposes them) on top of
    /// this configuration.
    ///
    /// Recognised keys: `autoplay` (anything but `"false"` enables), `interval` (positive
    /// milliseconds, otherwise [`DEFAULT_INTERVAL_MS`]), `pauseOnHover` and `loop`.
    pub fn with_dataset(mut self, dataset: &BTreeMap<String, String>) -> Self {
        if let Some(v) = dataset.get("autoplay") {
            self.autoplay_enabled = v.trim() != "false";
        }
        if let Some(v) = dataset.get("interval") {
            self.interval_ms = parse_interval_ms(v).unwrap_or(DEFAULT_INTERVAL_MS);
        }
        if let Some(v) = dataset.get("pauseOnHover") {
            self.pause_on_hover = v.trim() != "false";
        }
        if let Some(v) = dataset.get("loop") {
            match LoopMode::parse(v) {
                Some(mode) => self.loop_mode = mode,
                None => tracing::debug!(value = %v, "ignoring unknown data-loop value"),
            }
        }
        self
    }

    /// [`CarouselConfig::default`] overlaid with `dataset`.
    pub fn from_dataset(dataset: &BTreeMap<String, String>) -> Self {
        Self::default().with_dataset(dataset)
    }
}

fn parse_interval_ms(raw: &str) -> Option<u64> {
    let n: f64 = raw.trim().parse().ok()?;
    if n.is_finite() && n >= 1.0 {
        Some(n.round() as u64)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/carousel/config.rs"]
mod tests;
