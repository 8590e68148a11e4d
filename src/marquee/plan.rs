use crate::foundation::core::Width;
use crate::foundation::error::{VitrineError, VitrineResult};

/// Scroll speed used when none is configured.
pub const DEFAULT_SPEED_PX_S: f64 = 140.0;

/// Marquee speed and spacing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MarqueeConfig {
    /// Scroll speed in pixels per second.
    pub speed_px_s: f64,
    /// Floor on one loop's duration.
    pub min_duration_s: f64,
    /// Horizontal gap between items in pixels.
    pub gap_px: f64,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            speed_px_s: DEFAULT_SPEED_PX_S,
            min_duration_s: 10.0,
            gap_px: 0.0,
        }
    }
}

impl MarqueeConfig {
    /// Reject negative or non-finite durations and gaps.
    pub fn validate(&self) -> VitrineResult<()> {
        if !self.min_duration_s.is_finite() || self.min_duration_s < 0.0 {
            return Err(VitrineError::configuration(
                "marquee min_duration_s must be finite and >= 0",
            ));
        }
        if !self.gap_px.is_finite() || self.gap_px < 0.0 {
            return Err(VitrineError::configuration(
                "marquee gap_px must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Configured speed, or the default when missing, zero or not a number.
    pub fn effective_speed(&self) -> f64 {
        if self.speed_px_s.is_finite() && self.speed_px_s > 0.0 {
            self.speed_px_s
        } else {
            DEFAULT_SPEED_PX_S
        }
    }
}

/// Duplication and timing for a seamless looping track.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct MarqueePlan {
    /// Total copies of the original item set in the track, original included. Always even.
    pub copies: usize,
    /// Width of one item set, gaps included.
    pub set_width: f64,
    /// Width of the whole track.
    pub content_width: f64,
    /// Translation per loop: half the content width.
    pub distance_px: f64,
    /// Length of one loop in seconds.
    pub duration_s: f64,
}

impl MarqueePlan {
    /// The CSS `animation` value for a keyframes name.
    pub fn animation_css(&self, keyframes: &str) -> String {
        format!("{keyframes} {}s linear infinite", self.duration_s)
    }
}

/// Plan a track whose item set is `set_width` wide inside a `container`.
pub fn plan_marquee(
    container: Width,
    set_width: f64,
    config: &MarqueeConfig,
) -> VitrineResult<MarqueePlan> {
    if !set_width.is_finite() || set_width <= 0.0 {
        return Err(VitrineError::configuration(
            "marquee track has no measurable content",
        ));
    }
    let target = 2.0 * container.px();
    let mut copies = 1usize;
    while (copies as f64) * set_width < target {
        copies += 1;
    }
    // The loop translates by half the track, so both halves must hold whole sets.
    if copies % 2 == 1 {
        copies += 1;
    }
    let content_width = copies as f64 * set_width;
    let distance_px = content_width / 2.0;
    let duration_s = (distance_px / config.effective_speed()).max(config.min_duration_s);
    Ok(MarqueePlan {
        copies,
        set_width,
        content_width,
        distance_px,
        duration_s,
    })
}

/// One marquee track: guards double initialization and recomputes once images settle and on
/// resize.
#[derive(Clone, Debug)]
pub struct Marquee {
    config: MarqueeConfig,
    item_widths: Vec<f64>,
    container: Width,
    pending_images: usize,
    mounted: bool,
    plan: Option<MarqueePlan>,
}

impl Marquee {
    /// An unmounted track with measured item widths.
    pub fn new(config: MarqueeConfig, item_widths: Vec<f64>) -> Self {
        Self {
            config,
            item_widths,
            container: Width::measured(0.0),
            pending_images: 0,
            mounted: false,
            plan: None,
        }
    }

    /// Width of one item set, gaps included.
    pub fn set_width(&self) -> f64 {
        let items: f64 = self
            .item_widths
            .iter()
            .copied()
            .filter(|w| w.is_finite() && *w > 0.0)
            .sum();
        // A gap follows every item so copies tile evenly.
        items + self.config.gap_px.max(0.0) * self.item_widths.len() as f64
    }

    /// The latest plan, if the track is animating.
    pub fn plan(&self) -> Option<&MarqueePlan> {
        self.plan.as_ref()
    }

    /// Mount the track. Returns `None` on a repeated mount, an empty track, or while images
    /// are still loading.
    pub fn mount(&mut self, container: Width, pending_images: usize) -> Option<&MarqueePlan> {
        if self.mounted || self.item_widths.is_empty() {
            return None;
        }
        self.mounted = true;
        self.container = container;
        self.pending_images = pending_images;
        if self.pending_images > 0 {
            return None;
        }
        self.recompute()
    }

    /// An image finished loading (or failed). The last one triggers the first compute.
    pub fn image_settled(&mut self, measured_widths: Option<Vec<f64>>) -> Option<&MarqueePlan> {
        if !self.mounted || self.pending_images == 0 {
            return None;
        }
        if let Some(widths) = measured_widths {
            self.item_widths = widths;
        }
        self.pending_images -= 1;
        if self.pending_images > 0 {
            return None;
        }
        self.recompute()
    }

    /// The container was resized.
    pub fn resize(&mut self, container: Width) -> Option<&MarqueePlan> {
        if !self.mounted {
            return None;
        }
        self.container = container;
        if self.pending_images > 0 {
            return None;
        }
        self.recompute()
    }

    fn recompute(&mut self) -> Option<&MarqueePlan> {
        match plan_marquee(self.container, self.set_width(), &self.config) {
            Ok(plan) => {
                self.plan = Some(plan);
                self.plan.as_ref()
            }
            Err(err) => {
                tracing::debug!(error = %err, "marquee left static");
                self.plan = None;
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/marquee/plan.rs"]
mod tests;
