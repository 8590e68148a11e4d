use std::collections::BTreeSet;

use crate::foundation::error::{VitrineError, VitrineResult};

/// Delay between consecutive children of a reveal group.
pub const DEFAULT_STAGGER_STEP_S: f64 = 0.08;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Intersection settings and motion preference for scroll reveal.
pub struct RevealConfig {
    /// Visible ratio an element needs before it counts as intersecting.
    pub threshold: f64,
    /// Bottom root margin as a fraction of viewport height (negative shrinks the root).
    pub bottom_margin: f64,
    /// Host reports `prefers-reduced-motion: reduce`.
    pub reduced_motion: bool,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.12,
            bottom_margin: -0.08,
            reduced_motion: false,
        }
    }
}

impl RevealConfig {
    /// Reject out-of-range thresholds and non-finite margins.
    pub fn validate(&self) -> VitrineResult<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(VitrineError::configuration(
                "reveal threshold must be in [0, 1]",
            ));
        }
        if !self.bottom_margin.is_finite() {
            return Err(VitrineError::configuration(
                "reveal bottom_margin must be finite",
            ));
        }
        Ok(())
    }
}

/// Something the host observes for intersection.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RevealTarget {
    /// A lone `data-reveal` element.
    Single {
        /// Element id.
        id: String,
    },
    /// A `data-reveal-group` container; children reveal together with a stagger.
    Group {
        /// Container id.
        id: String,
        /// Child element ids in document order.
        children: Vec<String>,
        /// Stagger between children in seconds; the default step when unset.
        #[serde(default)]
        step_s: Option<f64>,
    },
}

impl RevealTarget {
    /// Id of the observed element.
    pub fn id(&self) -> &str {
        match self {
            Self::Single { id } | Self::Group { id, .. } => id,
        }
    }
}

/// Mark an element visible, optionally after a transition delay.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Reveal {
    /// Element id.
    pub element: String,
    /// Transition delay in seconds.
    pub delay_s: f64,
}

/// Intersection report from the host for one observed target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection<'a> {
    /// Id of the observed target.
    pub target: &'a str,
    /// Visible ratio, 0 to 1.
    pub ratio: f64,
}

/// One reveal engine per page. Each target reveals once and is then unobserved.
#[derive(Debug, Default)]
pub struct RevealEngine {
    config: RevealConfig,
    observed: Vec<RevealTarget>,
    revealed: BTreeSet<String>,
}

impl RevealEngine {
    /// An engine observing nothing yet.
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            observed: Vec::new(),
            revealed: BTreeSet::new(),
        }
    }

    /// The active settings.
    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// Start observing targets. Under reduced motion everything is revealed at once.
    pub fn observe(&mut self, targets: Vec<RevealTarget>) -> Vec<Reveal> {
        if self.config.reduced_motion {
            return targets
                .into_iter()
                .flat_map(|t| self.reveal_target(t, false))
                .collect();
        }
        for target in targets {
            if self.observed.iter().any(|t| t.id() == target.id()) {
                continue;
            }
            self.observed.push(target);
        }
        Vec::new()
    }

    /// Targets still waiting to reveal.
    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Whether an element has been revealed.
    pub fn is_revealed(&self, element: &str) -> bool {
        self.revealed.contains(element)
    }

    /// Handle intersection entries; targets at or above the threshold reveal and stop being
    /// observed.
    pub fn on_intersect(&mut self, entries: &[Intersection<'_>]) -> Vec<Reveal> {
        let mut out = Vec::new();
        for entry in entries {
            if entry.ratio <= 0.0 || entry.ratio < self.config.threshold {
                continue;
            }
            let Some(pos) = self.observed.iter().position(|t| t.id() == entry.target) else {
                continue;
            };
            let target = self.observed.remove(pos);
            out.extend(self.reveal_target(target, true));
        }
        out
    }

    fn reveal_target(&mut self, target: RevealTarget, stagger: bool) -> Vec<Reveal> {
        match target {
            RevealTarget::Single { id } => {
                self.revealed.insert(id.clone());
                vec![Reveal {
                    element: id,
                    delay_s: 0.0,
                }]
            }
            RevealTarget::Group {
                children, step_s, ..
            } => {
                let step = step_s
                    .filter(|s| s.is_finite() && *s > 0.0)
                    .unwrap_or(DEFAULT_STAGGER_STEP_S);
                children
                    .into_iter()
                    .enumerate()
                    .map(|(i, element)| {
                        self.revealed.insert(element.clone());
                        let delay_s = if stagger {
                            round_centis(i as f64 * step)
                        } else {
                            0.0
                        };
                        Reveal { element, delay_s }
                    })
                    .collect()
            }
        }
    }
}

fn round_centis(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/engine.rs"]
mod tests;
