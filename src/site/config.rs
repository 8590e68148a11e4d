use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::carousel::config::CarouselConfig;
use crate::foundation::error::{VitrineError, VitrineResult};
use crate::lead::submit::LeadFormConfig;
use crate::marquee::plan::MarqueeConfig;
use crate::reveal::engine::RevealConfig;

/// Conversion reporting settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Conversion label reported by click-to-call links.
    pub call_conversion_label: Option<String>,
    /// How long a call link waits for the provider before navigating.
    pub call_fallback_ms: u64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            call_conversion_label: None,
            call_fallback_ms: crate::analytics::call_link::CALL_FALLBACK_MS,
        }
    }
}

/// Page-wide defaults for every interactive component.
///
/// Every section is optional in JSON; missing sections take their defaults.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Defaults for every carousel; roots override them per instance.
    pub carousel: CarouselConfig,
    /// Scroll reveal.
    pub reveal: RevealConfig,
    /// Logo strips.
    pub marquee: MarqueeConfig,
    /// Lead form.
    pub lead: LeadFormConfig,
    /// Conversions.
    pub analytics: AnalyticsConfig,
}

impl SiteConfig {
    /// Parse and validate JSON text.
    pub fn from_json_str(s: &str) -> VitrineResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| VitrineError::serde(format!("parse site config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate JSON from a reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> VitrineResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| VitrineError::serde(format!("parse site config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> VitrineResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            VitrineError::configuration(format!("open site config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Validate every section.
    pub fn validate(&self) -> VitrineResult<()> {
        self.carousel.validate()?;
        self.reveal.validate()?;
        self.marquee.validate()?;
        self.lead.validate()?;
        Ok(())
    }

    /// Apply the visitor's `prefers-reduced-motion` setting to every motion-aware section.
    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.carousel.reduced_motion = reduced;
        self.reveal.reduced_motion = reduced;
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/site/config.rs"]
mod tests;
