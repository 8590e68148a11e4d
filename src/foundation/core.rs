use crate::foundation::error::{VitrineError, VitrineResult};

pub use kurbo::{Point, Vec2};

/// Host clock reading in milliseconds, monotonic per page.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    /// Page load.
    pub const ZERO: Self = Self(0);

    /// This reading plus `ms`, saturating.
    pub fn after(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed since `earlier`, or 0 if it is later.
    pub fn since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// Horizontal extent of a viewport or container in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Width(f64);

impl Width {
    /// Checked constructor for configured widths.
    pub fn new(px: f64) -> VitrineResult<Self> {
        if !px.is_finite() || px < 0.0 {
            return Err(VitrineError::configuration(
                "width must be finite and >= 0",
            ));
        }
        Ok(Self(px))
    }

    /// Lossy constructor for host measurements; non-finite or negative readings become 0.
    pub fn measured(px: f64) -> Self {
        if px.is_finite() && px > 0.0 {
            Self(px)
        } else {
            Self(0.0)
        }
    }

    /// The width in CSS pixels.
    pub fn px(self) -> f64 {
        self.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
