use crate::foundation::core::{Point, Vec2};

/// What a finished gesture asks the carousel to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDecision {
    /// Go forward one slide.
    Next,
    /// Go back one slide.
    Prev,
    /// Snap back to the current slide.
    Stay,
}

/// Result of feeding one pointer-move into a session.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragMove {
    /// The gesture is horizontal-dominant; the host should cancel page scrolling.
    pub prevent_default: bool,
    /// Live horizontal offset to apply, if any.
    pub live_dx: Option<f64>,
}

/// One pointer or touch gesture, from drag start to drag end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    anchor: Point,
    delta: Vec2,
}

impl DragSession {
    /// Start a gesture at `anchor`.
    pub fn begin(anchor: Point) -> Self {
        Self {
            anchor,
            delta: Vec2::ZERO,
        }
    }

    /// Where the gesture started.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Offset of the latest pointer position from the anchor.
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Record a pointer move.
    pub fn update(&mut self, at: Point) -> DragMove {
        self.delta = at - self.anchor;
        // Ties go to the page so vertical scrolling is never swallowed.
        if self.delta.x.abs() > self.delta.y.abs() {
            DragMove {
                prevent_default: true,
                live_dx: Some(self.delta.x),
            }
        } else {
            DragMove::default()
        }
    }

    /// Decide the gesture. Only a distance strictly beyond `threshold_px` navigates.
    pub fn finish(self, threshold_px: f64) -> SwipeDecision {
        let dx = self.delta.x;
        if dx < -threshold_px {
            SwipeDecision::Next
        } else if dx > threshold_px {
            SwipeDecision::Prev
        } else {
            SwipeDecision::Stay
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/carousel/drag.rs"]
mod tests;
