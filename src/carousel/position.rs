use crate::carousel::config::LoopMode;
use crate::foundation::error::{VitrineError, VitrineResult};

/// Which clone a display index points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloneEdge {
    /// Index `0`, a copy of the last real slide.
    Leading,
    /// Index `effective - 1`, a copy of the first real slide.
    Trailing,
}

/// Index arithmetic for a slide list of `real_count` slides under a [`LoopMode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionSpace {
    real_count: usize,
    mode: LoopMode,
}

impl PositionSpace {
    /// Fails on an empty slide list.
    pub fn new(real_count: usize, mode: LoopMode) -> VitrineResult<Self> {
        if real_count == 0 {
            return Err(VitrineError::configuration(
                "carousel needs at least one slide",
            ));
        }
        Ok(Self { real_count, mode })
    }

    /// Number of real slides.
    pub fn real_count(self) -> usize {
        self.real_count
    }

    /// The loop mode.
    pub fn mode(self) -> LoopMode {
        self.mode
    }

    /// Length of the rendered list, clones included.
    pub fn effective_count(self) -> usize {
        match self.mode {
            LoopMode::Clamped | LoopMode::Wrap => self.real_count,
            LoopMode::CloneWrap => self.real_count + 2,
        }
    }

    /// Map a requested slide number to a display index.
    ///
    /// In `Clamped` and `Wrap` the request is already a display index. In `CloneWrap` it is a
    /// real index, wrapped and shifted past the leading clone.
    pub fn resolve(self, requested: i64) -> usize {
        match self.mode {
            LoopMode::Clamped => {
                let last = (self.effective_count() - 1) as i64;
                requested.clamp(0, last) as usize
            }
            LoopMode::Wrap => self.wrap(requested),
            LoopMode::CloneWrap => self.wrap(requested) + 1,
        }
    }

    /// Display index reached by moving `delta` slides from `display`.
    ///
    /// `CloneWrap` moves are never wrapped so they can land on a clone; the caller snaps off it
    /// once the transition has finished.
    pub fn step(self, display: usize, delta: i64) -> usize {
        match self.mode {
            LoopMode::Clamped | LoopMode::Wrap => self.resolve(display as i64 + delta),
            LoopMode::CloneWrap => {
                let last = (self.effective_count() - 1) as i64;
                (display as i64 + delta).clamp(0, last) as usize
            }
        }
    }

    /// Real slide shown at a display index.
    pub fn real_index(self, display: usize) -> usize {
        match self.mode {
            LoopMode::Clamped | LoopMode::Wrap => display.min(self.real_count - 1),
            LoopMode::CloneWrap => (display + self.real_count - 1) % self.real_count,
        }
    }

    /// Display index of a real slide.
    pub fn display_for_real(self, real: usize) -> usize {
        self.resolve(real as i64)
    }

    /// Which clone sits at `display`, if any.
    pub fn clone_edge(self, display: usize) -> Option<CloneEdge> {
        if self.mode != LoopMode::CloneWrap {
            return None;
        }
        if display == 0 {
            Some(CloneEdge::Leading)
        } else if display == self.effective_count() - 1 {
            Some(CloneEdge::Trailing)
        } else {
            None
        }
    }

    /// Real slide position a clone stands in for.
    pub fn snap_target(self, edge: CloneEdge) -> usize {
        match edge {
            CloneEdge::Trailing => 1,
            CloneEdge::Leading => self.effective_count() - 2,
        }
    }

    fn wrap(self, requested: i64) -> usize {
        let n = self.real_count as i64;
        requested.rem_euclid(n) as usize
    }
}

#[cfg(test)]
#[path = "../../tests/unit/carousel/position.rs"]
mod tests;
