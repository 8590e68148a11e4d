use crate::carousel::config::TransitionStyle;

/// Track translation: `percent` of one slide width plus a pixel adjustment.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct Offset {
    /// Multiple of one slide width, negative toward later slides.
    pub percent: f64,
    /// Extra pixels, used for live drag feedback.
    pub px: f64,
}

impl Offset {
    /// Resting offset for a display index (one slide per viewport).
    pub fn for_index(display: usize) -> Self {
        Self {
            percent: -(display as f64) * 100.0,
            px: 0.0,
        }
    }

    /// Replace the pixel adjustment.
    pub fn with_px(mut self, px: f64) -> Self {
        self.px = px;
        self
    }

    /// Absolute pixel offset for a slide width.
    pub fn to_px(self, slide_width: f64) -> f64 {
        self.percent / 100.0 * slide_width + self.px
    }

    /// The CSS `transform` value.
    pub fn to_css(self) -> String {
        if self.px == 0.0 {
            format!("translateX({}%)", fmt_num(self.percent))
        } else {
            format!(
                "translateX(calc({}% + {}px))",
                fmt_num(self.percent),
                fmt_num(self.px)
            )
        }
    }
}

fn fmt_num(v: f64) -> String {
    // `-0` would otherwise print as "-0".
    if v == 0.0 {
        "0".to_string()
    } else {
        format!("{v}")
    }
}

/// Whether track moves animate.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    /// Moves apply instantly.
    Off,
    /// Moves animate.
    On {
        /// How they animate.
        style: TransitionStyle,
    },
}

/// Instruction for the host view layer, applied in emission order.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ViewCommand {
    /// Switch the track's transition.
    SetTransition {
        /// The new transition.
        transition: Transition,
    },
    /// Move the track.
    Translate {
        /// Target offset.
        offset: Offset,
    },
    /// Force one layout pass so the preceding unanimated translate is committed.
    Reflow,
}

/// Consumer of view commands, implemented by the host glue layer.
pub trait ViewSink {
    /// Apply one command.
    fn apply(&mut self, cmd: &ViewCommand);
}

/// In-memory view for tests and the CLI trace. Tracks what a viewer would perceive.
#[derive(Clone, Debug, Default)]
pub struct InMemoryView {
    animated: bool,
    offset: Offset,
    reflows: usize,
    /// Every translate with the transition state it was applied under.
    pub(crate) moves: Vec<(Offset, bool)>,
}

impl InMemoryView {
    /// A resting, unanimated view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last applied offset.
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Whether the transition is currently on.
    pub fn is_animated(&self) -> bool {
        self.animated
    }

    /// Forced layout passes so far.
    pub fn reflows(&self) -> usize {
        self.reflows
    }

    /// Every translate with whether it animated.
    pub fn moves(&self) -> &[(Offset, bool)] {
        &self.moves
    }

    /// Translations a viewer would have watched animate.
    pub fn animated_moves(&self) -> impl Iterator<Item = Offset> + '_ {
        self.moves.iter().filter(|(_, a)| *a).map(|(o, _)| *o)
    }
}

impl ViewSink for InMemoryView {
    fn apply(&mut self, cmd: &ViewCommand) {
        match cmd {
            ViewCommand::SetTransition { transition } => {
                self.animated = matches!(transition, Transition::On { .. });
            }
            ViewCommand::Translate { offset } => {
                self.offset = *offset;
                self.moves.push((*offset, self.animated));
            }
            ViewCommand::Reflow => self.reflows += 1,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/carousel/view.rs"]
mod tests;
