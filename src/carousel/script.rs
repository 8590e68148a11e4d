use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::carousel::config::CarouselConfig;
use crate::carousel::engine::Carousel;
use crate::carousel::model::{CarouselState, Slide, SlideChange};
use crate::carousel::view::ViewCommand;
use crate::foundation::core::{Millis, Point, Width};
use crate::foundation::error::{VitrineError, VitrineResult};

/// A host event in a replay script.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptInput {
    /// Next button.
    Next,
    /// Previous button.
    Prev,
    /// Jump to a slide.
    GoTo {
        /// Requested slide number.
        index: i64,
    },
    /// Key pressed while the root has focus.
    Key {
        /// `KeyboardEvent.key` value.
        key: String,
    },
    /// The track's transition finished.
    TransitionEnd,
    /// Pointer pressed.
    PointerDown {
        /// Client x.
        x: f64,
        /// Client y.
        y: f64,
    },
    /// Pointer moved.
    PointerMove {
        /// Client x.
        x: f64,
        /// Client y.
        y: f64,
    },
    /// Pointer released.
    PointerUp,
    /// Gesture cancelled by the browser.
    PointerCancel,
    /// Pointer entered the root.
    PointerEnter,
    /// Pointer left the root.
    PointerLeave,
    /// Focus moved into the root.
    FocusIn,
    /// Focus left the root.
    FocusOut,
    /// Page visibility changed.
    Visibility {
        /// Whether the page is now visible.
        visible: bool,
    },
    /// Viewport resized.
    Resize {
        /// New viewport width in pixels.
        width: f64,
    },
    /// Only move the clock.
    Tick,
    /// Tear the instance down.
    Destroy,
}

/// A timed input.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScriptStep {
    /// Host clock in milliseconds. Steps must be in non-decreasing order.
    pub at: u64,
    /// What happened.
    #[serde(flatten)]
    pub input: ScriptInput,
}

/// A carousel setup plus the inputs to replay against it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Script {
    /// Instance id.
    pub id: String,
    /// Number of slides to generate.
    pub slides: usize,
    /// Initial viewport width in pixels.
    pub viewport_width: f64,
    /// Root `data-*` overrides applied on top of the site defaults.
    pub dataset: BTreeMap<String, String>,
    /// Inputs in clock order.
    pub steps: Vec<ScriptStep>,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            id: "carousel".to_string(),
            slides: 3,
            viewport_width: 800.0,
            dataset: BTreeMap::new(),
            steps: Vec::new(),
        }
    }
}

/// One line of replay output.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceLine {
    /// A view command was emitted.
    View {
        /// Clock reading.
        at: u64,
        /// The command.
        command: ViewCommand,
    },
    /// The visible slide changed.
    SlideChange {
        /// Clock reading.
        at: u64,
        /// The change.
        change: SlideChange,
    },
    /// The host should cancel the pointer move's default action.
    PreventDefault {
        /// Clock reading.
        at: u64,
    },
    /// Final state after the last step.
    State {
        /// Clock reading.
        at: u64,
        /// The snapshot.
        state: CarouselState,
    },
}

struct Recorder {
    carousel: Carousel,
    changes: Rc<RefCell<Vec<SlideChange>>>,
    lines: Vec<TraceLine>,
}

impl Recorder {
    fn collect(&mut self, at: u64) {
        for command in self.carousel.drain_view() {
            self.lines.push(TraceLine::View { at, command });
        }
        for change in self.changes.borrow_mut().drain(..) {
            self.lines.push(TraceLine::SlideChange { at, change });
        }
    }

    fn advance_to(&mut self, at: u64) {
        let target = Millis(at);
        while let Some(due) = self.carousel.next_deadline().filter(|d| *d <= target) {
            self.carousel.advance(due);
            self.collect(due.0);
        }
        self.carousel.advance(target);
        self.collect(at);
    }

    fn apply(&mut self, step: &ScriptStep) {
        let now = Millis(step.at);
        let c = &mut self.carousel;
        match &step.input {
            ScriptInput::Next => c.next(now),
            ScriptInput::Prev => c.prev(now),
            ScriptInput::GoTo { index } => c.go_to(*index, now),
            ScriptInput::Key { key } => {
                c.key_down(key, now);
            }
            ScriptInput::TransitionEnd => c.transition_end(),
            ScriptInput::PointerDown { x, y } => c.pointer_down(Point::new(*x, *y)),
            ScriptInput::PointerMove { x, y } => {
                if c.pointer_move(Point::new(*x, *y)).prevent_default {
                    self.lines.push(TraceLine::PreventDefault { at: step.at });
                }
            }
            ScriptInput::PointerUp => c.pointer_up(now),
            ScriptInput::PointerCancel => c.pointer_cancel(now),
            ScriptInput::PointerEnter => c.pointer_enter(),
            ScriptInput::PointerLeave => c.pointer_leave(now),
            ScriptInput::FocusIn => c.focus_in(),
            ScriptInput::FocusOut => c.focus_out(now),
            ScriptInput::Visibility { visible } => c.set_page_visible(*visible, now),
            ScriptInput::Resize { width } => c.resize(Width::measured(*width), now),
            ScriptInput::Tick => {}
            ScriptInput::Destroy => c.destroy(),
        }
        self.collect(step.at);
    }
}

/// Replay `script` against a fresh carousel and return everything it emitted, ending with the
/// final state.
pub fn run_script(defaults: &CarouselConfig, script: &Script) -> VitrineResult<Vec<TraceLine>> {
    let config = defaults.clone().with_dataset(&script.dataset);
    let slides = (0..script.slides)
        .map(|i| Slide::new(format!("slide-{i}")))
        .collect();
    let mut carousel = Carousel::new(
        &script.id,
        slides,
        config,
        Width::new(script.viewport_width)?,
        Millis::ZERO,
    )?;

    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    carousel.on_slide_change(move |change| sink.borrow_mut().push(change));

    let mut rec = Recorder {
        carousel,
        changes,
        lines: Vec::new(),
    };
    rec.collect(0);

    let mut last = 0;
    for step in &script.steps {
        if step.at < last {
            return Err(VitrineError::validation(format!(
                "script step at {}ms comes before {}ms",
                step.at, last
            )));
        }
        last = step.at;
        rec.advance_to(step.at);
        rec.apply(step);
    }

    let state = rec.carousel.state();
    rec.lines.push(TraceLine::State { at: last, state });
    Ok(rec.lines)
}

#[cfg(test)]
#[path = "../../tests/unit/carousel/script.rs"]
mod tests;
