use std::collections::BTreeMap;
use std::fmt;

use crate::carousel::autoplay::{Autoplay, AutoplayState, PauseReasons};
use crate::carousel::config::CarouselConfig;
use crate::carousel::drag::{DragMove, DragSession, SwipeDecision};
use crate::carousel::model::{CarouselState, RenderedSlide, Slide, SlideChange};
use crate::carousel::position::PositionSpace;
use crate::carousel::view::{Offset, Transition, ViewCommand, ViewSink};
use crate::foundation::core::{Millis, Point, Width};
use crate::foundation::error::{VitrineError, VitrineResult};

type Listener = Box<dyn FnMut(SlideChange)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Motion {
    Animated,
    Instant,
}

#[derive(Clone, Copy, Debug, Default)]
struct PendingResize {
    width: Option<Width>,
    due: Option<Millis>,
}

/// Auto-advancing, loop-wrapping, draggable slide viewer.
///
/// The engine is headless. Hosts forward input events, call [`Carousel::advance`] when
/// [`Carousel::next_deadline`] falls due and apply the [`ViewCommand`]s it emits (see
/// [`Carousel::drain_view`]). Animated moves must be acknowledged with
/// [`Carousel::transition_end`] so clone edges can be snapped.
///
/// Every handler that can schedule a timer takes the host clock reading at which the event
/// happened. Readings earlier than one already seen are treated as the later one.
pub struct Carousel {
    id: String,
    slides: Vec<Slide>,
    space: PositionSpace,
    config: CarouselConfig,
    display: usize,
    viewport: Width,
    now: Millis,
    autoplay: Autoplay,
    drag: Option<DragSession>,
    in_transition: bool,
    resize: PendingResize,
    outbox: Vec<ViewCommand>,
    listeners: Vec<Listener>,
    last_real: usize,
    destroyed: bool,
}

impl fmt::Debug for Carousel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carousel")
            .field("id", &self.id)
            .field("state", &self.state())
            .field("listeners", &self.listeners.len())
            .field("destroyed", &self.destroyed)
            .finish()
    }
}

impl Carousel {
    /// Build a carousel showing the first real slide, rendered without animation.
    #[tracing::instrument(skip(slides, config), fields(slides = slides.len()))]
    pub fn new(
        id: &str,
        slides: Vec<Slide>,
        config: CarouselConfig,
        viewport: Width,
        now: Millis,
    ) -> VitrineResult<Self> {
        config.validate()?;
        let space = PositionSpace::new(slides.len(), config.loop_mode)?;
        let display = space.display_for_real(0);
        let autoplay = Autoplay::new(config.autoplay_allowed(), config.interval_ms);

        let mut carousel = Self {
            id: id.to_string(),
            slides,
            space,
            config,
            display,
            viewport,
            now,
            autoplay,
            drag: None,
            in_transition: false,
            resize: PendingResize::default(),
            outbox: Vec::new(),
            listeners: Vec::new(),
            last_real: space.real_index(display),
            destroyed: false,
        };
        carousel.render(Motion::Instant);
        carousel.autoplay.start(now);
        Ok(carousel)
    }

    /// Root identifier this carousel was built for.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Effective configuration, dataset overrides included.
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Position in the padded display list.
    pub fn display_index(&self) -> usize {
        self.display
    }

    /// Clone-adjusted slide number, in `[0, real_count)`.
    pub fn real_index(&self) -> usize {
        self.space.real_index(self.display)
    }

    /// Number of real slides.
    pub fn real_count(&self) -> usize {
        self.space.real_count()
    }

    /// Length of the display list: `real_count`, plus two clones in clone-wrap mode.
    pub fn effective_slide_count(&self) -> usize {
        self.space.effective_count()
    }

    /// Whether a drag session is open.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Whether [`Carousel::destroy`] has been called.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Whether the autoplay timer is scheduled.
    pub fn autoplay_state(&self) -> AutoplayState {
        self.autoplay.state()
    }

    /// Conditions currently holding autoplay.
    pub fn pause_reasons(&self) -> PauseReasons {
        self.autoplay.paused()
    }

    /// Number of live timers (autoplay plus pending resize debounce).
    pub fn live_timer_count(&self) -> usize {
        self.autoplay.live_timers() + usize::from(self.resize.due.is_some())
    }

    /// Swipe distance a drag must exceed to navigate at the current viewport width.
    pub fn drag_threshold_px(&self) -> f64 {
        self.config.drag_threshold.for_width(self.viewport)
    }

    /// Snapshot of the observable state.
    pub fn state(&self) -> CarouselState {
        CarouselState {
            real_count: self.space.real_count(),
            display_index: self.display,
            real_index: self.real_index(),
            mode: self.space.mode(),
            is_dragging: self.drag.is_some(),
            drag_delta: self.drag.map(|d| d.delta().x).unwrap_or(0.0),
            is_autoplaying: self.autoplay.is_running(),
        }
    }

    /// The padded slide list in display order, clones included.
    pub fn rendered_slides(&self) -> Vec<RenderedSlide<'_>> {
        (0..self.space.effective_count())
            .map(|display| {
                let real_index = self.space.real_index(display);
                RenderedSlide {
                    slide: &self.slides[real_index],
                    real_index,
                    is_clone: self.space.clone_edge(display).is_some(),
                }
            })
            .collect()
    }

    /// Slide content currently in the viewport.
    pub fn visible_slide(&self) -> &Slide {
        &self.slides[self.real_index()]
    }

    /// Register a listener for real-index changes.
    pub fn on_slide_change(&mut self, listener: impl FnMut(SlideChange) + 'static) {
        if !self.destroyed {
            self.listeners.push(Box::new(listener));
        }
    }

    /// Take the view commands emitted since the last drain.
    pub fn drain_view(&mut self) -> Vec<ViewCommand> {
        std::mem::take(&mut self.outbox)
    }

    /// Apply pending view commands to `sink` in emission order.
    pub fn flush_to(&mut self, sink: &mut dyn ViewSink) {
        for cmd in self.outbox.drain(..) {
            sink.apply(&cmd);
        }
    }

    /// Earliest time the host must call [`Carousel::advance`].
    pub fn next_deadline(&self) -> Option<Millis> {
        match (self.autoplay.deadline(), self.resize.due) {
            (Some(a), Some(r)) => Some(a.min(r)),
            (a, r) => a.or(r),
        }
    }

    // ---- navigation -------------------------------------------------------

    /// Move one slide forward and restart the autoplay countdown.
    pub fn next(&mut self, now: Millis) {
        self.user_step(1, now);
    }

    /// Move one slide back and restart the autoplay countdown.
    pub fn prev(&mut self, now: Millis) {
        self.user_step(-1, now);
    }

    /// Navigate to a real slide index; out-of-range requests are resolved per loop mode.
    pub fn go_to(&mut self, real: i64, now: Millis) {
        if !self.accepts_navigation() {
            return;
        }
        self.sync_clock(now);
        self.settle_clone();
        let target = self.space.resolve(real);
        self.move_to(target);
        self.autoplay.restart(self.now);
    }

    /// Keyboard navigation. Returns whether the key was handled.
    pub fn key_down(&mut self, key: &str, now: Millis) -> bool {
        match key {
            "ArrowRight" => {
                self.next(now);
                true
            }
            "ArrowLeft" => {
                self.prev(now);
                true
            }
            _ => false,
        }
    }

    /// The host finished animating the last move.
    pub fn transition_end(&mut self) {
        if self.destroyed || self.drag.is_some() || !self.in_transition {
            return;
        }
        self.in_transition = false;
        self.settle_clone();
    }

    fn user_step(&mut self, delta: i64, now: Millis) {
        if !self.accepts_navigation() {
            return;
        }
        self.sync_clock(now);
        self.step(delta);
        self.autoplay.restart(self.now);
    }

    fn accepts_navigation(&self) -> bool {
        !self.destroyed && self.drag.is_none()
    }

    fn sync_clock(&mut self, now: Millis) {
        self.now = self.now.max(now);
    }

    fn step(&mut self, delta: i64) {
        self.settle_clone();
        let target = self.space.step(self.display, delta);
        self.move_to(target);
    }

    fn move_to(&mut self, target: usize) {
        if target == self.display {
            return;
        }
        self.display = target;
        self.render(self.animated_or_instant());
        self.notify();
    }

    fn animated_or_instant(&self) -> Motion {
        if self.config.reduced_motion {
            Motion::Instant
        } else {
            Motion::Animated
        }
    }

    /// Leave a clone position for the real slide it mirrors, without animation.
    ///
    /// Called after a transition end, and before any new move so the display index never
    /// walks past a clone.
    fn settle_clone(&mut self) {
        let Some(edge) = self.space.clone_edge(self.display) else {
            return;
        };
        let target = self.space.snap_target(edge);
        tracing::debug!(carousel = %self.id, from = self.display, to = target, "edge snap");
        self.display = target;
        self.in_transition = false;
        self.render(Motion::Instant);
    }

    fn render(&mut self, motion: Motion) {
        let offset = Offset::for_index(self.display);
        match motion {
            Motion::Animated => {
                self.outbox.push(ViewCommand::Translate { offset });
                self.in_transition = true;
            }
            Motion::Instant => {
                self.outbox.push(ViewCommand::SetTransition {
                    transition: Transition::Off,
                });
                self.outbox.push(ViewCommand::Translate { offset });
                self.outbox.push(ViewCommand::Reflow);
                self.restore_transition();
                // No transition end will arrive for an instant move.
                if self.config.reduced_motion {
                    self.settle_clone();
                }
            }
        }
    }

    fn restore_transition(&mut self) {
        if self.config.reduced_motion {
            return;
        }
        self.outbox.push(ViewCommand::SetTransition {
            transition: Transition::On {
                style: self.config.transition.clone(),
            },
        });
    }

    fn notify(&mut self) {
        let real_index = self.real_index();
        if real_index == self.last_real {
            return;
        }
        self.last_real = real_index;
        let change = SlideChange {
            real_index,
            display_index: self.display,
        };
        for listener in &mut self.listeners {
            listener(change);
        }
    }

    // ---- drag -------------------------------------------------------------

    /// Open a drag session at `at` and hold autoplay.
    pub fn pointer_down(&mut self, at: Point) {
        if self.destroyed || self.drag.is_some() {
            return;
        }
        // Stop the timer before anything moves so no tick lands mid-gesture.
        self.autoplay.pause(PauseReasons::DRAG);
        self.settle_clone();
        self.in_transition = false;
        self.drag = Some(DragSession::begin(at));
        self.outbox.push(ViewCommand::SetTransition {
            transition: Transition::Off,
        });
    }

    /// Feed a pointer move. The returned flag tells the host whether to prevent scrolling.
    pub fn pointer_move(&mut self, at: Point) -> DragMove {
        let Some(session) = self.drag.as_mut() else {
            return DragMove::default();
        };
        let mv = session.update(at);
        if let Some(dx) = mv.live_dx {
            self.outbox.push(ViewCommand::Translate {
                offset: Offset::for_index(self.display).with_px(dx),
            });
        }
        mv
    }

    /// Finish the drag: navigate past the threshold, otherwise snap back.
    pub fn pointer_up(&mut self, now: Millis) {
        let threshold = self.drag_threshold_px();
        let Some(session) = self.drag.take() else {
            return;
        };
        self.sync_clock(now);
        self.resolve_drag(session.finish(threshold));
    }

    /// Abort the gesture (touch cancel, lost capture). Always snaps back.
    pub fn pointer_cancel(&mut self, now: Millis) {
        if self.drag.take().is_some() {
            self.sync_clock(now);
            self.resolve_drag(SwipeDecision::Stay);
        }
    }

    fn resolve_drag(&mut self, decision: SwipeDecision) {
        self.restore_transition();
        let before = self.display;
        match decision {
            SwipeDecision::Next => self.step(1),
            SwipeDecision::Prev => self.step(-1),
            SwipeDecision::Stay => {}
        }
        if self.display == before {
            // Snap back from the dragged offset.
            self.render(self.animated_or_instant());
        }
        self.apply_pending_resize_if_due();
        self.autoplay.resume(PauseReasons::DRAG, self.now);
    }

    // ---- hover, focus, visibility ----------------------------------------

    /// Mouse entered the root; holds autoplay when pause-on-hover is configured.
    pub fn pointer_enter(&mut self) {
        if !self.destroyed && self.config.pause_on_hover {
            self.autoplay.pause(PauseReasons::HOVER);
        }
    }

    /// Mouse left the root.
    pub fn pointer_leave(&mut self, now: Millis) {
        if !self.destroyed {
            self.sync_clock(now);
            self.autoplay.resume(PauseReasons::HOVER, self.now);
        }
    }

    /// Focus moved inside the root.
    pub fn focus_in(&mut self) {
        if !self.destroyed {
            self.autoplay.pause(PauseReasons::FOCUS);
        }
    }

    /// Focus left the root.
    pub fn focus_out(&mut self, now: Millis) {
        if !self.destroyed {
            self.sync_clock(now);
            self.autoplay.resume(PauseReasons::FOCUS, self.now);
        }
    }

    /// Page visibility changed. Hidden pages hold autoplay.
    pub fn set_page_visible(&mut self, visible: bool, now: Millis) {
        if self.destroyed {
            return;
        }
        self.sync_clock(now);
        if visible {
            self.autoplay.resume(PauseReasons::HIDDEN, self.now);
        } else {
            self.autoplay.pause(PauseReasons::HIDDEN);
        }
    }

    // ---- time and layout --------------------------------------------------

    /// Record a viewport resize. Reconciled after the debounce period, or after the current
    /// drag resolves.
    pub fn resize(&mut self, width: Width, now: Millis) {
        if self.destroyed {
            return;
        }
        self.sync_clock(now);
        self.resize.width = Some(width);
        self.resize.due = Some(self.now.after(self.config.resize_debounce_ms));
    }

    /// Move the clock to `now`, firing due timers in deadline order.
    ///
    /// Autoplay ticks missed while the host was away collapse into a single step.
    pub fn advance(&mut self, now: Millis) {
        if self.destroyed {
            return;
        }
        loop {
            let Some(deadline) = self.next_deadline().filter(|d| *d <= now) else {
                break;
            };
            self.now = self.now.max(deadline);
            if self.resize.due == Some(deadline) {
                self.resize.due = None;
                if self.drag.is_none() {
                    self.apply_pending_resize();
                }
                continue;
            }
            if self.autoplay.poll(now) && self.accepts_navigation() {
                let before = self.display;
                self.step(1);
                if self.display == before {
                    // Clamped end or a single slide: nothing left to show.
                    self.autoplay.stop();
                }
            }
        }
        self.now = self.now.max(now);
    }

    fn apply_pending_resize_if_due(&mut self) {
        if self.resize.due.is_none() {
            self.apply_pending_resize();
        }
    }

    fn apply_pending_resize(&mut self) {
        let Some(width) = self.resize.width.take() else {
            return;
        };
        self.viewport = width;
        self.in_transition = false;
        if self.space.clone_edge(self.display).is_some() {
            self.settle_clone();
        } else {
            self.render(Motion::Instant);
        }
    }

    /// Cancel timers, drop listeners and ignore every later call.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.autoplay.disable();
        self.resize = PendingResize::default();
        self.drag = None;
        self.in_transition = false;
        self.listeners.clear();
        self.outbox.clear();
        self.destroyed = true;
        tracing::debug!(carousel = %self.id, "destroyed");
    }
}

/// A root container discovered by page initialization code.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct CarouselRoot {
    /// Element id, used in logs.
    pub id: String,
    /// Slides of the track element; `None` when the root has no track.
    #[serde(default)]
    pub track: Option<Vec<Slide>>,
    /// The root's `data-*` attributes, keyed as `element.dataset` exposes them.
    #[serde(default)]
    pub dataset: BTreeMap<String, String>,
    /// Measured viewport width in pixels; `0` when not yet laid out.
    #[serde(default)]
    pub viewport_width: f64,
}

/// Build one carousel per usable root. Roots without a track or slides, or with an invalid
/// configuration, are skipped with a warning.
#[tracing::instrument(skip_all, fields(roots = roots.len()))]
pub fn init_carousels(
    roots: Vec<CarouselRoot>,
    defaults: &CarouselConfig,
    now: Millis,
) -> Vec<Carousel> {
    let mut out = Vec::with_capacity(roots.len());
    for root in roots {
        match init_one(root, defaults, now) {
            Ok(carousel) => out.push(carousel),
            Err(err) => tracing::warn!(error = %err, "skipping carousel root"),
        }
    }
    out
}

fn init_one(root: CarouselRoot, defaults: &CarouselConfig, now: Millis) -> VitrineResult<Carousel> {
    let Some(slides) = root.track else {
        return Err(VitrineError::configuration(format!(
            "root '{}' has no track element",
            root.id
        )));
    };
    if slides.is_empty() {
        return Err(VitrineError::configuration(format!(
            "root '{}' has an empty track",
            root.id
        )));
    }
    let config = defaults.clone().with_dataset(&root.dataset);
    Carousel::new(
        &root.id,
        slides,
        config,
        Width::measured(root.viewport_width),
        now,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/carousel/engine.rs"]
mod tests;
