use crate::carousel::config::LoopMode;

/// Stable identity of a slide, usually the id or index attribute of its root element.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct SlideId(pub String);

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// An opaque content unit owned by a carousel.
pub struct Slide {
    /// Stable identity.
    pub id: SlideId,
    /// Host-defined payload (markup reference, review text, ...). Never inspected.
    #[serde(default)]
    pub content: serde_json::Value,
}

impl Slide {
    /// A slide with no payload.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: SlideId(id.into()),
            content: serde_json::Value::Null,
        }
    }

    /// Attach a host payload.
    pub fn with_content(mut self, content: serde_json::Value) -> Self {
        self.content = content;
        self
    }
}

/// One entry of the padded list a host renders. Clones only appear in [`LoopMode::CloneWrap`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderedSlide<'a> {
    /// The slide shown at this position.
    pub slide: &'a Slide,
    /// Position of that slide in the real list.
    pub real_index: usize,
    /// Whether this entry is a wrap clone.
    pub is_clone: bool,
}

/// Snapshot of the observable carousel state.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CarouselState {
    /// Number of slides, clones excluded.
    pub real_count: usize,
    /// Index into the rendered list.
    pub display_index: usize,
    /// 0-based, clone-adjusted slide number.
    pub real_index: usize,
    /// Configured end-of-list behaviour.
    pub mode: LoopMode,
    /// A drag is in progress.
    pub is_dragging: bool,
    /// Live horizontal drag offset in pixels.
    pub drag_delta: f64,
    /// Autoplay is running.
    pub is_autoplaying: bool,
}

/// Notification delivered to slide-change listeners (dot indicators and the like).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SlideChange {
    /// 0-based, clone-adjusted slide number.
    pub real_index: usize,
    /// Index into the rendered list.
    pub display_index: usize,
}
