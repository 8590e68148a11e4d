//! Vitrine is a headless engine for the interactive parts of a marketing page.
//!
//! Every component is driven by the host: it forwards input events and a monotonic clock, and
//! applies the commands the engine emits. Nothing here touches a DOM or spawns timers.
//!
//! - A looping [`Carousel`] with autoplay, swipe and seamless clone wrapping
//! - A [`RevealEngine`] for one-shot scroll reveals
//! - [`plan_marquee`] for seamless logo strips
//! - [`LeadSubmitter`] for validated lead capture, plus conversion reporting
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Conversion reporting and click-to-call.
pub mod analytics;
/// Looping slide carousel.
pub mod carousel;
/// FAQ accordion.
pub mod faq;
/// Lead form validation and submission.
pub mod lead;
/// Logo strip planning.
pub mod marquee;
/// Scroll reveal.
pub mod reveal;
/// Page-level configuration.
pub mod site;

pub use crate::foundation::core::{Millis, Point, Vec2, Width};
pub use crate::foundation::error::{VitrineError, VitrineResult};

pub use crate::analytics::call_link::{CallLink, Navigate};
pub use crate::analytics::conversion::{
    ConversionEvent, ConversionShim, ConversionSink, InMemoryConversions, log_cta_click,
};
pub use crate::carousel::autoplay::{AutoplayState, PauseReasons};
pub use crate::carousel::config::{CarouselConfig, DragThreshold, LoopMode, TransitionStyle};
pub use crate::carousel::drag::DragMove;
pub use crate::carousel::engine::{Carousel, CarouselRoot, init_carousels};
pub use crate::carousel::model::{CarouselState, Slide, SlideChange, SlideId};
pub use crate::carousel::view::{InMemoryView, Offset, Transition, ViewCommand, ViewSink};
pub use crate::faq::accordion::{Accordion, FaqItem};
pub use crate::lead::form::{Lead, LeadForm, LeadValidationError};
pub use crate::lead::submit::{
    FormStatus, LeadFormConfig, LeadSubmitter, LeadTransport, StatusTone, TransportRequest,
    TransportResponse,
};
pub use crate::marquee::plan::{Marquee, MarqueeConfig, MarqueePlan, plan_marquee};
pub use crate::reveal::engine::{Intersection, Reveal, RevealConfig, RevealEngine, RevealTarget};
pub use crate::site::config::{AnalyticsConfig, SiteConfig};
