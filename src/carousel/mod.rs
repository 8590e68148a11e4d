//! Carousel engine: position resolution, edge snapping, autoplay, drag and resize handling.

/// Recurring tick and pause bookkeeping.
pub mod autoplay;
/// Carousel options parsed from data attributes or JSON.
pub mod config;
/// Pointer drag tracking.
pub mod drag;
/// The carousel state machine.
pub mod engine;
/// Slides and state snapshots.
pub mod model;
/// Display/real index arithmetic.
pub mod position;
/// Scripted event replay for the CLI.
pub mod script;
/// Track offset commands and sinks.
pub mod view;
