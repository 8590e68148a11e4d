/// Staggered one-shot reveal tracking.
pub mod engine;
