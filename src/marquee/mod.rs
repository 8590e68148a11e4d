/// Marquee width and duration planning.
pub mod plan;
