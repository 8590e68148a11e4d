//! Conversion reporting and click-to-call navigation.
/// Click-to-call with a tracked fallback.
pub mod call_link;
/// Conversion events and the delivery queue.
pub mod conversion;
