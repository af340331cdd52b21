//! Cross-crate integration flows.

pub mod attacks;
pub mod event_stream;
