//! Keyboard to direction mapping.

pub mod mapper;

pub use mapper::{DirectionSink, InputMapper};
