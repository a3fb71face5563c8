//! Tick timing, decoupled from rendering.

pub mod rate;
pub mod scheduler;

pub use rate::TickRate;
pub use scheduler::{Fire, SchedulerState, TickScheduler, format_elapsed};
