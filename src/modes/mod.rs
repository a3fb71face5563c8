pub mod headless;

pub use headless::{HeadlessMode, RunOutcome, RunReport};
