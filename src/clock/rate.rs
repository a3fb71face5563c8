use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tick rate presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickRate {
    /// Slow: 5 Hz (200ms per tick)
    Slow,
    /// Medium: 10 Hz (100ms per tick)
    #[default]
    Medium,
    /// Fast: 30 Hz (~33ms per tick)
    Fast,
}

impl TickRate {
    pub fn ticks_per_second(&self) -> u32 {
        match self {
            Self::Slow => 5,
            Self::Medium => 10,
            Self::Fast => 30,
        }
    }

    /// Get the tick interval for this rate
    pub fn interval(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Medium => "medium",
            Self::Fast => "fast",
        }
    }
}

impl fmt::Display for TickRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
