use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use super::treatment::millis;
use crate::contact::DEFAULT_SUBMIT_DELAY;

/// Reservation form behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Contact", inline)]
#[serde(default)]
pub struct ContactOptions {
    /// Simulated submission time.
    #[schemars(title = "Submit Delay (ms)", range(min = 0, max = 10000))]
    pub submit_delay_ms: u64,
}

impl Default for ContactOptions {
    fn default() -> Self {
        Self {
            submit_delay_ms: millis(DEFAULT_SUBMIT_DELAY),
        }
    }
}

impl ContactOptions {
    /// Submission delay as a duration.
    #[must_use]
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}
