//! Scheduled notice dispatcher configuration.

use serde::{Deserialize, Serialize};

/// Background dispatcher configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Interval between scans for due scheduled notices, in seconds.
    #[serde(default = "default_dispatch_interval")]
    pub dispatch_interval_seconds: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            dispatch_interval_seconds: default_dispatch_interval(),
        }
    }
}

fn default_dispatch_interval() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_interval_is_ten_seconds() {
        assert_eq!(WorkerConfig::default().dispatch_interval_seconds, 10);
    }
}
