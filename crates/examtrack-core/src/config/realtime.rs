//! Real-time channel configuration.

use serde::{Deserialize, Serialize};

/// Real-time (WebSocket) channel configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Outbound frame buffer size per connection.
    ///
    /// When a peer stops reading, frames beyond this buffer are dropped
    /// rather than blocking fan-out to other recipients.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            channel_buffer_size: default_channel_buffer(),
        }
    }
}

fn default_channel_buffer() -> usize {
    256
}
