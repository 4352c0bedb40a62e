//! Individual WebSocket connection handle.

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::warn;

use examtrack_entity::role::Role;

/// A handle to a single WebSocket connection.
///
/// Holds the sender half of the connection's outbound frame channel plus
/// the identity established during authentication. The receiver half is
/// drained by the transport task that owns the socket.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Registry key, `student_<id>` or `teacher_<id>`.
    pub key: String,
    /// Authenticated participant id.
    pub user_id: i64,
    /// Participant role.
    pub role: Role,
    /// When the participant authenticated.
    pub connected_at: DateTime<Utc>,
    /// Sender for serialized outbound frames.
    sender: mpsc::Sender<String>,
}

impl ConnectionHandle {
    /// Creates a handle for an authenticated participant.
    pub fn new(user_id: i64, role: Role, sender: mpsc::Sender<String>) -> Self {
        Self {
            key: role.connection_key(user_id),
            user_id,
            role,
            connected_at: Utc::now(),
            sender,
        }
    }

    /// Queues a frame for delivery, never blocking.
    ///
    /// A full buffer means the peer has stopped reading; the frame is
    /// dropped so one stuck recipient cannot stall fan-out to the rest.
    /// Returns whether the frame was accepted.
    pub fn send(&self, frame: String) -> bool {
        match self.sender.try_send(frame) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(key = %self.key, "outbound buffer full, dropping frame");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        }
    }
}
