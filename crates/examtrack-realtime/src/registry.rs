//! Connection registry keyed by `student_<id>` / `teacher_<id>`.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use examtrack_core::error::AppError;
use examtrack_core::result::AppResult;
use examtrack_entity::role::Role;

use crate::connection::ConnectionHandle;

/// All currently authenticated WebSocket connections.
///
/// A single `RwLock` over the key map: fan-out and lookups take the read
/// lock, membership changes the write lock. At most one connection exists
/// per key; a participant reconnecting replaces their previous entry.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: RwLock<HashMap<String, Arc<ConnectionHandle>>>,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an authenticated connection under its key.
    ///
    /// Last writer wins: an existing handle for the same key is dropped,
    /// so the stale connection stops receiving registry-routed frames.
    /// Its socket stays open until its own transport task ends.
    pub async fn register(&self, handle: Arc<ConnectionHandle>) {
        let key = handle.key.clone();
        let replaced = self
            .connections
            .write()
            .await
            .insert(key.clone(), handle)
            .is_some();
        info!(key = %key, replaced, "connection registered");
    }

    /// Removes a connection by key. Returns whether an entry existed.
    pub async fn unregister(&self, key: &str) -> bool {
        let removed = self.connections.write().await.remove(key).is_some();
        if removed {
            info!(key = %key, "connection unregistered");
        }
        removed
    }

    /// Sends a frame to one participant.
    pub async fn send_to(&self, key: &str, frame: String) -> AppResult<()> {
        let connections = self.connections.read().await;
        let handle = connections
            .get(key)
            .ok_or_else(|| AppError::not_connected(format!("{key} is not connected")))?;
        if !handle.send(frame) {
            return Err(AppError::not_connected(format!(
                "{key} connection is unreachable"
            )));
        }
        Ok(())
    }

    /// Fans a frame out to every connection of a role, best-effort.
    ///
    /// Returns the number of connections that accepted the frame.
    pub async fn broadcast_to_role(&self, role: Role, frame: &str) -> usize {
        let connections = self.connections.read().await;
        let mut sent = 0;
        for handle in connections.values().filter(|h| h.role == role) {
            if handle.send(frame.to_string()) {
                sent += 1;
            } else {
                warn!(key = %handle.key, "broadcast frame not delivered");
            }
        }
        debug!(role = %role, sent, "broadcast fan-out complete");
        sent
    }

    /// Whether a participant currently has a connection.
    pub async fn is_connected(&self, key: &str) -> bool {
        self.connections.read().await.contains_key(key)
    }

    /// Ids of all connected participants with the given role.
    pub async fn online_ids(&self, role: Role) -> Vec<i64> {
        let connections = self.connections.read().await;
        let mut ids: Vec<i64> = connections
            .values()
            .filter(|h| h.role == role)
            .map(|h| h.user_id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Total number of registered connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn handle(user_id: i64, role: Role) -> (Arc<ConnectionHandle>, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(8);
        (Arc::new(ConnectionHandle::new(user_id, role, tx)), rx)
    }

    #[tokio::test]
    async fn test_send_to_registered_connection() {
        let registry = ConnectionRegistry::new();
        let (h, mut rx) = handle(1, Role::Student);
        registry.register(h).await;

        registry.send_to("student_1", "hello".to_string()).await.unwrap();
        assert_eq!(rx.recv().await.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_send_to_absent_key_is_not_connected() {
        let registry = ConnectionRegistry::new();
        let err = registry
            .send_to("student_9", "hello".to_string())
            .await
            .unwrap_err();
        assert_eq!(err.kind, examtrack_core::error::ErrorKind::NotConnected);
    }

    #[tokio::test]
    async fn test_register_same_key_replaces_previous() {
        let registry = ConnectionRegistry::new();
        let (old, mut old_rx) = handle(1, Role::Student);
        let (new, mut new_rx) = handle(1, Role::Student);
        registry.register(old).await;
        registry.register(new).await;
        assert_eq!(registry.connection_count().await, 1);

        registry.send_to("student_1", "frame".to_string()).await.unwrap();
        assert_eq!(new_rx.recv().await.as_deref(), Some("frame"));
        // The replaced handle gets no registry traffic.
        assert!(old_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_broadcast_reaches_only_the_given_role() {
        let registry = ConnectionRegistry::new();
        let (s1, mut s1_rx) = handle(1, Role::Student);
        let (s2, mut s2_rx) = handle(2, Role::Student);
        let (t1, mut t1_rx) = handle(3, Role::Teacher);
        registry.register(s1).await;
        registry.register(s2).await;
        registry.register(t1).await;

        let sent = registry.broadcast_to_role(Role::Student, "ping").await;
        assert_eq!(sent, 2);
        assert_eq!(s1_rx.recv().await.as_deref(), Some("ping"));
        assert_eq!(s2_rx.recv().await.as_deref(), Some("ping"));
        assert!(t1_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_broadcast_skips_unreachable_connection() {
        let registry = ConnectionRegistry::new();
        let (alive, mut alive_rx) = handle(1, Role::Student);
        let (dead, dead_rx) = handle(2, Role::Student);
        drop(dead_rx);
        registry.register(alive).await;
        registry.register(dead).await;

        let sent = registry.broadcast_to_role(Role::Student, "ping").await;
        assert_eq!(sent, 1);
        assert_eq!(alive_rx.recv().await.as_deref(), Some("ping"));
    }

    #[tokio::test]
    async fn test_unregister_removes_connection() {
        let registry = ConnectionRegistry::new();
        let (h, _rx) = handle(7, Role::Teacher);
        registry.register(h).await;
        assert!(registry.is_connected("teacher_7").await);
        assert!(registry.unregister("teacher_7").await);
        assert!(!registry.is_connected("teacher_7").await);
        assert!(!registry.unregister("teacher_7").await);
    }

    #[tokio::test]
    async fn test_online_ids_by_role() {
        let registry = ConnectionRegistry::new();
        let (s, _s_rx) = handle(5, Role::Student);
        let (t, _t_rx) = handle(3, Role::Teacher);
        let (t2, _t2_rx) = handle(1, Role::Teacher);
        registry.register(s).await;
        registry.register(t).await;
        registry.register(t2).await;

        assert_eq!(registry.online_ids(Role::Student).await, vec![5]);
        assert_eq!(registry.online_ids(Role::Teacher).await, vec![1, 3]);
    }
}
