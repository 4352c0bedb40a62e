//! # examtrack-realtime
//!
//! The WebSocket engine behind live exam sessions: a registry of connected
//! participants, the session coordinator implementing the timer protocol,
//! and the notice delivery path shared by immediate and scheduled notices.
//!
//! Transport is deliberately out of scope. The HTTP layer owns the socket
//! and feeds raw text frames into [`coordinator::SessionCoordinator`];
//! everything here operates on serialized JSON strings and per-connection
//! mpsc senders.

pub mod connection;
pub mod coordinator;
pub mod message;
pub mod notice;
pub mod registry;

#[cfg(test)]
pub(crate) mod testutil;

pub use connection::ConnectionHandle;
pub use coordinator::{ConnectionState, SessionCoordinator};
pub use notice::NoticeDispatcher;
pub use registry::ConnectionRegistry;
