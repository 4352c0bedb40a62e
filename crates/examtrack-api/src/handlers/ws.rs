//! WebSocket upgrade and per-connection processing loop.
//!
//! The socket authenticates in-band: the first frame must be an `auth`
//! message, validated by the coordinator. Frames are processed strictly in
//! arrival order; the outbound half is drained by a separate forwarder
//! task fed from the connection's mpsc channel.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use examtrack_realtime::ConnectionState;

use crate::state::AppState;

/// GET /ws — upgrade to the exam session protocol.
pub async fn ws_upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(state, socket))
}

async fn handle_socket(state: AppState, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (tx, mut rx) = mpsc::channel::<String>(state.config.realtime.channel_buffer_size);

    // Forwarder: everything queued for this connection (replies and
    // fan-out frames alike) goes out through one writer.
    let outbound = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if ws_tx.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    let mut conn_state = ConnectionState::Unauthenticated;

    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Text(text)) => {
                let reply = state
                    .coordinator
                    .handle_frame(&mut conn_state, &tx, text.as_str())
                    .await;
                if tx.send(reply).await.is_err() {
                    break;
                }
            }
            Ok(Message::Close(_)) => {
                debug!("websocket closed by peer");
                break;
            }
            Ok(_) => {}
            Err(err) => {
                warn!(error = %err, "websocket read error");
                break;
            }
        }
    }

    state.coordinator.disconnect(&conn_state).await;
    outbound.abort();
}
