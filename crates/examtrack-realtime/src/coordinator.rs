//! The exam session protocol state machine.
//!
//! One [`SessionCoordinator`] is shared by every connection task. Each task
//! owns its [`ConnectionState`] and feeds inbound frames through
//! [`SessionCoordinator::handle_frame`], which returns exactly one reply
//! frame per inbound frame. Side effects (timer mutations, fan-out to the
//! opposite role) happen inside the handler; the connection stays open on
//! every protocol error.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, info};

use examtrack_auth::JwtDecoder;
use examtrack_core::result::AppResult;
use examtrack_entity::role::Role;
use examtrack_entity::store::TimerStore;
use examtrack_entity::timer::NewExamTimer;

use crate::connection::ConnectionHandle;
use crate::message::{ClientMessage, ErrorReply, ServerMessage};
use crate::registry::ConnectionRegistry;

/// Authentication state of a single connection.
///
/// The only in-memory state per connection; all session semantics live in
/// the persisted timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Channel is open but no valid token has been presented yet.
    Unauthenticated,
    /// Token accepted; the connection is registered under its role key.
    Authenticated {
        /// Participant id from the token claims.
        user_id: i64,
        /// Participant role from the token claims.
        role: Role,
    },
}

/// Routes inbound protocol messages and coordinates timer state with
/// teacher/student fan-out.
pub struct SessionCoordinator {
    registry: Arc<ConnectionRegistry>,
    timers: Arc<dyn TimerStore>,
    decoder: Arc<JwtDecoder>,
}

impl std::fmt::Debug for SessionCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCoordinator").finish()
    }
}

impl SessionCoordinator {
    /// Creates a coordinator over an explicitly injected registry and
    /// timer store.
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        timers: Arc<dyn TimerStore>,
        decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            registry,
            timers,
            decoder,
        }
    }

    /// The registry this coordinator registers connections into.
    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Processes one inbound frame and returns the reply frame.
    ///
    /// `sender` is the connection's outbound channel; it is captured into
    /// the registry on successful authentication so later fan-outs can
    /// reach this connection.
    pub async fn handle_frame(
        &self,
        state: &mut ConnectionState,
        sender: &mpsc::Sender<String>,
        raw: &str,
    ) -> String {
        let message = match serde_json::from_str::<ClientMessage>(raw) {
            Ok(message) => message,
            Err(_) => return ErrorReply::frame("Invalid message format"),
        };

        match (*state, message) {
            (ConnectionState::Unauthenticated, ClientMessage::Auth { token }) => {
                self.authenticate(state, sender, &token).await
            }
            (ConnectionState::Unauthenticated, _) => ErrorReply::frame("Not authenticated"),
            (ConnectionState::Authenticated { .. }, ClientMessage::Auth { .. }) => {
                ErrorReply::frame("Already authenticated")
            }
            (
                ConnectionState::Authenticated {
                    user_id,
                    role: Role::Student,
                },
                message,
            ) => self.handle_student(user_id, message).await,
            (
                ConnectionState::Authenticated {
                    user_id,
                    role: Role::Teacher,
                },
                message,
            ) => self.handle_teacher(user_id, message).await,
        }
    }

    /// Removes an authenticated connection from the registry.
    ///
    /// Called by the transport task on read error or close. No compensating
    /// timer mutation happens here: an abruptly disconnected student's
    /// timer stays active until a future `end` or teacher pause.
    pub async fn disconnect(&self, state: &ConnectionState) {
        if let ConnectionState::Authenticated { user_id, role } = state {
            self.registry.unregister(&role.connection_key(*user_id)).await;
        }
    }

    async fn authenticate(
        &self,
        state: &mut ConnectionState,
        sender: &mpsc::Sender<String>,
        token: &str,
    ) -> String {
        let claims = match self.decoder.decode(token) {
            Ok(claims) => claims,
            Err(err) => return ErrorReply::frame(err.message),
        };

        let Some(role) = claims.participant_role() else {
            return ErrorReply::frame("Unsupported role for realtime sessions");
        };

        let handle = Arc::new(ConnectionHandle::new(claims.user_id, role, sender.clone()));
        self.registry.register(handle).await;
        *state = ConnectionState::Authenticated {
            user_id: claims.user_id,
            role,
        };

        info!(user_id = claims.user_id, role = %role, "realtime channel authenticated");

        ServerMessage::AuthSuccess {
            message: "Authentication successful".to_string(),
            user_id: claims.user_id,
            user_type: role.as_str().to_string(),
            role: role.as_u8(),
        }
        .frame()
    }

    async fn handle_student(&self, student_id: i64, message: ClientMessage) -> String {
        let result = match message {
            ClientMessage::Start { exam_id } => self.student_start(student_id, exam_id).await,
            ClientMessage::Update { exam_id, time_used } => {
                self.student_update(student_id, exam_id, time_used).await
            }
            ClientMessage::End { exam_id, time_used } => {
                self.student_end(student_id, exam_id, time_used).await
            }
            _ => return ErrorReply::frame("Unknown message type"),
        };
        reply_frame(result)
    }

    async fn handle_teacher(&self, teacher_id: i64, message: ClientMessage) -> String {
        let result = match message {
            ClientMessage::GetExamStatus { exam_id } => self.exam_status(exam_id).await,
            ClientMessage::GetStudentStatus { student_id } => self.student_status(student_id).await,
            ClientMessage::Broadcast { exam_id, message } => {
                self.teacher_broadcast(teacher_id, exam_id, message).await
            }
            ClientMessage::Pause { exam_id } => self.teacher_pause(teacher_id, exam_id).await,
            ClientMessage::Resume { exam_id } => self.teacher_resume(teacher_id, exam_id).await,
            _ => return ErrorReply::frame("Unknown message type"),
        };
        reply_frame(result)
    }

    async fn student_start(&self, student_id: i64, exam_id: i64) -> AppResult<ServerMessage> {
        let now = Utc::now().timestamp();
        let timer = self
            .timers
            .create(NewExamTimer {
                exam_id,
                student_id,
                start_time: now,
            })
            .await?;

        debug!(exam_id, student_id, "exam timer started");

        self.notify_teachers(ServerMessage::StudentStart {
            exam_id,
            student_id,
            start_time: timer.start_time,
            timestamp: now,
        })
        .await;

        Ok(ServerMessage::StartAck {
            exam_id,
            start_time: timer.start_time,
            message: "Timer started".to_string(),
        })
    }

    async fn student_update(
        &self,
        student_id: i64,
        exam_id: i64,
        time_used: i32,
    ) -> AppResult<ServerMessage> {
        let Some(mut timer) = self.timers.find_active(exam_id, student_id).await? else {
            return Err(examtrack_core::AppError::not_found("Timer not found"));
        };
        timer.time_used = time_used;
        self.timers.save(&timer).await?;

        self.notify_teachers(ServerMessage::Update {
            exam_id,
            student_id,
            time_used,
            timestamp: Utc::now().timestamp(),
        })
        .await;

        Ok(ServerMessage::UpdateAck {
            exam_id,
            time_used,
            message: "Progress recorded".to_string(),
        })
    }

    async fn student_end(
        &self,
        student_id: i64,
        exam_id: i64,
        time_used: i32,
    ) -> AppResult<ServerMessage> {
        let Some(mut timer) = self.timers.find_active(exam_id, student_id).await? else {
            return Err(examtrack_core::AppError::not_found("Timer not found"));
        };
        timer.time_used = time_used;
        timer.is_active = false;
        self.timers.save(&timer).await?;

        info!(exam_id, student_id, time_used, "exam attempt finished");

        self.notify_teachers(ServerMessage::StudentEnd {
            exam_id,
            student_id,
            time_used,
            timestamp: Utc::now().timestamp(),
        })
        .await;

        Ok(ServerMessage::EndAck {
            exam_id,
            time_used,
            message: "Timer stopped".to_string(),
        })
    }

    async fn exam_status(&self, exam_id: i64) -> AppResult<ServerMessage> {
        let now = Utc::now().timestamp();
        // Stored time_used is only as fresh as each student's last update;
        // live views always recompute from the start timestamp.
        let timers: Vec<_> = self
            .timers
            .find_all_active(exam_id)
            .await?
            .into_iter()
            .map(|t| t.with_live_time_used(now))
            .collect();

        Ok(ServerMessage::ExamStatus {
            exam_id,
            count: timers.len(),
            timers,
            message: "Active timers".to_string(),
        })
    }

    async fn student_status(&self, student_id: i64) -> AppResult<ServerMessage> {
        let timers = self.timers.find_by_student(student_id).await?;
        Ok(ServerMessage::StudentStatus {
            student_id,
            count: timers.len(),
            timers,
            message: "Timer history".to_string(),
        })
    }

    async fn teacher_broadcast(
        &self,
        teacher_id: i64,
        exam_id: i64,
        message: String,
    ) -> AppResult<ServerMessage> {
        // Fan-out is deliberately unscoped: every connected student
        // receives the message, not just those taking this exam.
        let frame = ServerMessage::Broadcast {
            message,
            timestamp: Utc::now().timestamp(),
        }
        .frame();
        let sent = self.registry.broadcast_to_role(Role::Student, &frame).await;

        info!(teacher_id, exam_id, sent, "teacher broadcast delivered");

        Ok(ServerMessage::BroadcastAck {
            exam_id,
            message: "Broadcast sent".to_string(),
        })
    }

    async fn teacher_pause(&self, teacher_id: i64, exam_id: i64) -> AppResult<ServerMessage> {
        let affected = self.timers.bulk_set_active(exam_id, true, false).await?;

        info!(teacher_id, exam_id, affected, "exam paused");

        let frame = ServerMessage::Pause {
            message: "The exam has been paused".to_string(),
            timestamp: Utc::now().timestamp(),
        }
        .frame();
        self.registry.broadcast_to_role(Role::Student, &frame).await;

        Ok(ServerMessage::PauseAck {
            exam_id,
            message: "Exam paused".to_string(),
        })
    }

    async fn teacher_resume(&self, teacher_id: i64, exam_id: i64) -> AppResult<ServerMessage> {
        // Reactivates every inactive timer of the exam, including attempts
        // that already ended. Kept as the documented protocol behavior; a
        // distinct paused state would change score-affecting semantics.
        let affected = self.timers.bulk_set_active(exam_id, false, true).await?;

        info!(teacher_id, exam_id, affected, "exam resumed");

        let frame = ServerMessage::Resume {
            message: "The exam has been resumed".to_string(),
            timestamp: Utc::now().timestamp(),
        }
        .frame();
        self.registry.broadcast_to_role(Role::Student, &frame).await;

        Ok(ServerMessage::ResumeAck {
            exam_id,
            message: "Exam resumed".to_string(),
        })
    }

    async fn notify_teachers(&self, message: ServerMessage) {
        self.registry
            .broadcast_to_role(Role::Teacher, &message.frame())
            .await;
    }
}

fn reply_frame(result: AppResult<ServerMessage>) -> String {
    match result {
        Ok(message) => message.frame(),
        Err(err) => ErrorReply::frame(err.message),
    }
}
