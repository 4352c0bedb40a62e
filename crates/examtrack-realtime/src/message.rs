//! Wire message definitions for the exam session protocol.
//!
//! Frames are JSON objects discriminated by a `type` field with camelCase
//! payload fields, matching what the exam clients already speak. Error
//! replies are the one exception: a flat `{"error": "..."}` object with no
//! type tag.

use serde::{Deserialize, Serialize};

use examtrack_entity::timer::ExamTimer;

/// Messages sent by clients to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    /// First message on any connection: authenticate with a bearer token.
    Auth {
        /// JWT issued at login.
        token: String,
    },
    /// Student: begin the attempt clock for an exam.
    Start {
        /// Exam being started.
        exam_id: i64,
    },
    /// Student: periodic progress report.
    Update {
        /// Exam in progress.
        exam_id: i64,
        /// Client-side elapsed seconds.
        time_used: i32,
    },
    /// Student: finish the attempt.
    End {
        /// Exam being finished.
        exam_id: i64,
        /// Final elapsed seconds.
        time_used: i32,
    },
    /// Teacher: snapshot of all running attempts for an exam.
    GetExamStatus {
        /// Exam to inspect.
        exam_id: i64,
    },
    /// Teacher: one student's full attempt history.
    GetStudentStatus {
        /// Student to inspect.
        student_id: i64,
    },
    /// Teacher: push a message to connected students.
    Broadcast {
        /// Exam the message concerns.
        exam_id: i64,
        /// Message body.
        message: String,
    },
    /// Teacher: suspend all running attempts for an exam.
    Pause {
        /// Exam to pause.
        exam_id: i64,
    },
    /// Teacher: reactivate suspended attempts for an exam.
    Resume {
        /// Exam to resume.
        exam_id: i64,
    },
}

/// Messages sent by the server to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    /// Authentication accepted.
    AuthSuccess {
        message: String,
        user_id: i64,
        user_type: String,
        role: u8,
    },
    /// Timer created; echoes the authoritative start timestamp.
    StartAck {
        exam_id: i64,
        start_time: i64,
        message: String,
    },
    /// Progress recorded.
    UpdateAck {
        exam_id: i64,
        time_used: i32,
        message: String,
    },
    /// Attempt finalized.
    EndAck {
        exam_id: i64,
        time_used: i32,
        message: String,
    },
    /// Reply to `get_exam_status`: active timers with live elapsed times.
    ExamStatus {
        exam_id: i64,
        timers: Vec<ExamTimer>,
        count: usize,
        message: String,
    },
    /// Reply to `get_student_status`: full history, newest first.
    StudentStatus {
        student_id: i64,
        timers: Vec<ExamTimer>,
        count: usize,
        message: String,
    },
    /// Broadcast accepted and fanned out.
    BroadcastAck { exam_id: i64, message: String },
    /// Pause applied.
    PauseAck { exam_id: i64, message: String },
    /// Resume applied.
    ResumeAck { exam_id: i64, message: String },
    /// To teachers: a student started an exam.
    StudentStart {
        exam_id: i64,
        student_id: i64,
        start_time: i64,
        timestamp: i64,
    },
    /// To teachers: a student's progress changed.
    Update {
        exam_id: i64,
        student_id: i64,
        time_used: i32,
        timestamp: i64,
    },
    /// To teachers: a student finished an exam.
    StudentEnd {
        exam_id: i64,
        student_id: i64,
        time_used: i32,
        timestamp: i64,
    },
    /// To students: a teacher's broadcast message.
    Broadcast { message: String, timestamp: i64 },
    /// To students: the exam was paused.
    Pause { message: String, timestamp: i64 },
    /// To students: the exam was resumed.
    Resume { message: String, timestamp: i64 },
    /// A notice delivered over the live channel.
    Notice {
        id: i64,
        notice_type: String,
        title: String,
        content: String,
        timestamp: i64,
    },
}

/// Flat error reply, no type tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReply {
    /// Human-readable reason.
    pub error: String,
}

impl ErrorReply {
    /// Serializes an error reply frame.
    pub fn frame(error: impl Into<String>) -> String {
        // A two-field struct with a string cannot fail to serialize.
        serde_json::to_string(&ErrorReply {
            error: error.into(),
        })
        .unwrap_or_default()
    }
}

impl ServerMessage {
    /// Serializes this message to a wire frame.
    pub fn frame(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
