//! End-to-end protocol flows through the session coordinator, using an
//! in-memory timer store in place of PostgreSQL.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::mpsc;

use examtrack_auth::{JwtDecoder, JwtEncoder};
use examtrack_core::config::auth::AuthConfig;
use examtrack_core::error::AppError;
use examtrack_core::result::AppResult;
use examtrack_entity::role::Role;
use examtrack_entity::store::TimerStore;
use examtrack_entity::timer::{ExamTimer, NewExamTimer};
use examtrack_realtime::{ConnectionRegistry, ConnectionState, SessionCoordinator};

/// Minimal vec-backed timer store, mirroring the repository contract.
#[derive(Default)]
struct MemoryTimers {
    rows: Mutex<Vec<ExamTimer>>,
}

#[async_trait]
impl TimerStore for MemoryTimers {
    async fn create(&self, new: NewExamTimer) -> AppResult<ExamTimer> {
        let mut rows = self.rows.lock().unwrap();
        if rows
            .iter()
            .any(|t| t.exam_id == new.exam_id && t.student_id == new.student_id && t.is_active)
        {
            return Err(AppError::conflict("An exam attempt is already in progress"));
        }
        let now = Utc::now();
        let timer = ExamTimer {
            id: rows.len() as i64 + 1,
            exam_id: new.exam_id,
            student_id: new.student_id,
            start_time: new.start_time,
            time_used: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        rows.push(timer.clone());
        Ok(timer)
    }

    async fn find_active(&self, exam_id: i64, student_id: i64) -> AppResult<Option<ExamTimer>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.exam_id == exam_id && t.student_id == student_id && t.is_active)
            .cloned())
    }

    async fn find_all_active(&self, exam_id: i64) -> AppResult<Vec<ExamTimer>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.exam_id == exam_id && t.is_active)
            .cloned()
            .collect())
    }

    async fn find_by_student(&self, student_id: i64) -> AppResult<Vec<ExamTimer>> {
        let mut timers: Vec<ExamTimer> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.student_id == student_id)
            .cloned()
            .collect();
        timers.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(timers)
    }

    async fn save(&self, timer: &ExamTimer) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|t| t.id == timer.id)
            .ok_or_else(|| AppError::not_found("Timer not found"))?;
        *row = timer.clone();
        Ok(())
    }

    async fn bulk_set_active(&self, exam_id: i64, from: bool, to: bool) -> AppResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        let mut affected = 0;
        for row in rows
            .iter_mut()
            .filter(|t| t.exam_id == exam_id && t.is_active == from)
        {
            row.is_active = to;
            affected += 1;
        }
        Ok(affected)
    }
}

struct Harness {
    coordinator: SessionCoordinator,
    encoder: JwtEncoder,
}

/// One authenticated protocol participant.
struct Client {
    state: ConnectionState,
    tx: mpsc::Sender<String>,
    rx: mpsc::Receiver<String>,
}

impl Harness {
    fn new() -> Self {
        let config = AuthConfig {
            jwt_secret: "integration-secret".to_string(),
            issuer: "examtrack".to_string(),
            token_ttl_days: 1,
        };
        Self {
            coordinator: SessionCoordinator::new(
                Arc::new(ConnectionRegistry::new()),
                Arc::new(MemoryTimers::default()) as Arc<dyn TimerStore>,
                Arc::new(JwtDecoder::new(&config)),
            ),
            encoder: JwtEncoder::new(&config),
        }
    }

    async fn connect(&self, user_id: i64, role: Role) -> Client {
        let (tx, rx) = mpsc::channel(32);
        let mut client = Client {
            state: ConnectionState::Unauthenticated,
            tx,
            rx,
        };
        let token = self
            .encoder
            .generate(user_id, "participant", role.as_u8(), 0)
            .unwrap();
        let reply = self
            .send(&mut client, &format!(r#"{{"type":"auth","token":"{token}"}}"#))
            .await;
        assert_eq!(reply["type"], "auth_success");
        assert_eq!(reply["userId"], user_id);
        client
    }

    async fn send(&self, client: &mut Client, frame: &str) -> serde_json::Value {
        let reply = self
            .coordinator
            .handle_frame(&mut client.state, &client.tx, frame)
            .await;
        serde_json::from_str(&reply).unwrap()
    }
}

fn next_event(client: &mut Client) -> serde_json::Value {
    let frame = client.rx.try_recv().expect("expected a queued event");
    serde_json::from_str(&frame).unwrap()
}

#[tokio::test]
async fn full_exam_session_lifecycle() {
    let h = Harness::new();
    let mut teacher = h.connect(7, Role::Teacher).await;
    let mut student = h.connect(42, Role::Student).await;

    // Student starts exam 5; the proctoring teacher sees it live.
    let ack = h.send(&mut student, r#"{"type":"start","examId":5}"#).await;
    assert_eq!(ack["type"], "start_ack");
    let event = next_event(&mut teacher);
    assert_eq!(event["type"], "student_start");
    assert_eq!(event["studentId"], 42);

    // Progress updates overwrite the stored elapsed time.
    let ack = h
        .send(&mut student, r#"{"type":"update","examId":5,"timeUsed":60}"#)
        .await;
    assert_eq!(ack["type"], "update_ack");
    assert_eq!(next_event(&mut teacher)["timeUsed"], 60);

    // The teacher's live view shows the running attempt.
    let status = h
        .send(&mut teacher, r#"{"type":"get_exam_status","examId":5}"#)
        .await;
    assert_eq!(status["count"], 1);
    assert_eq!(status["timers"][0]["studentId"], 42);

    // Finishing flips the timer inactive and empties the live view.
    let ack = h
        .send(&mut student, r#"{"type":"end","examId":5,"timeUsed":120}"#)
        .await;
    assert_eq!(ack["type"], "end_ack");
    assert_eq!(next_event(&mut teacher)["type"], "student_end");

    let status = h
        .send(&mut teacher, r#"{"type":"get_exam_status","examId":5}"#)
        .await;
    assert_eq!(status["count"], 0);

    // History still records the finished attempt.
    let history = h
        .send(&mut teacher, r#"{"type":"get_student_status","studentId":42}"#)
        .await;
    assert_eq!(history["count"], 1);
    assert_eq!(history["timers"][0]["timeUsed"], 120);
    assert_eq!(history["timers"][0]["isActive"], false);
}

#[tokio::test]
async fn pause_and_resume_fan_out_to_students() {
    let h = Harness::new();
    let mut teacher = h.connect(7, Role::Teacher).await;
    let mut alice = h.connect(1, Role::Student).await;
    let mut bob = h.connect(2, Role::Student).await;

    h.send(&mut alice, r#"{"type":"start","examId":9}"#).await;
    h.send(&mut bob, r#"{"type":"start","examId":9}"#).await;

    let ack = h.send(&mut teacher, r#"{"type":"pause","examId":9}"#).await;
    assert_eq!(ack["type"], "pause_ack");
    assert_eq!(next_event(&mut alice)["type"], "pause");
    assert_eq!(next_event(&mut bob)["type"], "pause");

    // While paused, progress updates find no active timer.
    let reply = h
        .send(&mut alice, r#"{"type":"update","examId":9,"timeUsed":10}"#)
        .await;
    assert_eq!(reply["error"], "Timer not found");

    let ack = h.send(&mut teacher, r#"{"type":"resume","examId":9}"#).await;
    assert_eq!(ack["type"], "resume_ack");
    assert_eq!(next_event(&mut alice)["type"], "resume");
    assert_eq!(next_event(&mut bob)["type"], "resume");

    let reply = h
        .send(&mut alice, r#"{"type":"update","examId":9,"timeUsed":10}"#)
        .await;
    assert_eq!(reply["type"], "update_ack");
}

#[tokio::test]
async fn disconnect_leaves_timer_running_but_stops_delivery() {
    let h = Harness::new();
    let mut teacher = h.connect(7, Role::Teacher).await;
    let mut student = h.connect(42, Role::Student).await;

    h.send(&mut student, r#"{"type":"start","examId":5}"#).await;
    next_event(&mut teacher);

    // Abrupt disconnect: no compensating timer mutation happens.
    h.coordinator.disconnect(&student.state).await;

    let status = h
        .send(&mut teacher, r#"{"type":"get_exam_status","examId":5}"#)
        .await;
    assert_eq!(status["count"], 1, "timer stays active after disconnect");

    // But the student no longer receives broadcasts.
    h.send(
        &mut teacher,
        r#"{"type":"broadcast","examId":5,"message":"hello?"}"#,
    )
    .await;
    assert!(student.rx.try_recv().is_err());
}

#[tokio::test]
async fn reconnect_replaces_previous_registration() {
    let h = Harness::new();
    let mut teacher = h.connect(7, Role::Teacher).await;
    let mut stale = h.connect(42, Role::Student).await;
    let mut fresh = h.connect(42, Role::Student).await;

    h.send(
        &mut teacher,
        r#"{"type":"broadcast","examId":5,"message":"only the fresh connection"}"#,
    )
    .await;

    assert_eq!(next_event(&mut fresh)["type"], "broadcast");
    assert!(stale.rx.try_recv().is_err());
}
