//! # examtrack-entity
//!
//! Domain entity models for ExamTrack: session timers, notices, questions,
//! exam results, and the participant role enum, plus the store contracts
//! the realtime coordinator and notice dispatcher are written against.

pub mod notice;
pub mod question;
pub mod result;
pub mod role;
pub mod store;
pub mod timer;

pub use notice::{Notice, NoticeStatus, SendMethod};
pub use question::{Question, QuestionType, SubmittedAnswer};
pub use result::ExamResult;
pub use role::Role;
pub use store::{NoticeStore, TimerStore};
pub use timer::{ExamTimer, NewExamTimer};
