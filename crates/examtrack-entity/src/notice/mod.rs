//! Notice entity.

pub mod model;

pub use model::{NewNotice, Notice, NoticeStatus, SendMethod};
