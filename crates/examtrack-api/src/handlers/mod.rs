//! Request handlers, organized by domain.

pub mod exam;
pub mod health;
pub mod notice;
pub mod presence;
pub mod timer;
pub mod ws;
