//! Concrete repository implementations.

pub mod notice;
pub mod question;
pub mod result;
pub mod timer;
