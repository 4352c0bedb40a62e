//! # examtrack-auth
//!
//! Token verification collaborator for ExamTrack. Wraps `jsonwebtoken`
//! behind a decoder/encoder pair; given an opaque bearer token, the decoder
//! yields participant identity, role, and admin flag.

pub mod jwt;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
