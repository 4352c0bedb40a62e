//! Participant role enum.
//!
//! Roles travel as small integers inside existing JWT claims (1 = student,
//! 2 = teacher), so serde maps the enum through `u8` rather than strings.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Role of a realtime participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// A student taking exams.
    Student,
    /// A teacher proctoring exams.
    Teacher,
}

impl Role {
    /// Numeric wire representation used in token claims.
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Student => 1,
            Self::Teacher => 2,
        }
    }

    /// Lowercase name used in the `userType` protocol field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
        }
    }

    /// Connection-key prefix for this role.
    pub fn key_prefix(self) -> &'static str {
        match self {
            Self::Student => "student_",
            Self::Teacher => "teacher_",
        }
    }

    /// Synthesize the registry key for a participant of this role.
    pub fn connection_key(self, id: i64) -> String {
        format!("{}{}", self.key_prefix(), id)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for Role {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Student),
            2 => Ok(Self::Teacher),
            other => Err(other),
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        Role::try_from(value)
            .map_err(|v| serde::de::Error::custom(format!("unknown role value: {v}")))
    }
}
