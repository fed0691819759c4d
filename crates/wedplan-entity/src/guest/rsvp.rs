//! RSVP status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A guest's answer to the invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "rsvp_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RsvpStatus {
    /// No answer yet.
    #[default]
    Pending,
    /// The guest is attending.
    Confirmed,
    /// The guest is not attending.
    Declined,
}

impl RsvpStatus {
    /// Whether a guest with this status may be given a seat.
    pub fn can_be_seated(&self) -> bool {
        !matches!(self, Self::Declined)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Declined => "declined",
        }
    }
}

impl fmt::Display for RsvpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RsvpStatus {
    type Err = wedplan_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "declined" => Ok(Self::Declined),
            _ => Err(wedplan_core::AppError::validation(format!(
                "Invalid RSVP status: '{s}'. Expected one of: pending, confirmed, declined"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_declined_blocks_seating() {
        assert!(RsvpStatus::Pending.can_be_seated());
        assert!(RsvpStatus::Confirmed.can_be_seated());
        assert!(!RsvpStatus::Declined.can_be_seated());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Confirmed".parse::<RsvpStatus>().unwrap(), RsvpStatus::Confirmed);
        assert_eq!(" declined ".parse::<RsvpStatus>().unwrap(), RsvpStatus::Declined);
        assert!("maybe".parse::<RsvpStatus>().is_err());
    }
}
