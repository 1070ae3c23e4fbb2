//! Approval lifecycle for reviewable records and the video render lifecycle.
//!
//! Characters and scenes share one review state machine: they are created
//! as `pending_approval` and move exactly once to a terminal `approved` or
//! `rejected` state. Videos move `processing` to `completed`. Transition
//! checks live here; the store enforces them atomically.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Review status
// ---------------------------------------------------------------------------

/// Review state of a character or scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    PendingApproval,
    Approved,
    Rejected,
}

impl ReviewStatus {
    /// Return the status name as stored on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingApproval => "pending_approval",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parse a status string. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending_approval" => Some(Self::PendingApproval),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Whether this status accepts no further transitions.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::PendingApproval)
    }

    /// Whether a transition from `self` to `to` is legal.
    ///
    /// The only legal transitions are `pending_approval` to `approved`
    /// and `pending_approval` to `rejected`.
    pub fn can_transition(self, to: ReviewStatus) -> bool {
        matches!(
            (self, to),
            (Self::PendingApproval, Self::Approved) | (Self::PendingApproval, Self::Rejected)
        )
    }
}

// ---------------------------------------------------------------------------
// Review decision
// ---------------------------------------------------------------------------

/// A caller's verdict on a pending record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "approve" => Some(Self::Approve),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }

    /// The terminal status this decision drives a pending record into.
    pub fn target_status(self) -> ReviewStatus {
        match self {
            Self::Approve => ReviewStatus::Approved,
            Self::Reject => ReviewStatus::Rejected,
        }
    }
}

// ---------------------------------------------------------------------------
// Video status
// ---------------------------------------------------------------------------

/// Render state of a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoStatus {
    Processing,
    Completed,
}

impl VideoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "processing" => Some(Self::Processing),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_transitions_to_both_terminals() {
        assert!(ReviewStatus::PendingApproval.can_transition(ReviewStatus::Approved));
        assert!(ReviewStatus::PendingApproval.can_transition(ReviewStatus::Rejected));
    }

    #[test]
    fn test_terminal_states_accept_no_transitions() {
        for from in [ReviewStatus::Approved, ReviewStatus::Rejected] {
            for to in [
                ReviewStatus::PendingApproval,
                ReviewStatus::Approved,
                ReviewStatus::Rejected,
            ] {
                assert!(!from.can_transition(to), "{from:?} -> {to:?} must be illegal");
            }
        }
    }

    #[test]
    fn test_pending_cannot_transition_to_itself() {
        assert!(!ReviewStatus::PendingApproval.can_transition(ReviewStatus::PendingApproval));
    }

    #[test]
    fn test_terminal_flag() {
        assert!(!ReviewStatus::PendingApproval.is_terminal());
        assert!(ReviewStatus::Approved.is_terminal());
        assert!(ReviewStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_decision_targets() {
        assert_eq!(Decision::Approve.target_status(), ReviewStatus::Approved);
        assert_eq!(Decision::Reject.target_status(), ReviewStatus::Rejected);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            ReviewStatus::PendingApproval,
            ReviewStatus::Approved,
            ReviewStatus::Rejected,
        ] {
            assert_eq!(ReviewStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(ReviewStatus::from_str("unknown"), None);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&ReviewStatus::PendingApproval).unwrap();
        assert_eq!(json, "\"pending_approval\"");
    }

    #[test]
    fn test_decision_parses_wire_form() {
        assert_eq!(Decision::from_str("approve"), Some(Decision::Approve));
        assert_eq!(Decision::from_str("reject"), Some(Decision::Reject));
        assert_eq!(Decision::from_str("flag"), None);
    }
}
