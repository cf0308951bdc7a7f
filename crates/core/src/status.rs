//! Idea lifecycle statuses and the transition table.
//!
//! ```text
//! Submitted         -> Under_Review
//! Under_Review      -> Approved | Rejected | Needs_Improvement
//! Needs_Improvement -> Under_Review | Submitted
//! Rejected          -> Submitted
//! Approved          -> (terminal)
//! ```
//!
//! Reviewer assignment and review decisions write the status directly and are
//! not checked against this table; see `ideahub_workflow::engine`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Status
-------------------------------------------------------------------------- */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IdeaStatus {
    Submitted,
    #[serde(rename = "Under_Review")]
    UnderReview,
    Approved,
    Rejected,
    #[serde(rename = "Needs_Improvement")]
    NeedsImprovement,
}

impl IdeaStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [IdeaStatus; 5] = [
        IdeaStatus::Submitted,
        IdeaStatus::UnderReview,
        IdeaStatus::Approved,
        IdeaStatus::Rejected,
        IdeaStatus::NeedsImprovement,
    ];

    /// Wire and storage form, e.g. `Under_Review`.
    pub fn as_str(self) -> &'static str {
        match self {
            IdeaStatus::Submitted => "Submitted",
            IdeaStatus::UnderReview => "Under_Review",
            IdeaStatus::Approved => "Approved",
            IdeaStatus::Rejected => "Rejected",
            IdeaStatus::NeedsImprovement => "Needs_Improvement",
        }
    }

    /// Human-readable form used in notifications and reports.
    pub fn display_name(self) -> &'static str {
        match self {
            IdeaStatus::Submitted => "Submitted",
            IdeaStatus::UnderReview => "Under Review",
            IdeaStatus::Approved => "Approved",
            IdeaStatus::Rejected => "Rejected",
            IdeaStatus::NeedsImprovement => "Needs Improvement",
        }
    }

    /// Statuses reachable from `self` through an explicit status update.
    pub fn allowed_transitions(self) -> &'static [IdeaStatus] {
        match self {
            IdeaStatus::Submitted => &[IdeaStatus::UnderReview],
            IdeaStatus::UnderReview => &[
                IdeaStatus::Approved,
                IdeaStatus::Rejected,
                IdeaStatus::NeedsImprovement,
            ],
            IdeaStatus::NeedsImprovement => &[IdeaStatus::UnderReview, IdeaStatus::Submitted],
            IdeaStatus::Rejected => &[IdeaStatus::Submitted],
            IdeaStatus::Approved => &[],
        }
    }

    pub fn can_transition_to(self, next: IdeaStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }
}

impl fmt::Display for IdeaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdeaStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IdeaStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = IdeaStatus::ALL.iter().map(|st| st.as_str()).collect();
                CoreError::Validation(format!(
                    "Invalid status '{s}'. Must be one of: {}",
                    valid.join(", ")
                ))
            })
    }
}

impl TryFrom<String> for IdeaStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Check that `from -> to` is an edge of the transition table.
pub fn validate_transition(from: IdeaStatus, to: IdeaStatus) -> Result<(), CoreError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition { from, to })
    }
}

/* --------------------------------------------------------------------------
Decision
-------------------------------------------------------------------------- */

/// A reviewer's verdict attached to a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Approved,
    Rejected,
    #[serde(rename = "Needs_Improvement")]
    NeedsImprovement,
}

impl Decision {
    /// Parse a decision string. Anything other than the three verdicts yields
    /// `None`, and the review is stored without changing the idea status.
    pub fn parse(value: &str) -> Option<Decision> {
        match value.parse::<IdeaStatus>().ok()? {
            IdeaStatus::Approved => Some(Decision::Approved),
            IdeaStatus::Rejected => Some(Decision::Rejected),
            IdeaStatus::NeedsImprovement => Some(Decision::NeedsImprovement),
            IdeaStatus::Submitted | IdeaStatus::UnderReview => None,
        }
    }

    pub fn status(self) -> IdeaStatus {
        IdeaStatus::from(self)
    }
}

impl From<Decision> for IdeaStatus {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Approved => IdeaStatus::Approved,
            Decision::Rejected => IdeaStatus::Rejected,
            Decision::NeedsImprovement => IdeaStatus::NeedsImprovement,
        }
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const EDGES: &[(IdeaStatus, IdeaStatus)] = &[
        (IdeaStatus::Submitted, IdeaStatus::UnderReview),
        (IdeaStatus::UnderReview, IdeaStatus::Approved),
        (IdeaStatus::UnderReview, IdeaStatus::Rejected),
        (IdeaStatus::UnderReview, IdeaStatus::NeedsImprovement),
        (IdeaStatus::NeedsImprovement, IdeaStatus::UnderReview),
        (IdeaStatus::NeedsImprovement, IdeaStatus::Submitted),
        (IdeaStatus::Rejected, IdeaStatus::Submitted),
    ];

    #[test]
    fn test_transition_table_matches_edge_list() {
        for from in IdeaStatus::ALL {
            for to in IdeaStatus::ALL {
                let expected = EDGES.contains(&(from, to));
                assert_eq!(
                    from.can_transition_to(to),
                    expected,
                    "{from} -> {to} should be {expected}"
                );
            }
        }
    }

    #[test]
    fn test_approved_is_the_only_terminal_status() {
        let terminal: Vec<IdeaStatus> = IdeaStatus::ALL
            .into_iter()
            .filter(|s| s.is_terminal())
            .collect();
        assert_eq!(terminal, vec![IdeaStatus::Approved]);
    }

    #[test]
    fn test_submitted_cannot_jump_to_approved() {
        let result = validate_transition(IdeaStatus::Submitted, IdeaStatus::Approved);
        assert_matches!(
            result,
            Err(CoreError::InvalidTransition {
                from: IdeaStatus::Submitted,
                to: IdeaStatus::Approved
            })
        );
    }

    #[test]
    fn test_self_transitions_are_rejected() {
        for status in IdeaStatus::ALL {
            assert!(validate_transition(status, status).is_err());
        }
    }

    #[test]
    fn test_status_string_forms() {
        assert_eq!(IdeaStatus::UnderReview.as_str(), "Under_Review");
        assert_eq!(IdeaStatus::UnderReview.display_name(), "Under Review");
        assert_eq!(
            "Needs_Improvement".parse::<IdeaStatus>().unwrap(),
            IdeaStatus::NeedsImprovement
        );
        assert!("Under Review".parse::<IdeaStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_to_wire_form() {
        let json = serde_json::to_string(&IdeaStatus::NeedsImprovement).unwrap();
        assert_eq!(json, "\"Needs_Improvement\"");
        let parsed: IdeaStatus = serde_json::from_str("\"Under_Review\"").unwrap();
        assert_eq!(parsed, IdeaStatus::UnderReview);
    }

    #[test]
    fn test_decision_parse_accepts_only_verdicts() {
        assert_eq!(Decision::parse("Approved"), Some(Decision::Approved));
        assert_eq!(Decision::parse("Rejected"), Some(Decision::Rejected));
        assert_eq!(
            Decision::parse("Needs_Improvement"),
            Some(Decision::NeedsImprovement)
        );
        assert_eq!(Decision::parse("Submitted"), None);
        assert_eq!(Decision::parse("Under_Review"), None);
        assert_eq!(Decision::parse("approved"), None);
        assert_eq!(Decision::parse(""), None);
    }

    #[test]
    fn test_decision_maps_to_status() {
        assert_eq!(Decision::Rejected.status(), IdeaStatus::Rejected);
    }
}
