//! Request statuses and the shared decision transition.
//!
//! Both request kinds move out of `Pending` exactly once. The guard lives
//! here so the leave and reimbursement engines cannot drift apart on the
//! transition rules; the storage layer re-checks the expected prior status
//! in the UPDATE itself.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

use crate::error::WorkflowError;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum ClaimStatus {
    Pending,
    Approved,
    Rejected,
    Paid,
}

/// The two ways a reviewer can settle a pending request.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Display)]
pub enum DecisionOutcome {
    Approved,
    Rejected,
}

impl DecisionOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            DecisionOutcome::Approved => "Approved",
            DecisionOutcome::Rejected => "Rejected",
        }
    }
}

/// A status that supports the one-shot `Pending -> Approved | Rejected`
/// transition.
pub trait Decidable: Copy {
    const ENTITY: &'static str;

    fn is_pending(self) -> bool;

    /// Validates the decide transition and yields the status string to
    /// store. Anything past `Pending` has already been processed.
    fn on_decide(self, outcome: DecisionOutcome) -> Result<&'static str, WorkflowError> {
        if !self.is_pending() {
            return Err(WorkflowError::AlreadyDecided {
                entity: Self::ENTITY,
            });
        }
        Ok(outcome.as_str())
    }
}

impl Decidable for LeaveStatus {
    const ENTITY: &'static str = "Leave";

    fn is_pending(self) -> bool {
        self == LeaveStatus::Pending
    }
}

impl Decidable for ClaimStatus {
    const ENTITY: &'static str = "Claim";

    fn is_pending(self) -> bool {
        self == ClaimStatus::Pending
    }
}

impl LeaveStatus {
    /// Terminal statuses permit no further transition.
    pub fn is_terminal(self) -> bool {
        matches!(self, LeaveStatus::Approved | LeaveStatus::Rejected)
    }
}

impl ClaimStatus {
    /// Only an approved claim may be paid out.
    pub fn can_pay(self) -> bool {
        self == ClaimStatus::Approved
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ClaimStatus::Rejected | ClaimStatus::Paid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn statuses_round_trip_through_strings() {
        for status in [
            LeaveStatus::Pending,
            LeaveStatus::Approved,
            LeaveStatus::Rejected,
        ] {
            assert_eq!(LeaveStatus::from_str(&status.to_string()).unwrap(), status);
        }
        for status in [
            ClaimStatus::Pending,
            ClaimStatus::Approved,
            ClaimStatus::Rejected,
            ClaimStatus::Paid,
        ] {
            assert_eq!(ClaimStatus::from_str(&status.to_string()).unwrap(), status);
        }
    }

    #[test]
    fn decide_succeeds_only_from_pending() {
        assert_eq!(
            LeaveStatus::Pending
                .on_decide(DecisionOutcome::Approved)
                .unwrap(),
            "Approved"
        );
        assert_eq!(
            ClaimStatus::Pending
                .on_decide(DecisionOutcome::Rejected)
                .unwrap(),
            "Rejected"
        );

        assert!(matches!(
            LeaveStatus::Approved.on_decide(DecisionOutcome::Rejected),
            Err(WorkflowError::AlreadyDecided { entity: "Leave" })
        ));
        assert!(matches!(
            LeaveStatus::Rejected.on_decide(DecisionOutcome::Approved),
            Err(WorkflowError::AlreadyDecided { entity: "Leave" })
        ));
        assert!(matches!(
            ClaimStatus::Paid.on_decide(DecisionOutcome::Approved),
            Err(WorkflowError::AlreadyDecided { entity: "Claim" })
        ));
    }

    #[test]
    fn only_approved_claims_are_payable() {
        assert!(ClaimStatus::Approved.can_pay());
        assert!(!ClaimStatus::Pending.can_pay());
        assert!(!ClaimStatus::Rejected.can_pay());
        assert!(!ClaimStatus::Paid.can_pay());
    }

    #[test]
    fn terminal_statuses() {
        assert!(!LeaveStatus::Pending.is_terminal());
        assert!(LeaveStatus::Approved.is_terminal());
        assert!(LeaveStatus::Rejected.is_terminal());

        assert!(!ClaimStatus::Pending.is_terminal());
        assert!(!ClaimStatus::Approved.is_terminal());
        assert!(ClaimStatus::Rejected.is_terminal());
        assert!(ClaimStatus::Paid.is_terminal());
    }
}
