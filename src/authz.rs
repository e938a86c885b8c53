//! Capability checks for the approval workflow.
//!
//! Every engine operation receives an explicit [`Actor`]; nothing here
//! reads ambient session state. Decision authority is a capability grant
//! to the owner's manager (one level) or any Admin, not an ownership
//! transfer.

use crate::error::{WorkflowError, WorkflowResult};
use crate::model::role::Role;

/// The authenticated identity performing an operation.
#[derive(Debug, Copy, Clone)]
pub struct Actor {
    pub id: u64,
    pub role: Role,
}

/// Whether `actor` may decide a request owned by an employee whose
/// manager is `owner_manager_id`.
pub fn can_decide(actor: &Actor, owner_manager_id: Option<u64>) -> bool {
    actor.role.is_admin() || owner_manager_id == Some(actor.id)
}

/// Marking a claim paid is Admin-only.
pub fn can_mark_paid(actor: &Actor) -> bool {
    actor.role.is_admin()
}

/// Cancellation is owner-only and only while the record is still pending.
pub fn can_cancel(actor: &Actor, owner_id: u64, is_pending: bool) -> bool {
    actor.id == owner_id && is_pending
}

/// The record set visible to a reviewer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Scope {
    /// Admins see every record in the system.
    All,
    /// Managers see records owned by their direct reports.
    Team(u64),
}

/// Resolves the visibility scope for the team listings. The `Team` scope
/// is a predicate over the directory's current `manager_id` column, so
/// report sets are recomputed at query time.
pub fn scope_for(actor: &Actor) -> WorkflowResult<Scope> {
    match actor.role {
        Role::Admin => Ok(Scope::All),
        Role::Manager => Ok(Scope::Team(actor.id)),
        Role::Employee => Err(WorkflowError::Forbidden(
            "Not authorized to view team requests",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(id: u64, role: Role) -> Actor {
        Actor { id, role }
    }

    #[test]
    fn admin_can_decide_anything() {
        let admin = actor(1, Role::Admin);
        assert!(can_decide(&admin, Some(99)));
        assert!(can_decide(&admin, None));
    }

    #[test]
    fn manager_can_decide_only_for_direct_reports() {
        let manager = actor(2, Role::Manager);
        assert!(can_decide(&manager, Some(2)));
        assert!(!can_decide(&manager, Some(3)));
        assert!(!can_decide(&manager, None));
    }

    #[test]
    fn manager_reference_grants_authority_regardless_of_role() {
        // The directory never validates that manager_id points at a
        // Manager; decision authority follows the reference as stored.
        let employee = actor(5, Role::Employee);
        assert!(can_decide(&employee, Some(5)));
        assert!(!can_decide(&employee, Some(6)));
    }

    #[test]
    fn only_admin_marks_paid() {
        assert!(can_mark_paid(&actor(1, Role::Admin)));
        assert!(!can_mark_paid(&actor(2, Role::Manager)));
        assert!(!can_mark_paid(&actor(3, Role::Employee)));
    }

    #[test]
    fn cancel_requires_owner_and_pending() {
        let owner = actor(7, Role::Employee);
        assert!(can_cancel(&owner, 7, true));
        assert!(!can_cancel(&owner, 7, false));
        assert!(!can_cancel(&owner, 8, true));
        // Admins get no cancellation shortcut.
        assert!(!can_cancel(&actor(1, Role::Admin), 7, true));
    }

    #[test]
    fn scope_per_role() {
        assert_eq!(scope_for(&actor(1, Role::Admin)).unwrap(), Scope::All);
        assert_eq!(scope_for(&actor(2, Role::Manager)).unwrap(), Scope::Team(2));
        assert!(matches!(
            scope_for(&actor(3, Role::Employee)),
            Err(WorkflowError::Forbidden(_))
        ));
    }
}
