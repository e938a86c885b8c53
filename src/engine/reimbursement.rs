//! Reimbursement claim lifecycle. Mirrors the leave engine's decision
//! path, with the extra `Approved -> Paid` transition reserved to Admins.

use std::str::FromStr;

use chrono::NaiveDate;
use sqlx::MySqlPool;

use crate::authz::{self, Actor, Scope};
use crate::error::{WorkflowError, WorkflowResult};
use crate::model::claim::{ClaimCategory, ClaimRecord, ClaimReviewRow};
use crate::model::status::{ClaimStatus, Decidable, DecisionOutcome};

pub struct NewClaim {
    pub category: ClaimCategory,
    pub amount: f64,
    pub description: String,
    pub expense_date: NaiveDate,
    pub receipt_url: Option<String>,
}

const CLAIM_COLUMNS: &str = "id, employee_id, category, amount, currency, description, \
     receipt_url, expense_date, status, decided_by, decided_at, decision_note, paid_at, \
     created_at, updated_at";

/// Field-level validation for a new claim. Category validity is enforced
/// by deserialization at the API edge.
pub fn validate_claim(amount: f64, description: &str) -> WorkflowResult<()> {
    if amount.is_nan() || amount < 1.0 {
        return Err(WorkflowError::InvalidAmount);
    }
    if description.trim().is_empty() {
        return Err(WorkflowError::MissingField {
            field: "Description",
        });
    }
    Ok(())
}

fn claim_status(raw: &str) -> WorkflowResult<ClaimStatus> {
    ClaimStatus::from_str(raw)
        .map_err(|_| WorkflowError::Internal(format!("unknown claim status: {raw}")))
}

async fn find(pool: &MySqlPool, claim_id: u64) -> WorkflowResult<Option<ClaimRecord>> {
    let record = sqlx::query_as::<_, ClaimRecord>(&format!(
        "SELECT {CLAIM_COLUMNS} FROM reimbursement_claims WHERE id = ?"
    ))
    .bind(claim_id)
    .fetch_optional(pool)
    .await?;
    Ok(record)
}

/// Creates a Pending claim. Claims are not date-range exclusive, so no
/// overlap constraint applies.
pub async fn submit(
    pool: &MySqlPool,
    employee_id: u64,
    input: NewClaim,
    default_currency: &str,
) -> WorkflowResult<ClaimRecord> {
    validate_claim(input.amount, &input.description)?;

    let result = sqlx::query(
        r#"
        INSERT INTO reimbursement_claims
            (employee_id, category, amount, currency, description, receipt_url, expense_date)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(employee_id)
    .bind(input.category.to_string())
    .bind(input.amount)
    .bind(default_currency)
    .bind(&input.description)
    .bind(input.receipt_url.unwrap_or_default())
    .bind(input.expense_date)
    .execute(pool)
    .await?;

    find(pool, result.last_insert_id())
        .await?
        .ok_or_else(|| WorkflowError::Internal("created claim vanished".into()))
}

/// All claims owned by `employee_id`, most recently created first.
pub async fn list_mine(pool: &MySqlPool, employee_id: u64) -> WorkflowResult<Vec<ClaimRecord>> {
    let claims = sqlx::query_as::<_, ClaimRecord>(&format!(
        "SELECT {CLAIM_COLUMNS} FROM reimbursement_claims WHERE employee_id = ? \
         ORDER BY created_at DESC"
    ))
    .bind(employee_id)
    .fetch_all(pool)
    .await?;
    Ok(claims)
}

/// Deletes a Pending claim. Owner-only.
pub async fn cancel(pool: &MySqlPool, actor: &Actor, claim_id: u64) -> WorkflowResult<()> {
    let claim = find(pool, claim_id)
        .await?
        .ok_or(WorkflowError::NotFound { entity: "Claim" })?;
    let status = claim_status(&claim.status)?;

    if !authz::can_cancel(actor, claim.employee_id, status.is_pending()) {
        if claim.employee_id != actor.id {
            return Err(WorkflowError::Forbidden("Not authorized to cancel this claim"));
        }
        return Err(WorkflowError::InvalidState(
            "Only pending claims can be cancelled",
        ));
    }

    let result = sqlx::query("DELETE FROM reimbursement_claims WHERE id = ? AND status = 'Pending'")
        .bind(claim_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(WorkflowError::InvalidState(
            "Only pending claims can be cancelled",
        ));
    }
    Ok(())
}

const REVIEW_SELECT: &str = "SELECT c.id, c.employee_id, c.category, c.amount, c.currency, \
     c.description, c.receipt_url, c.expense_date, c.status, c.decided_by, c.decided_at, \
     c.decision_note, c.paid_at, c.created_at, u.name AS employee_name, \
     u.email AS employee_email, u.role AS employee_role, d.name AS decided_by_name \
     FROM reimbursement_claims c \
     INNER JOIN users u ON u.id = c.employee_id \
     LEFT JOIN users d ON d.id = c.decided_by";

/// Team review listing, joined with employee identity and the decider's
/// name when the claim has been processed.
pub async fn list_for_reviewer(
    pool: &MySqlPool,
    actor: &Actor,
) -> WorkflowResult<Vec<ClaimReviewRow>> {
    let scope = authz::scope_for(actor)?;

    let claims = match scope {
        Scope::All => sqlx::query_as::<_, ClaimReviewRow>(&format!(
            "{REVIEW_SELECT} ORDER BY c.created_at DESC"
        ))
        .fetch_all(pool)
        .await?,
        Scope::Team(manager_id) => sqlx::query_as::<_, ClaimReviewRow>(&format!(
            "{REVIEW_SELECT} WHERE u.manager_id = ? ORDER BY c.created_at DESC"
        ))
        .bind(manager_id)
        .fetch_all(pool)
        .await?,
    };
    Ok(claims)
}

/// Approved-but-unpaid claims in payment-run order, earliest decision
/// first. Admin-only.
pub async fn list_approved_unpaid(
    pool: &MySqlPool,
    actor: &Actor,
) -> WorkflowResult<Vec<ClaimReviewRow>> {
    if !authz::can_mark_paid(actor) {
        return Err(WorkflowError::Forbidden("Admin only"));
    }

    let claims = sqlx::query_as::<_, ClaimReviewRow>(&format!(
        "{REVIEW_SELECT} WHERE c.status = 'Approved' ORDER BY c.decided_at ASC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(claims)
}

#[derive(sqlx::FromRow)]
struct DecideTarget {
    status: String,
    owner_id: Option<u64>,
    owner_manager_id: Option<u64>,
}

/// Settles a Pending claim as Approved or Rejected. Same authorization as
/// leave decisions: the owner's manager or any Admin, exactly once.
pub async fn decide(
    pool: &MySqlPool,
    actor: &Actor,
    claim_id: u64,
    outcome: DecisionOutcome,
    decision_note: Option<String>,
) -> WorkflowResult<ClaimRecord> {
    let target = sqlx::query_as::<_, DecideTarget>(
        r#"
        SELECT c.status, u.id AS owner_id, u.manager_id AS owner_manager_id
        FROM reimbursement_claims c
        LEFT JOIN users u ON u.id = c.employee_id
        WHERE c.id = ?
        "#,
    )
    .bind(claim_id)
    .fetch_optional(pool)
    .await?
    .ok_or(WorkflowError::NotFound { entity: "Claim" })?;

    if target.owner_id.is_none() {
        return Err(WorkflowError::InvalidState(
            "Employee associated with this claim not found",
        ));
    }
    if !authz::can_decide(actor, target.owner_manager_id) {
        return Err(WorkflowError::Forbidden(
            "Not authorized to decide claims for this employee",
        ));
    }

    let next = claim_status(&target.status)?.on_decide(outcome)?;

    let result = sqlx::query(
        r#"
        UPDATE reimbursement_claims
        SET status = ?, decided_by = ?, decided_at = NOW(), decision_note = ?
        WHERE id = ? AND status = 'Pending'
        "#,
    )
    .bind(next)
    .bind(actor.id)
    .bind(decision_note.unwrap_or_default())
    .bind(claim_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(WorkflowError::AlreadyDecided { entity: "Claim" });
    }

    find(pool, claim_id)
        .await?
        .ok_or(WorkflowError::NotFound { entity: "Claim" })
}

/// Pays out an Approved claim. Admin-only, terminal.
pub async fn mark_paid(pool: &MySqlPool, actor: &Actor, claim_id: u64) -> WorkflowResult<ClaimRecord> {
    if !authz::can_mark_paid(actor) {
        return Err(WorkflowError::Forbidden("Admin only"));
    }

    let claim = find(pool, claim_id)
        .await?
        .ok_or(WorkflowError::NotFound { entity: "Claim" })?;
    if !claim_status(&claim.status)?.can_pay() {
        return Err(WorkflowError::InvalidState(
            "Only approved claims can be marked as paid",
        ));
    }

    // Same compare-and-swap discipline as decisions, keyed on Approved.
    let result = sqlx::query(
        r#"
        UPDATE reimbursement_claims
        SET status = 'Paid', paid_at = NOW()
        WHERE id = ? AND status = 'Approved'
        "#,
    )
    .bind(claim_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(WorkflowError::InvalidState(
            "Only approved claims can be marked as paid",
        ));
    }

    find(pool, claim_id)
        .await?
        .ok_or(WorkflowError::NotFound { entity: "Claim" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_must_be_at_least_one() {
        assert!(matches!(
            validate_claim(0.5, "taxi from airport"),
            Err(WorkflowError::InvalidAmount)
        ));
        assert!(matches!(
            validate_claim(0.0, "taxi from airport"),
            Err(WorkflowError::InvalidAmount)
        ));
        assert!(matches!(
            validate_claim(-10.0, "taxi from airport"),
            Err(WorkflowError::InvalidAmount)
        ));
        assert!(validate_claim(1.0, "taxi from airport").is_ok());
        assert!(validate_claim(500.0, "taxi from airport").is_ok());
    }

    #[test]
    fn nan_amount_is_rejected() {
        assert!(matches!(
            validate_claim(f64::NAN, "taxi from airport"),
            Err(WorkflowError::InvalidAmount)
        ));
    }

    #[test]
    fn description_is_required() {
        assert!(matches!(
            validate_claim(500.0, ""),
            Err(WorkflowError::MissingField {
                field: "Description"
            })
        ));
        assert!(matches!(
            validate_claim(500.0, "   "),
            Err(WorkflowError::MissingField {
                field: "Description"
            })
        ));
    }
}
