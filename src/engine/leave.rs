//! Leave request lifecycle: submission, cancellation, review listings and
//! the one-shot approve/reject decision.

use std::str::FromStr;

use chrono::NaiveDate;
use sqlx::MySqlPool;

use crate::authz::{self, Actor, Scope};
use crate::error::{WorkflowError, WorkflowResult};
use crate::model::leave::{LeaveRecord, LeaveReviewRow, LeaveType};
use crate::model::status::{Decidable, DecisionOutcome, LeaveStatus};

pub struct NewLeave {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub leave_type: LeaveType,
    pub reason: String,
    pub half_day: bool,
    pub attachment_url: Option<String>,
}

const LEAVE_COLUMNS: &str = "id, employee_id, start_date, end_date, leave_type, reason, status, \
     half_day, attachment_url, decided_by, decided_at, decision_note, created_at, updated_at";

/// Inclusive day count of a leave window.
fn window_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// Validates the requested window against the configured maximum.
pub fn validate_window(start: NaiveDate, end: NaiveDate, max_days: i64) -> WorkflowResult<()> {
    if start > end {
        return Err(WorkflowError::InvalidRange);
    }
    if window_days(start, end) > max_days {
        return Err(WorkflowError::DurationExceeded { max: max_days });
    }
    Ok(())
}

/// Inclusive interval intersection: [a_start, a_end] meets [b_start, b_end].
pub fn ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && a_end >= b_start
}

fn leave_status(raw: &str) -> WorkflowResult<LeaveStatus> {
    LeaveStatus::from_str(raw)
        .map_err(|_| WorkflowError::Internal(format!("unknown leave status: {raw}")))
}

async fn find(pool: &MySqlPool, leave_id: u64) -> WorkflowResult<Option<LeaveRecord>> {
    let record = sqlx::query_as::<_, LeaveRecord>(&format!(
        "SELECT {LEAVE_COLUMNS} FROM leave_requests WHERE id = ?"
    ))
    .bind(leave_id)
    .fetch_optional(pool)
    .await?;
    Ok(record)
}

/// Creates a Pending leave request for `employee_id`.
///
/// The overlap check and the insert run in one transaction; the
/// `FOR UPDATE` holds the employee's open requests locked until commit so
/// two concurrent submissions with intersecting windows cannot both land.
pub async fn submit(
    pool: &MySqlPool,
    employee_id: u64,
    input: NewLeave,
    max_days: i64,
) -> WorkflowResult<LeaveRecord> {
    validate_window(input.start_date, input.end_date, max_days)?;
    if input.reason.trim().is_empty() {
        return Err(WorkflowError::MissingField { field: "Reason" });
    }

    let mut tx = pool.begin().await?;

    let overlapping: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM leave_requests
        WHERE employee_id = ?
          AND status IN ('Pending', 'Approved')
          AND start_date <= ?
          AND end_date >= ?
        FOR UPDATE
        "#,
    )
    .bind(employee_id)
    .bind(input.end_date)
    .bind(input.start_date)
    .fetch_one(&mut *tx)
    .await?;

    if overlapping > 0 {
        return Err(WorkflowError::OverlappingRequest);
    }

    let result = sqlx::query(
        r#"
        INSERT INTO leave_requests
            (employee_id, start_date, end_date, leave_type, reason, half_day, attachment_url)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(employee_id)
    .bind(input.start_date)
    .bind(input.end_date)
    .bind(input.leave_type.to_string())
    .bind(&input.reason)
    .bind(input.half_day)
    .bind(input.attachment_url.unwrap_or_default())
    .execute(&mut *tx)
    .await?;

    let leave_id = result.last_insert_id();
    tx.commit().await?;

    find(pool, leave_id)
        .await?
        .ok_or_else(|| WorkflowError::Internal("created leave request vanished".into()))
}

/// All requests owned by `employee_id`, most recently created first.
pub async fn list_mine(pool: &MySqlPool, employee_id: u64) -> WorkflowResult<Vec<LeaveRecord>> {
    let leaves = sqlx::query_as::<_, LeaveRecord>(&format!(
        "SELECT {LEAVE_COLUMNS} FROM leave_requests WHERE employee_id = ? ORDER BY created_at DESC"
    ))
    .bind(employee_id)
    .fetch_all(pool)
    .await?;
    Ok(leaves)
}

/// Deletes a Pending request. Owner-only; decided requests stay put.
pub async fn cancel(pool: &MySqlPool, actor: &Actor, leave_id: u64) -> WorkflowResult<()> {
    let leave = find(pool, leave_id)
        .await?
        .ok_or(WorkflowError::NotFound { entity: "Leave" })?;
    let status = leave_status(&leave.status)?;

    if !authz::can_cancel(actor, leave.employee_id, status.is_pending()) {
        if leave.employee_id != actor.id {
            return Err(WorkflowError::Forbidden("Not authorized to cancel this leave"));
        }
        return Err(WorkflowError::InvalidState(
            "Can only cancel pending leave requests",
        ));
    }

    // Guarded delete: a decision landing in between leaves the row alone.
    let result = sqlx::query("DELETE FROM leave_requests WHERE id = ? AND status = 'Pending'")
        .bind(leave_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(WorkflowError::InvalidState(
            "Can only cancel pending leave requests",
        ));
    }
    Ok(())
}

/// Team review listing: everything for Admins, direct reports' requests
/// for Managers, joined with the owning employee's identity.
pub async fn list_for_reviewer(
    pool: &MySqlPool,
    actor: &Actor,
) -> WorkflowResult<Vec<LeaveReviewRow>> {
    let scope = authz::scope_for(actor)?;

    let base = "SELECT l.id, l.employee_id, l.start_date, l.end_date, l.leave_type, l.reason, \
         l.status, l.half_day, l.attachment_url, l.decided_by, l.decided_at, l.decision_note, \
         l.created_at, u.name AS employee_name, u.email AS employee_email, \
         u.role AS employee_role, u.manager_id AS employee_manager_id \
         FROM leave_requests l \
         INNER JOIN users u ON u.id = l.employee_id";

    let leaves = match scope {
        Scope::All => {
            sqlx::query_as::<_, LeaveReviewRow>(&format!("{base} ORDER BY l.created_at DESC"))
                .fetch_all(pool)
                .await?
        }
        Scope::Team(manager_id) => sqlx::query_as::<_, LeaveReviewRow>(&format!(
            "{base} WHERE u.manager_id = ? ORDER BY l.created_at DESC"
        ))
        .bind(manager_id)
        .fetch_all(pool)
        .await?,
    };
    Ok(leaves)
}

#[derive(sqlx::FromRow)]
struct DecideTarget {
    status: String,
    owner_id: Option<u64>,
    owner_manager_id: Option<u64>,
}

/// Settles a Pending request as Approved or Rejected, recording who
/// decided, when, and why. One decision per record, irreversible.
pub async fn decide(
    pool: &MySqlPool,
    actor: &Actor,
    leave_id: u64,
    outcome: DecisionOutcome,
    decision_note: Option<String>,
) -> WorkflowResult<LeaveRecord> {
    let target = sqlx::query_as::<_, DecideTarget>(
        r#"
        SELECT l.status, u.id AS owner_id, u.manager_id AS owner_manager_id
        FROM leave_requests l
        LEFT JOIN users u ON u.id = l.employee_id
        WHERE l.id = ?
        "#,
    )
    .bind(leave_id)
    .fetch_optional(pool)
    .await?
    .ok_or(WorkflowError::NotFound { entity: "Leave" })?;

    if target.owner_id.is_none() {
        return Err(WorkflowError::InvalidState(
            "Employee associated with this leave not found",
        ));
    }
    if !authz::can_decide(actor, target.owner_manager_id) {
        return Err(WorkflowError::Forbidden(
            "Not authorized to decide leaves for this employee",
        ));
    }

    let next = leave_status(&target.status)?.on_decide(outcome)?;

    // Compare-and-swap on the prior status. Losing a concurrent race makes
    // this a no-op and the loser observes AlreadyDecided.
    let result = sqlx::query(
        r#"
        UPDATE leave_requests
        SET status = ?, decided_by = ?, decided_at = NOW(), decision_note = ?
        WHERE id = ? AND status = 'Pending'
        "#,
    )
    .bind(next)
    .bind(actor.id)
    .bind(decision_note.unwrap_or_default())
    .bind(leave_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(WorkflowError::AlreadyDecided { entity: "Leave" });
    }

    find(pool, leave_id)
        .await?
        .ok_or(WorkflowError::NotFound { entity: "Leave" })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn window_rejects_inverted_range() {
        assert!(matches!(
            validate_window(d("2026-01-12"), d("2026-01-10"), 10),
            Err(WorkflowError::InvalidRange)
        ));
    }

    #[test]
    fn window_duration_is_inclusive() {
        // Jan 1..=Jan 10 is exactly ten days.
        assert!(validate_window(d("2026-01-01"), d("2026-01-10"), 10).is_ok());
        // Jan 1..=Jan 11 is eleven.
        assert!(matches!(
            validate_window(d("2026-01-01"), d("2026-01-11"), 10),
            Err(WorkflowError::DurationExceeded { max: 10 })
        ));
        // A single day (start == end) counts as one.
        assert!(validate_window(d("2026-01-01"), d("2026-01-01"), 1).is_ok());
    }

    #[test]
    fn overlap_bounds_are_inclusive() {
        // Jan 10-12 vs Jan 12-14 share Jan 12.
        assert!(ranges_overlap(
            d("2026-01-10"),
            d("2026-01-12"),
            d("2026-01-12"),
            d("2026-01-14")
        ));
        // Jan 10-12 vs Jan 15-16 are disjoint.
        assert!(!ranges_overlap(
            d("2026-01-10"),
            d("2026-01-12"),
            d("2026-01-15"),
            d("2026-01-16")
        ));
        // Containment counts.
        assert!(ranges_overlap(
            d("2026-01-01"),
            d("2026-01-31"),
            d("2026-01-10"),
            d("2026-01-12")
        ));
        // Adjacent-but-disjoint does not.
        assert!(!ranges_overlap(
            d("2026-01-10"),
            d("2026-01-12"),
            d("2026-01-13"),
            d("2026-01-14")
        ));
    }
}
