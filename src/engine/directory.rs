//! User directory maintenance: role and reporting-manager assignment.
//!
//! The manager relationship is a one-way `manager_id` back-reference;
//! direct-report sets are derived by query, never cached. No check that
//! `manager_id` refers to a Manager or Admin is made here (see DESIGN.md).

use sqlx::MySqlPool;

use crate::authz::Actor;
use crate::error::{WorkflowError, WorkflowResult};
use crate::model::role::Role;
use crate::model::user::DirectoryRow;

const DIRECTORY_SELECT: &str = "SELECT u.id, u.name, u.email, u.role, u.manager_id, \
     m.name AS manager_name, m.email AS manager_email, u.created_at \
     FROM users u \
     LEFT JOIN users m ON m.id = u.manager_id";

fn require_admin(actor: &Actor) -> WorkflowResult<()> {
    if !actor.role.is_admin() {
        return Err(WorkflowError::Forbidden("Admin only"));
    }
    Ok(())
}

async fn find(pool: &MySqlPool, user_id: u64) -> WorkflowResult<Option<DirectoryRow>> {
    let row = sqlx::query_as::<_, DirectoryRow>(&format!("{DIRECTORY_SELECT} WHERE u.id = ?"))
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

async fn require_user(pool: &MySqlPool, user_id: u64) -> WorkflowResult<()> {
    let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    if exists == 0 {
        return Err(WorkflowError::NotFound { entity: "User" });
    }
    Ok(())
}

/// Full user listing for the admin panel, password material excluded and
/// manager references resolved for display.
pub async fn list_users(pool: &MySqlPool, actor: &Actor) -> WorkflowResult<Vec<DirectoryRow>> {
    require_admin(actor)?;

    let users = sqlx::query_as::<_, DirectoryRow>(&format!("{DIRECTORY_SELECT} ORDER BY u.id"))
        .fetch_all(pool)
        .await?;
    Ok(users)
}

/// Changes a user's role. Admin-only.
pub async fn set_role(
    pool: &MySqlPool,
    actor: &Actor,
    target_id: u64,
    role: Role,
) -> WorkflowResult<DirectoryRow> {
    require_admin(actor)?;
    require_user(pool, target_id).await?;

    sqlx::query("UPDATE users SET role = ? WHERE id = ?")
        .bind(role.to_string())
        .bind(target_id)
        .execute(pool)
        .await?;

    find(pool, target_id)
        .await?
        .ok_or(WorkflowError::NotFound { entity: "User" })
}

/// Assigns or clears a user's reporting manager. Admin-only; `None`
/// unassigns and drops the user out of every Team scope.
pub async fn set_manager(
    pool: &MySqlPool,
    actor: &Actor,
    target_id: u64,
    manager_id: Option<u64>,
) -> WorkflowResult<DirectoryRow> {
    require_admin(actor)?;
    require_user(pool, target_id).await?;

    sqlx::query("UPDATE users SET manager_id = ? WHERE id = ?")
        .bind(manager_id)
        .bind(target_id)
        .execute(pool)
        .await?;

    find(pool, target_id)
        .await?
        .ok_or(WorkflowError::NotFound { entity: "User" })
}
