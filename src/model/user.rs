use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub manager_id: Option<u64>,
}

/// Directory listing row: password material excluded, manager reference
/// resolved to name/email for display.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryRow {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[schema(example = "Employee")]
    pub role: String,
    pub manager_id: Option<u64>,
    pub manager_name: Option<String>,
    pub manager_email: Option<String>,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}
