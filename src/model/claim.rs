use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema)]
pub enum ClaimCategory {
    Medical,
    Travel,
    Meal,
    Equipment,
    Training,
    Other,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRecord {
    pub id: u64,
    pub employee_id: u64,
    #[schema(example = "Travel", value_type = String)]
    pub category: String,
    #[schema(example = 500.0)]
    pub amount: f64,
    #[schema(example = "INR")]
    pub currency: String,
    pub description: String,
    pub receipt_url: String,
    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub expense_date: NaiveDate,
    #[schema(example = "Pending", value_type = String)]
    pub status: String,
    pub decided_by: Option<u64>,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub decided_at: Option<DateTime<Utc>>,
    pub decision_note: String,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub paid_at: Option<DateTime<Utc>>,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = "date-time")]
    pub updated_at: DateTime<Utc>,
}

/// A claim joined with the owning employee's identity and, when decided,
/// the decider's name.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClaimReviewRow {
    pub id: u64,
    pub employee_id: u64,
    pub category: String,
    pub amount: f64,
    pub currency: String,
    pub description: String,
    pub receipt_url: String,
    #[schema(value_type = String, format = "date")]
    pub expense_date: NaiveDate,
    pub status: String,
    pub decided_by: Option<u64>,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub decided_at: Option<DateTime<Utc>>,
    pub decision_note: String,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub paid_at: Option<DateTime<Utc>>,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
    pub employee_name: String,
    pub employee_email: String,
    pub employee_role: String,
    pub decided_by_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn categories_round_trip_through_strings() {
        for category in [
            ClaimCategory::Medical,
            ClaimCategory::Travel,
            ClaimCategory::Meal,
            ClaimCategory::Equipment,
            ClaimCategory::Training,
            ClaimCategory::Other,
        ] {
            assert_eq!(
                ClaimCategory::from_str(&category.to_string()).unwrap(),
                category
            );
        }
    }
}
