use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema)]
pub enum LeaveType {
    Sick,
    Casual,
    #[serde(rename = "Family Emergency")]
    #[strum(serialize = "Family Emergency")]
    FamilyEmergency,
    Paternal,
    Maternal,
    Other,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRecord {
    pub id: u64,
    pub employee_id: u64,
    #[schema(example = "2026-01-10", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-01-12", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[serde(rename = "type")]
    #[schema(example = "Casual", value_type = String)]
    pub leave_type: String,
    pub reason: String,
    #[schema(example = "Pending", value_type = String)]
    pub status: String,
    pub half_day: bool,
    pub attachment_url: String,
    pub decided_by: Option<u64>,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub decided_at: Option<DateTime<Utc>>,
    pub decision_note: String,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = "date-time")]
    pub updated_at: DateTime<Utc>,
}

/// A leave request joined with the owning employee's identity, as served to
/// the team review views.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveReviewRow {
    pub id: u64,
    pub employee_id: u64,
    #[schema(value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = "date")]
    pub end_date: NaiveDate,
    #[serde(rename = "type")]
    pub leave_type: String,
    pub reason: String,
    pub status: String,
    pub half_day: bool,
    pub attachment_url: String,
    pub decided_by: Option<u64>,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub decided_at: Option<DateTime<Utc>>,
    pub decision_note: String,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
    pub employee_name: String,
    pub employee_email: String,
    pub employee_role: String,
    pub employee_manager_id: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn leave_types_round_trip_through_strings() {
        for ty in [
            LeaveType::Sick,
            LeaveType::Casual,
            LeaveType::FamilyEmergency,
            LeaveType::Paternal,
            LeaveType::Maternal,
            LeaveType::Other,
        ] {
            assert_eq!(LeaveType::from_str(&ty.to_string()).unwrap(), ty);
        }
    }

    #[test]
    fn family_emergency_uses_the_spaced_form() {
        assert_eq!(LeaveType::FamilyEmergency.to_string(), "Family Emergency");
        assert_eq!(
            LeaveType::from_str("Family Emergency").unwrap(),
            LeaveType::FamilyEmergency
        );
    }
}
