use crate::auth::auth::AuthUser;
use crate::config::Config;
use crate::engine::leave;
use crate::engine::leave::NewLeave;
use crate::model::leave::{LeaveRecord, LeaveReviewRow, LeaveType};
use crate::model::status::DecisionOutcome;
use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeave {
    #[schema(example = "2026-01-10", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-01-12", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[serde(rename = "type")]
    #[schema(example = "Casual")]
    pub leave_type: LeaveType,
    #[schema(example = "Family function")]
    pub reason: String,
    #[serde(default)]
    pub half_day: bool,
    pub attachment_url: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DecisionReq {
    #[schema(example = "ok")]
    pub decision_note: Option<String>,
}

/* =========================
Submit leave request
========================= */
#[utoipa::path(
    post,
    path = "/api/leaves",
    request_body = CreateLeave,
    responses(
        (status = 201, description = "Leave request submitted", body = LeaveRecord),
        (status = 400, description = "Invalid dates, duration above the configured maximum, or overlapping request"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn create_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    payload: web::Json<CreateLeave>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let leave = leave::submit(
        pool.get_ref(),
        auth.user_id,
        NewLeave {
            start_date: payload.start_date,
            end_date: payload.end_date,
            leave_type: payload.leave_type,
            reason: payload.reason,
            half_day: payload.half_day,
            attachment_url: payload.attachment_url,
        },
        config.max_leave_days,
    )
    .await?;

    Ok(HttpResponse::Created().json(leave))
}

/* =========================
My leave requests
========================= */
#[utoipa::path(
    get,
    path = "/api/leaves/my",
    responses(
        (status = 200, description = "Caller's leave requests, newest first", body = [LeaveRecord]),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn my_leaves(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let leaves = leave::list_mine(pool.get_ref(), auth.user_id).await?;
    Ok(HttpResponse::Ok().json(leaves))
}

/* =========================
Cancel leave (owner, pending only)
========================= */
#[utoipa::path(
    delete,
    path = "/api/leaves/{leave_id}",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to cancel")
    ),
    responses(
        (status = 200, description = "Leave cancelled"),
        (status = 400, description = "Leave is no longer pending"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Leave request not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn cancel_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    leave::cancel(pool.get_ref(), &auth.actor(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave cancelled successfully"
    })))
}

/* =========================
Team leave requests (Manager/Admin)
========================= */
#[utoipa::path(
    get,
    path = "/api/leaves/team",
    responses(
        (status = 200, description = "Team leave requests, newest first", body = [LeaveReviewRow]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn team_leaves(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    auth.require_manager_or_admin()?;

    let leaves = leave::list_for_reviewer(pool.get_ref(), &auth.actor()).await?;
    Ok(HttpResponse::Ok().json(leaves))
}

/* =========================
Approve leave (owner's manager or Admin)
========================= */
#[utoipa::path(
    patch,
    path = "/api/leaves/{leave_id}/approve",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to approve")
    ),
    request_body = DecisionReq,
    responses(
        (status = 200, description = "Leave approved", body = LeaveRecord),
        (status = 400, description = "Leave is already processed"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn approve_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<DecisionReq>,
) -> actix_web::Result<impl Responder> {
    auth.require_manager_or_admin()?;

    let leave = leave::decide(
        pool.get_ref(),
        &auth.actor(),
        path.into_inner(),
        DecisionOutcome::Approved,
        payload.into_inner().decision_note,
    )
    .await?;
    Ok(HttpResponse::Ok().json(leave))
}

/* =========================
Reject leave (owner's manager or Admin)
========================= */
#[utoipa::path(
    patch,
    path = "/api/leaves/{leave_id}/reject",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to reject")
    ),
    request_body = DecisionReq,
    responses(
        (status = 200, description = "Leave rejected", body = LeaveRecord),
        (status = 400, description = "Leave is already processed"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn reject_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<DecisionReq>,
) -> actix_web::Result<impl Responder> {
    auth.require_manager_or_admin()?;

    let leave = leave::decide(
        pool.get_ref(),
        &auth.actor(),
        path.into_inner(),
        DecisionOutcome::Rejected,
        payload.into_inner().decision_note,
    )
    .await?;
    Ok(HttpResponse::Ok().json(leave))
}
