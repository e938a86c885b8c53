use crate::api::leave::DecisionReq;
use crate::auth::auth::AuthUser;
use crate::config::Config;
use crate::engine::reimbursement;
use crate::engine::reimbursement::NewClaim;
use crate::model::claim::{ClaimCategory, ClaimRecord, ClaimReviewRow};
use crate::model::status::DecisionOutcome;
use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClaim {
    #[schema(example = "Travel")]
    pub category: ClaimCategory,
    #[schema(example = 500.0)]
    pub amount: f64,
    #[schema(example = "Taxi from airport")]
    pub description: String,
    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub expense_date: NaiveDate,
    pub receipt_url: Option<String>,
}

/* =========================
Submit claim
========================= */
#[utoipa::path(
    post,
    path = "/api/reimbursements",
    request_body = CreateClaim,
    responses(
        (status = 201, description = "Claim submitted", body = ClaimRecord),
        (status = 400, description = "Amount below 1 or missing description"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Reimbursement"
)]
pub async fn submit_claim(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    payload: web::Json<CreateClaim>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let claim = reimbursement::submit(
        pool.get_ref(),
        auth.user_id,
        NewClaim {
            category: payload.category,
            amount: payload.amount,
            description: payload.description,
            expense_date: payload.expense_date,
            receipt_url: payload.receipt_url,
        },
        &config.default_currency,
    )
    .await?;

    Ok(HttpResponse::Created().json(claim))
}

/* =========================
My claims
========================= */
#[utoipa::path(
    get,
    path = "/api/reimbursements/my",
    responses(
        (status = 200, description = "Caller's claims, newest first", body = [ClaimRecord]),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Reimbursement"
)]
pub async fn my_claims(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let claims = reimbursement::list_mine(pool.get_ref(), auth.user_id).await?;
    Ok(HttpResponse::Ok().json(claims))
}

/* =========================
Cancel claim (owner, pending only)
========================= */
#[utoipa::path(
    delete,
    path = "/api/reimbursements/{claim_id}",
    params(
        ("claim_id" = u64, Path, description = "ID of the claim to cancel")
    ),
    responses(
        (status = 200, description = "Claim cancelled"),
        (status = 400, description = "Claim is no longer pending"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Claim not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Reimbursement"
)]
pub async fn cancel_claim(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    reimbursement::cancel(pool.get_ref(), &auth.actor(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Claim cancelled successfully"
    })))
}

/* =========================
Team claims (Manager/Admin)
========================= */
#[utoipa::path(
    get,
    path = "/api/reimbursements/team",
    responses(
        (status = 200, description = "Team claims, newest first", body = [ClaimReviewRow]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Reimbursement"
)]
pub async fn team_claims(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    auth.require_manager_or_admin()?;

    let claims = reimbursement::list_for_reviewer(pool.get_ref(), &auth.actor()).await?;
    Ok(HttpResponse::Ok().json(claims))
}

/* =========================
Approved-but-unpaid queue (Admin)
========================= */
#[utoipa::path(
    get,
    path = "/api/reimbursements/admin/approved-unpaid",
    responses(
        (status = 200, description = "Approved claims awaiting payment, earliest decision first", body = [ClaimReviewRow]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Reimbursement"
)]
pub async fn approved_unpaid(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let claims = reimbursement::list_approved_unpaid(pool.get_ref(), &auth.actor()).await?;
    Ok(HttpResponse::Ok().json(claims))
}

/* =========================
Approve claim (owner's manager or Admin)
========================= */
#[utoipa::path(
    patch,
    path = "/api/reimbursements/{claim_id}/approve",
    params(
        ("claim_id" = u64, Path, description = "ID of the claim to approve")
    ),
    request_body = DecisionReq,
    responses(
        (status = 200, description = "Claim approved", body = ClaimRecord),
        (status = 400, description = "Claim is already processed"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Claim not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Reimbursement"
)]
pub async fn approve_claim(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<DecisionReq>,
) -> actix_web::Result<impl Responder> {
    auth.require_manager_or_admin()?;

    let claim = reimbursement::decide(
        pool.get_ref(),
        &auth.actor(),
        path.into_inner(),
        DecisionOutcome::Approved,
        payload.into_inner().decision_note,
    )
    .await?;
    Ok(HttpResponse::Ok().json(claim))
}

/* =========================
Reject claim (owner's manager or Admin)
========================= */
#[utoipa::path(
    patch,
    path = "/api/reimbursements/{claim_id}/reject",
    params(
        ("claim_id" = u64, Path, description = "ID of the claim to reject")
    ),
    request_body = DecisionReq,
    responses(
        (status = 200, description = "Claim rejected", body = ClaimRecord),
        (status = 400, description = "Claim is already processed"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Claim not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Reimbursement"
)]
pub async fn reject_claim(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<DecisionReq>,
) -> actix_web::Result<impl Responder> {
    auth.require_manager_or_admin()?;

    let claim = reimbursement::decide(
        pool.get_ref(),
        &auth.actor(),
        path.into_inner(),
        DecisionOutcome::Rejected,
        payload.into_inner().decision_note,
    )
    .await?;
    Ok(HttpResponse::Ok().json(claim))
}

/* =========================
Mark claim paid (Admin)
========================= */
#[utoipa::path(
    patch,
    path = "/api/reimbursements/{claim_id}/pay",
    params(
        ("claim_id" = u64, Path, description = "ID of the claim to pay out")
    ),
    responses(
        (status = 200, description = "Claim marked as paid", body = ClaimRecord),
        (status = 400, description = "Claim is not approved"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Claim not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Reimbursement"
)]
pub async fn pay_claim(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let claim = reimbursement::mark_paid(pool.get_ref(), &auth.actor(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(claim))
}
