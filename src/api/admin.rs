use crate::auth::auth::AuthUser;
use crate::engine::directory;
use crate::model::role::Role;
use crate::model::user::DirectoryRow;
use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct UpdateRole {
    #[schema(example = "Manager")]
    pub role: Role,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateManager {
    /// Omit or pass null to unassign.
    pub manager_id: Option<u64>,
}

/* =========================
User directory (Admin)
========================= */
#[utoipa::path(
    get,
    path = "/api/admin/users",
    responses(
        (status = 200, description = "All users with resolved manager identity", body = [DirectoryRow]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
pub async fn list_users(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let users = directory::list_users(pool.get_ref(), &auth.actor()).await?;
    Ok(HttpResponse::Ok().json(users))
}

/* =========================
Change role (Admin)
========================= */
#[utoipa::path(
    patch,
    path = "/api/admin/users/{user_id}/role",
    params(
        ("user_id" = u64, Path, description = "Target user ID")
    ),
    request_body = UpdateRole,
    responses(
        (status = 200, description = "Role updated", body = DirectoryRow),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
pub async fn update_user_role(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<UpdateRole>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let user = directory::set_role(
        pool.get_ref(),
        &auth.actor(),
        path.into_inner(),
        payload.role,
    )
    .await?;
    Ok(HttpResponse::Ok().json(user))
}

/* =========================
Assign reporting manager (Admin)
========================= */
#[utoipa::path(
    patch,
    path = "/api/admin/users/{user_id}/manager",
    params(
        ("user_id" = u64, Path, description = "Target user ID")
    ),
    request_body = UpdateManager,
    responses(
        (status = 200, description = "Manager updated", body = DirectoryRow),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
pub async fn update_user_manager(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<UpdateManager>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let user = directory::set_manager(
        pool.get_ref(),
        &auth.actor(),
        path.into_inner(),
        payload.manager_id,
    )
    .await?;
    Ok(HttpResponse::Ok().json(user))
}
