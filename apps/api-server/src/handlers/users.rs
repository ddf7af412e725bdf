//! User handlers.

use actix_web::{HttpResponse, web};

use webboard_shared::dto::CreateUserRequest;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/users
///
/// Returns the existing user when the name is already taken.
pub async fn get_or_create(
    state: web::Data<AppState>,
    body: web::Json<CreateUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate().map_err(AppError::Validation)?;

    let user = state.users.get_or_create(&req.username).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// GET /api/users/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let user = state.users.get_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}
