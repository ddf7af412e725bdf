//! Category handlers.

use actix_web::{HttpResponse, web};

use webboard_core::domain::CategoryChanges;
use webboard_shared::dto::{CreateCategoryRequest, UpdateCategoryRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/categories
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreateCategoryRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate().map_err(AppError::Validation)?;

    let category = state.categories.create(&req.name).await?;
    Ok(HttpResponse::Created().json(category))
}

/// GET /api/categories
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = state.categories.list_all().await?;
    Ok(HttpResponse::Ok().json(categories))
}

/// GET /api/categories/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let category = state.categories.get_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(category))
}

/// PATCH /api/categories/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdateCategoryRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate().map_err(AppError::Validation)?;

    let category = state
        .categories
        .update(path.into_inner(), CategoryChanges { name: req.name })
        .await?;
    Ok(HttpResponse::Ok().json(category))
}

/// DELETE /api/categories/{id}
pub async fn delete(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    state.categories.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
