//! Comment handlers.
//!
//! `authorId` in update and delete bodies is the acting author. It is
//! trusted as sent and must match the comment's stored author.

use actix_web::{HttpResponse, web};

use webboard_core::services::CommentUpdate;
use webboard_shared::dto::{CreateCommentRequest, DeleteCommentRequest, UpdateCommentRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/comments
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate().map_err(AppError::Validation)?;

    let comment = state
        .comments
        .create(req.post_id, req.author_id, req.content)
        .await?;
    Ok(HttpResponse::Created().json(comment))
}

/// GET /api/comments/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let comment = state.comments.get_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(comment))
}

/// PATCH /api/comments/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdateCommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate().map_err(AppError::Validation)?;

    let update = CommentUpdate {
        post_id: req.post_id,
        author_id: req.author_id,
        content: req.content,
    };
    let comment = state.comments.update(path.into_inner(), update).await?;
    Ok(HttpResponse::Ok().json(comment))
}

/// DELETE /api/comments/{id}
pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<DeleteCommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate().map_err(AppError::Validation)?;

    state
        .comments
        .remove(path.into_inner(), req.author_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
