//! Post handlers. Every listing accepts an optional `?search=` text.

use actix_web::{HttpResponse, web};

use webboard_core::domain::PostChanges;
use webboard_core::services::NewPost;
use webboard_shared::dto::{CreatePostRequest, SearchQuery, UpdatePostRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate().map_err(AppError::Validation)?;

    let post = state
        .posts
        .create(NewPost {
            title: req.title,
            content: req.content,
            author_id: req.author_id,
            category_id: req.category_id,
        })
        .await?;
    Ok(HttpResponse::Created().json(post))
}

/// GET /api/posts?search=
pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.search(query.text()).await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/posts/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let post = state.posts.get_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// GET /api/posts/{id}/author/{author_id}
pub async fn get_for_author(
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
) -> AppResult<HttpResponse> {
    let (id, author_id) = path.into_inner();
    let post = state.posts.get_by_id_for_author(id, author_id).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// GET /api/posts/author/{author_id}?search=
pub async fn list_by_author(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let posts = state
        .posts
        .list_by_author(path.into_inner(), query.text())
        .await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/posts/category/{category_id}?search=
pub async fn list_by_category(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let posts = state
        .posts
        .list_by_category(path.into_inner(), query.text())
        .await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/posts/author/{author_id}/category/{category_id}?search=
pub async fn list_by_author_and_category(
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let (author_id, category_id) = path.into_inner();
    let posts = state
        .posts
        .list_by_author_and_category(author_id, category_id, query.text())
        .await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// PATCH /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate().map_err(AppError::Validation)?;

    let changes = PostChanges {
        title: req.title,
        content: req.content,
        category_id: req.category_id,
    };
    let post = state.posts.update(path.into_inner(), changes).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/posts/{id}
pub async fn delete(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    state.posts.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
