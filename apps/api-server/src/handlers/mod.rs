//! HTTP handlers and route configuration.

mod categories;
mod comments;
mod health;
mod posts;
mod users;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Malformed input gets the same problem body as every other failure.
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    );

    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/users")
                    .route("", web::post().to(users::get_or_create))
                    .route("/{id}", web::get().to(users::get)),
            )
            .service(
                web::scope("/categories")
                    .route("", web::post().to(categories::create))
                    .route("", web::get().to(categories::list))
                    .route("/{id}", web::get().to(categories::get))
                    .route("/{id}", web::patch().to(categories::update))
                    .route("/{id}", web::delete().to(categories::delete)),
            )
            .service(
                web::scope("/posts")
                    .route("", web::post().to(posts::create))
                    .route("", web::get().to(posts::search))
                    .route(
                        "/author/{author_id}/category/{category_id}",
                        web::get().to(posts::list_by_author_and_category),
                    )
                    .route("/author/{author_id}", web::get().to(posts::list_by_author))
                    .route(
                        "/category/{category_id}",
                        web::get().to(posts::list_by_category),
                    )
                    .route("/{id}/author/{author_id}", web::get().to(posts::get_for_author))
                    .route("/{id}", web::get().to(posts::get))
                    .route("/{id}", web::patch().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete)),
            )
            .service(
                web::scope("/comments")
                    .route("", web::post().to(comments::create))
                    .route("/{id}", web::get().to(comments::get))
                    .route("/{id}", web::patch().to(comments::update))
                    .route("/{id}", web::delete().to(comments::delete)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::{Value, json};
    use webboard_infra::InMemoryStore;

    use super::configure_routes;
    use crate::state::AppState;

    fn state() -> web::Data<AppState> {
        web::Data::new(AppState::with_store(Arc::new(InMemoryStore::new())))
    }

    macro_rules! board_app {
        () => {
            test::init_service(App::new().app_data(state()).configure(configure_routes)).await
        };
    }

    #[actix_web::test]
    async fn test_health() {
        let app = board_app!();
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
    }

    #[actix_web::test]
    async fn test_user_get_or_create_returns_same_id() {
        let app = board_app!();

        let mut ids = Vec::new();
        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri("/api/users")
                .set_json(json!({ "username": "alice" }))
                .to_request();
            let user: Value = test::call_and_read_body_json(&app, req).await;
            ids.push(user["id"].as_i64().unwrap());
        }
        assert_eq!(ids[0], ids[1]);

        let req = test::TestRequest::get()
            .uri(&format!("/api/users/{}", ids[0]))
            .to_request();
        let user: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(user["username"], "alice");
    }

    #[actix_web::test]
    async fn test_post_and_comment_flow() {
        let app = board_app!();

        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({ "username": "alice" }))
            .to_request();
        let alice: Value = test::call_and_read_body_json(&app, req).await;
        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({ "username": "bob" }))
            .to_request();
        let bob: Value = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/api/categories")
            .set_json(json!({ "name": "pets" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let pets: Value = test::read_body_json(res).await;

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({
                "title": "my cat",
                "content": "says hi",
                "authorId": alice["id"],
                "categoryId": pets["id"],
            }))
            .to_request();
        let post: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(post["author"]["username"], "alice");
        assert_eq!(post["category"]["name"], "pets");

        let req = test::TestRequest::get()
            .uri("/api/posts?search=cat")
            .to_request();
        let found: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(found.as_array().unwrap().len(), 1);

        let req = test::TestRequest::get()
            .uri(&format!(
                "/api/posts/author/{}/category/{}?search=dog",
                alice["id"], pets["id"]
            ))
            .to_request();
        let found: Value = test::call_and_read_body_json(&app, req).await;
        assert!(found.as_array().unwrap().is_empty());

        let req = test::TestRequest::post()
            .uri("/api/comments")
            .set_json(json!({
                "postId": post["id"],
                "authorId": alice["id"],
                "content": "first",
            }))
            .to_request();
        let comment: Value = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::delete()
            .uri(&format!("/api/comments/{}", comment["id"]))
            .set_json(json!({ "authorId": bob["id"] }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/posts/{}", post["id"]))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get()
            .uri(&format!("/api/comments/{}", comment["id"]))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_missing_post_is_problem_document() {
        let app = board_app!();

        let req = test::TestRequest::get().uri("/api/posts/41").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["status"], 404);
        assert_eq!(body["detail"], "Post with id 41 not found");
    }

    #[actix_web::test]
    async fn test_invalid_body_is_unprocessable() {
        let app = board_app!();

        let req = test::TestRequest::post()
            .uri("/api/categories")
            .set_json(json!({ "name": "" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[actix_web::test]
    async fn test_malformed_body_is_bad_request() {
        let app = board_app!();

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({ "title": "no ids" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["title"], "Bad Request");
    }
}
