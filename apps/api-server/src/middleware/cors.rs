//! Cross-origin policy for the browser front end.

use actix_cors::Cors;
use actix_web::http::{Method, header};

/// Allow `allowed_origin` to call the board's verbs with a JSON body.
pub fn cors(allowed_origin: &str) -> Cors {
    Cors::default()
        .allowed_origin(allowed_origin)
        .allowed_methods([Method::POST, Method::GET, Method::PATCH, Method::DELETE])
        .allowed_header(header::CONTENT_TYPE)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test, web};
    use webboard_infra::InMemoryStore;

    use super::cors;
    use crate::handlers::configure_routes;
    use crate::state::AppState;

    const FRONT_END: &str = "http://localhost:3000";

    macro_rules! cors_app {
        () => {
            test::init_service(
                App::new()
                    .wrap(cors(FRONT_END))
                    .app_data(web::Data::new(AppState::with_store(Arc::new(
                        InMemoryStore::new(),
                    ))))
                    .configure(configure_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_preflight_from_front_end_is_allowed() {
        let app = cors_app!();

        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/api/posts/1")
            .insert_header((header::ORIGIN, FRONT_END))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "PATCH"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type"))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            FRONT_END
        );
    }

    #[actix_web::test]
    async fn test_simple_request_carries_allow_origin() {
        let app = cors_app!();

        let req = test::TestRequest::get()
            .uri("/api/health")
            .insert_header((header::ORIGIN, FRONT_END))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            FRONT_END
        );
    }

    #[actix_web::test]
    async fn test_other_origin_is_not_allowed() {
        let app = cors_app!();

        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/api/posts/1")
            .insert_header((header::ORIGIN, "http://evil.example"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "PATCH"))
            .to_request();

        match test::try_call_service(&app, req).await {
            Ok(res) => {
                assert!(!res.status().is_success());
                assert!(res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
            }
            Err(err) => {
                let res = err.error_response();
                assert_eq!(res.status(), StatusCode::BAD_REQUEST);
            }
        }
    }
}
