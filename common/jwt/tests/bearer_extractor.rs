use std::sync::Arc;

use axum::body::Body;
use axum::http::{header::AUTHORIZATION, Request, StatusCode};
use axum::routing::get;
use axum::Router;
use chrono::Duration;
use common_jwt::{AuthContext, JwtContext};
use serde::{Deserialize, Serialize};
use tower::util::ServiceExt;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Scope {
    val: String,
}

async fn whoami(auth: AuthContext<Scope>) -> String {
    format!("{}:{}", auth.subject_id(), auth.claims.auth.val)
}

fn app() -> (Router, Arc<JwtContext>) {
    let context = Arc::new(
        JwtContext::new("svcA", "svcA", "s3cr3t", Duration::seconds(32)).expect("valid context"),
    );
    let router = Router::new()
        .route("/whoami", get(whoami))
        .with_state(context.clone());
    (router, context)
}

fn request(authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri("/whoami");
    if let Some(value) = authorization {
        builder = builder.header(AUTHORIZATION, value);
    }
    builder.body(Body::empty()).expect("request")
}

#[tokio::test]
async fn valid_bearer_token_is_accepted() {
    let (router, context) = app();
    let token = context
        .issue(
            "9001",
            &Scope {
                val: "x".to_string(),
            },
        )
        .expect("token issued");

    let response = router
        .oneshot(request(Some(&format!("Bearer {token}"))))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_header_is_unauthorized() {
    let (router, _) = app();
    let response = router.oneshot(request(None)).await.expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_scheme_is_unauthorized() {
    let (router, _) = app();
    let response = router
        .oneshot(request(Some("Basic dXNlcjpwYXNz")))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn tampered_token_is_unauthorized() {
    let (router, context) = app();
    let token = context
        .issue(
            "9001",
            &Scope {
                val: "x".to_string(),
            },
        )
        .expect("token issued");

    let response = router
        .oneshot(request(Some(&format!("Bearer {token}x"))))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
