use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use greeter_service::handlers::GREETING;
use greeter_service::startup::build_router;
use http_body_util::BodyExt;
use tower::util::ServiceExt;

#[tokio::test]
async fn root_returns_greeting() {
    let app = build_router();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");
    assert!(content_type.starts_with("text/plain"));

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(!body.is_empty());
    assert_eq!(body, GREETING.as_bytes());
}

#[tokio::test]
async fn greeting_is_constant_across_calls() {
    let app = build_router();

    let mut bodies = Vec::new();
    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        bodies.push(response.into_body().collect().await.unwrap().to_bytes());
    }

    assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
}

#[tokio::test]
async fn health_check_works() {
    let app = build_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "greeter-service");
}

#[tokio::test]
async fn unknown_path_returns_not_found() {
    let app = build_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
