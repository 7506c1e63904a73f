use anyhow::Result;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use modkit::RestfulModule;
use users::{
    api::rest::dto::{CreateUserReq, UserDto},
    contract::model::{NewUser, UserPatch},
    UsersModule,
};

/// Create a test HTTP router backed by a fresh in-memory store
fn create_test_router() -> Router {
    UsersModule::new()
        .register_rest(Router::new())
        .expect("Failed to register routes")
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn read_json(response: Response) -> Result<Value> {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&body)?)
}

fn content_type(response: &Response) -> &str {
    response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

#[tokio::test]
async fn test_rest_api_user_lifecycle() -> Result<()> {
    let router = create_test_router();

    // POST /users
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/users",
            &json!({"name": "Alice", "email": "a@x.io"}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: UserDto = serde_json::from_value(read_json(response).await?)?;
    assert_eq!(created.name, "Alice");
    assert_eq!(created.email, "a@x.io");
    assert_eq!(created.created_at, created.updated_at);
    let path = format!("/users/{}", created.id);

    // GET /users/{id}
    let response = router.clone().oneshot(empty_request("GET", &path)).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: UserDto = serde_json::from_value(read_json(response).await?)?;
    assert_eq!(fetched, created);

    // PUT /users/{id} with an empty email keeps the old one
    let response = router
        .clone()
        .oneshot(json_request(
            "PUT",
            &path,
            &json!({"name": "Alicia", "email": ""}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let updated: UserDto = serde_json::from_value(read_json(response).await?)?;
    assert_eq!(updated.name, "Alicia");
    assert_eq!(updated.email, "a@x.io");
    assert!(updated.updated_at >= created.updated_at);

    // DELETE /users/{id}
    let response = router.clone().oneshot(empty_request("DELETE", &path)).await?;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    assert!(body.is_empty());

    // GET after delete
    let response = router.oneshot(empty_request("GET", &path)).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_rest_api_list_users_returns_array() -> Result<()> {
    let router = create_test_router();

    let response = router.clone().oneshot(empty_request("GET", "/users")).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await?, json!([]));

    for (name, email) in [("Alice", "a@x.io"), ("Bob", "b@x.io")] {
        let req = CreateUserReq {
            name: name.to_string(),
            email: email.to_string(),
        };
        let response = router
            .clone()
            .oneshot(json_request("POST", "/users", &serde_json::to_value(&req)?))
            .await?;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = router.oneshot(empty_request("GET", "/users")).await?;
    let users: Vec<UserDto> = serde_json::from_value(read_json(response).await?)?;
    assert_eq!(users.len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_rest_api_validation_errors() -> Result<()> {
    let router = create_test_router();

    let response = router
        .oneshot(json_request("POST", "/users", &json!({"name": "", "email": "a@x.io"})))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(content_type(&response), "application/problem+json");

    let problem = read_json(response).await?;
    assert_eq!(problem["status"], 400);
    assert_eq!(problem["code"], "USERS_VALIDATION");
    assert_eq!(problem["instance"], "/users");
    assert_eq!(problem["errors"][0]["pointer"], "/name");

    Ok(())
}

#[tokio::test]
async fn test_rest_api_missing_field_is_validation_error() -> Result<()> {
    let router = create_test_router();

    let response = router
        .oneshot(json_request("POST", "/users", &json!({"name": "Alice"})))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await?["errors"][0]["pointer"], "/email");

    Ok(())
}

#[tokio::test]
async fn test_rest_api_malformed_body() -> Result<()> {
    let router = create_test_router();

    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = router.oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(content_type(&response), "application/problem+json");
    assert_eq!(read_json(response).await?["code"], "USERS_INVALID_BODY");

    Ok(())
}

#[tokio::test]
async fn test_rest_api_unusable_bodies_are_400() -> Result<()> {
    let untyped = Request::builder()
        .method("POST")
        .uri("/users")
        .body(Body::from(r#"{"name":"Ann","email":"a@x.io"}"#))
        .unwrap();

    let cases = [
        json_request("POST", "/users", &json!({"name": 5, "email": "a@x.io"})),
        untyped,
        json_request("PUT", "/users/x", &json!({"name": 1})),
    ];

    for request in cases {
        let label = format!("{} {}", request.method(), request.uri());
        let response = create_test_router().oneshot(request).await?;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{label}");
        assert_eq!(content_type(&response), "application/problem+json");
        assert_eq!(read_json(response).await?["code"], "USERS_INVALID_BODY", "{label}");
    }

    Ok(())
}

#[tokio::test]
async fn test_rest_api_not_found() -> Result<()> {
    let router = create_test_router();

    for (method, body) in [
        ("GET", None),
        ("PUT", Some(json!({"name": "Nobody"}))),
        ("DELETE", None),
    ] {
        let request = match body {
            Some(b) => json_request(method, "/users/does-not-exist", &b),
            None => empty_request(method, "/users/does-not-exist"),
        };
        let response = router.clone().oneshot(request).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method}");

        let problem = read_json(response).await?;
        assert_eq!(problem["code"], "USERS_NOT_FOUND");
        assert_eq!(problem["instance"], "/users/does-not-exist");
    }

    Ok(())
}

#[tokio::test]
async fn test_local_client_shares_store_with_rest() -> Result<()> {
    let module = UsersModule::new();
    let router = module.register_rest(Router::new())?;
    let client = module.client();

    let created = client
        .create_user(NewUser {
            name: "Carol".to_string(),
            email: "c@x.io".to_string(),
        })
        .await?;

    let response = router
        .oneshot(empty_request("GET", &format!("/users/{}", created.id)))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = client
        .update_user(&created.id, UserPatch::from_fields("", "carol@x.io"))
        .await?;
    assert_eq!(updated.name, "Carol");
    assert_eq!(updated.email, "carol@x.io");

    client.delete_user(&created.id).await?;
    assert!(client.list_users().await?.is_empty());

    Ok(())
}

#[test]
fn test_module_exposes_openapi() {
    let doc = UsersModule::new().openapi();
    assert!(doc.paths.paths.contains_key("/users/{id}"));
}
