//! 登录与认证流程集成测试

mod common;

use axum::http::StatusCode;
use blog_api::auth::{JwtConfig, JwtManager};
use chrono::{Duration, Utc};
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn test_login_with_correct_credentials() {
    let app = TestApp::new();
    app.send(
        "POST",
        "/usuarios/cadastrar",
        None,
        Some(json!({
            "nome": "Maria",
            "usuario": "maria@email.com",
            "senha": "12345678",
            "foto": "https://i.imgur.com/maria.png"
        })),
    )
    .await;

    let response = app
        .send(
            "POST",
            "/usuarios/logar",
            None,
            Some(json!({ "usuario": "maria@email.com", "senha": "12345678" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["usuario"], "maria@email.com");
    assert_eq!(response.body["nome"], "Maria");
    assert_eq!(response.body["foto"], "https://i.imgur.com/maria.png");
    assert_eq!(response.body["senha"], "");
    assert!(response.body["token"].as_str().unwrap().starts_with("Bearer "));
}

#[tokio::test]
async fn test_login_unknown_username() {
    let app = TestApp::new();

    let response = app
        .send(
            "POST",
            "/usuarios/logar",
            None,
            Some(json!({ "usuario": "ninguem@email.com", "senha": "12345678" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, json!("Usuario Inválido!"));
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new();
    app.register_and_login("joao@email.com", "senha-correta").await;

    let response = app
        .send(
            "POST",
            "/usuarios/logar",
            None,
            Some(json!({ "usuario": "joao@email.com", "senha": "senha-errada" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, json!("Usuario Inválido!"));
}

#[tokio::test]
async fn test_login_with_missing_or_empty_credentials() {
    let app = TestApp::new();
    app.register_and_login("bia@email.com", "12345678").await;

    for body in [
        json!({}),
        json!({ "usuario": "", "senha": "" }),
        json!({ "usuario": "", "senha": "x" }),
        json!({ "usuario": "bia@email.com", "senha": "" }),
        json!({ "usuario": "bia@email.com" }),
    ] {
        let response = app
            .send("POST", "/usuarios/logar", None, Some(body.clone()))
            .await;

        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{body}");
        assert_eq!(response.body, json!("Usuario Inválido!"));
    }
}

#[tokio::test]
async fn test_login_with_unreadable_body() {
    let app = TestApp::new();

    let response = app
        .send("POST", "/usuarios/logar", None, Some(json!("maria:12345678")))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, json!("Usuario Inválido!"));
}

#[tokio::test]
async fn test_issued_token_opens_protected_routes() {
    let app = TestApp::new();
    let token = app.register_and_login("ana@email.com", "12345678").await;

    let response = app.send("GET", "/usuarios/all", Some(&token), None).await;

    assert_eq!(response.status, StatusCode::OK);
    let users = response.body.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert!(users[0].get("senha").is_none());
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let app = TestApp::new();

    for uri in ["/temas", "/postagens", "/usuarios/all", "/usuarios/1"] {
        let response = app.send("GET", uri, None, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(response.body, json!("Usuario não Autenticado!"));
    }
}

#[tokio::test]
async fn test_protected_route_with_expired_token() {
    let app = TestApp::new();
    let issued_at = Utc::now() - Duration::hours(2);
    let (token, _) = app
        .state
        .jwt_manager
        .generate_token_at("maria@email.com", issued_at)
        .unwrap();

    let response = app
        .send("GET", "/temas", Some(&format!("Bearer {token}")), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, json!("Usuario não Autenticado!"));
}

#[tokio::test]
async fn test_token_from_other_secret_rejected() {
    let app = TestApp::new();
    let other = JwtManager::new(JwtConfig {
        secret: "another-secret".to_string(),
        ..JwtConfig::default()
    });
    let (token, _) = other.generate_token("maria@email.com").unwrap();

    let response = app
        .send("GET", "/temas", Some(&format!("Bearer {token}")), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_user_requires_token() {
    let app = TestApp::new();

    let response = app
        .send(
            "PUT",
            "/usuarios/atualizar",
            None,
            Some(json!({ "id": 1, "nome": "X", "usuario": "x", "senha": "12345678" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new();

    let response = app.send("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["service"], "blog-api");
}
