//! 集成测试公共工具
//!
//! 基于内存仓储构建完整路由，bcrypt 使用最低代价因子

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use blog_api::{AppState, routes};
use blog_shared::config::AuthConfig;
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: TEST_SECRET.to_string(),
        token_lifetime_secs: 3600,
        bcrypt_cost: 4,
        ..Default::default()
    }
}

pub struct TestApp {
    pub state: AppState,
    pub router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Value,
}

impl TestApp {
    pub fn new() -> Self {
        let state = AppState::in_memory(&auth_config());
        let router = routes::app(state.clone());
        Self { state, router }
    }

    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, token);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse {
            status,
            content_type,
            body,
        }
    }

    /// 注册用户并登录，返回 `Bearer <jwt>`
    pub async fn register_and_login(&self, usuario: &str, senha: &str) -> String {
        let registered = self
            .send(
                "POST",
                "/usuarios/cadastrar",
                None,
                Some(serde_json::json!({
                    "nome": "Usuario de Teste",
                    "usuario": usuario,
                    "senha": senha,
                })),
            )
            .await;
        assert_eq!(registered.status, StatusCode::CREATED);

        let logged = self
            .send(
                "POST",
                "/usuarios/logar",
                None,
                Some(serde_json::json!({ "usuario": usuario, "senha": senha })),
            )
            .await;
        assert_eq!(logged.status, StatusCode::OK);

        logged.body["token"].as_str().unwrap().to_string()
    }
}
