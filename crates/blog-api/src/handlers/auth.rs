//! 登录处理器
//!
//! 用户不存在和密码错误返回完全相同的响应

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use blog_shared::observability::metrics;
use tracing::{info, warn};

use crate::{
    auth::BEARER_PREFIX,
    dto::{LoginRequest, LoginResponse},
    error::{ApiError, Result},
    state::AppState,
};

/// 用户登录
///
/// POST /usuarios/logar
///
/// 请求体无法解析、用户不存在、密码错误都返回 401 `"Usuario Inválido!"`
pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>> {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            metrics::record_login("invalid_credentials");
            warn!(reason = %rejection.body_text(), "Login failed: unreadable credentials");
            return Err(ApiError::InvalidCredentials);
        }
    };

    let user = state.users.find_by_username(&req.usuario).await?;
    let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
    let matches = state
        .password_hasher
        .verify_or_decoy(req.senha, stored_hash)
        .await;

    let user = match user {
        Some(user) if matches => user,
        Some(user) => {
            metrics::record_login("invalid_credentials");
            warn!(user_id = user.id, "Login failed: password mismatch");
            return Err(ApiError::InvalidCredentials);
        }
        None => {
            metrics::record_login("invalid_credentials");
            warn!("Login failed: unknown username");
            return Err(ApiError::InvalidCredentials);
        }
    };

    let (token, expires_at) = state
        .jwt_manager
        .generate_token(&user.username)
        .map_err(|e| {
            metrics::record_login("error");
            ApiError::TokenIssuance(e)
        })?;

    metrics::record_login("success");
    info!(user_id = user.id, expires_at, "User logged in");

    Ok(Json(LoginResponse::new(
        user,
        format!("{BEARER_PREFIX}{token}"),
    )))
}
