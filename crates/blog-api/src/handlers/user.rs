//! 用户管理 API 处理器
//!
//! 注册公开，其余操作需要认证。密码在进入仓储前完成哈希。

use axum::{Extension, Json, extract::State, http::StatusCode};
use tracing::{info, warn};

use crate::{
    auth::Claims,
    dto::UserRequest,
    error::{ApiError, Result},
    extract::{ResourceId, ValidatedJson},
    models::User,
    state::AppState,
};

/// 获取用户列表
///
/// GET /usuarios/all
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    Ok(Json(state.users.list().await?))
}

/// 获取用户详情
///
/// GET /usuarios/{id}
pub async fn get_user(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<User>> {
    let user = state
        .users
        .find(id)
        .await?
        .ok_or(ApiError::UserNotFound(id))?;

    Ok(Json(user))
}

/// 注册用户
///
/// POST /usuarios/cadastrar
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<UserRequest>,
) -> Result<(StatusCode, Json<User>)> {
    if state.users.find_by_username(&req.usuario).await?.is_some() {
        return Err(ApiError::AlreadyRegistered);
    }

    let password_hash = state.password_hasher.hash(req.senha.clone()).await?;
    let user = state.users.create(req.into_new_user(password_hash)).await?;

    info!(user_id = user.id, "User registered");

    Ok((StatusCode::CREATED, Json(user)))
}

/// 更新用户，目标 ID 取自请求体，密码重新哈希
///
/// PUT /usuarios/atualizar
///
/// 只能修改 Token 持有者自己的账号
pub async fn update_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ValidatedJson(req): ValidatedJson<UserRequest>,
) -> Result<Json<User>> {
    let id = req.id;
    let current = state
        .users
        .find(id)
        .await?
        .ok_or(ApiError::UserNotFound(id))?;

    if current.username != claims.sub {
        warn!(user_id = id, actor = %claims.sub, "User update rejected: not the owner");
        return Err(ApiError::NotOwner(id));
    }

    // 新用户名不能属于其他用户
    if let Some(owner) = state.users.find_by_username(&req.usuario).await? {
        if owner.id != id {
            return Err(ApiError::AlreadyRegistered);
        }
    }

    let password_hash = state.password_hasher.hash(req.senha.clone()).await?;
    let user = state
        .users
        .update(req.into_user(password_hash))
        .await?
        .ok_or(ApiError::UserNotFound(id))?;

    info!(user_id = id, actor = %claims.sub, "User updated");

    Ok(Json(user))
}
