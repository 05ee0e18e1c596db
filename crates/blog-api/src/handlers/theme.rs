//! 主题管理 API 处理器
//!
//! 实现主题的 CRUD 与按描述搜索

use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

use crate::{
    dto::ThemeRequest,
    error::{ApiError, Result},
    extract::{ResourceId, SearchTerm, ValidatedJson},
    models::Theme,
    state::AppState,
};

/// 获取主题列表
///
/// GET /temas
pub async fn list_themes(State(state): State<AppState>) -> Result<Json<Vec<Theme>>> {
    Ok(Json(state.themes.list().await?))
}

/// 获取主题详情
///
/// GET /temas/{id}
pub async fn get_theme(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<Theme>> {
    let theme = state
        .themes
        .find(id)
        .await?
        .ok_or(ApiError::ThemeNotFound(id))?;

    Ok(Json(theme))
}

/// 按描述搜索主题
///
/// GET /temas/descricao/{descricao}
pub async fn search_themes(
    State(state): State<AppState>,
    SearchTerm(term): SearchTerm,
) -> Result<Json<Vec<Theme>>> {
    Ok(Json(state.themes.search(&term).await?))
}

/// 创建主题
///
/// POST /temas
pub async fn create_theme(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ThemeRequest>,
) -> Result<(StatusCode, Json<Theme>)> {
    let theme = state.themes.create(req.into_draft()).await?;

    info!(theme_id = theme.id, "Theme created");

    Ok((StatusCode::CREATED, Json(theme)))
}

/// 更新主题，目标 ID 取自请求体
///
/// PUT /temas
pub async fn update_theme(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ThemeRequest>,
) -> Result<Json<Theme>> {
    let id = req.id;
    let theme = state
        .themes
        .update(req.into_theme())
        .await?
        .ok_or(ApiError::ThemeNotFound(id))?;

    info!(theme_id = id, "Theme updated");

    Ok(Json(theme))
}

/// 删除主题，其下文章一并删除
///
/// DELETE /temas/{id}
pub async fn delete_theme(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<StatusCode> {
    if !state.themes.delete(id).await? {
        return Err(ApiError::ThemeNotFound(id));
    }

    info!(theme_id = id, "Theme deleted");

    Ok(StatusCode::NO_CONTENT)
}
