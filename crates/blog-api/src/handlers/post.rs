//! 文章管理 API 处理器

use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

use crate::{
    dto::PostRequest,
    error::{ApiError, Result},
    extract::{ResourceId, SearchTerm, ValidatedJson},
    models::{Post, Theme},
    state::AppState,
};

/// 加载文章引用的主题，不存在时返回 404
async fn require_theme(state: &AppState, theme_id: i64) -> Result<Theme> {
    let mut theme = state
        .themes
        .find(theme_id)
        .await?
        .ok_or(ApiError::ThemeNotFound(theme_id))?;
    theme.posts.clear();
    Ok(theme)
}

/// 获取文章列表
///
/// GET /postagens
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>> {
    Ok(Json(state.posts.list().await?))
}

/// 获取文章详情
///
/// GET /postagens/{id}
pub async fn get_post(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<Post>> {
    let post = state
        .posts
        .find(id)
        .await?
        .ok_or(ApiError::PostNotFound(id))?;

    Ok(Json(post))
}

/// 按标题搜索文章
///
/// GET /postagens/titulo/{titulo}
pub async fn search_posts(
    State(state): State<AppState>,
    SearchTerm(term): SearchTerm,
) -> Result<Json<Vec<Post>>> {
    Ok(Json(state.posts.search(&term).await?))
}

/// 创建文章
///
/// POST /postagens
pub async fn create_post(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<PostRequest>,
) -> Result<(StatusCode, Json<Post>)> {
    let theme = require_theme(&state, req.tema_id).await?;

    let mut post = state.posts.create(req.into_draft()).await?;
    if post.theme.is_none() {
        post.theme = Some(theme);
    }

    info!(post_id = post.id, theme_id = post.theme_id, "Post created");

    Ok((StatusCode::CREATED, Json(post)))
}

/// 更新文章，目标 ID 取自请求体
///
/// PUT /postagens
pub async fn update_post(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<PostRequest>,
) -> Result<Json<Post>> {
    let id = req.id;
    if !state.posts.exists(id).await? {
        return Err(ApiError::PostNotFound(id));
    }
    let theme = require_theme(&state, req.tema_id).await?;

    let mut post = state
        .posts
        .update(req.into_post())
        .await?
        .ok_or(ApiError::PostNotFound(id))?;
    if post.theme.is_none() {
        post.theme = Some(theme);
    }

    info!(post_id = id, "Post updated");

    Ok(Json(post))
}

/// 删除文章
///
/// DELETE /postagens/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<StatusCode> {
    if !state.posts.delete(id).await? {
        return Err(ApiError::PostNotFound(id));
    }

    info!(post_id = id, "Post deleted");

    Ok(StatusCode::NO_CONTENT)
}
