//! API 错误类型定义
//!
//! 所有失败都在 handler/中间件边界转换为 HTTP 响应。响应体沿用博客前端
//! 依赖的格式：普通错误是一个 JSON 字符串，参数校验错误是 `{"error": "..."}`。

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::auth::AuthError;

/// 登录失败时的统一提示，不区分“用户不存在”和“密码错误”
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Usuario Inválido!";
/// 认证中间件拒绝请求时的统一提示
pub const UNAUTHENTICATED_MESSAGE: &str = "Usuario não Autenticado!";
/// 系统级错误对外的通用提示
pub const INTERNAL_ERROR_MESSAGE: &str = "Erro interno do servidor!";

/// 博客 API 错误类型
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // 认证错误
    #[error("Usuario Inválido!")]
    InvalidCredentials,
    #[error("Usuario não Autenticado!")]
    Unauthenticated(#[source] AuthError),
    #[error("Usuario Inválido!")]
    TokenIssuance(#[source] AuthError),
    #[error("Usuario não Autorizado!")]
    NotOwner(i64),

    // 验证错误
    #[error("{0}")]
    Validation(String),
    #[error("Usuario já Cadastrado!")]
    AlreadyRegistered,

    // 资源不存在
    #[error("Tema Não Encontrado!")]
    ThemeNotFound(i64),
    #[error("Postagem Não Encontrada!")]
    PostNotFound(i64),
    #[error("Usuario Não Encontrado!")]
    UserNotFound(i64),

    // 系统错误
    #[error("密码哈希失败: {0}")]
    Hashing(#[source] AuthError),
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),
    #[error("内部错误: {0}")]
    Internal(String),
}

impl ApiError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials | Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::TokenIssuance(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotOwner(_) => StatusCode::FORBIDDEN,

            Self::Validation(_) | Self::AlreadyRegistered => StatusCode::BAD_REQUEST,

            Self::ThemeNotFound(_) | Self::PostNotFound(_) | Self::UserNotFound(_) => {
                StatusCode::NOT_FOUND
            }

            Self::Hashing(_) | Self::Database(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 返回错误码（用于日志）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unauthenticated(_) => "UNAUTHENTICATED",
            Self::TokenIssuance(_) => "TOKEN_ISSUANCE_FAILED",
            Self::NotOwner(_) => "NOT_OWNER",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::AlreadyRegistered => "ALREADY_REGISTERED",
            Self::ThemeNotFound(_) => "THEME_NOT_FOUND",
            Self::PostNotFound(_) => "POST_NOT_FOUND",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::Hashing(_) => "HASHING_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志，防止信息泄露
        let body = match &self {
            Self::Validation(message) => json!({ "error": message }),
            Self::Hashing(e) => {
                tracing::error!(code = self.error_code(), error = %e, "密码哈希失败");
                json!(INTERNAL_ERROR_MESSAGE)
            }
            Self::Database(e) => {
                tracing::error!(code = self.error_code(), error = %e, "数据库操作失败");
                json!(INTERNAL_ERROR_MESSAGE)
            }
            Self::Internal(e) => {
                tracing::error!(code = self.error_code(), error = %e, "内部错误");
                json!(INTERNAL_ERROR_MESSAGE)
            }
            Self::TokenIssuance(e) => {
                tracing::error!(code = self.error_code(), error = %e, "Token 签发失败");
                json!(self.to_string())
            }
            other => json!(other.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

/// 认证错误按类别映射：Token 问题一律 401，签发失败 422，哈希失败 500
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        if err.is_token_rejection() {
            return Self::Unauthenticated(err);
        }
        match err {
            AuthError::Signing(_) => Self::TokenIssuance(err),
            _ => Self::Hashing(err),
        }
    }
}

/// 从 validator 错误转换
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// 请求体无法解析时按参数错误处理
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

/// 服务层 Result 类型别名
pub type Result<T> = std::result::Result<T, ApiError>;
