//! 请求提取器
//!
//! 包装 axum 自带的 `Json` 与 `Path`，把解析失败统一转换为 `ApiError::Validation`，
//! 使客户端总是收到 `{"error": "..."}` 形式的 400 响应。

use axum::extract::{FromRequest, FromRequestParts, Json, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::ApiError;

/// 解析 JSON 请求体并执行字段校验
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(Self(data))
    }
}

/// 路径中的资源 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceId(pub i64);

impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state).await?;
        Ok(Self(id))
    }
}

/// 路径中的搜索关键字
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(pub String);

impl<S> FromRequestParts<S> for SearchTerm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(term) = Path::<String>::from_request_parts(parts, state).await?;
        Ok(Self(term))
    }
}
