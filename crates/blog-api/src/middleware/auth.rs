//! JWT 认证中间件
//!
//! 验证请求中的 Bearer Token 并将 Claims 注入请求扩展。
//! 拒绝原因只记录在日志和指标里，客户端只看到统一的 401 提示。

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use blog_shared::observability::metrics;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// 认证中间件
///
/// 只挂在受保护的路由上，校验失败时不会调用下游 handler
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match state.jwt_manager.verify_request(request.headers()) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => {
            debug!(
                reason = e.reason(),
                path = %request.uri().path(),
                "Request rejected by auth middleware"
            );
            metrics::record_auth_rejection(e.reason());
            ApiError::from(e).into_response()
        }
    }
}
