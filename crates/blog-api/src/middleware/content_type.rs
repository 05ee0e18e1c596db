//! 响应 Content-Type 中间件

use axum::{
    extract::Request,
    http::{HeaderValue, header::CONTENT_TYPE},
    middleware::Next,
    response::Response,
};

/// 所有响应统一声明为 JSON（包括 204 和框架生成的错误响应）
pub async fn json_content_type(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}
