//! 存活探针

use axum::Json;

use crate::dto::HealthResponse;

/// 服务进程正常即返回 ok
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: crate::SERVICE_NAME,
    })
}
