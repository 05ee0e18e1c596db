//! 个人博客 REST API 服务入口

use axum::{Json, Router, http::HeaderValue, routing::get};
use blog_api::{SERVICE_NAME, routes, state::AppState};
use blog_shared::{config::AppConfig, database::Database, observability};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load(SERVICE_NAME)?;
    let _guard = observability::init(&config.observability, &config.service_name).await?;

    info!("Starting {} on {}", SERVICE_NAME, config.server_addr());

    if config.auth.uses_default_secret() {
        if config.is_production() {
            anyhow::bail!("BLOG_JWT_SECRET must be set in production environment");
        }
        warn!("Using default JWT secret - set BLOG_JWT_SECRET for production");
    }

    let db = Database::connect(&config.database).await?;
    db.run_migrations().await?;

    let state = AppState::with_postgres(db.pool().clone(), &config.auth);

    let app = routes::with_middleware(routes::router(state).merge(readiness_route(db.clone())))
        .layer(cors_layer(config.is_production()));

    let listener = TcpListener::bind(config.server_addr()).await?;
    info!("Listening on {}", config.server_addr());

    // 收到 SIGTERM 或 Ctrl+C 后停止接收新连接，等待已有请求处理完毕
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");

    Ok(())
}

/// CORS 配置：通过 BLOG_CORS_ORIGINS 环境变量控制允许的来源
fn cors_layer(production: bool) -> CorsLayer {
    let allowed_origins = std::env::var("BLOG_CORS_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string());

    if allowed_origins == "*" {
        if production {
            warn!("BLOG_CORS_ORIGINS=\"*\" is unsafe in production, set explicit origins");
        }
        info!("CORS allowed_origins: * (all origins)");
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    info!("CORS allowed_origins: {}", allowed_origins);
    let origins: Vec<_> = allowed_origins
        .split(',')
        .filter_map(|s| s.trim().parse::<HeaderValue>().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// 就绪探针：检查数据库连接是否可用
fn readiness_route(db: Database) -> Router {
    Router::new().route(
        "/ready",
        get(move || {
            let db = db.clone();
            async move {
                let db_ok = match db.health_check().await {
                    Ok(()) => true,
                    Err(e) => {
                        warn!(
                            code = e.code(),
                            retryable = e.is_retryable(),
                            error = %e,
                            "Readiness check failed"
                        );
                        false
                    }
                };
                Json(serde_json::json!({
                    "status": if db_ok { "ok" } else { "degraded" },
                    "service": SERVICE_NAME,
                    "checks": {
                        "database": if db_ok { "ok" } else { "fail" }
                    }
                }))
            }
        }),
    )
}

/// 监听关闭信号
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown..."),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown..."),
    }
}
