//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use blog_shared::observability::middleware as obs_middleware;

use crate::{
    handlers,
    middleware::{auth_middleware, json_content_type, security_headers},
    state::AppState,
};

/// 公开路由：注册与登录
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/usuarios/cadastrar", post(handlers::user::register_user))
        .route("/usuarios/logar", post(handlers::auth::login))
}

/// 主题路由
fn theme_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/temas",
            get(handlers::theme::list_themes)
                .post(handlers::theme::create_theme)
                .put(handlers::theme::update_theme),
        )
        .route(
            "/temas/{id}",
            get(handlers::theme::get_theme).delete(handlers::theme::delete_theme),
        )
        .route(
            "/temas/descricao/{descricao}",
            get(handlers::theme::search_themes),
        )
}

/// 文章路由
fn post_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/postagens",
            get(handlers::post::list_posts)
                .post(handlers::post::create_post)
                .put(handlers::post::update_post),
        )
        .route(
            "/postagens/{id}",
            get(handlers::post::get_post).delete(handlers::post::delete_post),
        )
        .route(
            "/postagens/titulo/{titulo}",
            get(handlers::post::search_posts),
        )
}

/// 用户路由（不含注册与登录）
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/usuarios/all", get(handlers::user::list_users))
        .route("/usuarios/atualizar", put(handlers::user::update_user))
        .route("/usuarios/{id}", get(handlers::user::get_user))
}

/// 需要认证的路由
///
/// 认证中间件以 route_layer 挂载，只作用于已匹配的路由
pub fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(theme_routes())
        .merge(post_routes())
        .merge(user_routes())
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// 全部业务路由（不含中间件）
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .route("/health", get(handlers::health::health_check))
        .with_state(state)
}

/// 挂载全局中间件
///
/// 中间件从外到内：请求 ID、追踪与指标、安全头、JSON Content-Type。
/// 在所有路由合并完成后调用，之后合并的路由不会经过这些中间件。
pub fn with_middleware(router: Router) -> Router {
    router
        .layer(middleware::from_fn(json_content_type))
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(obs_middleware::http_tracing))
        .layer(middleware::from_fn(obs_middleware::request_id))
}

/// 构建完整应用
pub fn app(state: AppState) -> Router {
    with_middleware(router(state))
}
