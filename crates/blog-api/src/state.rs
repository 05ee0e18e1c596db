//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;

use blog_shared::config::AuthConfig;
use sqlx::PgPool;

use crate::auth::{JwtManager, PasswordHasher};
use crate::models::{Post, Theme, User};
use crate::repository::{
    MemoryBlogStore, MemoryRepository, PgPostRepository, PgThemeRepository, PgUserRepository,
    Repository, UserRepository,
};

/// Axum 应用共享状态
///
/// 仓储以 trait object 持有，handler 不关心底层存储
#[derive(Clone)]
pub struct AppState {
    pub themes: Arc<dyn Repository<Theme>>,
    pub posts: Arc<dyn Repository<Post>>,
    pub users: Arc<dyn UserRepository>,
    pub jwt_manager: Arc<JwtManager>,
    pub password_hasher: PasswordHasher,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new(
        themes: Arc<dyn Repository<Theme>>,
        posts: Arc<dyn Repository<Post>>,
        users: Arc<dyn UserRepository>,
        auth: &AuthConfig,
    ) -> Self {
        Self {
            themes,
            posts,
            users,
            jwt_manager: Arc::new(JwtManager::new(auth.clone().into())),
            password_hasher: PasswordHasher::new(auth.bcrypt_cost),
        }
    }

    /// 基于 PostgreSQL 的应用状态
    pub fn with_postgres(pool: PgPool, auth: &AuthConfig) -> Self {
        Self::new(
            Arc::new(PgThemeRepository::new(pool.clone())),
            Arc::new(PgPostRepository::new(pool.clone())),
            Arc::new(PgUserRepository::new(pool)),
            auth,
        )
    }

    /// 基于内存仓储的应用状态（测试与本地开发）
    pub fn in_memory(auth: &AuthConfig) -> Self {
        let blog = MemoryBlogStore::new();
        Self::new(
            Arc::new(blog.themes()),
            Arc::new(blog.posts()),
            Arc::new(MemoryRepository::<User>::new()),
            auth,
        )
    }
}
