//! 个人博客 REST API
//!
//! 管理用户（usuarios）、主题（temas）和文章（postagens），
//! 除注册与登录外的接口都需要 Bearer Token。
//!
//! ## 模块结构
//!
//! - `auth`: 密码哈希与 JWT 签发/校验
//! - `middleware`: 认证与响应头中间件
//! - `repository`: 仓储抽象及 PostgreSQL / 内存实现
//! - `handlers`: HTTP 请求处理器
//! - `routes`: 路由配置
//!
//! ## 技术栈
//!
//! - Web 框架：Axum
//! - 存储：sqlx (PostgreSQL)
//! - 数据验证：validator

pub mod auth;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod state;

/// 服务名，用于配置加载与日志
pub const SERVICE_NAME: &str = "blog-api";

pub use error::{ApiError, Result};
pub use models::{Post, Theme, User};
pub use state::AppState;
