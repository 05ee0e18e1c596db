//! HTTP 处理器模块
//!
//! 每个资源一个子模块，handler 只依赖 `AppState` 中的仓储抽象

pub mod auth;
pub mod health;
pub mod post;
pub mod theme;
pub mod user;
