//! 共享库
//!
//! 博客服务共用的配置、错误处理、数据库连接和可观测性基础设施。

pub mod config;
pub mod database;
pub mod error;
pub mod observability;
