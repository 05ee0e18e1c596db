//! 认证模块
//!
//! 提供 JWT Token 生成、验证和密码处理功能

mod error;
mod jwt;
mod password;

pub use error::AuthError;
pub use jwt::{BEARER_PREFIX, Claims, JwtConfig, JwtManager};
pub use password::{PasswordHasher, hash_password, verify_password};
