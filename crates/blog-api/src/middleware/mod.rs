//! 中间件模块
//!
//! 提供认证、响应头中间件

mod auth;
mod content_type;
mod security_headers;

pub use auth::auth_middleware;
pub use content_type::json_content_type;
pub use security_headers::security_headers;
