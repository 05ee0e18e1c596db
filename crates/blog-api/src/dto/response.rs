//! 响应 DTO 定义

use serde::Serialize;

use crate::models::User;

/// 登录响应
///
/// `senha` 固定为空串，前端依赖该字段存在
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub id: i64,
    pub nome: String,
    pub usuario: String,
    pub senha: String,
    pub foto: String,
    /// 形如 `Bearer <jwt>`
    pub token: String,
}

impl LoginResponse {
    pub fn new(user: User, token: String) -> Self {
        Self {
            id: user.id,
            nome: user.name,
            usuario: user.username,
            senha: String::new(),
            foto: user.photo,
            token,
        }
    }
}

/// 健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}
