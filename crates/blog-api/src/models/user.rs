//! 用户模型

use serde::{Deserialize, Serialize};

use super::Entity;

/// 用户（tb_usuarios）
///
/// 密码只以 bcrypt 哈希保存，序列化时永远跳过。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    #[serde(rename = "nome")]
    #[sqlx(rename = "nome")]
    pub name: String,
    #[serde(rename = "usuario")]
    #[sqlx(rename = "usuario")]
    pub username: String,
    #[serde(skip)]
    #[sqlx(rename = "senha")]
    pub password_hash: String,
    #[serde(rename = "foto", default)]
    #[sqlx(rename = "foto")]
    pub photo: String,
}

/// 新建用户，密码已完成哈希
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub password_hash: String,
    pub photo: String,
}

impl Entity for User {
    type Draft = NewUser;

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, draft: NewUser) -> Self {
        Self {
            id,
            name: draft.name,
            username: draft.username,
            password_hash: draft.password_hash,
            photo: draft.photo,
        }
    }

    fn search_field(&self) -> &str {
        &self.name
    }
}
