//! 主题模型

use serde::{Deserialize, Serialize};

use super::{Entity, Post};

/// 主题（tb_temas）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Theme {
    pub id: i64,
    #[serde(rename = "descricao")]
    #[sqlx(rename = "descricao")]
    pub description: String,
    /// 该主题下的文章，为空时不输出
    #[serde(rename = "postagens", default, skip_serializing_if = "Vec::is_empty")]
    #[sqlx(skip)]
    pub posts: Vec<Post>,
}

/// 新建主题
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTheme {
    pub description: String,
}

impl Entity for Theme {
    type Draft = NewTheme;

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, draft: NewTheme) -> Self {
        Self {
            id,
            description: draft.description,
            posts: Vec::new(),
        }
    }

    fn search_field(&self) -> &str {
        &self.description
    }
}
