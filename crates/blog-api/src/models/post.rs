//! 文章模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Entity, Theme};

/// 文章（tb_postagens）
///
/// `data` 是最后一次修改的时间，由存储层在写入时维护。
/// 读取时附带所属主题。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "texto")]
    pub body: String,
    #[serde(rename = "data")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "tema_id")]
    pub theme_id: i64,
    #[serde(rename = "tema", default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
}

/// 新建文章
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub theme_id: i64,
}

impl Entity for Post {
    type Draft = NewPost;

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, draft: NewPost) -> Self {
        Self {
            id,
            title: draft.title,
            body: draft.body,
            updated_at: Utc::now(),
            theme_id: draft.theme_id,
            theme: None,
        }
    }

    fn search_field(&self) -> &str {
        &self.title
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
