//! 博客领域模型
//!
//! 字段名沿用博客前端的葡萄牙语 JSON 约定（`titulo`、`texto`、`tema_id` 等）

pub mod post;
pub mod theme;
pub mod user;

pub use post::{NewPost, Post};
pub use theme::{NewTheme, Theme};
pub use user::{NewUser, User};

/// 可持久化实体
///
/// 为通用仓储提供主键、草稿构造和搜索字段
pub trait Entity: Clone + Send + Sync + 'static {
    /// 创建时使用的草稿类型（不含主键）
    type Draft: Send + 'static;

    fn id(&self) -> i64;

    /// 以分配好的主键把草稿落成实体
    fn from_draft(id: i64, draft: Self::Draft) -> Self;

    /// 按关键字搜索时匹配的字段
    fn search_field(&self) -> &str;

    /// 更新时刷新由存储维护的字段
    fn touch(&mut self) {}
}
