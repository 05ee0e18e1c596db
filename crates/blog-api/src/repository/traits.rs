//! 仓储 Trait 定义
//!
//! handler 只依赖这里的抽象，PostgreSQL 与内存实现可以互换

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Entity, User};

/// 通用仓储接口
///
/// 查询单个实体时用 `Option` 明确表达“不存在”，不依赖零值判断
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    async fn list(&self) -> Result<Vec<T>>;

    async fn find(&self, id: i64) -> Result<Option<T>>;

    /// 按搜索字段做区分大小写的子串匹配
    async fn search(&self, term: &str) -> Result<Vec<T>>;

    async fn create(&self, draft: T::Draft) -> Result<T>;

    /// 主键不存在时返回 `None`
    async fn update(&self, entity: T) -> Result<Option<T>>;

    /// 没有删除任何记录时返回 `false`
    async fn delete(&self, id: i64) -> Result<bool>;

    async fn exists(&self, id: i64) -> Result<bool> {
        Ok(self.find(id).await?.is_some())
    }
}

/// 用户仓储接口
#[async_trait]
pub trait UserRepository: Repository<User> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;
}
