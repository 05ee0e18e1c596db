//! 内存仓储
//!
//! 基于 DashMap 的通用实现，用于测试和本地开发。
//! `MemoryBlogStore` 在其上组合主题与文章，行为与 PostgreSQL 实现一致：
//! 读取时解析关联，文章必须引用已存在的主题，删除主题时级联删除文章。

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use super::traits::{Repository, UserRepository};
use crate::error::{ApiError, Result};
use crate::models::{Entity, NewPost, NewTheme, Post, Theme, User};

/// 内存仓储
pub struct MemoryRepository<T> {
    items: DashMap<i64, T>,
    sequence: AtomicI64,
}

impl<T: Entity> MemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
            sequence: AtomicI64::new(0),
        }
    }

    fn sorted(&self, mut items: Vec<T>) -> Vec<T> {
        items.sort_by_key(|item| item.id());
        items
    }
}

impl<T: Entity> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for MemoryRepository<T> {
    async fn list(&self) -> Result<Vec<T>> {
        let items = self.items.iter().map(|e| e.value().clone()).collect();
        Ok(self.sorted(items))
    }

    async fn find(&self, id: i64) -> Result<Option<T>> {
        Ok(self.items.get(&id).map(|e| e.value().clone()))
    }

    async fn search(&self, term: &str) -> Result<Vec<T>> {
        let items = self
            .items
            .iter()
            .filter(|e| e.value().search_field().contains(term))
            .map(|e| e.value().clone())
            .collect();
        Ok(self.sorted(items))
    }

    async fn create(&self, draft: T::Draft) -> Result<T> {
        let id = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let entity = T::from_draft(id, draft);
        self.items.insert(id, entity.clone());
        Ok(entity)
    }

    async fn update(&self, mut entity: T) -> Result<Option<T>> {
        match self.items.get_mut(&entity.id()) {
            Some(mut slot) => {
                entity.touch();
                *slot = entity.clone();
                Ok(Some(entity))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.items.remove(&id).is_some())
    }
}

#[async_trait]
impl UserRepository for MemoryRepository<User> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .items
            .iter()
            .find(|e| e.value().username == username)
            .map(|e| e.value().clone()))
    }
}

/// 主题与文章共享的内存存储
///
/// 两张表只保存自身字段，关联在读取时拼装
#[derive(Clone, Default)]
pub struct MemoryBlogStore {
    themes: Arc<MemoryRepository<Theme>>,
    posts: Arc<MemoryRepository<Post>>,
}

impl MemoryBlogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn themes(&self) -> MemoryThemeRepository {
        MemoryThemeRepository {
            store: self.clone(),
        }
    }

    pub fn posts(&self) -> MemoryPostRepository {
        MemoryPostRepository {
            store: self.clone(),
        }
    }

    /// 文章所属主题，不带文章列表
    fn theme_of(&self, theme_id: i64) -> Option<Theme> {
        self.themes.items.get(&theme_id).map(|e| e.value().clone())
    }

    fn resolve_post(&self, mut post: Post) -> Post {
        post.theme = self.theme_of(post.theme_id);
        post
    }

    fn resolve_theme(&self, mut theme: Theme) -> Theme {
        let posts = self
            .posts
            .items
            .iter()
            .filter(|e| e.value().theme_id == theme.id)
            .map(|e| e.value().clone())
            .collect();
        theme.posts = self.posts.sorted(posts);
        theme
    }

    fn require_theme(&self, theme_id: i64) -> Result<()> {
        if self.themes.items.contains_key(&theme_id) {
            Ok(())
        } else {
            Err(ApiError::ThemeNotFound(theme_id))
        }
    }
}

/// 内存主题仓储，读取时附带其下文章
pub struct MemoryThemeRepository {
    store: MemoryBlogStore,
}

#[async_trait]
impl Repository<Theme> for MemoryThemeRepository {
    async fn list(&self) -> Result<Vec<Theme>> {
        let themes = self.store.themes.list().await?;
        Ok(themes.into_iter().map(|t| self.store.resolve_theme(t)).collect())
    }

    async fn find(&self, id: i64) -> Result<Option<Theme>> {
        let theme = self.store.themes.find(id).await?;
        Ok(theme.map(|t| self.store.resolve_theme(t)))
    }

    async fn search(&self, term: &str) -> Result<Vec<Theme>> {
        let themes = self.store.themes.search(term).await?;
        Ok(themes.into_iter().map(|t| self.store.resolve_theme(t)).collect())
    }

    async fn create(&self, draft: NewTheme) -> Result<Theme> {
        self.store.themes.create(draft).await
    }

    async fn update(&self, mut theme: Theme) -> Result<Option<Theme>> {
        theme.posts.clear();
        let updated = self.store.themes.update(theme).await?;
        Ok(updated.map(|t| self.store.resolve_theme(t)))
    }

    /// 级联删除该主题下的文章
    async fn delete(&self, id: i64) -> Result<bool> {
        if !self.store.themes.delete(id).await? {
            return Ok(false);
        }
        self.store.posts.items.retain(|_, post| post.theme_id != id);
        Ok(true)
    }
}

/// 内存文章仓储，读取时附带所属主题
pub struct MemoryPostRepository {
    store: MemoryBlogStore,
}

#[async_trait]
impl Repository<Post> for MemoryPostRepository {
    async fn list(&self) -> Result<Vec<Post>> {
        let posts = self.store.posts.list().await?;
        Ok(posts.into_iter().map(|p| self.store.resolve_post(p)).collect())
    }

    async fn find(&self, id: i64) -> Result<Option<Post>> {
        let post = self.store.posts.find(id).await?;
        Ok(post.map(|p| self.store.resolve_post(p)))
    }

    async fn search(&self, term: &str) -> Result<Vec<Post>> {
        let posts = self.store.posts.search(term).await?;
        Ok(posts.into_iter().map(|p| self.store.resolve_post(p)).collect())
    }

    async fn create(&self, draft: NewPost) -> Result<Post> {
        self.store.require_theme(draft.theme_id)?;
        let post = self.store.posts.create(draft).await?;
        Ok(self.store.resolve_post(post))
    }

    async fn update(&self, mut post: Post) -> Result<Option<Post>> {
        if !self.store.posts.items.contains_key(&post.id) {
            return Ok(None);
        }
        self.store.require_theme(post.theme_id)?;
        post.theme = None;
        let updated = self.store.posts.update(post).await?;
        Ok(updated.map(|p| self.store.resolve_post(p)))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        self.store.posts.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(description: &str) -> NewTheme {
        NewTheme {
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = MemoryRepository::<Theme>::new();
        let first = repo.create(draft("Rust")).await.unwrap();
        let second = repo.create(draft("Go")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_find_missing_is_none() {
        let repo = MemoryRepository::<Theme>::new();
        assert!(repo.find(99).await.unwrap().is_none());
        assert!(!repo.exists(99).await.unwrap());
    }

    #[tokio::test]
    async fn test_search_is_case_sensitive_substring() {
        let repo = MemoryRepository::<Theme>::new();
        repo.create(draft("Programacao Rust")).await.unwrap();
        repo.create(draft("Culinaria")).await.unwrap();

        let found = repo.search("Rust").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].description, "Programacao Rust");
        assert!(repo.search("rust").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repo = MemoryRepository::<Theme>::new();
        let mut theme = repo.create(draft("Rust")).await.unwrap();
        theme.description = "Rust avancado".to_string();

        let updated = repo.update(theme.clone()).await.unwrap().unwrap();
        assert_eq!(updated.description, "Rust avancado");

        let ghost = Theme { id: 42, ..theme };
        assert!(repo.update(ghost).await.unwrap().is_none());

        assert!(repo.delete(updated.id).await.unwrap());
        assert!(!repo.delete(updated.id).await.unwrap());
    }

    fn post_draft(title: &str, theme_id: i64) -> NewPost {
        NewPost {
            title: title.to_string(),
            body: "Texto longo o bastante".to_string(),
            theme_id,
        }
    }

    #[tokio::test]
    async fn test_blog_store_resolves_relations() {
        let store = MemoryBlogStore::new();
        let (themes, posts) = (store.themes(), store.posts());

        let theme = themes.create(draft("Viagens")).await.unwrap();
        let created = posts.create(post_draft("Lisboa", theme.id)).await.unwrap();
        assert_eq!(created.theme.as_ref().map(|t| t.id), Some(theme.id));

        let found = posts.find(created.id).await.unwrap().unwrap();
        let embedded = found.theme.unwrap();
        assert_eq!(embedded.description, "Viagens");
        assert!(embedded.posts.is_empty());

        let theme = themes.find(theme.id).await.unwrap().unwrap();
        assert_eq!(theme.posts.len(), 1);
        assert_eq!(theme.posts[0].title, "Lisboa");
        assert!(theme.posts[0].theme.is_none());

        let listed = themes.list().await.unwrap();
        assert_eq!(listed[0].posts.len(), 1);
    }

    #[tokio::test]
    async fn test_blog_store_rejects_unknown_theme() {
        let store = MemoryBlogStore::new();
        let posts = store.posts();

        let err = posts.create(post_draft("Orfao", 7)).await.unwrap_err();
        assert!(matches!(err, ApiError::ThemeNotFound(7)));
        assert!(posts.list().await.unwrap().is_empty());

        let theme = store.themes().create(draft("Rust")).await.unwrap();
        let mut post = posts.create(post_draft("Ownership", theme.id)).await.unwrap();
        post.theme_id = 8;
        let err = posts.update(post).await.unwrap_err();
        assert!(matches!(err, ApiError::ThemeNotFound(8)));
    }

    #[tokio::test]
    async fn test_theme_update_keeps_posts() {
        let store = MemoryBlogStore::new();
        let (themes, posts) = (store.themes(), store.posts());

        let mut theme = themes.create(draft("Rust")).await.unwrap();
        posts.create(post_draft("Lifetimes", theme.id)).await.unwrap();

        theme.description = "Rust avancado".to_string();
        let updated = themes.update(theme).await.unwrap().unwrap();
        assert_eq!(updated.posts.len(), 1);

        let post = posts.find(1).await.unwrap().unwrap();
        assert_eq!(post.theme.unwrap().description, "Rust avancado");
    }

    #[tokio::test]
    async fn test_theme_delete_cascades_to_posts() {
        let store = MemoryBlogStore::new();
        let (themes, posts) = (store.themes(), store.posts());

        let doomed = themes.create(draft("Viagens")).await.unwrap();
        let kept = themes.create(draft("Culinaria")).await.unwrap();
        let orphan = posts.create(post_draft("Lisboa", doomed.id)).await.unwrap();
        let survivor = posts.create(post_draft("Bacalhau", kept.id)).await.unwrap();

        assert!(themes.delete(doomed.id).await.unwrap());

        assert!(posts.find(orphan.id).await.unwrap().is_none());
        assert!(posts.find(survivor.id).await.unwrap().is_some());
        assert_eq!(posts.list().await.unwrap().len(), 1);
        assert!(!themes.delete(doomed.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_by_username() {
        use crate::models::NewUser;

        let repo = MemoryRepository::<User>::new();
        repo.create(NewUser {
            name: "Maria".to_string(),
            username: "maria@email.com".to_string(),
            password_hash: "hash".to_string(),
            photo: String::new(),
        })
        .await
        .unwrap();

        let found = repo.find_by_username("maria@email.com").await.unwrap();
        assert_eq!(found.map(|u| u.name), Some("Maria".to_string()));
        assert!(repo.find_by_username("joao@email.com").await.unwrap().is_none());
    }
}
