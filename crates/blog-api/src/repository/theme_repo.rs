//! 主题仓储

use async_trait::async_trait;
use sqlx::PgPool;

use super::post_repo::posts_by_themes;
use super::traits::Repository;
use crate::error::Result;
use crate::models::{NewTheme, Theme};

/// PostgreSQL 主题仓储
///
/// 读取主题时一并加载其下的文章
pub struct PgThemeRepository {
    pool: PgPool,
}

impl PgThemeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn with_posts(&self, mut themes: Vec<Theme>) -> Result<Vec<Theme>> {
        let ids: Vec<i64> = themes.iter().map(|t| t.id).collect();
        for post in posts_by_themes(&self.pool, &ids).await? {
            if let Some(theme) = themes.iter_mut().find(|t| t.id == post.theme_id) {
                theme.posts.push(post);
            }
        }
        Ok(themes)
    }
}

#[async_trait]
impl Repository<Theme> for PgThemeRepository {
    async fn list(&self) -> Result<Vec<Theme>> {
        let themes = sqlx::query_as::<_, Theme>(
            "SELECT id, descricao FROM tb_temas ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        self.with_posts(themes).await
    }

    async fn find(&self, id: i64) -> Result<Option<Theme>> {
        let theme = sqlx::query_as::<_, Theme>("SELECT id, descricao FROM tb_temas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match theme {
            Some(theme) => Ok(self.with_posts(vec![theme]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn search(&self, term: &str) -> Result<Vec<Theme>> {
        let themes = sqlx::query_as::<_, Theme>(
            r#"
            SELECT id, descricao
            FROM tb_temas
            WHERE descricao LIKE $1
            ORDER BY id ASC
            "#,
        )
        .bind(format!("%{term}%"))
        .fetch_all(&self.pool)
        .await?;

        self.with_posts(themes).await
    }

    async fn create(&self, draft: NewTheme) -> Result<Theme> {
        let theme = sqlx::query_as::<_, Theme>(
            "INSERT INTO tb_temas (descricao) VALUES ($1) RETURNING id, descricao",
        )
        .bind(&draft.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(theme)
    }

    async fn update(&self, theme: Theme) -> Result<Option<Theme>> {
        let updated = sqlx::query_as::<_, Theme>(
            "UPDATE tb_temas SET descricao = $2 WHERE id = $1 RETURNING id, descricao",
        )
        .bind(theme.id)
        .bind(&theme.description)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(theme) => Ok(self.with_posts(vec![theme]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 文章随外键级联删除
    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tb_temas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
