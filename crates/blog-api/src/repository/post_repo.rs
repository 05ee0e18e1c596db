//! 文章仓储

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::traits::Repository;
use crate::error::{ApiError, Result};
use crate::models::{NewPost, Post, Theme};

/// 文章查询结果行
///
/// `tema_descricao` 为空表示查询没有连接主题表
#[derive(sqlx::FromRow)]
pub(super) struct PostRow {
    id: i64,
    titulo: String,
    texto: String,
    data: DateTime<Utc>,
    tema_id: i64,
    tema_descricao: Option<String>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        let theme = row.tema_descricao.map(|description| Theme {
            id: row.tema_id,
            description,
            posts: Vec::new(),
        });

        Self {
            id: row.id,
            title: row.titulo,
            body: row.texto,
            updated_at: row.data,
            theme_id: row.tema_id,
            theme,
        }
    }
}

/// 主题不存在时外键约束失败
fn map_theme_violation(e: sqlx::Error, theme_id: i64) -> ApiError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_foreign_key_violation() {
            return ApiError::ThemeNotFound(theme_id);
        }
    }
    ApiError::Database(e)
}

/// PostgreSQL 文章仓储
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Post> for PgPostRepository {
    async fn list(&self) -> Result<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT p.id, p.titulo, p.texto, p.data, p.tema_id, t.descricao AS tema_descricao
            FROM tb_postagens p
            JOIN tb_temas t ON t.id = p.tema_id
            ORDER BY p.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn find(&self, id: i64) -> Result<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT p.id, p.titulo, p.texto, p.data, p.tema_id, t.descricao AS tema_descricao
            FROM tb_postagens p
            JOIN tb_temas t ON t.id = p.tema_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Post::from))
    }

    async fn search(&self, term: &str) -> Result<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT p.id, p.titulo, p.texto, p.data, p.tema_id, t.descricao AS tema_descricao
            FROM tb_postagens p
            JOIN tb_temas t ON t.id = p.tema_id
            WHERE p.titulo LIKE $1
            ORDER BY p.id ASC
            "#,
        )
        .bind(format!("%{term}%"))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn create(&self, draft: NewPost) -> Result<Post> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            WITH inserted AS (
                INSERT INTO tb_postagens (titulo, texto, tema_id)
                VALUES ($1, $2, $3)
                RETURNING id, titulo, texto, data, tema_id
            )
            SELECT i.id, i.titulo, i.texto, i.data, i.tema_id, t.descricao AS tema_descricao
            FROM inserted i
            JOIN tb_temas t ON t.id = i.tema_id
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.body)
        .bind(draft.theme_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_theme_violation(e, draft.theme_id))?;

        Ok(row.into())
    }

    async fn update(&self, post: Post) -> Result<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            WITH updated AS (
                UPDATE tb_postagens
                SET titulo = $2, texto = $3, tema_id = $4, data = NOW()
                WHERE id = $1
                RETURNING id, titulo, texto, data, tema_id
            )
            SELECT u.id, u.titulo, u.texto, u.data, u.tema_id, t.descricao AS tema_descricao
            FROM updated u
            JOIN tb_temas t ON t.id = u.tema_id
            "#,
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.body)
        .bind(post.theme_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_theme_violation(e, post.theme_id))?;

        Ok(row.map(Post::from))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tb_postagens WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// 按主题批量加载文章（不附带主题）
pub(super) async fn posts_by_themes(pool: &PgPool, theme_ids: &[i64]) -> Result<Vec<Post>> {
    if theme_ids.is_empty() {
        return Ok(vec![]);
    }

    let rows = sqlx::query_as::<_, PostRow>(
        r#"
        SELECT id, titulo, texto, data, tema_id, NULL::TEXT AS tema_descricao
        FROM tb_postagens
        WHERE tema_id = ANY($1)
        ORDER BY id ASC
        "#,
    )
    .bind(theme_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Post::from).collect())
}
