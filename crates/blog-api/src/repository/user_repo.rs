//! 用户仓储

use async_trait::async_trait;
use sqlx::PgPool;

use super::traits::{Repository, UserRepository};
use crate::error::{ApiError, Result};
use crate::models::{NewUser, User};

/// 用户名唯一约束冲突
fn map_unique_violation(e: sqlx::Error) -> ApiError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return ApiError::AlreadyRegistered;
        }
    }
    ApiError::Database(e)
}

/// PostgreSQL 用户仓储
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<User> for PgUserRepository {
    async fn list(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, nome, usuario, senha, foto FROM tb_usuarios ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn find(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, nome, usuario, senha, foto FROM tb_usuarios WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn search(&self, term: &str) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, nome, usuario, senha, foto
            FROM tb_usuarios
            WHERE nome LIKE $1
            ORDER BY id ASC
            "#,
        )
        .bind(format!("%{term}%"))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn create(&self, draft: NewUser) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO tb_usuarios (nome, usuario, senha, foto)
            VALUES ($1, $2, $3, $4)
            RETURNING id, nome, usuario, senha, foto
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.username)
        .bind(&draft.password_hash)
        .bind(&draft.photo)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<Option<User>> {
        let updated = sqlx::query_as::<_, User>(
            r#"
            UPDATE tb_usuarios
            SET nome = $2, usuario = $3, senha = $4, foto = $5
            WHERE id = $1
            RETURNING id, nome, usuario, senha, foto
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.photo)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tb_usuarios WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, nome, usuario, senha, foto FROM tb_usuarios WHERE usuario = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
