//! PostgreSQL 仓储集成测试
//!
//! 需要可用的数据库：TEST_DATABASE_URL=postgres://... cargo test -- --ignored

use blog_api::models::{NewPost, NewTheme, NewUser};
use blog_api::repository::{
    PgPostRepository, PgThemeRepository, PgUserRepository, Repository, UserRepository,
};
use blog_api::ApiError;
use blog_shared::config::DatabaseConfig;
use blog_shared::database::Database;

async fn database() -> Database {
    let config = DatabaseConfig {
        url: std::env::var("TEST_DATABASE_URL").unwrap_or_else(|_| DatabaseConfig::default().url),
        ..Default::default()
    };
    let db = Database::connect(&config).await.unwrap();
    db.run_migrations().await.unwrap();
    db
}

#[tokio::test]
#[ignore] // 需要数据库连接
async fn test_theme_delete_cascades_to_posts() {
    let db = database().await;
    let themes = PgThemeRepository::new(db.pool().clone());
    let posts = PgPostRepository::new(db.pool().clone());

    let theme = themes
        .create(NewTheme {
            description: "Tema em cascata".to_string(),
        })
        .await
        .unwrap();
    let post = posts
        .create(NewPost {
            title: "Post em cascata".to_string(),
            body: "Este post some junto com o tema.".to_string(),
            theme_id: theme.id,
        })
        .await
        .unwrap();
    assert_eq!(post.theme.as_ref().map(|t| t.id), Some(theme.id));

    let loaded = themes.find(theme.id).await.unwrap().unwrap();
    assert!(loaded.posts.iter().any(|p| p.id == post.id));

    assert!(themes.delete(theme.id).await.unwrap());
    assert!(posts.find(post.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore] // 需要数据库连接
async fn test_post_with_unknown_theme_is_theme_not_found() {
    let db = database().await;
    let posts = PgPostRepository::new(db.pool().clone());

    let result = posts
        .create(NewPost {
            title: "Sem tema".to_string(),
            body: "Referencia um tema que nao existe.".to_string(),
            theme_id: i64::MAX,
        })
        .await;

    assert!(matches!(result, Err(ApiError::ThemeNotFound(_))));
}

#[tokio::test]
#[ignore] // 需要数据库连接
async fn test_duplicate_username_is_already_registered() {
    let db = database().await;
    let users = PgUserRepository::new(db.pool().clone());
    let username = format!("dup-{}@email.com", chrono::Utc::now().timestamp_micros());
    let draft = NewUser {
        name: "Duplicado".to_string(),
        username: username.clone(),
        password_hash: "hash".to_string(),
        photo: String::new(),
    };

    let user = users.create(draft.clone()).await.unwrap();
    assert!(matches!(
        users.create(draft).await,
        Err(ApiError::AlreadyRegistered)
    ));

    let found = users.find_by_username(&username).await.unwrap().unwrap();
    assert_eq!(found.id, user.id);
    assert!(users.delete(user.id).await.unwrap());
}
