//! 密码处理
//!
//! 提供密码哈希和验证功能

use std::sync::Arc;

use bcrypt::{hash, verify};
use tokio::sync::OnceCell;

use super::AuthError;

/// 占位哈希对应的明文，只用于让“用户不存在”的登录也跑一次 bcrypt
const DECOY_PASSWORD: &str = "decoy-password-never-matches";

/// 对密码进行哈希处理
///
/// 使用 bcrypt 算法生成密码哈希，每次调用使用新的随机盐
pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    hash(password, cost).map_err(|e| AuthError::Hashing(e.to_string()))
}

/// 验证密码
///
/// 比较明文密码与存储的哈希值。存储的哈希格式损坏时同样返回 false。
pub fn verify_password(password: &str, hash: &str) -> bool {
    verify(password, hash).unwrap_or(false)
}

/// 凭证哈希器
///
/// bcrypt 是刻意放慢的 CPU 密集运算，放到阻塞线程池执行，
/// 避免占用异步运行时的工作线程
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
    /// 与真实哈希同代价的占位哈希，首次需要时生成
    decoy: Arc<OnceCell<String>>,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self {
            cost,
            decoy: Arc::new(OnceCell::new()),
        }
    }

    pub async fn hash(&self, password: String) -> Result<String, AuthError> {
        let cost = self.cost;
        tokio::task::spawn_blocking(move || hash_password(&password, cost))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
    }

    pub async fn verify(&self, password: String, hash: String) -> bool {
        tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .unwrap_or(false)
    }

    /// 校验登录凭证
    ///
    /// 找不到用户时（`hash` 为 `None`）仍对占位哈希做一次比对再返回 false，
    /// 使两种失败的耗时一致，无法据此判断用户名是否存在
    pub async fn verify_or_decoy(&self, password: String, hash: Option<String>) -> bool {
        match hash {
            Some(hash) => self.verify(password, hash).await,
            None => {
                match self.decoy_hash().await {
                    Ok(decoy) => {
                        self.verify(password, decoy.clone()).await;
                    }
                    Err(e) => tracing::warn!(error = %e, "Failed to build decoy hash"),
                }
                false
            }
        }
    }

    async fn decoy_hash(&self) -> Result<&String, AuthError> {
        self.decoy
            .get_or_try_init(|| self.hash(DECOY_PASSWORD.to_string()))
            .await
    }
}
