//! JWT Token 处理
//!
//! 提供 JWT Token 的生成和验证功能。Token 无状态，服务端不保存会话，
//! 过期是唯一的失效方式。

use axum::http::{HeaderMap, header::AUTHORIZATION};
use blog_shared::config::AuthConfig;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

use super::AuthError;

/// Authorization 头中 Bearer 方案的前缀
pub const BEARER_PREFIX: &str = "Bearer ";

/// JWT 配置
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// 签名密钥
    pub secret: String,
    /// Token 过期时间（秒）
    pub expires_in_secs: i64,
    /// Token 签发者
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        AuthConfig::default().into()
    }
}

impl From<AuthConfig> for JwtConfig {
    fn from(config: AuthConfig) -> Self {
        Self {
            secret: config.jwt_secret,
            expires_in_secs: config.token_lifetime_secs,
            issuer: config.issuer,
        }
    }
}

/// JWT Claims（Token 载荷）
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// 用户名
    pub sub: String,
    /// 签发时间
    pub iat: i64,
    /// 过期时间
    pub exp: i64,
    /// 签发者
    pub iss: String,
}

/// JWT 管理器
#[derive(Clone)]
pub struct JwtManager {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtManager {
    /// 创建 JWT 管理器
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        // 过期判定严格按 exp，不留宽限
        validation.leeway = 0;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// 生成 JWT Token
    ///
    /// 返回 (token, 过期时间戳)
    pub fn generate_token(&self, subject: &str) -> Result<(String, i64), AuthError> {
        self.generate_token_at(subject, Utc::now())
    }

    /// 以指定签发时间生成 JWT Token
    pub fn generate_token_at(
        &self,
        subject: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<(String, i64), AuthError> {
        if self.config.secret.is_empty() {
            return Err(AuthError::Signing("签名密钥未配置".to_string()));
        }

        let exp = issued_at + Duration::seconds(self.config.expires_in_secs);
        let claims = Claims {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: exp.timestamp(),
            iss: self.config.issuer.clone(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))?;

        Ok((token, exp.timestamp()))
    }

    /// 验证并解析 JWT Token
    ///
    /// 返回解析后的 Claims，如果 Token 无效或过期则返回错误
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                    ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                    _ => AuthError::MalformedToken,
                }
            })?;

        Ok(token_data.claims)
    }

    /// 从请求头中提取并验证 Bearer Token
    pub fn verify_request(&self, headers: &HeaderMap) -> Result<Claims, AuthError> {
        let token = bearer_token(headers)?;
        self.verify_token(token)
    }

    /// 获取 Token 过期时间（秒）
    pub fn expires_in_secs(&self) -> i64 {
        self.config.expires_in_secs
    }
}

/// 提取 `Authorization: Bearer <token>` 中的 token
fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::MalformedToken)?;

    match value.strip_prefix(BEARER_PREFIX) {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        Some(_) => Err(AuthError::MissingToken),
        None => Err(AuthError::MissingToken),
    }
}
