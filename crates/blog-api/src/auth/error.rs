//! 认证错误类型

/// 凭证哈希与 Token 签发/校验过程中的错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("密码哈希失败: {0}")]
    Hashing(String),
    #[error("Token 签发失败: {0}")]
    Signing(String),
    #[error("缺少认证 Token")]
    MissingToken,
    #[error("Token 格式无效")]
    MalformedToken,
    #[error("Token 已过期")]
    ExpiredToken,
    #[error("Token 签名无效")]
    InvalidSignature,
}

impl AuthError {
    /// 用于日志和指标标签的简短原因
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Hashing(_) => "hashing",
            Self::Signing(_) => "signing",
            Self::MissingToken => "missing_token",
            Self::MalformedToken => "malformed_token",
            Self::ExpiredToken => "expired_token",
            Self::InvalidSignature => "invalid_signature",
        }
    }

    /// 是否为请求携带的 Token 本身的问题（对客户端统一返回 401）
    pub fn is_token_rejection(&self) -> bool {
        matches!(
            self,
            Self::MissingToken | Self::MalformedToken | Self::ExpiredToken | Self::InvalidSignature
        )
    }
}
