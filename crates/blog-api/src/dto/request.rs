//! 请求 DTO 定义
//!
//! 缺失的字段按空值反序列化，再由字段校验统一报告，
//! 保证客户端收到的是校验错误而不是解析错误

use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use crate::models::{NewPost, NewTheme, NewUser, Post, Theme, User};

/// 创建/更新主题请求
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ThemeRequest {
    /// 更新时指定目标主题
    pub id: i64,
    #[validate(length(min = 1, max = 255, message = "descricao é obrigatória"))]
    pub descricao: String,
}

impl ThemeRequest {
    pub fn into_draft(self) -> NewTheme {
        NewTheme {
            description: self.descricao,
        }
    }

    pub fn into_theme(self) -> Theme {
        Theme {
            id: self.id,
            description: self.descricao,
            posts: Vec::new(),
        }
    }
}

/// 创建/更新文章请求
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct PostRequest {
    pub id: i64,
    #[validate(length(min = 5, max = 100, message = "titulo deve ter entre 5 e 100 caracteres"))]
    pub titulo: String,
    #[validate(length(min = 10, max = 1000, message = "texto deve ter entre 10 e 1000 caracteres"))]
    pub texto: String,
    #[validate(range(min = 1, message = "tema_id é obrigatório"))]
    pub tema_id: i64,
}

impl PostRequest {
    pub fn into_draft(self) -> NewPost {
        NewPost {
            title: self.titulo,
            body: self.texto,
            theme_id: self.tema_id,
        }
    }

    pub fn into_post(self) -> Post {
        Post {
            id: self.id,
            title: self.titulo,
            body: self.texto,
            updated_at: Utc::now(),
            theme_id: self.tema_id,
            theme: None,
        }
    }
}

/// 注册/更新用户请求
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UserRequest {
    pub id: i64,
    #[validate(length(min = 1, max = 255, message = "nome é obrigatório"))]
    pub nome: String,
    #[validate(length(min = 1, max = 255, message = "usuario é obrigatório"))]
    pub usuario: String,
    #[validate(length(min = 8, message = "senha deve ter no mínimo 8 caracteres"))]
    pub senha: String,
    #[validate(length(max = 500, message = "foto deve ter no máximo 500 caracteres"))]
    pub foto: String,
}

impl UserRequest {
    /// 明文密码由调用方先行哈希
    pub fn into_new_user(self, password_hash: String) -> NewUser {
        NewUser {
            name: self.nome,
            username: self.usuario,
            password_hash,
            photo: self.foto,
        }
    }

    pub fn into_user(self, password_hash: String) -> User {
        User {
            id: self.id,
            name: self.nome,
            username: self.usuario,
            password_hash,
            photo: self.foto,
        }
    }
}

/// 登录请求
///
/// 不做字段校验：缺失或为空的凭证与错误凭证一样按登录失败处理
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub usuario: String,
    pub senha: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_request_limits() {
        let valid = PostRequest {
            titulo: "Titulo ok".to_string(),
            texto: "Texto com tamanho suficiente".to_string(),
            tema_id: 1,
            ..Default::default()
        };
        assert!(valid.validate().is_ok());

        let short_title = PostRequest {
            titulo: "abc".to_string(),
            ..valid_post()
        };
        let errors = short_title.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("titulo"));

        let no_theme = PostRequest {
            tema_id: 0,
            ..valid_post()
        };
        let errors = no_theme.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("tema_id"));
    }

    fn valid_post() -> PostRequest {
        PostRequest {
            titulo: "Titulo ok".to_string(),
            texto: "Texto com tamanho suficiente".to_string(),
            tema_id: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_fields_fail_validation_not_parsing() {
        let request: UserRequest = serde_json::from_str(r#"{"nome":"Maria"}"#).unwrap();
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("usuario"));
        assert!(fields.contains_key("senha"));
        assert!(!fields.contains_key("nome"));
        assert!(!fields.contains_key("foto"));
    }

    #[test]
    fn test_login_request_accepts_missing_fields() {
        let request: LoginRequest = serde_json::from_str("{}").unwrap();
        assert!(request.usuario.is_empty());
        assert!(request.senha.is_empty());
    }

    #[test]
    fn test_short_password_rejected() {
        let request = UserRequest {
            nome: "Maria".to_string(),
            usuario: "maria@email.com".to_string(),
            senha: "1234567".to_string(),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }
}
