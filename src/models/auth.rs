//! 登录、找回密码与个人资料

use serde::{Deserialize, Serialize};

use crate::models::session::{RoleRecord, Session, SessionUser};

/// 登录表单（原样作为请求体发送）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// `login` 的返回，成功时整体即为 auth blob
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoginResponse {
    pub success: Option<bool>,
    pub message: Option<String>,
    pub token: Option<String>,
    pub user: Option<SessionUser>,
    pub roles: Vec<RoleRecord>,
}

impl LoginResponse {
    /// 只有显式成功且带 token 与用户信息时才构成会话
    pub fn into_session(self) -> Option<Session> {
        if self.success != Some(true) {
            return None;
        }
        Some(Session {
            token: self.token?,
            user: self.user?,
            roles: self.roles,
        })
    }

    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

/// 找回密码表单
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordResetForm {
    pub email: String,
    pub recovery_key: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

/// 个人资料表单；密码留空表示不修改
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub address: String,
}

impl ProfileForm {
    pub fn from_user(user: &SessionUser) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            password: String::new(),
            phone: user.phone.clone(),
            address: user.address.clone(),
        }
    }
}

/// `profile` 的返回：`{ error }` 或 `{ updatedUser }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileResponse {
    pub error: Option<String>,
    pub updated_user: Option<SessionUser>,
}
