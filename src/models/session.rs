//! 登录会话
//!
//! 会话由外部认证方提供，各流程只读使用，通过参数显式传入。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Organizer,
    Reviewer,
    Author,
    User,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Admin => "admin",
            Role::Organizer => "organizer",
            Role::Reviewer => "reviewer",
            Role::Author => "author",
            Role::User => "user",
            Role::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// 一条角色记录，可能限定在某个会议上
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRecord {
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conference_id: Option<String>,
}

impl RoleRecord {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            conference_id: None,
        }
    }

    pub fn for_conference(role: Role, conference_id: impl Into<String>) -> Self {
        Self {
            role,
            conference_id: Some(conference_id.into()),
        }
    }

    /// 该角色是否作用于指定会议
    pub fn scoped_to(&self, conference_id: &str) -> bool {
        self.conference_id.as_deref() == Some(conference_id)
    }
}

/// 管理员的账户级别
pub const ADMIN_ACCESS_LEVEL: u8 = 1;

/// 当前登录用户
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub email: String,
    /// 账户级别，1 为管理员
    #[serde(default, rename = "role")]
    pub access_level: u8,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.access_level == ADMIN_ACCESS_LEVEL
    }
}

/// 登录会话（auth blob）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
    #[serde(default)]
    pub roles: Vec<RoleRecord>,
}

impl Session {
    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    pub fn email(&self) -> &str {
        &self.user.email
    }

    pub fn has_role(&self, role: Role) -> bool {
        has_role(&self.roles, role)
    }
}

/// 角色列表中是否包含指定角色（不区分会议）
pub fn has_role(roles: &[RoleRecord], role: Role) -> bool {
    roles.iter().any(|r| r.role == role)
}

/// 角色列表中是否包含限定在指定会议上的任一角色
pub fn holds_any_for(roles: &[RoleRecord], wanted: &[Role], conference_id: &str) -> bool {
    roles
        .iter()
        .any(|r| wanted.contains(&r.role) && r.scoped_to(conference_id))
}
