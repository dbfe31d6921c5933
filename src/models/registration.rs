use serde::{Deserialize, Serialize};

use crate::models::session::Role;

/// 注册邀请（来自查询参数 `role` / `conferenceId` / `conferenceName`）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistrationInvite {
    pub role: Option<Role>,
    pub conference_id: Option<String>,
    pub conference_name: Option<String>,
}

impl RegistrationInvite {
    pub fn is_reviewer(&self) -> bool {
        self.role == Some(Role::Reviewer)
    }
}

/// 注册表单
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub address: String,
    pub recovery_key: String,
    pub expertise: Vec<String>,
}

/// 注册请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub address: String,
    #[serde(rename = "recovery_key")]
    pub recovery_key: String,
    pub expertise: Vec<String>,
    pub conference_name: Option<String>,
    pub conference_id: Option<String>,
    pub role: Option<Role>,
}

impl RegisterPayload {
    pub fn assemble(form: &RegistrationForm, invite: &RegistrationInvite) -> Self {
        Self {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            password: form.password.clone(),
            phone: form.phone.trim().to_string(),
            address: form.address.trim().to_string(),
            recovery_key: form.recovery_key.clone(),
            expertise: form.expertise.clone(),
            conference_name: invite.conference_name.clone(),
            conference_id: invite.conference_id.clone(),
            role: invite.role,
        }
    }
}
