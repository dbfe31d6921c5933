//! 外部协作方接口
//!
//! 各流程只依赖这里的 trait；`ConfizioClient` 是基于 HTTP 的默认实现，
//! 测试中以内存实现替换。

pub mod confizio_client;
pub mod session_store;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::{
    ApiMessage, AssignedPapersResponse, ComplianceReport, ConferenceDetails, ConferencePayload,
    LoginForm, LoginResponse, PaperFile, PaperPayload, PasswordResetForm, PendingConference,
    ProfileForm, ProfileResponse, RegisterPayload, RegisteredConference, ReviewPayload,
};

pub use confizio_client::ConfizioClient;
pub use session_store::{FileSessionStore, SessionStore};

/// 会议相关接口
#[async_trait]
pub trait ConferenceApi: Send + Sync {
    /// 获取会议详情（名称、专长列表）
    async fn fetch_conference(&self, conference_id: &str) -> Result<ConferenceDetails, ApiError>;

    /// 提交会议创建申请
    async fn submit_conference(&self, payload: &ConferencePayload) -> Result<ApiMessage, ApiError>;

    /// 待审批的会议申请
    async fn pending_conferences(&self) -> Result<Vec<PendingConference>, ApiError>;

    async fn approve_conference(&self, conference_id: &str) -> Result<(), ApiError>;

    async fn reject_conference(&self, conference_id: &str) -> Result<(), ApiError>;

    /// 所有已登记的会议（不区分审批状态）
    async fn registered_conferences(&self) -> Result<Vec<RegisteredConference>, ApiError>;
}

/// 作者相关接口
#[async_trait]
pub trait AuthorApi: Send + Sync {
    /// 对稿件做格式合规检查
    async fn check_compliance(&self, file: &PaperFile) -> Result<ComplianceReport, ApiError>;

    /// 提交论文（multipart）
    async fn submit_paper(&self, payload: &PaperPayload) -> Result<ApiMessage, ApiError>;
}

/// 评审相关接口
#[async_trait]
pub trait ReviewerApi: Send + Sync {
    async fn submit_review(&self, payload: &ReviewPayload) -> Result<ApiMessage, ApiError>;

    /// 分配给该评审人的论文
    async fn assigned_papers(&self, reviewer_id: &str)
        -> Result<AssignedPapersResponse, ApiError>;
}

/// 认证相关接口
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn register(&self, payload: &RegisterPayload) -> Result<ApiMessage, ApiError>;

    async fn login(&self, form: &LoginForm) -> Result<LoginResponse, ApiError>;

    /// 凭恢复密钥重设密码
    async fn forgot_password(&self, form: &PasswordResetForm) -> Result<ApiMessage, ApiError>;

    /// 更新当前用户的资料（需要登录）
    async fn update_profile(&self, form: &ProfileForm) -> Result<ProfileResponse, ApiError>;
}
