//! # Confizio Submit
//!
//! Confizio 会议管理系统的客户端：表单校验与多步提交流程
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 基础设施层（Clients）
//! - `clients/` - 后端协作方接口（`ConferenceApi` / `AuthorApi` / `ReviewerApi` / `AuthApi`）
//! - `ConfizioClient` - 基于 reqwest 的 HTTP 实现
//! - `SessionStore` - 登录会话的读写
//!
//! ### ② 能力层（Validation / Editor）
//! - `validation/` - 字段校验器与按序执行的规则集
//! - `editor/` - 作者列表与主题槽位编辑器
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 每个表单一个流程：登录、会议创建、论文提交、评审、注册、会议审批等
//! - `workflow/listings` - 待审论文与已登记会议列表
//! - `SubmissionMachine` - 提交状态机（Idle → Validating → Submitting ...）
//! - `Lifetime` - 取消令牌，流程被丢弃时放弃未完成的调用
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量草稿处理器，管理会话和并发
//! - `orchestrator/draft_processor` - 单个草稿处理器
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod editor;
pub mod error;
pub mod models;
pub mod navigation;
pub mod orchestrator;
pub mod utils;
pub mod validation;
pub mod workflow;

// 重新导出常用类型
pub use clients::{AuthApi, AuthorApi, ConferenceApi, ConfizioClient, ReviewerApi};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::Session;
pub use orchestrator::{App, ProcessingStats};
pub use workflow::{
    ConferenceFlow, ConferenceRequests, LoginFlow, PaperFlow, ProfileFlow, RegistrationFlow,
    ReviewFlow, SubmitOutcome,
};
