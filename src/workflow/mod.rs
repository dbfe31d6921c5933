//! 流程层
//!
//! 每个表单（或列表页）一个流程实例，持有表单数据、提交状态机与取消令牌。
//! 流程只依赖 `clients` 中的 trait，会话以 `Arc<Session>` 显式传入。

pub mod auth_flow;
pub mod conference_flow;
pub mod conference_requests;
pub mod lifetime;
pub mod listings;
pub mod paper_flow;
pub mod profile_flow;
pub mod registration_flow;
pub mod review_flow;
pub mod state;

pub use auth_flow::{LoginFlow, PasswordResetFlow};
pub use conference_flow::ConferenceFlow;
pub use conference_requests::{ConferenceRequests, Decision, DecisionOutcome};
pub use lifetime::Lifetime;
pub use listings::{AssignedPapers, ConferenceAction, ListOutcome, RegisteredConferences};
pub use paper_flow::{FileOutcome, PaperFlow};
pub use profile_flow::ProfileFlow;
pub use registration_flow::RegistrationFlow;
pub use review_flow::ReviewFlow;
pub use state::{SubmissionMachine, SubmissionState, SubmitOutcome};
