//! 会议申请审批（管理员）

use std::sync::Arc;
use tracing::{error, info};

use crate::clients::ConferenceApi;
use crate::error::{AppResult, WorkflowError};
use crate::models::PendingConference;
use crate::workflow::lifetime::Lifetime;

/// 审批动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    fn success_message(self) -> &'static str {
        match self {
            Decision::Approve => "Conference approved successfully!",
            Decision::Reject => "Conference rejected successfully!",
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            Decision::Approve => "Error approving conference.",
            Decision::Reject => "Error rejecting conference.",
        }
    }
}

/// 审批结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionOutcome {
    /// 成功，对应行已移除
    Done { message: String },
    /// 失败，列表保持不变
    Failed { message: String },
    Cancelled,
}

pub struct ConferenceRequests {
    api: Arc<dyn ConferenceApi>,
    pending: Vec<PendingConference>,
    lifetime: Lifetime,
}

impl ConferenceRequests {
    pub fn new(api: Arc<dyn ConferenceApi>) -> Self {
        Self {
            api,
            pending: Vec::new(),
            lifetime: Lifetime::new(),
        }
    }

    pub fn pending(&self) -> &[PendingConference] {
        &self.pending
    }

    pub fn lifetime(&self) -> &Lifetime {
        &self.lifetime
    }

    /// 拉取待审批列表
    pub async fn load(&mut self) -> AppResult<&[PendingConference]> {
        let pending = self
            .lifetime
            .run(self.api.pending_conferences())
            .await
            .ok_or(WorkflowError::Cancelled)??;

        info!("📋 待审批会议 {} 个", pending.len());
        self.pending = pending;
        Ok(&self.pending)
    }

    pub async fn approve(&mut self, conference_id: &str) -> DecisionOutcome {
        self.decide(conference_id, Decision::Approve).await
    }

    pub async fn reject(&mut self, conference_id: &str) -> DecisionOutcome {
        self.decide(conference_id, Decision::Reject).await
    }

    async fn decide(&mut self, conference_id: &str, decision: Decision) -> DecisionOutcome {
        let api = Arc::clone(&self.api);
        let call = async move {
            match decision {
                Decision::Approve => api.approve_conference(conference_id).await,
                Decision::Reject => api.reject_conference(conference_id).await,
            }
        };

        match self.lifetime.run(call).await {
            None => DecisionOutcome::Cancelled,
            Some(Ok(())) => {
                info!("[会议 {}] ✅ {:?}", conference_id, decision);
                self.pending.retain(|c| c.id != conference_id);
                DecisionOutcome::Done {
                    message: decision.success_message().to_string(),
                }
            }
            Some(Err(e)) => {
                error!("[会议 {}] ❌ {:?} 失败: {}", conference_id, decision, e);
                DecisionOutcome::Failed {
                    message: decision.failure_message().to_string(),
                }
            }
        }
    }
}
