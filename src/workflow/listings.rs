//! 只读列表：评审人的待审论文、已登记的会议

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::clients::{ConferenceApi, ReviewerApi};
use crate::models::{
    AssignedPaper, ConferenceStatus, ConferenceTarget, RegisteredConference, ReviewTarget,
    Session,
};
use crate::navigation::LOGIN_PATH;
use crate::validation::{Clock, LocalClock};
use crate::workflow::lifetime::Lifetime;

const ASSIGNED_REFUSED: &str = "Failed to fetch assigned papers.";
const ASSIGNED_FAILED: &str = "An error occurred while fetching assigned papers.";
const CONFERENCES_FAILED: &str = "Error fetching conferences.";

/// 管理员编辑会议的入口
pub const UPDATE_CONFERENCE_PATH: &str = "/admindashboard/update-conference";

/// 加载列表的结果；失败时保留原有列表
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOutcome {
    Loaded { count: usize },
    Failed { message: String },
    Cancelled,
}

/// 评审人的待审论文
pub struct AssignedPapers {
    api: Arc<dyn ReviewerApi>,
    reviewer_id: String,
    papers: Vec<AssignedPaper>,
    lifetime: Lifetime,
}

impl AssignedPapers {
    pub fn new(api: Arc<dyn ReviewerApi>, session: &Session) -> Self {
        Self {
            api,
            reviewer_id: session.user_id().to_string(),
            papers: Vec::new(),
            lifetime: Lifetime::new(),
        }
    }

    pub fn papers(&self) -> &[AssignedPaper] {
        &self.papers
    }

    pub fn lifetime(&self) -> &Lifetime {
        &self.lifetime
    }

    pub async fn load(&mut self) -> ListOutcome {
        let result = self
            .lifetime
            .run(self.api.assigned_papers(&self.reviewer_id))
            .await;

        match result {
            None => ListOutcome::Cancelled,
            Some(Ok(reply)) if reply.success == Some(true) => {
                info!("[评审人 {}] 📋 待审论文 {} 篇", self.reviewer_id, reply.data.len());
                self.papers = reply.data;
                ListOutcome::Loaded {
                    count: self.papers.len(),
                }
            }
            Some(Ok(_)) => {
                warn!("[评审人 {}] ❌ 后端拒绝返回待审论文", self.reviewer_id);
                ListOutcome::Failed {
                    message: ASSIGNED_REFUSED.to_string(),
                }
            }
            Some(Err(e)) => {
                error!("[评审人 {}] ❌ 获取待审论文失败: {}", self.reviewer_id, e);
                ListOutcome::Failed {
                    message: ASSIGNED_FAILED.to_string(),
                }
            }
        }
    }

    /// 尚未评审的论文对应的评审表单；已评审或不存在时为 `None`
    pub fn review_target(&self, paper_id: &str) -> Option<ReviewTarget> {
        self.papers
            .iter()
            .find(|p| p.paper_id == paper_id)
            .filter(|p| !p.reviewed_by(&self.reviewer_id))
            .map(|p| p.review_target(&self.reviewer_id))
    }

    pub fn is_reviewed(&self, paper: &AssignedPaper) -> bool {
        paper.reviewed_by(&self.reviewer_id)
    }
}

/// 会议列表中每一行可用的操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConferenceAction {
    /// 管理员：编辑会议
    Edit { path: &'static str },
    /// 尚未批准
    Pending,
    /// 投稿已截止
    Closed,
    /// 可以投稿
    Apply { target: ConferenceTarget },
}

impl ConferenceAction {
    /// 投稿入口路径
    pub fn path(&self) -> Option<String> {
        match self {
            ConferenceAction::Edit { path } => Some(path.to_string()),
            ConferenceAction::Apply { target } => Some(format!(
                "/conference/{}/submit-paper/{}",
                target.acronym, target.id
            )),
            ConferenceAction::Pending | ConferenceAction::Closed => None,
        }
    }
}

/// 已登记的会议（所有状态）
pub struct RegisteredConferences {
    api: Arc<dyn ConferenceApi>,
    session: Option<Arc<Session>>,
    clock: Arc<dyn Clock>,
    conferences: Vec<RegisteredConference>,
    lifetime: Lifetime,
}

impl RegisteredConferences {
    /// `session` 为 `None` 表示未登录浏览
    pub fn new(api: Arc<dyn ConferenceApi>, session: Option<Arc<Session>>) -> Self {
        Self {
            api,
            session,
            clock: Arc::new(LocalClock),
            conferences: Vec::new(),
            lifetime: Lifetime::new(),
        }
    }

    /// 替换日期来源
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn conferences(&self) -> &[RegisteredConference] {
        &self.conferences
    }

    pub fn lifetime(&self) -> &Lifetime {
        &self.lifetime
    }

    pub async fn load(&mut self) -> ListOutcome {
        match self.lifetime.run(self.api.registered_conferences()).await {
            None => ListOutcome::Cancelled,
            Some(Ok(conferences)) => {
                info!("📋 已登记会议 {} 个", conferences.len());
                self.conferences = conferences;
                ListOutcome::Loaded {
                    count: self.conferences.len(),
                }
            }
            Some(Err(e)) => {
                error!("❌ 获取会议列表失败: {}", e);
                ListOutcome::Failed {
                    message: e.user_message(CONFERENCES_FAILED),
                }
            }
        }
    }

    /// 某一行对应的操作，顺序：管理员 → 未批准 → 已截止 → 可投稿
    pub fn action_for(&self, conference: &RegisteredConference) -> ConferenceAction {
        if self.session.as_ref().is_some_and(|s| s.user.is_admin()) {
            return ConferenceAction::Edit {
                path: UPDATE_CONFERENCE_PATH,
            };
        }
        if conference.status != ConferenceStatus::Approved {
            return ConferenceAction::Pending;
        }
        if conference.submission_closed(self.clock.today()) {
            return ConferenceAction::Closed;
        }
        ConferenceAction::Apply {
            target: conference.target(),
        }
    }

    /// 投稿需要登录；未登录时返回登录页
    pub fn apply_path(&self, conference: &RegisteredConference) -> Option<String> {
        let action = self.action_for(conference);
        if !matches!(action, ConferenceAction::Apply { .. }) {
            return None;
        }
        if self.session.is_none() {
            return Some(LOGIN_PATH.to_string());
        }
        action.path()
    }
}
