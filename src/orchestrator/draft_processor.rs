//! 单个草稿处理器 - 编排层
//!
//! ## 职责
//!
//! 按草稿类型创建对应的流程，填充表单，提交并记录结果。
//!
//! 1. **会议草稿**：`ConferenceFlow`
//! 2. **论文草稿**：`PaperFlow`（读取稿件 → 合规检查 → 提交 → 按配置处理低合规度确认）
//! 3. **评审草稿**：`ReviewFlow`
//! 4. **文件清理**：按配置删除已成功提交的草稿

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::clients::{AuthorApi, ConferenceApi, ReviewerApi};
use crate::config::Config;
use crate::models::loaders::{PaperDraft, ReviewDraft};
use crate::models::{load_paper_file, ConferenceForm, ConferenceTarget, Draft, DraftFile, Session};
use crate::utils::truncate_text;
use crate::workflow::{ConferenceFlow, FileOutcome, PaperFlow, ReviewFlow, SubmitOutcome};

/// 草稿处理所需的后端协作方
#[derive(Clone)]
pub struct Backends {
    pub conferences: Arc<dyn ConferenceApi>,
    pub authors: Arc<dyn AuthorApi>,
    pub reviewers: Arc<dyn ReviewerApi>,
}

impl Backends {
    /// 三个接口由同一个实现提供
    pub fn shared<C>(client: C) -> Self
    where
        C: ConferenceApi + AuthorApi + ReviewerApi + 'static,
    {
        let client = Arc::new(client);
        Self {
            conferences: client.clone(),
            authors: client.clone(),
            reviewers: client,
        }
    }
}

/// 处理单个草稿
///
/// # 参数
/// - `backends`: 后端协作方
/// - `session`: 登录会话
/// - `draft`: 已加载的草稿
/// - `draft_index`: 草稿索引（用于日志）
/// - `config`: 配置
///
/// # 返回
/// 返回是否提交成功
pub async fn process_draft(
    backends: &Backends,
    session: Arc<Session>,
    draft: DraftFile,
    draft_index: usize,
    config: &Config,
) -> Result<bool> {
    info!(
        "[草稿 {}] 📄 {} ({})",
        draft_index,
        draft.display_name(),
        draft.draft.kind()
    );

    let outcome = match &draft.draft {
        Draft::Conference(form) => submit_conference(backends, session, form.clone()).await?,
        Draft::Paper(paper) => {
            submit_paper(backends, session, &draft, paper, draft_index, config).await?
        }
        Draft::Review(review) => submit_review(backends, review).await?,
    };

    let submitted = report_outcome(draft_index, &outcome);

    if submitted && config.remove_submitted_drafts {
        tokio::fs::remove_file(&draft.path)
            .await
            .with_context(|| format!("无法删除草稿文件: {}", draft.path.display()))?;
        info!("[草稿 {}] 🗑️ 已删除草稿文件", draft_index);
    }

    Ok(submitted)
}

async fn submit_conference(
    backends: &Backends,
    session: Arc<Session>,
    form: ConferenceForm,
) -> Result<SubmitOutcome> {
    let mut flow = ConferenceFlow::new(backends.conferences.clone(), session);
    flow.load_form(form);
    Ok(flow.submit().await?)
}

async fn submit_paper(
    backends: &Backends,
    session: Arc<Session>,
    draft: &DraftFile,
    paper: &PaperDraft,
    draft_index: usize,
    config: &Config,
) -> Result<SubmitOutcome> {
    let target = ConferenceTarget::new(&paper.conference_id, &paper.conference_acronym);
    let mut flow = PaperFlow::new(
        backends.conferences.clone(),
        backends.authors.clone(),
        session,
        target,
    );

    // 会议名称只用于展示，获取失败不影响提交
    if let Err(e) = flow.load_conference().await {
        warn!("[草稿 {}] ⚠️ 无法获取会议名称: {}", draft_index, e);
    }

    *flow.form_mut() = paper.form();
    flow.authors_mut()
        .fill_from(&paper.corresponding_author, &paper.co_authors)
        .with_context(|| format!("草稿 {} 的作者信息无效", draft.display_name()))?;

    let file = load_paper_file(&draft.resolve(&paper.file)).await?;
    match flow.select_file(file).await {
        FileOutcome::Rejected(e) => return Ok(SubmitOutcome::Blocked(e)),
        FileOutcome::Cancelled => return Ok(SubmitOutcome::Cancelled),
        FileOutcome::Checked(report) => {
            info!("[草稿 {}] ✓ 合规度 {}", draft_index, report);
        }
        FileOutcome::CheckFailed { message } => {
            warn!("[草稿 {}] ⚠️ 合规检查失败，继续提交: {}", draft_index, message);
        }
    }

    info!(
        "[草稿 {}] 摘要 {} 词: {}",
        draft_index,
        flow.abstract_word_count(),
        truncate_text(&flow.form().abstract_text, 40)
    );

    match flow.submit().await? {
        SubmitOutcome::ConfirmationRequired { percentage } if config.confirm_low_compliance => {
            info!("[草稿 {}] 合规度 {}%，按配置确认提交", draft_index, percentage);
            Ok(flow.confirm().await?)
        }
        SubmitOutcome::ConfirmationRequired { percentage } => {
            flow.cancel_confirmation()?;
            Ok(SubmitOutcome::Failed {
                message: format!("合规度 {}% 低于阈值，未确认提交", percentage),
            })
        }
        other => Ok(other),
    }
}

async fn submit_review(backends: &Backends, review: &ReviewDraft) -> Result<SubmitOutcome> {
    let mut flow = ReviewFlow::new(backends.reviewers.clone(), review.target());
    flow.load_scores(review.scores.clone());
    Ok(flow.submit().await?)
}

/// 记录结果，返回是否提交成功
fn report_outcome(draft_index: usize, outcome: &SubmitOutcome) -> bool {
    match outcome {
        SubmitOutcome::Submitted { message } => {
            info!("[草稿 {}] ✅ {}", draft_index, message);
        }
        SubmitOutcome::Blocked(e) => {
            warn!("[草稿 {}] ⚠️ 校验未通过: {}", draft_index, e);
        }
        SubmitOutcome::Failed { message } => {
            error!("[草稿 {}] ❌ {}", draft_index, message);
        }
        SubmitOutcome::ConfirmationRequired { percentage } => {
            warn!("[草稿 {}] ⚠️ 等待确认 (合规度 {}%)", draft_index, percentage);
        }
        SubmitOutcome::Cancelled => {
            warn!("[草稿 {}] 已取消", draft_index);
        }
    }
    outcome.is_submitted()
}
