//! 论文提交流程
//!
//! 流程顺序：
//! 1. 选择稿件 → PDF 检查 → `check_compliance`
//! 2. 编辑作者与文本字段
//! 3. 提交 → 按序校验 → 合规度不足时等待确认 → `submit_paper`
//! 4. 成功后全部重置（含稿件与合规报告），失败时保留数据

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::clients::{AuthorApi, ConferenceApi};
use crate::editor::AuthorList;
use crate::error::{AppResult, EditorError, ValidationError, WorkflowError};
use crate::models::{
    AuthorField, ComplianceReport, ConferenceTarget, FieldEvent, PaperFile, PaperForm,
    PaperPayload, Session,
};
use crate::validation::field::{check_pdf, compliance_requires_confirmation, word_count};
use crate::validation::{paper_rules, PaperSubmission};
use crate::workflow::lifetime::Lifetime;
use crate::workflow::state::{SubmissionMachine, SubmissionState, SubmitOutcome};

const SUBMITTED: &str = "Submission successful!";
const SUBMIT_FAILED: &str = "Error while submitting your paper";
const COMPLIANCE_FAILED: &str = "Error performing compliance check.";

/// 选择稿件的结果
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// 不是 PDF，稿件与报告均已清空
    Rejected(ValidationError),
    /// 合规检查完成
    Checked(ComplianceReport),
    /// 合规检查失败，稿件保留、报告为空
    CheckFailed { message: String },
    Cancelled,
}

pub struct PaperFlow {
    conferences: Arc<dyn ConferenceApi>,
    authors_api: Arc<dyn AuthorApi>,
    session: Arc<Session>,
    conference: ConferenceTarget,
    form: PaperForm,
    authors: AuthorList,
    file: Option<PaperFile>,
    compliance: Option<ComplianceReport>,
    machine: SubmissionMachine,
    lifetime: Lifetime,
}

impl PaperFlow {
    pub fn new(
        conferences: Arc<dyn ConferenceApi>,
        authors_api: Arc<dyn AuthorApi>,
        session: Arc<Session>,
        conference: ConferenceTarget,
    ) -> Self {
        let authors = AuthorList::new(session.email());
        Self {
            conferences,
            authors_api,
            session,
            conference,
            form: PaperForm::default(),
            authors,
            file: None,
            compliance: None,
            machine: SubmissionMachine::new(),
            lifetime: Lifetime::new(),
        }
    }

    /// 获取会议名称（提交时随论文一起发送）
    pub async fn load_conference(&mut self) -> AppResult<&ConferenceTarget> {
        let id = self.conference.id.clone();
        let details = self
            .lifetime
            .run(self.conferences.fetch_conference(&id))
            .await
            .ok_or(WorkflowError::Cancelled)?
            .map_err(|e| {
                error!("[会议 {}] ❌ 获取会议详情失败: {}", id, e);
                e
            })?;

        debug!("[会议 {}] 会议名称: {}", id, details.conference_name);
        self.conference.name = details.conference_name;
        Ok(&self.conference)
    }

    pub fn conference(&self) -> &ConferenceTarget {
        &self.conference
    }

    pub fn form(&self) -> &PaperForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut PaperForm {
        &mut self.form
    }

    /// 摘要实时字数
    pub fn abstract_word_count(&self) -> usize {
        word_count(&self.form.abstract_text)
    }

    pub fn authors(&self) -> &AuthorList {
        &self.authors
    }

    pub fn add_author(&mut self) -> Result<usize, EditorError> {
        self.authors.add_author()
    }

    pub fn remove_author(&mut self, index: usize) -> bool {
        self.authors.remove_author(index)
    }

    pub fn update_author_field(
        &mut self,
        index: usize,
        field: AuthorField,
        event: &FieldEvent,
    ) -> Result<bool, EditorError> {
        self.authors.update_author_field(index, field, event)
    }

    /// 可变访问作者列表（草稿填充用）
    pub fn authors_mut(&mut self) -> &mut AuthorList {
        &mut self.authors
    }

    pub fn file(&self) -> Option<&PaperFile> {
        self.file.as_ref()
    }

    pub fn compliance(&self) -> Option<&ComplianceReport> {
        self.compliance.as_ref()
    }

    pub fn state(&self) -> SubmissionState {
        self.machine.state()
    }

    pub fn submit_enabled(&self) -> bool {
        self.machine.submit_enabled()
    }

    pub fn lifetime(&self) -> &Lifetime {
        &self.lifetime
    }

    /// 选择稿件并进行合规检查
    pub async fn select_file(&mut self, file: PaperFile) -> FileOutcome {
        // 换稿件后旧的确认请求失效
        self.machine.block();
        self.compliance = None;

        if let Err(e) = check_pdf(&file) {
            warn!("[{}] ⚠️ 拒绝非 PDF 稿件: {}", file.file_name, file.mime_type);
            self.file = None;
            return FileOutcome::Rejected(e);
        }

        info!("[{}] 🔍 正在进行合规检查...", file.file_name);
        let file = self.file.insert(file);
        let result = self
            .lifetime
            .run(self.authors_api.check_compliance(file))
            .await;

        match result {
            None => FileOutcome::Cancelled,
            Some(Ok(report)) => {
                info!("[{}] ✓ 合规检查完成: {}", file.file_name, report);
                self.compliance = Some(report.clone());
                FileOutcome::Checked(report)
            }
            Some(Err(e)) => {
                error!("[{}] ❌ 合规检查失败: {}", file.file_name, e);
                FileOutcome::CheckFailed {
                    message: e.user_message(COMPLIANCE_FAILED),
                }
            }
        }
    }

    pub fn remove_file(&mut self) {
        self.machine.block();
        self.file = None;
        self.compliance = None;
    }

    fn subject(&self) -> PaperSubmission<'_> {
        PaperSubmission {
            form: &self.form,
            authors: self.authors.as_slice(),
            roles: &self.session.roles,
            conference_id: &self.conference.id,
            file: self.file.as_ref(),
        }
    }

    /// 组装请求体；稿件缺失时返回校验错误
    pub fn payload(&self) -> Result<PaperPayload, ValidationError> {
        let paper = self.file.clone().ok_or(ValidationError::PaperFileRequired)?;
        Ok(PaperPayload {
            title: self.form.title.clone(),
            abstract_text: self.form.abstract_text.clone(),
            keywords: self.form.keywords.clone(),
            paper,
            authors: self.authors.to_vec(),
            conference_id: self.conference.id.clone(),
            conference_acronym: self.conference.acronym.clone(),
            conference_name: self.conference.name.clone(),
            user_id: self.session.user_id().to_string(),
        })
    }

    /// 按声明顺序校验当前表单，未通过时回到 Idle
    fn check(&mut self) -> Result<(), ValidationError> {
        let checked = paper_rules().evaluate(&self.subject());
        if let Err(e) = &checked {
            warn!("[会议 {}] ⚠️ 校验未通过: {}", self.conference.acronym, e);
            self.machine.block();
        }
        checked
    }

    pub async fn submit(&mut self) -> Result<SubmitOutcome, WorkflowError> {
        self.machine.begin()?;

        if let Err(e) = self.check() {
            return Ok(SubmitOutcome::Blocked(e));
        }

        if compliance_requires_confirmation(self.compliance.as_ref()) {
            let percentage = self.compliance.as_ref().map_or(0.0, |r| r.percentage);
            warn!(
                "[会议 {}] ⚠️ 合规度 {}% 低于阈值，等待确认",
                self.conference.acronym, percentage
            );
            self.machine.await_confirmation();
            return Ok(SubmitOutcome::ConfirmationRequired { percentage });
        }

        self.send().await
    }

    /// 确认低合规度稿件的提交；等待确认期间表单仍可编辑，因此重新校验
    pub async fn confirm(&mut self) -> Result<SubmitOutcome, WorkflowError> {
        self.machine.ensure_confirm_pending()?;
        if let Err(e) = self.check() {
            return Ok(SubmitOutcome::Blocked(e));
        }
        info!("[会议 {}] 用户确认提交", self.conference.acronym);
        self.send().await
    }

    pub fn cancel_confirmation(&mut self) -> Result<(), WorkflowError> {
        self.machine.cancel_confirmation()?;
        info!("[会议 {}] 用户取消提交", self.conference.acronym);
        Ok(())
    }

    async fn send(&mut self) -> Result<SubmitOutcome, WorkflowError> {
        let payload = match self.payload() {
            Ok(payload) => payload,
            Err(e) => {
                self.machine.block();
                return Ok(SubmitOutcome::Blocked(e));
            }
        };

        let flight = self.machine.dispatch()?;
        info!(
            "[会议 {}] 📤 正在提交论文: {}",
            payload.conference_acronym, payload.title
        );
        let result = self
            .lifetime
            .run(self.authors_api.submit_paper(&payload))
            .await;
        drop(flight);

        let outcome = match result {
            None => SubmitOutcome::Cancelled,
            Some(Ok(reply)) if reply.is_refused() => {
                let message = reply.message_or(SUBMIT_FAILED);
                warn!("[会议 {}] ❌ 后端拒绝: {}", payload.conference_acronym, message);
                SubmitOutcome::Failed { message }
            }
            Some(Ok(reply)) => {
                info!("[会议 {}] ✅ 论文已提交", payload.conference_acronym);
                self.reset();
                SubmitOutcome::Submitted {
                    message: reply.message_or(SUBMITTED),
                }
            }
            Some(Err(e)) => {
                error!("[会议 {}] ❌ 提交失败: {}", payload.conference_acronym, e);
                SubmitOutcome::Failed {
                    message: e.user_message(SUBMIT_FAILED),
                }
            }
        };
        Ok(outcome)
    }

    /// 清空表单、作者、稿件与合规报告
    pub fn reset(&mut self) {
        self.form = PaperForm::default();
        self.authors = AuthorList::new(self.session.email());
        self.file = None;
        self.compliance = None;
    }
}
