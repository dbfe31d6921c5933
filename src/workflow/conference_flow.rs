//! 会议创建流程
//!
//! 表单编辑 → 按序校验 → `submit_conference` → 成功后重置表单

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::clients::ConferenceApi;
use crate::error::{EditorError, ValidationError, WorkflowError};
use crate::models::{ConferenceForm, ConferencePayload, Session};
use crate::validation::field::check_conference_dates;
use crate::validation::{conference_rules, Clock, ConferenceSubmission, LocalClock};
use crate::workflow::lifetime::Lifetime;
use crate::workflow::state::{SubmissionMachine, SubmissionState, SubmitOutcome};

const CREATED: &str = "Conference created Successfully";
const CREATE_FAILED: &str = "Error creating conference.";

pub struct ConferenceFlow {
    api: Arc<dyn ConferenceApi>,
    session: Arc<Session>,
    clock: Arc<dyn Clock>,
    form: ConferenceForm,
    machine: SubmissionMachine,
    lifetime: Lifetime,
}

impl ConferenceFlow {
    pub fn new(api: Arc<dyn ConferenceApi>, session: Arc<Session>) -> Self {
        Self {
            api,
            session,
            clock: Arc::new(LocalClock),
            form: ConferenceForm::default(),
            machine: SubmissionMachine::new(),
            lifetime: Lifetime::new(),
        }
    }

    /// 替换日期来源
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn form(&self) -> &ConferenceForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ConferenceForm {
        &mut self.form
    }

    /// 用草稿整体替换表单
    pub fn load_form(&mut self, form: ConferenceForm) {
        self.form = form;
    }

    pub fn update_topic(&mut self, index: usize, value: &str) -> Result<(), EditorError> {
        self.form.topics.update_topic(index, value)
    }

    pub fn set_expertise_input(&mut self, raw: &str) {
        self.form.set_expertise_input(raw);
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

    /// 校验表单并组装请求体
    pub fn validate(&self) -> Result<ConferencePayload, ValidationError> {
        let subject = ConferenceSubmission {
            form: &self.form,
            today: self.clock.today(),
        };
        conference_rules().evaluate(&subject)?;

        let dates = check_conference_dates(subject.date_inputs(), subject.today)?;
        let mode = self.form.mode.ok_or(ValidationError::ReviewModeRequired)?;
        Ok(ConferencePayload::assemble(
            &self.form,
            mode,
            dates,
            self.session.user_id(),
        ))
    }

    pub async fn submit(&mut self) -> Result<SubmitOutcome, WorkflowError> {
        self.machine.begin()?;

        let payload = match self.validate() {
            Ok(payload) => payload,
            Err(e) => {
                warn!("[会议 {}] ⚠️ 校验未通过: {}", self.form.acronym, e);
                self.machine.block();
                return Ok(SubmitOutcome::Blocked(e));
            }
        };

        let flight = self.machine.dispatch()?;
        info!("[会议 {}] 📤 正在提交会议申请...", payload.acronym);
        let result = self.lifetime.run(self.api.submit_conference(&payload)).await;
        drop(flight);

        let outcome = match result {
            None => SubmitOutcome::Cancelled,
            Some(Ok(reply)) if reply.is_refused() => {
                let message = reply.message_or(CREATE_FAILED);
                warn!("[会议 {}] ❌ 后端拒绝: {}", payload.acronym, message);
                SubmitOutcome::Failed { message }
            }
            Some(Ok(_)) => {
                info!("[会议 {}] ✅ 会议申请已提交", payload.acronym);
                self.form = ConferenceForm::default();
                SubmitOutcome::Submitted {
                    message: CREATED.to_string(),
                }
            }
            Some(Err(e)) => {
                error!("[会议 {}] ❌ 提交失败: {}", payload.acronym, e);
                SubmitOutcome::Failed {
                    message: e.user_message(CREATE_FAILED),
                }
            }
        };
        Ok(outcome)
    }
}
