//! 注册流程（含评审人邀请注册）

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::clients::{AuthApi, ConferenceApi};
use crate::error::{AppResult, WorkflowError};
use crate::models::{RegisterPayload, RegistrationForm, RegistrationInvite};
use crate::validation::{registration_rules, RegistrationSubmission};
use crate::workflow::lifetime::Lifetime;
use crate::workflow::state::{SubmissionMachine, SubmissionState, SubmitOutcome};

const REGISTERED: &str = "Registered successfully";
const REGISTER_FAILED: &str = "Something went wrong";

pub struct RegistrationFlow {
    conferences: Arc<dyn ConferenceApi>,
    auth: Arc<dyn AuthApi>,
    invite: RegistrationInvite,
    form: RegistrationForm,
    expertise_options: Vec<String>,
    machine: SubmissionMachine,
    lifetime: Lifetime,
}

impl RegistrationFlow {
    pub fn new(
        conferences: Arc<dyn ConferenceApi>,
        auth: Arc<dyn AuthApi>,
        invite: RegistrationInvite,
    ) -> Self {
        Self {
            conferences,
            auth,
            invite,
            form: RegistrationForm::default(),
            expertise_options: Vec::new(),
            machine: SubmissionMachine::new(),
            lifetime: Lifetime::new(),
        }
    }

    pub fn invite(&self) -> &RegistrationInvite {
        &self.invite
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut RegistrationForm {
        &mut self.form
    }

    pub fn expertise_options(&self) -> &[String] {
        &self.expertise_options
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

    /// 加载邀请会议提供的专长选项；没有会议时为空
    pub async fn load_expertise(&mut self) -> AppResult<&[String]> {
        let Some(conference_id) = self.invite.conference_id.clone() else {
            return Ok(&self.expertise_options);
        };

        let details = self
            .lifetime
            .run(self.conferences.fetch_conference(&conference_id))
            .await
            .ok_or(WorkflowError::Cancelled)?
            .map_err(|e| {
                error!("[会议 {}] ❌ 获取专长选项失败: {}", conference_id, e);
                e
            })?;

        info!(
            "[会议 {}] ✓ 可选专长 {} 项",
            conference_id,
            details.expertise.len()
        );
        self.expertise_options = details.expertise;
        Ok(&self.expertise_options)
    }

    /// 勾选 / 取消勾选专长，返回当前是否选中；未提供的选项被忽略
    pub fn toggle_expertise(&mut self, option: &str) -> bool {
        if !self.expertise_options.iter().any(|o| o == option) {
            warn!("忽略未提供的专长选项: {}", option);
            return false;
        }

        if let Some(pos) = self.form.expertise.iter().position(|e| e == option) {
            self.form.expertise.remove(pos);
            false
        } else {
            self.form.expertise.push(option.to_string());
            true
        }
    }

    pub async fn submit(&mut self) -> Result<SubmitOutcome, WorkflowError> {
        self.machine.begin()?;

        let subject = RegistrationSubmission {
            form: &self.form,
            expertise_options: &self.expertise_options,
        };
        if let Err(e) = registration_rules().evaluate(&subject) {
            warn!("[注册 {}] ⚠️ 校验未通过: {}", self.form.email, e);
            self.machine.block();
            return Ok(SubmitOutcome::Blocked(e));
        }

        let payload = RegisterPayload::assemble(&self.form, &self.invite);
        let flight = self.machine.dispatch()?;
        info!("[注册 {}] 📤 正在提交注册...", payload.email);
        let result = self.lifetime.run(self.auth.register(&payload)).await;
        drop(flight);

        let outcome = match result {
            None => SubmitOutcome::Cancelled,
            // 只有显式成功才算注册成功
            Some(Ok(reply)) if reply.success == Some(true) => {
                info!("[注册 {}] ✅ 注册成功", payload.email);
                self.form = RegistrationForm::default();
                SubmitOutcome::Submitted {
                    message: reply.message_or(REGISTERED),
                }
            }
            Some(Ok(reply)) => {
                let message = reply.message_or(REGISTER_FAILED);
                warn!("[注册 {}] ❌ 后端拒绝: {}", payload.email, message);
                SubmitOutcome::Failed { message }
            }
            Some(Err(e)) => {
                error!("[注册 {}] ❌ 注册失败: {}", payload.email, e);
                SubmitOutcome::Failed {
                    message: REGISTER_FAILED.to_string(),
                }
            }
        };
        Ok(outcome)
    }
}
