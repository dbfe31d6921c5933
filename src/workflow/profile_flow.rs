//! 个人资料更新
//!
//! 成功后用后端返回的用户信息替换会话中的 `user`，并写回 `SessionStore`。

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::clients::{AuthApi, SessionStore};
use crate::error::WorkflowError;
use crate::models::{ProfileForm, Session};
use crate::validation::profile_rules;
use crate::workflow::lifetime::Lifetime;
use crate::workflow::state::{SubmissionMachine, SubmissionState, SubmitOutcome};

const UPDATED: &str = "Profile Updated Successfully";
const UPDATE_FAILED: &str = "Something went wrong";

pub struct ProfileFlow {
    auth: Arc<dyn AuthApi>,
    store: Arc<dyn SessionStore>,
    session: Arc<Session>,
    form: ProfileForm,
    machine: SubmissionMachine,
    lifetime: Lifetime,
}

impl ProfileFlow {
    /// 表单以当前会话的用户信息预填，密码留空
    pub fn new(
        auth: Arc<dyn AuthApi>,
        store: Arc<dyn SessionStore>,
        session: Arc<Session>,
    ) -> Self {
        let form = ProfileForm::from_user(&session.user);
        Self {
            auth,
            store,
            session,
            form,
            machine: SubmissionMachine::new(),
            lifetime: Lifetime::new(),
        }
    }

    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProfileForm {
        &mut self.form
    }

    /// 当前会话（更新成功后为新的用户信息）
    pub fn session(&self) -> &Arc<Session> {
        &self.session
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

    pub async fn submit(&mut self) -> Result<SubmitOutcome, WorkflowError> {
        self.machine.begin()?;

        if let Err(e) = profile_rules().evaluate(&self.form) {
            warn!("[资料 {}] ⚠️ 校验未通过: {}", self.session.email(), e);
            self.machine.block();
            return Ok(SubmitOutcome::Blocked(e));
        }

        let flight = self.machine.dispatch()?;
        info!("[资料 {}] 📤 正在更新资料...", self.session.email());
        let result = self.lifetime.run(self.auth.update_profile(&self.form)).await;
        drop(flight);

        let reply = match result {
            None => return Ok(SubmitOutcome::Cancelled),
            Some(Ok(reply)) => reply,
            Some(Err(e)) => {
                error!("[资料 {}] ❌ 更新失败: {}", self.session.email(), e);
                return Ok(SubmitOutcome::Failed {
                    message: UPDATE_FAILED.to_string(),
                });
            }
        };

        if let Some(message) = reply.error {
            warn!("[资料 {}] ❌ 后端拒绝: {}", self.session.email(), message);
            return Ok(SubmitOutcome::Failed { message });
        }
        let Some(user) = reply.updated_user else {
            warn!("[资料 {}] ❌ 返回缺少 updatedUser", self.session.email());
            return Ok(SubmitOutcome::Failed {
                message: UPDATE_FAILED.to_string(),
            });
        };

        let session = Session {
            user,
            ..Session::clone(&self.session)
        };
        if let Err(e) = self.store.save(&session).await {
            error!("[资料 {}] ❌ 保存会话失败: {}", session.email(), e);
            return Ok(SubmitOutcome::Failed {
                message: UPDATE_FAILED.to_string(),
            });
        }

        info!("[资料 {}] ✅ 资料已更新", session.email());
        self.form = ProfileForm::from_user(&session.user);
        self.session = Arc::new(session);
        Ok(SubmitOutcome::Submitted {
            message: UPDATED.to_string(),
        })
    }
}
