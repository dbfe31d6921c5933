//! 登录与找回密码
//!
//! 登录成功后整个返回作为 auth blob 写入 `SessionStore`，之后的流程从中读取会话。

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::clients::{AuthApi, SessionStore};
use crate::error::{AppResult, WorkflowError};
use crate::models::{LoginForm, PasswordResetForm, Session};
use crate::validation::{login_rules, password_reset_rules};
use crate::workflow::lifetime::Lifetime;
use crate::workflow::state::{SubmissionMachine, SubmissionState, SubmitOutcome};

const LOGGED_IN: &str = "Logged in successfully";
const PASSWORD_RESET: &str = "Password reset successfully";
const FAILED: &str = "Something went wrong";

pub struct LoginFlow {
    auth: Arc<dyn AuthApi>,
    store: Arc<dyn SessionStore>,
    form: LoginForm,
    session: Option<Arc<Session>>,
    machine: SubmissionMachine,
    lifetime: Lifetime,
}

impl LoginFlow {
    pub fn new(auth: Arc<dyn AuthApi>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            auth,
            store,
            form: LoginForm::default(),
            session: None,
            machine: SubmissionMachine::new(),
            lifetime: Lifetime::new(),
        }
    }

    pub fn form(&self) -> &LoginForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut LoginForm {
        &mut self.form
    }

    /// 登录成功后的会话
    pub fn session(&self) -> Option<&Arc<Session>> {
        self.session.as_ref()
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

        if let Err(e) = login_rules().evaluate(&self.form) {
            warn!("[登录 {}] ⚠️ 校验未通过: {}", self.form.email, e);
            self.machine.block();
            return Ok(SubmitOutcome::Blocked(e));
        }

        let flight = self.machine.dispatch()?;
        info!("[登录 {}] 🔑 正在登录...", self.form.email);
        let result = self.lifetime.run(self.auth.login(&self.form)).await;
        drop(flight);

        let reply = match result {
            None => return Ok(SubmitOutcome::Cancelled),
            Some(Ok(reply)) => reply,
            Some(Err(e)) => {
                error!("[登录 {}] ❌ 登录失败: {}", self.form.email, e);
                return Ok(SubmitOutcome::Failed {
                    message: e.user_message(FAILED),
                });
            }
        };

        if reply.success != Some(true) {
            let message = reply.message_or(FAILED);
            warn!("[登录 {}] ❌ 后端拒绝: {}", self.form.email, message);
            return Ok(SubmitOutcome::Failed { message });
        }

        let message = reply.message_or(LOGGED_IN);
        let Some(session) = reply.into_session() else {
            warn!("[登录 {}] ❌ 返回缺少 token 或用户信息", self.form.email);
            return Ok(SubmitOutcome::Failed {
                message: FAILED.to_string(),
            });
        };

        if let Err(e) = self.store.save(&session).await {
            error!("[登录 {}] ❌ 保存会话失败: {}", self.form.email, e);
            return Ok(SubmitOutcome::Failed {
                message: FAILED.to_string(),
            });
        }

        info!(
            "[登录 {}] ✅ 已登录 (角色 {} 个)",
            session.email(),
            session.roles.len()
        );
        self.session = Some(Arc::new(session));
        self.form = LoginForm::default();
        Ok(SubmitOutcome::Submitted { message })
    }

    /// 退出登录并清除保存的会话
    pub async fn logout(&mut self) -> AppResult<()> {
        self.session = None;
        self.store.clear().await
    }
}

pub struct PasswordResetFlow {
    auth: Arc<dyn AuthApi>,
    form: PasswordResetForm,
    machine: SubmissionMachine,
    lifetime: Lifetime,
}

impl PasswordResetFlow {
    pub fn new(auth: Arc<dyn AuthApi>) -> Self {
        Self {
            auth,
            form: PasswordResetForm::default(),
            machine: SubmissionMachine::new(),
            lifetime: Lifetime::new(),
        }
    }

    pub fn form(&self) -> &PasswordResetForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut PasswordResetForm {
        &mut self.form
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

        if let Err(e) = password_reset_rules().evaluate(&self.form) {
            warn!("[重设密码 {}] ⚠️ 校验未通过: {}", self.form.email, e);
            self.machine.block();
            return Ok(SubmitOutcome::Blocked(e));
        }

        let flight = self.machine.dispatch()?;
        info!("[重设密码 {}] 📤 正在提交...", self.form.email);
        let result = self.lifetime.run(self.auth.forgot_password(&self.form)).await;
        drop(flight);

        let outcome = match result {
            None => SubmitOutcome::Cancelled,
            Some(Ok(reply)) if reply.success == Some(true) => {
                info!("[重设密码 {}] ✅ 密码已重设", self.form.email);
                self.form = PasswordResetForm::default();
                SubmitOutcome::Submitted {
                    message: reply.message_or(PASSWORD_RESET),
                }
            }
            Some(Ok(reply)) => {
                let message = reply.message_or(FAILED);
                warn!("[重设密码 {}] ❌ 后端拒绝: {}", self.form.email, message);
                SubmitOutcome::Failed { message }
            }
            // 网络或状态码错误一律给出通用提示
            Some(Err(e)) => {
                error!("[重设密码 {}] ❌ 请求失败: {}", self.form.email, e);
                SubmitOutcome::Failed {
                    message: FAILED.to_string(),
                }
            }
        };
        Ok(outcome)
    }
}
