//! 提交状态机
//!
//! ```text
//! Idle → Validating → Blocked        → Idle
//!                   → ConfirmPending → Submitting (确认) / Idle (取消)
//!                   → Submitting     → Success / Failed → Idle
//! ```
//!
//! `Blocked` / `Success` / `Failed` 是瞬时结果，以 `SubmitOutcome` 返回，
//! 状态机本身随即回到 `Idle`。

use tracing::trace;

use crate::error::{ValidationError, WorkflowError};

/// 提交状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    ConfirmPending,
    Submitting,
}

/// 一次提交尝试的结果
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// 本地校验未通过，表单保持可编辑
    Blocked(ValidationError),
    /// 合规度不足，等待用户确认
    ConfirmationRequired { percentage: f64 },
    /// 提交成功，表单已重置
    Submitted { message: String },
    /// 后端失败，表单数据保留
    Failed { message: String },
    /// 流程已取消，结果被丢弃
    Cancelled,
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted { .. })
    }

    /// 展示给用户的提示
    pub fn message(&self) -> Option<String> {
        match self {
            SubmitOutcome::Blocked(e) => Some(e.to_string()),
            SubmitOutcome::Submitted { message } | SubmitOutcome::Failed { message } => {
                Some(message.clone())
            }
            SubmitOutcome::ConfirmationRequired { .. } | SubmitOutcome::Cancelled => None,
        }
    }
}

/// 状态机
#[derive(Debug, Default)]
pub struct SubmissionMachine {
    state: SubmissionState,
}

impl SubmissionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// 提交按钮是否可用
    pub fn submit_enabled(&self) -> bool {
        self.state != SubmissionState::Submitting
    }

    fn transition(&mut self, to: SubmissionState) {
        trace!("提交状态: {:?} → {:?}", self.state, to);
        self.state = to;
    }

    /// Idle → Validating
    pub fn begin(&mut self) -> Result<(), WorkflowError> {
        match self.state {
            SubmissionState::Idle => {
                self.transition(SubmissionState::Validating);
                Ok(())
            }
            SubmissionState::ConfirmPending => Err(WorkflowError::ConfirmationPending),
            SubmissionState::Validating | SubmissionState::Submitting => {
                Err(WorkflowError::SubmissionInFlight)
            }
        }
    }

    /// 校验失败（或确认前数据失效）→ Idle
    pub fn block(&mut self) {
        if self.state != SubmissionState::Submitting {
            self.transition(SubmissionState::Idle);
        }
    }

    /// Validating → ConfirmPending
    pub fn await_confirmation(&mut self) {
        if self.state == SubmissionState::Validating {
            self.transition(SubmissionState::ConfirmPending);
        }
    }

    /// 检查当前是否在等待确认
    pub fn ensure_confirm_pending(&self) -> Result<(), WorkflowError> {
        if self.state == SubmissionState::ConfirmPending {
            Ok(())
        } else {
            Err(WorkflowError::NothingToConfirm)
        }
    }

    /// ConfirmPending → Idle
    pub fn cancel_confirmation(&mut self) -> Result<(), WorkflowError> {
        self.ensure_confirm_pending()?;
        self.transition(SubmissionState::Idle);
        Ok(())
    }

    /// Validating / ConfirmPending → Submitting
    ///
    /// 返回的守卫在释放时把状态机带回 `Idle`，即使调用中途被放弃。
    pub fn dispatch(&mut self) -> Result<InFlight<'_>, WorkflowError> {
        match self.state {
            SubmissionState::Validating | SubmissionState::ConfirmPending => {
                self.transition(SubmissionState::Submitting);
                Ok(InFlight { machine: self })
            }
            SubmissionState::Submitting => Err(WorkflowError::SubmissionInFlight),
            SubmissionState::Idle => Err(WorkflowError::NothingToConfirm),
        }
    }
}

/// 正在提交的守卫
#[derive(Debug)]
pub struct InFlight<'a> {
    machine: &'a mut SubmissionMachine,
}

impl InFlight<'_> {
    pub fn state(&self) -> SubmissionState {
        self.machine.state
    }

    pub fn submit_enabled(&self) -> bool {
        self.machine.submit_enabled()
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.machine.transition(SubmissionState::Idle);
    }
}
