use serde::Deserialize;

use crate::models::paper::ComplianceReport;

/// 后端通用的 `{ success, message }` 返回
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiMessage {
    pub success: Option<bool>,
    pub message: Option<String>,
}

impl ApiMessage {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: Some(true),
            message: Some(message.into()),
        }
    }

    pub fn refused(message: impl Into<String>) -> Self {
        Self {
            success: Some(false),
            message: Some(message.into()),
        }
    }

    /// 只有显式返回 `success: false` 才视为失败
    pub fn is_refused(&self) -> bool {
        self.success == Some(false)
    }

    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

/// `check-compliance` 的返回
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceResponse {
    pub compliance_report: ComplianceReport,
}
