use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 唯一允许上传的稿件类型
pub const PDF_MIME: &str = "application/pdf";

/// 合规度低于该值时需要用户确认
pub const COMPLIANCE_THRESHOLD: f64 = 60.0;

/// 作者信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthorEntry {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country: String,
    pub affiliation: String,
    pub web_page: String,
    pub corresponding: bool,
}

impl AuthorEntry {
    /// 通讯作者条目，邮箱绑定当前登录用户
    pub fn corresponding(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            corresponding: true,
            ..Self::default()
        }
    }

    /// 是否填写了必填信息（名 + 邮箱）
    pub fn has_mandatory_details(&self) -> bool {
        !self.first_name.is_empty() && !self.email.is_empty()
    }
}

/// 作者信息的可编辑字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorField {
    FirstName,
    LastName,
    Email,
    Country,
    Affiliation,
    WebPage,
    Corresponding,
}

impl FromStr for AuthorField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "firstName" => Ok(AuthorField::FirstName),
            "lastName" => Ok(AuthorField::LastName),
            "email" => Ok(AuthorField::Email),
            "country" => Ok(AuthorField::Country),
            "affiliation" => Ok(AuthorField::Affiliation),
            "webPage" => Ok(AuthorField::WebPage),
            "corresponding" => Ok(AuthorField::Corresponding),
            other => Err(format!("未知的作者字段: {}", other)),
        }
    }
}

/// 一次输入事件：文本框取 `value`，复选框取 `checked`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldEvent {
    pub value: String,
    pub checked: bool,
}

impl FieldEvent {
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            checked: false,
        }
    }
}

/// 选中的稿件文件
#[derive(Clone, PartialEq, Eq)]
pub struct PaperFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl PaperFile {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.mime_type == PDF_MIME
    }
}

impl fmt::Debug for PaperFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaperFile")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// 合规检查的单条结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceDetail {
    pub rule: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// 合规检查报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub percentage: f64,
    #[serde(default)]
    pub details: Vec<ComplianceDetail>,
}

impl ComplianceReport {
    pub fn meets_threshold(&self) -> bool {
        self.percentage >= COMPLIANCE_THRESHOLD
    }
}

impl fmt::Display for ComplianceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let failing = self.details.iter().filter(|d| d.suggestion.is_some()).count();
        write!(
            f,
            "{}% ({} 条规则, {} 条建议)",
            self.percentage,
            self.details.len(),
            failing
        )
    }
}

/// 论文提交表单的文本字段
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaperForm {
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// 逗号分隔的原始关键词文本
    pub keywords: String,
}

/// 论文提交请求体（multipart）
#[derive(Debug, Clone, PartialEq)]
pub struct PaperPayload {
    pub title: String,
    pub abstract_text: String,
    pub keywords: String,
    pub paper: PaperFile,
    pub authors: Vec<AuthorEntry>,
    pub conference_id: String,
    pub conference_acronym: String,
    pub conference_name: String,
    pub user_id: String,
}

impl PaperPayload {
    /// 作者列表的 JSON 文本（multipart 中 `authors` 字段）
    pub fn authors_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.authors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_inclusive_at_sixty() {
        let report = |percentage| ComplianceReport {
            percentage,
            details: Vec::new(),
        };
        assert!(!report(59.0).meets_threshold());
        assert!(report(60.0).meets_threshold());
    }

    #[test]
    fn author_json_uses_wire_field_names() {
        let payload_authors = vec![AuthorEntry {
            first_name: "Grace".into(),
            ..AuthorEntry::corresponding("grace@navy.mil")
        }];
        let json = serde_json::to_string(&payload_authors).unwrap();
        assert!(json.contains("\"firstName\":\"Grace\""));
        assert!(json.contains("\"corresponding\":true"));
    }

    #[test]
    fn parses_compliance_report_without_suggestions() {
        let report: ComplianceReport = serde_json::from_str(
            r#"{"percentage": 72, "details": [{"rule": "Font", "message": "Times New Roman"}]}"#,
        )
        .unwrap();
        assert_eq!(report.details[0].suggestion, None);
        assert!(report.meets_threshold());
    }
}
