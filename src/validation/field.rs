//! 字段校验器
//!
//! 全部为纯函数，返回 `Ok(())` 或单条 `ValidationError`。

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

use crate::error::{ValidationError, ValidationResult};
use crate::models::conference::ConferenceDates;
use crate::models::paper::{AuthorEntry, ComplianceReport, PaperFile};
use crate::models::review::{MAX_SCORE, MIN_SCORE};
use crate::models::session::{holds_any_for, Role, RoleRecord};

pub const ABSTRACT_MIN_WORDS: usize = 100;
pub const ABSTRACT_MAX_WORDS: usize = 300;
pub const TITLE_MIN_WORDS: usize = 3;
pub const MAX_KEYWORDS: usize = 8;
pub const MIN_PASSWORD_LEN: usize = 6;

/// 以空白切分后的非空词数
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// 关键词数量：按逗号切分后逐个 trim，空词也计入
pub fn keyword_count(raw: &str) -> usize {
    raw.split(',').map(str::trim).count()
}

pub fn require_non_blank(value: &str, error: ValidationError) -> ValidationResult {
    if value.trim().is_empty() {
        Err(error)
    } else {
        Ok(())
    }
}

pub fn check_abstract(text: &str) -> ValidationResult {
    let words = word_count(text);
    if (ABSTRACT_MIN_WORDS..=ABSTRACT_MAX_WORDS).contains(&words) {
        Ok(())
    } else {
        Err(ValidationError::AbstractLength { words })
    }
}

pub fn check_title(text: &str) -> ValidationResult {
    let words = word_count(text);
    if words >= TITLE_MIN_WORDS {
        Ok(())
    } else {
        Err(ValidationError::TitleTooShort { words })
    }
}

pub fn check_keywords(raw: &str) -> ValidationResult {
    let count = keyword_count(raw);
    if count > MAX_KEYWORDS {
        Err(ValidationError::TooManyKeywords { count })
    } else {
        Ok(())
    }
}

pub fn check_expertise(expertise: &[String]) -> ValidationResult {
    if expertise.iter().any(|e| !e.trim().is_empty()) {
        Ok(())
    } else {
        Err(ValidationError::ExpertiseRequired)
    }
}

/// 原始日期输入
#[derive(Debug, Clone, Copy)]
pub struct DateInputs<'a> {
    pub start: &'a str,
    pub end: &'a str,
    pub abstract_deadline: &'a str,
    pub submission_deadline: &'a str,
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// 会议日期校验，通过时返回解析后的日期
///
/// 顺序：缺失 → 早于今天 → 结束早于开始 → 摘要截止晚于结束 → 投稿截止不在 [开始, 结束]。
pub fn check_conference_dates(
    inputs: DateInputs<'_>,
    today: NaiveDate,
) -> Result<ConferenceDates, ValidationError> {
    let raw = [
        inputs.start,
        inputs.end,
        inputs.abstract_deadline,
        inputs.submission_deadline,
    ];
    if raw.iter().any(|v| v.trim().is_empty()) {
        return Err(ValidationError::AllDatesRequired);
    }

    let dates = ConferenceDates {
        start: parse_date("startDate", inputs.start)?,
        end: parse_date("endDate", inputs.end)?,
        abstract_deadline: parse_date("abstractDeadline", inputs.abstract_deadline)?,
        submission_deadline: parse_date("submissionDeadline", inputs.submission_deadline)?,
    };

    let all = [
        dates.start,
        dates.end,
        dates.abstract_deadline,
        dates.submission_deadline,
    ];
    if all.iter().any(|d| *d < today) {
        return Err(ValidationError::DateInPast);
    }
    if dates.end < dates.start {
        return Err(ValidationError::EndBeforeStart);
    }
    if dates.abstract_deadline > dates.end {
        return Err(ValidationError::AbstractDeadlineAfterEnd);
    }
    if dates.submission_deadline < dates.start || dates.submission_deadline > dates.end {
        return Err(ValidationError::SubmissionOutsideRange);
    }

    Ok(dates)
}

pub fn check_authors(authors: &[AuthorEntry]) -> ValidationResult {
    if authors.iter().any(AuthorEntry::has_mandatory_details) {
        Ok(())
    } else {
        Err(ValidationError::AuthorDetailsMissing)
    }
}

/// 同一会议的组织者或评审不能投稿
pub fn check_role_exclusion(roles: &[RoleRecord], conference_id: &str) -> ValidationResult {
    if holds_any_for(roles, &[Role::Organizer, Role::Reviewer], conference_id) {
        Err(ValidationError::RoleNotAllowed)
    } else {
        Ok(())
    }
}

pub fn check_pdf(file: &PaperFile) -> ValidationResult {
    if file.is_pdf() {
        Ok(())
    } else {
        Err(ValidationError::NotPdf {
            mime_type: file.mime_type.clone(),
        })
    }
}

pub fn check_file_selected(file: Option<&PaperFile>) -> ValidationResult {
    file.map(|_| ()).ok_or(ValidationError::PaperFileRequired)
}

/// 合规报告存在且低于阈值时，提交前需要用户确认
pub fn compliance_requires_confirmation(report: Option<&ComplianceReport>) -> bool {
    report.is_some_and(|r| !r.meets_threshold())
}

pub fn check_score(criterion: &'static str, value: u8) -> ValidationResult {
    if (MIN_SCORE..=MAX_SCORE).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::ScoreOutOfRange { criterion, value })
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)^\S+@\S+$").expect("email pattern is valid"))
}

pub fn check_email(email: &str) -> ValidationResult {
    require_non_blank(email, ValidationError::FieldRequired { field: "Email" })?;
    if email_pattern().is_match(email.trim()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

pub fn check_password(password: &str) -> ValidationResult {
    check_min_length(password, "Password", ValidationError::PasswordTooShort)
}

/// 必填且至少 `MIN_PASSWORD_LEN` 个字符；各表单的提示文案不同
pub fn check_min_length(
    value: &str,
    field: &'static str,
    too_short: ValidationError,
) -> ValidationResult {
    if value.is_empty() {
        return Err(ValidationError::FieldRequired { field });
    }
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(too_short);
    }
    Ok(())
}
