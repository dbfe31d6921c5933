//! 各表单的规则声明
//!
//! 规则的追加顺序就是执行顺序，也决定了用户看到哪一条提示。

use chrono::NaiveDate;

use super::field::{self, DateInputs};
use super::RuleSet;
use crate::error::{ValidationError, ValidationResult};
use crate::models::conference::ConferenceForm;
use crate::models::paper::{AuthorEntry, PaperFile, PaperForm};
use crate::models::auth::{LoginForm, PasswordResetForm, ProfileForm};
use crate::models::registration::RegistrationForm;
use crate::models::review::{Criterion, ReviewScores};
use crate::models::session::RoleRecord;

// ========== 会议创建 ==========

/// 待校验的会议表单
pub struct ConferenceSubmission<'a> {
    pub form: &'a ConferenceForm,
    pub today: NaiveDate,
}

impl ConferenceSubmission<'_> {
    pub fn date_inputs(&self) -> DateInputs<'_> {
        DateInputs {
            start: &self.form.start_date,
            end: &self.form.end_date,
            abstract_deadline: &self.form.abstract_deadline,
            submission_deadline: &self.form.submission_deadline,
        }
    }
}

fn conference_name(s: &ConferenceSubmission<'_>) -> ValidationResult {
    field::require_non_blank(&s.form.conference_name, ValidationError::ConferenceNameRequired)
}

fn acronym(s: &ConferenceSubmission<'_>) -> ValidationResult {
    field::require_non_blank(&s.form.acronym, ValidationError::AcronymRequired)
}

fn start_and_end(s: &ConferenceSubmission<'_>) -> ValidationResult {
    if s.form.start_date.trim().is_empty() || s.form.end_date.trim().is_empty() {
        Err(ValidationError::StartEndRequired)
    } else {
        Ok(())
    }
}

fn review_mode(s: &ConferenceSubmission<'_>) -> ValidationResult {
    s.form
        .mode
        .map(|_| ())
        .ok_or(ValidationError::ReviewModeRequired)
}

fn expertise(s: &ConferenceSubmission<'_>) -> ValidationResult {
    field::check_expertise(&s.form.expertise)
}

fn conference_dates(s: &ConferenceSubmission<'_>) -> ValidationResult {
    field::check_conference_dates(s.date_inputs(), s.today).map(|_| ())
}

pub fn conference_rules<'a>() -> RuleSet<ConferenceSubmission<'a>> {
    RuleSet::new("conference")
        .rule("conferenceName", conference_name)
        .rule("acronym", acronym)
        .rule("startEnd", start_and_end)
        .rule("mode", review_mode)
        .rule("expertise", expertise)
        .rule("dates", conference_dates)
}

// ========== 论文提交 ==========

/// 待校验的论文提交
pub struct PaperSubmission<'a> {
    pub form: &'a PaperForm,
    pub authors: &'a [AuthorEntry],
    pub roles: &'a [RoleRecord],
    pub conference_id: &'a str,
    pub file: Option<&'a PaperFile>,
}

fn paper_abstract(s: &PaperSubmission<'_>) -> ValidationResult {
    field::check_abstract(&s.form.abstract_text)
}

fn paper_title(s: &PaperSubmission<'_>) -> ValidationResult {
    field::check_title(&s.form.title)
}

fn paper_keywords(s: &PaperSubmission<'_>) -> ValidationResult {
    field::check_keywords(&s.form.keywords)
}

fn paper_authors(s: &PaperSubmission<'_>) -> ValidationResult {
    field::check_authors(s.authors)
}

fn role_exclusion(s: &PaperSubmission<'_>) -> ValidationResult {
    field::check_role_exclusion(s.roles, s.conference_id)
}

fn paper_file(s: &PaperSubmission<'_>) -> ValidationResult {
    field::check_file_selected(s.file)
}

pub fn paper_rules<'a>() -> RuleSet<PaperSubmission<'a>> {
    RuleSet::new("paper")
        .rule("abstract", paper_abstract)
        .rule("title", paper_title)
        .rule("keywords", paper_keywords)
        .rule("authors", paper_authors)
        .rule("roleExclusion", role_exclusion)
        .rule("file", paper_file)
}

// ========== 评审 ==========

fn recommendation(s: &ReviewScores) -> ValidationResult {
    s.overall_recommendation
        .map(|_| ())
        .ok_or(ValidationError::RecommendationRequired)
}

fn comments_for_authors(s: &ReviewScores) -> ValidationResult {
    field::require_non_blank(&s.comments_for_authors, ValidationError::AuthorCommentsRequired)
}

fn comments_for_organizers(s: &ReviewScores) -> ValidationResult {
    field::require_non_blank(
        &s.comments_for_organizers,
        ValidationError::OrganizerCommentsRequired,
    )
}

fn score_bounds(s: &ReviewScores) -> ValidationResult {
    Criterion::ALL
        .iter()
        .try_for_each(|c| field::check_score(c.name(), s.score(*c)))
}

pub fn review_rules() -> RuleSet<ReviewScores> {
    RuleSet::new("review")
        .rule("overallRecommendation", recommendation)
        .rule("commentsForAuthors", comments_for_authors)
        .rule("commentsForOrganizers", comments_for_organizers)
        .rule("scores", score_bounds)
}

// ========== 注册 ==========

/// 待校验的注册表单
pub struct RegistrationSubmission<'a> {
    pub form: &'a RegistrationForm,
    pub expertise_options: &'a [String],
}

fn reg_name(s: &RegistrationSubmission<'_>) -> ValidationResult {
    field::require_non_blank(&s.form.name, ValidationError::FieldRequired { field: "Name" })
}

fn reg_email(s: &RegistrationSubmission<'_>) -> ValidationResult {
    field::check_email(&s.form.email)
}

fn reg_password(s: &RegistrationSubmission<'_>) -> ValidationResult {
    field::check_password(&s.form.password)
}

fn reg_phone(s: &RegistrationSubmission<'_>) -> ValidationResult {
    field::require_non_blank(&s.form.phone, ValidationError::FieldRequired { field: "Phone" })
}

fn reg_address(s: &RegistrationSubmission<'_>) -> ValidationResult {
    field::require_non_blank(
        &s.form.address,
        ValidationError::FieldRequired { field: "Address" },
    )
}

fn reg_recovery_key(s: &RegistrationSubmission<'_>) -> ValidationResult {
    field::require_non_blank(
        &s.form.recovery_key,
        ValidationError::FieldRequired {
            field: "Recovery Key",
        },
    )
}

fn reg_expertise(s: &RegistrationSubmission<'_>) -> ValidationResult {
    match s
        .form
        .expertise
        .iter()
        .find(|e| !s.expertise_options.contains(e))
    {
        Some(option) => Err(ValidationError::ExpertiseNotOffered {
            option: option.clone(),
        }),
        None => Ok(()),
    }
}

pub fn registration_rules<'a>() -> RuleSet<RegistrationSubmission<'a>> {
    RuleSet::new("registration")
        .rule("name", reg_name)
        .rule("email", reg_email)
        .rule("password", reg_password)
        .rule("phone", reg_phone)
        .rule("address", reg_address)
        .rule("recoveryKey", reg_recovery_key)
        .rule("expertise", reg_expertise)
}

// ========== 登录 / 找回密码 / 个人资料 ==========

fn login_email(f: &LoginForm) -> ValidationResult {
    field::check_email(&f.email)
}

fn login_password(f: &LoginForm) -> ValidationResult {
    field::check_min_length(
        &f.password,
        "Password",
        ValidationError::LoginPasswordTooShort,
    )
}

pub fn login_rules() -> RuleSet<LoginForm> {
    RuleSet::new("login")
        .rule("email", login_email)
        .rule("password", login_password)
}

fn reset_email(f: &PasswordResetForm) -> ValidationResult {
    field::require_non_blank(&f.email, ValidationError::FieldRequired { field: "Email" })
}

fn reset_recovery_key(f: &PasswordResetForm) -> ValidationResult {
    field::require_non_blank(
        &f.recovery_key,
        ValidationError::FieldRequired {
            field: "Recovery key",
        },
    )
}

fn reset_new_password(f: &PasswordResetForm) -> ValidationResult {
    field::check_min_length(
        &f.new_password,
        "Password",
        ValidationError::NewPasswordTooShort,
    )
}

pub fn password_reset_rules() -> RuleSet<PasswordResetForm> {
    RuleSet::new("passwordReset")
        .rule("email", reset_email)
        .rule("recoveryKey", reset_recovery_key)
        .rule("newPassword", reset_new_password)
}

fn profile_name(f: &ProfileForm) -> ValidationResult {
    field::require_non_blank(&f.name, ValidationError::FieldRequired { field: "Name" })
}

fn profile_phone(f: &ProfileForm) -> ValidationResult {
    field::require_non_blank(&f.phone, ValidationError::FieldRequired { field: "Phone" })
}

fn profile_address(f: &ProfileForm) -> ValidationResult {
    field::require_non_blank(
        &f.address,
        ValidationError::FieldRequired { field: "Address" },
    )
}

pub fn profile_rules() -> RuleSet<ProfileForm> {
    RuleSet::new("profile")
        .rule("name", profile_name)
        .rule("phone", profile_phone)
        .rule("address", profile_address)
}
