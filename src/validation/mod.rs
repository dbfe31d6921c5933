//! 校验层
//!
//! - `field` - 字段级纯函数校验器
//! - `RuleSet` - 按声明顺序执行规则，遇到第一个失败即停止，只报告这一条
//! - `rules` - 各表单的规则声明

pub mod field;
pub mod rules;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::ValidationResult;

pub use rules::{
    conference_rules, login_rules, paper_rules, password_reset_rules, profile_rules,
    registration_rules, review_rules, ConferenceSubmission, PaperSubmission,
    RegistrationSubmission,
};

/// 单条规则
pub type Rule<T> = fn(&T) -> ValidationResult;

/// 有序规则集
pub struct RuleSet<T> {
    name: &'static str,
    rules: Vec<(&'static str, Rule<T>)>,
}

impl<T> RuleSet<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            rules: Vec::new(),
        }
    }

    /// 追加一条规则（执行顺序即追加顺序）
    pub fn rule(mut self, label: &'static str, rule: Rule<T>) -> Self {
        self.rules.push((label, rule));
        self
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|(label, _)| *label)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// 依次执行，返回第一条失败
    pub fn evaluate(&self, subject: &T) -> ValidationResult {
        for (label, rule) in &self.rules {
            if let Err(e) = rule(subject) {
                debug!("[{}] 规则 {} 未通过: {}", self.name, label, e);
                return Err(e);
            }
        }
        Ok(())
    }
}

/// "今天"的来源，校验日期时注入
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// 本地时区的当前日期
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// 固定日期
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
