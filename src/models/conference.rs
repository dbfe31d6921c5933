use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::editor::Topics;

/// 评审模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReviewMode {
    SingleBlind,
    DoubleBlind,
    NoBlind,
}

impl ReviewMode {
    pub const ALL: [ReviewMode; 3] = [
        ReviewMode::SingleBlind,
        ReviewMode::DoubleBlind,
        ReviewMode::NoBlind,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewMode::SingleBlind => "single-blind",
            ReviewMode::DoubleBlind => "double-blind",
            ReviewMode::NoBlind => "no-blind",
        }
    }
}

impl fmt::Display for ReviewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReviewMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("未知的评审模式: {}", s))
    }
}

/// 会议创建表单
///
/// 日期字段保留用户输入的原始文本（`YYYY-MM-DD`），在校验时解析。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConferenceForm {
    pub conference_name: String,
    pub acronym: String,
    pub web_page: String,
    pub mode: Option<ReviewMode>,
    pub venue: String,
    pub city: String,
    pub country: String,
    pub start_date: String,
    pub end_date: String,
    pub abstract_deadline: String,
    pub submission_deadline: String,
    pub primary_area: String,
    pub secondary_area: String,
    pub topics: Topics,
    pub expertise: Vec<String>,
}

impl ConferenceForm {
    /// 以逗号分隔的输入更新专长列表
    pub fn set_expertise_input(&mut self, raw: &str) {
        self.expertise = raw.split(',').map(|item| item.trim().to_string()).collect();
    }

    /// 专长列表的回显文本
    pub fn expertise_input(&self) -> String {
        self.expertise.join(", ")
    }
}

/// 已解析的会议日期
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConferenceDates {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub abstract_deadline: NaiveDate,
    pub submission_deadline: NaiveDate,
}

/// 创建会议请求体
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferencePayload {
    pub conference_name: String,
    pub acronym: String,
    pub web_page: String,
    pub mode: ReviewMode,
    pub venue: String,
    pub city: String,
    pub country: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub abstract_deadline: NaiveDate,
    pub submission_deadline: NaiveDate,
    pub primary_area: String,
    pub secondary_area: String,
    pub topics: Vec<String>,
    pub expertise: Vec<String>,
    pub user_id: String,
}

impl ConferencePayload {
    /// 由已通过校验的表单组装请求体
    pub fn assemble(
        form: &ConferenceForm,
        mode: ReviewMode,
        dates: ConferenceDates,
        user_id: &str,
    ) -> Self {
        Self {
            conference_name: form.conference_name.trim().to_string(),
            acronym: form.acronym.trim().to_string(),
            web_page: form.web_page.clone(),
            mode,
            venue: form.venue.clone(),
            city: form.city.clone(),
            country: form.country.clone(),
            start_date: dates.start,
            end_date: dates.end,
            abstract_deadline: dates.abstract_deadline,
            submission_deadline: dates.submission_deadline,
            primary_area: form.primary_area.clone(),
            secondary_area: form.secondary_area.clone(),
            topics: form.topics.to_vec(),
            expertise: form
                .expertise
                .iter()
                .map(|e| e.trim())
                .filter(|e| !e.is_empty())
                .map(str::to_string)
                .collect(),
            user_id: user_id.to_string(),
        }
    }
}

/// 会议详情（`get-conference` 的返回）
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConferenceDetails {
    #[serde(rename = "_id")]
    pub id: String,
    pub conference_name: String,
    pub acronym: String,
    pub expertise: Vec<String>,
}

/// 待审批的会议申请
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingConference {
    #[serde(rename = "_id")]
    pub id: String,
    pub conference_name: String,
    #[serde(default)]
    pub acronym: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub mode: Option<ReviewMode>,
}

/// 会议审批状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConferenceStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    #[serde(other)]
    Unknown,
}

/// 已登记的会议（`all-reg-conferences`，不区分状态）
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisteredConference {
    #[serde(rename = "_id")]
    pub id: String,
    pub conference_name: String,
    pub acronym: String,
    pub topics: Vec<String>,
    pub city: String,
    pub country: String,
    pub submission_deadline: Option<String>,
    pub start_date: Option<String>,
    pub status: ConferenceStatus,
}

impl RegisteredConference {
    /// 投稿截止日期；只取 ISO 时间戳的日期部分
    pub fn submission_deadline(&self) -> Option<NaiveDate> {
        let raw = self.submission_deadline.as_deref()?;
        NaiveDate::from_str(raw.get(..10).unwrap_or(raw)).ok()
    }

    /// 截止日期早于今天即视为关闭；没有可解析的截止日期时不关闭
    pub fn submission_closed(&self, today: NaiveDate) -> bool {
        self.submission_deadline().is_some_and(|d| d < today)
    }

    /// 列表中展示的前两个非空主题
    pub fn shown_topics(&self) -> Vec<&str> {
        self.topics
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .take(2)
            .collect()
    }

    pub fn target(&self) -> ConferenceTarget {
        ConferenceTarget {
            id: self.id.clone(),
            acronym: self.acronym.clone(),
            name: self.conference_name.clone(),
        }
    }
}

/// 论文所投递的会议（来自路由参数与 `get-conference`）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConferenceTarget {
    pub id: String,
    pub acronym: String,
    pub name: String,
}

impl ConferenceTarget {
    pub fn new(id: impl Into<String>, acronym: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            acronym: acronym.into(),
            name: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expertise_input_is_split_and_trimmed() {
        let mut form = ConferenceForm::default();
        form.set_expertise_input(" AI,  Databases ,Networks");
        assert_eq!(form.expertise, vec!["AI", "Databases", "Networks"]);
        assert_eq!(form.expertise_input(), "AI, Databases, Networks");
    }

    #[test]
    fn review_mode_round_trips_through_wire_names() {
        assert_eq!("double-blind".parse::<ReviewMode>(), Ok(ReviewMode::DoubleBlind));
        assert!("triple-blind".parse::<ReviewMode>().is_err());
        assert_eq!(
            serde_json::to_string(&ReviewMode::NoBlind).unwrap(),
            "\"no-blind\""
        );
    }

    #[test]
    fn payload_uses_camel_case_and_iso_dates() {
        let form = ConferenceForm {
            conference_name: "  Systems Week ".into(),
            acronym: "SW".into(),
            expertise: vec!["AI".into(), " ".into()],
            ..ConferenceForm::default()
        };
        let d = NaiveDate::from_ymd_opt(2030, 5, 1).unwrap();
        let dates = ConferenceDates {
            start: d,
            end: d,
            abstract_deadline: d,
            submission_deadline: d,
        };
        let payload = ConferencePayload::assemble(&form, ReviewMode::SingleBlind, dates, "u1");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["conferenceName"], "Systems Week");
        assert_eq!(json["startDate"], "2030-05-01");
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["topics"].as_array().unwrap().len(), 4);
        assert_eq!(json["expertise"], serde_json::json!(["AI"]));
    }

    #[test]
    fn registered_conference_reads_iso_deadline() {
        let conference: RegisteredConference = serde_json::from_str(
            r#"{
                "_id": "c7",
                "conferenceName": "Kernel Days",
                "acronym": "KD",
                "topics": ["", "Scheduling", " ", "Memory", "I/O"],
                "submissionDeadline": "2030-03-15T00:00:00.000Z",
                "status": "approved"
            }"#,
        )
        .unwrap();

        let deadline = NaiveDate::from_ymd_opt(2030, 3, 15).unwrap();
        assert_eq!(conference.submission_deadline(), Some(deadline));
        assert!(!conference.submission_closed(deadline));
        assert!(conference.submission_closed(deadline.succ_opt().unwrap()));
        assert_eq!(conference.shown_topics(), ["Scheduling", "Memory"]);
        assert_eq!(conference.status, ConferenceStatus::Approved);
        assert_eq!(conference.target().name, "Kernel Days");
    }
}
