use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 10;

/// 总体推荐意见
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Accept")]
    Accept,
    #[serde(rename = "Accept with minor correction")]
    AcceptWithMinorCorrection,
    #[serde(rename = "Reject")]
    Reject,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Recommendation::Accept => "Accept",
            Recommendation::AcceptWithMinorCorrection => "Accept with minor correction",
            Recommendation::Reject => "Reject",
        })
    }
}

/// 评分维度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    Originality,
    TechnicalQuality,
    Significance,
    Clarity,
    Relevance,
}

impl Criterion {
    pub const ALL: [Criterion; 5] = [
        Criterion::Originality,
        Criterion::TechnicalQuality,
        Criterion::Significance,
        Criterion::Clarity,
        Criterion::Relevance,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Criterion::Originality => "originality",
            Criterion::TechnicalQuality => "technicalQuality",
            Criterion::Significance => "significance",
            Criterion::Clarity => "clarity",
            Criterion::Relevance => "relevance",
        }
    }
}

/// 评审打分
///
/// 五个维度默认都是 1，没有"未评分"状态。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReviewScores {
    pub originality: u8,
    pub technical_quality: u8,
    pub significance: u8,
    pub clarity: u8,
    pub relevance: u8,
    pub overall_recommendation: Option<Recommendation>,
    pub comments_for_authors: String,
    pub comments_for_organizers: String,
}

impl Default for ReviewScores {
    fn default() -> Self {
        Self {
            originality: MIN_SCORE,
            technical_quality: MIN_SCORE,
            significance: MIN_SCORE,
            clarity: MIN_SCORE,
            relevance: MIN_SCORE,
            overall_recommendation: None,
            comments_for_authors: String::new(),
            comments_for_organizers: String::new(),
        }
    }
}

impl ReviewScores {
    pub fn score(&self, criterion: Criterion) -> u8 {
        match criterion {
            Criterion::Originality => self.originality,
            Criterion::TechnicalQuality => self.technical_quality,
            Criterion::Significance => self.significance,
            Criterion::Clarity => self.clarity,
            Criterion::Relevance => self.relevance,
        }
    }

    pub(crate) fn score_mut(&mut self, criterion: Criterion) -> &mut u8 {
        match criterion {
            Criterion::Originality => &mut self.originality,
            Criterion::TechnicalQuality => &mut self.technical_quality,
            Criterion::Significance => &mut self.significance,
            Criterion::Clarity => &mut self.clarity,
            Criterion::Relevance => &mut self.relevance,
        }
    }
}

/// 提交评审请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPayload {
    pub originality: u8,
    pub technical_quality: u8,
    pub significance: u8,
    pub clarity: u8,
    pub relevance: u8,
    pub overall_recommendation: Recommendation,
    pub comments_for_authors: String,
    pub comments_for_organizers: String,
    pub paper_id: String,
    pub reviewer_id: String,
}

/// 评审对象（来自查询参数）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReviewTarget {
    pub paper_id: String,
    pub reviewer_id: String,
    pub title: String,
}

/// 分配给评审人的论文
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssignedPaper {
    pub paper_id: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub keywords: Vec<String>,
    pub conference_acronym: String,
    pub conference_name: String,
    pub assigned_at: Option<String>,
    pub paper_file_path: String,
    /// 已提交评审的评审人 ID
    pub is_reviewed_by: Vec<String>,
}

impl AssignedPaper {
    pub fn reviewed_by(&self, reviewer_id: &str) -> bool {
        self.is_reviewed_by.iter().any(|id| id == reviewer_id)
    }

    pub fn review_target(&self, reviewer_id: &str) -> ReviewTarget {
        ReviewTarget {
            paper_id: self.paper_id.clone(),
            reviewer_id: reviewer_id.to_string(),
            title: self.title.clone(),
        }
    }
}

/// `assigned-papers` 的返回
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AssignedPapersResponse {
    pub success: Option<bool>,
    pub data: Vec<AssignedPaper>,
}
