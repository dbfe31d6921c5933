//! 评审表单流程

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::clients::ReviewerApi;
use crate::error::{ValidationError, ValidationResult, WorkflowError};
use crate::models::{Criterion, Recommendation, ReviewPayload, ReviewScores, ReviewTarget};
use crate::validation::field::check_score;
use crate::validation::review_rules;
use crate::workflow::lifetime::Lifetime;
use crate::workflow::state::{SubmissionMachine, SubmissionState, SubmitOutcome};

const SUBMITTED: &str = "Review submitted successfully!";
const SUBMIT_FAILED: &str = "Failed to submit review.";

pub struct ReviewFlow {
    api: Arc<dyn ReviewerApi>,
    target: ReviewTarget,
    scores: ReviewScores,
    machine: SubmissionMachine,
    lifetime: Lifetime,
}

impl ReviewFlow {
    pub fn new(api: Arc<dyn ReviewerApi>, target: ReviewTarget) -> Self {
        Self {
            api,
            target,
            scores: ReviewScores::default(),
            machine: SubmissionMachine::new(),
            lifetime: Lifetime::new(),
        }
    }

    pub fn target(&self) -> &ReviewTarget {
        &self.target
    }

    pub fn scores(&self) -> &ReviewScores {
        &self.scores
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

    /// 设置单项分数，超出 [1, 10] 时拒绝且不修改
    pub fn set_score(&mut self, criterion: Criterion, value: u8) -> ValidationResult {
        check_score(criterion.name(), value)?;
        *self.scores.score_mut(criterion) = value;
        Ok(())
    }

    pub fn set_recommendation(&mut self, recommendation: Recommendation) {
        self.scores.overall_recommendation = Some(recommendation);
    }

    pub fn set_comments_for_authors(&mut self, text: impl Into<String>) {
        self.scores.comments_for_authors = text.into();
    }

    pub fn set_comments_for_organizers(&mut self, text: impl Into<String>) {
        self.scores.comments_for_organizers = text.into();
    }

    /// 用草稿整体替换评分
    pub fn load_scores(&mut self, scores: ReviewScores) {
        self.scores = scores;
    }

    fn payload(&self) -> Result<ReviewPayload, ValidationError> {
        let recommendation = self
            .scores
            .overall_recommendation
            .ok_or(ValidationError::RecommendationRequired)?;
        Ok(ReviewPayload {
            originality: self.scores.originality,
            technical_quality: self.scores.technical_quality,
            significance: self.scores.significance,
            clarity: self.scores.clarity,
            relevance: self.scores.relevance,
            overall_recommendation: recommendation,
            comments_for_authors: self.scores.comments_for_authors.clone(),
            comments_for_organizers: self.scores.comments_for_organizers.clone(),
            paper_id: self.target.paper_id.clone(),
            reviewer_id: self.target.reviewer_id.clone(),
        })
    }

    pub async fn submit(&mut self) -> Result<SubmitOutcome, WorkflowError> {
        self.machine.begin()?;

        let payload = match review_rules()
            .evaluate(&self.scores)
            .and_then(|_| self.payload())
        {
            Ok(payload) => payload,
            Err(e) => {
                warn!("[论文 {}] ⚠️ 评审校验未通过: {}", self.target.paper_id, e);
                self.machine.block();
                return Ok(SubmitOutcome::Blocked(e));
            }
        };

        let flight = self.machine.dispatch()?;
        info!("[论文 {}] 📤 正在提交评审...", payload.paper_id);
        let result = self.lifetime.run(self.api.submit_review(&payload)).await;
        drop(flight);

        let outcome = match result {
            None => SubmitOutcome::Cancelled,
            Some(Ok(reply)) if reply.is_refused() => SubmitOutcome::Failed {
                message: reply.message_or(SUBMIT_FAILED),
            },
            Some(Ok(reply)) => {
                info!("[论文 {}] ✅ 评审已提交", payload.paper_id);
                self.scores = ReviewScores::default();
                SubmitOutcome::Submitted {
                    message: reply.message_or(SUBMITTED),
                }
            }
            Some(Err(e)) => {
                error!("[论文 {}] ❌ 评审提交失败: {}", payload.paper_id, e);
                SubmitOutcome::Failed {
                    message: e.user_message(SUBMIT_FAILED),
                }
            }
        };
        Ok(outcome)
    }
}
