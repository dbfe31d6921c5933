mod common;

use common::{MockBackend, Reply};
use confizio_submit::error::ValidationError;
use confizio_submit::models::{Criterion, Recommendation, ReviewScores, ReviewTarget};
use confizio_submit::workflow::{ReviewFlow, SubmitOutcome};
use std::sync::Arc;

fn target() -> ReviewTarget {
    ReviewTarget {
        paper_id: "p1".into(),
        reviewer_id: "r1".into(),
        title: "Borrow Checking at Scale".into(),
    }
}

fn filled(mock: &Arc<MockBackend>) -> ReviewFlow {
    let mut flow = ReviewFlow::new(mock.clone(), target());
    flow.set_recommendation(Recommendation::AcceptWithMinorCorrection);
    flow.set_comments_for_authors("Clear motivation.");
    flow.set_comments_for_organizers("Borderline accept.");
    flow
}

#[test]
fn out_of_range_scores_are_refused() {
    let mock = MockBackend::shared();
    let mut flow = ReviewFlow::new(mock, target());

    assert_eq!(
        flow.set_score(Criterion::Clarity, 11),
        Err(ValidationError::ScoreOutOfRange {
            criterion: "clarity",
            value: 11
        })
    );
    assert!(flow.set_score(Criterion::Clarity, 0).is_err());
    assert_eq!(flow.scores().clarity, 1);

    flow.set_score(Criterion::Clarity, 10).unwrap();
    assert_eq!(flow.scores().clarity, 10);
}

#[tokio::test]
async fn recommendation_is_required() {
    let mock = MockBackend::shared();
    let mut flow = ReviewFlow::new(mock.clone(), target());
    flow.set_comments_for_authors("ok");

    assert_eq!(
        flow.submit().await.unwrap(),
        SubmitOutcome::Blocked(ValidationError::RecommendationRequired)
    );
    assert!(mock.reviews_sent().is_empty());
}

#[tokio::test]
async fn submitted_review_resets_to_defaults() {
    let mock = MockBackend::shared();
    let mut flow = filled(&mock);
    flow.set_score(Criterion::Originality, 8).unwrap();

    assert_eq!(
        flow.submit().await.unwrap(),
        SubmitOutcome::Submitted {
            message: "Review submitted successfully!".into()
        }
    );

    let sent = &mock.reviews_sent()[0];
    assert_eq!(sent.paper_id, "p1");
    assert_eq!(sent.reviewer_id, "r1");
    assert_eq!(sent.originality, 8);
    assert_eq!(
        sent.overall_recommendation,
        Recommendation::AcceptWithMinorCorrection
    );
    assert_eq!(flow.scores(), &ReviewScores::default());
}

#[tokio::test]
async fn failed_review_keeps_scores() {
    let mock = MockBackend::shared();
    mock.set_review(Reply::Down);
    let mut flow = filled(&mock);

    assert_eq!(
        flow.submit().await.unwrap(),
        SubmitOutcome::Failed {
            message: "Failed to submit review.".into()
        }
    );
    assert_eq!(flow.scores().comments_for_authors, "Clear motivation.");

    mock.set_review(Reply::Rejected("Review window closed".into()));
    assert_eq!(
        flow.submit().await.unwrap().message().as_deref(),
        Some("Review window closed")
    );
}
