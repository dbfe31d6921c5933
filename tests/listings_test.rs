mod common;

use chrono::NaiveDate;
use common::{assigned, registered, session, MockBackend, Reply};
use confizio_submit::models::{AssignedPapersResponse, ConferenceStatus, Session, SessionUser};
use confizio_submit::validation::FixedClock;
use confizio_submit::workflow::{
    AssignedPapers, ConferenceAction, ListOutcome, RegisteredConferences,
};
use std::sync::Arc;

fn today() -> Arc<FixedClock> {
    Arc::new(FixedClock(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()))
}

fn admin() -> Arc<Session> {
    Arc::new(Session {
        user: SessionUser {
            access_level: 1,
            ..session().user.clone()
        },
        ..Session::clone(&session())
    })
}

#[tokio::test]
async fn reviewed_papers_have_no_review_form() {
    let mock = MockBackend::shared();
    let mut papers = AssignedPapers::new(mock.clone(), &session());

    assert_eq!(papers.load().await, ListOutcome::Loaded { count: 2 });
    assert!(!papers.is_reviewed(&papers.papers()[0]));
    assert!(papers.is_reviewed(&papers.papers()[1]));

    let target = papers.review_target("p1").unwrap();
    assert_eq!(target.reviewer_id, "u1");
    assert_eq!(target.title, "Paper p1");
    assert_eq!(papers.review_target("p2"), None);
    assert_eq!(papers.review_target("missing"), None);
}

#[tokio::test]
async fn assigned_paper_failures_keep_previous_list() {
    let mock = MockBackend::shared();
    let mut papers = AssignedPapers::new(mock.clone(), &session());
    papers.load().await;

    mock.set_assigned(Reply::Ok(AssignedPapersResponse {
        success: Some(false),
        data: Vec::new(),
    }));
    assert_eq!(
        papers.load().await,
        ListOutcome::Failed {
            message: "Failed to fetch assigned papers.".into()
        }
    );

    mock.set_assigned(Reply::Down);
    assert_eq!(
        papers.load().await,
        ListOutcome::Failed {
            message: "An error occurred while fetching assigned papers.".into()
        }
    );
    assert_eq!(papers.papers().len(), 2);
}

#[tokio::test]
async fn conference_rows_offer_the_right_action() {
    let mock = MockBackend::shared();
    mock.set_registered(Reply::Ok(vec![
        registered("open", ConferenceStatus::Approved, "2024-02-01T00:00:00.000Z"),
        registered("late", ConferenceStatus::Approved, "2023-12-31"),
        registered("wait", ConferenceStatus::Pending, "2024-02-01"),
    ]));
    let mut list = RegisteredConferences::new(mock.clone(), Some(session())).with_clock(today());
    assert_eq!(list.load().await, ListOutcome::Loaded { count: 3 });

    let rows = list.conferences().to_vec();
    let open = list.action_for(&rows[0]);
    assert!(matches!(open, ConferenceAction::Apply { ref target } if target.id == "open"));
    assert_eq!(
        list.apply_path(&rows[0]).as_deref(),
        Some("/conference/OPEN/submit-paper/open")
    );
    assert_eq!(list.action_for(&rows[1]), ConferenceAction::Closed);
    assert_eq!(list.action_for(&rows[2]), ConferenceAction::Pending);
    assert_eq!(list.apply_path(&rows[2]), None);
}

#[tokio::test]
async fn visitors_are_sent_to_login_and_admins_edit() {
    let mock = MockBackend::shared();
    mock.set_registered(Reply::Ok(vec![registered(
        "open",
        ConferenceStatus::Approved,
        "2024-02-01",
    )]));

    let mut visitor = RegisteredConferences::new(mock.clone(), None).with_clock(today());
    visitor.load().await;
    let row = visitor.conferences()[0].clone();
    assert_eq!(visitor.apply_path(&row).as_deref(), Some("/login"));

    let admin_view = RegisteredConferences::new(mock.clone(), Some(admin())).with_clock(today());
    assert_eq!(
        admin_view.action_for(&row).path().as_deref(),
        Some("/admindashboard/update-conference")
    );
}

#[tokio::test]
async fn conference_list_failure_surfaces_backend_message() {
    let mock = MockBackend::shared();
    mock.set_registered(Reply::Rejected("Unauthorized".into()));
    let mut list = RegisteredConferences::new(mock.clone(), None);

    assert_eq!(
        list.load().await,
        ListOutcome::Failed {
            message: "Unauthorized".into()
        }
    );
    assert!(list.conferences().is_empty());
}
