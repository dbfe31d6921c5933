mod common;

use common::{report, words, MockBackend, Reply};
use confizio_submit::orchestrator::{App, Backends, ProcessingStats};
use confizio_submit::Config;
use std::path::{Path, PathBuf};

fn draft_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("confizio-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_drafts(dir: &Path) {
    std::fs::write(
        dir.join("01-conference.toml"),
        r#"
kind = "conference"
conferenceName = "Rust Systems Summit"
acronym = "RSS"
mode = "double-blind"
startDate = "2099-06-01"
endDate = "2099-06-30"
abstractDeadline = "2099-05-01"
submissionDeadline = "2099-06-10"
topics = ["Compilers"]
expertise = ["Compilers"]
"#,
    )
    .unwrap();

    std::fs::write(
        dir.join("02-paper.toml"),
        format!(
            r#"
kind = "paper"
conferenceId = "c1"
conferenceAcronym = "RSS"
title = "Borrow Checking at Scale"
abstract = "{}"
keywords = "rust, compilers"
file = "paper.pdf"

[correspondingAuthor]
firstName = "Ada"
"#,
            words(120)
        ),
    )
    .unwrap();
    std::fs::write(dir.join("paper.pdf"), b"%PDF-1.7").unwrap();

    std::fs::write(
        dir.join("03-review.toml"),
        r#"
kind = "review"
paperId = "p1"
reviewerId = "r1"

[scores]
originality = 7
overallRecommendation = "Accept"
commentsForAuthors = "Well argued."
commentsForOrganizers = "Accept."
"#,
    )
    .unwrap();
}

fn config(dir: &Path) -> Config {
    Config {
        draft_folder: dir.to_string_lossy().to_string(),
        max_concurrent_drafts: 2,
        ..Config::default()
    }
}

#[tokio::test]
async fn every_draft_kind_is_submitted() {
    let dir = draft_dir("all-kinds");
    write_drafts(&dir);
    let mock = MockBackend::shared();

    let app = App::with_backends(
        config(&dir),
        (*common::session()).clone(),
        Backends {
            conferences: mock.clone(),
            authors: mock.clone(),
            reviewers: mock.clone(),
        },
    );
    let stats = app.run().await.unwrap();

    assert_eq!(
        stats,
        ProcessingStats {
            success: 3,
            failed: 0,
            total: 3
        }
    );
    assert_eq!(mock.conferences_sent().len(), 1);
    assert_eq!(mock.papers_sent()[0].conference_name, "Rust Systems Summit");
    assert_eq!(mock.reviews_sent()[0].originality, 7);

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn low_compliance_is_not_confirmed_by_default() {
    let dir = draft_dir("low-compliance");
    write_drafts(&dir);
    let mock = MockBackend::shared();
    mock.set_compliance(Reply::Ok(report(30.0)));

    let backends = Backends {
        conferences: mock.clone(),
        authors: mock.clone(),
        reviewers: mock.clone(),
    };
    let app = App::with_backends(config(&dir), (*common::session()).clone(), backends.clone());
    let stats = app.run().await.unwrap();
    assert_eq!(stats.failed, 1);
    assert!(mock.papers_sent().is_empty());

    let confirming = Config {
        confirm_low_compliance: true,
        ..config(&dir)
    };
    let app = App::with_backends(confirming, (*common::session()).clone(), backends);
    let stats = app.run().await.unwrap();
    assert_eq!(stats.success, 3);
    assert_eq!(mock.papers_sent().len(), 1);

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn empty_folder_processes_nothing() {
    let dir = draft_dir("empty");
    let mock = MockBackend::shared();
    let app = App::with_backends(
        config(&dir),
        (*common::session()).clone(),
        Backends {
            conferences: mock.clone(),
            authors: mock.clone(),
            reviewers: mock,
        },
    );
    assert_eq!(app.run().await.unwrap(), ProcessingStats::default());
    let _ = std::fs::remove_dir_all(&dir);
}
