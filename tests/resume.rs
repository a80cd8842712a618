//! End-to-end tests for the resumable press loop, driven by an in-memory
//! problem source and temp files.

use async_trait::async_trait;
use leetpress::{
    Difficulty, FetchError, LeetPress, LeetPressBuilder, PressError, ProblemDetail, ProblemSource,
    ProblemSummary,
};
use std::fs;
use tempfile::TempDir;

#[derive(Default)]
struct MockSource {
    problems: Vec<ProblemSummary>,
    /// Detail fetches for this id fail.
    fail_on: Option<u32>,
    /// The catalog fetch itself fails.
    fail_list: bool,
}

impl MockSource {
    fn with_ids(ids: &[u32]) -> Self {
        Self {
            problems: ids
                .iter()
                .map(|&id| ProblemSummary {
                    id,
                    title_slug: format!("problem-{id}"),
                    paid_only: false,
                })
                .collect(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl ProblemSource for MockSource {
    async fn list_problems(&self, include_paid: bool) -> Result<Vec<ProblemSummary>, FetchError> {
        if self.fail_list {
            return Err(FetchError::Server {
                status: 403,
                body: "forbidden".to_string(),
            });
        }
        let mut problems: Vec<ProblemSummary> = self
            .problems
            .iter()
            .filter(|p| include_paid || !p.paid_only)
            .cloned()
            .collect();
        problems.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(problems)
    }

    async fn fetch_detail(&self, title_slug: &str) -> Result<ProblemDetail, FetchError> {
        let summary = self
            .problems
            .iter()
            .find(|p| p.title_slug == title_slug)
            .expect("unknown slug in test catalog");
        if self.fail_on == Some(summary.id) {
            return Err(FetchError::MissingQuestion {
                slug: title_slug.to_string(),
            });
        }
        Ok(ProblemDetail {
            id: summary.id,
            title: format!("Problem {}", summary.id),
            difficulty: Difficulty::Easy,
            content: format!("<p>Body of problem {}</p>", summary.id),
        })
    }
}

fn press(dir: &TempDir) -> LeetPress {
    LeetPressBuilder::default()
        .output_path(dir.path().join("problems.html"))
        .break_log_path(dir.path().join("break.log"))
        .build()
        .unwrap()
}

fn output(dir: &TempDir) -> String {
    fs::read_to_string(dir.path().join("problems.html")).unwrap()
}

fn fragment_count(doc: &str, id: u32) -> usize {
    doc.matches(&format!("<h1>Problem {id}<sup>")).count()
}

#[tokio::test]
async fn full_run_produces_well_formed_document() {
    let dir = TempDir::new().unwrap();
    let source = MockSource::with_ids(&[1, 2]);

    press(&dir).run_with(&source).await.unwrap();

    let doc = output(&dir);
    assert_eq!(doc.matches("<!DOCTYPE html>").count(), 1);
    assert_eq!(fragment_count(&doc, 1), 1);
    assert_eq!(fragment_count(&doc, 2), 1);
    assert_eq!(doc.matches("</html>").count(), 1);
    assert!(!dir.path().join("break.log").exists());
}

#[tokio::test]
async fn paid_only_problems_are_excluded_by_default() {
    let dir = TempDir::new().unwrap();
    let mut source = MockSource::with_ids(&[1, 2]);
    source.problems[1].paid_only = true;

    press(&dir).run_with(&source).await.unwrap();

    let doc = output(&dir);
    assert_eq!(fragment_count(&doc, 1), 1);
    assert_eq!(fragment_count(&doc, 2), 0);
    assert_eq!(doc.matches("</html>").count(), 1);
}

#[tokio::test]
async fn paid_only_problems_are_kept_when_requested() {
    let dir = TempDir::new().unwrap();
    let mut source = MockSource::with_ids(&[1, 2]);
    source.problems[1].paid_only = true;
    let press = LeetPressBuilder::default()
        .output_path(dir.path().join("problems.html"))
        .break_log_path(dir.path().join("break.log"))
        .include_paid(true)
        .build()
        .unwrap();

    press.run_with(&source).await.unwrap();

    let doc = output(&dir);
    assert_eq!(fragment_count(&doc, 1), 1);
    assert_eq!(fragment_count(&doc, 2), 1);
}

#[tokio::test]
async fn failure_records_break_log_and_leaves_no_foot() {
    let dir = TempDir::new().unwrap();
    let mut source = MockSource::with_ids(&[1, 2, 3, 4, 5]);
    source.fail_on = Some(5);

    let err = press(&dir).run_with(&source).await.unwrap_err();
    assert!(matches!(err, PressError::Network(_)));

    assert_eq!(
        fs::read_to_string(dir.path().join("break.log")).unwrap(),
        "5"
    );

    let doc = output(&dir);
    assert_eq!(fragment_count(&doc, 4), 1);
    assert_eq!(fragment_count(&doc, 5), 0);
    assert!(!doc.contains("</html>"));
}

#[tokio::test]
async fn resume_skips_completed_ids_without_duplicates() {
    let dir = TempDir::new().unwrap();

    let mut source = MockSource::with_ids(&[1, 2, 3]);
    source.fail_on = Some(2);
    press(&dir).run_with(&source).await.unwrap_err();
    assert_eq!(
        fs::read_to_string(dir.path().join("break.log")).unwrap(),
        "2"
    );

    // Second invocation consumes the break log, skips id 1, reprocesses 2
    // and 3, and closes the document.
    let source = MockSource::with_ids(&[1, 2, 3]);
    press(&dir).run_with(&source).await.unwrap();
    assert!(!dir.path().join("break.log").exists());

    let doc = output(&dir);
    assert_eq!(doc.matches("<!DOCTYPE html>").count(), 1);
    for id in 1..=3 {
        assert_eq!(fragment_count(&doc, id), 1, "fragment count for id {id}");
    }
    assert_eq!(doc.matches("</html>").count(), 1);
}

#[tokio::test]
async fn rerun_after_completion_starts_a_fresh_document() {
    let dir = TempDir::new().unwrap();
    let source = MockSource::with_ids(&[1]);

    press(&dir).run_with(&source).await.unwrap();
    press(&dir).run_with(&source).await.unwrap();

    // No break log between runs, so the second run truncates rather than
    // appending past a completed document.
    let doc = output(&dir);
    assert_eq!(doc.matches("<!DOCTYPE html>").count(), 1);
    assert_eq!(fragment_count(&doc, 1), 1);
    assert_eq!(doc.matches("</html>").count(), 1);
}

#[tokio::test]
async fn catalog_failure_writes_no_break_log() {
    let dir = TempDir::new().unwrap();
    let source = MockSource {
        fail_list: true,
        ..MockSource::with_ids(&[1])
    };

    let err = press(&dir).run_with(&source).await.unwrap_err();
    assert!(matches!(err, PressError::Network(_)));
    assert!(!dir.path().join("break.log").exists());
    // The fresh document was created before the catalog fetch, head only.
    assert!(!output(&dir).contains("<h1>"));
}

#[tokio::test]
async fn break_log_write_failure_keeps_the_original_error() {
    let dir = TempDir::new().unwrap();
    let mut source = MockSource::with_ids(&[1]);
    source.fail_on = Some(1);

    // Parent directory of the break log does not exist, so recording the
    // resume point fails on top of the fetch failure.
    let press = LeetPressBuilder::default()
        .output_path(dir.path().join("problems.html"))
        .break_log_path(dir.path().join("missing").join("break.log"))
        .build()
        .unwrap();

    let err = press.run_with(&source).await.unwrap_err();
    match err {
        PressError::BreakLogLost { original, .. } => {
            assert!(matches!(*original, PressError::Network(_)))
        }
        other => panic!("expected BreakLogLost, got {other:?}"),
    }
    assert!(!dir.path().join("missing").exists());
}
