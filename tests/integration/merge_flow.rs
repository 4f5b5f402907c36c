//! Merge behavior through the session: guards, compaction, failure
//! recovery, and the post-merge clear confirmation.

use lopdf::Document;
use tempfile::TempDir;

use pdfdeck::config::Config;
use pdfdeck::session::{Intent, MergeSession};

use crate::common::pdf_candidate;

#[tokio::test]
async fn test_merge_refused_below_two_files() {
    let dir = TempDir::new().unwrap();
    let mut session = MergeSession::new(Config {
        output: dir.path().join("merged.pdf"),
        ..Default::default()
    });

    // Empty queue.
    let notices = session.dispatch(Intent::Merge).await;
    assert!(notices[0].is_error());

    // One file is still not enough.
    session
        .dispatch(Intent::AddFiles(vec![pdf_candidate("only.pdf", 1)]))
        .await;
    let notices = session.dispatch(Intent::Merge).await;
    assert!(notices[0].is_error());
    assert!(!dir.path().join("merged.pdf").exists());
}

#[tokio::test]
async fn test_merge_with_compaction_produces_valid_output() {
    let dir = TempDir::new().unwrap();
    let mut session = MergeSession::new(Config {
        output: dir.path().join("merged.pdf"),
        compress: true,
        ..Default::default()
    });

    session
        .dispatch(Intent::AddFiles(vec![
            pdf_candidate("a.pdf", 2),
            pdf_candidate("b.pdf", 2),
        ]))
        .await;

    let notices = session.dispatch(Intent::Merge).await;
    assert!(notices.iter().all(|n| !n.is_error()));

    let merged = Document::load_mem(&std::fs::read(dir.path().join("merged.pdf")).unwrap()).unwrap();
    assert_eq!(merged.get_pages().len(), 4);
}

#[tokio::test]
async fn test_failed_merge_keeps_session_usable() {
    let dir = TempDir::new().unwrap();
    let mut session = MergeSession::new(Config {
        output: dir.path().join("no-such-dir").join("merged.pdf"),
        ..Default::default()
    });

    session
        .dispatch(Intent::AddFiles(vec![
            pdf_candidate("a.pdf", 1),
            pdf_candidate("b.pdf", 1),
        ]))
        .await;

    let notices = session.dispatch(Intent::Merge).await;
    assert!(notices[0].is_error());
    assert!(!session.is_merging());
    assert_eq!(session.queue_len(), 2);

    // The session keeps working: mutate and merge again to a
    // writable location by rebuilding, or just mutate here.
    let notices = session.dispatch(Intent::RemoveFile(0)).await;
    assert!(!notices[0].is_error());
    assert_eq!(session.queue_len(), 1);
}

#[tokio::test]
async fn test_declined_confirmation_preserves_queue_for_another_merge() {
    let dir = TempDir::new().unwrap();
    let mut session = MergeSession::new(Config {
        output: dir.path().join("merged.pdf"),
        ..Default::default()
    })
    .with_confirm(Box::new(|_| false));

    session
        .dispatch(Intent::AddFiles(vec![
            pdf_candidate("a.pdf", 1),
            pdf_candidate("b.pdf", 1),
        ]))
        .await;

    let notices = session.dispatch(Intent::Merge).await;
    assert_eq!(notices.len(), 1);
    assert!(!notices[0].is_error());

    // The queue survived, so a second merge works immediately.
    let notices = session.dispatch(Intent::Merge).await;
    assert!(notices.iter().all(|n| !n.is_error()));
    assert_eq!(session.queue_len(), 2);
}

#[tokio::test]
async fn test_accepted_confirmation_clears_everything() {
    let dir = TempDir::new().unwrap();
    let mut session = MergeSession::new(Config {
        output: dir.path().join("merged.pdf"),
        ..Default::default()
    })
    .with_confirm(Box::new(|_| true));

    session
        .dispatch(Intent::AddFiles(vec![
            pdf_candidate("a.pdf", 1),
            pdf_candidate("b.pdf", 1),
        ]))
        .await;

    session.dispatch(Intent::Merge).await;
    assert_eq!(session.queue_len(), 0);

    // History is gone too.
    let notices = session.dispatch(Intent::Undo).await;
    assert_eq!(notices[0].message, "Nothing to undo");
}
