//! End-to-end session flows: queue mutations, undo/redo, and merge
//! driven entirely through intents.

use lopdf::Document;
use tempfile::TempDir;

use pdfdeck::config::Config;
use pdfdeck::session::{Intent, MergeSession};
use pdfdeck::validation::FileCandidate;

use crate::common::{pdf_candidate, pdf_with_pages_and_width, write_pdf};

fn session_in(dir: &TempDir) -> MergeSession {
    MergeSession::new(Config {
        output: dir.path().join("merged.pdf"),
        ..Default::default()
    })
}

fn queued_names(session: &MergeSession) -> Vec<String> {
    session
        .snapshot()
        .items
        .iter()
        .map(|item| item.name.clone())
        .collect()
}

#[tokio::test]
async fn test_full_session_add_reorder_merge() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir);

    // Distinct page widths so the output reveals merge order.
    let narrow = FileCandidate::in_memory(
        "narrow.pdf",
        "application/pdf",
        pdf_with_pages_and_width(1, 300),
    );
    let wide = FileCandidate::in_memory(
        "wide.pdf",
        "application/pdf",
        pdf_with_pages_and_width(1, 600),
    );

    session
        .dispatch(Intent::AddFiles(vec![narrow, wide]))
        .await;
    assert_eq!(queued_names(&session), vec!["narrow.pdf", "wide.pdf"]);

    // Put the wide document first.
    session
        .dispatch(Intent::ReorderFile { from: 1, to: 0 })
        .await;
    assert_eq!(queued_names(&session), vec!["wide.pdf", "narrow.pdf"]);

    let notices = session.dispatch(Intent::Merge).await;
    assert!(notices.iter().all(|n| !n.is_error()));

    let merged = Document::load_mem(&std::fs::read(dir.path().join("merged.pdf")).unwrap()).unwrap();
    assert_eq!(crate::common::page_widths(&merged), vec![600, 300]);
}

#[tokio::test]
async fn test_session_with_files_from_disk() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", 2);
    let b = write_pdf(dir.path(), "b.pdf", 3);

    let mut session = session_in(&dir);
    let candidates = vec![
        FileCandidate::from_path(&a).await.unwrap(),
        FileCandidate::from_path(&b).await.unwrap(),
    ];

    let notices = session.dispatch(Intent::AddFiles(candidates)).await;
    assert!(notices.iter().all(|n| !n.is_error()));

    session.dispatch(Intent::Merge).await;

    let merged = Document::load_mem(&std::fs::read(dir.path().join("merged.pdf")).unwrap()).unwrap();
    assert_eq!(merged.get_pages().len(), 5);
}

#[tokio::test]
async fn test_undo_then_merge_uses_current_queue() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir);

    session
        .dispatch(Intent::AddFiles(vec![
            pdf_candidate("a.pdf", 1),
            pdf_candidate("b.pdf", 2),
            pdf_candidate("c.pdf", 4),
        ]))
        .await;

    // Undo removes the last add; merge should see only a and b.
    session.dispatch(Intent::Undo).await;
    assert_eq!(queued_names(&session), vec!["a.pdf", "b.pdf"]);

    session.dispatch(Intent::Merge).await;

    let merged = Document::load_mem(&std::fs::read(dir.path().join("merged.pdf")).unwrap()).unwrap();
    assert_eq!(merged.get_pages().len(), 3);
}

#[tokio::test]
async fn test_redo_restores_removed_file_for_merge() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir);

    session
        .dispatch(Intent::AddFiles(vec![
            pdf_candidate("a.pdf", 1),
            pdf_candidate("b.pdf", 1),
        ]))
        .await;

    session.dispatch(Intent::RemoveFile(1)).await;
    session.dispatch(Intent::Undo).await;
    assert_eq!(queued_names(&session), vec!["a.pdf", "b.pdf"]);

    let notices = session.dispatch(Intent::Merge).await;
    assert!(notices.iter().all(|n| !n.is_error()));
}

#[tokio::test]
async fn test_snapshot_totals_track_mutations() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir);

    session
        .dispatch(Intent::AddFiles(vec![
            pdf_candidate("a.pdf", 1),
            pdf_candidate("b.pdf", 1),
        ]))
        .await;

    let before = session.snapshot();
    assert_eq!(before.total_size, before.items.iter().map(|i| i.size).sum());
    assert!(before.can_merge);

    session.dispatch(Intent::RemoveFile(0)).await;
    let after = session.snapshot();
    assert!(after.total_size < before.total_size);
    assert!(!after.can_merge);
}

#[tokio::test]
async fn test_compression_estimate_in_snapshot() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir);

    session
        .dispatch(Intent::AddFiles(vec![pdf_candidate("a.pdf", 1)]))
        .await;

    let plain = session.snapshot();
    session.dispatch(Intent::ToggleCompression).await;
    let compressed = session.snapshot();

    assert!(!plain.compress);
    assert!(compressed.compress);
    assert_eq!(plain.total_size, compressed.total_size);
    assert_ne!(
        plain.estimated_size_display,
        compressed.estimated_size_display
    );
}
