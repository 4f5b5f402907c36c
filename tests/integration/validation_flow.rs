//! Validation behavior at the session boundary: per-file rejections,
//! batch ordering, and the aggregate cap.

use tempfile::TempDir;

use pdfdeck::config::{Config, MAX_FILE_SIZE, MAX_TOTAL_SIZE, PDF_MIME};
use pdfdeck::session::{Intent, MergeSession};
use pdfdeck::validation::{ByteSource, FileCandidate, Validator};

use crate::common::{pdf_candidate, pdf_with_pages, write_pdf};

fn session_in(dir: &TempDir) -> MergeSession {
    MergeSession::new(Config {
        output: dir.path().join("merged.pdf"),
        ..Default::default()
    })
}

#[tokio::test]
async fn test_non_pdf_extension_is_rejected_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, pdf_with_pages(1)).unwrap();

    let candidate = FileCandidate::from_path(&path).await.unwrap();
    assert_ne!(candidate.mime, PDF_MIME);

    let mut session = session_in(&dir);
    let notices = session.dispatch(Intent::AddFiles(vec![candidate])).await;
    assert!(notices[0].is_error());
    assert!(notices[0].message.contains("not a PDF file"));
    assert_eq!(session.queue_len(), 0);
}

#[tokio::test]
async fn test_garbage_content_with_pdf_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fake.pdf");
    std::fs::write(&path, b"this is not a pdf at all").unwrap();

    let candidate = FileCandidate::from_path(&path).await.unwrap();
    let mut session = session_in(&dir);

    let notices = session.dispatch(Intent::AddFiles(vec![candidate])).await;
    assert!(notices[0].is_error());
    assert!(notices[0].message.contains("corrupted or invalid"));
}

#[tokio::test]
async fn test_rejections_do_not_block_later_candidates() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir);

    let notices = session
        .dispatch(Intent::AddFiles(vec![
            FileCandidate::in_memory("bad.txt", "text/plain", vec![]),
            pdf_candidate("good.pdf", 1),
        ]))
        .await;

    assert_eq!(notices.len(), 2);
    assert!(notices[0].is_error());
    assert!(!notices[1].is_error());
    assert_eq!(session.queue_len(), 1);
}

#[tokio::test]
async fn test_aggregate_cap_counts_already_queued_files() {
    // Small custom caps keep the fixtures tiny.
    let validator = Validator::with_limits(1024 * 1024, 2048);
    let candidate = FileCandidate::in_memory("next.pdf", PDF_MIME, pdf_with_pages(1));
    assert!(candidate.size < 2048, "fixture unexpectedly large");

    // Alone the candidate fits.
    assert!(validator.screen(&candidate, 0).await.is_ok());

    // With the queue nearly full, the same candidate breaks the cap.
    let err = validator.screen(&candidate, 2047).await.unwrap_err();
    assert!(err.to_string().contains("Total file size"));
}

/// A candidate whose declared size is independent of its (tiny, valid)
/// content. The caps run on declared metadata, so this stands in for a
/// genuinely large file without allocating one.
fn sized_candidate(name: &str, declared: u64) -> FileCandidate {
    FileCandidate {
        name: name.to_string(),
        mime: PDF_MIME.to_string(),
        size: declared,
        source: ByteSource::Memory(pdf_with_pages(1)),
    }
}

#[tokio::test]
async fn test_over_cap_batch_leaves_session_totals_unchanged() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir);

    // Fill the aggregate cap exactly with two per-file-cap files.
    assert_eq!(MAX_TOTAL_SIZE, 2 * MAX_FILE_SIZE);
    let notices = session
        .dispatch(Intent::AddFiles(vec![
            sized_candidate("a.pdf", MAX_FILE_SIZE),
            sized_candidate("b.pdf", MAX_FILE_SIZE),
        ]))
        .await;
    assert!(notices.iter().all(|n| !n.is_error()));
    assert_eq!(session.snapshot().total_size, MAX_TOTAL_SIZE);

    // Any further byte breaks the cap, and the batch remainder is
    // skipped without notices of its own.
    let notices = session
        .dispatch(Intent::AddFiles(vec![
            sized_candidate("c.pdf", 1024),
            sized_candidate("d.pdf", 1024),
        ]))
        .await;

    assert_eq!(notices.len(), 1);
    assert!(notices[0].is_error());
    assert!(notices[0].message.contains("Total file size"));

    assert_eq!(session.queue_len(), 2);
    assert_eq!(session.snapshot().total_size, MAX_TOTAL_SIZE);
}

#[tokio::test]
async fn test_valid_files_from_disk_pass_screening() {
    let dir = TempDir::new().unwrap();
    let path = write_pdf(dir.path(), "real.pdf", 3);

    let candidate = FileCandidate::from_path(&path).await.unwrap();
    assert_eq!(candidate.mime, PDF_MIME);

    let validator = Validator::new();
    let bytes = validator.screen(&candidate, 0).await.unwrap();
    assert_eq!(bytes.len() as u64, candidate.size);
}
