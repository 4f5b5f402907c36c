//! Integration test helpers.
//!
//! Fixtures are built programmatically with lopdf rather than checked
//! in as binaries, so every test starts from a known-good document.

use lopdf::{dictionary, Document};
use std::path::PathBuf;

use pdfdeck::config::PDF_MIME;
use pdfdeck::validation::FileCandidate;

/// Build a PDF with the given number of pages, serialized.
///
/// Each page's MediaBox width is `width`, which survives merging and
/// lets tests verify page order in the output.
pub fn pdf_with_pages_and_width(page_count: usize, width: i64) -> Vec<u8> {
    let mut doc = Document::with_version("1.4");

    let pages_id = doc.new_object_id();
    let mut kids = Vec::new();
    for _ in 0..page_count {
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), 792.into()],
        });
        kids.push(page_id.into());
    }
    doc.objects.insert(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
        }
        .into(),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// Build a PDF with the given number of letter-width pages.
pub fn pdf_with_pages(page_count: usize) -> Vec<u8> {
    pdf_with_pages_and_width(page_count, 612)
}

/// Write a generated PDF into `dir` and return its path.
pub fn write_pdf(dir: &std::path::Path, name: &str, page_count: usize) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, pdf_with_pages(page_count)).unwrap();
    path
}

/// In-memory candidate with a valid PDF body.
pub fn pdf_candidate(name: &str, page_count: usize) -> FileCandidate {
    FileCandidate::in_memory(name, PDF_MIME, pdf_with_pages(page_count))
}

/// MediaBox widths of the document's pages, in page order.
pub fn page_widths(doc: &Document) -> Vec<i64> {
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
            let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
            media_box[2].as_i64().unwrap()
        })
        .collect()
}
