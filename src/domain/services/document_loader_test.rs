use anyhow::Result;
use test_utils::pdf_fixture;

use super::DocumentLoader;
use crate::domain::models::ExtractedText;
use crate::domain::models::ExtractionError;
use crate::domain::models::Session;

#[test]
fn it_extracts_a_single_page() -> Result<()> {
    let bytes = pdf_fixture(&["The term is twelve months."]);
    let res = DocumentLoader::extract_text(&bytes)?;

    assert_eq!(
        res,
        ExtractedText::Text("The term is twelve months.".to_string())
    );

    return Ok(());
}

#[test]
fn it_skips_pages_without_text() -> Result<()> {
    let bytes = pdf_fixture(&["Page one", "", "Page three"]);
    let res = DocumentLoader::extract_text(&bytes)?;

    assert_eq!(res, ExtractedText::Text("Page one\nPage three".to_string()));

    return Ok(());
}

#[test]
fn it_keeps_page_order() -> Result<()> {
    let bytes = pdf_fixture(&["Clause 1", "Clause 2", "Clause 3"]);
    let res = DocumentLoader::extract_text(&bytes)?;

    assert_eq!(
        res,
        ExtractedText::Text("Clause 1\nClause 2\nClause 3".to_string())
    );

    return Ok(());
}

#[test]
fn it_reports_no_text_found() -> Result<()> {
    let bytes = pdf_fixture(&["", ""]);
    let res = DocumentLoader::extract_text(&bytes)?;

    assert_eq!(res, ExtractedText::NoTextFound);

    return Ok(());
}

#[test]
fn it_fails_on_non_pdf_bytes() {
    let mut session = Session::default();
    session.set_document("Contract X".to_string()).unwrap();

    let res = DocumentLoader::extract_text(b"this is definitely not a pdf");

    assert!(matches!(res, Err(ExtractionError::Unreadable(_))));
    assert_eq!(session.document_text(), "Contract X");
}

#[test]
fn it_fails_on_empty_bytes() {
    let res = DocumentLoader::extract_text(&[]);
    assert!(res.is_err());
}

#[tokio::test]
async fn it_loads_from_a_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("contract.PDF");
    std::fs::write(&path, pdf_fixture(&["Signed by both parties."]))?;

    let res = DocumentLoader::load_file(&path).await?;
    assert_eq!(
        res,
        ExtractedText::Text("Signed by both parties.".to_string())
    );

    return Ok(());
}

#[tokio::test]
async fn it_rejects_files_without_a_pdf_extension() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("contract.txt");
    std::fs::write(&path, pdf_fixture(&["Signed by both parties."]))?;

    let res = DocumentLoader::load_file(&path).await;
    assert!(matches!(res, Err(ExtractionError::NotPdf(_))));

    return Ok(());
}

#[tokio::test]
async fn it_fails_on_missing_files() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("missing.pdf");

    let res = DocumentLoader::load_file(&path).await;
    assert!(matches!(res, Err(ExtractionError::Read { .. })));

    return Ok(());
}
