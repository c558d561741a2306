#[cfg(test)]
#[path = "document_loader_test.rs"]
mod tests;

use std::path::Path;

use lopdf::Document;
use tokio::fs;

use crate::domain::models::ExtractedText;
use crate::domain::models::ExtractionError;

pub struct DocumentLoader {}

impl DocumentLoader {
    /// Extracts the text of every page in page order, joined by newlines.
    /// Pages without text are skipped.
    pub fn extract_text(bytes: &[u8]) -> Result<ExtractedText, ExtractionError> {
        let document = Document::load_mem(bytes)?;
        if document.is_encrypted() {
            return Err(ExtractionError::Encrypted);
        }

        let pages = document.get_pages();
        tracing::debug!(pages = pages.len(), "Extracting PDF text");

        let text = pages
            .keys()
            .filter_map(|page_number| {
                match document.extract_text(&[*page_number]) {
                    Ok(text) => {
                        let trimmed = text.trim_end();
                        if trimmed.trim().is_empty() {
                            return None;
                        }
                        return Some(trimmed.to_string());
                    }
                    Err(err) => {
                        tracing::warn!(page = page_number, error = ?err, "Skipping page without extractable text");
                        return None;
                    }
                }
            })
            .collect::<Vec<String>>()
            .join("\n");

        if text.is_empty() {
            return Ok(ExtractedText::NoTextFound);
        }

        return Ok(ExtractedText::Text(text));
    }

    pub async fn load_file(path: &Path) -> Result<ExtractedText, ExtractionError> {
        let display = path.to_string_lossy().to_string();
        let is_pdf = path
            .extension()
            .map(|ext| {
                return ext.to_string_lossy().eq_ignore_ascii_case("pdf");
            })
            .unwrap_or(false);

        if !is_pdf {
            return Err(ExtractionError::NotPdf(display));
        }

        let bytes = fs::read(path)
            .await
            .map_err(|source| {
                return ExtractionError::Read {
                    path: display.to_string(),
                    source,
                };
            })?;

        return DocumentLoader::extract_text(&bytes);
    }
}
