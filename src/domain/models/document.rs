use thiserror::Error;

/// Outcome of reading a readable PDF.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtractedText {
    /// Concatenated page text. Never empty.
    Text(String),
    /// The document opened fine, but no page had any text (e.g. scanned
    /// image-only PDFs).
    NoTextFound,
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("{0} is not a PDF file")]
    NotPdf(String),

    #[error("Unable to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Unable to open the PDF: {0}")]
    Unreadable(#[from] lopdf::Error),

    #[error("The PDF is encrypted")]
    Encrypted,
}
