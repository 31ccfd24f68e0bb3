//! Resume PDF extraction: PDF bytes in, raw text plus per-page structure out.
//!
//! `lopdf` validates the document and yields the page tree; `pdf-extract`
//! produces the reading-order raw text. Both are CPU-bound, so the public entry
//! point runs them inside `tokio::task::spawn_blocking`.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The parser rejected the document. Carries the parser's own message.
    #[error("{0}")]
    Parse(String),

    #[error("PDF parser stopped unexpectedly: {0}")]
    Worker(String),
}

/// Text of a single page, 1-based.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfPage {
    pub number: u32,
    pub text: String,
}

/// Everything the analysis prompt needs from an uploaded résumé.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedPdf {
    pub raw_text: String,
    pub page_count: usize,
    pub pages: Vec<PdfPage>,
}

/// Parses an uploaded PDF off the async runtime.
pub async fn extract_pdf(data: Bytes) -> Result<ExtractedPdf, ExtractionError> {
    let size = data.len();
    let extracted = tokio::task::spawn_blocking(move || extract_pdf_blocking(&data))
        .await
        .map_err(|e| ExtractionError::Worker(e.to_string()))??;

    info!(
        "Extracted {} page(s), {} chars from {} byte PDF",
        extracted.page_count,
        extracted.raw_text.len(),
        size
    );
    Ok(extracted)
}

fn extract_pdf_blocking(data: &[u8]) -> Result<ExtractedPdf, ExtractionError> {
    let document =
        lopdf::Document::load_mem(data).map_err(|e| ExtractionError::Parse(e.to_string()))?;

    let pages: Vec<PdfPage> = document
        .get_pages()
        .keys()
        .map(|&number| {
            let text = document.extract_text(&[number]).unwrap_or_else(|e| {
                debug!("No text layer on page {number}: {e}");
                String::new()
            });
            PdfPage { number, text }
        })
        .collect();

    let raw_text = pdf_extract::extract_text_from_mem(data)
        .map_err(|e| ExtractionError::Parse(e.to_string()))?;

    Ok(ExtractedPdf {
        raw_text,
        page_count: pages.len(),
        pages,
    })
}
