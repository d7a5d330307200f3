use crate::types::*;
use lopdf::Document as PdfDocument;

/// Result of a page-preserving PDF rewrite.
#[derive(Debug)]
pub struct RewrittenPdf {
    pub bytes: Vec<u8>,
    pub pages: usize,
}

pub struct PdfProcessor;

impl PdfProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Rewrite a PDF without unreferenced objects and with compressed
    /// streams. The page count of the output always equals the input's.
    pub fn optimize_pdf(&self, content: &[u8]) -> Result<RewrittenPdf, ConversionError> {
        let mut doc = PdfDocument::load_mem(content)?;
        ensure_unencrypted(&doc)?;

        let expected = doc.get_pages().len();
        log::info!("Rewriting PDF with {} page(s)", expected);

        self.remove_unused_objects(&mut doc);
        doc.compress();
        doc.renumber_objects();

        let mut output = Vec::new();
        doc.save_to(&mut output)
            .map_err(|e| ConversionError::Pdf(format!("Failed to save optimized PDF: {}", e)))?;

        let actual = self.verify_page_count(expected, &output)?;

        log::info!(
            "PDF optimized: {} -> {} bytes ({:.1}% reduction)",
            content.len(),
            output.len(),
            (1.0 - output.len() as f64 / content.len().max(1) as f64) * 100.0
        );

        Ok(RewrittenPdf {
            bytes: output,
            pages: actual,
        })
    }

    pub fn page_count(&self, content: &[u8]) -> Result<usize, ConversionError> {
        Ok(PdfDocument::load_mem(content)?.get_pages().len())
    }

    /// Reload rewritten bytes and check nothing was lost.
    fn verify_page_count(&self, expected: usize, output: &[u8]) -> Result<usize, ConversionError> {
        let actual = self.page_count(output)?;
        if actual != expected {
            return Err(ConversionError::PageCountMismatch { expected, actual });
        }
        Ok(actual)
    }

    fn remove_unused_objects(&self, doc: &mut PdfDocument) {
        let pruned = doc.prune_objects();
        let empty = doc.delete_zero_length_streams();
        log::debug!(
            "Removed {} unreferenced object(s) and {} empty stream(s)",
            pruned.len(),
            empty.len()
        );
    }
}

fn ensure_unencrypted(doc: &PdfDocument) -> Result<(), ConversionError> {
    if doc.trailer.get(b"Encrypt").is_ok() {
        return Err(ConversionError::EncryptedPdf);
    }
    Ok(())
}

impl Default for PdfProcessor {
    fn default() -> Self {
        Self::new()
    }
}
