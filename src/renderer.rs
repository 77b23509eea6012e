//! Document rendering: turns a source file into the text handed to the
//! model. PDFs go through pure-Rust text extraction; anything else is read
//! as UTF-8 text.

use log::info;
use std::path::Path;

use crate::error::{ExtractorError, Result};

/// Renders a financial statement file to text. A missing input file is a
/// reported error with the offending path, not a crash.
pub fn render_document(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ExtractorError::InputNotFound(path.to_path_buf()));
    }

    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);

    if is_pdf {
        info!("Extracting text from PDF: {}", path.display());
        pdf_extract::extract_text(path).map_err(|e| ExtractorError::Extraction(e.to_string()))
    } else {
        info!("Reading as plain text: {}", path.display());
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Saves the intermediate rendered text, creating parent directories.
pub fn save_rendered_text(text: &str, output: &Path) -> Result<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output, text)?;
    info!("Saved rendered text to {}", output.display());
    Ok(())
}
