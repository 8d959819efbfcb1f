//! Document-to-text step. PDFs go through `pdftotext`; anything else is
//! assumed to already be extracted text.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use std::process::Command;

pub fn extract_text(path: &Path) -> Result<String> {
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        run_pdftotext(path)
    } else {
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
    }
}

fn run_pdftotext(path: &Path) -> Result<String> {
    let output = Command::new("pdftotext")
        .arg(path)
        .arg("-")
        .output()
        .context("running pdftotext (is poppler-utils installed?)")?;

    if !output.status.success() {
        bail!(
            "pdftotext failed on {}: {}",
            path.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
