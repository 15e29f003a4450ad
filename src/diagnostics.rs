//! Forensic capture on failure
//!
//! A failed run leaves no trace of *why* unless the page state is saved at
//! the moment of failure: which day headers were rendered, what the buttons
//! said, whether a consent wall was in the way. On any failed outcome the
//! caller drops a screenshot and an HTML dump into the diagnostics
//! directory, named by timestamp and failure label.

use crate::browser::Page;
use crate::error::{BookingError, Result};
use std::path::{Path, PathBuf};

/// Paths of the artifacts written for one failure
#[derive(Debug, Clone, PartialEq)]
pub struct FailureArtifacts {
    pub screenshot: PathBuf,
    pub html: PathBuf,
}

/// Capture a screenshot and HTML dump of the page into `dir`
///
/// Both captures are attempted even if one fails; the error of the first
/// failing capture is returned after the other has been tried.
pub fn capture_failure(page: &Page, dir: &Path, label: &str) -> Result<FailureArtifacts> {
    std::fs::create_dir_all(dir)
        .map_err(|e| BookingError::TabOperationFailed(format!("Failed to create diagnostics dir: {}", e)))?;

    let stem = artifact_stem(label, &chrono::Local::now());
    let artifacts = FailureArtifacts {
        screenshot: dir.join(format!("{}.png", stem)),
        html: dir.join(format!("{}.html", stem)),
    };

    let screenshot_result = page.screenshot_png().and_then(|bytes| {
        std::fs::write(&artifacts.screenshot, bytes)
            .map_err(|e| BookingError::TabOperationFailed(format!("Failed to write screenshot: {}", e)))
    });

    let html_result = page.html().and_then(|html| {
        std::fs::write(&artifacts.html, html)
            .map_err(|e| BookingError::TabOperationFailed(format!("Failed to write HTML dump: {}", e)))
    });

    screenshot_result?;
    html_result?;

    log::info!("Failure artifacts written: {} / {}", artifacts.screenshot.display(), artifacts.html.display());
    Ok(artifacts)
}

/// Build a filesystem-safe artifact file stem from a label and timestamp
fn artifact_stem(label: &str, at: &chrono::DateTime<chrono::Local>) -> String {
    let safe: String = label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let safe = safe.trim_matches('-');

    format!("{}-{}", at.format("%Y%m%d-%H%M%S"), if safe.is_empty() { "failure" } else { safe })
}
