//! Issue id resolution.
//!
//! The newsletter's in-progress draft carries a `Release Date:` line whose
//! value doubles as the issue identifier (and therefore the directory name
//! inside the image repository). When the caller does not supply an issue id
//! explicitly, it is extracted from the remote draft document.

use regex::Regex;

use crate::error::{ImagePublishError, Result};

/// Pattern matched against the draft document. First match wins.
const RELEASE_DATE_PATTERN: &str = r"Release Date: (.+)";

/// Extracts the issue id from a draft document's text.
///
/// Takes the first capture of the first `Release Date: (.+)` match. The
/// captured value is trimmed so CRLF documents resolve to clean directory
/// names; an all-whitespace capture counts as no match.
///
/// # Arguments
/// * `document` - The draft document text
///
/// # Returns
/// * `Some(issue_id)` - The extracted issue identifier
/// * `None` - If no usable `Release Date:` line exists
pub fn extract_release_date(document: &str) -> Option<String> {
    let re = Regex::new(RELEASE_DATE_PATTERN).ok()?;
    let captures = re.captures(document)?;
    let value = captures.get(1)?.as_str().trim();

    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Resolves the issue id by fetching the remote draft document.
///
/// # Arguments
/// * `draft_url` - URL of the draft document
///
/// # Returns
/// * `Ok(issue_id)` - The extracted issue identifier
/// * `Err` - If the fetch fails or the document has no release date line
pub fn resolve_from_draft(draft_url: &str) -> Result<String> {
    let document = fetch_draft(draft_url)?;

    extract_release_date(&document).ok_or_else(|| {
        ImagePublishError::issue_resolution(format!(
            "no 'Release Date:' line found in draft document at {}",
            draft_url
        ))
    })
}

/// Fetches the draft document as UTF-8 text over plain HTTP GET.
fn fetch_draft(url: &str) -> Result<String> {
    let mut response = ureq::get(url)
        .call()
        .map_err(|e| ImagePublishError::http(format!("GET {}: {}", url, e)))?;

    response
        .body_mut()
        .read_to_string()
        .map_err(|e| ImagePublishError::http(format!("reading body of {}: {}", url, e)))
}
