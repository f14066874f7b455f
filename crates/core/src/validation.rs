//! Input validation for work mutations.
//!
//! Identifiers arrive from clients as strings and are parsed here, before any
//! database write, so a malformed ID is reported as a validation failure
//! rather than surfacing later as a store error.

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum length of a work title in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum length of a single image URL in characters.
pub const MAX_IMAGE_URL_LEN: usize = 2048;

/// Parse a single identifier.
///
/// `field` names the input in the error message (e.g. `"skill_ids"`).
pub fn parse_id(field: &str, raw: &str) -> Result<DbId, CoreError> {
    raw.trim()
        .parse::<DbId>()
        .map_err(|_| CoreError::Validation(format!("{field}: '{raw}' is not a valid identifier")))
}

/// Parse a list of optional identifiers, preserving `None` entries.
///
/// Fails on the first malformed entry.
pub fn parse_optional_ids(
    field: &str,
    raw: &[Option<String>],
) -> Result<Vec<Option<DbId>>, CoreError> {
    raw.iter()
        .map(|entry| entry.as_deref().map(|s| parse_id(field, s)).transpose())
        .collect()
}

/// Validate and trim a work title.
pub fn validate_title(title: &str) -> Result<String, CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("title must not be empty".to_string()));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate a list of optional image URLs.
///
/// `None` entries are allowed and mean "no image". Present URLs must be
/// non-blank and within [`MAX_IMAGE_URL_LEN`].
pub fn validate_image_urls(field: &str, urls: &[Option<String>]) -> Result<(), CoreError> {
    for (index, url) in urls.iter().enumerate() {
        let Some(url) = url else { continue };
        if url.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "{field}[{index}] must not be blank"
            )));
        }
        if url.chars().count() > MAX_IMAGE_URL_LEN {
            return Err(CoreError::Validation(format!(
                "{field}[{index}] exceeds {MAX_IMAGE_URL_LEN} characters"
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
