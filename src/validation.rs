//! Write payload validation

use thiserror::Error;

/// A create/update payload was malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Name was empty after trimming.
    #[error("name must not be empty")]
    EmptyName,

    /// An image URL was empty after trimming.
    #[error("image url must not be empty")]
    EmptyImageUrl,

    /// A variant carried more images than allowed.
    #[error("a variant may have at most {max} images, got {count}")]
    TooManyImages {
        /// Images supplied.
        count: usize,
        /// Images allowed.
        max: usize,
    },

    /// A referenced id was not a positive key.
    #[error("{field} must reference an existing record")]
    InvalidReference {
        /// Offending field.
        field: &'static str,
    },
}

/// Trim `name`, rejecting blank values.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyName`] when nothing remains after trimming.
pub fn require_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    Ok(trimmed.to_string())
}

/// Trim `url`, rejecting blank values.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyImageUrl`] when nothing remains after trimming.
pub fn require_image_url(url: &str) -> Result<String, ValidationError> {
    let trimmed = url.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::EmptyImageUrl);
    }

    Ok(trimmed.to_string())
}

/// Normalise an optional free-text field: blank becomes `None`.
#[must_use]
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_name_trims() {
        assert_eq!(require_name("  Carrara "), Ok("Carrara".to_string()));
    }

    #[test]
    fn require_name_rejects_whitespace() {
        assert_eq!(require_name(" \t"), Err(ValidationError::EmptyName));
    }

    #[test]
    fn optional_text_drops_blank() {
        assert_eq!(optional_text(Some("   ")), None);
        assert_eq!(optional_text(Some(" slab ")), Some("slab".to_string()));
        assert_eq!(optional_text(None), None);
    }
}
