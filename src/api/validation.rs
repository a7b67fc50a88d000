use super::ApiError;

pub const LYRICS_MIN_CHARS: usize = 3;
pub const LYRICS_MAX_CHARS: usize = 150;
pub const FILTER_MIN_CHARS: usize = 3;
pub const FILTER_MAX_CHARS: usize = 50;

/// One form-field failure, surfaced back inline on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Lyrics are required and length-bounded in characters, not bytes.
pub fn validate_lyrics(lyrics: &str) -> Result<&str, FieldError> {
    let trimmed = lyrics.trim();
    let len = trimmed.chars().count();

    if !(LYRICS_MIN_CHARS..=LYRICS_MAX_CHARS).contains(&len) {
        return Err(FieldError {
            field: "lyrics",
            message: format!(
                "Lyrics must be between {} and {} characters",
                LYRICS_MIN_CHARS, LYRICS_MAX_CHARS
            ),
        });
    }

    Ok(trimmed)
}

/// Artist and genre filters are optional; empty or whitespace-only input
/// means "not supplied" and is never an error.
pub fn validate_optional_filter<'a>(
    field: &'static str,
    label: &str,
    value: &'a str,
) -> Result<Option<&'a str>, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let len = trimmed.chars().count();
    if !(FILTER_MIN_CHARS..=FILTER_MAX_CHARS).contains(&len) {
        return Err(FieldError {
            field,
            message: format!(
                "{} must be between {} and {} characters",
                label, FILTER_MIN_CHARS, FILTER_MAX_CHARS
            ),
        });
    }

    Ok(Some(trimmed))
}

pub fn validate_limit(limit: usize) -> Result<usize, ApiError> {
    const MAX_LIMIT: usize = 1000;
    const MIN_LIMIT: usize = 1;

    if !(MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
        return Err(ApiError::validation(format!(
            "Invalid limit: {}. Limit must be between {} and {}",
            limit, MIN_LIMIT, MAX_LIMIT
        )));
    }
    Ok(limit)
}
