use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Regex for stored file names: a single path component.
    /// - Valid: "poster1.jpg", "The Thing (1982).png", "..hidden"
    /// - Invalid: "", "a/b.jpg", "..\\b.jpg", names containing NUL
    pub static ref FILE_NAME_REGEX: Regex = Regex::new(r"^[^/\\\x00]+$").unwrap();
}

/// True when `name` can be stored directly inside the poster directory
pub fn is_safe_file_name(name: &str) -> bool {
    name != "." && name != ".." && FILE_NAME_REGEX.is_match(name)
}

/// Rejects empty and whitespace-only strings
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
