use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Regex for stored image filenames
    /// Must be a bare file name: no path separators, no leading dot
    /// - Valid: "imageFile-1718000000000-123456789", "photo_1.jpg"
    /// - Invalid: "../etc/passwd", "dir/file", ".hidden", ""
    pub static ref STORED_FILENAME_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.\-]*$").unwrap();
}

/// Validator for required free-text fields: rejects empty and whitespace-only strings
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}

/// Validator for opaque structured documents: accepts any JSON object
pub fn validate_json_object(value: &serde_json::Value) -> Result<(), ValidationError> {
    if !value.is_object() {
        let mut error = ValidationError::new("not_object");
        error.message = Some("must be a JSON object".into());
        return Err(error);
    }
    Ok(())
}

/// Parse the canonical boolean representation used on form fields
///
/// Accepts `true`/`false` in any letter case, surrounding whitespace ignored.
pub fn parse_form_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stored_filename_regex_valid() {
        assert!(STORED_FILENAME_REGEX.is_match("imageFile-1718000000000-123456789"));
        assert!(STORED_FILENAME_REGEX.is_match("photo_1.jpg"));
        assert!(STORED_FILENAME_REGEX.is_match("a"));
    }

    #[test]
    fn test_stored_filename_regex_invalid() {
        assert!(!STORED_FILENAME_REGEX.is_match("../etc/passwd")); // traversal
        assert!(!STORED_FILENAME_REGEX.is_match("dir/file")); // separator
        assert!(!STORED_FILENAME_REGEX.is_match("dir\\file")); // windows separator
        assert!(!STORED_FILENAME_REGEX.is_match(".hidden")); // staging-style name
        assert!(!STORED_FILENAME_REGEX.is_match("")); // empty
        assert!(!STORED_FILENAME_REGEX.is_match("with space"));
    }

    #[test]
    fn test_parse_form_bool() {
        assert_eq!(parse_form_bool("true"), Some(true));
        assert_eq!(parse_form_bool(" FALSE "), Some(false));
        assert_eq!(parse_form_bool("True"), Some(true));
        assert_eq!(parse_form_bool("yes"), None);
        assert_eq!(parse_form_bool("1"), None);
        assert_eq!(parse_form_bool(""), None);
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("plastic bottle").is_ok());
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("").is_err());
    }

    #[test]
    fn test_validate_json_object() {
        assert!(validate_json_object(&json!({"label": "plastic"})).is_ok());
        assert!(validate_json_object(&json!({})).is_ok());
        assert!(validate_json_object(&json!("plastic")).is_err());
        assert!(validate_json_object(&json!([1, 2])).is_err());
        assert!(validate_json_object(&serde_json::Value::Null).is_err());
    }
}
