use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating room codes
    /// Alphanumeric segments joined by single hyphens
    /// - Valid: "101", "2b", "suite-3", "ala-norte-12"
    /// - Invalid: "-101", "101-", "suite--3", "room 3"
    pub static ref ROOM_CODE_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();

    /// Characters stripped when deriving a filename slug from a caption
    pub static ref SLUG_SEPARATOR_REGEX: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// Derive a filename-safe slug from a free-form caption.
///
/// Lowercases, collapses every run of non-alphanumeric characters into a
/// single hyphen and trims leading/trailing hyphens. Empty captions produce
/// the fallback "archivo".
pub fn sanitize_caption(caption: &str) -> String {
    let lowered = caption.to_lowercase();
    let slug = SLUG_SEPARATOR_REGEX.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');

    if slug.is_empty() {
        "archivo".to_string()
    } else {
        slug.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_code_regex_valid() {
        assert!(ROOM_CODE_REGEX.is_match("101"));
        assert!(ROOM_CODE_REGEX.is_match("2b"));
        assert!(ROOM_CODE_REGEX.is_match("suite-3"));
        assert!(ROOM_CODE_REGEX.is_match("ala-norte-12"));
    }

    #[test]
    fn test_room_code_regex_invalid() {
        assert!(!ROOM_CODE_REGEX.is_match("-101")); // starts with hyphen
        assert!(!ROOM_CODE_REGEX.is_match("101-")); // ends with hyphen
        assert!(!ROOM_CODE_REGEX.is_match("suite--3")); // double hyphen
        assert!(!ROOM_CODE_REGEX.is_match("Suite-3")); // uppercase
        assert!(!ROOM_CODE_REGEX.is_match("room 3")); // space
        assert!(!ROOM_CODE_REGEX.is_match("")); // empty
    }

    #[test]
    fn test_sanitize_caption() {
        assert_eq!(sanitize_caption("Pago de Juan Pérez"), "pago-de-juan-p-rez");
        assert_eq!(sanitize_caption("  recibo #42  "), "recibo-42");
        assert_eq!(sanitize_caption("factura_agosto"), "factura-agosto");
    }

    #[test]
    fn test_sanitize_caption_empty_falls_back() {
        assert_eq!(sanitize_caption(""), "archivo");
        assert_eq!(sanitize_caption("***"), "archivo");
    }
}
