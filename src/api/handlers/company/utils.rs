//! Input normalization shared by registration and login.

use regex::Regex;

/// Normalize an email for lookup/uniqueness checks.
pub(super) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Non-whitespace local part, `@`, and a dotted domain.
pub(super) fn valid_email(email_normalized: &str) -> bool {
    Regex::new(r"^\S+@\S+\.\S+$").is_ok_and(|regex| regex.is_match(email_normalized))
}

/// Trimmed value of a required field, `None` when missing or blank.
pub(super) fn required(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Secrets are checked for blankness but passed through untrimmed.
pub(super) fn required_secret(value: Option<&String>) -> Option<&str> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email(" Jo@Acme.COM "), "jo@acme.com");
    }

    #[test]
    fn valid_email_accepts_basic_format() {
        assert!(valid_email("jo@acme.com"));
        assert!(valid_email("owner.name@sub.acme.co"));
    }

    #[test]
    fn valid_email_rejects_missing_parts() {
        assert!(!valid_email("not-an-email"));
        assert!(!valid_email("jo@acme"));
        assert!(!valid_email("jo @acme.com"));
        assert!(!valid_email("@acme.com"));
    }

    #[test]
    fn required_rejects_blank() {
        let blank = "   ".to_string();
        let value = " Acme ".to_string();
        assert_eq!(required(None), None);
        assert_eq!(required(Some(&blank)), None);
        assert_eq!(required(Some(&value)), Some("Acme"));
    }

    #[test]
    fn required_secret_keeps_whitespace() {
        let blank = "\t".to_string();
        let value = " 1234 ".to_string();
        assert_eq!(required_secret(Some(&blank)), None);
        assert_eq!(required_secret(Some(&value)), Some(" 1234 "));
    }
}
