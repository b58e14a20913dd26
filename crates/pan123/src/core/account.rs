use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$").ok()
});

/// Whether an account identifier is an email address rather than an account
/// name or phone number.
pub fn is_email(identifier: &str) -> bool {
    EMAIL.as_ref().is_some_and(|re| re.is_match(identifier.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_emails() {
        assert!(is_email("alice@example.com"));
        assert!(is_email("a.b+tag@mail.example.co.uk"));
        assert!(is_email(" bob@qq.com "));
    }

    #[test]
    fn rejects_account_names() {
        assert!(!is_email("13800138000"));
        assert!(!is_email("alice"));
        assert!(!is_email("alice@"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("alice@localhost"));
        assert!(!is_email(""));
    }
}
