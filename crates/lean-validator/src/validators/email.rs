//! Email address format check

use regex::Regex;
use std::sync::OnceLock;

// ASCII-only with TLD requirement
const EMAIL_PATTERN: &str =
    r"^[a-zA-Z0-9]([a-zA-Z0-9._%+-]*[a-zA-Z0-9])?@[a-zA-Z0-9]([a-zA-Z0-9.-]*[a-zA-Z0-9])?\.[a-zA-Z]{2,}$";

fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).ok()).as_ref()
}

/// Whether `email` is a plausible address: one `@`, bounded part lengths,
/// no consecutive dots, and a dotted domain with an alphabetic TLD.
pub fn is_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    // RFC 5321 limits
    if local.len() > 64 || domain.len() > 255 {
        return false;
    }
    if email.contains("..") {
        return false;
    }
    email_regex().is_some_and(|regex| regex.is_match(email))
}
