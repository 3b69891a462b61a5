/// Per-field validation rules

use regex::Regex;
use std::sync::OnceLock;

use super::phone;

/// Text fields must be strictly longer than this...
const MIN_TEXT_LEN: usize = 3;
/// ...and strictly shorter than this
const MAX_TEXT_LEN: usize = 50;

/// Why a field was flagged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invalid {
    Required,
    Email,
    Phone,
    Length,
    File,
    Rating,
}

impl Invalid {
    /// Message shown under the flagged field
    pub fn message(self) -> &'static str {
        match self {
            Invalid::Required => "This field is required",
            Invalid::Email => "Enter a valid email",
            Invalid::Phone => "Enter the full phone number",
            Invalid::Length => "Must be between 4 and 49 characters",
            Invalid::File => "Invalid file",
            Invalid::Rating => "Please choose a rating",
        }
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"))
}

/// `local@domain.tld` shaped, no whitespace
pub fn validate_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Empty passes; otherwise the value must be a complete masked number
pub fn validate_phone(value: &str) -> bool {
    value.is_empty() || phone::is_complete(value)
}

/// Empty passes; otherwise 4..=49 characters
pub fn validate_length(value: &str) -> bool {
    let len = value.chars().count();
    value.is_empty() || (len > MIN_TEXT_LEN && len < MAX_TEXT_LEN)
}

/// Required fields must hold something besides whitespace
pub fn validate_required(value: &str) -> bool {
    !value.trim().is_empty()
}
