/// Phone number mask
///
/// Raw keystrokes are reformatted into `+7 (DDD) DDD-DD-DD`. Each group is
/// appended only once enough digits are available, so partial input always
/// renders as a prefix of the mask.

/// Most digits the mask can hold (country code included)
pub const MAX_DIGITS: usize = 11;

/// Length of a fully entered number, e.g. `+7 (912) 345-67-89`
pub const FORMATTED_LEN: usize = 18;

/// Mask text that appears before the first subscriber digit
const MASK_PREFIX: &str = "+7 (";

/// Reformat whatever the user typed into the phone mask
///
/// The first digit occupies the country code slot and is always shown as 7.
/// An input without digits yields an empty string so the field can be cleared.
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(MAX_DIGITS)
        .collect();

    if digits.is_empty() {
        return String::new();
    }

    let len = digits.len();
    let group = |from: usize, to: usize| &digits[from..to.min(len)];

    let mut formatted = String::with_capacity(FORMATTED_LEN);
    formatted.push_str("+7 ");
    if len > 1 {
        formatted.push('(');
        formatted.push_str(group(1, 4));
    }
    if len >= 4 {
        formatted.push_str(") ");
        formatted.push_str(group(4, 7));
    }
    if len >= 7 {
        formatted.push('-');
        formatted.push_str(group(7, 9));
    }
    if len >= 9 {
        formatted.push('-');
        formatted.push_str(group(9, 11));
    }

    formatted
}

/// Mask a keystroke in the phone field
///
/// Whatever is left of the bare mask prefix after a backspace (`+7 (`,
/// `+7 `, `+7`, `+`) counts as a cleared field. Re-masking it would read
/// the prefix's own 7 back as a digit and the field could never be emptied.
pub fn mask_input(raw: &str) -> String {
    if MASK_PREFIX.starts_with(raw) {
        return String::new();
    }
    format_phone(raw)
}

/// A masked value is complete when it has the full mask length
pub fn is_complete(formatted: &str) -> bool {
    formatted.chars().count() == FORMATTED_LEN
}
