//! Phone number helpers.

/// Normalize a phone number to `+<digits>`.
///
/// Every non-digit character is dropped, then a single `+` is prepended. No
/// country-code inference or length validation happens here.
///
/// ```
/// use glide_domain::utils::phone::normalize_phone_number;
///
/// assert_eq!(normalize_phone_number("+55 (51) 2345-6789"), "+555123456789");
/// assert_eq!(normalize_phone_number("5551234"), "+5551234");
/// ```
#[must_use]
pub fn normalize_phone_number(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 1);
    out.push('+');
    out.extend(raw.chars().filter(char::is_ascii_digit));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_formatting() {
        assert_eq!(normalize_phone_number("+55 (51) 2345-6789"), "+555123456789");
        assert_eq!(normalize_phone_number("+1-555-123-4567"), "+15551234567");
    }

    #[test]
    fn adds_plus_prefix() {
        assert_eq!(normalize_phone_number("5551234"), "+5551234");
    }

    #[test]
    fn is_idempotent() {
        let once = normalize_phone_number("+44 20 7946 0958");
        assert_eq!(normalize_phone_number(&once), once);
    }

    #[test]
    fn empty_input_yields_bare_plus() {
        assert_eq!(normalize_phone_number(""), "+");
        assert_eq!(normalize_phone_number("abc"), "+");
    }
}
