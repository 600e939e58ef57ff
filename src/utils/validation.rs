//! Input validation utilities
//!
//! Checks applied to what a user types at the login prompt.

/// Validate that input is not empty and doesn't contain control characters
pub fn is_valid_input(input: &str) -> bool {
    !input.trim().is_empty()
        && input.len() <= 512
        && !input.contains(['\0', '\r', '\n'])
}

/// Checks the `local@domain.tld` shape: one `@`, no whitespace, and a dot
/// inside the domain with text on both sides.
pub fn is_valid_email(email: &str) -> bool {
    if !is_valid_input(email) || email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Display names need at least two visible characters.
pub fn is_valid_display_name(name: &str) -> bool {
    is_valid_input(name) && name.trim().chars().count() >= 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_addresses() {
        for email in ["user@demo.com", "a.b+c@mail.example.org", "x@y.z"] {
            assert!(is_valid_email(email), "{email}");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for email in [
            "",
            "plain",
            "@demo.com",
            "user@",
            "user@demo",
            "user@.com",
            "user@demo.",
            "us er@demo.com",
            "a@b@c.com",
            "user@demo.com\n",
        ] {
            assert!(!is_valid_email(email), "{email:?}");
        }
    }

    #[test]
    fn display_names() {
        assert!(is_valid_display_name("Al"));
        assert!(is_valid_display_name("Ada Lovelace"));
        assert!(!is_valid_display_name("A"));
        assert!(!is_valid_display_name("  "));
    }
}
