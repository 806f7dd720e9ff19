use std::sync::LazyLock;

use regex::Regex;

use crate::macros::nutype_string;

/// `local@domain.tld`: no whitespace anywhere, exactly one `@`, and at least
/// one dot after it.
pub static EMAIL_ADDRESS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

nutype_string!(
    /// An email address with a deliberately loose shape check.
    EmailAddress(sanitize(trim), validate(regex = EMAIL_ADDRESS_REGEX))
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_simple_addresses() {
        for input in [
            "ada@example.com",
            "first.last+tag@sub.example.co.uk",
            "  padded@example.org  ",
            "x@y.z",
        ] {
            let email = EmailAddress::try_new(input).unwrap();
            assert_eq!(email.as_str(), input.trim());
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for input in [
            "no-at-sign.com",
            "ada@example",
            "ada@@example.com",
            "a da@example.com",
            "@example.com",
            "ada@.com",
            "",
        ] {
            assert!(EmailAddress::try_new(input).is_err(), "{input:?}");
        }
    }
}
