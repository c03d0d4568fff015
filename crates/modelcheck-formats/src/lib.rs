//! String format checks shared by the [`modelcheck`](https://crates.io/crates/modelcheck)
//! rule handlers.
//!
//! Every check is a pure `&str -> bool` predicate. None of them know about
//! models, messages or emptiness: callers decide whether an empty value should
//! be checked at all.
//!
//! | Function | Accepts |
//! |----------|---------|
//! | [`is_email`] | `local@label.tld` addresses |
//! | [`is_url`] | absolute `http`, `https` and `ftp` URLs with a host |
//! | [`is_number`] | signed decimals, optionally with `,` thousands groups |
//! | [`is_digits`] | ASCII digits only |
//! | [`is_credit_card`] | digits, spaces and hyphens passing the Luhn checksum |

#![warn(missing_docs)]

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::LazyLock;

use regex::Regex;
use uriparse::{Host, URI};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$")
        .expect("email regex must compile")
});
static NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^-?(?:[0-9]+|[0-9]{1,3}(?:,[0-9]{3})+)?(?:\\.[0-9]+)?$")
        .expect("number regex must compile")
});
static DIGITS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[0-9]+$").expect("digits regex must compile"));

const URL_SCHEMES: [&str; 3] = ["http", "https", "ftp"];

/// Returns true if `s` looks like a deliverable email address.
///
/// The domain part needs at least two labels (`a@b.c` passes, `a@localhost`
/// does not).
#[must_use]
pub fn is_email(s: &str) -> bool {
    EMAIL_REGEX.is_match(s)
}

/// Returns true if `s` is an absolute `http`, `https` or `ftp` URL naming a
/// host: an IP literal or a dotted domain name.
#[must_use]
pub fn is_url(s: &str) -> bool {
    // uriparse has panicked on some malformed inputs before.
    catch_unwind(AssertUnwindSafe(|| check_url(s))).unwrap_or(false)
}

fn check_url(s: &str) -> bool {
    let Ok(uri) = URI::try_from(s) else {
        return false;
    };

    let scheme = uri.scheme().as_str();
    if !URL_SCHEMES.iter().any(|s| s.eq_ignore_ascii_case(scheme)) {
        return false;
    }

    let Some(authority) = uri.authority() else {
        return false;
    };

    match authority.host() {
        Host::IPv4Address(_) | Host::IPv6Address(_) => true,
        Host::RegisteredName(name) => {
            let name = name.as_str().trim_end_matches('.');
            !name.is_empty() && name.split('.').count() >= 2 && name.split('.').all(is_label)
        }
    }
}

fn is_label(label: &str) -> bool {
    !label.is_empty()
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '~'))
}

/// Returns true if `s` is a decimal number such as `-1,000.25` or `.5`.
#[must_use]
pub fn is_number(s: &str) -> bool {
    !s.is_empty() && NUMBER_REGEX.is_match(s)
}

/// Returns true if `s` is made of ASCII digits only.
#[must_use]
pub fn is_digits(s: &str) -> bool {
    DIGITS_REGEX.is_match(s)
}

/// Returns true if `s` only holds digits, spaces and hyphens, and its digits
/// pass the Luhn checksum.
#[must_use]
pub fn is_credit_card(s: &str) -> bool {
    if s.chars().any(|c| !(c.is_ascii_digit() || c == ' ' || c == '-')) {
        return false;
    }
    luhn_checksum(s) % 10 == 0
}

/// Luhn sum over the ASCII digits of `s`, ignoring every other character.
#[must_use]
pub fn luhn_checksum(s: &str) -> u32 {
    s.bytes()
        .rev()
        .filter(u8::is_ascii_digit)
        .map(|b| u32::from(b - b'0'))
        .enumerate()
        .map(|(i, digit)| {
            if i % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                digit
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_requires_local_part_and_dotted_domain() {
        assert!(is_email("a@b.c"));
        assert!(is_email("first.last+tag@example.co.uk"));
        assert!(!is_email("a@localhost"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("a b@example.com"));
        assert!(!is_email("a@-example.com"));
    }

    #[test]
    fn url_accepts_web_schemes_with_hosts() {
        assert!(is_url("http://example.com"));
        assert!(is_url("https://www.example.com/path?q=1#frag"));
        assert!(is_url("ftp://files.example.org/pub"));
        assert!(is_url("http://192.168.0.1:8080/"));
        assert!(is_url("HTTPS://EXAMPLE.COM"));
    }

    #[test]
    fn url_rejects_other_schemes_and_bare_hosts() {
        assert!(!is_url("mailto:someone@example.com"));
        assert!(!is_url("file:///etc/passwd"));
        assert!(!is_url("http://localhost"));
        assert!(!is_url("http://exa mple.com"));
        assert!(!is_url("example.com"));
        assert!(!is_url(""));
    }

    #[test]
    fn url_never_panics_on_malformed_inputs() {
        for input in [".foo://example.com", "-foo://", ":://", "http://[::1", "%%%"] {
            assert!(!is_url(input), "{input:?} must be rejected");
        }
    }

    #[test]
    fn number_accepts_signed_and_grouped_decimals() {
        for ok in ["0", "-12", "1.5", ".5", "1,000", "-1,234,567.89"] {
            assert!(is_number(ok), "{ok:?} should be a number");
        }
        for bad in ["", "1,00", "1.", "abc", "1e5", "--1"] {
            assert!(!is_number(bad), "{bad:?} should not be a number");
        }
    }

    #[test]
    fn digits_is_ascii_only() {
        assert!(is_digits("0123456789"));
        assert!(!is_digits(""));
        assert!(!is_digits("12a"));
        assert!(!is_digits("١٢٣"));
    }

    #[test]
    fn credit_card_runs_luhn_over_digits() {
        assert!(is_credit_card("370000000000002"));
        assert!(is_credit_card("4111 1111 1111 1111"));
        assert!(is_credit_card("4111-1111-1111-1111"));
        assert!(!is_credit_card("5424180832"));
        assert!(!is_credit_card("4111x1111111111111"));
    }

    #[test]
    fn luhn_checksum_doubles_every_second_digit_from_the_right() {
        assert_eq!(luhn_checksum("18"), 10);
        assert_eq!(luhn_checksum("5424180832"), 39);
        assert_eq!(luhn_checksum(""), 0);
    }
}
