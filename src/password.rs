//! Legacy password encodings.
//!
//! Stored passwords come in three historical shapes, all SHA-256 based:
//!
//! | Form     | Stored value                  | Digest input       |
//! |----------|-------------------------------|--------------------|
//! | Salted   | `{SHA-256}{salt}<hex digest>` | password + `{salt}` |
//! | Unsalted | `{SHA-256}<hex digest>`       | password           |
//! | Raw hex  | `<hex digest>`                | password           |
//!
//! Detection is an unanchored search tried in that order, so the first form
//! that finds a match anywhere in the value wins. The salt keeps its braces.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use sha2::{Digest, Sha256};

static SALTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{SHA-256\}(\{[^}]+\})([a-fA-F0-9]+)").unwrap());
static UNSALTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{SHA-256\}([a-fA-F0-9]+)").unwrap());
static RAW_HEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([a-fA-F0-9]+)").unwrap());

/// Which legacy encoding a stored password was recognised as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasswordFormat {
    Salted,
    Unsalted,
    RawHex,
}

impl fmt::Display for PasswordFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PasswordFormat::Salted => "{SHA-256}{salt}encoded",
            PasswordFormat::Unsalted => "{SHA-256}encoded",
            PasswordFormat::RawHex => "encoded",
        })
    }
}

/// A stored password split into its salt and expected digest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegacyPassword<'a> {
    pub format: PasswordFormat,
    pub salt: &'a str,
    pub digest: &'a str,
}

impl<'a> LegacyPassword<'a> {
    /// Recognises `stored`, or returns `None` when no form matches (the value
    /// contains no hex digit at all).
    pub fn detect(stored: &'a str) -> Option<Self> {
        if let Some(caps) = SALTED.captures(stored) {
            return Some(Self {
                format: PasswordFormat::Salted,
                salt: caps.get(1)?.as_str(),
                digest: caps.get(2)?.as_str(),
            });
        }
        if let Some(caps) = UNSALTED.captures(stored) {
            return Some(Self {
                format: PasswordFormat::Unsalted,
                salt: "",
                digest: caps.get(1)?.as_str(),
            });
        }
        RAW_HEX.captures(stored).and_then(|caps| {
            Some(Self {
                format: PasswordFormat::RawHex,
                salt: "",
                digest: caps.get(1)?.as_str(),
            })
        })
    }

    /// Compares the lowercase hex SHA-256 of `password + salt` with the
    /// stored digest, byte for byte. An uppercase stored digest never matches.
    pub fn matches(&self, password: &str) -> bool {
        digest_hex(password, self.salt) == self.digest
    }
}

/// Outcome of checking a candidate password against a stored value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verification {
    Matched(PasswordFormat),
    Mismatched(PasswordFormat),
    /// The stored value fits none of the legacy forms, so no digest was
    /// compared.
    Unrecognized,
}

/// Checks `password` against a stored value in any of the legacy forms.
///
/// # Examples
///
/// ```
/// use mediamine_auth::password::{digest_hex, verify, PasswordFormat, Verification};
///
/// let stored = format!("{{SHA-256}}{}", digest_hex("hunter2", ""));
/// assert_eq!(verify(&stored, "hunter2"), Verification::Matched(PasswordFormat::Unsalted));
/// ```
pub fn verify(stored: &str, password: &str) -> Verification {
    match LegacyPassword::detect(stored) {
        Some(legacy) if legacy.matches(password) => Verification::Matched(legacy.format),
        Some(legacy) => Verification::Mismatched(legacy.format),
        None => Verification::Unrecognized,
    }
}

/// Lowercase hex SHA-256 of `password` followed by `salt`.
pub fn digest_hex(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    // sha256("secret")
    const SECRET: &str = "2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b";

    #[test]
    fn digest_is_lowercase_hex_of_password_then_salt() {
        assert_eq!(digest_hex("secret", ""), SECRET);
        assert_eq!(digest_hex("sec", "ret"), SECRET);
    }

    #[test]
    fn salted_form_keeps_braces_in_salt() {
        let stored = format!("{{SHA-256}}{{pepper}}{}", digest_hex("hunter2", "{pepper}"));
        let legacy = LegacyPassword::detect(&stored).unwrap();

        assert_eq!(legacy.format, PasswordFormat::Salted);
        assert_eq!(legacy.salt, "{pepper}");
        assert!(legacy.matches("hunter2"));
        assert!(!legacy.matches("hunter3"));
    }

    #[test]
    fn unsalted_form_is_second_choice() {
        let stored = format!("{{SHA-256}}{SECRET}");
        assert_eq!(verify(&stored, "secret"), Verification::Matched(PasswordFormat::Unsalted));
        assert_eq!(verify(&stored, "other"), Verification::Mismatched(PasswordFormat::Unsalted));
    }

    #[test]
    fn raw_hex_form() {
        assert_eq!(verify(SECRET, "secret"), Verification::Matched(PasswordFormat::RawHex));
    }

    #[test]
    fn raw_hex_search_is_unanchored() {
        // The first hex run is taken as the digest, here the "a" of "plain".
        let legacy = LegacyPassword::detect("plain-face").unwrap();
        assert_eq!(legacy.format, PasswordFormat::RawHex);
        assert_eq!(legacy.digest, "a");
    }

    #[test]
    fn uppercase_digest_never_matches() {
        let upper = SECRET.to_uppercase();
        assert_eq!(verify(&upper, "secret"), Verification::Mismatched(PasswordFormat::RawHex));
    }

    #[test]
    fn value_without_hex_digits_is_unrecognized() {
        assert_eq!(verify("qwrty-xyz", "anything"), Verification::Unrecognized);
        assert_eq!(LegacyPassword::detect("ZZZ"), None);
    }
}
