// ============================================================
// Layer 4 - Text Cleaning Passes
// ============================================================
// The first normaliser stage, itself an ordered list of small
// pure `&str -> String` passes:
//
//   1. lowercase            "Visit WWW.X.com"  → "visit www.x.com"
//   2. strip_urls           "see http://x.io"  → "see  "
//   3. strip_emails         "mail a@b.com"     → "mail  "
//   4. strip_attached_digits "123abc 456"      → " abc 456"
//   5. strip_punctuation    "now!!"            → "now  "
//   6. squash_whitespace    "  a   b "          → "a b"
//
// The order is load-bearing. URLs and emails must go before the
// digit and punctuation passes, otherwise "http://x2.com" is cut
// into "http", "x", "com" and leaks into the token stream. The
// digit pass must see punctuation still attached so that "$100"
// or "10:30" are recognised as mixed tokens and stripped.
//
// Digit rule: a run of digits is replaced when the whitespace
// token containing it has any non-digit character. A token made
// only of digits ("456") is left for later stages to judge.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::domain::traits::TextTransform;

static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://\S+|www\.\S+").expect("url pattern")
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("email pattern")
});

static TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+").expect("token pattern"));

static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("digit pattern"));

static ALL_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").expect("digits pattern"));

/// Anything that is not a letter, a decimal digit or whitespace
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{Nd}\s]").expect("punctuation pattern"));

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// One named cleaning pass
pub type Pass = (&'static str, fn(&str) -> String);

/// The cleaning passes, in the only order they may run.
pub const CLEANING_PASSES: [Pass; 6] = [
    ("lowercase", lowercase),
    ("strip_urls", strip_urls),
    ("strip_emails", strip_emails),
    ("strip_attached_digits", strip_attached_digits),
    ("strip_punctuation", strip_punctuation),
    ("squash_whitespace", squash_whitespace),
];

pub fn lowercase(text: &str) -> String {
    text.to_lowercase()
}

pub fn strip_urls(text: &str) -> String {
    URL.replace_all(text, " ").into_owned()
}

pub fn strip_emails(text: &str) -> String {
    EMAIL.replace_all(text, " ").into_owned()
}

pub fn strip_attached_digits(text: &str) -> String {
    TOKEN
        .replace_all(text, |caps: &Captures| {
            let token = &caps[0];
            if ALL_DIGITS.is_match(token) {
                token.to_string()
            } else {
                DIGIT_RUN.replace_all(token, " ").into_owned()
            }
        })
        .into_owned()
}

pub fn strip_punctuation(text: &str) -> String {
    PUNCTUATION.replace_all(text, " ").into_owned()
}

/// Trim both ends, then collapse every whitespace run to one space.
pub fn squash_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Stage 1 of the normaliser: every cleaning pass in order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cleaner;

impl Cleaner {
    pub fn clean(&self, text: &str) -> String {
        CLEANING_PASSES
            .iter()
            .fold(text.to_string(), |acc, (_, pass)| pass(&acc))
    }
}

impl TextTransform for Cleaner {
    fn apply(&self, text: &str) -> String {
        self.clean(text)
    }
}
