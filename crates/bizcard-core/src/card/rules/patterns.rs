//! Regex patterns and keyword tables for card field recognition.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Standard email token grammar
    pub static ref EMAIL: Regex = Regex::new(
        r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}"
    ).unwrap();

    // Optional scheme, dot-separated host with a 2+ letter TLD, optional path
    pub static ref WEBSITE: Regex = Regex::new(
        r"(https?://)?([a-zA-Z0-9][-a-zA-Z0-9]*\.)+[a-zA-Z]{2,}(/[-a-zA-Z0-9%_.~#?&=]*)?"
    ).unwrap();

    // 2-4 digit area code with optional (possibly fullwidth) parentheses,
    // then one or two 3-4 digit groups with space/hyphen separators
    pub static ref PHONE: Regex = Regex::new(
        r"[\(\)（）]?\d{2,4}[\(\)（）]?[-\s]?\d{3,4}[-\s]?\d{3,4}"
    ).unwrap();

    // Unified business number: 8 consecutive digits
    pub static ref TAX_ID: Regex = Regex::new(r"\d{8}").unwrap();

    // Tightest whitespace-delimited span bracketing a title keyword
    pub static ref TITLE_SPAN: Regex = Regex::new(
        r"(?:^|\s)([^0-9]+(?:經理|主任|總監|工程師|Manager|Director|Engineer)[^0-9]*)(?:\s|$)"
    ).unwrap();
}

/// Geographic markers that suggest a street address.
pub const ADDRESS_MARKERS: [&str; 5] = ["市", "縣", "路", "街", "區"];

/// Job title keywords, Chinese and English.
pub const TITLE_MARKERS: [&str; 7] = [
    "經理", "主任", "總監", "工程師", "Manager", "Director", "Engineer",
];

/// Company name keywords, Chinese and English.
pub const COMPANY_MARKERS: [&str; 6] = ["公司", "企業", "集團", "Co.", "Ltd", "Inc"];

/// Tokens that rule a line out as a person name, checked against the
/// lowercased line.
pub const NAME_STOPWORDS: [&str; 7] = ["電話", "tel", "www", "http", "@", "股份", "有限"];
