//! Whole-text opportunistic scans for fields with near-unambiguous shapes.
//!
//! These run over the entire blob, ignore label keywords, and return at
//! most one candidate per field, which makes them usable when the source
//! text has lost all line structure. The line classifier reuses the same
//! patterns scoped to single lines.

use crate::models::card::{CardRecord, Field};

use super::patterns::{EMAIL, PHONE, TAX_ID, WEBSITE};

/// First email-shaped token in the text.
pub fn scan_email(text: &str) -> Option<String> {
    EMAIL.find(text).map(|m| m.as_str().to_string())
}

/// First website-shaped token in the text.
pub fn scan_website(text: &str) -> Option<String> {
    WEBSITE.find(text).map(|m| m.as_str().to_string())
}

/// First phone-shaped number in the text.
pub fn scan_phone(text: &str) -> Option<String> {
    PHONE.find(text).map(|m| m.as_str().to_string())
}

/// First run of eight consecutive digits in the text.
pub fn scan_tax_id(text: &str) -> Option<String> {
    TAX_ID.find(text).map(|m| m.as_str().to_string())
}

/// Prefill the label-free fields of a record from an unstructured blob.
pub fn scan_unlabeled(text: &str, record: &mut CardRecord) {
    if let Some(email) = scan_email(text) {
        record.fill(Field::Email, email);
    }
    if let Some(website) = scan_website(text) {
        record.fill(Field::Website, website);
    }
    if let Some(phone) = scan_phone(text) {
        record.fill(Field::Phone, phone);
    }
    if let Some(tax_id) = scan_tax_id(text) {
        record.fill(Field::TaxId, tax_id);
    }
}
