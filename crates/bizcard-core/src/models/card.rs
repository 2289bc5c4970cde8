//! Card record data model shared with upstream vision services.

use serde::{Deserialize, Serialize};

/// A structured contact record extracted from one business card.
///
/// Every contact field is "optional text": absence is the empty string,
/// never null or a missing key, so downstream consumers have a single
/// value-or-blank contract. `raw_text` always carries the verbatim
/// recognized text for audit and re-parsing, regardless of how much of
/// the card was understood.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardRecord {
    /// Person name.
    pub name: String,

    /// Job title.
    pub title: String,

    /// Company name.
    pub company: String,

    /// Landline phone number.
    pub phone: String,

    /// Mobile phone number.
    pub mobile: String,

    /// Email address.
    pub email: String,

    /// Postal address.
    pub address: String,

    /// Website URL.
    pub website: String,

    /// Unified business number (8 digits).
    pub tax_id: String,

    /// Verbatim recognized text the record was extracted from.
    pub raw_text: String,
}

/// The contact fields a parse can fill, in record order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Title,
    Company,
    Phone,
    Mobile,
    Email,
    Address,
    Website,
    TaxId,
}

impl Field {
    /// All contact fields in record order. `raw_text` is not a contact
    /// field and is deliberately absent.
    pub const ALL: [Field; 9] = [
        Field::Name,
        Field::Title,
        Field::Company,
        Field::Phone,
        Field::Mobile,
        Field::Email,
        Field::Address,
        Field::Website,
        Field::TaxId,
    ];

    /// Serialized key for the field.
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Title => "title",
            Field::Company => "company",
            Field::Phone => "phone",
            Field::Mobile => "mobile",
            Field::Email => "email",
            Field::Address => "address",
            Field::Website => "website",
            Field::TaxId => "tax_id",
        }
    }
}

impl CardRecord {
    /// Create an empty record carrying the verbatim source text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            raw_text: text.into(),
            ..Self::default()
        }
    }

    /// Get a field value. Empty string means the field never matched.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Title => &self.title,
            Field::Company => &self.company,
            Field::Phone => &self.phone,
            Field::Mobile => &self.mobile,
            Field::Email => &self.email,
            Field::Address => &self.address,
            Field::Website => &self.website,
            Field::TaxId => &self.tax_id,
        }
    }

    /// Fill a field if it is still unset and report whether the value
    /// was taken. An already-filled field is never overwritten.
    pub fn fill(&mut self, field: Field, value: impl Into<String>) -> bool {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Title => &mut self.title,
            Field::Company => &mut self.company,
            Field::Phone => &mut self.phone,
            Field::Mobile => &mut self.mobile,
            Field::Email => &mut self.email,
            Field::Address => &mut self.address,
            Field::Website => &mut self.website,
            Field::TaxId => &mut self.tax_id,
        };

        if slot.is_empty() {
            *slot = value.into();
            true
        } else {
            false
        }
    }

    /// Number of contact fields that matched.
    pub fn filled_fields(&self) -> usize {
        Field::ALL.iter().filter(|f| !self.get(**f).is_empty()).count()
    }

    /// Whether no contact field matched at all.
    pub fn is_blank(&self) -> bool {
        self.filled_fields() == 0
    }
}
