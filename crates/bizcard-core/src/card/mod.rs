//! Card field extraction module.

mod classifier;
mod parser;
pub mod rules;

pub use parser::{ExtractionResult, HeuristicCardParser};

use crate::error::ExtractionError;
use crate::models::card::CardRecord;
use crate::vision::VisionOutcome;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for card field extractors.
pub trait CardExtractor {
    /// Extract a card record from the outcome of an upstream vision call.
    fn extract(&self, outcome: &VisionOutcome) -> Result<CardRecord>;

    /// Extract a card record from plain recognized text.
    fn extract_from_text(&self, text: &str) -> Result<CardRecord>;
}
