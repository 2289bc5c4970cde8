//! Core library for business card text extraction.
//!
//! This crate provides:
//! - The card record data model shared with upstream vision services
//! - Whole-text opportunistic scanning for fields with unambiguous shapes
//! - A priority-ordered, line-by-line field classifier for noisy
//!   multilingual OCR text
//! - An extraction orchestrator that degrades gracefully when the
//!   structured vision path fails

pub mod card;
pub mod error;
pub mod models;
pub mod vision;

pub use card::{CardExtractor, ExtractionResult, HeuristicCardParser};
pub use error::{BizcardError, Result};
pub use models::card::{CardRecord, Field};
pub use vision::VisionOutcome;
