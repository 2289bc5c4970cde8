//! Upstream vision/OCR collaborator contract.
//!
//! The extraction core never calls a vision backend itself. It only
//! consumes whatever the upstream produced for a card image before the
//! core was invoked: a structured guess, plain recognized text, or
//! nothing at all.

/// Outcome of the upstream vision call for one card image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisionOutcome {
    /// The backend answered with a structured guess, usually JSON and
    /// possibly wrapped in a Markdown code fence.
    Structured(String),

    /// The backend produced recognized text with no field structure.
    Text(String),

    /// The backend produced nothing to parse.
    Failed,
}

impl VisionOutcome {
    /// Wrap a structured response body.
    pub fn structured(body: impl Into<String>) -> Self {
        Self::Structured(body.into())
    }

    /// Wrap plain recognized text.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}
