//! Heuristic card parser combining labeled line rules and label-free
//! whole-text scans.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::ExtractionError;
use crate::models::card::{CardRecord, Field};
use crate::models::config::ExtractionConfig;
use crate::vision::VisionOutcome;

use super::classifier;
use super::rules::scanner;
use super::{CardExtractor, Result};

/// Result of card extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted card record.
    pub record: CardRecord,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// How field patterns are scoped during a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchScope {
    /// Label-guarded patterns applied line by line.
    PerLine,
    /// Label-free patterns applied over the whole blob first.
    WholeText,
}

/// Heuristic card parser.
///
/// A constructed value with no process-wide state: every parse operates
/// on its own input and output, so one parser can serve concurrent
/// callers freely.
pub struct HeuristicCardParser {
    /// Whether to rescan the top of the card for a company line.
    company_backfill: bool,
    /// Whether to take the first short line when no name matched.
    name_backfill: bool,
}

impl HeuristicCardParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self {
            company_backfill: true,
            name_backfill: true,
        }
    }

    /// Set the company back-fill pass.
    pub fn with_company_backfill(mut self, enabled: bool) -> Self {
        self.company_backfill = enabled;
        self
    }

    /// Set the name back-fill pass.
    pub fn with_name_backfill(mut self, enabled: bool) -> Self {
        self.name_backfill = enabled;
        self
    }

    /// Build a parser from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_company_backfill(config.company_backfill)
            .with_name_backfill(config.name_backfill)
    }

    /// Parse recognized text whose line structure is trustworthy.
    pub fn parse(&self, text: &str) -> ExtractionResult {
        self.run(text, MatchScope::PerLine)
    }

    /// Parse a blob whose line structure cannot be trusted, such as the
    /// remains of a rejected structured response.
    pub fn parse_unstructured(&self, text: &str) -> ExtractionResult {
        self.run(text, MatchScope::WholeText)
    }

    fn run(&self, text: &str, scope: MatchScope) -> ExtractionResult {
        let start = Instant::now();
        let mut record = CardRecord::from_text(text);

        // A card with nothing recognized on it is not an error.
        if text.trim().is_empty() {
            return ExtractionResult {
                record,
                warnings: Vec::new(),
                processing_time_ms: start.elapsed().as_millis() as u64,
            };
        }

        info!("Parsing card from {} characters of text", text.len());

        if scope == MatchScope::WholeText {
            scanner::scan_unlabeled(text, &mut record);
        }

        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        classifier::classify_lines(&lines, &mut record);

        if self.company_backfill {
            classifier::backfill_company(&lines, &mut record);
        }
        if self.name_backfill {
            classifier::backfill_name(&lines, &mut record);
        }

        let mut warnings = Vec::new();
        if record.name.is_empty() {
            warnings.push("Could not extract a contact name".to_string());
        }
        if record.company.is_empty() {
            warnings.push("Could not extract a company name".to_string());
        }
        if record.phone.is_empty() && record.mobile.is_empty() && record.email.is_empty() {
            warnings.push("Could not extract any contact method".to_string());
        }

        debug!(
            "Extracted card with {} of {} fields filled",
            record.filled_fields(),
            Field::ALL.len()
        );

        ExtractionResult {
            record,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }

    /// Handle a structured response body from the vision backend.
    ///
    /// A parseable guess is returned verbatim; the heuristics never
    /// correct structured data. Anything unparseable is treated as text
    /// that lost its structure.
    fn parse_structured(&self, body: &str) -> CardRecord {
        match serde_json::from_str::<CardRecord>(strip_code_fence(body)) {
            Ok(mut record) => {
                debug!("Structured guess accepted");
                if record.raw_text.is_empty() {
                    record.raw_text = body.to_string();
                }
                record
            }
            Err(err) => {
                warn!("Structured guess rejected ({err}), scanning response text instead");
                self.parse_unstructured(body).record
            }
        }
    }
}

impl Default for HeuristicCardParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CardExtractor for HeuristicCardParser {
    fn extract(&self, outcome: &VisionOutcome) -> Result<CardRecord> {
        match outcome {
            VisionOutcome::Structured(body) => Ok(self.parse_structured(body)),
            VisionOutcome::Text(text) => Ok(self.parse(text).record),
            VisionOutcome::Failed => Err(ExtractionError::NoSource),
        }
    }

    fn extract_from_text(&self, text: &str) -> Result<CardRecord> {
        Ok(self.parse(text).record)
    }
}

/// Strip a Markdown code fence from a model response, if present.
fn strip_code_fence(body: &str) -> &str {
    let inner = if let Some((_, rest)) = body.split_once("```json") {
        rest.split("```").next().unwrap_or(rest)
    } else if let Some((_, rest)) = body.split_once("```") {
        rest.split("```").next().unwrap_or(rest)
    } else {
        body
    };
    inner.trim()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const CARD: &str = "\
蓋斯克科技股份有限公司
王小明
資訊部 經理
電話: (02)1234-5678
手機: 0912-345-678
Email: service@gask.tw
www.gask.tw
台北市中山區南京東路100號
統一編號: 24538791";

    #[test]
    fn parses_a_full_card() {
        let result = HeuristicCardParser::new().parse(CARD);
        let record = result.record;

        assert_eq!(record.company, "蓋斯克科技股份有限公司");
        assert_eq!(record.name, "王小明");
        assert_eq!(record.title, "資訊部 經理");
        assert_eq!(record.phone, "(02)1234-5678");
        assert_eq!(record.mobile, "0912-345-678");
        assert_eq!(record.email, "service@gask.tw");
        assert_eq!(record.website, "www.gask.tw");
        assert_eq!(record.address, "台北市中山區南京東路100號");
        assert_eq!(record.tax_id, "24538791");
        assert_eq!(record.raw_text, CARD);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn extracted_values_come_from_the_input() {
        let record = HeuristicCardParser::new().parse(CARD).record;
        for field in Field::ALL {
            let value = record.get(field);
            assert!(value.is_empty() || CARD.contains(value), "{value} not in input");
        }
    }

    #[test]
    fn empty_input_yields_a_blank_record() {
        let result = HeuristicCardParser::new().parse("");
        assert_eq!(result.record, CardRecord::default());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn whitespace_input_keeps_raw_text_verbatim() {
        let result = HeuristicCardParser::new().parse("  \n\t\n");
        assert!(result.record.is_blank());
        assert_eq!(result.record.raw_text, "  \n\t\n");
    }

    #[test]
    fn parsing_is_deterministic() {
        let parser = HeuristicCardParser::new();
        assert_eq!(parser.parse(CARD).record, parser.parse(CARD).record);
    }

    #[test]
    fn short_name_only_card() {
        let record = HeuristicCardParser::new().parse("王小明").record;
        assert_eq!(record.name, "王小明");
        assert_eq!(record.filled_fields(), 1);
    }

    #[test]
    fn name_backfill_rescues_a_late_name_line() {
        let text = "統一編號: 24538791\n台北市中山區南京東路100號\n電話: (02)1234-5678\n王小明";
        let record = HeuristicCardParser::new().parse(text).record;
        assert_eq!(record.name, "王小明");
    }

    #[test]
    fn name_backfill_can_be_disabled() {
        let text = "統一編號: 24538791\n台北市中山區南京東路100號\n電話: (02)1234-5678\n王小明";
        let record = HeuristicCardParser::new()
            .with_name_backfill(false)
            .parse(text)
            .record;
        assert_eq!(record.name, "");
    }

    #[test]
    fn missing_fields_are_reported_as_warnings() {
        let result = HeuristicCardParser::new().parse("王小明");
        assert_eq!(
            result.warnings,
            vec![
                "Could not extract a company name".to_string(),
                "Could not extract any contact method".to_string(),
            ]
        );
    }

    #[test]
    fn valid_structured_guess_is_returned_verbatim() {
        let body = r#"{"name":"王小明","company":"蓋斯克科技","email":"service@gask.tw","raw_text":"王小明 蓋斯克科技"}"#;
        let record = HeuristicCardParser::new()
            .extract(&VisionOutcome::structured(body))
            .unwrap();

        assert_eq!(record.name, "王小明");
        assert_eq!(record.company, "蓋斯克科技");
        assert_eq!(record.email, "service@gask.tw");
        assert_eq!(record.raw_text, "王小明 蓋斯克科技");
        assert_eq!(record.title, "");
    }

    #[test]
    fn fenced_structured_guess_is_accepted() {
        let body = "```json\n{\"name\": \"王小明\"}\n```";
        let record = HeuristicCardParser::new()
            .extract(&VisionOutcome::structured(body))
            .unwrap();

        assert_eq!(record.name, "王小明");
        assert_eq!(record.raw_text, body);
    }

    #[test]
    fn malformed_guess_falls_back_to_scanning() {
        let body = "名片內容 service@gask.tw {\"name\": 王小明";
        let record = HeuristicCardParser::new()
            .extract(&VisionOutcome::structured(body))
            .unwrap();

        assert_eq!(record.email, "service@gask.tw");
        assert_eq!(record.raw_text, body);
    }

    #[test]
    fn structured_guess_that_is_not_an_object_falls_back() {
        let record = HeuristicCardParser::new()
            .extract(&VisionOutcome::structured("\"just a string\""))
            .unwrap();

        assert!(record.is_blank());
        assert_eq!(record.raw_text, "\"just a string\"");
    }

    #[test]
    fn failed_upstream_yields_no_record() {
        let parser = HeuristicCardParser::new();
        assert!(matches!(
            parser.extract(&VisionOutcome::Failed),
            Err(ExtractionError::NoSource)
        ));
    }

    #[test]
    fn whole_text_scope_recovers_fields_from_a_single_blob() {
        let blob = "聯絡 service@gask.tw 網站 www.gask.tw 電話 (02)1234-5678 統編 24538791";
        let parser = HeuristicCardParser::new();

        // With trustworthy lines, one line feeds exactly one field.
        let lined = parser.parse(blob).record;
        assert_eq!(lined.email, "service@gask.tw");
        assert_eq!(lined.website, "");

        // With structure lost, the label-free scans recover the rest.
        let scanned = parser.parse_unstructured(blob).record;
        assert_eq!(scanned.email, "service@gask.tw");
        assert_eq!(scanned.website, "gask.tw");
        assert_eq!(scanned.phone, "(02)1234-5678");
        assert_eq!(scanned.tax_id, "24538791");
    }

    #[test]
    fn strip_code_fence_handles_plain_and_fenced_bodies() {
        assert_eq!(strip_code_fence("{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
    }
}
