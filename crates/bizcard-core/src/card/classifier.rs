//! Line-by-line field classifier for recognized card text.
//!
//! Card text is short and each printed line usually carries one field,
//! so the classifier makes at most one decision per non-empty line: the
//! rules below are tried in priority order and the first rule whose
//! cheap keyword/position guard holds and whose extraction succeeds
//! consumes the line. A filled field never changes, so when two lines
//! compete for the same field the earlier one wins.

use crate::models::card::{CardRecord, Field};

use super::rules::patterns::{
    ADDRESS_MARKERS, COMPANY_MARKERS, NAME_STOPWORDS, TITLE_MARKERS, TITLE_SPAN,
};
use super::rules::scanner::{scan_email, scan_phone, scan_tax_id, scan_website};

/// Name candidates must sit in the first lines of the card.
const NAME_LINE_WINDOW: usize = 3;

/// The company back-fill only rescans the top of the card.
const COMPANY_BACKFILL_WINDOW: usize = 5;

const MAX_NAME_CHARS: usize = 10;
const MAX_TITLE_CHARS: usize = 20;
const MAX_COMPANY_CHARS: usize = 30;
const MIN_ADDRESS_CHARS: usize = 10;

/// One trimmed, non-empty line with the cheap facts the rule guards test.
pub(crate) struct Line<'a> {
    text: &'a str,
    lower: String,
    index: usize,
    chars: usize,
}

impl<'a> Line<'a> {
    fn new(text: &'a str, index: usize) -> Self {
        Self {
            text,
            lower: text.to_lowercase(),
            index,
            chars: text.chars().count(),
        }
    }
}

/// A single classification rule: a cheap guard plus an extractor.
pub(crate) struct LineRule {
    pub field: Field,
    pub applies: fn(&Line) -> bool,
    pub extract: fn(&Line) -> Option<String>,
}

/// Classification rules in evaluation order. The order is behavior: a
/// line matching several rules contributes only to the earliest one.
pub(crate) const RULES: [LineRule; 9] = [
    LineRule { field: Field::Email, applies: has_at_sign, extract: email_in_line },
    LineRule { field: Field::Website, applies: has_url_marker, extract: website_in_line },
    LineRule { field: Field::Phone, applies: has_phone_label, extract: phone_in_line },
    LineRule { field: Field::Mobile, applies: has_mobile_label, extract: phone_in_line },
    LineRule { field: Field::TaxId, applies: has_tax_label, extract: tax_id_in_line },
    LineRule { field: Field::Address, applies: looks_like_address, extract: whole_line },
    LineRule { field: Field::Title, applies: has_title_keyword, extract: title_in_line },
    LineRule { field: Field::Company, applies: has_company_keyword, extract: whole_line },
    LineRule { field: Field::Name, applies: looks_like_name, extract: whole_line },
];

fn has_at_sign(line: &Line) -> bool {
    line.text.contains('@')
}

fn has_url_marker(line: &Line) -> bool {
    line.text.contains("http://") || line.text.contains("https://") || line.text.contains("www.")
}

fn has_phone_label(line: &Line) -> bool {
    line.text.contains("電話") || line.lower.contains("tel") || line.text.contains("T:")
}

fn has_mobile_label(line: &Line) -> bool {
    line.text.contains("手機") || line.lower.contains("mobile") || line.text.contains("M:")
}

fn has_tax_label(line: &Line) -> bool {
    line.text.contains("統一編號") || line.text.contains("統編")
}

fn looks_like_address(line: &Line) -> bool {
    line.chars > MIN_ADDRESS_CHARS && ADDRESS_MARKERS.iter().any(|m| line.text.contains(m))
}

fn has_title_keyword(line: &Line) -> bool {
    line.chars < MAX_TITLE_CHARS && TITLE_MARKERS.iter().any(|m| line.text.contains(m))
}

fn has_company_keyword(line: &Line) -> bool {
    line.chars < MAX_COMPANY_CHARS && COMPANY_MARKERS.iter().any(|m| line.text.contains(m))
}

fn looks_like_name(line: &Line) -> bool {
    line.index < NAME_LINE_WINDOW
        && line.chars < MAX_NAME_CHARS
        && !NAME_STOPWORDS.iter().any(|t| line.lower.contains(t))
}

fn email_in_line(line: &Line) -> Option<String> {
    scan_email(line.text)
}

fn website_in_line(line: &Line) -> Option<String> {
    scan_website(line.text)
}

fn phone_in_line(line: &Line) -> Option<String> {
    scan_phone(line.text)
}

fn tax_id_in_line(line: &Line) -> Option<String> {
    scan_tax_id(line.text)
}

fn whole_line(line: &Line) -> Option<String> {
    Some(line.text.to_string())
}

fn title_in_line(line: &Line) -> Option<String> {
    TITLE_SPAN
        .captures(line.text)
        .map(|caps| caps[1].trim().to_string())
        .or_else(|| Some(line.text.to_string()))
}

/// Classify every line into at most one field.
pub(crate) fn classify_lines(lines: &[&str], record: &mut CardRecord) {
    for (index, text) in lines.iter().copied().enumerate() {
        let line = Line::new(text, index);

        for rule in &RULES {
            if !record.get(rule.field).is_empty() {
                continue;
            }
            if !(rule.applies)(&line) {
                continue;
            }
            if let Some(value) = (rule.extract)(&line) {
                record.fill(rule.field, value);
                break;
            }
            // A guard that matched but extracted nothing leaves the
            // line available to later rules.
        }
    }
}

/// Rescan the top of the card for a company line the walk did not take.
pub(crate) fn backfill_company(lines: &[&str], record: &mut CardRecord) {
    if !record.company.is_empty() {
        return;
    }

    let hit = lines
        .iter()
        .take(COMPANY_BACKFILL_WINDOW)
        .find(|l| l.contains("公司") && l.chars().count() < MAX_COMPANY_CHARS);

    if let Some(line) = hit {
        record.fill(Field::Company, *line);
    }
}

/// Take the first short line as the name, with no further filtering.
pub(crate) fn backfill_name(lines: &[&str], record: &mut CardRecord) {
    if !record.name.is_empty() {
        return;
    }

    if let Some(line) = lines.iter().find(|l| l.chars().count() < MAX_NAME_CHARS) {
        record.fill(Field::Name, *line);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn classify(text: &str) -> CardRecord {
        let mut record = CardRecord::from_text(text);
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        classify_lines(&lines, &mut record);
        record
    }

    #[test]
    fn rule_priority_order_is_fixed() {
        let order: Vec<Field> = RULES.iter().map(|r| r.field).collect();
        assert_eq!(
            order,
            vec![
                Field::Email,
                Field::Website,
                Field::Phone,
                Field::Mobile,
                Field::TaxId,
                Field::Address,
                Field::Title,
                Field::Company,
                Field::Name,
            ]
        );
    }

    #[test]
    fn email_beats_website_on_a_shared_line() {
        let record = classify("service@gask.tw www.gask.tw");
        assert_eq!(record.email, "service@gask.tw");
        assert_eq!(record.website, "");
    }

    #[test]
    fn a_line_contributes_to_at_most_one_field() {
        let record = classify("Email: test@example.com");
        assert_eq!(record.email, "test@example.com");
        assert_eq!(record.filled_fields(), 1);
    }

    #[test]
    fn earlier_line_wins_for_the_same_field() {
        let record = classify("a@first.tw\nb@second.tw");
        assert_eq!(record.email, "a@first.tw");
    }

    #[test]
    fn labeled_phone_and_mobile_stay_apart() {
        let record = classify("電話: (02)1234-5678\n手機: 0912-345-678");
        assert_eq!(record.phone, "(02)1234-5678");
        assert_eq!(record.mobile, "0912-345-678");
    }

    #[test]
    fn mobile_requires_a_label() {
        let record = classify("電話: (02)1234-5678\n0912-345-678");
        assert_eq!(record.phone, "(02)1234-5678");
        assert_eq!(record.mobile, "");
    }

    #[test]
    fn address_needs_more_than_ten_chars() {
        assert_eq!(classify("台北市中山路100號").address, "");
        assert_eq!(
            classify("台北市中山區南京東路100號").address,
            "台北市中山區南京東路100號"
        );
    }

    #[test]
    fn title_takes_the_tight_span_when_one_exists() {
        assert_eq!(classify("A12 Sales Manager").title, "Sales Manager");
    }

    #[test]
    fn title_falls_back_to_the_whole_line() {
        // A digit right against the keyword defeats the tight span.
        assert_eq!(classify("工程師5人").title, "工程師5人");
    }

    #[test]
    fn name_rule_rejects_contact_noise_in_the_top_lines() {
        let record = classify("x@y.tw\na@b.tw\n王小明");
        assert_eq!(record.email, "x@y.tw");
        assert_eq!(record.name, "王小明");
    }

    #[test]
    fn name_window_ends_after_three_lines() {
        let record = classify(
            "第一行很長超過十個字元喔喔\n第二行也很長超過十個字元喔\n第三行也很長超過十個字元喔\n王小明",
        );
        assert_eq!(record.name, "");
    }

    #[test]
    fn company_line_is_taken_whole() {
        let record = classify("蓋斯克科技股份有限公司");
        assert_eq!(record.company, "蓋斯克科技股份有限公司");
        assert_eq!(record.name, "");
    }

    #[test]
    fn english_company_markers_match() {
        assert_eq!(
            classify("Gask Technology Co., Ltd").company,
            "Gask Technology Co., Ltd"
        );
    }

    #[test]
    fn company_backfill_recovers_a_shared_line() {
        let text = "service@gask.tw 蓋斯克科技公司";
        let lines = [text];
        let mut record = CardRecord::from_text(text);

        classify_lines(&lines, &mut record);
        assert_eq!(record.email, "service@gask.tw");
        assert_eq!(record.company, "");

        backfill_company(&lines, &mut record);
        assert_eq!(record.company, text);
    }

    #[test]
    fn company_backfill_only_scans_the_top_lines() {
        let lines = [
            "line one",
            "line two",
            "line three",
            "line four",
            "line five",
            "蓋斯克公司",
        ];
        let mut record = CardRecord::default();

        backfill_company(&lines, &mut record);
        assert_eq!(record.company, "");
    }

    #[test]
    fn name_backfill_takes_the_first_short_line_unconditionally() {
        let lines = ["這一行有十一個字元那麼長", "a@b.tw"];
        let mut record = CardRecord::default();

        backfill_name(&lines, &mut record);
        assert_eq!(record.name, "a@b.tw");
    }
}
