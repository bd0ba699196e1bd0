//! Field extraction from a structured recommendation reply

use crate::models::Recommendation;

/// Characters removed from replies before matching (markdown emphasis)
const MARKUP_CHARS: &[char] = &['*', '_', '#', '`'];

type FieldSetter = fn(&mut Recommendation, String);

/// Output contract: label and the field it fills, in prompt order
const FIELDS: &[(&str, FieldSetter)] = &[
    ("Recommended line:", |r, v| r.recommended_line = Some(v)),
    ("Reason:", |r, v| r.reason = Some(v)),
    ("Product routine:", |r, v| r.product_routine = Some(v)),
    ("Alternative:", |r, v| r.alternative = Some(v)),
];

/// Parse a generation reply into a [`Recommendation`].
///
/// Lines are stripped of markup, then each label is searched for
/// case-insensitively anywhere in a line, so numbered lists and a short
/// preamble before the label still match. The first line carrying a label
/// wins and the rest of that line is the value; a label that never appears,
/// or appears with nothing after it, leaves its field `None`. Never fails.
#[must_use]
pub fn parse_recommendation(reply: &str) -> Recommendation {
    let lines: Vec<String> = reply
        .lines()
        .map(|line| line.chars().filter(|c| !MARKUP_CHARS.contains(c)).collect())
        .collect();

    let mut recommendation = Recommendation::default();
    for (label, set) in FIELDS {
        let value = lines.iter().find_map(|line| value_after_label(line, label));
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            set(&mut recommendation, value.to_string());
        }
    }

    recommendation
}

/// Text following the first case-insensitive occurrence of `label`, trimmed
fn value_after_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    // ASCII lowercasing keeps byte offsets aligned with `line`
    let start = line
        .to_ascii_lowercase()
        .find(&label.to_ascii_lowercase())?;
    Some(line[start + label.len()..].trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_all_four_fields() {
        let reply = "Recommended line: Supreme Length\n\
                     Reason: Long hair with oily roots needs protection.\n\
                     Product routine: Shampoo + Conditioner\n\
                     Alternative: Aqua Revive for extra hydration";
        let parsed = parse_recommendation(reply);
        assert_eq!(parsed.recommended_line.as_deref(), Some("Supreme Length"));
        assert_eq!(
            parsed.reason.as_deref(),
            Some("Long hair with oily roots needs protection.")
        );
        assert_eq!(parsed.product_routine.as_deref(), Some("Shampoo + Conditioner"));
        assert_eq!(
            parsed.alternative.as_deref(),
            Some("Aqua Revive for extra hydration")
        );
        assert!(parsed.is_complete());
    }

    #[test]
    fn test_any_order_and_case() {
        let reply = "ALTERNATIVE: Oil Nutritive\nproduct routine: Mask weekly\nreason: dry\nRECOMMENDED LINE: Total Repair";
        let parsed = parse_recommendation(reply);
        assert_eq!(parsed.recommended_line.as_deref(), Some("Total Repair"));
        assert_eq!(parsed.reason.as_deref(), Some("dry"));
        assert_eq!(parsed.product_routine.as_deref(), Some("Mask weekly"));
        assert_eq!(parsed.alternative.as_deref(), Some("Oil Nutritive"));
    }

    #[test]
    fn test_strips_markup_and_bullets() {
        let reply = "**Recommended line:** *Ultimate Repair*\n- __Reason:__   heavy bleaching   \n### Product routine: `Shampoo + Mask`";
        let parsed = parse_recommendation(reply);
        assert_eq!(parsed.recommended_line.as_deref(), Some("Ultimate Repair"));
        assert_eq!(parsed.reason.as_deref(), Some("heavy bleaching"));
        assert_eq!(parsed.product_routine.as_deref(), Some("Shampoo + Mask"));
        assert!(parsed.alternative.is_none());
    }

    #[test]
    fn test_missing_alternative_is_absent() {
        let reply = "Recommended line: Aqua Revive\nReason: mild dryness\nProduct routine: Shampoo + Conditioner";
        let parsed = parse_recommendation(reply);
        assert!(parsed.recommended_line.is_some());
        assert!(parsed.reason.is_some());
        assert!(parsed.product_routine.is_some());
        assert!(parsed.alternative.is_none());
    }

    #[test]
    fn test_first_occurrence_wins() {
        let reply = "Reason: first\nReason: second";
        assert_eq!(parse_recommendation(reply).reason.as_deref(), Some("first"));
    }

    #[test]
    fn test_empty_value_is_absent() {
        let parsed = parse_recommendation("Alternative:\nReason: ok");
        assert!(parsed.alternative.is_none());
        assert_eq!(parsed.reason.as_deref(), Some("ok"));
    }

    #[test]
    fn test_unstructured_reply_yields_empty_record() {
        let parsed = parse_recommendation("I think you should try something nice. Ünïcödé ✨");
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_numbered_list() {
        let reply = "1. Recommended line: Supreme Length\n\
                     2. Reason: oily roots with long lengths\n\
                     3. Product routine: Shampoo + Conditioner\n\
                     4. Alternative: Aqua Revive";
        let parsed = parse_recommendation(reply);
        assert_eq!(parsed.recommended_line.as_deref(), Some("Supreme Length"));
        assert_eq!(parsed.reason.as_deref(), Some("oily roots with long lengths"));
        assert_eq!(parsed.product_routine.as_deref(), Some("Shampoo + Conditioner"));
        assert_eq!(parsed.alternative.as_deref(), Some("Aqua Revive"));
    }

    #[test]
    fn test_preamble_on_label_line() {
        let reply = "Sure! Recommended line: Supreme Length\nHere is why. Reason: protects long hair";
        let parsed = parse_recommendation(reply);
        assert_eq!(parsed.recommended_line.as_deref(), Some("Supreme Length"));
        assert_eq!(parsed.reason.as_deref(), Some("protects long hair"));
    }

    #[test]
    fn test_two_labels_on_one_line() {
        let parsed = parse_recommendation("Reason: it fits. Alternative: Oil Nutritive");
        assert_eq!(parsed.reason.as_deref(), Some("it fits. Alternative: Oil Nutritive"));
        assert_eq!(parsed.alternative.as_deref(), Some("Oil Nutritive"));
    }
}
