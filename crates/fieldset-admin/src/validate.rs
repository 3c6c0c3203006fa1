//! Field definition validation rules.

use crate::service::FieldSubmission;

/// Characters rejected in the human-facing label.
const FORBIDDEN_LABEL_CHARS: &[char] = &[
    '\\', '\'', '^', '!', '$', '%', '&', '*', '(', ')', '}', '{', '@', '#', '~', '?', '>', '<',
    ',', '|', '=', '+',
];

/// Substrings rejected in rule expressions, matched case-insensitively.
const DANGEROUS_KEYWORDS: &[&str] = &["insert", "delete", "drop", "truncate", "create"];

/// Check a submission against the field definition rules.
///
/// Violations come back in rule order; callers surface the first
/// message only. The keyword scan stops at its first hit, the other
/// rules are evaluated independently.
pub fn validate(submission: &FieldSubmission) -> Vec<&'static str> {
    let mut errors = Vec::new();

    if submission.name.trim().chars().count() < 3 {
        errors.push("Name Of The Custom Field Has To More Than 3 Letters");
    }

    if let Some(label) = &submission.label {
        if label.chars().any(|c| FORBIDDEN_LABEL_CHARS.contains(&c)) {
            errors.push("Special Character not allowed in Label");
        }
    }

    if let Some(rule) = &submission.rule {
        let lowered = rule.to_lowercase();
        for keyword in DANGEROUS_KEYWORDS {
            if lowered.contains(keyword) {
                errors.push("Dangerous SQL keywords not allowed in rules");
                break;
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(name: &str) -> FieldSubmission {
        FieldSubmission {
            name: name.into(),
            scope: "customer_card".into(),
            ..Default::default()
        }
    }

    #[test]
    fn accepts_plain_submission() {
        assert!(validate(&submission("Favourite Colour")).is_empty());
    }

    #[test]
    fn rejects_short_name() {
        assert_eq!(
            validate(&submission("ab")),
            vec!["Name Of The Custom Field Has To More Than 3 Letters"]
        );
    }

    #[test]
    fn trims_name_before_length_check() {
        assert_eq!(validate(&submission("  a  ")).len(), 1);
        assert!(validate(&submission("  abc  ")).is_empty());
    }

    #[test]
    fn rejects_special_characters_in_label() {
        let mut s = submission("Favourite Colour");
        s.label = Some("colour@home".into());
        assert_eq!(validate(&s), vec!["Special Character not allowed in Label"]);

        s.label = Some("Colour (home)".into());
        assert_eq!(validate(&s).len(), 1);

        s.label = Some("Favourite colour".into());
        assert!(validate(&s).is_empty());
    }

    #[test]
    fn rejects_dangerous_rule_keywords() {
        let mut s = submission("Loyalty Points");
        s.rule = Some("points > 0; DROP TABLE customers".into());
        assert_eq!(
            validate(&s),
            vec!["Dangerous SQL keywords not allowed in rules"]
        );
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let mut s = submission("Loyalty Points");
        s.rule = Some("TrUnCaTe everything".into());
        assert_eq!(validate(&s).len(), 1);
    }

    #[test]
    fn keyword_scan_reports_once_for_multiple_hits() {
        let mut s = submission("Loyalty Points");
        s.rule = Some("insert then delete then drop".into());
        assert_eq!(validate(&s).len(), 1);
    }

    #[test]
    fn benign_rule_passes() {
        let mut s = submission("Loyalty Points");
        s.rule = Some("value > 10 && value < 100".into());
        assert!(validate(&s).is_empty());
    }

    #[test]
    fn collects_violations_in_rule_order() {
        let mut s = submission("ab");
        s.label = Some("bad@label".into());
        assert_eq!(
            validate(&s),
            vec![
                "Name Of The Custom Field Has To More Than 3 Letters",
                "Special Character not allowed in Label",
            ]
        );
    }
}
