//! Sanitize-then-parse pipeline for similar-case responses.
//!
//! The model is asked for a bare JSON array but routinely wraps it in
//! markdown fences or returns prose. Treat the text as untrusted: strip the
//! fences first, then require a JSON array. Elements that are not objects of
//! the expected shape are dropped rather than failing the whole response.

use serde::{Deserialize, Serialize};

use crate::error::AiError;

/// A precedent suggested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarCase {
    #[serde(rename = "caseTitle", default)]
    pub case_title: String,
    #[serde(default)]
    pub citation: String,
    #[serde(default)]
    pub verdict: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance: Option<f64>,
}

/// Remove markdown code-fence markers and surrounding whitespace.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse a similar-cases response into structured records.
///
/// Returns `AiError::InvalidFormat` when the sanitized text is not a JSON
/// array; the snippet carries the start of the offending text for logs.
pub fn similar_cases(raw: &str) -> Result<Vec<SimilarCase>, AiError> {
    let cleaned = strip_code_fences(raw);

    let value: serde_json::Value =
        serde_json::from_str(&cleaned).map_err(|_| invalid_format(&cleaned))?;

    let items = value.as_array().ok_or_else(|| invalid_format(&cleaned))?;

    let cases = items
        .iter()
        .filter_map(|item| serde_json::from_value::<SimilarCase>(item.clone()).ok())
        .collect();

    Ok(cases)
}

fn invalid_format(text: &str) -> AiError {
    let snippet: String = text.chars().take(120).collect();
    AiError::InvalidFormat { snippet }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn parses_fenced_json_array() {
        let raw = "```json\n[{\"caseTitle\":\"A\",\"citation\":\"C\",\"verdict\":\"V\"}]\n```";
        let cases = similar_cases(raw).unwrap();
        assert_eq!(
            cases,
            vec![SimilarCase {
                case_title: "A".to_string(),
                citation: "C".to_string(),
                verdict: "V".to_string(),
                relevance: None,
            }]
        );
    }

    #[test]
    fn parses_bare_json_array() {
        let raw = r#"[{"caseTitle":"X v. Y","citation":"AIR 2001","verdict":"Dismissed."}]"#;
        let cases = similar_cases(raw).unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].case_title, "X v. Y");
    }

    #[test]
    fn prose_response_is_a_format_error() {
        let err = similar_cases("Sorry, I cannot help").unwrap_err();
        match err {
            AiError::InvalidFormat { snippet } => {
                assert!(snippet.starts_with("Sorry"));
            }
            other => panic!("expected InvalidFormat, got {other:?}"),
        }
    }

    #[test]
    fn json_object_is_not_an_array() {
        let err = similar_cases(r#"{"caseTitle":"A"}"#).unwrap_err();
        assert!(matches!(err, AiError::InvalidFormat { .. }));
    }

    #[test]
    fn missing_and_unknown_fields_are_tolerated() {
        let raw = r#"[{"caseTitle":"A","court":"SC"},{"citation":"C2","relevance":0.9}]"#;
        let cases = similar_cases(raw).unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].case_title, "A");
        assert_eq!(cases[0].citation, "");
        assert_eq!(cases[1].citation, "C2");
        assert_eq!(cases[1].relevance, Some(0.9));
    }

    #[test]
    fn non_object_elements_are_dropped() {
        let raw = r#"["not a case", {"caseTitle":"A"}]"#;
        let cases = similar_cases(raw).unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].case_title, "A");
    }

    #[test]
    fn empty_array_parses_to_empty_list() {
        assert_eq!(similar_cases("[]").unwrap(), vec![]);
    }

    proptest! {
        /// Stripping removes every fence marker regardless of placement.
        #[test]
        fn stripped_text_has_no_fences(
            body in "[a-zA-Z0-9 \\[\\]{}\",:.]{0,80}",
            lead in prop_oneof![Just(""), Just("```json\n"), Just("```\n")],
            tail in prop_oneof![Just(""), Just("\n```"), Just("\n```json")],
        ) {
            let raw = format!("{lead}{body}{tail}");
            let stripped = strip_code_fences(&raw);
            prop_assert!(!stripped.contains("```"));
        }

        /// Stripping is idempotent.
        #[test]
        fn stripping_is_idempotent(raw in "[a-zA-Z0-9`\\n \\[\\]{}\",:.]{0,120}") {
            let once = strip_code_fences(&raw);
            let twice = strip_code_fences(&once);
            prop_assert_eq!(once, twice);
        }

        /// Any valid array of well-formed records round-trips through the
        /// parser, fenced or not.
        #[test]
        fn well_formed_records_survive_parsing(
            title in "[A-Za-z .]{1,30}",
            citation in "[A-Z0-9() ]{1,20}",
            verdict in "[A-Za-z .]{1,40}",
            fenced in any::<bool>(),
        ) {
            let record = SimilarCase {
                case_title: title,
                citation,
                verdict,
                relevance: None,
            };
            let json = serde_json::to_string(&vec![record.clone()]).unwrap();
            let raw = if fenced { format!("```json\n{json}\n```") } else { json };
            let parsed = similar_cases(&raw).unwrap();
            prop_assert_eq!(parsed, vec![record]);
        }
    }
}
