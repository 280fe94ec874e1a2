//! Unwrapping and repairing generated output.

use lab_core::entities::ProjectDocument;
use lab_core::enums::Pane;
use serde::Deserialize;
use serde_json::Value;

use crate::error::GenerationError;

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

/// Pane sources returned by the service. `None` means the service produced
/// nothing usable for that pane; the editor keeps its text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedCode {
    pub html: Option<String>,
    pub css: Option<String>,
    pub js: Option<String>,
}

impl GeneratedCode {
    #[must_use]
    pub fn get(&self, pane: Pane) -> Option<&str> {
        match pane {
            Pane::Markup => self.html.as_deref(),
            Pane::Style => self.css.as_deref(),
            Pane::Script => self.js.as_deref(),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.html.is_none() && self.css.is_none() && self.js.is_none()
    }

    /// Merge the produced fields into `doc`; returns the panes that changed.
    pub fn apply_to(&self, doc: &mut ProjectDocument) -> Vec<Pane> {
        Pane::ORDER
            .into_iter()
            .filter_map(|pane| {
                let text = self.get(pane)?;
                doc.set_source(pane, text);
                Some(pane)
            })
            .collect()
    }
}

/// Generated text at `candidates[0].content.parts[0].text`.
///
/// # Errors
///
/// Returns [`GenerationError::EmptyResponse`] if the path is missing or the
/// text is empty.
pub fn extract_text(response: &Value) -> Result<String, GenerationError> {
    let parsed = GenerateResponse::deserialize(response)
        .map_err(|e| GenerationError::MalformedOutput(e.to_string()))?;
    parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .filter(|text| !text.is_empty())
        .ok_or(GenerationError::EmptyResponse)
}

/// Remove every ```` ```json ```` and ```` ``` ```` marker, then trim.
#[must_use]
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse cleaned text into [`GeneratedCode`].
///
/// Only non-empty string fields are kept. A response carrying none of them
/// is still a success.
///
/// # Errors
///
/// Returns [`GenerationError::MalformedOutput`] if the text is not a JSON
/// object.
pub fn parse_generated(text: &str) -> Result<GeneratedCode, GenerationError> {
    let value: Value = serde_json::from_str(&strip_code_fences(text))
        .map_err(|e| GenerationError::MalformedOutput(e.to_string()))?;
    let Value::Object(map) = value else {
        return Err(GenerationError::MalformedOutput(
            "expected a JSON object".into(),
        ));
    };
    let field = |key: &str| {
        map.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    Ok(GeneratedCode {
        html: field("html"),
        css: field("css"),
        js: field("js"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn response_with(text: &str) -> Value {
        json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] })
    }

    #[test]
    fn extracts_first_candidate_text() {
        assert_eq!(extract_text(&response_with("abc")).unwrap(), "abc");
    }

    #[test]
    fn missing_text_is_empty_response() {
        for response in [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [{ "content": { "parts": [] } }] }),
            json!({ "candidates": [{ "finishReason": "SAFETY" }] }),
            response_with(""),
        ] {
            assert!(matches!(
                extract_text(&response),
                Err(GenerationError::EmptyResponse)
            ));
        }
    }

    #[test]
    fn strips_fences_anywhere() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```\n"), "{\"a\":1}");
        assert_eq!(strip_code_fences("  {}  "), "{}");
    }

    #[test]
    fn partial_output_keeps_only_present_fields() {
        let code = parse_generated(r#"{"html":"<p>hi</p>","css":"","js":5}"#).unwrap();
        assert_eq!(
            code,
            GeneratedCode {
                html: Some("<p>hi</p>".into()),
                css: None,
                js: None,
            }
        );
    }

    #[test]
    fn non_object_output_is_malformed() {
        assert!(matches!(
            parse_generated("[1,2]"),
            Err(GenerationError::MalformedOutput(_))
        ));
        assert!(matches!(
            parse_generated("Sure! Here is your code"),
            Err(GenerationError::MalformedOutput(_))
        ));
    }

    #[test]
    fn apply_leaves_missing_panes_untouched() {
        let mut doc = ProjectDocument {
            css: "keep{}".into(),
            ..ProjectDocument::default()
        };
        let changed = GeneratedCode {
            html: Some("<h1>new</h1>".into()),
            js: Some("run()".into()),
            css: None,
        }
        .apply_to(&mut doc);
        assert_eq!(changed, vec![Pane::Markup, Pane::Script]);
        assert_eq!(doc.html, "<h1>new</h1>");
        assert_eq!(doc.css, "keep{}");
        assert_eq!(doc.js, "run()");
    }
}
