//! Prompt text and request body for `generateContent`.

use serde_json::{Value, json};

/// Prompt sent for a task description.
#[must_use]
pub fn build_prompt(task: &str) -> String {
    format!(
        r#"You are an expert web developer.
Task: {task}

Output ONLY a VALID JSON object with this exact structure:
{{
  "html": "...",
  "css": "...",
  "js": "..."
}}
Do not include markdown formatting (like ```json). Just the raw JSON string.
Ensure the code is complete and functional.
"#
    )
}

/// `generateContent` request body for a prompt.
#[must_use]
pub fn request_body(prompt: &str) -> Value {
    json!({ "contents": [{ "parts": [{ "text": prompt }] }] })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_task_and_shape() {
        let prompt = build_prompt("A red button");
        assert!(prompt.contains("Task: A red button"));
        assert!(prompt.contains(r#""html": "...""#));
        assert!(prompt.contains("Just the raw JSON string."));
    }

    #[test]
    fn body_nests_prompt_under_contents_parts() {
        let body = request_body("hi");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hi");
    }
}
