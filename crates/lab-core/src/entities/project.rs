use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Pane, ProjectKind};

/// Schema revision stamped on every canonical document.
pub const CURRENT_VERSION: u32 = 1;

const STARTER_HTML: &str = r#"<!-- Welcome card -->
<section class="card" style="max-width:520px;margin:24px auto;padding:18px;text-align:center">
  <h1>Welcome to the Live Web Code Editor</h1>
  <p>This example runs locally in the browser.</p>
  <button id="btn">Try me</button>
</section>"#;

const STARTER_CSS: &str = "body{font-family:system-ui;background:#f7fafc;margin:0}
h1{color:#0f172a}
#btn{padding:.75rem 1rem;border:0;border-radius:10px;background:#60a5fa;color:#08111f;font-weight:700}";

const STARTER_JS: &str = "document.getElementById('btn').addEventListener('click',()=>alert('Well done!'));
console.log('Hello from JavaScript!');";

/// Canonical project document: three pane sources plus task metadata.
///
/// Instances built from external bytes must come out of
/// `lab_schema::normalize`; constructing one directly is reserved for
/// snapshots of in-memory editor state.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProjectDocument {
    pub version: u32,
    pub kind: ProjectKind,
    /// Free-text task description.
    pub assignment: String,
    /// Script appended to `js` only in "with tests" runs.
    pub test: String,
    pub html: String,
    pub css: String,
    pub js: String,
}

impl Default for ProjectDocument {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            kind: ProjectKind::WebOnly,
            assignment: String::new(),
            test: String::new(),
            html: String::new(),
            css: String::new(),
            js: String::new(),
        }
    }
}

impl ProjectDocument {
    /// Built-in project shown when the cache slot is empty or unreadable.
    #[must_use]
    pub fn starter() -> Self {
        Self {
            html: STARTER_HTML.to_string(),
            css: STARTER_CSS.to_string(),
            js: STARTER_JS.to_string(),
            ..Self::default()
        }
    }

    /// Source text for a pane.
    #[must_use]
    pub fn source(&self, pane: Pane) -> &str {
        match pane {
            Pane::Markup => &self.html,
            Pane::Style => &self.css,
            Pane::Script => &self.js,
        }
    }

    pub fn set_source(&mut self, pane: Pane, text: impl Into<String>) {
        let slot = match pane {
            Pane::Markup => &mut self.html,
            Pane::Style => &mut self.css,
            Pane::Script => &mut self.js,
        };
        *slot = text.into();
    }
}
