//! Document composition.
//!
//! Produces one self-contained HTML document from the three pane sources:
//!
//! ```text
//! <head>  relay shim  |  <style> style </style>
//! <body>  markup      |  <script> try { script  [tests] } catch (e) { console.error(e) } </script>
//! ```
//!
//! Sources are inserted verbatim. Isolation comes from the iframe the
//! document is rendered in, not from filtering its content.

use lab_core::entities::ProjectDocument;

use crate::shim;

/// Whether the test script takes part in a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    #[default]
    Preview,
    WithTests,
}

impl RunMode {
    #[must_use]
    pub const fn includes_tests(self) -> bool {
        matches!(self, Self::WithTests)
    }
}

/// Inputs to [`compose`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ComposeRequest<'a> {
    pub markup: &'a str,
    pub style: &'a str,
    pub script: &'a str,
    pub test_script: Option<&'a str>,
    pub mode: RunMode,
}

impl<'a> ComposeRequest<'a> {
    #[must_use]
    pub fn from_project(doc: &'a ProjectDocument, mode: RunMode) -> Self {
        Self {
            markup: &doc.html,
            style: &doc.css,
            script: &doc.js,
            test_script: Some(&doc.test),
            mode,
        }
    }

    /// Test script to append, if this run includes a non-blank one.
    fn effective_tests(&self) -> Option<&'a str> {
        if !self.mode.includes_tests() {
            return None;
        }
        self.test_script
            .map(str::trim)
            .filter(|tests| !tests.is_empty())
    }
}

/// Assemble a renderable document.
///
/// Deterministic: the same request always yields the same string. The test
/// script runs in the same `try` block as the user script, after it, so it
/// sees every global the script defined.
#[must_use]
pub fn compose(request: &ComposeRequest<'_>) -> String {
    let tests = request
        .effective_tests()
        .map(|tests| format!("\n/* tests */\n{tests}\n"))
        .unwrap_or_default();

    format!(
        r#"<!doctype html>
<html lang="en" dir="ltr">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<script>
{shim}
</script>
<style>
{style}
</style>
</head>
<body>
{markup}
<script>
try {{
{script}
{tests}
}} catch (e) {{ console.error(e); }}
</script>
</body>
</html>
"#,
        shim = shim::script(),
        style = request.style,
        markup = request.markup,
        script = request.script,
    )
}

/// Compose a project document's panes.
#[must_use]
pub fn compose_project(doc: &ProjectDocument, mode: RunMode) -> String {
    compose(&ComposeRequest::from_project(doc, mode))
}
