//! Whole-session behavior of the workbench.

use std::collections::VecDeque;
use std::sync::Mutex;

use lab_core::entities::ProjectDocument;
use lab_core::enums::{Pane, Severity};
use lab_gemini::{GenerationError, GenerationGateway, Transport};
use lab_store::{
    CacheSlot, CredentialStore, DirectoryExport, FileCacheSlot, MemoryCacheSlot,
    MemoryCredentialStore, MemoryExport, ProjectStore, StartupSource,
};
use lab_workbench::{
    FixedPrompt, GenerateOutcome, Key, KeyResolver, KeyScope, Modifiers, RecordingSurface,
    Workbench, WorkbenchError,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn memory_workbench(slot: MemoryCacheSlot) -> Workbench<RecordingSurface> {
    let store = ProjectStore::new(
        Box::new(slot),
        Box::new(MemoryExport::default()),
        "Code-web.json",
    );
    Workbench::with_buffers(store, RecordingSurface::default())
}

fn file_workbench(dir: &std::path::Path, slot: Box<dyn CacheSlot>) -> Workbench<RecordingSurface> {
    let store = ProjectStore::new(slot, Box::new(DirectoryExport::new(dir)), "Code-web.json");
    Workbench::with_buffers(store, RecordingSurface::default())
}

fn messages(wb: &Workbench<RecordingSurface>) -> Vec<String> {
    wb.log().entries().iter().map(|e| e.message.clone()).collect()
}

// ── Startup ────────────────────────────────────────────────────────

#[test]
fn empty_cache_starts_with_starter_project() {
    let mut wb = memory_workbench(MemoryCacheSlot::default());
    assert_eq!(wb.start(), StartupSource::Starter);
    assert_eq!(wb.snapshot(), ProjectDocument::starter());
    assert_eq!(messages(&wb), ["Ready — Web-only Editor (HTML/CSS/JS)"]);
    assert_eq!(wb.panes().active(), Pane::Markup);
}

#[test]
fn cached_project_is_restored_on_start() {
    let mut wb = memory_workbench(MemoryCacheSlot::with_value(
        r#"{"web":{"js":"old()"},"task":"legacy task"}"#,
    ));
    assert_eq!(wb.start(), StartupSource::Cache);
    assert_eq!(wb.source(Pane::Script), "old()");
    assert_eq!(wb.assignment(), "legacy task");
    assert_eq!(
        messages(&wb),
        ["Project loaded.", "Ready — Web-only Editor (HTML/CSS/JS)"]
    );
}

#[test]
fn corrupt_cache_is_reported_on_start() {
    let mut wb = memory_workbench(MemoryCacheSlot::with_value("not json"));
    assert!(matches!(wb.start(), StartupSource::StarterAfterError(_)));
    assert_eq!(wb.snapshot(), ProjectDocument::starter());

    let entries = wb.log().entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].severity, Severity::Warn);
    assert!(entries[0].message.starts_with("Skipping auto-restore: invalid project file:"));
    assert_eq!(entries[1].message, "Ready — Web-only Editor (HTML/CSS/JS)");
}

// ── Save / load ────────────────────────────────────────────────────

#[test]
fn saved_project_loads_back_into_editors() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let mut wb = file_workbench(
        tmp.path(),
        Box::new(FileCacheSlot::new(tmp.path(), "academy-codelab-web")),
    );
    wb.start();
    wb.set_assignment("");
    wb.set_test("");
    wb.set_source(Pane::Markup, "<p>x</p>");
    wb.set_source(Pane::Style, "");
    wb.set_source(Pane::Script, "console.log(1)");

    let exported = wb.save().expect("save");
    assert_eq!(wb.log().last().unwrap().message, "Saved locally and downloaded JSON file.");

    let mut other = memory_workbench(MemoryCacheSlot::default());
    other.start();
    other.load(&std::fs::read(exported).expect("read")).expect("load");

    assert_eq!(other.source(Pane::Markup), "<p>x</p>");
    assert_eq!(other.source(Pane::Style), "");
    assert_eq!(other.source(Pane::Script), "console.log(1)");
    assert_eq!(other.assignment(), "");
    assert_eq!(other.test(), "");
    assert_eq!(other.log().last().unwrap().message, "Project loaded.");
}

#[test]
fn rejected_cache_write_still_exports() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let mut wb = file_workbench(tmp.path(), Box::new(MemoryCacheSlot::rejecting_writes()));
    wb.start();

    let err = wb.save().unwrap_err();
    assert!(matches!(
        err,
        WorkbenchError::Store(lab_store::StoreError::PersistenceWrite { .. })
    ));
    assert!(tmp.path().join("Code-web.json").exists());
    assert!(messages(&wb).iter().any(|m| m.starts_with("Unable to save:")));
}

#[test]
fn invalid_load_leaves_editors_unchanged() {
    let mut wb = memory_workbench(MemoryCacheSlot::default());
    wb.start();
    let before = wb.snapshot();

    let inputs: [&[u8]; 4] = [b"{broken", b"42", b"null", b"[]"];
    for bytes in inputs {
        assert!(wb.load(bytes).is_err());
        assert_eq!(wb.snapshot(), before);
        let last = wb.log().last().unwrap();
        assert_eq!(last.severity, Severity::Error);
        assert!(last.message.starts_with("Invalid project file:"));
    }
}

// ── Running ────────────────────────────────────────────────────────

#[test]
fn run_modes_and_detached_preview() {
    let mut wb = memory_workbench(MemoryCacheSlot::default());
    wb.start();
    wb.set_test("assertVisible('#btn')");

    wb.run(lab_preview::RunMode::Preview).unwrap();
    let preview = wb.surface().current().unwrap().to_string();
    assert!(preview.contains("Welcome to the Live Web Code Editor"));
    assert!(!preview.contains("assertVisible"));
    assert_eq!(wb.log().last().unwrap().message, "Web preview updated.");

    wb.run(lab_preview::RunMode::WithTests).unwrap();
    assert!(wb.surface().current().unwrap().contains("/* tests */\nassertVisible('#btn')"));
    assert_eq!(wb.log().last().unwrap().message, "Run with tests.");
    assert_eq!(wb.surface().renders(), 2);

    wb.open_preview().unwrap();
    assert_eq!(wb.surface().detached().len(), 1);
    assert!(!wb.surface().detached()[0].contains("assertVisible"));
}

#[test]
fn keymap_drives_commands() {
    let mut wb = memory_workbench(MemoryCacheSlot::default());
    wb.start();

    wb.handle_key(KeyScope::Editor, Key::Enter, Modifiers::META)
        .expect("bound")
        .unwrap();
    assert_eq!(wb.surface().renders(), 1);

    wb.handle_key(KeyScope::TabStrip, Key::ArrowLeft, Modifiers::NONE)
        .expect("bound")
        .unwrap();
    assert_eq!(wb.panes().active(), Pane::Script);

    assert!(wb
        .handle_key(KeyScope::Editor, Key::Char('q'), Modifiers::CTRL)
        .is_none());
}

#[test]
fn clear_log_empties_it() {
    let mut wb = memory_workbench(MemoryCacheSlot::default());
    wb.start();
    wb.dispatch("clear-log".parse().unwrap()).unwrap();
    assert!(wb.log().is_empty());
}

// ── Generation ─────────────────────────────────────────────────────

#[derive(Default)]
struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Result<Value, GenerationError>>>,
    calls: Mutex<usize>,
}

impl ScriptedTransport {
    fn new(outcomes: Vec<Result<Value, GenerationError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: Mutex::new(0),
        }
    }

    fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, _model: &str, _key: &str, _body: &Value) -> Result<Value, GenerationError> {
        *self.calls.lock().unwrap() += 1;
        self.outcomes.lock().unwrap().pop_front().expect("unexpected request")
    }
}

fn gateway(outcomes: Vec<Result<Value, GenerationError>>) -> GenerationGateway<ScriptedTransport> {
    GenerationGateway::new(
        ScriptedTransport::new(outcomes),
        vec!["a".into(), "b".into()],
    )
}

fn generated(text: &str) -> Result<Value, GenerationError> {
    Ok(json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] }))
}

#[tokio::test]
async fn blank_task_makes_no_request() {
    let mut wb = memory_workbench(MemoryCacheSlot::default());
    wb.start();
    let gateway = gateway(Vec::new());
    let store = MemoryCredentialStore::with_secret("k");

    let outcome = wb
        .generate("   ", &gateway, &KeyResolver::new(None, &store), &mut FixedPrompt::declining())
        .await
        .unwrap();

    assert_eq!(outcome, GenerateOutcome::EmptyTask);
    assert_eq!(gateway.transport().calls(), 0);
    let last = wb.log().last().unwrap();
    assert_eq!(last.severity, Severity::Warn);
    assert_eq!(last.message, "Please describe the task first!");
}

#[tokio::test]
async fn declined_prompt_is_a_no_op() {
    let mut wb = memory_workbench(MemoryCacheSlot::default());
    wb.start();
    let before = wb.snapshot();
    let gateway = gateway(Vec::new());
    let store = MemoryCredentialStore::default();

    let outcome = wb
        .generate("Make a clock", &gateway, &KeyResolver::new(None, &store), &mut FixedPrompt::declining())
        .await
        .unwrap();

    assert_eq!(outcome, GenerateOutcome::Declined);
    assert_eq!(gateway.transport().calls(), 0);
    assert_eq!(wb.snapshot(), before);
}

#[tokio::test]
async fn partial_result_merges_and_reruns_preview() {
    let mut wb = memory_workbench(MemoryCacheSlot::default());
    wb.start();
    let starter_css = wb.source(Pane::Style);
    let gateway = gateway(vec![
        Err(GenerationError::ModelNotFound { model: "a".into() }),
        generated("```json\n{\"html\":\"<h1>Clock</h1>\",\"js\":\"tick()\"}\n```"),
    ]);
    let store = MemoryCredentialStore::default();
    let mut prompt = FixedPrompt::answering("typed-key");

    let outcome = wb
        .generate("Make a clock", &gateway, &KeyResolver::new(None, &store), &mut prompt)
        .await
        .unwrap();

    assert_eq!(outcome, GenerateOutcome::Applied(vec![Pane::Markup, Pane::Script]));
    assert_eq!(wb.source(Pane::Markup), "<h1>Clock</h1>");
    assert_eq!(wb.source(Pane::Style), starter_css);
    assert_eq!(wb.source(Pane::Script), "tick()");
    assert_eq!(store.load().as_deref(), Some("typed-key"));

    let rendered = wb.surface().current().unwrap();
    assert!(rendered.contains("<h1>Clock</h1>"));
    let tail: Vec<_> = messages(&wb).into_iter().rev().take(2).collect();
    assert_eq!(tail, ["Web preview updated.", "Solution built by Gemini!"]);
}

#[tokio::test]
async fn rejected_key_is_discarded() {
    let mut wb = memory_workbench(MemoryCacheSlot::default());
    wb.start();
    let gateway = gateway(vec![Err(GenerationError::Authorization {
        status: 400,
        message: "API key not valid".into(),
    })]);
    let store = MemoryCredentialStore::with_secret("bad-key");

    let err = wb
        .generate("Make a clock", &gateway, &KeyResolver::new(None, &store), &mut FixedPrompt::declining())
        .await
        .unwrap_err();

    assert!(matches!(err, WorkbenchError::Generation(ref e) if e.is_authorization()));
    assert!(store.load().is_none());
    assert!(wb.log().last().unwrap().message.starts_with("Gemini Error:"));
    assert_eq!(wb.surface().renders(), 0);
}

#[tokio::test]
async fn exhausted_models_keep_the_key() {
    let mut wb = memory_workbench(MemoryCacheSlot::default());
    wb.start();
    let gateway = gateway(vec![
        Err(GenerationError::RateLimited {
            model: "a".into(),
            retry_after_secs: None,
        }),
        Err(GenerationError::ModelNotFound { model: "b".into() }),
    ]);
    let store = MemoryCredentialStore::with_secret("good-key");

    let err = wb
        .generate("Make a clock", &gateway, &KeyResolver::new(None, &store), &mut FixedPrompt::declining())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        WorkbenchError::Generation(GenerationError::Unavailable { attempts: 2, .. })
    ));
    assert_eq!(store.load().as_deref(), Some("good-key"));
}
