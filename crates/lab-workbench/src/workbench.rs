//! Command orchestration.
//!
//! Every operation turns its failure into a host log entry and also returns
//! it, so front ends can both show the log and pick an exit status.

use std::path::PathBuf;

use lab_core::entities::{LogEntry, ProjectDocument};
use lab_core::enums::Pane;
use lab_gemini::{GenerationGateway, Transport};
use lab_preview::{RunMode, compose_project};
use lab_store::{ProjectStore, StartupSource};

use crate::command::Command;
use crate::credentials::{CredentialPrompt, KeyResolver};
use crate::editor::BufferEditor;
use crate::error::WorkbenchError;
use crate::keymap::{self, Key, KeyScope, Modifiers};
use crate::log::HostLog;
use crate::panes::{EditorRegistry, PaneSwitcher, Transition};
use crate::surface::PreviewSurface;

pub const READY_MESSAGE: &str = "Ready — Web-only Editor (HTML/CSS/JS)";
pub const LOADED_MESSAGE: &str = "Project loaded.";
pub const PREVIEW_MESSAGE: &str = "Web preview updated.";
pub const TESTS_MESSAGE: &str = "Run with tests.";
pub const SAVED_MESSAGE: &str = "Saved locally and downloaded JSON file.";
pub const GENERATED_MESSAGE: &str = "Solution built by Gemini!";
pub const EMPTY_TASK_MESSAGE: &str = "Please describe the task first!";

/// Result of [`Workbench::generate`] when nothing failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// Generated code was merged; lists the panes that changed.
    Applied(Vec<Pane>),
    /// The task was blank; no request was made.
    EmptyTask,
    /// No API key was available and the user declined to give one.
    Declined,
}

pub struct Workbench<S> {
    panes: PaneSwitcher,
    assignment: String,
    test: String,
    log: HostLog,
    store: ProjectStore,
    surface: S,
}

impl<S: PreviewSurface> Workbench<S> {
    #[must_use]
    pub fn new(registry: EditorRegistry, store: ProjectStore, surface: S) -> Self {
        Self {
            panes: PaneSwitcher::new(registry),
            assignment: String::new(),
            test: String::new(),
            log: HostLog::default(),
            store,
            surface,
        }
    }

    /// Workbench over three in-memory editors.
    #[must_use]
    pub fn with_buffers(store: ProjectStore, surface: S) -> Self {
        Self::new(
            EditorRegistry::new(
                Box::new(BufferEditor::default()),
                Box::new(BufferEditor::default()),
                Box::new(BufferEditor::default()),
            ),
            store,
            surface,
        )
    }

    /// Populate the editors from the cache slot, or the starter project.
    pub fn start(&mut self) -> StartupSource {
        let startup = self.store.startup();
        self.apply(&startup.document);
        match &startup.source {
            StartupSource::Cache => self.log.info(LOADED_MESSAGE),
            StartupSource::StarterAfterError(error) => {
                self.log.warn(format!("Skipping auto-restore: {error}"));
            }
            StartupSource::Starter => {}
        }
        self.panes.activate(Pane::Markup);
        self.log.info(READY_MESSAGE);
        startup.source
    }

    // ── Editor state ───────────────────────────────────────────────

    /// Current editor contents as a project document.
    #[must_use]
    pub fn snapshot(&self) -> ProjectDocument {
        let registry = self.panes.registry();
        ProjectDocument {
            assignment: self.assignment.clone(),
            test: self.test.clone(),
            html: registry.get(Pane::Markup).text(),
            css: registry.get(Pane::Style).text(),
            js: registry.get(Pane::Script).text(),
            ..ProjectDocument::default()
        }
    }

    fn apply(&mut self, doc: &ProjectDocument) {
        self.assignment.clone_from(&doc.assignment);
        self.test.clone_from(&doc.test);
        for pane in Pane::ORDER {
            self.panes.registry_mut().get_mut(pane).set_text(doc.source(pane));
        }
    }

    #[must_use]
    pub fn source(&self, pane: Pane) -> String {
        self.panes.registry().get(pane).text()
    }

    pub fn set_source(&mut self, pane: Pane, text: &str) {
        self.panes.registry_mut().get_mut(pane).set_text(text);
    }

    #[must_use]
    pub fn assignment(&self) -> &str {
        &self.assignment
    }

    pub fn set_assignment(&mut self, text: impl Into<String>) {
        self.assignment = text.into();
    }

    #[must_use]
    pub fn test(&self) -> &str {
        &self.test
    }

    pub fn set_test(&mut self, text: impl Into<String>) {
        self.test = text.into();
    }

    #[must_use]
    pub const fn panes(&self) -> &PaneSwitcher {
        &self.panes
    }

    #[must_use]
    pub const fn log(&self) -> &HostLog {
        &self.log
    }

    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    // ── Commands ───────────────────────────────────────────────────

    /// Composed document for the current editors.
    #[must_use]
    pub fn compose(&self, mode: RunMode) -> String {
        compose_project(&self.snapshot(), mode)
    }

    /// Recompose and replace the preview.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::Surface`] if the surface rejects the document.
    pub fn run(&mut self, mode: RunMode) -> Result<(), WorkbenchError> {
        let document = self.compose(mode);
        if let Err(error) = self.surface.render(&document) {
            self.log.error(format!("Unable to update preview: {error}"));
            return Err(error);
        }
        self.log.info(if mode.includes_tests() {
            TESTS_MESSAGE
        } else {
            PREVIEW_MESSAGE
        });
        Ok(())
    }

    /// Open the current project, without tests, in a new surface.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::Surface`] if no surface can be opened.
    pub fn open_preview(&mut self) -> Result<(), WorkbenchError> {
        let document = self.compose(RunMode::Preview);
        self.surface.open_detached(&document).map_err(|error| {
            self.log.error(format!("Unable to open preview: {error}"));
            error
        })
    }

    /// Save to the cache slot and export. The export is attempted even when
    /// the cache write fails.
    ///
    /// # Errors
    ///
    /// Returns the first failure of the two, cache before export.
    pub fn save(&mut self) -> Result<PathBuf, WorkbenchError> {
        let doc = self.snapshot();
        let report = match self.store.save(&doc) {
            Ok(report) => report,
            Err(error) => {
                self.log.error(format!("Unable to save: {error}"));
                return Err(error.into());
            }
        };

        match (&report.cached, &report.exported) {
            (Ok(()), Ok(_)) => self.log.info(SAVED_MESSAGE),
            (Err(error), Ok(path)) => {
                self.log.error(format!("Unable to save: {error}"));
                self.log.info(format!("Downloaded {}.", path.display()));
            }
            (cached, Err(error)) => {
                if let Err(cache_error) = cached {
                    self.log.error(format!("Unable to save: {cache_error}"));
                }
                self.log.error(format!("Unable to save: {error}"));
            }
        }
        Ok(report.into_result()?)
    }

    /// Load project bytes. On failure the editors are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`lab_store::StoreError::Parse`] or
    /// [`lab_store::StoreError::InvalidInput`] wrapped in [`WorkbenchError::Store`].
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), WorkbenchError> {
        match self.store.load(bytes) {
            Ok(doc) => {
                self.apply(&doc);
                self.log.info(LOADED_MESSAGE);
                Ok(())
            }
            Err(error) => {
                self.log.error(format!("Invalid project file: {error}"));
                Err(error.into())
            }
        }
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    pub fn activate_pane(&mut self, pane: Pane) -> Transition {
        self.panes.activate(pane)
    }

    /// Append an entry that arrived from the sandbox.
    pub fn record(&mut self, entry: LogEntry) {
        self.log.push(entry);
    }

    /// Run a synchronous command.
    ///
    /// # Errors
    ///
    /// Propagates the failure of the underlying operation.
    pub fn dispatch(&mut self, command: Command) -> Result<(), WorkbenchError> {
        match command {
            Command::RunPreview => self.run(RunMode::Preview),
            Command::RunWithTests => self.run(RunMode::WithTests),
            Command::OpenPreview => self.open_preview(),
            Command::Save => self.save().map(|_| ()),
            Command::ClearLog => {
                self.clear_log();
                Ok(())
            }
            Command::ActivatePane(pane) => {
                self.activate_pane(pane);
                Ok(())
            }
            Command::NextPane => {
                self.panes.next();
                Ok(())
            }
            Command::PreviousPane => {
                self.panes.previous();
                Ok(())
            }
        }
    }

    /// Run whatever `key` is bound to in `scope`; `None` if it is unbound.
    pub fn handle_key(
        &mut self,
        scope: KeyScope,
        key: Key,
        modifiers: Modifiers,
    ) -> Option<Result<(), WorkbenchError>> {
        keymap::resolve(scope, key, modifiers).map(|command| self.dispatch(command))
    }

    /// Generate pane sources for `task`, merge them and rerun the preview.
    ///
    /// A blank task only logs a warning. Without a configured or stored key
    /// the user is prompted once; declining makes this a no-op. A rejected
    /// key is discarded from the store.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::Generation`] for gateway failures and
    /// [`WorkbenchError::Store`] if a prompted key cannot be stored.
    pub async fn generate<T: Transport>(
        &mut self,
        task: &str,
        gateway: &GenerationGateway<T>,
        keys: &KeyResolver<'_>,
        prompt: &mut dyn CredentialPrompt,
    ) -> Result<GenerateOutcome, WorkbenchError> {
        let task = task.trim();
        if task.is_empty() {
            self.log.warn(EMPTY_TASK_MESSAGE);
            return Ok(GenerateOutcome::EmptyTask);
        }

        let key = match keys.resolve(prompt) {
            Ok(Some(key)) => key,
            Ok(None) => return Ok(GenerateOutcome::Declined),
            Err(error) => {
                self.log.error(format!("Gemini Error: {error}"));
                return Err(error.into());
            }
        };

        let code = match gateway.generate(task, &key).await {
            Ok(code) => code,
            Err(error) => {
                self.log.error(format!("Gemini Error: {error}"));
                if error.is_authorization() {
                    if let Err(discard_error) = keys.discard() {
                        tracing::warn!(%discard_error, "failed to discard rejected API key");
                    }
                }
                return Err(error.into());
            }
        };

        let mut doc = self.snapshot();
        let changed = code.apply_to(&mut doc);
        for pane in &changed {
            self.set_source(*pane, doc.source(*pane));
        }
        self.log.info(GENERATED_MESSAGE);
        self.run(RunMode::Preview)?;
        Ok(GenerateOutcome::Applied(changed))
    }
}
