use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use lab_config::CodelabConfig;
use lab_gemini::{GenerationGateway, HttpTransport};
use lab_store::{DirectoryExport, FileCacheSlot, KeyringCredentialStore, ProjectStore};
use lab_workbench::{HostLog, PreviewSurface, Workbench};

use crate::cli::GlobalFlags;

/// Everything a command needs, built from configuration.
pub struct AppContext {
    pub config: CodelabConfig,
}

impl AppContext {
    pub const fn new(config: CodelabConfig) -> Self {
        Self { config }
    }

    /// Store over the configured cache slot, exporting into `export_dir`.
    pub fn project_store(&self, export_dir: &Path) -> anyhow::Result<ProjectStore> {
        let storage = &self.config.storage;
        let cache_dir = storage
            .resolved_cache_dir()
            .context("no local data directory; set storage.cache_dir")?;
        Ok(ProjectStore::new(
            Box::new(FileCacheSlot::new(&cache_dir, &storage.cache_key)),
            Box::new(DirectoryExport::new(export_dir)),
            storage.export_file_name.clone(),
        ))
    }

    /// Started workbench. Editors hold the cached project or the starter.
    pub fn workbench<S: PreviewSurface>(
        &self,
        export_dir: &Path,
        surface: S,
    ) -> anyhow::Result<Workbench<S>> {
        let mut workbench = Workbench::with_buffers(self.project_store(export_dir)?, surface);
        workbench.start();
        Ok(workbench)
    }

    /// Started workbench with a project file loaded on top.
    pub fn workbench_with_project<S: PreviewSurface>(
        &self,
        project: Option<&Path>,
        surface: S,
    ) -> anyhow::Result<Workbench<S>> {
        let mut workbench = self.workbench(Path::new("."), surface)?;
        if let Some(path) = project {
            let bytes = std::fs::read(path)
                .with_context(|| format!("failed to read project file {}", path.display()))?;
            workbench
                .load(&bytes)
                .with_context(|| format!("failed to load project file {}", path.display()))?;
        }
        Ok(workbench)
    }

    pub fn credential_store(&self) -> anyhow::Result<KeyringCredentialStore> {
        KeyringCredentialStore::new(self.config.general.keyring_service.clone())
            .context("failed to locate credential storage")
    }

    pub fn gateway(&self) -> anyhow::Result<GenerationGateway<HttpTransport>> {
        let gemini = &self.config.gemini;
        let transport = HttpTransport::new(
            gemini.base_url.clone(),
            Duration::from_secs(gemini.timeout_secs),
        )
        .context("failed to build HTTP client")?;
        Ok(GenerationGateway::new(transport, gemini.models.clone()))
    }
}

/// Echo the host log to stderr unless `--quiet`.
pub fn print_log(log: &HostLog, flags: &GlobalFlags) {
    if flags.quiet {
        return;
    }
    for entry in log.entries() {
        eprintln!(
            "{:<5} {}",
            entry.severity.as_str(),
            lab_workbench::log::format_line(entry)
        );
    }
}
