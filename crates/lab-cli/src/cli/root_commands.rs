use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Compose the project and write the preview document.
    Run(RunArgs),
    /// Open the test-free preview in a browser.
    Open(OpenArgs),
    /// Serve the preview with a live console relay.
    Serve(ServeArgs),
    /// Save the project to the local cache and export it.
    Save(SaveArgs),
    /// Load a project file and print it in canonical form.
    Load(LoadArgs),
    /// Generate the project from a task description.
    Generate(GenerateArgs),
    /// Print a JSON Schema.
    Schema(SchemaArgs),
    /// Manage the stored generation API key.
    Credential {
        #[command(subcommand)]
        action: CredentialCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct RunArgs {
    /// Append the project's test script.
    #[arg(long)]
    pub tests: bool,
    /// Project file to run instead of the cached project.
    #[arg(long)]
    pub project: Option<PathBuf>,
    /// Write the document here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct OpenArgs {
    /// Project file to open instead of the cached project.
    #[arg(long)]
    pub project: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Append the project's test script on every load.
    #[arg(long)]
    pub tests: bool,
    /// Project file to serve instead of the cached project. Re-read on reload.
    #[arg(long)]
    pub project: Option<PathBuf>,
    /// Port to bind on 127.0.0.1 (0 picks a free port).
    #[arg(long, default_value_t = 0)]
    pub port: u16,
}

#[derive(Clone, Debug, Args)]
pub struct SaveArgs {
    /// File whose contents replace the markup pane.
    #[arg(long)]
    pub html: Option<PathBuf>,
    /// File whose contents replace the style pane.
    #[arg(long)]
    pub css: Option<PathBuf>,
    /// File whose contents replace the script pane.
    #[arg(long)]
    pub js: Option<PathBuf>,
    /// Task description.
    #[arg(long)]
    pub assignment: Option<String>,
    /// File whose contents replace the test script.
    #[arg(long)]
    pub test: Option<PathBuf>,
    /// Directory receiving the exported project file.
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct LoadArgs {
    /// Project file (current or legacy shape).
    pub file: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct GenerateArgs {
    /// What to build.
    pub task: String,
    /// Save the result to the cache and export it.
    #[arg(long)]
    pub save: bool,
    /// Directory receiving the export when saving.
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
    /// Write the refreshed preview document here.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Schema name; omit to list the available names.
    pub name: Option<String>,
}

/// Credential commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CredentialCommands {
    /// Show where the API key comes from.
    Status,
    /// Discard the stored API key.
    Clear,
}
