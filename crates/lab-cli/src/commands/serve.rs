use std::path::Path;
use std::sync::atomic::Ordering;

use anyhow::Context;
use lab_preview::{PreviewError, RelayServer, RunMode, compose_project};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ServeArgs;
use crate::context::AppContext;
use crate::output::output;

const PAGE_TITLE: &str = "codelab preview";

#[derive(Serialize)]
struct ServeResponse {
    url: String,
    tests: bool,
    project: Option<String>,
}

/// Handle `codelab serve`.
///
/// Every page load recomposes from the project source, so reloading the page
/// is a rerun. Relay messages from the sandbox are printed to stderr until
/// Ctrl-C.
pub async fn handle(args: &ServeArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let server = RelayServer::bind(args.port).context("failed to start preview server")?;
    let url = server.url();
    let shutdown = server.shutdown_handle();

    let store = ctx.project_store(Path::new("."))?;
    let project = args.project.clone();
    let mode = if args.tests {
        RunMode::WithTests
    } else {
        RunMode::Preview
    };
    let quiet = flags.quiet;

    let serving = tokio::task::spawn_blocking(move || {
        server.run(
            PAGE_TITLE,
            move || {
                let doc = match &project {
                    Some(path) => {
                        let bytes = std::fs::read(path)?;
                        lab_store::decode(&bytes)
                            .map_err(|e| PreviewError::Compose(format!("{}: {e}", path.display())))?
                    }
                    None => store.startup().document,
                };
                Ok(compose_project(&doc, mode))
            },
            move |entry| {
                if !quiet {
                    eprintln!(
                        "{:<5} {}",
                        entry.severity.as_str(),
                        lab_workbench::log::format_line(&entry)
                    );
                }
            },
        )
    });

    output(
        &ServeResponse {
            url: url.clone(),
            tests: args.tests,
            project: args.project.as_ref().map(|p| p.display().to_string()),
        },
        flags.format,
    )?;

    if ctx.config.general.auto_open {
        if let Err(error) = open::that(&url) {
            tracing::warn!(%error, %url, "failed to open browser");
        }
    }

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;
    shutdown.store(true, Ordering::Relaxed);

    serving
        .await
        .context("preview server task panicked")?
        .context("preview server failed")
}
