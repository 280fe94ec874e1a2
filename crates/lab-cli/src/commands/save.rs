use std::path::Path;

use anyhow::Context;
use lab_core::enums::Pane;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SaveArgs;
use crate::context::{AppContext, print_log};
use crate::output::output;
use crate::surface::{CliSurface, RenderTarget};

#[derive(Serialize)]
struct SaveResponse {
    export: String,
    cache_key: String,
}

fn read_source(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Handle `codelab save`: apply the given sources over the current project,
/// then write the cache slot and the export file.
pub fn handle(args: &SaveArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut workbench = ctx.workbench(&args.out_dir, CliSurface::new(RenderTarget::Discard))?;

    for (pane, file) in [
        (Pane::Markup, &args.html),
        (Pane::Style, &args.css),
        (Pane::Script, &args.js),
    ] {
        if let Some(path) = file {
            workbench.set_source(pane, &read_source(path)?);
        }
    }
    if let Some(assignment) = &args.assignment {
        workbench.set_assignment(assignment.clone());
    }
    if let Some(path) = &args.test {
        workbench.set_test(read_source(path)?);
    }

    let result = workbench.save();
    print_log(workbench.log(), flags);
    let exported = result.context("failed to save project")?;

    output(
        &SaveResponse {
            export: exported.display().to_string(),
            cache_key: ctx.config.storage.cache_key.clone(),
        },
        flags.format,
    )
}
