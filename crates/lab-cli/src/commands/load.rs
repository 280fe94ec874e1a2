use std::path::Path;

use anyhow::Context;
use lab_core::entities::ProjectDocument;
use lab_schema::SchemaRegistry;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::LoadArgs;
use crate::context::{AppContext, print_log};
use crate::output::output;
use crate::surface::{CliSurface, RenderTarget};

/// Handle `codelab load`: normalize a project file and print it.
pub fn handle(args: &LoadArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let mut workbench = ctx.workbench(Path::new("."), CliSurface::new(RenderTarget::Discard))?;
    let result = workbench.load(&bytes);
    print_log(workbench.log(), flags);
    result.with_context(|| format!("failed to load {}", args.file.display()))?;

    output(&canonical(workbench.snapshot())?, flags.format)
}

/// Check `doc` against the canonical project schema before it is printed.
fn canonical(doc: ProjectDocument) -> anyhow::Result<ProjectDocument> {
    SchemaRegistry::new()
        .validate_project(&doc)
        .context("loaded project does not match the canonical schema")?;
    Ok(doc)
}
