use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::OpenArgs;
use crate::context::{AppContext, print_log};
use crate::output::output;
use crate::surface::{CliSurface, RenderTarget};

#[derive(Serialize)]
struct OpenResponse {
    opened: String,
}

/// Handle `codelab open`. The opened document never includes tests.
pub fn handle(args: &OpenArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut workbench = ctx.workbench_with_project(
        args.project.as_deref(),
        CliSurface::new(RenderTarget::Discard),
    )?;

    let result = workbench.open_preview();
    print_log(workbench.log(), flags);
    result.context("failed to open preview")?;

    let opened = workbench
        .surface()
        .opened()
        .last()
        .map(|path| path.display().to_string())
        .unwrap_or_default();
    output(&OpenResponse { opened }, flags.format)
}
