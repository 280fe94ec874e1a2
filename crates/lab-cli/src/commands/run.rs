use anyhow::Context;
use lab_preview::RunMode;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RunArgs;
use crate::context::{AppContext, print_log};
use crate::output::output;
use crate::surface::{CliSurface, RenderTarget};

#[derive(Serialize)]
struct RunResponse {
    document: String,
    tests: bool,
    bytes: usize,
}

/// Handle `codelab run`.
pub fn handle(args: &RunArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let target = args
        .out
        .clone()
        .map_or(RenderTarget::Stdout, RenderTarget::File);
    let mut workbench =
        ctx.workbench_with_project(args.project.as_deref(), CliSurface::new(target))?;

    let mode = if args.tests {
        RunMode::WithTests
    } else {
        RunMode::Preview
    };
    let result = workbench.run(mode);
    print_log(workbench.log(), flags);
    result.context("failed to render preview")?;

    if let Some(out) = &args.out {
        let response = RunResponse {
            document: out.display().to_string(),
            tests: args.tests,
            bytes: workbench.compose(mode).len(),
        };
        output(&response, flags.format)?;
    }
    Ok(())
}
