use std::io::{BufRead, IsTerminal, Write};

use anyhow::Context;
use lab_core::entities::ProjectDocument;
use lab_workbench::{CredentialPrompt, GenerateOutcome, KeyResolver};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::GenerateArgs;
use crate::context::{AppContext, print_log};
use crate::output::output;
use crate::surface::{CliSurface, RenderTarget};

#[derive(Serialize)]
struct GenerateResponse {
    generated: bool,
    note: Option<&'static str>,
    panes: Vec<&'static str>,
    export: Option<String>,
    project: ProjectDocument,
}

/// Asks for the key on the terminal. Without a terminal there is nobody to
/// ask, which counts as declining.
struct TerminalPrompt;

impl CredentialPrompt for TerminalPrompt {
    fn request(&mut self) -> Option<String> {
        let stdin = std::io::stdin();
        if !stdin.is_terminal() {
            return None;
        }
        eprintln!("Please enter your Gemini API Key to use this feature:");
        eprint!("(It will be saved locally) > ");
        let _ = std::io::stderr().flush();
        let mut line = String::new();
        stdin.lock().read_line(&mut line).ok()?;
        Some(line)
    }
}

/// Handle `codelab generate`.
pub async fn handle(args: &GenerateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let target = args
        .out
        .clone()
        .map_or(RenderTarget::Discard, RenderTarget::File);
    let mut workbench = ctx.workbench(&args.out_dir, CliSurface::new(target))?;
    let gateway = ctx.gateway()?;
    let store = ctx.credential_store()?;
    let keys = KeyResolver::new(Some(ctx.config.gemini.api_key.as_str()), &store);

    let result = workbench
        .generate(&args.task, &gateway, &keys, &mut TerminalPrompt)
        .await;
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(error) => {
            print_log(workbench.log(), flags);
            return Err(error).context("generation failed");
        }
    };

    let (panes, note): (Vec<&'static str>, Option<&'static str>) = match &outcome {
        GenerateOutcome::Applied(panes) => (panes.iter().map(|pane| pane.field()).collect(), None),
        GenerateOutcome::EmptyTask => (Vec::new(), Some("task is empty")),
        GenerateOutcome::Declined => (Vec::new(), Some("no API key provided")),
    };
    let generated = matches!(outcome, GenerateOutcome::Applied(_));

    let export = if args.save && generated {
        let saved = workbench.save();
        print_log(workbench.log(), flags);
        Some(saved.context("failed to save generated project")?)
    } else {
        print_log(workbench.log(), flags);
        None
    };

    output(
        &GenerateResponse {
            generated,
            note,
            panes,
            export: export.map(|path| path.display().to_string()),
            project: workbench.snapshot(),
        },
        flags.format,
    )
}
