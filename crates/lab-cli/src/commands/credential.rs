use lab_store::CredentialStore;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CredentialCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct CredentialStatusResponse {
    available: bool,
    source: Option<&'static str>,
    note: Option<String>,
}

#[derive(Serialize)]
struct CredentialClearResponse {
    cleared: bool,
}

/// Handle `codelab credential <subcommand>`.
pub fn handle(
    action: &CredentialCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let store = ctx.credential_store()?;
    match action {
        CredentialCommands::Status => {
            let status = if ctx.config.gemini.has_api_key() {
                CredentialStatusResponse {
                    available: true,
                    source: Some("config"),
                    note: Some("CODELAB_GEMINI__API_KEY or gemini.api_key is set".into()),
                }
            } else {
                let source = store.source();
                CredentialStatusResponse {
                    available: source.is_some(),
                    source,
                    note: source
                        .is_none()
                        .then(|| "no API key stored; `codelab generate` will ask for one".into()),
                }
            };
            output(&status, flags.format)
        }
        CredentialCommands::Clear => {
            store.delete()?;
            output(&CredentialClearResponse { cleared: true }, flags.format)
        }
    }
}
