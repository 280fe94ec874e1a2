use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Run(args) => commands::run::handle(&args, ctx, flags),
        Commands::Open(args) => commands::open::handle(&args, ctx, flags),
        Commands::Serve(args) => commands::serve::handle(&args, ctx, flags).await,
        Commands::Save(args) => commands::save::handle(&args, ctx, flags),
        Commands::Load(args) => commands::load::handle(&args, ctx, flags),
        Commands::Generate(args) => commands::generate::handle(&args, ctx, flags).await,
        Commands::Credential { action } => commands::credential::handle(&action, ctx, flags),
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
