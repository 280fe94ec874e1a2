use anyhow::Context;
use lab_schema::SchemaRegistry;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Handle `codelab schema [NAME]`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let registry = SchemaRegistry::new();
    let Some(name) = &args.name else {
        return output(&registry.list(), flags.format);
    };
    let schema = registry.get(name).with_context(|| {
        format!(
            "unknown schema '{name}' (available: {})",
            registry.list().join(", ")
        )
    })?;
    output(schema, flags.format)
}
