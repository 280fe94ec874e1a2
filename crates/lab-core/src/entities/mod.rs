//! Entity structs for codelab.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! roundtrip and schema validation.

mod log;
mod project;

pub use log::LogEntry;
pub use project::{CURRENT_VERSION, ProjectDocument};
