//! # lab-store
//!
//! Persistence for codelab projects and the generation credential.
//!
//! - [`CacheSlot`]: the single named local slot (file-backed or in-memory)
//! - [`ExportSink`]: where saved projects are offered as a named file
//! - [`ProjectStore`]: save/load/startup over a slot and a sink, with every
//!   load passing through `lab_schema::normalize`
//! - [`CredentialStore`]: pluggable storage for the API key, with an OS
//!   keychain implementation that falls back to a `0600` file

pub mod credential;
pub mod error;
pub mod export;
pub mod project;
pub mod slot;

pub use credential::{CredentialStore, KeyringCredentialStore, MemoryCredentialStore};
pub use error::StoreError;
pub use export::{DirectoryExport, ExportSink, MemoryExport};
pub use project::{ProjectStore, SaveReport, Startup, StartupSource, decode};
pub use slot::{CacheSlot, FileCacheSlot, MemoryCacheSlot};
