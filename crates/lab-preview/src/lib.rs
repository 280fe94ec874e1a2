//! # lab-preview
//!
//! Turns three pane sources into one sandboxed, self-reporting document.
//!
//! - [`compose`]: pure, deterministic document assembly
//! - [`shim`]: the console relay script injected ahead of all user code
//! - [`RelayMessage`]: the single typed message the sandbox may send its host
//! - [`host_page`] and [`RelayServer`]: a local page embedding the document in
//!   an opaque-origin iframe, forwarding relay messages back to the process

pub mod compose;
pub mod escape;
pub mod host_page;
pub mod relay;
pub mod server;
pub mod shim;

mod error;

pub use compose::{ComposeRequest, RunMode, compose, compose_project};
pub use error::PreviewError;
pub use relay::{RELAY_CHANNEL, RelayMessage};
pub use server::RelayServer;
