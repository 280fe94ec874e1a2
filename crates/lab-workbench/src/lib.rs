//! # lab-workbench
//!
//! The host side of a codelab session. A [`Workbench`] owns the three pane
//! editors, the task fields, the host log and a preview surface, and exposes
//! every UI command: run, run with tests, open in a new surface, save, load,
//! clear log, activate pane and generate from task.
//!
//! Collaborators are traits so any front end can drive it:
//! [`Editor`] for editing surfaces, [`PreviewSurface`] for the render
//! target and [`CredentialPrompt`] for asking the user for an API key.

pub mod command;
pub mod credentials;
pub mod editor;
pub mod error;
pub mod keymap;
pub mod log;
pub mod panes;
pub mod surface;
pub mod workbench;

pub use command::Command;
pub use credentials::{CredentialPrompt, FixedPrompt, KeyResolver};
pub use editor::{BufferEditor, Editor};
pub use error::WorkbenchError;
pub use keymap::{Key, KeyScope, Modifiers};
pub use log::HostLog;
pub use panes::{EditorRegistry, PaneSwitcher, TabState, Transition};
pub use surface::{PreviewSurface, RecordingSurface};
pub use workbench::{GenerateOutcome, Workbench};
