//! # lab-gemini
//!
//! Generates a project's three pane sources from a task description.
//!
//! [`GenerationGateway`] walks an ordered list of model identifiers through a
//! [`Transport`]. "Model not found" and "rate limited" move on to the next
//! model; any other failure stops the walk. The first success is unwrapped
//! (`candidates[0].content.parts[0].text`), stripped of markdown code fences
//! and parsed into a [`GeneratedCode`], which only carries the fields the
//! service actually produced.

mod error;
mod gateway;
mod http;
mod prompt;
mod response;
mod transport;

pub use error::GenerationError;
pub use gateway::GenerationGateway;
pub use prompt::{build_prompt, request_body};
pub use response::{GeneratedCode, extract_text, parse_generated, strip_code_fences};
pub use transport::{HttpTransport, Transport};
