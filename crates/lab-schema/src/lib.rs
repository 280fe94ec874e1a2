//! # lab-schema
//!
//! The trusted boundary between external bytes and editor state.
//!
//! - [`normalize`]: converts any structured JSON value (current, flat legacy,
//!   or nested `web` legacy shape) into the canonical
//!   [`ProjectDocument`](lab_core::entities::ProjectDocument)
//! - [`SchemaRegistry`]: JSON Schemas generated from `lab-core` types, used
//!   to validate documents and to export the schema for external tooling

mod error;
mod normalize;
mod registry;

pub use error::SchemaError;
pub use normalize::normalize;
pub use registry::SchemaRegistry;
