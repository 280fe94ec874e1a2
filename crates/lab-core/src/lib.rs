//! # lab-core
//!
//! Core types shared by every codelab crate:
//! - `Pane` with its fixed cyclic ordering
//! - `Severity` and `LogEntry` for the host-owned log
//! - `ProjectDocument`, the canonical persisted/exchanged project shape
//! - The built-in starter project used when nothing is cached
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
