//! # Workflows Module
//!
//! High-level entry points that run a complete job end to end.
//!
//! - **Generate Workflow** ([`generate`]) - Fetch every reference, render the TypeScript
//!   module and write it to the output path, optionally reading it back for verification.

pub mod generate;
