//! # Core Module
//!
//! Stateless building blocks shared by the fetch engine and the workflows.
//!
//! - **Identifiers** ([`references`]) - The static, ordered list of reference conformer codes
//! - **Mapping** ([`mapping`]) - The ordered identifier-to-text association built by a run
//! - **File I/O** ([`io`]) - Rendering and reading back the generated TypeScript module

pub mod io;
pub mod mapping;
pub mod references;
