//! Provides input/output for the generated reference module.
//!
//! The module is a TypeScript source file that embeds every reference PDB as a raw
//! template literal. This module renders it from a [`ReferenceMap`](super::mapping::ReferenceMap),
//! writes it to disk and parses it back for verification.

pub mod module;
pub(crate) mod template;
