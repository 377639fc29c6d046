//! # refpdb Core Library
//!
//! Downloads the DNATCO reference conformer structures (PDB format) and emits them as a
//! generated TypeScript module that the viewer bundles at build time.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout so that each stage can be tested on its own:
//!
//! - **[`core`]: The Foundation.** Stateless data: the static list of reference identifiers,
//!   the ordered [`ReferenceMap`](core::mapping::ReferenceMap), and the reader/writer for the
//!   generated module.
//!
//! - **[`engine`]: The Fetch Logic.** Sources of reference text (the HTTP endpoint, or any other
//!   [`ReferenceSource`](engine::source::ReferenceSource)), fetch configuration, progress reporting
//!   and the fail-fast collection loop.
//!
//! - **[`workflows`]: The Public API.** Ties fetching, rendering and writing together into a
//!   single run that either produces the complete output file or nothing at all.

pub mod core;
pub mod engine;
pub mod workflows;
