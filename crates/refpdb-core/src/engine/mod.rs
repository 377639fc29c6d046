//! # Engine Module
//!
//! Fetches reference conformer texts and collects them into a complete
//! [`ReferenceMap`](crate::core::mapping::ReferenceMap).
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Base URL, identifier selection, retry and timeout settings
//! - **Sources** ([`source`]) - The [`ReferenceSource`](source::ReferenceSource) seam and its HTTP implementation
//! - **Fetching** ([`fetch`]) - The sequential, fail-fast collection loop
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events for front ends
//! - **Error Handling** ([`error`]) - Fetch and pipeline error types
//!
//! Requests are issued strictly one after another. The first identifier that cannot be
//! fetched aborts the whole run and nothing collected so far is returned.

pub mod config;
pub mod error;
pub mod fetch;
pub mod progress;
pub mod source;
