//! # Dossier Architecture
//!
//! Dossier is a **UI-agnostic library** for assembling curated page
//! collections ("dossiers") out of uploaded paginated documents. The bundled
//! shell is one client; a browser or desktop front end would be another.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Reads shell lines, formats output, handles terminal I/O  │
//! │  - The ONLY place that knows about stdout/stderr            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the session: catalog, registry, selections          │
//! │  - Normalizes inputs (selection → dossier, positions → ids) │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business logic, returns `CmdResult`                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Domain (model.rs, registry.rs, catalog.rs)                 │
//! │  - Dossier page list and markers                            │
//! │  - Dossier registry with the selection cursor               │
//! │  - Document catalog over async page sources                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## References, not copies
//!
//! A dossier page points at `(document id, page number)`. Documents are
//! owned by the catalog and may be missing or fail to open; views report
//! such pages as unavailable instead of failing.
//!
//! ## Strict lookups, lenient mutations
//!
//! Lookups (`get`, `resolve_page_count`, `get_page`) fail loudly with
//! [`error::DossierError`]. Mutations driven by direct manipulation
//! (removing pages, reordering, removing markers) ignore stale ids.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`model`]: `Dossier`, `DossierPage`, `Marker`
//! - [`registry`]: Dossier registry and selection
//! - [`catalog`]: Document catalog and the page source traits
//! - [`source`]: Concrete page sources
//! - [`index`]: Page positions (`c`, `1`, `2-4`)
//! - [`id`]: Identifier generation
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod id;
pub mod index;
pub mod model;
pub mod registry;
pub mod source;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
