//! # FounderBrief Core
//!
//! Core business logic for the FounderBrief investor-update system.
//!
//! This crate contains pure data operations and the file-backed record store:
//! - Update records with free-form scalar metrics and narrative fields
//! - Parsing of generated narrative text into its four named sections
//! - Synthetic chart series derived from the scalar metrics
//! - Assembly of the three export surfaces (PDF document, email text,
//!   screen view model) from one shared view
//!
//! **No API concerns**: HTTP routing, OpenAPI documentation, and the upstream
//! narrative-generation client belong in `api-rest` and `narrative-ai`.

pub mod charts;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod narrative;
pub mod store;
pub mod update;

pub use charts::ChartSeries;
pub use config::CoreConfig;
pub use error::{UpdateError, UpdateResult};
pub use export::{assemble, download_basename, render_email, render_pdf, AssembledUpdate};
pub use narrative::ParsedSections;
pub use store::UpdateStore;
pub use update::{UpdateDraft, UpdatePatch, UpdateRecord, UpdateStatus};
