//! Export surfaces for an update record.
//!
//! A single assembly step ([`assemble::assemble`]) decides which sections are
//! present and what their display text is; the email, PDF and screen surfaces
//! all render from that one result so they can never disagree on content.

pub mod assemble;
pub mod email;
pub mod pdf;
mod pdf_writer;

pub use assemble::{assemble, download_basename, AssembledUpdate, MetricTile, SectionBlock};
pub use email::render_email;
pub use pdf::render_pdf;
