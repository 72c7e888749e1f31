//! Shared constants for the FounderBrief core.

/// Directory under the data dir where update records are stored.
pub const UPDATES_DIR_NAME: &str = "updates";

/// Default data directory when `BRIEF_DATA_DIR` is not set.
pub const DEFAULT_DATA_DIR: &str = "./brief_data";

/// Product name shown in document headers.
pub const BRAND_NAME: &str = "FounderBrief";

/// Attribution line rendered at the bottom of every exported document.
pub const FOOTER_ATTRIBUTION: &str = "Generated by FounderBrief - Investor Updates in Minutes";

/// Maximum accepted title length, in characters.
pub const MAX_TITLE_LEN: usize = 100;
