//! URL handling module for Brandsift
//!
//! This module provides reference resolution, internal-link classification,
//! crawl-domain extraction, and the thumbnail-to-original rewrite heuristic.

mod classify;
mod domain;
mod upgrade;

// Re-export main functions
pub use classify::{resolve_absolute, resolve_internal};
pub use domain::{extract_domain, strip_www};
pub use upgrade::upgrade_to_high_res;
