//! Call contract for the per-asset analysis collaborators
//!
//! Color extraction and tagging run outside the crawl core; the orchestration
//! layer invokes them once per downloaded asset. The core only pins down the
//! shape of those calls so downstream aggregation can be written against a
//! stable seam.

use std::path::Path;

/// Per-asset signal extraction implemented by the orchestration layer
pub trait AssetAnalyzer {
    /// Dominant colors of the asset at `path`, as hex strings.
    ///
    /// May be empty, notably for vector formats that are not rasterized.
    fn dominant_colors(&self, path: &Path) -> Vec<String>;

    /// Short descriptive tags for the asset at `path`.
    ///
    /// Implementations signal failure in-band: a single element beginning
    /// with "Error" or stating the analyzer is not configured. Callers pass
    /// such sentinels through unchanged rather than treating them as errors.
    fn describe(&self, path: &Path) -> Vec<String>;
}
