//! Layout reconstruction: line grouping, baseline estimation, and
//! structure classification over positioned text fragments.

mod classify;
mod group;
mod metrics;

pub use classify::LineClassifier;
pub use group::group_into_lines;
pub use metrics::PageMetrics;
