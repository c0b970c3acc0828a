//! Per-probe alignment-metric aggregation over indexed BAM files.
//!
//! Given a catalog of target intervals and a coordinate-sorted, indexed BAM
//! file, this crate computes one row of summary statistics per probe:
//! raw read depth, mapping-quality and insert-size distributions, and the
//! bwa alignment-score tags (`AS`, `XS`, `MQ`) with a tiered fallback when
//! the optional tags are missing from a record.
//!
//! The pipeline is: [`ProbeCatalog`](probelens_core::ProbeCatalog) →
//! per-probe BAM query → [`classify`](classify::classify) →
//! [`MetricAccumulator`](accumulate::MetricAccumulator) →
//! [`reduce`](stats::reduce) → [`MetricsTable`](emit::MetricsTable).
//! Results are stable regardless of record order and of which optional tags
//! are present on any given record.

pub mod accumulate;
pub mod classify;
pub mod emit;
pub mod errors;
pub mod extract;
pub mod merge;
pub mod stats;

// re-exports
pub use accumulate::MetricAccumulator;
pub use classify::{ClassifiedRecord, MetricField, classify};
pub use emit::MetricsTable;
pub use errors::MetricsError;
pub use extract::extract_metrics;
pub use merge::merge_chunk_tables;
pub use stats::{ProbeStats, StatMode, reduce};
