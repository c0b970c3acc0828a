//! Overlap annotation for probe intervals.
//!
//! The primary operation takes a query probe set and an annotation track and
//! computes, per query interval, the fraction of the query covered by
//! overlapping annotations (`PO`) and the fraction of the annotation covered
//! (`RPO`, the reciprocal overlap), averaged when a query overlaps several
//! annotations. The secondary operation left-joins several such annotation
//! tables back onto the query set.

pub mod annotate;
pub mod combine;
pub mod overlap;

// re-exports
pub use annotate::{OverlapRow, annotate_overlap, write_overlap_tsv};
pub use combine::combine_annotations;
pub use overlap::{AnnotationIndex, Interval};
