#[cfg(feature = "core")]
#[doc(inline)]
pub use probelens_core as core;

#[cfg(feature = "metrics")]
#[doc(inline)]
pub use probelens_metrics as metrics;

#[cfg(feature = "annotate")]
#[doc(inline)]
pub use probelens_annotate as annotate;
