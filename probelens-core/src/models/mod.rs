pub mod catalog;
pub mod probe;

// re-export for cleaner imports
pub use self::catalog::ProbeCatalog;
pub use self::probe::Probe;
