//! Analysis modules.
//!
//! Statistics over loaded student records.

pub mod aggregator;

pub use aggregator::*;
