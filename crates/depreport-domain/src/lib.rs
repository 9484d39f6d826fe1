//! Pure dependency report aggregation (no IO of its own).
//!
//! Input: a resolved dependency graph constructed elsewhere.
//! Output: typed report sections; every lookup goes through [`ports`].

#![forbid(unsafe_code)]

pub mod error;
pub mod files;
pub mod licenses;
pub mod model;
pub mod policy;
pub mod ports;
pub mod report;
pub mod repositories;
pub mod scope;
pub mod tree;

mod engine;
mod parallel;

pub use depreport_types::TotalsAccumulator;
pub use engine::generate;
pub use report::{DomainReport, RunStats};

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;
