//! # resac-split
//!
//! Reproducible partitioning of a sample axis into train, validation, and
//! test index sets.
//!
//! A seeded permutation of `0..total` is cut into three consecutive
//! stretches sized by the requested percentages. Percentages need not sum
//! to 100: the remainder of the permutation belongs to no set, and
//! downstream code depends on those exact counts, so the remainder is
//! excluded rather than redistributed.

mod error;
mod split;

pub use error::SplitError;
pub use split::{SampleSplit, SplitSpec};
