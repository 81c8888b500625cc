//! Screen normalization and filtering pipeline.
//!
//! CMS records flow through `normalize` -> `ordering` -> `partition` -> `grouping`;
//! `catalog`, `detail` and `viewer` shape the results for the front end.
//! Every function here is pure and synchronous and never fails on bad data:
//! records that cannot be used are dropped instead.

pub mod catalog;
pub mod detail;
pub mod grouping;
pub mod normalize;
pub mod ordering;
pub mod partition;
pub mod viewer;

#[cfg(test)]
pub(crate) mod test_support;
