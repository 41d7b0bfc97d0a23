//! Fixed domain tables consumed by the calculators.
//!
//! Kept as data so each table can be checked independently of the
//! aggregation code that reads it.

pub mod axes;
pub mod flow;
pub mod items;
pub mod partner;
