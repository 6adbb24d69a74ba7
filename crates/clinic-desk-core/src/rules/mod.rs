//! Status rules: badge legality and pipeline bookkeeping.
//!
//! The rule engine never enforces transition order. It decides which
//! indicators may be shown for whatever (status, outcome) pair a record
//! currently holds.

mod badges;
mod pipeline;

pub use badges::*;
pub use pipeline::*;
