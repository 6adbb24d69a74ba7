//! Domain models for the clinic front desk.

mod category;
mod financial;
mod record;

pub use category::*;
pub use financial::*;
pub use record::*;
