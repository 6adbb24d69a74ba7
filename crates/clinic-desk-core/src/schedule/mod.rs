//! Daily time-slot scheduler.
//!
//! Pipeline: Window → Slot grid → Record assignment → Slot classification

mod assign;
mod config;
mod slots;

pub use assign::*;
pub use config::*;
pub use slots::*;
