//! Agenda view for a single day.

mod view;

pub use view::*;
