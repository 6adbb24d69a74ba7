//! Codec for structured data embedded in free-text record fields.

mod annotations;

pub use annotations::*;
