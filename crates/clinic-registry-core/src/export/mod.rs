//! Plain-text report export.

mod report;

pub use report::*;
