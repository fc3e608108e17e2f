//! Terminal output helpers.

mod output;

pub use output::{Output, set_quiet};
