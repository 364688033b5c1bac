//! CLI command implementations.

pub mod clean;
pub mod inspect;
pub mod months;
