//! Command modules - one file per CLI command

pub mod clean;
pub mod completions;
pub mod config;
pub mod create;
pub mod list;
