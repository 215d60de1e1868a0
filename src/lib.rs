//! Library exports for counter-rebase, shared between the binary and tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod prompt;
pub mod query;
pub mod rules;
pub mod startup;
pub mod utils;
