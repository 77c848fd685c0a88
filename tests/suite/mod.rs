//! Integration test suite modules

mod config;
mod pipeline;
mod report;
