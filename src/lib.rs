//! Quickstart setup library — exposes modules for integration testing.

#![cfg_attr(test, allow(clippy::expect_used))]

pub mod cli;
pub mod command_runner;
pub mod config;
pub mod diagrid;
pub mod error;
pub mod output;
pub mod provision;
pub mod setup;
