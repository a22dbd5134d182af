//! Unit tests for the quickstart setup CLI.
//!
//! These tests use mocked `diagrid` doubles and run fast without spawning
//! external processes; timer-driven poller tests run on a paused tokio
//! clock so the real poll delays never elapse.

mod config;
mod setup;
