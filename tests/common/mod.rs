//! Common test utilities for the item bags CLI.
//!
//! - `fixtures`: bag type configs, live bags and save files on disk
//! - `cli`: runner for the `bags` binary
#![allow(dead_code)]

pub mod cli;
pub mod fixtures;

use tracing_subscriber::EnvFilter;

pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
