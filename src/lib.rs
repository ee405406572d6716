//! Item bags library - persistence for nested, polymorphic item bags.
//!
//! This library exposes the core functionality of the `bags` CLI for use in
//! tests and by the game-side code that owns live bags.
//!
//! # Modules
//!
//! - `bag`: Live bag model (bounded, bundle, rucksack and omni bags)
//! - `config`: Bag type definitions and the type index
//! - `snapshot`: Encoding, decoding and storing saved bags
//! - `error`: Error types with user-recoverable hints
//! - `logging`: Tracing subscriber setup
#![forbid(unsafe_code)]

pub mod bag;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod snapshot;
