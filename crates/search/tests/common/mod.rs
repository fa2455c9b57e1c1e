//! Test infrastructure for the member search layer.
//!
//! Provides an in-memory search backend that replays scripted pages and
//! records every call, plus fixtures for building configurations and pages.

#![allow(dead_code)]

pub mod fixtures;
pub mod mock;

pub use fixtures::*;
pub use mock::*;
