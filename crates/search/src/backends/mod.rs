//! Search backend implementations.
//!
//! Each backend is gated behind a feature flag of the same name.

#[cfg(feature = "elasticsearch")]
pub mod elasticsearch;
