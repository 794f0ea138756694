//! restconfig — INI-style configuration served over a small HTTP API.
//!
//! Hexagonal architecture: domain types in [`domain`], the [`ConfigSource`]
//! lookup port in [`ports`], and in [`adapters`] the local INI backend, the
//! HTTP server exposing any source, and the HTTP client that is itself a source.
//!
//! [`ConfigSource`]: ports::config_source::ConfigSource

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod logging;
pub mod ports;
