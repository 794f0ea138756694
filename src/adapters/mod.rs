//! Concrete implementations of the configuration port.

pub mod ini_config_adapter;
#[cfg(feature = "client")]
pub mod rest_client;
#[cfg(feature = "server")]
pub mod web;
