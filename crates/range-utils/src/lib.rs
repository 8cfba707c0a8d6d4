//! Shared utilities for range-bot
//!
//! This crate provides common functionality used across the range-bot workspace,
//! namely logging setup and the application environment.

pub mod config;
pub mod logging;

pub use config::{AppConfig, Environment};
pub use logging::{LogFormat, init_tracing, init_tracing_with};
