//! HTTP service wrapping the content transformation library.

pub mod cache;
pub mod config;
pub mod error;
pub mod server;

pub use config::Config;
