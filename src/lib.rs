//! Episort - sorts uploaded episodes and reports the gaps
//!
//! This library crate exposes the core functionality for integration testing.

pub mod bot;
pub mod config;
pub mod render;
pub mod sorter;
pub mod telegram;
