//! Database query modules.
//!
//! - files: pending uploads, scoped by owner

pub mod files;
