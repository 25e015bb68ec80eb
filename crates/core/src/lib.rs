//! Domain types and pure logic for the media-import service.
//!
//! This crate has no database or HTTP dependencies. It provides the
//! error taxonomy, shared type aliases, and the pluggable import source
//! capability the worker executes against.

pub mod error;
pub mod source;
pub mod types;
