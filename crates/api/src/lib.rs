//! Media-import API server library.
//!
//! Exposes the building blocks (config, state, error handling, dispatch,
//! routes) so integration tests and the binary entrypoint can both
//! access them.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod routes;
pub mod state;
