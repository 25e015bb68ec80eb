//! Background import worker.
//!
//! [`runner`] claims due jobs from the queue, [`executor`] runs one
//! attempt (fetch candidates, persist records, update job state) with
//! bounded retry, and [`expiry`] sweeps expired job state.

pub mod executor;
pub mod expiry;
pub mod runner;
