//! Core engine behind the job-portal profile wizard: draft reconciliation,
//! weighted completion scoring, step sequencing, and debounced persistence.

pub mod backend;
pub mod config;
pub mod draft;
pub mod errors;
pub mod persist;
pub mod scoring;
pub mod steps;
pub mod store;
