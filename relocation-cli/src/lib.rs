//! Command line front end for the relocation planner.
//!
//! Loads scenario, regime and income files, wires up logging and storage,
//! and renders evaluations as text.

pub mod config;
pub mod loader;
pub mod logging;
pub mod report;
