//! High-level operations that correspond to CLI commands
//!
//! These modules hold the business logic behind each `renamefiles` invocation,
//! kept apart from CLI concerns like argument parsing and output formatting.

pub mod run;

pub use run::run_operation;
