//! Core library for the internal idea-submission and review platform:
//! workflow state machine, weighted grading, rating ledger, leaderboard
//! queries, and the boundary traits for the external store and assistant
//! collaborators.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
