//! Scoring, gating, and ranking engine for CFO leadership applications.

pub mod config;
pub mod error;
pub mod screening;
pub mod telemetry;
