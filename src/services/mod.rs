//! Service layer containing the evaluator and side-effect helpers.
//!
//! ## Service map
//! - `policy.rs`: decision policy classifier + outcome aggregation.
//! - `explain.rs`: per-customer reason-code lookup.
//! - `fairness.rs`: group approval rates, disparate impact, governance action.
//! - `distribution.rs`: prob_default histogram.
//! - `storage.rs`: artifact loading + content-addressed cache.
//! - `config.rs`: config file / env / flag layering.
//! - `report.rs`: dashboard assembly with degraded sections.
//! - `render.rs`: plain-text rendering.
//! - `output.rs`: JSON/text output helpers.
//!
//! ## Conventions
//! - Evaluator functions are pure; thresholds and selections arrive as arguments.
//! - Side effects (file reads, stdout) stay in `storage.rs` and `output.rs`.
//! - Keep command handlers thin; delegate to services.

pub mod config;
pub mod distribution;
pub mod explain;
pub mod fairness;
pub mod output;
pub mod policy;
pub mod render;
pub mod report;
pub mod storage;
