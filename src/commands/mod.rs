//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `sections.rs`: single-section commands (outcomes/decisions/distribution/explain/fairness/classify).
//! - `dashboard.rs`: full report and schema.
//! - `session.rs`: interactive control loop over stdin.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate evaluation to `services/*`.
//! - Keep behavior and output schema stable.

pub mod dashboard;
pub mod sections;
pub mod session;

pub use dashboard::handle_dashboard_commands;
pub use sections::handle_section_commands;
pub use session::handle_session_command;
