//! Shared data model layer (structs/constants only).
//!
//! ## Purpose
//! - Keep report/DTO structs in one place so every renderer sees the same shapes.
//! - Make JSON output schema changes explicit and reviewable.
//!
//! ## Files
//! - `models.rs`: decisions, thresholds, section reports, output envelopes.
//! - `constants.rs`: artifact names, column names, threshold bounds, rule cut-offs.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem side effects.
//!
//! ## Compatibility note
//! Changes in these structs affect `--json` outputs.
//! Keep schema-impacting changes synchronized with `docs/contracts/*`.

pub mod constants;
pub mod models;
