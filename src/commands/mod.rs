//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `policy.rs`: list/create/get/delete/update/logs/decide under `policy`.
//! - `namespace.rs`: create/rename/delete-alias under `namespace`, with confirmation.
//!
//! ## Principles
//! - Parse/match CLI inputs here and validate them before any network call.
//! - Delegate remote calls to `services/*`.
//! - Keep output stable: JSON for policy results, plain text for namespaces.

pub mod namespace;
pub mod policy;

pub use namespace::handle_namespace_commands;
pub use policy::handle_policy_commands;
