//! Shared data model layer (structs/constants only).
//!
//! ## Files
//! - `models.rs`: policy resource and request shapes sent to the policy api.
//! - `constants.rs`: default endpoints and contexts.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! `Policy` is printed as-is by `policy list/get/create/update`.
//! Keep schema-impacting changes synchronized with `docs/contracts/*`.

pub mod constants;
pub mod models;
