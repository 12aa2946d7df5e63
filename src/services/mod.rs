//! Service layer: remote clients and side-effect helpers.
//!
//! ## Service map
//! - `policy.rs`: owner-scoped policy api (`PolicyApi`) and its HTTP client.
//! - `decision_logs.rs`: offset paginator over decision log pages.
//! - `graphql.rs`: GraphQL transport for the registry.
//! - `namespace.rs`: namespace mutations and create-mode resolution.
//! - `dates.rs`: lenient date parsing for log filters.
//! - `prompt.rs`: yes/no confirmation.
//! - `progress.rs`: stderr spinner.
//! - `settings.rs`: config file, connection settings, logging setup.
//! - `output.rs`: JSON output helpers.
//!
//! ## Conventions
//! - Remote clients sit behind traits so command handlers can be tested with fakes.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod dates;
pub mod decision_logs;
pub mod graphql;
pub mod namespace;
pub mod output;
pub mod policy;
pub mod progress;
pub mod prompt;
pub mod settings;
